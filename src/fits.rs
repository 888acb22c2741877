use std::fs::{File, OpenOptions};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use crate::card::{encode_card, CARD_LEN};
use crate::error::{FitsError, Result};
use crate::header::{FitsHeader, BLOCK_LEN};

/// One single-HDU FITS image: the decoded header plus the raw data region
/// (pixels and trailing block padding) exactly as read from disk.
#[derive(Debug, Clone)]
pub struct FitsFile {
    pub header: FitsHeader,
    data: Vec<u8>,
}

impl FitsFile {
    /// Read a FITS file from disk.
    ///
    /// The header is decoded record by record; everything after the header
    /// padding is kept as opaque bytes. A file with more bytes than one
    /// HDU's padded data region holds another HDU and is rejected.
    pub fn read(path: &Path) -> Result<FitsFile> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        let header = FitsHeader::read_from(&mut reader)?;

        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;

        let data_len = data.len() as u64;
        if data_len > header.padded_data_len() {
            return Err(FitsError::MultiImageUnsupported);
        }
        if data_len < header.data_len() {
            return Err(FitsError::MalformedHeader(
                "data region shorter than NAXIS/BITPIX imply".to_string(),
            ));
        }

        tracing::debug!(
            "read {}: {} header records, {} data bytes",
            path.display(),
            header.len(),
            data_len
        );
        Ok(FitsFile { header, data })
    }

    /// The raw data region, padding included.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// The same pixel bytes under a different header.
    pub fn with_header(&self, header: FitsHeader) -> FitsFile {
        FitsFile {
            header,
            data: self.data.clone(),
        }
    }

    /// Write the file to `path`: re-encoded header records, space padding to
    /// the block boundary, then the data region byte for byte as it was
    /// read. Fails if `path` already exists; picking a free path is the
    /// caller's job and this writer never overwrites.
    pub fn write(&self, path: &Path) -> Result<()> {
        let file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)?;
        let mut writer = BufWriter::new(file);

        for record in &self.header.records {
            writer.write_all(&encode_card(record))?;
        }
        let header_len = self.header.len() * CARD_LEN;
        let padding = (BLOCK_LEN - header_len % BLOCK_LEN) % BLOCK_LEN;
        writer.write_all(&vec![b' '; padding])?;

        writer.write_all(&self.data)?;
        writer.flush()?;
        Ok(())
    }
}

/// Accepted input extensions, compared case-insensitively.
pub fn is_fits_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext_lower = ext.to_lowercase();
            ext_lower == "fits" || ext_lower == "fit" || ext_lower == "fts"
        })
        .unwrap_or(false)
}
