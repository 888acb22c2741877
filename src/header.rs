use std::io::Read;

use crate::card::{decode_card, Keyword, CARD_LEN};
use crate::error::{FitsError, Result};

/// FITS files are organized in 2880-byte blocks; headers are padded to a
/// block boundary with spaces, data with zeros.
pub const BLOCK_LEN: usize = 2880;

/// Upper bound on header records (200 blocks). A header that long without
/// an END record is treated as malformed instead of being read forever.
pub const MAX_HEADER_RECORDS: usize = 7200;

/// The ordered header of one FITS image: every decoded record including the
/// structural prefix and the terminal END sentinel, in on-disk order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FitsHeader {
    pub records: Vec<Keyword>,
}

impl FitsHeader {
    pub fn from_records(records: Vec<Keyword>) -> Self {
        FitsHeader { records }
    }

    /// Read 80-byte records until (and including) the END sentinel, then
    /// consume the space padding up to the next 2880-byte block boundary.
    pub fn read_from<R: Read>(reader: &mut R) -> Result<FitsHeader> {
        let mut records = Vec::new();
        let mut buffer = [0u8; CARD_LEN];

        loop {
            reader
                .read_exact(&mut buffer)
                .map_err(map_truncation("header ended before END record"))?;
            let keyword = decode_card(&buffer);
            let is_end = keyword.name == "END";
            records.push(keyword);
            if is_end {
                break;
            }
            if records.len() >= MAX_HEADER_RECORDS {
                return Err(FitsError::MalformedHeader(format!(
                    "no END record within {} records",
                    MAX_HEADER_RECORDS
                )));
            }
        }

        let padding = (BLOCK_LEN - (records.len() * CARD_LEN) % BLOCK_LEN) % BLOCK_LEN;
        if padding > 0 {
            let mut skip = vec![0u8; padding];
            reader
                .read_exact(&mut skip)
                .map_err(map_truncation("header padding truncated"))?;
        }

        Ok(FitsHeader { records })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Index of the END sentinel, or the sequence length if it is absent.
    pub fn end_index(&self) -> usize {
        self.records
            .iter()
            .position(|record| record.name == "END")
            .unwrap_or(self.records.len())
    }

    /// Axis count taken from the third record. Headers where that record is
    /// not a parseable NAXIS count as zero axes rather than failing; the
    /// decoder already degrades silently on malformed cards.
    pub fn naxis(&self) -> usize {
        self.records
            .get(2)
            .filter(|record| record.name == "NAXIS")
            .and_then(|record| record.value.trim().parse::<usize>().ok())
            .unwrap_or(0)
    }

    /// Range of records exposed for editing: everything past the structural
    /// prefix (SIMPLE, BITPIX, NAXIS plus one NAXISn per axis) and before
    /// the END sentinel.
    pub fn editable_range(&self) -> std::ops::Range<usize> {
        let end = self.end_index();
        let start = (3 + self.naxis()).min(end);
        start..end
    }

    pub fn editable(&self) -> &[Keyword] {
        &self.records[self.editable_range()]
    }

    /// True if any record anywhere in the sequence has the given name.
    pub fn contains_name(&self, name: &str) -> bool {
        let probe = Keyword::new(name, "", "");
        self.records
            .iter()
            .any(|record| record.matches(&probe, true))
    }

    /// First record with the given name, parsed as an integer.
    pub fn int_value(&self, name: &str) -> Option<i64> {
        let probe = Keyword::new(name, "", "");
        self.records
            .iter()
            .find(|record| record.matches(&probe, true))
            .and_then(|record| record.value.trim().parse::<i64>().ok())
    }

    /// Byte length of the data region implied by BITPIX and the NAXISn
    /// keywords, before block padding.
    pub fn data_len(&self) -> u64 {
        let naxis = self.int_value("NAXIS").unwrap_or(0);
        if naxis <= 0 {
            return 0;
        }
        let bits_per_element = self.int_value("BITPIX").unwrap_or(8).unsigned_abs();
        let mut pixels: u64 = 1;
        for axis in 1..=naxis {
            let dim = self
                .int_value(&format!("NAXIS{}", axis))
                .unwrap_or(0)
                .max(0) as u64;
            pixels = pixels.saturating_mul(dim);
        }
        (pixels.saturating_mul(bits_per_element) + 7) / 8
    }

    /// Data region length rounded up to the next 2880-byte block.
    pub fn padded_data_len(&self) -> u64 {
        round_to_block(self.data_len())
    }
}

pub fn round_to_block(len: u64) -> u64 {
    let block = BLOCK_LEN as u64;
    len.div_ceil(block) * block
}

fn map_truncation(detail: &'static str) -> impl Fn(std::io::Error) -> FitsError {
    move |err| {
        if err.kind() == std::io::ErrorKind::UnexpectedEof {
            FitsError::MalformedHeader(detail.to_string())
        } else {
            FitsError::Io(err)
        }
    }
}
