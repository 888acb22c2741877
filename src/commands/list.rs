use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::card::Keyword;
use crate::error::{FitsError, Result};
use crate::fits::{is_fits_path, FitsFile};

#[derive(Serialize)]
struct FileKeywords {
    file: String,
    keywords: Vec<Keyword>,
}

pub fn run_list(files: Vec<PathBuf>, format: &str, all: bool) -> anyhow::Result<()> {
    match format.to_lowercase().as_str() {
        "json" => list_json(&files, all)?,
        "csv" => list_csv(&files, all)?,
        _ => list_table(&files, all),
    }
    Ok(())
}

fn read_keywords(path: &Path, all: bool) -> Result<Vec<Keyword>> {
    if !is_fits_path(path) {
        return Err(FitsError::UnsupportedExtension(path.to_path_buf()));
    }
    let fits = FitsFile::read(path)?;
    let keywords = if all {
        fits.header.records.clone()
    } else {
        fits.header.editable().to_vec()
    };
    Ok(keywords)
}

fn list_table(files: &[PathBuf], all: bool) {
    let total = files.len();
    let mut read_count = 0;
    let mut error_count = 0;

    for (index, path) in files.iter().enumerate() {
        println!("File {}/{}: {}", index + 1, total, path.display());
        match read_keywords(path, all) {
            Ok(keywords) => {
                read_count += 1;
                if keywords.is_empty() {
                    println!("  (no editable keywords)");
                }
                for keyword in &keywords {
                    if keyword.value.is_empty() {
                        println!("  {:<8} {}", keyword.name, keyword.comment.trim());
                    } else if keyword.comment.is_empty() {
                        println!("  {:<8} = {}", keyword.name, keyword.value.trim());
                    } else {
                        println!(
                            "  {:<8} = {:<22} / {}",
                            keyword.name,
                            truncate_string(keyword.value.trim(), 22),
                            keyword.comment.trim()
                        );
                    }
                }
            }
            Err(err) => {
                error_count += 1;
                println!("  ERROR: {}", err);
            }
        }
        if index + 1 < total {
            println!();
        }
    }

    println!("\nSummary:");
    println!("  Successfully read: {}", read_count);
    if error_count > 0 {
        println!("  Errors: {}", error_count);
    }
}

fn list_json(files: &[PathBuf], all: bool) -> anyhow::Result<()> {
    let mut listings = Vec::new();
    for path in files {
        if let Ok(keywords) = read_keywords(path, all) {
            listings.push(FileKeywords {
                file: path.display().to_string(),
                keywords,
            });
        }
    }
    println!("{}", serde_json::to_string_pretty(&listings)?);
    Ok(())
}

fn list_csv(files: &[PathBuf], all: bool) -> anyhow::Result<()> {
    println!("file,name,value,comment");
    for path in files {
        if let Ok(keywords) = read_keywords(path, all) {
            let file = path.display().to_string();
            for keyword in keywords {
                println!(
                    "{},{},{},{}",
                    escape_csv(&file),
                    escape_csv(&keyword.name),
                    escape_csv(keyword.value.trim()),
                    escape_csv(keyword.comment.trim())
                );
            }
        }
    }
    Ok(())
}

fn truncate_string(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        format!("{}...", &s[..max_len - 3])
    }
}

fn escape_csv(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
