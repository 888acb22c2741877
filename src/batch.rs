use std::fmt;
use std::path::{Path, PathBuf};

use crate::edit::{add_keyword, edit_keyword, remove_keyword, AddSpec, EditSpec, RemoveSpec};
use crate::error::{FitsError, Result};
use crate::fits::{is_fits_path, FitsFile};
use crate::header::FitsHeader;

/// The one edit applied to every file of a run.
#[derive(Debug, Clone)]
pub enum EditAction {
    Add(AddSpec),
    Edit(EditSpec),
    Remove(RemoveSpec),
}

impl EditAction {
    pub fn apply(&self, header: &FitsHeader) -> Result<FitsHeader> {
        match self {
            EditAction::Add(spec) => add_keyword(header, spec),
            EditAction::Edit(spec) => edit_keyword(header, spec),
            EditAction::Remove(spec) => remove_keyword(header, spec),
        }
    }
}

/// Where and under what name output files are written.
#[derive(Debug, Clone, Default)]
pub struct OutputConfig {
    /// Output directory; each input's own directory when unset.
    pub dir: Option<PathBuf>,
    /// Prepended to the output file name.
    pub prefix: String,
    /// Appended to the output file name, before the extension.
    pub postfix: String,
}

/// Configuration for one batch run, built once from user input and
/// consumed by [`run_batch`].
#[derive(Debug, Clone)]
pub struct BatchJob {
    pub action: EditAction,
    pub output: OutputConfig,
    pub files: Vec<PathBuf>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub succeeded: usize,
    pub errored: usize,
    pub skipped: usize,
}

impl fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} succeeded, {} error(s), {} skipped",
            self.succeeded, self.errored, self.skipped
        )
    }
}

/// Process every file of the job in order, one at a time.
///
/// Each failure is counted and, for every file but the last, handed to
/// `confirm`; returning false aborts the run and counts the remaining files
/// as skipped. A failure on the last file has no run left to confirm, so it
/// is returned to the caller after the summary line is printed.
pub fn run_batch<F>(job: &BatchJob, confirm: &mut F) -> Result<BatchSummary>
where
    F: FnMut(&Path, &FitsError) -> bool,
{
    let total = job.files.len();
    let mut summary = BatchSummary::default();

    for (index, path) in job.files.iter().enumerate() {
        println!("({}/{}) {}", index + 1, total, path.display());
        match process_file(path, &job.action, &job.output) {
            Ok(output_path) => {
                summary.succeeded += 1;
                println!("  wrote {}", output_path.display());
            }
            Err(err) => {
                summary.errored += 1;
                println!("  ERROR: {}", err);
                if index + 1 == total {
                    println!("{}", summary);
                    return Err(err);
                }
                if !confirm(path, &err) {
                    summary.skipped = total - index - 1;
                    break;
                }
            }
        }
    }

    println!("{}", summary);
    Ok(summary)
}

/// Read, transform and write one file.
fn process_file(path: &Path, action: &EditAction, output: &OutputConfig) -> Result<PathBuf> {
    if !is_fits_path(path) {
        return Err(FitsError::UnsupportedExtension(path.to_path_buf()));
    }

    let fits = FitsFile::read(path)?;

    if let EditAction::Add(spec) = action {
        if spec.allow_duplicates && fits.header.contains_name(&spec.keyword.name) {
            tracing::warn!(
                "keyword {} already present in {}; adding another copy",
                spec.keyword.name,
                path.display()
            );
        }
    }

    let edited = action.apply(&fits.header)?;
    let output_path = derive_output_path(path, output, |candidate| candidate.exists());
    fits.with_header(edited).write(&output_path)?;
    Ok(output_path)
}

/// Derive the output path for `input`: configured directory (else the
/// input's own), prefix + stem + postfix, the input's own extension with
/// its case preserved. An existing path is never reused; `_1`, `_2`, … are
/// tried before the extension until a free name is found.
///
/// The existence check is injected so the policy itself stays pure.
pub fn derive_output_path<F>(input: &Path, config: &OutputConfig, exists: F) -> PathBuf
where
    F: Fn(&Path) -> bool,
{
    let dir = config
        .dir
        .clone()
        .unwrap_or_else(|| input.parent().map(Path::to_path_buf).unwrap_or_default());
    let stem = input
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or_default();
    let extension = input
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("fit");
    let base = format!("{}{}{}", config.prefix, stem, config.postfix);

    let candidate = dir.join(format!("{}.{}", base, extension));
    if !exists(&candidate) {
        return candidate;
    }
    let mut attempt = 1;
    loop {
        let candidate = dir.join(format!("{}_{}.{}", base, attempt, extension));
        if !exists(&candidate) {
            return candidate;
        }
        attempt += 1;
    }
}
