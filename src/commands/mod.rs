use std::io::{self, Write};
use std::path::Path;

use crate::batch::{run_batch, BatchJob, OutputConfig};
use crate::cli::OutputOptions;
use crate::error::FitsError;

pub mod add;
pub mod edit;
pub mod list;
pub mod remove;

pub use add::run_add;
pub use edit::run_edit;
pub use list::run_list;
pub use remove::run_remove;

pub(crate) fn output_config(options: &OutputOptions) -> OutputConfig {
    OutputConfig {
        dir: options.output_dir.clone(),
        prefix: options.prefix.clone(),
        postfix: options.postfix.clone(),
    }
}

/// Run a batch job with the interactive continue/abort decision, unless
/// `--keep-going` suppressed it.
pub(crate) fn run_job(job: BatchJob, keep_going: bool) -> anyhow::Result<()> {
    let mut confirm = |path: &Path, _err: &FitsError| keep_going || prompt_continue(path);
    run_batch(&job, &mut confirm)?;
    Ok(())
}

fn prompt_continue(path: &Path) -> bool {
    print!(
        "{} failed; continue with the remaining files? [y/N] ",
        path.display()
    );
    let _ = io::stdout().flush();
    let mut line = String::new();
    if io::stdin().read_line(&mut line).is_err() {
        return false;
    }
    matches!(line.trim(), "y" | "Y" | "yes" | "YES")
}
