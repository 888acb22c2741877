use std::path::PathBuf;

use crate::batch::{BatchJob, EditAction};
use crate::card::Keyword;
use crate::cli::OutputOptions;
use crate::edit::RemoveSpec;

pub fn run_remove(
    files: Vec<PathBuf>,
    keyword: &str,
    match_value: Option<String>,
    match_comment: Option<String>,
    output: &OutputOptions,
) -> anyhow::Result<()> {
    let name_only = match_value.is_none() && match_comment.is_none();
    let target = Keyword::new(
        keyword,
        match_value.as_deref().unwrap_or(""),
        match_comment.as_deref().unwrap_or(""),
    );
    let job = BatchJob {
        action: EditAction::Remove(RemoveSpec { target, name_only }),
        output: super::output_config(output),
        files,
    };
    super::run_job(job, output.keep_going)
}
