use std::path::PathBuf;

use crate::batch::{BatchJob, EditAction};
use crate::card::Keyword;
use crate::cli::OutputOptions;
use crate::edit::EditSpec;

#[allow(clippy::too_many_arguments)]
pub fn run_edit(
    files: Vec<PathBuf>,
    keyword: &str,
    value: &str,
    comment: &str,
    match_value: Option<String>,
    match_comment: Option<String>,
    output: &OutputOptions,
) -> anyhow::Result<()> {
    // Passing either matcher switches from name-only to full matching.
    let name_only = match_value.is_none() && match_comment.is_none();
    let target = Keyword::new(
        keyword,
        match_value.as_deref().unwrap_or(""),
        match_comment.as_deref().unwrap_or(""),
    );
    let job = BatchJob {
        action: EditAction::Edit(EditSpec {
            target,
            name_only,
            value: value.to_string(),
            comment: comment.to_string(),
        }),
        output: super::output_config(output),
        files,
    };
    super::run_job(job, output.keep_going)
}
