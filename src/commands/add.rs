use std::path::PathBuf;

use crate::batch::{BatchJob, EditAction};
use crate::card::Keyword;
use crate::cli::OutputOptions;
use crate::edit::AddSpec;

#[allow(clippy::too_many_arguments)]
pub fn run_add(
    files: Vec<PathBuf>,
    keyword: &str,
    value: &str,
    comment: &str,
    anchor: Option<String>,
    before: bool,
    allow_duplicates: bool,
    output: &OutputOptions,
) -> anyhow::Result<()> {
    let job = BatchJob {
        action: EditAction::Add(AddSpec {
            keyword: Keyword::new(keyword, value, comment),
            anchor: anchor.unwrap_or_default(),
            after: !before,
            allow_duplicates,
        }),
        output: super::output_config(output),
        files,
    };
    super::run_job(job, output.keep_going)
}
