use anyhow::Result;
use clap::Parser;

use fitskeys::cli::{Cli, Commands};
use fitskeys::commands::{run_add, run_edit, run_list, run_remove};

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Add {
            files,
            keyword,
            value,
            comment,
            anchor,
            before,
            allow_duplicates,
            output,
        } => run_add(
            files,
            &keyword,
            &value,
            &comment,
            anchor,
            before,
            allow_duplicates,
            &output,
        ),
        Commands::Edit {
            files,
            keyword,
            value,
            comment,
            match_value,
            match_comment,
            output,
        } => run_edit(
            files,
            &keyword,
            &value,
            &comment,
            match_value,
            match_comment,
            &output,
        ),
        Commands::Remove {
            files,
            keyword,
            match_value,
            match_comment,
            output,
        } => run_remove(files, &keyword, match_value, match_comment, &output),
        Commands::List { files, format, all } => run_list(files, &format, all),
    }
}
