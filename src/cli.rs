use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "fitskeys")]
#[command(about = "Batch editor for FITS header keywords", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add a keyword to each file's header
    Add {
        /// Input FITS files (.fit, .fits or .fts)
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Keyword name (8 characters at most in a valid header)
        #[arg(short, long)]
        keyword: String,

        /// Keyword value
        #[arg(short, long, default_value = "")]
        value: String,

        /// Keyword comment
        #[arg(short, long, default_value = "")]
        comment: String,

        /// Existing keyword to insert next to; inserts at the end of the
        /// header when omitted
        #[arg(short, long)]
        anchor: Option<String>,

        /// Insert before the anchor instead of after it
        #[arg(long, requires = "anchor")]
        before: bool,

        /// Add the keyword even if one with the same name already exists
        #[arg(long)]
        allow_duplicates: bool,

        #[command(flatten)]
        output: OutputOptions,
    },

    /// Replace the value and comment of an existing keyword
    Edit {
        /// Input FITS files (.fit, .fits or .fts)
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Name of the keyword to edit
        #[arg(short, long)]
        keyword: String,

        /// New value
        #[arg(short, long, default_value = "")]
        value: String,

        /// New comment
        #[arg(short, long, default_value = "")]
        comment: String,

        /// Only edit a keyword whose current value also matches this
        #[arg(long)]
        match_value: Option<String>,

        /// Only edit a keyword whose current comment also matches this
        #[arg(long)]
        match_comment: Option<String>,

        #[command(flatten)]
        output: OutputOptions,
    },

    /// Remove a keyword from each file's header
    Remove {
        /// Input FITS files (.fit, .fits or .fts)
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Name of the keyword to remove
        #[arg(short, long)]
        keyword: String,

        /// Only remove a keyword whose value also matches this
        #[arg(long)]
        match_value: Option<String>,

        /// Only remove a keyword whose comment also matches this
        #[arg(long)]
        match_comment: Option<String>,

        #[command(flatten)]
        output: OutputOptions,
    },

    /// Print the header keywords of each file
    List {
        /// Input FITS files (.fit, .fits or .fts)
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Output format (table, json, csv)
        #[arg(short, long, default_value = "table")]
        format: String,

        /// Include the structural prefix and the END sentinel
        #[arg(long)]
        all: bool,
    },
}

/// Output-file options shared by the editing subcommands.
#[derive(Args, Debug, Clone)]
pub struct OutputOptions {
    /// Directory for output files (defaults to each input's own directory)
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Text prepended to each output file name
    #[arg(long, default_value = "")]
    pub prefix: String,

    /// Text appended to each output file name, before the extension
    #[arg(long, default_value = "")]
    pub postfix: String,

    /// Keep processing after a file fails instead of asking whether to
    /// continue
    #[arg(long)]
    pub keep_going: bool,
}
