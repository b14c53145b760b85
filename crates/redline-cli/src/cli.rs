use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "redline",
    about = "Redline: review suggested edits to structured documents",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Word-level diff of two strings
    Words(WordsArgs),
    /// Merge two documents into one annotated document
    Merge(MergeArgs),
    /// Print a document as plain text
    Text(TextArgs),
    /// Accept every change in a merged document
    Accept(ResolveArgs),
    /// Reject every change in a merged document
    Reject(ResolveArgs),
    /// Summarize the changes between two documents
    Stats(MergeArgs),
}

#[derive(Args)]
pub struct WordsArgs {
    /// Original text, or `@path` to read it from a file
    pub old: String,
    /// Suggested text, or `@path` to read it from a file
    pub new: String,
}

#[derive(Args)]
pub struct MergeArgs {
    /// Original document (JSON)
    pub old: PathBuf,
    /// Suggested document (JSON)
    pub new: PathBuf,
    /// Merge configuration (TOML)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

#[derive(Args)]
pub struct TextArgs {
    /// Document (JSON)
    pub doc: PathBuf,
}

#[derive(Args)]
pub struct ResolveArgs {
    /// Merged document (JSON)
    pub merged: PathBuf,
}
