use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Write a directory tree and bundle selected text files into one file"
)]
pub struct Cli {
    /// Root directory to scan
    #[arg(long, default_value = ".")]
    pub root: PathBuf,

    /// Comma-separated folder names to exclude at any depth
    #[arg(long, default_value = "")]
    pub exclude: String,

    /// Comma-separated glob patterns to ignore (files and dirs), e.g. "*.min.js,*.map,build*"
    #[arg(long, default_value = "")]
    pub ignore: String,

    /// Comma-separated file extensions to include in the bundle [default: .txt,.sh,.py,.sql]
    #[arg(long)]
    pub exts: Option<String>,

    /// Comma-separated exact filenames to always bundle (e.g. "Dockerfile,README")
    #[arg(long, default_value = "")]
    pub include_names: String,

    /// Output file for the tree listing
    #[arg(long = "out", default_value = "tree.txt")]
    pub tree_out: PathBuf,

    /// Output file for the concatenated contents
    #[arg(long = "bundle", default_value = "all_texts.txt")]
    pub bundle_out: PathBuf,

    /// Use a named preset from presets.toml
    #[arg(long)]
    pub preset: Option<String>,
}
