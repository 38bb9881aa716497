use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Command-line interface configuration
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file, overriding the discovered `.retrace/config.toml`
    #[arg(long, global = true, env = "RETRACE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log file or directory
    #[arg(long, global = true, env = "RETRACE_LOG_FILE")]
    pub log_file: Option<PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Feed a JSON-lines editor event script through the tracker
    Replay(ReplayArgs),

    /// Print the symbol outline of a file
    Outline(OutlineArgs),
}

#[derive(Args, Debug)]
pub struct ReplayArgs {
    /// Event script, one JSON object per line
    pub script: PathBuf,

    /// Directory script paths are resolved against (defaults to the script's directory)
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Extra goto-last-edit commands to run after the script
    #[arg(long, default_value_t = 0)]
    pub goto: usize,
}

#[derive(Args, Debug)]
pub struct OutlineArgs {
    /// File to outline
    pub file: PathBuf,

    /// Workspace root holding the rules file (defaults to the discovered project root)
    #[arg(long)]
    pub root: Option<PathBuf>,
}
