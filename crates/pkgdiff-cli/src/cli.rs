use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "pkgdiff",
    about = "pkgdiff — compare two builds of a library, type by type",
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

#[derive(Clone, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Compare a package snapshot against an older one
    Compare(CompareArgs),
    /// Show the effective diff configuration
    Config(ConfigArgs),
}

#[derive(Args)]
pub struct CompareArgs {
    /// Snapshot of the requested (newer) version
    pub package: PathBuf,
    /// Snapshot of the version to compare against
    pub other: PathBuf,
    /// Target framework moniker; the first target when omitted
    #[arg(short, long, default_value = "")]
    pub target: String,
    #[command(flatten)]
    pub diff: DiffOptions,
}

#[derive(Args)]
pub struct ConfigArgs {
    #[command(flatten)]
    pub diff: DiffOptions,
}

#[derive(Args, Clone, Debug, Default)]
pub struct DiffOptions {
    /// TOML file with diff settings
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Context lines around each change
    #[arg(short = 'U', long)]
    pub context: Option<usize>,
    /// Leave assemblies missing from the requested version out of the report
    #[arg(long)]
    pub skip_removed: bool,
    /// Treat whitespace-only line changes as changes
    #[arg(long)]
    pub strict_whitespace: bool,
}
