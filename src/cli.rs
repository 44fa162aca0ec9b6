use std::path::PathBuf;

use clap::{ArgAction, Parser};

#[derive(Parser, Debug)]
#[command(
    name = "license-verdict",
    about = "Turn ScanCode output for bundled third-party code into per-library license verdicts",
    version
)]
pub struct Cli {
    /// ScanCode JSON report, or a license tree with --from-tree
    #[arg(default_value = "scan_result.json")]
    pub input: PathBuf,

    /// Treat INPUT as a license tree previously written with --tree-out
    #[arg(long)]
    pub from_tree: bool,

    /// Write the per-library license tree as JSON
    #[arg(long, value_name = "FILE")]
    pub tree_out: Option<PathBuf>,

    /// Config file [default: <input dir>/.license-verdict/config.toml, fallback ~/.config/license-verdict/config.toml]
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Report format
    #[arg(long, default_value = "terminal", value_name = "FORMAT")]
    pub report: ReportFormat,

    /// Mermaid output path; use without value to default to output/license_list.mmd
    #[arg(long, value_name = "FILE", num_args = 0..=1, default_missing_value = "output/license_list.mmd")]
    pub mermaid: Option<PathBuf>,

    /// Also write the license relation graph; defaults to output/license_relation.mmd
    #[arg(long, value_name = "FILE", num_args = 0..=1, default_missing_value = "output/license_relation.mmd")]
    pub relations: Option<PathBuf>,

    /// Exit with code 1 if any library is unknown or has inconsistent files
    #[arg(long)]
    pub strict: bool,

    /// Show per-file groups; repeat for debug logging
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Only print summary line
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Debug, Clone, PartialEq, clap::ValueEnum)]
pub enum ReportFormat {
    Terminal,
    Json,
    Mermaid,
}
