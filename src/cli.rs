use crate::models::{Config, same_marker};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "debtgate")]
#[command(version, about = "Fail the build on FIXME comments", long_about = None)]
pub struct Cli {
    /// Defaults to `scan` with configuration defaults
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scan a directory for TODO and FIXME comments
    Scan(ScanArgs),
    /// Write a default configuration file
    Init(InitArgs),
}

#[derive(Args, Debug, Default)]
pub struct ScanArgs {
    /// Directory to scan (defaults to the configured root)
    pub path: Option<PathBuf>,

    /// File-name suffix to include, e.g. ".go" (repeatable)
    #[arg(short, long = "ext")]
    pub extensions: Vec<String>,

    /// Marker keyword to detect (repeatable)
    #[arg(short, long = "marker")]
    pub markers: Vec<String>,

    /// Marker that fails the gate when found (repeatable)
    #[arg(long)]
    pub fail_on: Vec<String>,

    /// Match markers with exact case
    #[arg(long)]
    pub case_sensitive: bool,

    /// Also inspect comments that follow code on the same line
    #[arg(long)]
    pub trailing_comments: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "terminal")]
    pub format: OutputFormat,

    /// Output file (if not specified, writes to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Path to custom config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl ScanArgs {
    /// Override configuration values with the ones given on the command line
    pub fn apply_to(&self, config: &mut Config) {
        if let Some(ref path) = self.path {
            config.root = path.clone();
        }
        if !self.extensions.is_empty() {
            config.extensions = self.extensions.clone();
        }
        if self.case_sensitive {
            config.case_sensitive = true;
        }
        if self.trailing_comments {
            config.trailing_comments = true;
        }
        if !self.markers.is_empty() {
            config.markers = self.markers.clone();
        }
        if !self.fail_on.is_empty() {
            config.fail_on = self.fail_on.clone();
        } else if !self.markers.is_empty() {
            // keep only fail-set entries that still name a marker
            let markers = config.markers.clone();
            let case_sensitive = config.case_sensitive;
            config
                .fail_on
                .retain(|f| markers.iter().any(|m| same_marker(m, f, case_sensitive)));
        }
        config.resolve_fail_on();
    }
}

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Where to write the config file
    #[arg(default_value = crate::config::CONFIG_FILE_NAME)]
    pub path: PathBuf,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Colored console output
    #[default]
    Terminal,
    /// Markdown format
    Markdown,
    /// JSON format
    Json,
}
