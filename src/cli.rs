use crate::config::ViewType;
use crate::report::{GroupingMode, NoSeverityPlacement};
use clap::Parser;
use std::path::PathBuf;

/// When to decorate output with ANSI colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ColorChoice {
    /// Color when writing to a terminal
    #[default]
    Auto,
    Always,
    Never,
}

#[derive(Parser, Debug, Clone)]
#[command(name = "scan-pretty")]
#[command(about = "Render security/compliance scan results as a human-readable report")]
#[command(version)]
pub struct CliArgs {
    /// Scan results (JSON snapshot); use "-" to read from stdin
    #[arg(value_name = "RESULTS")]
    pub input: PathBuf,

    /// Write the report to a file instead of stdout
    /// An empty value writes "report.txt"; ".txt" is appended when missing; "-" means stdout
    #[arg(long, short = 'o', value_name = "PATH")]
    pub output: Option<String>,

    /// Also list passed resources and controls
    #[arg(long, short = 'v')]
    pub verbose: bool,

    /// Report layout
    #[arg(long, value_enum)]
    pub view: Option<ViewType>,

    /// How resources are grouped under each control
    #[arg(long, value_enum)]
    pub grouping: Option<GroupingMode>,

    /// Where controls without a severity are placed
    #[arg(long, value_enum)]
    pub no_severity: Option<NoSeverityPlacement>,

    /// Base URL for control documentation links
    #[arg(long, value_name = "URL")]
    pub docs_url: Option<String>,

    /// Settings file (TOML); command-line flags take precedence
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Color output
    #[arg(long, value_enum, default_value = "auto")]
    pub color: ColorChoice,

    /// Override console width used to fit tables (default: auto-detect)
    #[arg(long, value_name = "COLUMNS")]
    pub console_width: Option<usize>,

    /// Also export the summary table as JSON
    #[arg(long, value_name = "PATH")]
    pub json: Option<PathBuf>,
}

impl CliArgs {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        CliArgs::parse()
    }

    /// Validate argument combinations
    pub fn validate(&self) -> Result<(), String> {
        if self.input.as_os_str() != "-" && !self.input.exists() {
            return Err(format!("Scan results not found: {}", self.input.display()));
        }

        if self.console_width == Some(0) {
            return Err("--console-width must be greater than zero".to_string());
        }

        if self.view == Some(ViewType::Resource) && !self.verbose {
            log::warn!("--view resource only prints per-resource sections together with --verbose");
        }

        Ok(())
    }

    /// Read the snapshot from stdin?
    pub fn reads_stdin(&self) -> bool {
        self.input.as_os_str() == "-"
    }
}
