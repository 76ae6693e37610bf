//! Configuration resolution module
//!
//! This module handles:
//! - Reading the optional TOML settings file
//! - Merging it with CLI flags (flags win)
//! - Resolving the output destination
//!
//! The result is an immutable `RenderConfig` handed to the printer.

use crate::cli::{CliArgs, ColorChoice};
use crate::report::{GroupingMode, NoSeverityPlacement};
use log::debug;
use std::fs;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};

/// Default base URL for control documentation links
pub const DEFAULT_DOCS_URL: &str = "https://hub.armosec.io/docs/";

/// Report file name used when no output path is given
const DEFAULT_OUTPUT_FILE: &str = "report";

/// Extension of text reports
const OUTPUT_EXT: &str = "txt";

/// Which section the report leads with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ViewType {
    /// One narrative section per control
    #[default]
    Control,
    /// One section per failed resource (verbose only)
    Resource,
}

/// Where the rendered report goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    Stdout,
    File(PathBuf),
}

/// Settings accepted in the TOML file. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub docs_url: Option<String>,
    pub no_severity: Option<NoSeverityPlacement>,
    pub grouping: Option<GroupingMode>,
    pub view: Option<ViewType>,
    pub verbose: Option<bool>,
    pub colors: Option<bool>,
}

/// Fully resolved rendering settings
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    pub view: ViewType,
    pub verbose: bool,
    pub grouping: GroupingMode,
    pub no_severity: NoSeverityPlacement,
    pub docs_url: String,
    pub use_colors: bool,
    /// Width cap for tables; `None` = no cap
    pub max_table_width: Option<usize>,
    pub output: OutputTarget,
}

impl Default for RenderConfig {
    fn default() -> Self {
        RenderConfig {
            view: ViewType::Control,
            verbose: false,
            grouping: GroupingMode::Auto,
            no_severity: NoSeverityPlacement::BelowLow,
            docs_url: DEFAULT_DOCS_URL.to_string(),
            use_colors: false,
            max_table_width: None,
            output: OutputTarget::Stdout,
        }
    }
}

impl RenderConfig {
    /// Documentation link for a control id
    pub fn control_link(&self, control_id: &str) -> String {
        format!("{}{}", self.docs_url, control_id.to_lowercase())
    }
}

/// Parse the TOML settings file
pub fn load_file_config(path: &Path) -> Result<FileConfig, String> {
    let text = fs::read_to_string(path).map_err(|e| format!("Failed to read config {}: {}", path.display(), e))?;
    toml::from_str(&text).map_err(|e| format!("Failed to parse config {}: {}", path.display(), e))
}

/// Resolve the output destination.
///
/// `-` or the stdout device name select stdout; an empty path selects
/// `report.txt`; any other path gets `.txt` appended unless it already has it.
pub fn resolve_output(output: Option<&str>) -> OutputTarget {
    let raw = output.map(str::trim).unwrap_or("");
    if raw == "-" || raw == "/dev/stdout" {
        return OutputTarget::Stdout;
    }

    let name = if raw.is_empty() { DEFAULT_OUTPUT_FILE } else { raw };
    let mut path = PathBuf::from(name);
    if path.extension().and_then(|e| e.to_str()) != Some(OUTPUT_EXT) {
        let mut with_ext = path.into_os_string();
        with_ext.push(".");
        with_ext.push(OUTPUT_EXT);
        path = PathBuf::from(with_ext);
    }
    OutputTarget::File(path)
}

/// Build the render configuration from CLI arguments
pub fn build_render_config(args: &CliArgs) -> Result<RenderConfig, String> {
    let file = match args.config {
        Some(ref path) => {
            debug!("Loading settings from {:?}", path);
            load_file_config(path)?
        }
        None => FileConfig::default(),
    };
    build_render_config_with(args, &file)
}

/// Merge CLI arguments over file settings
pub fn build_render_config_with(args: &CliArgs, file: &FileConfig) -> Result<RenderConfig, String> {
    let output = match args.output {
        Some(ref o) => resolve_output(Some(o.as_str())),
        None => OutputTarget::Stdout,
    };
    debug!("Output target: {:?}", output);

    let docs_url = args.docs_url.clone().or_else(|| file.docs_url.clone()).unwrap_or_else(|| DEFAULT_DOCS_URL.to_string());
    if docs_url.trim().is_empty() {
        return Err("Documentation URL must not be empty".to_string());
    }

    let use_colors = match args.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => file.colors.unwrap_or(output == OutputTarget::Stdout && std::io::stdout().is_terminal()),
    };

    let max_table_width = match args.console_width {
        Some(width) => Some(width),
        None if output == OutputTarget::Stdout => crate::console_format::detect_terminal_width(),
        None => None,
    };

    let config = RenderConfig {
        view: args.view.or(file.view).unwrap_or_default(),
        verbose: args.verbose || file.verbose.unwrap_or(false),
        grouping: args.grouping.or(file.grouping).unwrap_or_default(),
        no_severity: args.no_severity.or(file.no_severity).unwrap_or_default(),
        docs_url,
        use_colors,
        max_table_width,
        output,
    };
    debug!("Resolved render config: {:?}", config);
    Ok(config)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;
