//! Report type definitions for the rendering model.
//!
//! Aggregation produces typed rows; turning them into text happens in a
//! separate step so the counting logic stays free of formatting.

use crate::console_format::Align;
use crate::types::{Severity, Status};
use term::color::Color;

/// How a control status is shown in a title line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusDisplay {
    /// Verb printed after the control name ("failed", "passed", ...)
    pub verb: &'static str,
    /// Face glyph printed after the verb
    pub glyph: &'static str,
    pub color: Color,
}

impl StatusDisplay {
    pub fn for_status(status: Status) -> Self {
        let (glyph, color) = match status {
            Status::Skipped => ("😕", term::color::BRIGHT_CYAN),
            Status::Failed => ("😥", term::color::BRIGHT_RED),
            Status::Excluded => ("😐", term::color::BRIGHT_YELLOW),
            Status::Irrelevant => ("😕", term::color::BRIGHT_GREEN),
            Status::Error => ("😕", term::color::BRIGHT_YELLOW),
            Status::Passed => ("👍", term::color::BRIGHT_GREEN),
        };
        StatusDisplay { verb: status.as_str(), glyph, color }
    }
}

/// Color used for a severity label
pub fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Critical => term::color::RED,
        Severity::High => term::color::BRIGHT_RED,
        Severity::Medium => term::color::BRIGHT_YELLOW,
        Severity::Low => term::color::BRIGHT_WHITE,
        Severity::None => term::color::WHITE,
    }
}

/// Content of the risk-score column.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum RiskScore {
    /// Score in percent, shown with two decimals
    Percent(f32),
    /// Control was skipped; carries the star marker of its reason (may be empty)
    Skipped(String),
}

impl RiskScore {
    pub fn format(&self) -> String {
        match self {
            RiskScore::Percent(score) => format!("{:.2}%", score),
            RiskScore::Skipped(stars) => format!("skipped{}", stars),
        }
    }
}

/// Severity column content; the footer leaves it blank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum SeverityCell {
    Tier(Severity),
    Blank,
}

impl SeverityCell {
    pub fn format(&self) -> &'static str {
        match self {
            SeverityCell::Tier(severity) => severity.as_str(),
            SeverityCell::Blank => " ",
        }
    }
}

/// One row of the summary table, before formatting.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ReportRow {
    pub name: String,
    pub severity: SeverityCell,
    pub failed: usize,
    pub excluded: usize,
    pub all: usize,
    pub risk: RiskScore,
}

/// Number of columns in the summary table
pub const ROW_LEN: usize = 6;

/// Column headers in display order
pub const CONTROL_TABLE_HEADERS: [&str; ROW_LEN] =
    ["CONTROL NAME", "SEVERITY", "FAILED RESOURCES", "EXCLUDED RESOURCES", "ALL RESOURCES", "% RISK-SCORE"];

/// Alignment of each summary column in display order
pub const CONTROL_TABLE_ALIGNMENTS: [Align; ROW_LEN] =
    [Align::Left, Align::Left, Align::Center, Align::Center, Align::Center, Align::Center];

impl ReportRow {
    /// Cells in display order: Name, Severity, Failed, Excluded, Total, Risk
    pub fn cells(&self) -> [String; ROW_LEN] {
        [
            self.name.clone(),
            self.severity.format().to_string(),
            self.failed.to_string(),
            self.excluded.to_string(),
            self.all.to_string(),
            self.risk.format(),
        ]
    }

    /// Color for the severity cell, if any
    pub fn severity_color(&self) -> Option<Color> {
        match self.severity {
            SeverityCell::Tier(severity) => Some(severity_color(severity)),
            SeverityCell::Blank => None,
        }
    }
}

/// Star marker assigned to a distinct skip reason
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct InfoStars {
    pub stars: String,
    pub info: String,
}
