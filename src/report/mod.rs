//! Report generation module - Aggregation and rendering of scan results.
//!
//! This module handles:
//! - Ordering controls by severity
//! - Counting failed resources per severity tier
//! - Grouping resources under each control
//! - Building the summary table rows and footer
//! - Rendering the full text report and the JSON export
//!
//! Console drawing (borders, colors, padding) is handled by the
//! console_format module.
//!
//! # Module Organization
//!
//! - `ordering` - Severity buckets and display order
//! - `severity` - Failed-resource counters per severity
//! - `grouping` - Namespace/kind grouping of resources
//! - `types` - Typed rows and status display
//! - `table` - Row, footer and summary-line builders
//! - `printer` - The pretty renderer
//! - `resource_view` - Per-resource sections
//! - `export` - JSON export

mod export;
mod grouping;
mod ordering;
mod printer;
mod resource_view;
mod severity;
mod table;
mod types;

// Re-export ordering
pub use ordering::NoSeverityPlacement;

// Re-export grouping
pub use grouping::GroupingMode;

// Re-export the renderer
pub use printer::PrettyPrinter;

// Re-export export functions
pub use export::export_json_report;
