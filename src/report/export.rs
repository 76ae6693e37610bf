//! JSON export of the summary section.
//!
//! Writes the same numbers the text report prints around its table, for
//! storage and machine consumption.

use super::ordering::sorted_control_ids;
use super::printer::{should_print_all, summary_rows};
use super::severity::SeverityCounters;
use super::table::{generate_footer, map_info_to_print_info};
use crate::config::RenderConfig;
use crate::types::{ScanSnapshot, SummaryDetails};
use log::debug;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Build the JSON document for a snapshot.
///
/// Rows follow the table rules: same order, same suppression, same footer.
pub fn summary_json(snapshot: &ScanSnapshot, config: &RenderConfig) -> serde_json::Value {
    use serde_json::json;

    let summary = SummaryDetails::from_snapshot(snapshot);
    let sorted = sorted_control_ids(&snapshot.controls, config.no_severity);
    let infos = map_info_to_print_info(snapshot);
    let rows = summary_rows(snapshot, &sorted, &infos, should_print_all(config.verbose, &summary));
    let footer = generate_footer(&rows, &summary);

    json!({
        "score": summary.score,
        "controls": summary.controls,
        "resources": summary.resources,
        "severity_counters": SeverityCounters::from_snapshot(snapshot),
        "rows": rows,
        "footer": footer,
        "frameworks": summary.frameworks,
        "skip_reasons": infos,
    })
}

/// Export the summary as pretty-printed JSON
pub fn export_json_report(output_path: &Path, snapshot: &ScanSnapshot, config: &RenderConfig) -> std::io::Result<()> {
    debug!("Exporting JSON summary to {:?}", output_path);
    let report = summary_json(snapshot, config);

    let mut file = BufWriter::new(File::create(output_path)?);
    serde_json::to_writer_pretty(&mut file, &report)?;
    writeln!(file)?;
    file.flush()
}
