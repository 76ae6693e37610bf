//! Resource-centric report section.
//!
//! Instead of one block per control, prints one block per failed resource
//! listing the controls it failed.

use super::ordering::display_order;
use super::types::severity_color;
use crate::config::RenderConfig;
use crate::console_format::{Align, Cell, Table, TableWriter};
use crate::types::{ControlResult, Resource, ResourceOutcome, ScanSnapshot, Status};
use std::collections::BTreeMap;
use std::io::{self, Write};

const RESOURCE_TABLE_HEADERS: [&str; 4] = ["SEVERITY", "CONTROL NAME", "DOCS", "ASSISTANCE REMEDIATION"];
const RESOURCE_TABLE_ALIGNMENTS: [Align; 4] = [Align::Left, Align::Left, Align::Left, Align::Left];

/// Controls that evaluated one resource, in display order
pub type ResourceControls<'a> = Vec<(&'a ControlResult, &'a ResourceOutcome)>;

/// Index every resource id to the controls that evaluated it.
///
/// Controls are visited highest severity first, so each list is already in
/// display order.
pub fn controls_by_resource<'a>(
    snapshot: &'a ScanSnapshot,
    sorted_control_ids: &[Vec<String>],
) -> BTreeMap<&'a str, ResourceControls<'a>> {
    let mut index: BTreeMap<&'a str, ResourceControls<'a>> = BTreeMap::new();
    for id in display_order(sorted_control_ids) {
        let Some(control) = snapshot.controls.get(id) else { continue };
        for outcome in &control.outcomes {
            index.entry(outcome.resource_id.as_str()).or_default().push((control, outcome));
        }
    }
    index
}

/// Counter line for one resource
pub fn control_counters_for_resource(controls: &ResourceControls<'_>) -> String {
    let failed = controls.iter().filter(|(_, o)| o.status == Status::Failed).count();
    let excluded = controls.iter().filter(|(_, o)| o.status == Status::Excluded).count();
    format!("Controls: {} (Failed: {}, Excluded: {})", controls.len(), failed, excluded)
}

/// Rows of the per-resource table: failed controls only
pub fn generate_resource_rows(controls: &ResourceControls<'_>, config: &RenderConfig) -> Vec<Vec<Cell>> {
    controls
        .iter()
        .filter(|(control, outcome)| !control.id.is_empty() && outcome.status == Status::Failed)
        .map(|(control, outcome)| {
            let severity = control.severity();
            vec![
                Cell::colored(severity.as_str(), Some(severity_color(severity))),
                Cell::plain(control.name.as_str()),
                Cell::plain(config.control_link(&control.id)),
                Cell::plain(outcome.paths.join(", ")),
            ]
        })
        .collect()
}

fn print_resource_header<W: Write>(out: &mut TableWriter<W>, resource: &Resource) -> io::Result<()> {
    out.write_line(&format!("ApiVersion: {}", resource.api_version), None)?;
    out.write_line(&format!("Kind: {}", resource.kind), None)?;
    out.write_line(&format!("Name: {}", resource.name), None)?;
    if !resource.namespace.is_empty() {
        out.write_line(&format!("Namespace: {}", resource.namespace), None)?;
    }
    Ok(())
}

/// Print one section per resource that failed at least one control
pub fn print_resource_table<W: Write>(
    out: &mut TableWriter<W>,
    snapshot: &ScanSnapshot,
    sorted_control_ids: &[Vec<String>],
    config: &RenderConfig,
) -> io::Result<()> {
    for (resource_id, controls) in controls_by_resource(snapshot, sorted_control_ids) {
        if !controls.iter().any(|(_, o)| o.status == Status::Failed) {
            continue;
        }
        let Some(resource) = snapshot.resources.get(resource_id) else { continue };

        out.writeln()?;
        out.write_separator('#')?;
        out.writeln()?;
        print_resource_header(out, resource)?;

        out.writeln()?;
        out.write_line(&control_counters_for_resource(&controls), None)?;
        out.writeln()?;

        let mut table = Table::new(&RESOURCE_TABLE_HEADERS, &RESOURCE_TABLE_ALIGNMENTS);
        table.max_width = config.max_table_width;
        table.flex_column = 3;
        for row in generate_resource_rows(&controls, config) {
            table.push_row(row);
        }
        out.write_table(&table)?;
    }
    Ok(())
}
