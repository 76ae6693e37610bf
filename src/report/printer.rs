//! Pretty report renderer.
//!
//! One pass over a finished snapshot: narrative per-control section (or the
//! per-resource section), then the summary block with the table. The sink is
//! passed in explicitly; the printer keeps no state between renders.

use super::grouping::{self, StatusFilter, WorkloadSummary};
use super::ordering::{display_order, sorted_control_ids};
use super::resource_view;
use super::severity::{SeverityCounters, render_severity_counters_summary};
use super::table::{
    control_counters_for_summary, frameworks_scores_to_string, generate_footer, generate_row, map_info_to_print_info,
};
use super::types::{CONTROL_TABLE_ALIGNMENTS, CONTROL_TABLE_HEADERS, InfoStars, ReportRow, StatusDisplay};
use crate::config::{RenderConfig, ViewType};
use crate::console_format::{Cell, Table, TableWriter};
use crate::types::{ControlResult, Resource, ScanSnapshot, SummaryDetails};
use log::debug;
use std::collections::BTreeMap;
use std::io::{self, Write};
use term::color::Color;

/// Line printed instead of the report when nothing was evaluated
pub const NO_CONTROLS_MESSAGE: &str =
    "Did not scan any of the resources, make sure you are scanning valid manifests (Deployments, Pods, etc.)";

const INFO: Option<Color> = Some(term::color::BRIGHT_CYAN);
const SUCCESS: Option<Color> = Some(term::color::BRIGHT_GREEN);
const WARNING: Option<Color> = Some(term::color::BRIGHT_YELLOW);
const FAILURE: Option<Color> = Some(term::color::BRIGHT_RED);

/// Renders a snapshot as a human-readable text report.
pub struct PrettyPrinter<'a> {
    config: &'a RenderConfig,
}

impl<'a> PrettyPrinter<'a> {
    pub fn new(config: &'a RenderConfig) -> Self {
        Self { config }
    }

    /// Render the whole report into `out`
    pub fn action_print<W: Write>(&self, out: &mut TableWriter<W>, snapshot: &ScanSnapshot) -> io::Result<()> {
        if snapshot.controls.is_empty() {
            debug!("No controls in snapshot, printing advisory only");
            return out.write_line(NO_CONTROLS_MESSAGE, None);
        }

        out.writeln()?;
        out.write_separator('^')?;

        let sorted_control_ids = sorted_control_ids(&snapshot.controls, self.config.no_severity);

        match self.config.view {
            ViewType::Control => self.print_results(out, snapshot, &sorted_control_ids)?,
            ViewType::Resource => {
                if self.config.verbose {
                    resource_view::print_resource_table(out, snapshot, &sorted_control_ids, self.config)?;
                }
            }
        }

        let summary = SummaryDetails::from_snapshot(snapshot);
        self.print_summary_table(out, snapshot, &summary, &sorted_control_ids)
    }

    fn print_results<W: Write>(
        &self,
        out: &mut TableWriter<W>,
        snapshot: &ScanSnapshot,
        sorted_control_ids: &[Vec<String>],
    ) -> io::Result<()> {
        for id in display_order(sorted_control_ids) {
            let Some(control) = snapshot.controls.get(id) else { continue };
            self.print_title(out, control)?;
            self.print_resources(out, control, &snapshot.resources)?;
            self.print_summary(out, control)?;
        }
        Ok(())
    }

    fn print_title<W: Write>(&self, out: &mut TableWriter<W>, control: &ControlResult) -> io::Result<()> {
        let title = format!("[control: {} - {}] ", control.name, self.config.control_link(&control.id));
        out.write_colored(&title, term::color::BRIGHT_CYAN)?;

        let display = StatusDisplay::for_status(control.status);
        out.write_line(&format!("{} {}", display.verb, display.glyph), Some(display.color))?;

        out.write_line(&format!("Description: {}", control.description), None)?;
        if !control.info.is_empty() {
            out.write_line(&format!("Reason: {}", control.info), WARNING)?;
        }
        Ok(())
    }

    fn print_resources<W: Write>(
        &self,
        out: &mut TableWriter<W>,
        control: &ControlResult,
        resources: &BTreeMap<String, Resource>,
    ) -> io::Result<()> {
        let summaries = grouping::list_result_summary(control, resources);
        let mode = self.config.grouping;

        let mut sections = vec![(StatusFilter::Failed, FAILURE), (StatusFilter::Excluded, WARNING)];
        if self.config.verbose {
            sections.push((StatusFilter::Passed, SUCCESS));
        }

        for (filter, color) in sections {
            let groups = grouping::group_by_namespace_or_kind(&summaries, filter, mode);
            if groups.is_empty() {
                continue;
            }
            out.write_line(filter.header(), color)?;
            print_grouped_resources(out, &groups)?;
        }
        Ok(())
    }

    fn print_summary<W: Write>(&self, out: &mut TableWriter<W>, control: &ControlResult) -> io::Result<()> {
        if control.status.is_skipped() {
            return Ok(());
        }

        let counters = control.resource_counters();
        out.write_plain("Summary - ")?;
        out.write_colored(&format!("Passed:{}   ", counters.passed), term::color::BRIGHT_GREEN)?;
        out.write_colored(&format!("Excluded:{}   ", counters.excluded), term::color::BRIGHT_YELLOW)?;
        out.write_colored(&format!("Failed:{}   ", counters.failed), term::color::BRIGHT_RED)?;
        out.write_line(&format!("Total:{}", counters.all), INFO)?;

        if control.status.is_failed() && !control.remediation.is_empty() {
            out.write_line(&format!("Remediation: {}", control.remediation), None)?;
        }
        out.writeln()
    }

    fn print_summary_table<W: Write>(
        &self,
        out: &mut TableWriter<W>,
        snapshot: &ScanSnapshot,
        summary: &SummaryDetails,
        sorted_control_ids: &[Vec<String>],
    ) -> io::Result<()> {
        out.writeln()?;
        out.write_line(&control_counters_for_summary(&summary.controls), INFO)?;
        let severity_counters = SeverityCounters::from_snapshot(snapshot);
        debug!("{} failed resources counted by severity", severity_counters.total());
        out.write_line(&render_severity_counters_summary(&severity_counters), INFO)?;
        out.writeln()?;

        let print_all = should_print_all(self.config.verbose, summary);
        let infos = map_info_to_print_info(snapshot);
        let rows = summary_rows(snapshot, sorted_control_ids, &infos, print_all);
        let footer = generate_footer(&rows, summary);

        let mut table = Table::new(&CONTROL_TABLE_HEADERS, &CONTROL_TABLE_ALIGNMENTS);
        table.max_width = self.config.max_table_width;
        for row in &rows {
            table.push_row(row_cells(row));
        }
        table.set_footer(row_cells(&footer));
        out.write_table(&table)?;

        let frameworks = frameworks_scores_to_string(&summary.frameworks);
        if !frameworks.is_empty() {
            out.write_colored(&frameworks, term::color::BRIGHT_CYAN)?;
        }

        print_info(out, &infos)
    }
}

/// Full detail when verbose or when no resource failed
pub fn should_print_all(verbose: bool, summary: &SummaryDetails) -> bool {
    verbose || summary.resources.failed == 0
}

/// Table rows for every listed control, highest severity first
pub fn summary_rows(
    snapshot: &ScanSnapshot,
    sorted_control_ids: &[Vec<String>],
    infos: &[InfoStars],
    print_all: bool,
) -> Vec<ReportRow> {
    display_order(sorted_control_ids)
        .filter_map(|id| snapshot.controls.get(id))
        .filter_map(|control| generate_row(control, infos, print_all))
        .collect()
}

fn row_cells(row: &ReportRow) -> Vec<Cell> {
    let color = row.severity_color();
    row.cells()
        .into_iter()
        .enumerate()
        .map(|(i, text)| if i == 1 { Cell::colored(text, color) } else { Cell::plain(text) })
        .collect()
}

fn print_grouped_resources<W: Write>(
    out: &mut TableWriter<W>,
    groups: &BTreeMap<String, Vec<WorkloadSummary<'_>>>,
) -> io::Result<()> {
    for (title, group) in groups {
        let mut indent = String::from("  ");
        if !title.is_empty() {
            out.write_line(&format!("{}{}", indent, title), None)?;
            indent = indent.repeat(2);
        }
        for line in grouping::resource_lines(&indent, group) {
            out.write_line(&line, None)?;
        }
    }
    Ok(())
}

fn print_info<W: Write>(out: &mut TableWriter<W>, infos: &[InfoStars]) -> io::Result<()> {
    if infos.is_empty() {
        return Ok(());
    }
    out.writeln()?;
    for info in infos {
        out.write_line(&format!("{} {}", info.stars, info.info), INFO)?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "printer_test.rs"]
mod printer_test;
