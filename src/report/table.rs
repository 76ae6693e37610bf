//! Summary table rows.
//!
//! Builds one typed row per control plus the footer row, and the short
//! counter/framework lines printed around the table.

use super::types::{InfoStars, ReportRow, RiskScore, SeverityCell};
use crate::types::{ControlCounters, ControlResult, FrameworkSummary, ScanSnapshot, Status, SummaryDetails};
use std::collections::HashSet;

/// Control names longer than this are cut in the table
const MAX_NAME_LEN: usize = 50;

/// Label of the footer row
pub const FOOTER_LABEL: &str = "Resource Summary";

/// Assign a star marker to every distinct reason of a skipped control.
///
/// Markers grow by one star per reason, in control id order.
pub fn map_info_to_print_info(snapshot: &ScanSnapshot) -> Vec<InfoStars> {
    let mut infos = Vec::new();
    let mut seen: HashSet<&str> = HashSet::new();
    let mut stars = String::from("*");

    for control in snapshot.controls.values() {
        if control.status.is_skipped() && !control.info.is_empty() && seen.insert(control.info.as_str()) {
            infos.push(InfoStars { stars: stars.clone(), info: control.info.clone() });
            stars.push('*');
        }
    }
    infos
}

fn info_stars_for<'a>(control: &ControlResult, infos: &'a [InfoStars]) -> &'a str {
    infos.iter().find(|i| i.info == control.info).map(|i| i.stars.as_str()).unwrap_or("")
}

fn truncate_name(name: &str) -> String {
    match name.char_indices().nth(MAX_NAME_LEN) {
        Some((cut, _)) => format!("{}...", &name[..cut]),
        None => name.to_string(),
    }
}

/// Build the table row for one control.
///
/// Returns `None` when the control is left out of the table: without
/// `print_all`, passed, skipped and irrelevant controls are not listed.
pub fn generate_row(control: &ControlResult, infos: &[InfoStars], print_all: bool) -> Option<ReportRow> {
    if !print_all && (control.status == Status::Passed || control.status.is_skipped()) {
        return None;
    }

    let counters = control.resource_counters();
    let risk = if control.status.is_skipped() {
        RiskScore::Skipped(info_stars_for(control, infos).to_string())
    } else {
        RiskScore::Percent(control.score)
    };

    Some(ReportRow {
        name: truncate_name(&control.name),
        severity: SeverityCell::Tier(control.severity()),
        failed: counters.failed,
        excluded: counters.excluded,
        all: counters.all,
        risk,
    })
}

/// Build the footer row summarizing every listed row.
///
/// Counts are the column sums of `rows`; the risk score is the overall score.
pub fn generate_footer(rows: &[ReportRow], summary: &SummaryDetails) -> ReportRow {
    ReportRow {
        name: FOOTER_LABEL.to_string(),
        severity: SeverityCell::Blank,
        failed: rows.iter().map(|r| r.failed).sum(),
        excluded: rows.iter().map(|r| r.excluded).sum(),
        all: rows.iter().map(|r| r.all).sum(),
        risk: RiskScore::Percent(summary.score),
    }
}

/// Counter line printed above the table
pub fn control_counters_for_summary(counters: &ControlCounters) -> String {
    format!(
        "Controls: {} (Failed: {}, Excluded: {}, Skipped: {})",
        counters.all, counters.failed, counters.excluded, counters.skipped
    )
}

/// Framework line printed below the table.
///
/// Empty when no framework was scanned or the single framework has no name.
pub fn frameworks_scores_to_string(frameworks: &[FrameworkSummary]) -> String {
    match frameworks {
        [] => String::new(),
        [single] if single.name.is_empty() => String::new(),
        [single] => format!("FRAMEWORK {}\n", single.name),
        many => {
            let parts: Vec<String> = many.iter().map(|f| format!("{} (risk: {:.2})", f.name, f.score)).collect();
            format!("FRAMEWORKS: {}\n", parts.join(", "))
        }
    }
}

#[cfg(test)]
#[path = "table_test.rs"]
mod table_test;
