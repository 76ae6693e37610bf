//! Failed-resource counts per severity tier.

use crate::types::{ScanSnapshot, Severity, Status};
use std::collections::BTreeMap;

/// Number of failed resources at each severity tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct SeverityCounters {
    pub critical: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

impl SeverityCounters {
    /// Count failed resources by the severity of the controls they failed.
    ///
    /// A resource failing several controls is counted once, under the highest
    /// severity among them. Controls without a severity do not count.
    pub fn from_snapshot(snapshot: &ScanSnapshot) -> Self {
        let mut highest: BTreeMap<&str, Severity> = BTreeMap::new();

        for control in snapshot.controls.values() {
            let severity = control.severity();
            if severity == Severity::None {
                continue;
            }
            for outcome in control.outcomes.iter().filter(|o| o.status == Status::Failed) {
                let entry = highest.entry(outcome.resource_id.as_str()).or_insert(severity);
                *entry = (*entry).max(severity);
            }
        }

        let mut counters = SeverityCounters::default();
        for severity in highest.values() {
            match severity {
                Severity::Critical => counters.critical += 1,
                Severity::High => counters.high += 1,
                Severity::Medium => counters.medium += 1,
                Severity::Low => counters.low += 1,
                Severity::None => {}
            }
        }
        counters
    }

    pub fn total(&self) -> usize {
        self.critical + self.high + self.medium + self.low
    }
}

/// Render the top-of-report severity line
pub fn render_severity_counters_summary(counters: &SeverityCounters) -> String {
    format!(
        "Failed Resources by Severity: Critical — {}, High — {}, Medium — {}, Low — {}",
        counters.critical, counters.high, counters.medium, counters.low
    )
}
