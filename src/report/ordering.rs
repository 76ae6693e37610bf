//! Severity-bucketed ordering of controls.
//!
//! Both the narrative section and the summary table walk controls in the same
//! order: highest severity first, then by control id.

use crate::types::{ControlResult, Severity};
use std::collections::BTreeMap;

/// Where controls without a severity end up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum NoSeverityPlacement {
    /// Own bucket below Low, rendered last
    #[default]
    BelowLow,
    /// Left out of the ordering entirely
    Excluded,
}

/// Sort control ids into severity buckets.
///
/// Buckets are stored lowest severity first (index = `Severity::index()`), so
/// iterating in reverse yields the highest severity first. Within a bucket ids
/// keep the map's order. With `NoSeverityPlacement::Excluded` the bucket for
/// `Severity::None` is always empty.
pub fn sorted_control_ids(
    controls: &BTreeMap<String, ControlResult>,
    placement: NoSeverityPlacement,
) -> Vec<Vec<String>> {
    let mut buckets: Vec<Vec<String>> = vec![Vec::new(); Severity::ALL.len()];

    for (id, control) in controls {
        let severity = control.severity();
        if severity == Severity::None && placement == NoSeverityPlacement::Excluded {
            continue;
        }
        buckets[severity.index()].push(id.clone());
    }

    buckets
}

/// Flatten buckets into display order (highest severity first)
pub fn display_order(buckets: &[Vec<String>]) -> impl Iterator<Item = &String> {
    buckets.iter().rev().flatten()
}
