//! Grouping of a control's resources by namespace or kind.
//!
//! The narrative section lists, for every control, the failed, excluded and
//! (in verbose mode) passed resources under a group label. Resources without a
//! meaningful group key land under the empty label and are printed flat.

use crate::types::{ControlResult, HasRelatedObjects, Resource, Status};
use log::warn;
use std::collections::BTreeMap;

/// Kinds that are grouped by kind even in `Auto` mode
const GROUPED_KINDS: [&str; 2] = ["Group", "User"];

/// How group labels are chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum GroupingMode {
    /// Namespace for workloads, kind for RBAC subjects
    #[default]
    Auto,
    /// Always by namespace
    Namespace,
    /// Always by kind
    Kind,
}

/// Which status class to select
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFilter {
    Failed,
    Excluded,
    Passed,
}

impl StatusFilter {
    pub fn matches(&self, status: Status) -> bool {
        match self {
            StatusFilter::Failed => status.is_failed(),
            StatusFilter::Excluded => status == Status::Excluded,
            StatusFilter::Passed => status.is_passed(),
        }
    }

    /// Section header printed above the grouped resources
    pub fn header(&self) -> &'static str {
        match self {
            StatusFilter::Failed => "Failed:",
            StatusFilter::Excluded => "Excluded:",
            StatusFilter::Passed => "Passed:",
        }
    }
}

/// A resource paired with the status it got under one control
#[derive(Debug, Clone, Copy)]
pub struct WorkloadSummary<'a> {
    pub resource: &'a Resource,
    pub status: Status,
}

/// Resolve a control's outcomes against the resource map.
///
/// Outcomes pointing at unknown resources are skipped.
pub fn list_result_summary<'a>(
    control: &ControlResult,
    resources: &'a BTreeMap<String, Resource>,
) -> Vec<WorkloadSummary<'a>> {
    let mut summaries = Vec::with_capacity(control.outcomes.len());
    for outcome in &control.outcomes {
        match resources.get(&outcome.resource_id) {
            Some(resource) => summaries.push(WorkloadSummary { resource, status: outcome.status }),
            None => warn!("control {} references unknown resource {}", control.id, outcome.resource_id),
        }
    }
    summaries
}

/// Group label for one resource under the given mode
pub fn group_label(resource: &Resource, mode: GroupingMode) -> String {
    let by_kind = match mode {
        GroupingMode::Kind => true,
        GroupingMode::Namespace => false,
        GroupingMode::Auto => GROUPED_KINDS.contains(&resource.kind.as_str()),
    };

    if by_kind {
        format!("{}s", resource.kind)
    } else if resource.namespace.is_empty() {
        String::new()
    } else {
        format!("Namespace {}", resource.namespace)
    }
}

/// Partition the summaries that match `filter` by group label.
///
/// Returns an empty map when nothing matches.
pub fn group_by_namespace_or_kind<'a>(
    summaries: &[WorkloadSummary<'a>],
    filter: StatusFilter,
    mode: GroupingMode,
) -> BTreeMap<String, Vec<WorkloadSummary<'a>>> {
    let mut groups: BTreeMap<String, Vec<WorkloadSummary<'a>>> = BTreeMap::new();
    for summary in summaries.iter().filter(|s| filter.matches(s.status)) {
        groups.entry(group_label(summary.resource, mode)).or_default().push(*summary);
    }
    groups
}

/// Bracketed list of the objects related to a composite finding.
///
/// The namespace of the first related object comes first, then every related
/// object as `Kind - name`. Empty when there are no related objects.
pub fn related_objects_str<R: HasRelatedObjects + ?Sized>(resource: &R) -> String {
    let mut parts = Vec::new();
    for (i, related) in resource.related_objects().iter().enumerate() {
        if i == 0 && !related.namespace.is_empty() {
            parts.push(format!("Namespace - {}", related.namespace));
        }
        parts.push(format!("{} - {}", related.kind, related.name));
    }

    if parts.is_empty() { String::new() } else { format!(" [{}]", parts.join(", ")) }
}

/// Lines for one group, sorted lexicographically
pub fn resource_lines(indent: &str, group: &[WorkloadSummary<'_>]) -> Vec<String> {
    let mut lines: Vec<String> = group
        .iter()
        .map(|s| format!("{}{} - {}{}", indent, s.resource.kind, s.resource.name, related_objects_str(s.resource)))
        .collect();
    lines.sort();
    lines
}

#[cfg(test)]
#[path = "grouping_test.rs"]
mod grouping_test;
