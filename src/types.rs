//! Core data structures for scan results
//!
//! This module defines the snapshot handed over by the evaluation engine:
//! controls, the resources they were evaluated against, and the derived
//! counters the report is built from. Everything here is read-only once loaded.

use std::collections::BTreeMap;

/// Scan status of a control, or of a resource under one control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Passed,
    Failed,
    Skipped,
    Excluded,
    Irrelevant,
    Error,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Passed => "passed",
            Status::Failed => "failed",
            Status::Skipped => "skipped",
            Status::Excluded => "excluded",
            Status::Irrelevant => "irrelevant",
            Status::Error => "error",
        }
    }

    /// Skipped and irrelevant controls were not really evaluated
    pub fn is_skipped(&self) -> bool {
        matches!(self, Status::Skipped | Status::Irrelevant)
    }

    pub fn is_failed(&self) -> bool {
        *self == Status::Failed
    }

    pub fn is_passed(&self) -> bool {
        *self == Status::Passed
    }
}

/// Severity tier of a control, ordered from lowest to highest
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
pub enum Severity {
    None,
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    /// All tiers in ascending order
    pub const ALL: [Severity; 5] = [Severity::None, Severity::Low, Severity::Medium, Severity::High, Severity::Critical];

    /// Map a control's score factor onto a tier
    pub fn from_score_factor(score_factor: f32) -> Self {
        if score_factor >= 9.0 {
            Severity::Critical
        } else if score_factor >= 7.0 {
            Severity::High
        } else if score_factor >= 4.0 {
            Severity::Medium
        } else if score_factor >= 1.0 {
            Severity::Low
        } else {
            Severity::None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::None => "Unknown",
            Severity::Low => "Low",
            Severity::Medium => "Medium",
            Severity::High => "High",
            Severity::Critical => "Critical",
        }
    }

    /// Position in ascending order (None = 0, Critical = 4)
    pub fn index(&self) -> usize {
        *self as usize
    }
}

/// How the scanner represented an evaluated object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectType {
    /// A single manifest (Deployment, Pod, ...)
    #[default]
    Workload,
    /// A finding spanning several objects (e.g. a RoleBinding with its subjects)
    Composite,
}

/// Another object implicated by the same finding
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RelatedObject {
    pub kind: String,
    pub name: String,
    #[serde(default)]
    pub namespace: String,
}

/// Capability for objects that carry related objects of their own.
///
/// Grouping only asks for the related objects; it never looks at the
/// concrete shape of a resource.
pub trait HasRelatedObjects {
    fn related_objects(&self) -> &[RelatedObject];
}

/// A scanned unit (workload manifest, RBAC subject, ...)
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Resource {
    #[serde(default)]
    pub api_version: String,
    pub kind: String,
    pub name: String,
    #[serde(default)]
    pub namespace: String,
    #[serde(default)]
    pub object_type: ObjectType,
    #[serde(default)]
    pub related_objects: Vec<RelatedObject>,
}

impl HasRelatedObjects for Resource {
    fn related_objects(&self) -> &[RelatedObject] {
        match self.object_type {
            ObjectType::Composite => &self.related_objects,
            ObjectType::Workload => &[],
        }
    }
}

/// Status one resource received under one control
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ResourceOutcome {
    pub resource_id: String,
    pub status: Status,
    /// Paths in the object that caused the failure
    #[serde(default)]
    pub paths: Vec<String>,
}

/// One evaluated control
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ControlResult {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub remediation: String,
    pub status: Status,
    /// Explanation attached to the status (why it was skipped, ...)
    #[serde(default)]
    pub info: String,
    #[serde(default)]
    pub score_factor: f32,
    /// Risk score in percent
    #[serde(default)]
    pub score: f32,
    #[serde(default)]
    pub outcomes: Vec<ResourceOutcome>,
}

impl ControlResult {
    pub fn severity(&self) -> Severity {
        Severity::from_score_factor(self.score_factor)
    }

    /// Count this control's resources per status
    pub fn resource_counters(&self) -> ResourceCounters {
        let mut counters = ResourceCounters::default();
        for outcome in &self.outcomes {
            match outcome.status {
                Status::Passed => counters.passed += 1,
                Status::Failed => counters.failed += 1,
                Status::Excluded => counters.excluded += 1,
                Status::Skipped | Status::Irrelevant | Status::Error => {}
            }
            counters.all += 1;
        }
        counters
    }
}

/// A named, scored grouping of controls
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FrameworkSummary {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub score: f32,
}

/// Finished output of the evaluation engine
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScanSnapshot {
    /// Control id -> result; the map keeps ids in a stable order
    #[serde(default)]
    pub controls: BTreeMap<String, ControlResult>,
    /// Resource id -> metadata
    #[serde(default)]
    pub resources: BTreeMap<String, Resource>,
    /// Overall risk score in percent
    #[serde(default)]
    pub score: f32,
    #[serde(default)]
    pub frameworks: Vec<FrameworkSummary>,
}

/// Resource counts for a control or the whole scan
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct ResourceCounters {
    pub passed: usize,
    pub failed: usize,
    pub excluded: usize,
    pub all: usize,
}

/// Control counts for the whole scan
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct ControlCounters {
    pub all: usize,
    pub failed: usize,
    pub excluded: usize,
    pub skipped: usize,
}

/// Aggregate over all controls of a snapshot.
///
/// Recomputed on every render; nothing is cached on the snapshot.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct SummaryDetails {
    pub controls: ControlCounters,
    pub resources: ResourceCounters,
    pub score: f32,
    pub frameworks: Vec<FrameworkSummary>,
}

impl SummaryDetails {
    pub fn from_snapshot(snapshot: &ScanSnapshot) -> Self {
        let mut controls = ControlCounters { all: snapshot.controls.len(), ..Default::default() };
        for control in snapshot.controls.values() {
            match control.status {
                Status::Failed => controls.failed += 1,
                Status::Excluded => controls.excluded += 1,
                Status::Skipped | Status::Irrelevant => controls.skipped += 1,
                Status::Passed | Status::Error => {}
            }
        }

        // Distinct resources, worst status wins: failed > excluded > passed
        let mut worst: BTreeMap<&str, Status> = BTreeMap::new();
        for control in snapshot.controls.values() {
            for outcome in &control.outcomes {
                let entry = worst.entry(outcome.resource_id.as_str()).or_insert(outcome.status);
                if status_rank(outcome.status) > status_rank(*entry) {
                    *entry = outcome.status;
                }
            }
        }

        let mut resources = ResourceCounters { all: worst.len(), ..Default::default() };
        for status in worst.values() {
            match status {
                Status::Failed => resources.failed += 1,
                Status::Excluded => resources.excluded += 1,
                Status::Passed => resources.passed += 1,
                Status::Skipped | Status::Irrelevant | Status::Error => {}
            }
        }

        SummaryDetails { controls, resources, score: snapshot.score, frameworks: snapshot.frameworks.clone() }
    }
}

fn status_rank(status: Status) -> u8 {
    match status {
        Status::Failed => 3,
        Status::Excluded => 2,
        Status::Passed => 1,
        Status::Skipped | Status::Irrelevant | Status::Error => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(id: &str, status: Status) -> ResourceOutcome {
        ResourceOutcome { resource_id: id.to_string(), status, paths: vec![] }
    }

    fn control(id: &str, status: Status, outcomes: Vec<ResourceOutcome>) -> ControlResult {
        ControlResult {
            id: id.to_string(),
            name: id.to_string(),
            description: String::new(),
            remediation: String::new(),
            status,
            info: String::new(),
            score_factor: 5.0,
            score: 0.0,
            outcomes,
        }
    }

    #[test]
    fn test_severity_from_score_factor() {
        assert_eq!(Severity::from_score_factor(0.0), Severity::None);
        assert_eq!(Severity::from_score_factor(1.0), Severity::Low);
        assert_eq!(Severity::from_score_factor(4.0), Severity::Medium);
        assert_eq!(Severity::from_score_factor(7.5), Severity::High);
        assert_eq!(Severity::from_score_factor(9.0), Severity::Critical);
        assert_eq!(Severity::from_score_factor(10.0), Severity::Critical);
    }

    #[test]
    fn test_status_deserializes_lowercase() {
        let status: Status = serde_json::from_str("\"irrelevant\"").unwrap();
        assert_eq!(status, Status::Irrelevant);
        assert!(status.is_skipped());
    }

    #[test]
    fn test_workload_has_no_related_objects() {
        let resource = Resource {
            api_version: "apps/v1".to_string(),
            kind: "Deployment".to_string(),
            name: "web".to_string(),
            namespace: "default".to_string(),
            object_type: ObjectType::Workload,
            related_objects: vec![RelatedObject {
                kind: "Pod".to_string(),
                name: "p".to_string(),
                namespace: String::new(),
            }],
        };
        assert!(resource.related_objects().is_empty());
    }

    #[test]
    fn test_resource_counters() {
        let c = control(
            "C-0001",
            Status::Failed,
            vec![outcome("a", Status::Failed), outcome("b", Status::Passed), outcome("c", Status::Excluded)],
        );
        let counters = c.resource_counters();
        assert_eq!(counters, ResourceCounters { passed: 1, failed: 1, excluded: 1, all: 3 });
    }

    #[test]
    fn test_summary_details_worst_status_wins() {
        let mut snapshot = ScanSnapshot::default();
        snapshot.controls.insert(
            "C-0001".to_string(),
            control("C-0001", Status::Failed, vec![outcome("a", Status::Failed), outcome("b", Status::Passed)]),
        );
        snapshot.controls.insert(
            "C-0002".to_string(),
            control("C-0002", Status::Excluded, vec![outcome("a", Status::Passed), outcome("b", Status::Excluded)]),
        );
        snapshot.controls.insert("C-0003".to_string(), control("C-0003", Status::Skipped, vec![]));

        let summary = SummaryDetails::from_snapshot(&snapshot);
        assert_eq!(summary.controls, ControlCounters { all: 3, failed: 1, excluded: 1, skipped: 1 });
        assert_eq!(summary.resources, ResourceCounters { passed: 0, failed: 1, excluded: 1, all: 2 });
    }
}
