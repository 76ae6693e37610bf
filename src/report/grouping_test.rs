//! Tests for resource grouping
//!
//! These pin down the group labels and the related-objects suffix, which are
//! part of the user-visible report format.

#[cfg(test)]
mod tests {
    use crate::report::grouping::*;
    use crate::types::{ControlResult, ObjectType, RelatedObject, Resource, ResourceOutcome, Status};
    use std::collections::BTreeMap;

    fn workload(kind: &str, name: &str, namespace: &str) -> Resource {
        Resource {
            api_version: "apps/v1".to_string(),
            kind: kind.to_string(),
            name: name.to_string(),
            namespace: namespace.to_string(),
            object_type: ObjectType::Workload,
            related_objects: vec![],
        }
    }

    fn composite(kind: &str, name: &str, related: &[(&str, &str, &str)]) -> Resource {
        Resource {
            api_version: "rbac.authorization.k8s.io/v1".to_string(),
            kind: kind.to_string(),
            name: name.to_string(),
            namespace: String::new(),
            object_type: ObjectType::Composite,
            related_objects: related
                .iter()
                .map(|(ns, k, n)| RelatedObject { kind: k.to_string(), name: n.to_string(), namespace: ns.to_string() })
                .collect(),
        }
    }

    fn control_with(outcomes: &[(&str, Status)]) -> ControlResult {
        ControlResult {
            id: "C-0001".to_string(),
            name: "Test control".to_string(),
            description: String::new(),
            remediation: String::new(),
            status: Status::Failed,
            info: String::new(),
            score_factor: 7.0,
            score: 0.0,
            outcomes: outcomes
                .iter()
                .map(|(id, status)| ResourceOutcome { resource_id: id.to_string(), status: *status, paths: vec![] })
                .collect(),
        }
    }

    fn resources() -> BTreeMap<String, Resource> {
        let mut map = BTreeMap::new();
        map.insert("web".to_string(), workload("Deployment", "web", "prod"));
        map.insert("db".to_string(), workload("StatefulSet", "db", "prod"));
        map.insert("api".to_string(), workload("Deployment", "api", "staging"));
        map.insert("node".to_string(), workload("Node", "node-1", ""));
        map.insert("alice".to_string(), workload("User", "alice", ""));
        map
    }

    #[test]
    fn test_related_objects_exact_format() {
        let resource = composite("RoleBinding", "rb", &[("ns1", "Deployment", "d1")]);
        assert_eq!(related_objects_str(&resource), " [Namespace - ns1, Deployment - d1]");
        assert_eq!(related_objects_str(&resource).trim(), "[Namespace - ns1, Deployment - d1]");
    }

    #[test]
    fn test_related_objects_only_first_namespace() {
        let resource = composite("RoleBinding", "rb", &[("", "Role", "reader"), ("ns2", "User", "bob")]);
        assert_eq!(related_objects_str(&resource), " [Role - reader, User - bob]");

        let resource = composite("RoleBinding", "rb", &[("ns1", "Role", "reader"), ("ns2", "User", "bob")]);
        assert_eq!(related_objects_str(&resource), " [Namespace - ns1, Role - reader, User - bob]");
    }

    #[test]
    fn test_related_objects_empty() {
        assert_eq!(related_objects_str(&composite("RoleBinding", "rb", &[])), "");
        assert_eq!(related_objects_str(&workload("Pod", "p", "default")), "");
    }

    #[test]
    fn test_group_labels_auto() {
        assert_eq!(group_label(&workload("Deployment", "web", "prod"), GroupingMode::Auto), "Namespace prod");
        assert_eq!(group_label(&workload("Node", "n", ""), GroupingMode::Auto), "");
        assert_eq!(group_label(&workload("User", "alice", ""), GroupingMode::Auto), "Users");
        assert_eq!(group_label(&workload("Group", "devs", ""), GroupingMode::Auto), "Groups");
    }

    #[test]
    fn test_group_labels_forced_modes() {
        let user = workload("User", "alice", "");
        assert_eq!(group_label(&user, GroupingMode::Namespace), "");
        let deploy = workload("Deployment", "web", "prod");
        assert_eq!(group_label(&deploy, GroupingMode::Kind), "Deployments");
        assert_eq!(group_label(&deploy, GroupingMode::Namespace), "Namespace prod");
    }

    #[test]
    fn test_group_by_namespace() {
        let resources = resources();
        let control = control_with(&[
            ("web", Status::Failed),
            ("db", Status::Failed),
            ("api", Status::Excluded),
            ("node", Status::Failed),
            ("alice", Status::Passed),
        ]);
        let summaries = list_result_summary(&control, &resources);

        let failed = group_by_namespace_or_kind(&summaries, StatusFilter::Failed, GroupingMode::Auto);
        let labels: Vec<&String> = failed.keys().collect();
        assert_eq!(labels, vec!["", "Namespace prod"]);
        assert_eq!(failed["Namespace prod"].len(), 2);
        assert_eq!(failed[""].len(), 1);

        let excluded = group_by_namespace_or_kind(&summaries, StatusFilter::Excluded, GroupingMode::Auto);
        assert_eq!(excluded.keys().collect::<Vec<_>>(), vec!["Namespace staging"]);

        let passed = group_by_namespace_or_kind(&summaries, StatusFilter::Passed, GroupingMode::Auto);
        assert_eq!(passed.keys().collect::<Vec<_>>(), vec!["Users"]);
    }

    #[test]
    fn test_no_matches_yields_empty_map() {
        let resources = resources();
        let control = control_with(&[("web", Status::Passed)]);
        let summaries = list_result_summary(&control, &resources);
        assert!(group_by_namespace_or_kind(&summaries, StatusFilter::Failed, GroupingMode::Auto).is_empty());
        assert!(group_by_namespace_or_kind(&summaries, StatusFilter::Excluded, GroupingMode::Kind).is_empty());
    }

    #[test]
    fn test_unknown_resources_are_skipped() {
        let resources = resources();
        let control = control_with(&[("web", Status::Failed), ("ghost", Status::Failed)]);
        let summaries = list_result_summary(&control, &resources);
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].resource.name, "web");
    }

    #[test]
    fn test_resource_lines_sorted() {
        let resources = resources();
        let control = control_with(&[("web", Status::Failed), ("db", Status::Failed)]);
        let summaries = list_result_summary(&control, &resources);
        let failed = group_by_namespace_or_kind(&summaries, StatusFilter::Failed, GroupingMode::Auto);
        let lines = resource_lines("    ", &failed["Namespace prod"]);
        assert_eq!(lines, vec!["    Deployment - web", "    StatefulSet - db"]);
    }

    #[test]
    fn test_status_filter_headers() {
        assert_eq!(StatusFilter::Failed.header(), "Failed:");
        assert_eq!(StatusFilter::Excluded.header(), "Excluded:");
        assert_eq!(StatusFilter::Passed.header(), "Passed:");
        assert!(!StatusFilter::Failed.matches(Status::Excluded));
    }
}
