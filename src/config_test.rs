//! Tests for config module
#[cfg(test)]
mod tests {
    use crate::cli::{CliArgs, ColorChoice};
    use crate::config::*;
    use crate::report::{GroupingMode, NoSeverityPlacement};
    use std::path::PathBuf;

    fn args() -> CliArgs {
        CliArgs {
            input: PathBuf::from("results.json"),
            output: Some("out.txt".to_string()),
            verbose: false,
            view: None,
            grouping: None,
            no_severity: None,
            docs_url: None,
            config: None,
            color: ColorChoice::Auto,
            console_width: None,
            json: None,
        }
    }

    #[test]
    fn test_resolve_output_stdout() {
        assert_eq!(resolve_output(Some("-")), OutputTarget::Stdout);
        assert_eq!(resolve_output(Some("/dev/stdout")), OutputTarget::Stdout);
    }

    #[test]
    fn test_resolve_output_default_file() {
        assert_eq!(resolve_output(Some("")), OutputTarget::File(PathBuf::from("report.txt")));
        assert_eq!(resolve_output(Some("   ")), OutputTarget::File(PathBuf::from("report.txt")));
        assert_eq!(resolve_output(None), OutputTarget::File(PathBuf::from("report.txt")));
    }

    #[test]
    fn test_resolve_output_appends_extension() {
        assert_eq!(resolve_output(Some("scan")), OutputTarget::File(PathBuf::from("scan.txt")));
        assert_eq!(resolve_output(Some("scan.txt")), OutputTarget::File(PathBuf::from("scan.txt")));
        assert_eq!(resolve_output(Some("scan.xml")), OutputTarget::File(PathBuf::from("scan.xml.txt")));
    }

    #[test]
    fn test_defaults_without_file() {
        let config = build_render_config_with(&args(), &FileConfig::default()).unwrap();
        assert_eq!(config.view, ViewType::Control);
        assert!(!config.verbose);
        assert_eq!(config.grouping, GroupingMode::Auto);
        assert_eq!(config.no_severity, NoSeverityPlacement::BelowLow);
        assert_eq!(config.docs_url, DEFAULT_DOCS_URL);
        // Files get no colors and no width cap unless asked for
        assert!(!config.use_colors);
        assert_eq!(config.max_table_width, None);
        assert_eq!(config.output, OutputTarget::File(PathBuf::from("out.txt")));
    }

    #[test]
    fn test_file_settings_apply() {
        let file: FileConfig = toml::from_str(
            r#"
            docs_url = "https://example.com/controls/"
            no_severity = "excluded"
            grouping = "kind"
            view = "resource"
            verbose = true
            colors = true
            "#,
        )
        .unwrap();

        let config = build_render_config_with(&args(), &file).unwrap();
        assert_eq!(config.docs_url, "https://example.com/controls/");
        assert_eq!(config.no_severity, NoSeverityPlacement::Excluded);
        assert_eq!(config.grouping, GroupingMode::Kind);
        assert_eq!(config.view, ViewType::Resource);
        assert!(config.verbose);
        assert!(config.use_colors);
    }

    #[test]
    fn test_cli_overrides_file() {
        let file = FileConfig {
            grouping: Some(GroupingMode::Kind),
            docs_url: Some("https://a/".to_string()),
            colors: Some(true),
            ..Default::default()
        };
        let mut a = args();
        a.grouping = Some(GroupingMode::Namespace);
        a.docs_url = Some("https://b/".to_string());
        a.color = ColorChoice::Never;
        a.console_width = Some(100);

        let config = build_render_config_with(&a, &file).unwrap();
        assert_eq!(config.grouping, GroupingMode::Namespace);
        assert_eq!(config.docs_url, "https://b/");
        assert!(!config.use_colors);
        assert_eq!(config.max_table_width, Some(100));
    }

    #[test]
    fn test_unknown_file_key_rejected() {
        let result: Result<FileConfig, _> = toml::from_str("bogus = 1");
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_docs_url_rejected() {
        let mut a = args();
        a.docs_url = Some(" ".to_string());
        assert!(build_render_config_with(&a, &FileConfig::default()).is_err());
    }

    #[test]
    fn test_control_link_lowercases_id() {
        let config = RenderConfig::default();
        assert_eq!(config.control_link("C-0017"), "https://hub.armosec.io/docs/c-0017");
    }

    #[test]
    fn test_load_file_config_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scan-pretty.toml");
        std::fs::write(&path, "grouping = \"namespace\"\n").unwrap();
        let file = load_file_config(&path).unwrap();
        assert_eq!(file.grouping, Some(GroupingMode::Namespace));

        assert!(load_file_config(&dir.path().join("missing.toml")).is_err());
    }
}
