//! Pipeline and CLI integration tests.
//!
//! These tests exercise the full load → compare → report pipeline,
//! directory discovery, and the CLI command handlers with real fixture files.

use oas_compare::cli::{discovery_for, run_diff, run_discover, run_validate, validate_file};
use oas_compare::config::{AppConfig, DiffConfig, DiffLabels, DiffPaths, Validatable};
use oas_compare::diff::Severity;
use oas_compare::discovery::DiscoveryConfig;
use oas_compare::pipeline::{
    compute_comparison, exit_codes, load_spec_file, load_spec_pair, output_report,
};
use oas_compare::reports::ReportFormat;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

// ============================================================================
// Test Fixtures
// ============================================================================

const FIXTURES_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures");

fn fixture_path(name: &str) -> PathBuf {
    Path::new(FIXTURES_DIR).join(name)
}

fn petstore_config(app: AppConfig) -> DiffConfig {
    DiffConfig::from_app(
        DiffPaths {
            base: fixture_path("openapi/petstore-v1.yaml"),
            target: fixture_path("openapi/petstore-v2.yaml"),
        },
        app,
    )
}

/// A checkout-like directory with a fixture copied to `relative`.
fn checkout(dir: &TempDir, name: &str, relative: &str, fixture: &str) -> PathBuf {
    let root = dir.path().join(name);
    let target = root.join(relative);
    std::fs::create_dir_all(target.parent().unwrap()).unwrap();
    std::fs::copy(fixture_path(fixture), &target).unwrap();
    root
}

// ============================================================================
// Load Stage Tests
// ============================================================================

mod load_stage {
    use super::*;

    #[test]
    fn load_file_with_label() {
        let path = fixture_path("swagger/api-v1.json");
        let spec = load_spec_file(&path, Some("1.0"), &DiscoveryConfig::defaults())
            .expect("load should succeed");

        assert_eq!(spec.version, "1.0");
        assert!(spec.content.contains("listAccounts"));
        assert_eq!(spec.commit_hash.len(), 16);
        assert!(spec.commit_hash.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn identical_content_has_identical_hash() {
        let dir = TempDir::new().unwrap();
        let copy = dir.path().join("copy.json");
        std::fs::copy(fixture_path("swagger/api-v1.json"), &copy).unwrap();

        let config = DiscoveryConfig::defaults();
        let a = load_spec_file(&fixture_path("swagger/api-v1.json"), None, &config).unwrap();
        let b = load_spec_file(&copy, None, &config).unwrap();
        assert_eq!(a.commit_hash, b.commit_hash);
        assert_ne!(a.version, b.version);
    }

    #[test]
    fn load_directory_through_discovery() {
        let dir = TempDir::new().unwrap();
        let root = checkout(&dir, "repo", "docs/openapi.yaml", "openapi/petstore-v1.yaml");

        let spec = load_spec_file(&root, None, &DiscoveryConfig::defaults()).unwrap();
        assert!(spec.path.ends_with("openapi.yaml"));
        assert_eq!(spec.version, "openapi.yaml");
    }

    #[test]
    fn load_directory_without_spec_fails() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("README.md"), "# nothing here").unwrap();

        let err = load_spec_file(dir.path(), None, &DiscoveryConfig::defaults()).unwrap_err();
        assert!(err.to_string().contains("No OpenAPI/Swagger specification found"));
    }

    #[test]
    fn load_pair_uses_labels() {
        let config = petstore_config(AppConfig::default()).with_labels(DiffLabels {
            base: Some("v1".to_string()),
            target: None,
        });
        let (base, target) = load_spec_pair(&config).unwrap();
        assert_eq!(base.version, "v1");
        assert_eq!(target.version, "petstore-v2.yaml");
    }

    #[test]
    fn load_pair_missing_target_fails() {
        let mut config = petstore_config(AppConfig::default());
        config.paths.target = PathBuf::from("/nonexistent/openapi.yaml");

        let err = load_spec_pair(&config).unwrap_err();
        assert!(format!("{err:#}").contains("target"));
    }
}

// ============================================================================
// Diff Stage Tests
// ============================================================================

mod diff_stage {
    use super::*;

    #[test]
    fn compute_comparison_fills_metadata() {
        let config = petstore_config(AppConfig::builder().quiet(true).build());
        let (base, target) = load_spec_pair(&config).unwrap();

        let comparison = compute_comparison(&config, &base, &target);
        assert!(comparison.result.success);
        assert_eq!(comparison.result.summary.total, 10);
        assert_eq!(comparison.metadata.base.version, "petstore-v1.yaml");
        assert_eq!(comparison.metadata.target.commit_hash, target.commit_hash);
        assert_eq!(
            comparison.metadata.target.dialect.as_ref().map(ToString::to_string).as_deref(),
            Some("OpenAPI 3.0.1")
        );
    }

    #[test]
    fn compute_comparison_with_method_changes() {
        let config = petstore_config(
            AppConfig::builder()
                .quiet(true)
                .report_method_changes(true)
                .build(),
        );
        let (base, target) = load_spec_pair(&config).unwrap();

        let comparison = compute_comparison(&config, &base, &target);
        assert_eq!(comparison.result.summary.total, 11);
    }
}

// ============================================================================
// Report Stage Tests
// ============================================================================

mod report_stage {
    use super::*;

    fn render(format: ReportFormat) -> String {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("report.out");
        let config = petstore_config(
            AppConfig::builder()
                .quiet(true)
                .output_format(format)
                .output_file(Some(out.clone()))
                .build(),
        );
        let (base, target) = load_spec_pair(&config).unwrap();
        let comparison = compute_comparison(&config, &base, &target);
        output_report(&config, &comparison).unwrap();
        std::fs::read_to_string(out).unwrap()
    }

    #[test]
    fn output_report_json_to_file() {
        let json: Value = serde_json::from_str(&render(ReportFormat::Json)).expect("valid JSON");

        assert_eq!(json["success"], true);
        assert_eq!(json["summary"]["total"], 10);
        assert_eq!(json["summary"]["operations"]["total"], 2);
        assert_eq!(json["operationChanges"][0]["operationId"], "listUsers");
        assert_eq!(json["changes"][2]["path"], "N/A");
        assert_eq!(json["metadata"]["tool"]["name"], "oas-compare");
        assert_eq!(
            json["metadata"]["comparison"]["base"]["version"],
            "petstore-v1.yaml"
        );
        assert_eq!(json["details"]["targetEndpoints"], 5);
    }

    #[test]
    fn output_report_summary_to_file() {
        let summary = render(ReportFormat::Summary);

        assert!(summary.contains("API Spec Comparison"));
        assert!(summary.contains("petstore-v1.yaml"));
        assert!(summary.contains("model:Pet"));
        // file output is never colored
        assert!(!summary.contains('\u{1b}'));
    }

    #[test]
    fn output_report_auto_is_summary() {
        assert_eq!(render(ReportFormat::Auto), render(ReportFormat::Summary));
    }

    #[test]
    fn output_report_markdown_to_file() {
        let md = render(ReportFormat::Markdown);

        assert!(md.starts_with("# API Specification Changes"));
        assert!(md.contains("## Summary"));
        assert!(md.contains("## Operation Changes"));
        assert!(md.contains("## Parameter and Response Changes"));
        assert!(md.contains("## Model Changes"));
        assert!(md.contains("Added required fields: tag"));
    }
}

// ============================================================================
// CLI Handler Tests
// ============================================================================

mod cli_handlers {
    use super::*;

    fn json_config(app: oas_compare::config::AppConfigBuilder, out: &Path) -> DiffConfig {
        petstore_config(
            app.quiet(true)
                .output_format(ReportFormat::Json)
                .output_file(Some(out.to_path_buf()))
                .build(),
        )
    }

    #[test]
    fn run_diff_json_output() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("diff.json");

        let code = run_diff(json_config(AppConfig::builder(), &out)).unwrap();
        assert_eq!(code, exit_codes::SUCCESS);
        let json: Value = serde_json::from_str(&std::fs::read_to_string(out).unwrap()).unwrap();
        assert_eq!(json["summary"]["total"], 10);
    }

    #[test]
    fn run_diff_fail_on_change() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("diff.json");

        let code = run_diff(json_config(AppConfig::builder().fail_on_change(true), &out)).unwrap();
        assert_eq!(code, exit_codes::CHANGES_DETECTED);
    }

    #[test]
    fn run_diff_fail_on_severity() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("diff.json");

        // removing /store/inventory is a high-severity change
        let config = json_config(
            AppConfig::builder().fail_on_severity(Some(Severity::High)),
            &out,
        );
        assert_eq!(run_diff(config).unwrap(), exit_codes::SEVERITY_THRESHOLD);
    }

    #[test]
    fn run_diff_no_changes_exit_zero() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("diff.json");
        let mut config = json_config(AppConfig::builder().fail_on_change(true), &out);
        config.paths.target = config.paths.base.clone();

        assert_eq!(run_diff(config).unwrap(), exit_codes::SUCCESS);
    }

    #[test]
    fn run_diff_unparseable_side_is_error_with_report() {
        let dir = TempDir::new().unwrap();
        let broken = dir.path().join("broken.json");
        std::fs::write(&broken, "{\"openapi\": \"3.0.0\", ").unwrap();
        let out = dir.path().join("diff.json");
        let mut config = json_config(AppConfig::builder(), &out);
        config.paths.target = broken;

        assert_eq!(run_diff(config).unwrap(), exit_codes::ERROR);
        let json: Value = serde_json::from_str(&std::fs::read_to_string(out).unwrap()).unwrap();
        assert_eq!(json["success"], false);
        assert!(json["error"].as_str().unwrap().contains("target"));
    }

    #[test]
    fn run_diff_missing_file() {
        let dir = TempDir::new().unwrap();
        let mut config = json_config(AppConfig::builder(), &dir.path().join("diff.json"));
        config.paths.base = PathBuf::from("/nonexistent/v1.yaml");

        assert!(!config.is_valid());
        assert!(run_diff(config).is_err());
    }

    #[test]
    fn run_diff_between_checkouts() {
        let dir = TempDir::new().unwrap();
        let old = checkout(&dir, "release-1", "openapi.yaml", "openapi/petstore-v1.yaml");
        let new = checkout(&dir, "release-2", "api/openapi.yaml", "openapi/petstore-v2.yaml");
        let out = dir.path().join("diff.json");

        let mut config = json_config(AppConfig::builder(), &out).with_labels(DiffLabels {
            base: Some("1.0".to_string()),
            target: Some("2.0".to_string()),
        });
        config.paths = DiffPaths { base: old, target: new };

        assert_eq!(run_diff(config).unwrap(), exit_codes::SUCCESS);
        let json: Value = serde_json::from_str(&std::fs::read_to_string(out).unwrap()).unwrap();
        assert_eq!(json["metadata"]["comparison"]["target"]["version"], "2.0");
        assert_eq!(json["summary"]["total"], 10);
    }

    #[test]
    fn run_validate_reports_each_file() {
        let dir = TempDir::new().unwrap();
        let bogus = dir.path().join("bogus.json");
        std::fs::write(&bogus, "[1, 2, 3]").unwrap();
        let out = dir.path().join("validate.json");

        let good = vec![
            fixture_path("openapi/petstore-v1.yaml"),
            fixture_path("swagger/api-v2.json"),
        ];
        let code = run_validate(good.clone(), ReportFormat::Json, Some(out.clone()), true).unwrap();
        assert_eq!(code, exit_codes::SUCCESS);
        let json: Value = serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
        assert_eq!(json[1]["dialect"], "Swagger 2.0");
        assert_eq!(json[0]["endpoints"], 4);

        let mut with_bogus = good;
        with_bogus.push(bogus.clone());
        let code = run_validate(with_bogus, ReportFormat::Summary, Some(out), true).unwrap();
        assert_eq!(code, exit_codes::INVALID_INPUT);
        assert!(!validate_file(&bogus).valid);
    }

    #[test]
    fn run_discover_lists_matches() {
        let dir = TempDir::new().unwrap();
        let root = checkout(&dir, "repo", "docs/swagger.yaml", "openapi/petstore-v2.yaml");
        let custom = root.join("spec/petstore.json");
        std::fs::create_dir_all(custom.parent().unwrap()).unwrap();
        std::fs::copy(fixture_path("swagger/api-v1.json"), &custom).unwrap();
        let out = dir.path().join("discover.json");

        let config = discovery_for(
            &DiscoveryConfig::defaults(),
            &["spec/petstore.json".to_string()],
            false,
        );
        let code = run_discover(&root, &config, ReportFormat::Json, Some(out.clone()), true).unwrap();
        assert_eq!(code, exit_codes::SUCCESS);

        let json: Value = serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
        let found: Vec<&str> = json
            .as_array()
            .unwrap()
            .iter()
            .map(|e| e["searchPath"].as_str().unwrap())
            .collect();
        assert_eq!(found, ["docs/swagger.yaml", "spec/petstore.json"]);
        assert_eq!(json[1]["dialect"], "Swagger 2.0");

        let only_custom = discovery_for(&DiscoveryConfig::defaults(), &[], true);
        let code = run_discover(&root, &only_custom, ReportFormat::Summary, Some(out), true).unwrap();
        assert_eq!(code, exit_codes::INVALID_INPUT);
    }
}
