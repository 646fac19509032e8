/// End-to-end tests for config file loading and CLI option merging.
///
/// These tests exercise the full flow from config file on disk through CLI invocation
/// to correct output, using `assert_cmd` and `tempfile` for isolated test environments.
use assert_cmd::cargo::cargo_bin_cmd;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

// ============================================================================
// Helper Functions
// ============================================================================

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

/// Create a working directory holding one SBOM and a knowledge base.
fn create_workspace(dir: &Path) -> PathBuf {
    let sbom = dir.join("sbom.cdx.json");
    fs::copy(fixture("sboms/app.cdx.json"), &sbom).unwrap();
    fs::create_dir(dir.join("kb")).unwrap();
    fs::copy(fixture("knowledge-base.json"), dir.join("kb/main.json")).unwrap();
    sbom
}

/// Write a config file at the specified path.
fn write_config(path: &Path, content: &str) {
    fs::write(path, content).unwrap();
}

// ============================================================================
// Auto-discovery Tests
// ============================================================================

mod auto_discovery_tests {
    use super::*;

    #[test]
    fn test_auto_discovery_applies_format() {
        let dir = TempDir::new().unwrap();
        let sbom = create_workspace(dir.path());
        write_config(
            &dir.path().join("arm-compat.config.yml"),
            r#"
format: markdown
knowledge_base_dir: kb
"#,
        );

        let output = cargo_bin_cmd!("arm-compat")
            .current_dir(dir.path())
            .arg("analyze")
            .arg(&sbom)
            .output()
            .unwrap();

        assert!(output.status.success());
        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(stdout.contains("# ARM64 Compatibility Report"));
        // pandas only resolves through the configured knowledge base
        assert!(stdout.contains("### ⬆️ Needs Upgrade (1)"));
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("Auto-discovered config file"));
    }

    #[test]
    fn test_no_config_file_runs_normally() {
        let dir = TempDir::new().unwrap();
        let sbom = create_workspace(dir.path());

        let output = cargo_bin_cmd!("arm-compat")
            .current_dir(dir.path())
            .arg("analyze")
            .arg(&sbom)
            .output()
            .unwrap();

        assert!(output.status.success());
        let stdout = String::from_utf8_lossy(&output.stdout);
        // Default format is JSON
        assert!(stdout.contains("\"total_components\": 3"));
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(!stderr.contains("Auto-discovered"));
    }

    #[test]
    fn test_unknown_fields_warn() {
        let dir = TempDir::new().unwrap();
        let sbom = create_workspace(dir.path());
        write_config(
            &dir.path().join("arm-compat.config.yml"),
            r#"
format: json
check_cve: true
"#,
        );

        let output = cargo_bin_cmd!("arm-compat")
            .current_dir(dir.path())
            .arg("analyze")
            .arg(&sbom)
            .output()
            .unwrap();

        assert!(output.status.success());
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("Unknown config field 'check_cve'"));
    }
}

// ============================================================================
// Explicit Config Path (`--config`) Tests
// ============================================================================

mod explicit_config_tests {
    use super::*;

    #[test]
    fn test_explicit_config_path_loads_successfully() {
        let dir = TempDir::new().unwrap();
        let sbom = create_workspace(dir.path());

        // Relative paths resolve against the config file's directory
        let config_path = dir.path().join("custom-config.yml");
        write_config(
            &config_path,
            r#"
knowledge_bases:
  - kb/main.json
use_builtin_knowledge_base: false
"#,
        );

        let output = cargo_bin_cmd!("arm-compat")
            .arg("analyze")
            .arg(&sbom)
            .arg("-c")
            .arg(&config_path)
            .output()
            .unwrap();

        assert!(output.status.success());
        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(stdout.contains("\"status\": \"needs_upgrade\""));
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("Loaded config from:"));
    }

    #[test]
    fn test_explicit_config_nonexistent_file_error() {
        cargo_bin_cmd!("arm-compat")
            .args([
                "analyze",
                "tests/fixtures/sboms/app.cdx.json",
                "-c",
                "nonexistent-config.yml",
            ])
            .assert()
            .code(3); // ApplicationError
    }

    #[test]
    fn test_invalid_config_value_error() {
        let dir = TempDir::new().unwrap();
        let sbom = create_workspace(dir.path());
        let config_path = dir.path().join("config.yml");
        write_config(&config_path, "target_architecture: riscv\n");

        let output = cargo_bin_cmd!("arm-compat")
            .arg("analyze")
            .arg(&sbom)
            .arg("--config")
            .arg(&config_path)
            .output()
            .unwrap();

        assert_eq!(output.status.code(), Some(3));
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("Invalid target architecture"));
    }
}

// ============================================================================
// CLI + Config Merge Tests
// ============================================================================

mod merge_tests {
    use super::*;

    #[test]
    fn test_cli_format_overrides_config() {
        let dir = TempDir::new().unwrap();
        let sbom = create_workspace(dir.path());
        write_config(
            &dir.path().join("arm-compat.config.yml"),
            "format: markdown\n",
        );

        let output = cargo_bin_cmd!("arm-compat")
            .current_dir(dir.path())
            .arg("analyze")
            .arg(&sbom)
            .args(["-f", "json"])
            .output()
            .unwrap();

        assert!(output.status.success());
        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(stdout.trim_start().starts_with('{'));
    }

    #[test]
    fn test_config_deny_list_and_cli_flag_combine() {
        let dir = TempDir::new().unwrap();
        let sbom = dir.path().join("service.spdx.json");
        fs::copy(fixture("sboms/service.spdx.json"), &sbom).unwrap();
        fs::copy(fixture("deny-list.json"), dir.path().join("deny.json")).unwrap();
        write_config(
            &dir.path().join("arm-compat.config.yml"),
            r#"
deny_lists:
  - deny.json
"#,
        );

        cargo_bin_cmd!("arm-compat")
            .current_dir(dir.path())
            .arg("analyze")
            .arg(&sbom)
            .arg("--fail-on-incompatible")
            .assert()
            .code(1);
    }

    #[test]
    fn test_config_os_knowledge_base_dir() {
        let dir = TempDir::new().unwrap();
        let sbom = create_workspace(dir.path());
        fs::create_dir(dir.path().join("os")).unwrap();
        fs::copy(
            fixture("os-kb/ubuntu-22.04-packages.json"),
            dir.path().join("os/ubuntu-22.04-arm.json"),
        )
        .unwrap();
        write_config(
            &dir.path().join("arm-compat.config.yml"),
            r#"
knowledge_base_dir: kb
os_knowledge_base_dir: os
os_knowledge_base_suffix: -arm.json
"#,
        );

        let output = cargo_bin_cmd!("arm-compat")
            .current_dir(dir.path())
            .arg("analyze")
            .arg(&sbom)
            .output()
            .unwrap();

        assert!(output.status.success());
        let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(report["summary"]["compatible"], 1);
        assert_eq!(report["summary"]["unknown"], 1);
    }
}
