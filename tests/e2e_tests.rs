//! End-to-end tests for the snapup CLI
//!
//! These tests run the compiled binary with `--no-fetch` so no network is
//! touched, and verify:
//! - Text and JSON output for a sample manifest
//! - Part selection from the command line
//! - Exit codes for various scenarios

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::process::Command;
use tempfile::TempDir;

const MANIFEST: &str = r#"
name: sample
version: '1.0'
parts:
  gtk:
    source: https://github.com/GNOME/gtk.git
    source-tag: 4.12.0
  glib:
    source: https://gitlab.gnome.org/GNOME/glib.git
    source-branch: glib-2-78
  unpinned:
    source: https://github.com/example/unpinned.git
  local:
    plugin: dump
    source: snap/local
  tarball:
    source: https://example.org/release-1.0.tar.gz
"#;

fn snapup() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_snapup"));
    cmd.env("NO_COLOR", "1").env_remove("RUST_LOG");
    cmd
}

/// Create a test project with the manifest under snap/
fn create_test_project() -> TempDir {
    let dir = tempfile::tempdir().expect("Failed to create temp directory");
    fs::create_dir(dir.path().join("snap")).unwrap();
    fs::write(dir.path().join("snap/snapcraft.yaml"), MANIFEST).unwrap();
    dir
}

mod text_output {
    use super::*;

    #[test]
    fn test_reports_every_part() {
        let dir = create_test_project();

        snapup()
            .args(["--no-fetch", "--no-color"])
            .arg(dir.path())
            .assert()
            .success()
            .stdout(predicate::str::contains("Part: gtk (https://github.com/GNOME/gtk.git)"))
            .stdout(predicate::str::contains("Part: glib"))
            .stdout(predicate::str::contains("Part: unpinned"))
            .stdout(predicate::str::contains("Part: local (snap/local)"))
            .stdout(predicate::str::contains(
                "Skipped: source is neither http:// nor git://",
            ))
            .stdout(predicate::str::contains("Skipped: source is not a git repository"))
            .stdout(predicate::str::contains(
                "Has neither a source-tag nor a source-branch",
            ))
            .stdout(predicate::str::contains("5 part(s) audited"));
    }

    #[test]
    fn test_branch_pin_gets_move_to_tag_note() {
        let dir = create_test_project();

        snapup()
            .args(["-s", "-q", "--no-color"])
            .arg(dir.path())
            .arg("glib")
            .assert()
            .success()
            .stdout(predicate::str::contains("Current branch: glib-2-78 (version 2.78)"))
            .stdout(predicate::str::contains(
                "Branch pins should be moved to a specific tag",
            ))
            .stdout(predicate::str::contains("Part: gtk").not());
    }

    #[test]
    fn test_manifest_file_argument() {
        let dir = create_test_project();

        snapup()
            .args(["-s", "--no-color"])
            .arg(dir.path().join("snap/snapcraft.yaml"))
            .arg("gtk")
            .assert()
            .success()
            .stdout(predicate::str::contains("Current tag: 4.12.0 (version 4.12.0)"))
            .stdout(predicate::str::contains("No tags found"));
    }
}

mod json_output {
    use super::*;

    fn run_json(dir: &TempDir, extra: &[&str]) -> serde_json::Value {
        let output = snapup()
            .args(["--no-fetch", "--json"])
            .arg(dir.path())
            .args(extra)
            .output()
            .expect("Failed to execute command");

        serde_json::from_slice(&output.stdout).expect("Output should be valid JSON")
    }

    #[test]
    fn test_json_output_schema() {
        let dir = create_test_project();
        let json = run_json(&dir, &[]);

        assert!(json.get("manifest").is_some());
        assert!(json.get("summary").is_some());
        assert!(json.get("parts").is_some());
        assert!(json.get("errors").is_some());

        let summary = &json["summary"];
        assert_eq!(summary["total"], 5);
        assert_eq!(summary["skipped"], 2);
        assert_eq!(summary["unpinned"], 1);
        assert_eq!(summary["problems"], 2);
    }

    #[test]
    fn test_json_parts_in_manifest_order() {
        let dir = create_test_project();
        let json = run_json(&dir, &[]);

        let names: Vec<_> = json["parts"]
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["name"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["gtk", "glib", "unpinned", "local", "tarball"]);

        assert_eq!(json["parts"][0]["pin"]["kind"], "tag");
        assert_eq!(json["parts"][0]["status"], "no_candidates");
        assert_eq!(json["parts"][1]["pin"]["kind"], "branch");
        assert_eq!(json["parts"][2]["status"], "unpinned");
        assert_eq!(json["parts"][3]["status"], "skipped");
    }

    #[test]
    fn test_json_selected_parts_order() {
        let dir = create_test_project();
        let json = run_json(&dir, &["unpinned", "gtk"]);

        assert_eq!(json["summary"]["total"], 2);
        assert_eq!(json["parts"][0]["name"], "unpinned");
        assert_eq!(json["parts"][1]["name"], "gtk");
    }

    #[test]
    fn test_json_has_no_progress_noise() {
        let dir = create_test_project();

        snapup()
            .args(["--no-fetch", "--json"])
            .arg(dir.path())
            .assert()
            .success()
            .stdout(predicate::str::starts_with("{"));
    }
}

mod exit_codes {
    use super::*;

    #[test]
    fn test_exit_code_success() {
        let dir = create_test_project();
        snapup().args(["-s", "-q"]).arg(dir.path()).assert().code(0);
    }

    #[test]
    fn test_exit_code_unknown_part() {
        let dir = create_test_project();

        snapup()
            .args(["-s", "-q", "--no-color"])
            .arg(dir.path())
            .arg("nonexistent")
            .assert()
            .code(2)
            .stdout(predicate::str::contains(
                "Part 'nonexistent' is not declared in the manifest",
            ));
    }

    #[test]
    fn test_exit_code_missing_manifest() {
        let dir = tempfile::tempdir().unwrap();

        snapup()
            .args(["-s", "-q", "--no-color"])
            .arg(dir.path())
            .assert()
            .code(2)
            .stdout(predicate::str::contains("no snapcraft file found"));
    }

    #[test]
    fn test_exit_code_invalid_yaml() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("snapcraft.yaml"), "parts: [unclosed").unwrap();

        snapup()
            .args(["-s", "-q"])
            .arg(dir.path())
            .assert()
            .code(2)
            .stdout(predicate::str::contains("failed to parse YAML"));
    }

    #[test]
    fn test_exit_code_help() {
        snapup()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("snapcraft.yaml"))
            .stdout(predicate::str::contains("--no-fetch"));
    }

    #[test]
    fn test_exit_code_version() {
        snapup()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    }
}
