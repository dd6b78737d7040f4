//! Integration tests for stagecache

mod cache;

mod cli_tests {
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;
    use std::fs;
    use tempfile::TempDir;

    /// Command bound to a private artifacts root and config file
    fn stagecache(temp: &TempDir) -> Command {
        let mut cmd = cargo_bin_cmd!("stagecache");
        cmd.env_remove("STAGECACHE_ROOT")
            .env_remove("STAGECACHE_CONFIG")
            .env("CI", "1")
            .arg("--root")
            .arg(temp.path().join("artifacts"))
            .arg("--config")
            .arg(temp.path().join("config.toml"));
        cmd
    }

    #[test]
    fn help_displays() {
        let temp = TempDir::new().unwrap();
        stagecache(&temp)
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("pipeline artifact cache"));
    }

    #[test]
    fn version_displays() {
        let temp = TempDir::new().unwrap();
        stagecache(&temp)
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("stagecache"));
    }

    #[test]
    fn stages_lists_catalog() {
        let temp = TempDir::new().unwrap();
        stagecache(&temp)
            .args(["stages", "--format", "plain"])
            .assert()
            .success()
            .stdout(predicate::str::starts_with("pruned_interactions\n"))
            .stdout(predicate::str::contains("gnn_inference_time"));
    }

    #[test]
    fn empty_root_everything_missing() {
        let temp = TempDir::new().unwrap();
        stagecache(&temp)
            .arg("missing")
            .assert()
            .success()
            .stdout(predicate::str::starts_with("pruned_interactions\nfeature_encoding\n"));

        stagecache(&temp)
            .arg("completed")
            .assert()
            .success()
            .stdout(predicate::str::is_empty());

        let output = stagecache(&temp)
            .args(["status", "--format", "json"])
            .output()
            .unwrap();
        assert!(output.status.success());
        let status: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        let entries = status.as_array().unwrap();
        assert_eq!(entries.len(), 18);
        assert!(entries.iter().all(|e| {
            e["in_session"] == false && e["in_file"] == false && e["file_path"].is_null()
        }));
    }

    #[test]
    fn put_then_show() {
        let temp = TempDir::new().unwrap();
        let input = temp.path().join("metrics.json");
        fs::write(&input, r#"{"precision": 0.5, "k": 10}"#).unwrap();

        stagecache(&temp)
            .args(["put", "gnn_evaluation_metrics"])
            .arg(&input)
            .assert()
            .success()
            .stdout(predicate::str::contains("Saved gnn_evaluation_metrics"));

        stagecache(&temp)
            .args(["show", "gnn_evaluation_metrics"])
            .assert()
            .success()
            .stdout(predicate::str::contains("\"precision\": 0.5"))
            .stdout(predicate::str::contains("\"k\": 10"));

        stagecache(&temp)
            .args(["show", "gnn_evaluation_metrics", "--tagged"])
            .assert()
            .success()
            .stdout(predicate::str::contains("\"kind\": \"int\""));

        stagecache(&temp)
            .arg("completed")
            .assert()
            .success()
            .stdout("gnn_evaluation_metrics\n");
    }

    #[test]
    fn put_from_stdin() {
        let temp = TempDir::new().unwrap();
        stagecache(&temp)
            .args(["put", "training_time", "-"])
            .write_stdin("42.5")
            .assert()
            .success();

        stagecache(&temp)
            .args(["show", "training_time"])
            .assert()
            .success()
            .stdout("42.5\n");

        assert!(temp.path().join("artifacts").join("training_time.json").is_file());
    }

    #[test]
    fn restore_reports_per_stage() {
        let temp = TempDir::new().unwrap();
        stagecache(&temp)
            .args(["put", "gnn_graph", "-"])
            .write_stdin(r#"{"nodes": [1, 2, 3]}"#)
            .assert()
            .success();

        stagecache(&temp)
            .args(["restore", "--format", "plain"])
            .assert()
            .success()
            .stdout(predicate::str::contains("gnn_graph\trestored"))
            .stdout(predicate::str::contains("training_time\tnot persisted"));
    }

    #[test]
    fn restore_fails_on_corrupt_stage_but_reports_all() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("artifacts");
        fs::create_dir_all(&root).unwrap();
        fs::write(root.join("user_profiles.json"), "{oops").unwrap();

        stagecache(&temp)
            .args(["restore", "--format", "plain"])
            .assert()
            .failure()
            .stdout(predicate::str::contains("user_profiles\terror"))
            .stdout(predicate::str::contains("gnn_inference_time\tnot persisted"))
            .stderr(predicate::str::contains("could not be restored"));
    }

    #[test]
    fn clear_all_files() {
        let temp = TempDir::new().unwrap();
        stagecache(&temp)
            .args(["put", "inference_time", "-"])
            .write_stdin("0.25")
            .assert()
            .success();

        stagecache(&temp)
            .args(["clear", "--all", "--files", "--yes"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Cleared 18 stage(s)"));

        assert!(!temp.path().join("artifacts").join("inference_time.json").exists());
    }

    #[test]
    fn clear_files_without_confirmation_keeps_file() {
        let temp = TempDir::new().unwrap();
        stagecache(&temp)
            .args(["put", "inference_time", "-"])
            .write_stdin("0.25")
            .assert()
            .success();

        // Non-interactive prompts default to "no"
        stagecache(&temp)
            .args(["clear", "inference_time", "--files"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Aborted"));

        assert!(temp.path().join("artifacts").join("inference_time.json").exists());
    }

    #[test]
    fn clear_requires_target() {
        let temp = TempDir::new().unwrap();
        stagecache(&temp).arg("clear").assert().failure();
    }

    #[test]
    fn show_unknown_stage() {
        let temp = TempDir::new().unwrap();
        stagecache(&temp)
            .args(["show", "not_a_stage"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Unknown stage: not_a_stage"))
            .stderr(predicate::str::contains("stagecache stages"));
    }

    #[test]
    fn show_missing_stage() {
        let temp = TempDir::new().unwrap();
        stagecache(&temp)
            .args(["show", "gnn_training"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("has not been persisted"));
    }

    #[test]
    fn config_path() {
        let temp = TempDir::new().unwrap();
        stagecache(&temp)
            .args(["config", "path"])
            .assert()
            .success()
            .stdout(predicate::str::contains("config.toml"));
    }

    #[test]
    fn config_init_then_show() {
        let temp = TempDir::new().unwrap();
        stagecache(&temp)
            .args(["config", "init"])
            .assert()
            .success();
        assert!(temp.path().join("config.toml").is_file());

        stagecache(&temp)
            .args(["config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("[cache]"))
            .stdout(predicate::str::contains("artifacts"));
    }

    #[test]
    fn completions_bash() {
        let temp = TempDir::new().unwrap();
        stagecache(&temp)
            .args(["completions", "bash"])
            .assert()
            .success()
            .stdout(predicate::str::contains("stagecache"));
    }
}
