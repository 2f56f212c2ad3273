//! Integration tests for svncache

mod cli_tests {
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn svncache() -> Command {
        cargo_bin_cmd!("svncache")
    }

    fn write_config(temp: &TempDir) -> PathBuf {
        let root = temp.path().join("cache");
        let config = temp.path().join("config.toml");
        fs::write(
            &config,
            format!(
                "[repository]\nurl = \"https://svn.example.com/repo\"\n\n\
                 [cache]\nexport_root = {:?}\nmainline_ttl_days = 30\n\
                 tags_branches_ttl_days = 7\n",
                root
            ),
        )
        .unwrap();
        config
    }

    #[test]
    fn help_displays() {
        svncache()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("TTL-evicting cache"));
    }

    #[test]
    fn version_displays() {
        svncache()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("svncache"));
    }

    #[test]
    fn config_path() {
        let temp = TempDir::new().unwrap();
        let config = write_config(&temp);

        svncache()
            .args(["--config", config.to_str().unwrap(), "config", "path"])
            .assert()
            .success()
            .stdout(predicate::str::contains("config.toml"));
    }

    #[test]
    fn config_show_uses_defaults_when_missing() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("none.toml");

        svncache()
            .args(["--config", missing.to_str().unwrap(), "config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("[cache]"));
    }

    #[test]
    fn init_writes_config() {
        let temp = TempDir::new().unwrap();
        let config = temp.path().join("config.toml");

        svncache()
            .args(["--config", config.to_str().unwrap(), "init"])
            .assert()
            .success();
        assert!(config.exists());

        svncache()
            .args(["--config", config.to_str().unwrap(), "init"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("already exists"));

        svncache()
            .args(["--config", config.to_str().unwrap(), "init", "--force"])
            .assert()
            .success();
    }

    #[test]
    fn clean_empty_cache() {
        let temp = TempDir::new().unwrap();
        let config = write_config(&temp);

        svncache()
            .args(["--config", config.to_str().unwrap(), "clean"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Nothing to evict"));
    }

    #[test]
    fn clean_evicts_untracked_directory() {
        let temp = TempDir::new().unwrap();
        let config = write_config(&temp);
        let orphan = temp.path().join("cache/orphan");
        fs::create_dir_all(&orphan).unwrap();

        svncache()
            .args(["--config", config.to_str().unwrap(), "clean"])
            .assert()
            .success()
            .stdout(predicate::str::contains("evicted 1 entry(s)"));
        assert!(!orphan.exists());
    }

    #[test]
    fn clean_dry_run_leaves_directories() {
        let temp = TempDir::new().unwrap();
        let config = write_config(&temp);
        let orphan = temp.path().join("cache/orphan");
        fs::create_dir_all(&orphan).unwrap();

        svncache()
            .args(["--config", config.to_str().unwrap(), "clean", "--dry-run"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Dry run"));
        assert!(orphan.exists());
    }

    #[test]
    fn update_requires_a_path() {
        svncache().arg("update").assert().failure();
    }

    #[test]
    fn update_rejects_escaping_paths() {
        let temp = TempDir::new().unwrap();
        let config = write_config(&temp);

        svncache()
            .args(["--config", config.to_str().unwrap(), "update", "../escape"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid cache path"));
    }
}
