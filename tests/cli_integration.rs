//! Integration tests for the tmeta binary.
//!
//! Every test runs in its own temporary project with HOME and
//! XDG_CONFIG_HOME pointed inside it, so no user configuration leaks in.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const CART_MANIFEST: &str = r#"
[[class]]
name = "CartTest"
declarations = [
    { name = "testmeta::Group", args = ["checkout"] },
    { name = "testmeta::Small" },
    { name = "vendor::Fixture", args = ["db"] },
]

[[class.method]]
name = "testAdd"
declarations = [{ name = "testmeta::Test" }]

[[class.method]]
name = "testTotal"
declarations = [
    { name = "testmeta::Test" },
    { name = "testmeta::Depends", args = ["testAdd"] },
    { name = "testmeta::DependsExternalUsingDeepClone", args = ["StockTest", "testReserve"] },
]

[[class.method]]
name = "testBroken"
declarations = [{ name = "testmeta::TestWithJson", args = ["[1, 2"] }]
"#;

// =============================================================================
// Test Fixtures
// =============================================================================

/// A temporary project directory with an isolated home.
struct Project {
    dir: TempDir,
}

impl Project {
    fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        fs::create_dir_all(dir.path().join("home")).unwrap();
        Self { dir }
    }

    fn with_manifest() -> Self {
        let project = Self::new();
        project.write("tests.toml", CART_MANIFEST);
        project
    }

    fn path(&self) -> &Path {
        self.dir.path()
    }

    fn write(&self, relative: &str, contents: &str) {
        let path = self.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, contents).unwrap();
    }

    /// A `tmeta` command running inside the project.
    fn tmeta(&self) -> Command {
        let mut cmd = Command::cargo_bin("tmeta").unwrap();
        cmd.current_dir(self.path())
            .env("HOME", self.path().join("home"))
            .env("XDG_CONFIG_HOME", self.path().join("home/.config"))
            .env_remove("TESTMETA_CONFIG")
            .env_remove("RUST_LOG");
        cmd
    }
}

// =============================================================================
// Basics
// =============================================================================

#[test]
fn version_flag_works() {
    Project::new()
        .tmeta()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("tmeta"));
}

#[test]
fn help_lists_commands() {
    Project::new()
        .tmeta()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("metadata"))
        .stdout(predicate::str::contains("deps"));
}

#[test]
fn completion_generates_script() {
    Project::new()
        .tmeta()
        .args(["completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("tmeta"));
}

// =============================================================================
// metadata
// =============================================================================

mod metadata {
    use super::*;

    #[test]
    fn class_metadata_in_order() {
        Project::with_manifest()
            .tmeta()
            .args(["metadata", "tests.toml", "--class", "CartTest"])
            .assert()
            .success()
            .stdout("group(checkout)\ngroup(small)\n");
    }

    #[test]
    fn class_entries_precede_method_entries() {
        Project::with_manifest()
            .tmeta()
            .args([
                "metadata",
                "tests.toml",
                "--class",
                "CartTest",
                "--method",
                "testTotal",
            ])
            .assert()
            .success()
            .stdout(
                "group(checkout)\n\
                 group(small)\n\
                 test\n\
                 depends_on_method(CartTest::testAdd)\n\
                 depends_on_method(StockTest::testReserve, deep clone)\n",
            );
    }

    #[test]
    fn kind_filter() {
        Project::with_manifest()
            .tmeta()
            .args([
                "metadata",
                "tests.toml",
                "--class",
                "CartTest",
                "--method",
                "testTotal",
                "--kind",
                "depends_on_method",
            ])
            .assert()
            .success()
            .stdout(predicate::str::contains("group").not())
            .stdout(predicate::str::contains("CartTest::testAdd"));
    }

    #[test]
    fn json_output_is_tagged() {
        let output = Project::with_manifest()
            .tmeta()
            .args(["metadata", "tests.toml", "--class", "CartTest", "--json"])
            .output()
            .unwrap();
        assert!(output.status.success());

        let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(
            value,
            serde_json::json!([
                { "kind": "group", "name": "checkout" },
                { "kind": "group", "name": "small" },
            ])
        );
    }

    #[test]
    fn json_manifest_accepted() {
        let project = Project::new();
        project.write(
            "tests.json",
            r#"{"class": [{"name": "A", "declarations": [{"name": "testmeta::Large"}]}]}"#,
        );

        project
            .tmeta()
            .args(["metadata", "tests.json", "--class", "A"])
            .assert()
            .success()
            .stdout("group(large)\n");
    }

    #[test]
    fn unknown_class_fails() {
        Project::with_manifest()
            .tmeta()
            .args(["metadata", "tests.toml", "--class", "Nope"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("unknown class 'Nope'"));
    }

    #[test]
    fn malformed_test_data_fails() {
        Project::with_manifest()
            .tmeta()
            .args([
                "metadata",
                "tests.toml",
                "--class",
                "CartTest",
                "--method",
                "testBroken",
            ])
            .assert()
            .failure()
            .stderr(predicate::str::contains("malformed test data"));
    }

    #[test]
    fn missing_manifest_fails() {
        Project::new()
            .tmeta()
            .args(["metadata", "--class", "CartTest"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("No manifest given"));
    }

    #[test]
    fn configured_manifest_and_namespace() {
        let project = Project::new();
        project.write(
            "suite/declarations.toml",
            r#"
            [[class]]
            name = "A"
            declarations = [
                { name = "acme::Group", args = ["ours"] },
                { name = "testmeta::Group", args = ["default"] },
            ]
            "#,
        );
        project.write(
            ".testmeta/config.toml",
            r#"
            namespace = "acme::"
            manifest = "suite/declarations.toml"
            "#,
        );

        project
            .tmeta()
            .args(["metadata", "--class", "A"])
            .assert()
            .success()
            .stdout("group(ours)\n");
    }

    #[test]
    fn cwd_flag_changes_project() {
        let project = Project::with_manifest();
        Command::cargo_bin("tmeta")
            .unwrap()
            .env("HOME", project.path().join("home"))
            .env_remove("TESTMETA_CONFIG")
            .env_remove("XDG_CONFIG_HOME")
            .arg("--cwd")
            .arg(project.path())
            .args(["metadata", "tests.toml", "--class", "CartTest"])
            .assert()
            .success()
            .stdout(predicate::str::contains("group(checkout)"));
    }
}

// =============================================================================
// deps
// =============================================================================

mod deps {
    use super::*;

    #[test]
    fn declared_dependencies() {
        Project::with_manifest()
            .tmeta()
            .args(["deps", "tests.toml", "--class", "CartTest", "--method", "testTotal"])
            .assert()
            .success()
            .stdout("CartTest::testAdd\nStockTest::testReserve (deep clone)\n");
    }

    #[test]
    fn annotations_merge_first_seen_wins() {
        Project::with_manifest()
            .tmeta()
            .args([
                "deps",
                "tests.toml",
                "--class",
                "CartTest",
                "--method",
                "testTotal",
                "--annotation",
                "shallowClone testAdd",
                "--annotation",
                "clone Inventory::class",
                "--annotation",
                "",
            ])
            .assert()
            .success()
            .stdout(
                "CartTest::testAdd\n\
                 StockTest::testReserve (deep clone)\n\
                 Inventory::class (deep clone)\n",
            );
    }

    #[test]
    fn passed_targets_removed() {
        Project::with_manifest()
            .tmeta()
            .args([
                "deps",
                "tests.toml",
                "--class",
                "CartTest",
                "--method",
                "testTotal",
                "--passed",
                "CartTest::testAdd",
            ])
            .assert()
            .success()
            .stdout("StockTest::testReserve (deep clone)\n");
    }

    #[test]
    fn nothing_outstanding_prints_nothing() {
        Project::with_manifest()
            .tmeta()
            .args([
                "deps",
                "tests.toml",
                "--class",
                "CartTest",
                "--method",
                "testAdd",
            ])
            .assert()
            .success()
            .stdout("");
    }

    #[test]
    fn json_output() {
        let output = Project::with_manifest()
            .tmeta()
            .args([
                "deps",
                "tests.toml",
                "--class",
                "CartTest",
                "--method",
                "testTotal",
                "--json",
            ])
            .output()
            .unwrap();
        assert!(output.status.success());

        let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(
            value,
            serde_json::json!([
                { "target": "CartTest::testAdd", "clone_mode": "none" },
                { "target": "StockTest::testReserve", "clone_mode": "deep" },
            ])
        );
    }

    #[test]
    fn configured_json_format() {
        let project = Project::with_manifest();
        project.write("home/.config/testmeta/config.toml", r#"format = "json""#);

        project
            .tmeta()
            .args(["deps", "tests.toml", "--class", "CartTest", "--method", "testAdd"])
            .assert()
            .success()
            .stdout("[]\n");
    }
}

// =============================================================================
// config
// =============================================================================

mod config {
    use super::*;

    #[test]
    fn defaults() {
        Project::new()
            .tmeta()
            .arg("config")
            .assert()
            .success()
            .stdout(predicate::str::contains("namespace = testmeta::"))
            .stdout(predicate::str::contains("format = text"))
            .stdout(predicate::str::contains("manifest = (not set)"));
    }

    #[test]
    fn explicit_global_file() {
        let project = Project::new();
        project.write("elsewhere.toml", r#"format = "json""#);

        project
            .tmeta()
            .env("TESTMETA_CONFIG", project.path().join("elsewhere.toml"))
            .arg("config")
            .assert()
            .success()
            .stdout(predicate::str::contains("format = json"))
            .stdout(predicate::str::contains("elsewhere.toml"));
    }

    #[test]
    fn compat_location_warns() {
        let project = Project::new();
        project.write("testmeta.toml", r#"namespace = "acme::""#);

        project
            .tmeta()
            .arg("config")
            .assert()
            .success()
            .stdout(predicate::str::contains("namespace = acme::"))
            .stderr(predicate::str::contains("deprecated"));
    }

    #[test]
    fn quiet_hides_compat_warning() {
        let project = Project::new();
        project.write("testmeta.toml", r#"namespace = "acme::""#);

        project
            .tmeta()
            .args(["config", "-q"])
            .assert()
            .success()
            .stderr(predicate::str::is_empty());
    }

    #[test]
    fn unknown_key_fails() {
        let project = Project::new();
        project.write(".testmeta/config.toml", "colour = true\n");

        project
            .tmeta()
            .arg("config")
            .assert()
            .failure()
            .stderr(predicate::str::contains("Failed to load configuration"));
    }
}
