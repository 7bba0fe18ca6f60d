//! End-to-end tests for the `kiln` binary.

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn kiln(cwd: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("kiln").unwrap();
    cmd.current_dir(cwd.path())
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn version_flag_prints_version() {
    let dir = TempDir::new().unwrap();
    kiln(&dir)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn dry_run_prints_tree_and_writes_nothing() {
    let dir = TempDir::new().unwrap();
    kiln(&dir)
        .args(["new", "my-app", "--framework", "react", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("my-app/"))
        .stdout(predicate::str::contains("package.json"))
        .stdout(predicate::str::contains("main.tsx"))
        .stdout(predicate::str::contains(" files"));

    assert!(!dir.path().join("my-app").exists());
}

#[test]
fn dry_run_json_lists_files() {
    let dir = TempDir::new().unwrap();
    let assert = kiln(&dir)
        .args(["--output-format", "json", "new", "web", "-f", "vue", "--dry-run"])
        .assert()
        .success();

    let doc: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    assert_eq!(doc["mode"], "dry-run");
    assert_eq!(doc["framework"], "vue");
    let tree = doc["tree"].as_array().unwrap();
    assert!(tree.iter().any(|p| p == "package.json"));
    assert_eq!(doc["files"].as_u64().unwrap() as usize, tree.len());
}

#[test]
fn invalid_project_name_exits_with_user_error() {
    let dir = TempDir::new().unwrap();
    kiln(&dir)
        .args(["new", "bad name", "--dry-run"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("invalid project name"));
}

#[test]
fn unknown_framework_is_rejected() {
    let dir = TempDir::new().unwrap();
    kiln(&dir)
        .args(["new", "app", "--framework", "ember", "--dry-run"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("unknown framework"));
}

#[test]
fn mismatched_state_library_is_rejected() {
    let dir = TempDir::new().unwrap();
    kiln(&dir)
        .args(["new", "app", "-f", "react", "--state", "pinia", "--dry-run"])
        .assert()
        .code(2);
}

#[test]
fn unsupported_meta_option_fails_before_any_command() {
    let dir = TempDir::new().unwrap();
    kiln(&dir)
        .args(["new", "site", "-f", "astro", "--styling", "css-modules", "--dry-run"])
        .assert()
        .code(2)
        .stdout(predicate::str::contains("would run").not())
        .stderr(predicate::str::contains("css-modules"));
}

#[test]
fn meta_dry_run_shows_scaffolder_command() {
    let dir = TempDir::new().unwrap();
    kiln(&dir)
        .args(["new", "shop", "-f", "nextjs", "-p", "pnpm", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("would run: pnpm dlx create-next-app@latest shop"))
        .stdout(predicate::str::contains("--use-pnpm"));

    assert!(!dir.path().join("shop").exists());
}

#[test]
fn meta_dry_run_json_lists_commands() {
    let dir = TempDir::new().unwrap();
    let assert = kiln(&dir)
        .args(["--output-format", "json", "new", "site", "-f", "astro", "--dry-run"])
        .assert()
        .success();

    let doc: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    assert_eq!(doc["mode"], "dry-run");
    let commands = doc["commands"].as_array().unwrap();
    assert_eq!(commands.len(), 1);
    assert!(commands[0].as_str().unwrap().starts_with("npm create astro@latest site"));
    assert!(!dir.path().join("site").exists());
}

#[test]
fn no_color_accepts_conventional_values() {
    let dir = TempDir::new().unwrap();
    for value in ["1", "true", "yes"] {
        kiln(&dir)
            .env("NO_COLOR", value)
            .args(["new", "app", "-f", "react", "--dry-run"])
            .assert()
            .success()
            .stdout(predicate::str::contains("\u{1b}[").not());
    }
}

#[test]
fn non_empty_directory_is_refused_without_here() {
    let dir = TempDir::new().unwrap();
    fs::create_dir(dir.path().join("app")).unwrap();
    fs::write(dir.path().join("app").join("notes.txt"), "keep").unwrap();

    kiln(&dir)
        .args(["new", "app", "--dry-run"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("already exists"));

    kiln(&dir)
        .args(["new", "app", "--dry-run", "--here"])
        .assert()
        .success();
}

#[test]
fn config_file_defaults_apply() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("kiln.toml");
    fs::write(&config, "[defaults]\nframework = \"svelte\"\nlanguage = \"javascript\"\n").unwrap();

    kiln(&dir)
        .arg("--config")
        .arg(&config)
        .args(["new", "app", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("App.svelte"))
        .stdout(predicate::str::contains("tsconfig.json").not());
}

#[test]
fn missing_config_file_is_a_configuration_error() {
    let dir = TempDir::new().unwrap();
    kiln(&dir)
        .args(["--config", "nope.toml", "frameworks"])
        .assert()
        .code(4);
}

#[test]
fn frameworks_list_names_every_framework() {
    let dir = TempDir::new().unwrap();
    kiln(&dir)
        .args(["frameworks", "--format", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("react"))
        .stdout(predicate::str::contains("sveltekit"));
}

#[test]
fn frameworks_json_marks_meta_frameworks() {
    let dir = TempDir::new().unwrap();
    let assert = kiln(&dir)
        .args(["frameworks", "--format", "json"])
        .assert()
        .success();

    let rows: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 9);
    let astro = rows.iter().find(|r| r["name"] == "astro").unwrap();
    assert_eq!(astro["meta"], true);
    let react = rows.iter().find(|r| r["name"] == "react").unwrap();
    assert_eq!(react["meta"], false);
}

#[test]
fn config_get_prints_bare_value() {
    let dir = TempDir::new().unwrap();
    kiln(&dir)
        .args(["config", "get", "defaults.framework"])
        .assert()
        .success()
        .stdout("react\n");
}

#[test]
fn init_writes_loadable_config() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("kiln.toml");

    kiln(&dir).arg("--config").arg(&path).arg("init").assert().success();
    assert!(fs::read_to_string(&path).unwrap().contains("[defaults]"));

    kiln(&dir)
        .arg("--config")
        .arg(&path)
        .args(["config", "get", "generation.timeout_secs"])
        .assert()
        .success()
        .stdout("120\n");
}

#[test]
fn bash_completions_mention_binary() {
    let dir = TempDir::new().unwrap();
    kiln(&dir)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("kiln"));
}
