use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

fn cmd() -> assert_cmd::Command {
    assert_cmd::Command::from(Command::new(env!("CARGO_BIN_EXE_jsdoc-defaults")))
}

fn fixture_path(name: &str) -> String {
    format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name)
}

/// Copy fixtures into a scratch directory so tests can modify them.
fn workspace(names: &[&str]) -> TempDir {
    let dir = TempDir::new().unwrap();
    for name in names {
        fs::copy(fixture_path(name), dir.path().join(name)).unwrap();
    }
    dir
}

fn path_arg(dir: &Path, name: &str) -> String {
    dir.join(name).to_string_lossy().into_owned()
}

fn target_args(dir: &Path) -> Vec<String> {
    vec![
        "--file".into(),
        path_arg(dir, "options.d.ts"),
        "--interface".into(),
        "Options".into(),
        "--defaults".into(),
        path_arg(dir, "defaults.json"),
        "--export".into(),
        "options".into(),
    ]
}

// -- inject --

#[test]
fn inject_annotates_every_property() {
    let dir = workspace(&["options.d.ts", "defaults.json"]);

    cmd()
        .arg("inject")
        .args(target_args(dir.path()))
        .assert()
        .success()
        .stdout(predicate::str::contains("options.d.ts: 4 properties"));

    let out = fs::read_to_string(dir.path().join("options.d.ts")).unwrap();
    assert!(
        out.contains("  /**\n   * Port to listen on.\n   *\n   * @default 8080\n   */\n  port?: number;"),
        "port: {}",
        out
    );
    assert!(out.contains("  /**\n   * @default \"localhost\"\n   */\n  host?: string;"));
    assert!(out.contains("  /**\n   * @default true\n   */\n  verbose?: boolean;"));
    assert!(out.contains(
        "   * Files to serve, e.g. src/**\\/*.html\n   *\n   * @default [\"public/*.html\"]\n   * @deprecated use routes\n   */\n  include?: string[];"
    ));
    // Same member name in another interface stays untouched
    assert!(out.contains("export interface Other {\n  port?: number;\n}"));
}

#[test]
fn inject_is_idempotent() {
    let dir = workspace(&["options.d.ts", "defaults.json"]);

    cmd().arg("inject").args(target_args(dir.path())).assert().success();
    let first = fs::read_to_string(dir.path().join("options.d.ts")).unwrap();

    cmd()
        .arg("inject")
        .args(target_args(dir.path()))
        .assert()
        .success()
        .stdout(predicate::str::contains("updated").not());
    let second = fs::read_to_string(dir.path().join("options.d.ts")).unwrap();
    assert_eq!(first, second);
}

#[test]
fn inject_with_default_value_tag() {
    let dir = workspace(&["options.d.ts", "defaults.json"]);

    cmd()
        .arg("inject")
        .args(target_args(dir.path()))
        .args(["--tag", "defaultValue"])
        .assert()
        .success();

    let out = fs::read_to_string(dir.path().join("options.d.ts")).unwrap();
    assert!(out.contains("@defaultValue 8080"));
    assert!(!out.contains("@default false"));
    assert!(!out.contains("@default "));
}

#[test]
fn inject_rejects_unknown_tag() {
    let dir = workspace(&["options.d.ts", "defaults.json"]);

    cmd()
        .arg("inject")
        .args(target_args(dir.path()))
        .args(["--tag", "dflt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown tag"));
}

#[test]
fn dry_run_leaves_file_alone() {
    let dir = workspace(&["options.d.ts", "defaults.json"]);
    let before = fs::read_to_string(dir.path().join("options.d.ts")).unwrap();

    cmd()
        .arg("inject")
        .arg("--dry-run")
        .args(target_args(dir.path()))
        .assert()
        .success()
        .stdout(predicate::str::contains("would update"))
        .stdout(predicate::str::contains("@default \"localhost\""));

    let after = fs::read_to_string(dir.path().join("options.d.ts")).unwrap();
    assert_eq!(before, after);
}

#[test]
fn unknown_property_warns_and_strict_fails() {
    let dir = workspace(&["options.d.ts"]);
    fs::write(
        dir.path().join("defaults.json"),
        r#"{ "options": { "port": 1, "timeout": 30 } }"#,
    )
    .unwrap();

    cmd()
        .arg("inject")
        .args(target_args(dir.path()))
        .assert()
        .success()
        .stderr(predicate::str::contains("Options.timeout is not a property"));

    cmd()
        .arg("inject")
        .arg("--strict")
        .args(target_args(dir.path()))
        .assert()
        .failure()
        .stderr(predicate::str::contains("could not be placed"));
}

#[test]
fn toml_defaults_at_root() {
    let dir = workspace(&["documented.d.ts", "defaults.toml"]);

    cmd()
        .arg("check")
        .args(["--file", &path_arg(dir.path(), "documented.d.ts")])
        .args(["--interface", "Options"])
        .args(["--defaults", &path_arg(dir.path(), "defaults.toml")])
        .assert()
        .success()
        .stdout(predicate::str::contains("all defaults documented"));
}

// -- check --

#[test]
fn check_reports_mismatches() {
    let dir = workspace(&["options.d.ts", "defaults.json"]);

    cmd()
        .arg("check")
        .args(target_args(dir.path()))
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Options.port: expected 8080, found nothing",
        ))
        .stderr(predicate::str::contains(
            "Options.verbose: expected true, found false",
        ))
        .stderr(predicate::str::contains("4 default mismatch(es)"));
}

#[test]
fn check_passes_after_inject() {
    let dir = workspace(&["options.d.ts", "defaults.json"]);

    cmd().arg("inject").args(target_args(dir.path())).assert().success();
    cmd()
        .arg("check")
        .args(target_args(dir.path()))
        .assert()
        .success();
}

#[test]
fn check_does_not_modify() {
    let dir = workspace(&["options.d.ts", "defaults.json"]);
    let before = fs::read_to_string(dir.path().join("options.d.ts")).unwrap();

    cmd().arg("check").args(target_args(dir.path())).assert().failure();

    let after = fs::read_to_string(dir.path().join("options.d.ts")).unwrap();
    assert_eq!(before, after);
}

#[test]
fn check_missing_interface_fails() {
    let dir = workspace(&["options.d.ts", "defaults.json"]);

    cmd()
        .arg("check")
        .args(["--file", &path_arg(dir.path(), "options.d.ts")])
        .args(["--interface", "Missing"])
        .args(["--defaults", &path_arg(dir.path(), "defaults.json")])
        .args(["--export", "options"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("interface not found"));
}

// -- config --

#[test]
fn config_is_discovered_from_working_directory() {
    let dir = workspace(&["options.d.ts", "defaults.json"]);
    fs::write(
        dir.path().join("jsdoc-defaults.toml"),
        "[[target]]\nfiles = [\"*.d.ts\"]\ninterface = \"Options\"\ndefaults = \"defaults.json\"\nexport = \"options\"\n",
    )
    .unwrap();
    let nested: PathBuf = dir.path().join("src/deep");
    fs::create_dir_all(&nested).unwrap();

    cmd()
        .current_dir(&nested)
        .arg("inject")
        .assert()
        .success()
        .stdout(predicate::str::contains("updated"));

    cmd().current_dir(&nested).arg("check").assert().success();
}

#[test]
fn explicit_config_path() {
    let dir = workspace(&["options.d.ts", "defaults.json"]);
    let config = dir.path().join("custom.toml");
    fs::write(
        &config,
        "tag = \"defaultValue\"\n\n[[target]]\nfiles = [\"options.d.ts\"]\ninterface = \"Options\"\ndefaults = \"defaults.json\"\nexport = \"options\"\n",
    )
    .unwrap();

    cmd()
        .args(["--config", config.to_str().unwrap()])
        .arg("inject")
        .assert()
        .success();

    let out = fs::read_to_string(dir.path().join("options.d.ts")).unwrap();
    assert!(out.contains("@defaultValue \"localhost\""));
}

#[test]
fn no_targets_is_an_error() {
    let dir = TempDir::new().unwrap();
    cmd()
        .current_dir(dir.path())
        .arg("check")
        .assert()
        .failure();
}

#[test]
fn partial_flags_name_the_missing_one() {
    let dir = workspace(&["options.d.ts"]);
    cmd()
        .current_dir(dir.path())
        .arg("check")
        .args(["--file", "options.d.ts", "--interface", "Options"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--defaults"));
}

// -- preview --

#[test]
fn preview_interface_with_doc() {
    cmd()
        .arg("preview")
        .args(["--file", &fixture_path("options.d.ts")])
        .args(["--type", "Options"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "/**\n * Options accepted by the server.\n */\nexport interface Options {",
        ))
        .stdout(predicate::str::contains("include?: string[];\n}"))
        .stdout(predicate::str::contains("interface Other").not());
}

#[test]
fn preview_without_doc() {
    cmd()
        .arg("preview")
        .args(["--file", &fixture_path("options.d.ts")])
        .args(["--type", "Options", "--no-jsdoc"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("export interface Options {"));
}

#[test]
fn preview_type_alias() {
    cmd()
        .arg("preview")
        .args(["--file", &fixture_path("options.d.ts")])
        .args(["--type", "config.Mode"])
        .assert()
        .success()
        .stdout("export type Mode = 'dev' | 'prod';\n");
}

#[test]
fn preview_unknown_type() {
    cmd()
        .arg("preview")
        .args(["--file", &fixture_path("options.d.ts")])
        .args(["--type", "Nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("declaration Nope not found"));
}

#[test]
fn preview_missing_file() {
    cmd()
        .arg("preview")
        .args(["--file", "/nonexistent/options.d.ts", "--type", "Options"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read"));
}
