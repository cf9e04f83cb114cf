//! Integration tests for the rebound binary

mod common;

use assert_cmd::Command;
use common::{create_test_config, create_test_config_in_subdir, read_log};
use predicates::prelude::*;

const PROJECT: &str = r#"
parameters:
  version:
    required: true
tasks:
  lib:
    description: Build the library
    build: echo lib >> log.txt
    clean: echo "clean lib" >> log.txt
  app:
    build: echo "app ${version}" >> log.txt
    clean: echo "clean app" >> log.txt
    deps:
      lib: lib
      version: version
  docs:
    build: echo docs >> log.txt
    deps:
      lib: lib
  broken:
    build: exit 3
targets:
  app: app
  docs: docs
  everything: [app, docs]
  broken: [broken, docs]
"#;

fn rebound() -> Command {
    Command::cargo_bin("rebound").unwrap()
}

#[test]
fn test_build_runs_dependencies_first() {
    let (temp_dir, _config_path) = create_test_config(PROJECT);

    rebound()
        .current_dir(temp_dir.path())
        .args(["-p", "version=1.0", "build", "everything"])
        .assert()
        .success();

    assert_eq!(read_log(&temp_dir), "lib\napp 1.0\ndocs\n");
}

#[test]
fn test_explicit_build_file_from_another_directory() {
    let (temp_dir, config_path, sub_dir) = create_test_config_in_subdir(PROJECT);

    rebound()
        .current_dir(&sub_dir)
        .arg("-f")
        .arg(&config_path)
        .args(["-q", "build", "docs"])
        .assert()
        .success();

    assert_eq!(read_log(&temp_dir), "lib\ndocs\n");
}

#[test]
fn test_clean_runs_clean_commands() {
    let (temp_dir, _config_path) = create_test_config(PROJECT);

    rebound()
        .current_dir(temp_dir.path())
        .args(["-s", "-p", "version=1", "clean", "app"])
        .assert()
        .success();

    assert_eq!(read_log(&temp_dir), "clean lib\nclean app\n");
}

#[test]
fn test_no_target_prints_usage() {
    let (temp_dir, _config_path) = create_test_config(PROJECT);

    rebound()
        .current_dir(temp_dir.path())
        .arg("build")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("usage: rebound build|clean target-name"))
        .stdout(predicate::str::contains("targets:"))
        .stdout(predicate::str::contains("/version required"));
}

#[test]
fn test_list_targets() {
    let (temp_dir, _config_path) = create_test_config(PROJECT);

    rebound()
        .current_dir(temp_dir.path())
        .arg("--list")
        .assert()
        .success()
        .stdout(predicate::str::contains("  everything"))
        .stdout(predicate::str::contains("  docs"));
}

#[test]
fn test_unknown_target_is_an_error() {
    let (temp_dir, _config_path) = create_test_config(PROJECT);

    rebound()
        .current_dir(temp_dir.path())
        .args(["build", "nope"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Target 'nope' is not defined"))
        .stdout(predicate::str::contains("targets:"));
}

#[test]
fn test_missing_required_parameter() {
    let (temp_dir, _config_path) = create_test_config(PROJECT);

    rebound()
        .current_dir(temp_dir.path())
        .args(["build", "app"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Parameter 'version' is required"));

    assert_eq!(read_log(&temp_dir), "");
}

#[test]
fn test_unknown_command() {
    let (temp_dir, _config_path) = create_test_config(PROJECT);

    rebound()
        .current_dir(temp_dir.path())
        .args(["deploy", "docs"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("no such command deploy, try build or clean"));
}

#[test]
fn test_failing_target_stops_the_run() {
    let (temp_dir, _config_path) = create_test_config(PROJECT);

    rebound()
        .current_dir(temp_dir.path())
        .args(["build", "broken", "docs"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Task 'broken' failed"));

    assert_eq!(read_log(&temp_dir), "");
}

#[test]
fn test_dependency_cycle() {
    let yaml = r#"
tasks:
  a:
    build: echo a >> log.txt
    deps:
      next: b
  b:
    build: echo b >> log.txt
    deps:
      next: a
"#;
    let (temp_dir, _config_path) = create_test_config(yaml);

    rebound()
        .current_dir(temp_dir.path())
        .args(["build", "a"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Dependency cycle detected: a -> b -> a"));

    assert_eq!(read_log(&temp_dir), "");
}

#[test]
fn test_missing_build_file() {
    let temp_dir = tempfile::TempDir::new().unwrap();

    rebound()
        .current_dir(temp_dir.path())
        .arg("-f")
        .arg(temp_dir.path().join("absent.yml"))
        .args(["build", "app"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Error:"));
}
