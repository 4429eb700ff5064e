//! CLI integration tests: exercise the binary end-to-end against a temp
//! tree with a YAML configuration.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const CONFIG: &str = "header: '// Copyright 2016 Acme Co.'\n";

fn go_license() -> Command {
  Command::cargo_bin("go-license").expect("binary should build")
}

fn setup_tree(root: &Path) {
  fs::create_dir_all(root.join("bar")).expect("create bar dir");
  fs::write(root.join("foo.go"), "package foo").expect("write foo.go");
  fs::write(root.join("bar/bar.go"), "// Original comment\npackage bar").expect("write bar.go");
  fs::write(root.join("notes.txt"), "not go").expect("write notes.txt");
  fs::write(root.join("license.yml"), CONFIG).expect("write config");
}

#[test]
fn test_apply_adds_headers_in_place() {
  let temp_dir = TempDir::new().expect("create temp dir");
  let root = temp_dir.path();
  setup_tree(root);

  go_license()
    .current_dir(root)
    .args(["--config", "license.yml", "."])
    .assert()
    .success();

  let foo = fs::read_to_string(root.join("foo.go")).expect("read foo.go");
  assert_eq!(foo, "// Copyright 2016 Acme Co.\npackage foo");

  let bar = fs::read_to_string(root.join("bar/bar.go")).expect("read bar.go");
  assert_eq!(bar, "// Copyright 2016 Acme Co.\n// Original comment\npackage bar");

  // Non-Go files are never touched.
  let notes = fs::read_to_string(root.join("notes.txt")).expect("read notes.txt");
  assert_eq!(notes, "not go");
}

#[test]
fn test_verify_fails_with_report_then_passes_after_apply() {
  let temp_dir = TempDir::new().expect("create temp dir");
  let root = temp_dir.path();
  setup_tree(root);

  go_license()
    .current_dir(root)
    .args(["--verify", "--config", "license.yml", "."])
    .assert()
    .failure()
    .stdout(
      predicate::str::contains("2 files do not have the correct license header:")
        .and(predicate::str::contains("\tbar/bar.go"))
        .and(predicate::str::contains("\tfoo.go")),
    );

  // Verify is read-only.
  let foo = fs::read_to_string(root.join("foo.go")).expect("read foo.go");
  assert_eq!(foo, "package foo");

  go_license()
    .current_dir(root)
    .args(["--config", "license.yml", "."])
    .assert()
    .success();

  go_license()
    .current_dir(root)
    .args(["--verify", "--config", "license.yml", "."])
    .assert()
    .success()
    .stdout(predicate::str::is_empty());
}

#[test]
fn test_remove_strips_headers() {
  let temp_dir = TempDir::new().expect("create temp dir");
  let root = temp_dir.path();
  setup_tree(root);
  fs::write(
    root.join("foo.go"),
    "// Copyright 2016 Acme Co.\npackage foo",
  )
  .expect("write foo.go");

  go_license()
    .current_dir(root)
    .args(["--remove", "--config", "license.yml", "."])
    .assert()
    .success();

  let foo = fs::read_to_string(root.join("foo.go")).expect("read foo.go");
  assert_eq!(foo, "package foo");
}

#[test]
fn test_verify_takes_precedence_over_remove() {
  let temp_dir = TempDir::new().expect("create temp dir");
  let root = temp_dir.path();
  setup_tree(root);
  let licensed = "// Copyright 2016 Acme Co.\npackage foo";
  fs::write(root.join("foo.go"), licensed).expect("write foo.go");
  fs::write(root.join("bar/bar.go"), "// Copyright 2016 Acme Co.\npackage bar").expect("write bar.go");

  go_license()
    .current_dir(root)
    .args(["--verify", "--remove", "--config", "license.yml", "."])
    .assert()
    .success();

  // Remove was suppressed: the header is still there.
  let foo = fs::read_to_string(root.join("foo.go")).expect("read foo.go");
  assert_eq!(foo, licensed);
}

#[test]
fn test_year_placeholder_round_trip() {
  let temp_dir = TempDir::new().expect("create temp dir");
  let root = temp_dir.path();
  fs::write(root.join("foo.go"), "package foo").expect("write foo.go");
  fs::write(root.join("license.yml"), "header: '// Copyright {{YEAR}} Acme Co.'\n").expect("write config");

  go_license()
    .current_dir(root)
    .args(["--config", "license.yml", "."])
    .assert()
    .success();

  go_license()
    .current_dir(root)
    .args(["--verify", "--config", "license.yml", "."])
    .assert()
    .success();
}

#[test]
fn test_custom_headers_and_exclude_from_config() {
  let temp_dir = TempDir::new().expect("create temp dir");
  let root = temp_dir.path();
  fs::create_dir_all(root.join("subproject")).expect("create subproject dir");
  fs::create_dir_all(root.join("vendor")).expect("create vendor dir");
  fs::write(root.join("main.go"), "package main").expect("write main.go");
  fs::write(root.join("subproject/sub.go"), "package sub").expect("write sub.go");
  fs::write(root.join("vendor/dep.go"), "package dep").expect("write dep.go");
  fs::write(
    root.join("license.yml"),
    concat!(
      "header: '// Copyright 2016 Acme Co.'\n",
      "custom-headers:\n",
      "  - name: subproject\n",
      "    header: '// Copyright 2016 Subproject Co.'\n",
      "    paths:\n",
      "      - subproject\n",
      "exclude:\n",
      "  names:\n",
      "    - vendor\n",
    ),
  )
  .expect("write config");

  go_license()
    .current_dir(root)
    .args(["--config", "license.yml", "."])
    .assert()
    .success();

  let main_go = fs::read_to_string(root.join("main.go")).expect("read main.go");
  assert_eq!(main_go, "// Copyright 2016 Acme Co.\npackage main");

  let sub = fs::read_to_string(root.join("subproject/sub.go")).expect("read sub.go");
  assert_eq!(sub, "// Copyright 2016 Subproject Co.\npackage sub");

  // Excluded directory is left alone.
  let dep = fs::read_to_string(root.join("vendor/dep.go")).expect("read dep.go");
  assert_eq!(dep, "package dep");
}

#[test]
fn test_invalid_config_aborts_before_touching_files() {
  let temp_dir = TempDir::new().expect("create temp dir");
  let root = temp_dir.path();
  fs::write(root.join("foo.go"), "package foo").expect("write foo.go");
  fs::write(
    root.join("license.yml"),
    concat!(
      "header: '// Copyright 2016 Acme Co.'\n",
      "custom-headers:\n",
      "  - name: a\n",
      "    header: '// H'\n",
      "    paths: [shared]\n",
      "  - name: b\n",
      "    header: '// H'\n",
      "    paths: [shared]\n",
    ),
  )
  .expect("write config");

  go_license()
    .current_dir(root)
    .args(["--config", "license.yml", "."])
    .assert()
    .failure()
    .stderr(predicate::str::contains(
      "the same path is defined by multiple custom header entries:",
    ));

  let foo = fs::read_to_string(root.join("foo.go")).expect("read foo.go");
  assert_eq!(foo, "package foo");
}

#[test]
fn test_missing_config_is_a_no_op() {
  let temp_dir = TempDir::new().expect("create temp dir");
  let root = temp_dir.path();
  fs::write(root.join("foo.go"), "package foo").expect("write foo.go");

  // No config file anywhere: empty configuration, nothing to check.
  go_license().current_dir(root).arg(".").assert().success();

  let foo = fs::read_to_string(root.join("foo.go")).expect("read foo.go");
  assert_eq!(foo, "package foo");
}
