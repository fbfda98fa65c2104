//! Command-line tests for the gitwalk binary


use assert_cmd::Command;
use harness::{TestTree, run_gitwalk};
use predicates::prelude::*;

fn gitwalk(tree: &TestTree) -> Command {
    let mut cmd = Command::cargo_bin("gitwalk").unwrap();
    cmd.current_dir(tree.path()).env("NO_COLOR", "1");
    cmd
}

fn sample() -> TestTree {
    let tree = TestTree::new();
    tree.add_gitignore("", "*.tmp\n!keep.tmp\nbuild/\n");
    tree.add_file("a.tmp", "");
    tree.add_file("keep.tmp", "");
    tree.add_file("sub/b.tmp", "");
    tree.add_file("sub/main.rs", "");
    tree.add_file("build/out.bin", "");
    tree
}

#[test]
fn test_lists_surviving_files() {
    let tree = sample();
    gitwalk(&tree)
        .assert()
        .success()
        .stdout(predicate::str::contains("keep.tmp"))
        .stdout(predicate::str::contains("main.rs"))
        .stdout(predicate::str::contains("a.tmp").not())
        .stdout(predicate::str::contains("b.tmp").not())
        .stdout(predicate::str::contains("out.bin").not());
}

#[test]
fn test_sequential_and_parallel_output_match() {
    let tree = sample();
    let (sequential, _, ok) = run_gitwalk(tree.path(), &["-j", "1"]);
    assert!(ok);
    let (parallel, _, ok) = run_gitwalk(tree.path(), &["-j", "4"]);
    assert!(ok);
    assert_eq!(sequential, parallel);
}

#[test]
fn test_dirs_flag() {
    let tree = sample();
    gitwalk(&tree)
        .arg("--dirs")
        .assert()
        .success()
        .stdout(predicate::str::contains("sub/\n"))
        .stdout(predicate::str::contains("build/").not());
}

#[test]
fn test_extra_ignore_patterns() {
    let tree = sample();
    gitwalk(&tree)
        .args(["-I", "*.rs", "--ignore", ".gitignore"])
        .assert()
        .success()
        .stdout(predicate::str::contains("main.rs").not())
        .stdout(predicate::str::contains(".gitignore").not())
        .stdout(predicate::str::contains("keep.tmp"));
}

#[test]
fn test_level_limits_depth() {
    let tree = sample();
    gitwalk(&tree)
        .args(["-L", "0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("keep.tmp"))
        .stdout(predicate::str::contains("main.rs").not());
}

#[test]
fn test_custom_ignore_file() {
    let tree = TestTree::new();
    tree.add_file(".walkignore", "*.md\n");
    tree.add_file("README.md", "");
    tree.add_file("lib.rs", "");

    gitwalk(&tree)
        .args(["--ignore-file", ".walkignore"])
        .assert()
        .success()
        .stdout(predicate::str::contains("lib.rs"))
        .stdout(predicate::str::contains("README.md").not());
}

#[test]
fn test_json_lines() {
    let tree = sample();
    let output = gitwalk(&tree).args(["--json", "-j", "1"]).output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<serde_json::Value> = stdout
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["dirnames"], serde_json::json!(["sub"]));
    assert_eq!(
        lines[0]["filenames"],
        serde_json::json!([".gitignore", "keep.tmp"])
    );
    assert_eq!(lines[1]["filenames"], serde_json::json!(["main.rs"]));
}

#[test]
fn test_bottom_up_json_order() {
    let tree = sample();
    let output = gitwalk(&tree)
        .args(["--json", "--bottom-up"])
        .output()
        .unwrap();
    let stdout = String::from_utf8(output.stdout).unwrap();
    let first: serde_json::Value = serde_json::from_str(stdout.lines().next().unwrap()).unwrap();
    assert!(first["dirpath"].as_str().unwrap().ends_with("sub"));
}

#[test]
fn test_missing_root_fails() {
    let tree = TestTree::new();
    gitwalk(&tree)
        .arg("does-not-exist")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("does-not-exist"));
}

#[test]
fn test_missing_root_fails_sequential() {
    let tree = TestTree::new();
    gitwalk(&tree)
        .args(["-j", "1", "does-not-exist"])
        .assert()
        .failure()
        .code(1);
}

#[test]
fn test_check_reports_rule() {
    let tree = sample();
    gitwalk(&tree)
        .args(["--check", "a.tmp", "keep.tmp", "sub/main.rs", "build/out.bin"])
        .assert()
        .success()
        .stdout(predicate::str::contains(":1:*.tmp\ta.tmp"))
        .stdout(predicate::str::contains(":2:!keep.tmp\tkeep.tmp"))
        .stdout(predicate::str::contains("::\tsub/main.rs"))
        .stdout(predicate::str::contains(
            ":3:build/\tbuild/out.bin (inside ignored build/)",
        ));
}

#[test]
fn test_check_json() {
    let tree = sample();
    let output = gitwalk(&tree)
        .args(["--json", "--check", "build"])
        .output()
        .unwrap();
    let value: serde_json::Value =
        serde_json::from_str(String::from_utf8(output.stdout).unwrap().trim()).unwrap();
    assert_eq!(value["ignored"], true);
    assert_eq!(value["culprit"]["pattern"], "build/");
}

#[test]
fn test_color_never_has_no_escapes() {
    let tree = sample();
    gitwalk(&tree)
        .args(["--dirs", "--color", "never"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\x1b[").not());
}
