//! Integration tests for the `check` command.

mod common;

use std::process::Command;

use common::{AMBIGUOUS_CONFIG, BASIC_CONFIG, TestFixture};
use predicates::prelude::*;

// =============================================================================
// Decisions
// =============================================================================

#[test]
fn check_passes_when_headers_match() {
    let fixture = TestFixture::new();
    fixture.create_config(BASIC_CONFIG);
    fixture.create_licensed_java("src/A.java");
    fixture.create_file("notes.txt", "not governed by any rule\n");

    header_guard!()
        .current_dir(fixture.path())
        .args(["check"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Summary: 1 files checked, 1 matching, 0 missing, 0 stale, 0 unparseable, 0 errors",
        ));
}

#[test]
fn check_reports_missing_header() {
    let fixture = TestFixture::new();
    fixture.create_config(BASIC_CONFIG);
    fixture.create_licensed_java("src/A.java");
    fixture.create_file("src/B.java", "class B {}\n");

    header_guard!()
        .current_dir(fixture.path())
        .args(["check"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("MISSING: src/B.java"))
        .stdout(predicate::str::contains("src/A.java").not());
}

#[test]
fn check_reports_stale_years_without_writing() {
    let fixture = TestFixture::new();
    fixture.create_config(BASIC_CONFIG);
    let original =
        "/*\n * Copyright 2019 Example Corp\n *\n * Licensed under the MIT License.\n */\nclass A {}\n";
    fixture.create_file("A.java", original);

    header_guard!()
        .current_dir(fixture.path())
        .args(["check"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("STALE: A.java"))
        .stdout(predicate::str::contains("Outdated placeholder values"));

    assert_eq!(fixture.read_file("A.java"), original);
}

#[test]
fn check_reports_unterminated_comment_as_unparseable() {
    let fixture = TestFixture::new();
    fixture.create_config(BASIC_CONFIG);
    fixture.create_file("A.java", "/*\n * Copyright 2020 Example Corp\nclass A {}\n");

    header_guard!()
        .current_dir(fixture.path())
        .args(["check"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("UNPARSEABLE: A.java"));
}

#[test]
fn check_verbose_shows_expected_header() {
    let fixture = TestFixture::new();
    fixture.create_config(BASIC_CONFIG);
    fixture.create_file("B.java", "class B {}\n");

    header_guard!()
        .current_dir(fixture.path())
        .args(["check", "-vv"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Expected header:"))
        .stdout(predicate::str::contains("| Licensed under the MIT License."));
}

// =============================================================================
// Selection
// =============================================================================

#[test]
fn check_honors_exclude_patterns() {
    let fixture = TestFixture::new();
    fixture.create_config(BASIC_CONFIG);
    fixture.create_licensed_java("src/A.java");
    fixture.create_file("src/generated/Gen.java", "class Gen {}\n");

    header_guard!()
        .current_dir(fixture.path())
        .args(["check", "-x", "**/generated/**"])
        .assert()
        .success();
}

#[test]
fn check_only_given_paths() {
    let fixture = TestFixture::new();
    fixture.create_config(BASIC_CONFIG);
    fixture.create_licensed_java("src/A.java");
    fixture.create_file("other/B.java", "class B {}\n");

    header_guard!()
        .current_dir(fixture.path())
        .args(["check", "src"])
        .assert()
        .success();
}

#[test]
fn check_nonexistent_path_is_an_error() {
    let fixture = TestFixture::new();
    fixture.create_config(BASIC_CONFIG);

    header_guard!()
        .current_dir(fixture.path())
        .args(["check", "missing"])
        .assert()
        .code(2);
}

fn git(dir: &std::path::Path, args: &[&str]) {
    let status = Command::new("git")
        .current_dir(dir)
        .args(args)
        .status()
        .expect("git must be installed");
    assert!(status.success(), "git {args:?} failed");
}

#[test]
fn check_diff_only_reports_changed_files() {
    let fixture = TestFixture::new();
    let dir = fixture.path();
    git(dir, &["init", "-q"]);
    git(dir, &["config", "user.email", "test@example.com"]);
    git(dir, &["config", "user.name", "Test"]);
    git(dir, &["config", "commit.gpgsign", "false"]);

    fixture.create_config(BASIC_CONFIG);
    fixture.create_file("Old.java", "class Old {}\n");
    git(dir, &["add", "."]);
    git(dir, &["commit", "-q", "-m", "first"]);

    fixture.create_file("New.java", "class New {}\n");
    git(dir, &["add", "."]);
    git(dir, &["commit", "-q", "-m", "second"]);

    header_guard!()
        .current_dir(dir)
        .args(["check", "--diff", "HEAD~1"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("MISSING: New.java"))
        .stdout(predicate::str::contains("Old.java").not());
}

fn init_repo(dir: &std::path::Path) {
    git(dir, &["init", "-q"]);
    git(dir, &["config", "user.email", "test@example.com"]);
    git(dir, &["config", "user.name", "Test"]);
    git(dir, &["config", "commit.gpgsign", "false"]);
}

fn commit_all_in_year(dir: &std::path::Path, year: i32) {
    git(dir, &["add", "."]);
    let date = format!("{year}-03-01T10:00:00+00:00");
    let status = Command::new("git")
        .current_dir(dir)
        .args(["commit", "-q", "-m", "dated"])
        .env("GIT_AUTHOR_DATE", &date)
        .env("GIT_COMMITTER_DATE", &date)
        .status()
        .expect("git must be installed");
    assert!(status.success(), "dated commit failed");
}

const FILE_YEARS_CONFIG: &str = r#"
[[header]]
name = "MIT"
text = '''
#type YEARS YEAR_LENIENT_RANGE
#year_selection file
Copyright ${YEARS} Example Corp
'''

[[rule]]
name = "java"
include = ["**/*.java"]
"#;

#[test]
fn check_project_years_end_at_last_commit() {
    let fixture = TestFixture::new();
    let dir = fixture.path();
    init_repo(dir);

    fixture.create_config(BASIC_CONFIG);
    fixture.create_file(
        "A.java",
        "/*\n * Copyright 2020-2022 Example Corp\n *\n * Licensed under the MIT License.\n */\n\nclass A {}\n",
    );
    commit_all_in_year(dir, 2022);

    header_guard!()
        .current_dir(dir)
        .arg("check")
        .assert()
        .success();
}

#[test]
fn check_file_years_follow_commit_history() {
    let fixture = TestFixture::new();
    let dir = fixture.path();
    init_repo(dir);

    fixture.create_config(FILE_YEARS_CONFIG);
    fixture.create_file("Old.java", "/*\n * Copyright 2019 Example Corp\n */\n\nclass Old {}\n");
    fixture.create_file("Edited.java", "/*\n * Copyright 2019 Example Corp\n */\n\nclass Edited {}\n");
    commit_all_in_year(dir, 2019);
    fixture.create_file(
        "Edited.java",
        "/*\n * Copyright 2019 Example Corp\n */\n\nclass Edited { int x; }\n",
    );

    header_guard!()
        .current_dir(dir)
        .arg("check")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("STALE: Edited.java"))
        .stdout(predicate::str::contains("Old.java").not());
}

// =============================================================================
// Output
// =============================================================================

#[test]
fn check_json_output() {
    let fixture = TestFixture::new();
    fixture.create_config(BASIC_CONFIG);
    fixture.create_licensed_java("A.java");
    fixture.create_file("b.py", "print('b')\n");

    let output = header_guard!()
        .current_dir(fixture.path())
        .args(["check", "--format", "json"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["summary"]["files"], 2);
    assert_eq!(json["summary"]["matches"], 1);
    assert_eq!(json["summary"]["missing"], 1);
    assert_eq!(json["violations"][0]["path"], "b.py");
    assert_eq!(json["violations"][0]["rule"], "python");
    assert_eq!(json["violations"][0]["decision"], "missing");
}

#[test]
fn check_writes_report_to_file() {
    let fixture = TestFixture::new();
    fixture.create_config(BASIC_CONFIG);
    fixture.create_licensed_java("A.java");
    let report = fixture.path().join("out/report.txt");

    header_guard!()
        .current_dir(fixture.path())
        .args(["check", "-o", report.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let content = std::fs::read_to_string(report).unwrap();
    assert!(content.contains("1 matching"));
}

// =============================================================================
// Failures
// =============================================================================

#[test]
fn check_fails_on_ambiguous_rules() {
    let fixture = TestFixture::new();
    fixture.create_config(AMBIGUOUS_CONFIG);
    fixture.create_file("src/A.java", "class A {}\n");

    header_guard!()
        .current_dir(fixture.path())
        .args(["check"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Multiple rules match"));
}

#[test]
fn check_without_header_is_a_config_error() {
    let fixture = TestFixture::new();
    fixture.create_file("A.java", "class A {}\n");

    header_guard!()
        .current_dir(fixture.path())
        .args(["--no-config", "check"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("No license header configured"));
}

#[test]
fn check_rejects_unsupported_version() {
    let fixture = TestFixture::new();
    fixture.create_config("version = \"99\"\n");

    header_guard!()
        .current_dir(fixture.path())
        .args(["check"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Unsupported config version"));
}

