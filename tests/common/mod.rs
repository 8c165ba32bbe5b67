#![allow(dead_code)]

use std::fs;
use std::path::Path;

use chrono::Datelike;
use tempfile::TempDir;

/// Creates an `assert_cmd` Command for the header-guard binary.
#[macro_export]
macro_rules! header_guard {
    () => {
        assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("header-guard"))
    };
}

/// One MIT header for Java (block comments) and Python (hash comments) files, with a
/// fixed project creation year.
pub const BASIC_CONFIG: &str = r#"
version = "1"

[project]
creation_year = 2020

[[header]]
name = "MIT"
text = '''
#type YEARS YEAR_LENIENT_RANGE
Copyright ${YEARS} Example Corp

Licensed under the MIT License.
'''

[[rule]]
name = "java"
include = ["**/*.java"]

[[rule]]
name = "python"
include = ["**/*.py"]
"#;

/// Two rules claiming every Java file under `src`.
pub const AMBIGUOUS_CONFIG: &str = r#"
[[header]]
name = "MIT"
text = "Licensed under the MIT License."

[[rule]]
name = "java"
include = ["**/*.java"]

[[rule]]
name = "sources"
include = ["src/**"]
format = "block"
"#;

pub fn current_year() -> i32 {
    chrono::Local::now().year()
}

/// The block comment `BASIC_CONFIG` expects in a Java file.
pub fn java_header() -> String {
    format!(
        "/*\n * Copyright 2020-{} Example Corp\n *\n * Licensed under the MIT License.\n */",
        current_year()
    )
}

/// The hash comment `BASIC_CONFIG` expects in a Python file.
pub fn python_header() -> String {
    format!(
        "# Copyright 2020-{} Example Corp\n#\n# Licensed under the MIT License.",
        current_year()
    )
}

/// Creates a temporary directory with test fixtures for integration tests.
pub struct TestFixture {
    pub dir: TempDir,
}

impl TestFixture {
    /// Creates a new test fixture with an empty temp directory.
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Creates a file with the given content in the temp directory.
    pub fn create_file(&self, relative_path: &str, content: &str) {
        let path = self.dir.path().join(relative_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        fs::write(&path, content).expect("Failed to write file");
    }

    /// Reads a file of the temp directory.
    pub fn read_file(&self, relative_path: &str) -> String {
        fs::read_to_string(self.dir.path().join(relative_path)).expect("Failed to read file")
    }

    /// Returns the path to the temp directory.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Creates a header-guard config file.
    pub fn create_config(&self, content: &str) {
        self.create_file(".header-guard.toml", content);
    }

    /// Creates a Java file that already carries the expected header.
    pub fn create_licensed_java(&self, relative_path: &str) {
        self.create_file(
            relative_path,
            &format!("{}\n\nclass A {{}}\n", java_header()),
        );
    }
}
