use std::path::Path;

use super::*;
use tempfile::TempDir;

struct AcceptAllFilter;

impl FileFilter for AcceptAllFilter {
    fn should_include(&self, _path: &Path) -> bool {
        true
    }
}

struct JavaOnlyFilter;

impl FileFilter for JavaOnlyFilter {
    fn should_include(&self, path: &Path) -> bool {
        path.extension().is_some_and(|ext| ext == "java")
    }
}

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, content).unwrap();
}

#[test]
fn finds_files_in_subdirectories() {
    let temp_dir = TempDir::new().unwrap();
    write(temp_dir.path(), "A.java", "class A {}");
    write(temp_dir.path(), "src/b/B.java", "class B {}");

    let scanner = DirectoryScanner::new(AcceptAllFilter);
    let mut files = scanner.scan(temp_dir.path()).unwrap();
    files.sort();

    assert_eq!(files.len(), 2);
    assert!(files[0].ends_with("A.java"));
    assert!(files[1].ends_with("src/b/B.java"));
}

#[test]
fn respects_filter() {
    let temp_dir = TempDir::new().unwrap();
    write(temp_dir.path(), "A.java", "");
    write(temp_dir.path(), "notes.txt", "");

    let files = DirectoryScanner::new(JavaOnlyFilter)
        .scan(temp_dir.path())
        .unwrap();

    assert_eq!(files.len(), 1);
    assert!(files[0].ends_with("A.java"));
}

#[test]
fn never_descends_into_git_dir() {
    let temp_dir = TempDir::new().unwrap();
    write(temp_dir.path(), ".git/hooks/pre-commit.sh", "");
    write(temp_dir.path(), "run.sh", "");

    for use_gitignore in [false, true] {
        let scanner = DirectoryScanner::with_gitignore(AcceptAllFilter, use_gitignore);
        let files = scanner.scan(temp_dir.path()).unwrap();

        assert_eq!(files.len(), 1, "gitignore: {use_gitignore}");
        assert!(files[0].ends_with("run.sh"));
    }
}

#[test]
fn gitignore_is_honored_when_enabled() {
    let temp_dir = TempDir::new().unwrap();
    write(temp_dir.path(), ".gitignore", "build/\n");
    write(temp_dir.path(), "build/Gen.java", "");
    write(temp_dir.path(), "src/A.java", "");

    let with = DirectoryScanner::with_gitignore(JavaOnlyFilter, true)
        .scan(temp_dir.path())
        .unwrap();
    assert_eq!(with.len(), 1);
    assert!(with[0].ends_with("src/A.java"));

    let without = DirectoryScanner::with_gitignore(JavaOnlyFilter, false)
        .scan(temp_dir.path())
        .unwrap();
    assert_eq!(without.len(), 2);
}

#[test]
fn file_root_is_returned_directly() {
    let temp_dir = TempDir::new().unwrap();
    write(temp_dir.path(), "A.java", "");
    let file = temp_dir.path().join("A.java");

    let files = DirectoryScanner::new(AcceptAllFilter).scan(&file).unwrap();
    assert_eq!(files, vec![file.clone()]);

    let rejected = DirectoryScanner::new(JavaOnlyFilter)
        .scan(&temp_dir.path().join("missing.java"));
    assert!(matches!(rejected, Err(HeaderGuardError::FileRead { .. })));
}

#[test]
fn scan_all_sorts_and_dedups() {
    let temp_dir = TempDir::new().unwrap();
    write(temp_dir.path(), "b/B.java", "");
    write(temp_dir.path(), "a/A.java", "");

    let roots = vec![
        temp_dir.path().to_path_buf(),
        temp_dir.path().join("a/A.java"),
    ];
    let files = DirectoryScanner::new(JavaOnlyFilter).scan_all(&roots).unwrap();

    assert_eq!(files.len(), 2);
    assert!(files[0].ends_with("a/A.java"));
    assert!(files[1].ends_with("b/B.java"));
}
