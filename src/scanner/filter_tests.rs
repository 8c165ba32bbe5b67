use std::path::Path;

use super::*;

#[test]
fn empty_filter_accepts_all() {
    let filter = ExcludeFilter::new(&[]).unwrap();

    assert!(filter.should_include(Path::new("main.rs")));
    assert!(filter.should_include(Path::new("docs/readme.md")));
}

#[test]
fn excludes_directories() {
    let filter =
        ExcludeFilter::new(&["**/target/**".to_string(), "**/node_modules/**".to_string()])
            .unwrap();

    assert!(filter.should_include(Path::new("src/main.rs")));
    assert!(!filter.should_include(Path::new("target/debug/build.rs")));
    assert!(!filter.should_include(Path::new("/work/app/node_modules/x/index.js")));
}

#[test]
fn excludes_specific_files() {
    let filter = ExcludeFilter::new(&["**/*.generated.java".to_string()]).unwrap();

    assert!(filter.should_include(Path::new("src/Main.java")));
    assert!(!filter.should_include(Path::new("src/Api.generated.java")));
}

#[test]
fn invalid_pattern_is_an_error() {
    let result = ExcludeFilter::new(&["src/[".to_string()]);

    assert!(matches!(
        result,
        Err(HeaderGuardError::InvalidPattern { ref pattern, .. }) if pattern == "src/["
    ));
}
