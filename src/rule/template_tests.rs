use super::*;

fn text(s: &str) -> RuleToken {
    RuleToken::Text(s.to_string())
}

fn var(s: &str) -> RuleToken {
    RuleToken::Var(s.to_string())
}

fn owned(lines: &[&str]) -> Vec<String> {
    lines.iter().map(|s| (*s).to_string()).collect()
}

fn context(creation_year: i32, last_modified_year: i32) -> HeaderFileContext {
    HeaderFileContext {
        file_name: "Main.java".to_string(),
        creation_year,
        last_modified_year,
    }
}

#[test]
fn parse_empty() {
    let rule = HeaderRule::parse("Test", &[]).unwrap();

    assert_eq!(rule.name(), "Test");
    assert!(rule.lines().is_empty());
    assert_eq!(rule.year_selection(), YearSelectionMode::Project);
}

#[test]
fn parse_single_simple() {
    let rule = HeaderRule::parse("Test", &["Test header."]).unwrap();

    assert_eq!(
        rule.lines(),
        &[HeaderLine {
            tokens: vec![text("Test header.")],
            optional: false,
        }]
    );
}

#[test]
fn parse_single_var() {
    let rule = HeaderRule::parse("Test", &["${CREATION_YEAR}"]).unwrap();

    assert_eq!(rule.lines()[0].tokens, vec![var("CREATION_YEAR")]);
}

#[test]
fn parse_escaped_var_keeps_backslash() {
    let rule = HeaderRule::parse("Test", &["\\${YEAR}"]).unwrap();

    assert_eq!(rule.lines()[0].tokens, vec![text("\\${YEAR}")]);
}

#[test]
fn escaped_var_renders_and_matches_verbatim() {
    let rule = HeaderRule::parse("Test", &["Use \\${NAME} here"]).unwrap();
    let line = vec!["Use \\${NAME} here".to_string()];

    assert!(rule.parse_header(&line).error.is_none());
    assert!(
        rule.parse_header(&["Use ${NAME} here".to_string()])
            .error
            .is_some()
    );
}

#[test]
fn parse_double_backslash_keeps_var() {
    let rule = HeaderRule::parse("Test", &["\\\\${FILE_NAME}"]).unwrap();

    assert_eq!(
        rule.lines()[0].tokens,
        vec![text("\\\\"), var("FILE_NAME")]
    );
}

#[test]
fn parse_adjacent_vars() {
    let rule = HeaderRule::parse(
        "Test",
        &["${YEAR}${CREATION_YEAR}", "#type YEAR YEAR_LENIENT_RANGE"],
    )
    .unwrap();

    assert_eq!(
        rule.lines()[0].tokens,
        vec![var("YEAR"), var("CREATION_YEAR")]
    );
}

#[test]
fn parse_text_around_var() {
    let rule = HeaderRule::parse("Test", &["Test header with ${CREATION_YEAR}."]).unwrap();

    assert_eq!(
        rule.lines()[0].tokens,
        vec![text("Test header with "), var("CREATION_YEAR"), text(".")]
    );
}

#[test]
fn parse_unclosed_placeholder_is_text() {
    let rule = HeaderRule::parse("Test", &["Cost: ${ 5"]).unwrap();

    assert_eq!(rule.lines()[0].tokens, vec![text("Cost: ${ 5")]);
}

#[test]
fn parse_year_selection_mode() {
    let rule = HeaderRule::parse("Test", &["#year_selection file"]).unwrap();

    assert!(rule.lines().is_empty());
    assert_eq!(rule.year_selection(), YearSelectionMode::File);
}

#[test]
fn parse_multi_with_optional_lines() {
    let rule = HeaderRule::parse(
        "Test",
        &[
            "",
            "Test header with ${CREATION_YEAR}.",
            "#optional",
            "",
            "Optional text.",
            "#end",
            "",
        ],
    )
    .unwrap();

    assert_eq!(
        rule.lines(),
        &[
            HeaderLine {
                tokens: vec![text("Test header with "), var("CREATION_YEAR"), text(".")],
                optional: false,
            },
            HeaderLine {
                tokens: vec![],
                optional: true,
            },
            HeaderLine {
                tokens: vec![text("Optional text.")],
                optional: true,
            },
        ]
    );
}

#[test]
fn parse_rejects_unknown_instruction() {
    let err = HeaderRule::parse("Test", &["Header", "#frobnicate"]).unwrap_err();

    assert_eq!(err.line, 1);
    assert_eq!(err.message, "Unknown instruction: \"frobnicate\".");
}

#[test]
fn parse_rejects_empty_instruction() {
    let err = HeaderRule::parse("Test", &["#"]).unwrap_err();

    assert_eq!(err.message, "No valid instructions could be found.");
}

#[test]
fn parse_rejects_unknown_type() {
    let err = HeaderRule::parse("Test", &["#type YEAR DECADE"]).unwrap_err();

    assert!(err.message.contains("DECADE"));
    assert!(err.message.contains("YEAR"));
}

#[test]
fn parse_rejects_malformed_type_instruction() {
    assert!(HeaderRule::parse("Test", &["#type YEAR"]).is_err());
}

#[test]
fn parse_rejects_bad_year_selection() {
    let err = HeaderRule::parse("Test", &["#year_selection galaxy"]).unwrap_err();
    assert!(err.message.contains("galaxy"));

    assert!(HeaderRule::parse("Test", &["#year_selection"]).is_err());
}

#[test]
fn parse_rejects_undeclared_variables() {
    let err = HeaderRule::parse("Test", &["${B} ${A}", "${A}"]).unwrap_err();

    assert_eq!(err.line, 0);
    assert_eq!(err.message, "Undeclared variables found: A, B.");
}

#[test]
fn parse_header_captures_variables() {
    let rule = HeaderRule::parse("Test", &["Copyright ${CREATION_YEAR} Someone"]).unwrap();
    let data = rule.parse_header(&owned(&["Copyright 2019 Someone"]));

    assert!(data.is_match());
    assert_eq!(
        data.variables.get("CREATION_YEAR"),
        Some(&VarValue::Year(2019))
    );
}

#[test]
fn parse_header_reports_text_difference() {
    let rule = HeaderRule::parse("Test", &["Copyright Someone"]).unwrap();
    let data = rule.parse_header(&owned(&["Copyright Nobody!"]));

    let error = data.error.unwrap();
    assert_eq!(error.line, 0);
    assert!(error.message.starts_with("Text differs at 0"));
}

#[test]
fn parse_header_reports_cut_short_line() {
    let rule = HeaderRule::parse("Test", &["Copyright Someone"]).unwrap();
    let data = rule.parse_header(&owned(&["Copyright"]));

    assert!(data.error.unwrap().message.contains("cut short"));
}

#[test]
fn parse_header_rejects_trailing_text() {
    let rule = HeaderRule::parse("Test", &["Licensed."]).unwrap();
    let data = rule.parse_header(&owned(&["Licensed. Or not."]));

    assert!(data.error.unwrap().message.contains("trailing text"));
}

#[test]
fn parse_header_rejects_extra_lines() {
    let rule = HeaderRule::parse("Test", &["Licensed."]).unwrap();
    let data = rule.parse_header(&owned(&["Licensed.", "Extra."]));

    let error = data.error.unwrap();
    assert_eq!(error.line, 1);
    assert!(error.message.contains("extra header lines"));
}

#[test]
fn parse_header_reports_missing_lines() {
    let rule = HeaderRule::parse("Test", &["One.", "Two.", "Three."]).unwrap();
    let data = rule.parse_header(&owned(&["One."]));

    let error = data.error.unwrap();
    assert_eq!(error.line, 1);
    assert_eq!(error.message, "Header is missing 2 expected line(s).");
}

#[test]
fn parse_header_rejects_diverging_values() {
    let rule = HeaderRule::parse("Test", &["${CREATION_YEAR}", "${CREATION_YEAR}"]).unwrap();

    assert!(rule.parse_header(&owned(&["2020", "2020"])).is_match());

    let data = rule.parse_header(&owned(&["2020", "2021"]));
    assert!(data.error.unwrap().message.contains("Diverging"));
}

#[test]
fn parse_header_skips_absent_optional_lines() {
    let rule = HeaderRule::parse(
        "Test",
        &["Header.", "#optional", "", "Optional text.", "#end", "Footer."],
    )
    .unwrap();

    let without = rule.parse_header(&owned(&["Header.", "Footer."]));
    assert!(without.is_match());
    assert!(without.present_optional_lines.is_empty());

    let with = rule.parse_header(&owned(&["Header.", "", "Optional text.", "Footer."]));
    assert!(with.is_match());
    assert_eq!(with.present_optional_lines.len(), 2);

    let partial = rule.parse_header(&owned(&["Header.", "Optional text.", "Footer."]));
    assert!(partial.is_match());
    assert!(partial.present_optional_lines.contains(&2));
    assert!(!partial.present_optional_lines.contains(&1));
}

#[test]
fn parse_header_failing_last_optional_line_is_an_error() {
    let rule = HeaderRule::parse("Test", &["Header.", "#optional", "Maybe."]).unwrap();
    let data = rule.parse_header(&owned(&["Header.", "Something else."]));

    assert!(!data.is_match());
}

#[test]
fn apply_without_data_renders_defaults() {
    let rule = HeaderRule::parse(
        "Test",
        &[
            "Copyright ${CREATION_YEAR} Someone",
            "#optional",
            "Optional text.",
            "#end",
            "File: ${FILE_NAME}",
        ],
    )
    .unwrap();

    let lines = rule.apply(&ParsedData::default(), &context(2021, 2024));

    assert_eq!(lines, owned(&["Copyright 2021 Someone", "File: Main.java"]));
}

#[test]
fn apply_keeps_creation_year_and_present_optional_lines() {
    let rule = HeaderRule::parse(
        "Test",
        &[
            "Copyright ${CREATION_YEAR} Someone",
            "#optional",
            "Optional text.",
            "#end",
        ],
    )
    .unwrap();
    let header = owned(&["Copyright 2003 Someone", "Optional text."]);
    let data = rule.parse_header(&header);

    assert_eq!(rule.apply(&data, &context(2021, 2024)), header);
}

#[test]
fn apply_extends_year_range() {
    let rule = HeaderRule::parse(
        "Test",
        &["#type YEARS YEAR_LENIENT_RANGE", "Copyright ${YEARS} Someone"],
    )
    .unwrap();
    let data = rule.parse_header(&owned(&["Copyright 2019 Someone"]));

    assert_eq!(
        rule.apply(&data, &context(2019, 2024)),
        owned(&["Copyright 2019-2024 Someone"])
    );
}

#[test]
fn apply_refreshes_file_name() {
    let rule = HeaderRule::parse("Test", &["File: ${FILE_NAME}"]).unwrap();
    let data = rule.parse_header(&owned(&["File: Old.java"]));

    assert!(data.is_match());
    assert_eq!(
        rule.apply(&data, &context(2024, 2024)),
        owned(&["File: Main.java"])
    );
}

#[test]
fn apply_trims_blank_edges() {
    let rule = HeaderRule::parse("Test", &["#optional", "Maybe.", "#end", "", "Body."]).unwrap();

    assert_eq!(
        rule.apply(&ParsedData::default(), &context(2024, 2024)),
        owned(&["Body."])
    );
}

#[test]
fn header_line_is_empty() {
    assert!(HeaderLine { tokens: vec![], optional: false }.is_empty());
    assert!(HeaderLine { tokens: vec![text("  ")], optional: true }.is_empty());
    assert!(!HeaderLine { tokens: vec![var("A")], optional: false }.is_empty());
}
