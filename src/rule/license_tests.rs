use super::*;
use crate::rule::YearSelectionMode;

fn owned(lines: &[&str]) -> Vec<String> {
    lines.iter().map(|s| (*s).to_string()).collect()
}

fn facts() -> FileFacts {
    FileFacts {
        file_name: "App.kt".to_string(),
        created_year: Some(2021),
        modified_year: 2024,
    }
}

const PROJECT: ProjectYears = ProjectYears {
    creation_year: 2020,
    modified_year: 2025,
};

fn header() -> LicenseHeader {
    let mpl = HeaderRule::parse(
        "MPL",
        &[
            "Copyright ${CREATION_YEAR} Someone",
            "",
            "Licensed under the MPL.",
        ],
    )
    .unwrap();
    let legacy = HeaderRule::parse("Legacy", &["(c) ${CREATION_YEAR} Someone"]).unwrap();
    LicenseHeader::new(vec![mpl, legacy]).unwrap()
}

#[test]
fn new_rejects_empty_rules() {
    assert!(LicenseHeader::new(Vec::new()).is_err());
}

#[test]
fn default_rule_is_first() {
    assert_eq!(header().default_rule().name(), "MPL");
    assert_eq!(header().rules().len(), 2);
}

#[test]
fn validate_accepts_any_template() {
    let header = header();

    assert!(header.validate(&owned(&["(c) 2001 Someone"])).is_empty());

    let errors = header.validate(&owned(&["Nothing to see"]));
    assert_eq!(errors.len(), 2);
    assert_eq!(errors[0].0, "MPL");
    assert_eq!(errors[1].0, "Legacy");
}

#[test]
fn render_missing_uses_default_template() {
    let rendered = header().render(None, &facts(), &PROJECT);

    assert_eq!(rendered.template, "MPL");
    assert!(rendered.matched_template());
    assert_eq!(
        rendered.lines,
        owned(&["Copyright 2020 Someone", "", "Licensed under the MPL."])
    );
}

#[test]
fn render_keeps_matching_alternative() {
    let existing = owned(&["(c) 2001 Someone"]);
    let rendered = header().render(Some(&existing), &facts(), &PROJECT);

    assert_eq!(rendered.template, "Legacy");
    assert_eq!(rendered.lines, existing);
}

#[test]
fn render_falls_back_to_default_with_first_values() {
    let existing = owned(&["Copyright 2003 Someone", "", "Licensed under GPL."]);
    let rendered = header().render(Some(&existing), &facts(), &PROJECT);

    assert_eq!(rendered.template, "MPL");
    assert!(!rendered.matched_template());
    assert_eq!(rendered.mismatches.len(), 2);
    assert_eq!(
        rendered.lines,
        owned(&["Copyright 2003 Someone", "", "Licensed under the MPL."])
    );
}

#[test]
fn render_uses_template_year_selection() {
    let rule = HeaderRule::parse(
        "PerFile",
        &["#year_selection file", "Copyright ${CREATION_YEAR}"],
    )
    .unwrap();
    assert_eq!(rule.year_selection(), YearSelectionMode::File);

    let rendered = LicenseHeader::new(vec![rule])
        .unwrap()
        .render(None, &facts(), &PROJECT);

    assert_eq!(rendered.lines, owned(&["Copyright 2021"]));
}

#[test]
fn file_years_are_needed_only_for_file_templates() {
    assert!(!header().uses_file_years());

    let file = HeaderRule::parse(
        "Per-file",
        &["#year_selection file", "Copyright ${CREATION_YEAR} Someone"],
    )
    .unwrap();
    assert_eq!(file.year_selection(), YearSelectionMode::File);
    let mixed = LicenseHeader::new(vec![header().default_rule().clone(), file]).unwrap();
    assert!(mixed.uses_file_years());
}
