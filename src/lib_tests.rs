use super::*;

#[test]
fn exit_codes_are_distinct() {
    assert_ne!(EXIT_SUCCESS, EXIT_VIOLATIONS);
    assert_ne!(EXIT_SUCCESS, EXIT_CONFIG_ERROR);
    assert_ne!(EXIT_VIOLATIONS, EXIT_CONFIG_ERROR);
}

#[test]
fn errors_are_reexported() {
    let err: HeaderGuardError = HeaderGuardError::Config("bad".to_string());
    let result: Result<()> = Err(err);
    assert_eq!(result.unwrap_err().error_type(), "Config");
}
