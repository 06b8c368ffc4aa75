use super::*;

/// Tests default mapping of a unique constraint violation.
///
/// Verifies that P2002 resolves through the default table when no user
/// mapping is configured.
///
/// Expected: Some(409 Conflict)
#[test]
fn maps_unique_violation_to_conflict_by_default() {
    let mapping = DatabaseErrorMapping::default();
    let err = KnownRequestError::new("P2002", raw_diagnostic("Unique constraint failed"));

    assert_eq!(mapping.status_code(&err), Some(StatusCode::CONFLICT));
}

/// Tests the full default code table.
///
/// Verifies the three default codes and that any other code is unmapped.
///
/// Expected: P2000 -> 400, P2025 -> 404, P2003 -> None
#[test]
fn reproduces_default_table() {
    let mapping = DatabaseErrorMapping::default();
    let status = |code: &str| mapping.status_code(&KnownRequestError::new(code, ""));

    assert_eq!(status("P2000"), Some(StatusCode::BAD_REQUEST));
    assert_eq!(status("P2025"), Some(StatusCode::NOT_FOUND));
    assert_eq!(status("P2003"), None);
}

/// Tests that a detailed user mapping overrides the default status.
///
/// Verifies that `{statusCode: 422}` for P2002 wins over the default 409.
///
/// Expected: Some(422 Unprocessable Entity)
#[test]
fn user_status_code_overrides_default() {
    let mapping = user_mapping(&[(
        "P2002",
        ErrorCodeMapping::Detailed {
            status_code: Some(422),
            error_message: None,
        },
    )]);
    let err = KnownRequestError::new("P2002", raw_diagnostic("Unique constraint failed"));

    assert_eq!(mapping.status_code(&err), Some(StatusCode::UNPROCESSABLE_ENTITY));
}

/// Tests a bare numeric user mapping.
///
/// Verifies that a number maps the code directly, including codes absent
/// from the default table.
///
/// Expected: Some(400 Bad Request) for P2003
#[test]
fn bare_status_maps_unknown_code() {
    let mapping = user_mapping(&[("P2003", ErrorCodeMapping::Status(400))]);

    assert_eq!(
        mapping.status_code(&KnownRequestError::new("P2003", "")),
        Some(StatusCode::BAD_REQUEST)
    );
}

/// Tests a detailed user mapping without a status for a defaulted code.
///
/// Verifies that a mapping carrying only `errorMessage` keeps the default
/// status and replaces the derived message.
///
/// Expected: 404 with the configured message
#[test]
fn error_message_override_keeps_default_status() {
    let mapping = user_mapping(&[(
        "P2025",
        ErrorCodeMapping::Detailed {
            status_code: None,
            error_message: Some("Nothing to update".to_string()),
        },
    )]);
    let err = KnownRequestError::new("P2025", raw_diagnostic("Record to update not found."));

    let http = mapping.resolve(&err).unwrap();

    assert_eq!(http.status, StatusCode::NOT_FOUND);
    assert_eq!(http.envelope_data(), ErrorMessage::One("Nothing to update".to_string()));
}

/// Tests resolution of a code absent from both mappings.
///
/// Verifies that the mapping declines to raise an HTTP error so the error
/// falls through to generic handling.
///
/// Expected: None
#[test]
fn unmapped_code_is_not_resolved() {
    let mapping = user_mapping(&[("P2002", ErrorCodeMapping::Status(422))]);
    let err = KnownRequestError::new("P9999", raw_diagnostic("Something else"));

    assert!(mapping.resolve(&err).is_none());
}

/// Tests resolution with a derived message.
///
/// Verifies that the resolved HTTP error carries a structured payload whose
/// status matches and whose message is derived from the diagnostic.
///
/// Expected: 409 with "[P2002]: Unique constraint failed"
#[test]
fn resolves_structured_http_error() {
    let mapping = DatabaseErrorMapping::default();
    let err = KnownRequestError::new("P2002", raw_diagnostic("Unique constraint failed"));

    let http = mapping.resolve(&err).unwrap();

    assert_eq!(
        http,
        HttpError::new(StatusCode::CONFLICT, "[P2002]: Unique constraint failed")
    );
}

/// Tests parsing of the user mapping from configuration JSON.
///
/// Verifies that bare numbers and detailed objects are both accepted.
///
/// Expected: Status(422) and Detailed with camelCase fields
#[test]
fn parses_user_mapping_json() {
    let parsed: ErrorCodesStatusMapping = serde_json::from_value(json!({
        "P2002": 422,
        "P2025": { "statusCode": 410, "errorMessage": "Gone" },
    }))
    .unwrap();

    assert_eq!(parsed["P2002"], ErrorCodeMapping::Status(422));
    assert_eq!(
        parsed["P2025"],
        ErrorCodeMapping::Detailed {
            status_code: Some(410),
            error_message: Some("Gone".to_string()),
        }
    );
}
