//! Tests for error construction and status classification.

use super::*;
use rstest::rstest;

#[rstest]
fn blank_messages_fall_back_to_code_default() {
    let err = Error::new(ErrorCode::NotFound, "   ");
    assert_eq!(err.message(), "record not found");
}

#[rstest]
fn invalid_request_constructor_sets_code() {
    let err = Error::invalid_request("name is required");
    assert_eq!(err.code(), ErrorCode::InvalidRequest);
    assert!(err.status().is_none());
}

#[rstest]
#[case(400, ErrorCode::InvalidRequest)]
#[case(401, ErrorCode::Unauthorized)]
#[case(403, ErrorCode::Forbidden)]
#[case(404, ErrorCode::NotFound)]
#[case(408, ErrorCode::Timeout)]
#[case(422, ErrorCode::InvalidRequest)]
#[case(500, ErrorCode::Transport)]
#[case(504, ErrorCode::Timeout)]
fn statuses_map_to_codes(#[case] status: u16, #[case] expected: ErrorCode) {
    let err = Error::from_status(status, "boom");
    assert_eq!(err.code(), expected);
    assert_eq!(err.status(), Some(status));
}

#[rstest]
#[case(200)]
#[case(204)]
fn success_statuses_do_not_classify(#[case] status: u16) {
    assert!(ErrorCode::from_status(status).is_none());
}

#[rstest]
fn serialises_code_in_snake_case() {
    let err = Error::unexpected_shape("missing rows").with_status(200);
    let value = serde_json::to_value(&err).expect("serialise error");
    assert_eq!(value["code"], "unexpected_shape");
    assert_eq!(value["status"], 200);
}
