//! Tests for field classification and payload screening.

use super::*;
use rstest::rstest;
use serde_json::json;

#[rstest]
#[case(ResourceKind::Post, "author", Some(FieldRule::ServerAssigned))]
#[case(ResourceKind::Post, "pub_date", Some(FieldRule::ServerAssigned))]
#[case(ResourceKind::Post, "group", Some(FieldRule::Writable))]
#[case(ResourceKind::Comment, "post", Some(FieldRule::ReadOnly))]
#[case(ResourceKind::Comment, "created", Some(FieldRule::ServerAssigned))]
#[case(ResourceKind::Group, "slug", Some(FieldRule::ReadOnly))]
#[case(ResourceKind::Group, "text", None)]
fn rule_lookup(#[case] kind: ResourceKind, #[case] name: &str, #[case] expected: Option<FieldRule>) {
    assert_eq!(rule_for(kind, name), expected);
}

#[rstest]
fn every_schema_has_a_server_assigned_id() {
    for kind in [ResourceKind::Group, ResourceKind::Post, ResourceKind::Comment] {
        assert_eq!(rule_for(kind, "id"), Some(FieldRule::ServerAssigned));
    }
}

#[rstest]
#[case(WriteMode::Create)]
#[case(WriteMode::Replace)]
fn text_is_required_for_full_writes(#[case] mode: WriteMode) {
    let errors = parse_post(&json!({}), mode).expect_err("text is required");
    assert_eq!(errors.get("text"), Some(&[REQUIRED.to_owned()][..]));
}

#[rstest]
fn partial_write_may_omit_everything() {
    let input = parse_post(&json!({}), WriteMode::Partial).expect("empty patch is valid");
    assert_eq!(
        input,
        PostInput {
            text: None,
            group: None
        }
    );
}

#[rstest]
#[case(json!({ "text": {} }), NOT_STRING)]
#[case(json!({ "text": ["a"] }), NOT_STRING)]
#[case(json!({ "text": 42 }), NOT_STRING)]
#[case(json!({ "text": null }), NOT_NULL)]
#[case(json!({ "text": "   " }), NOT_BLANK)]
fn text_must_be_a_non_blank_string(#[case] payload: Value, #[case] message: &str) {
    let errors = parse_comment(&payload, WriteMode::Partial).expect_err("invalid text");
    assert_eq!(errors.get("text"), Some(&[message.to_owned()][..]));
}

#[rstest]
fn text_is_trimmed() {
    let input = parse_comment(&json!({ "text": "  hi  " }), WriteMode::Create).expect("valid");
    assert_eq!(input.text.as_deref(), Some("hi"));
}

#[rstest]
fn server_assigned_fields_are_dropped() {
    let input = parse_post(
        &json!({ "text": "x", "id": 99, "author": "mallory", "pub_date": "1999-01-01" }),
        WriteMode::Create,
    )
    .expect("server-assigned fields do not fail validation");
    assert_eq!(input.text.as_deref(), Some("x"));
}

#[rstest]
fn comment_post_field_is_rejected_as_read_only() {
    let errors = parse_comment(&json!({ "text": "x", "post": 5 }), WriteMode::Create)
        .expect_err("post is read-only");
    assert_eq!(errors.get("post"), Some(&[READ_ONLY.to_owned()][..]));
    assert!(errors.get("text").is_none());
}

#[rstest]
fn all_errors_are_reported_together() {
    let errors = parse_comment(&json!({ "post": 5 }), WriteMode::Create).expect_err("invalid");
    assert!(errors.get("post").is_some());
    assert!(errors.get("text").is_some());
}

#[rstest]
#[case(json!([]))]
#[case(json!("text"))]
#[case(json!(null))]
fn non_object_payloads_are_rejected(#[case] payload: Value) {
    let errors = parse_post(&payload, WriteMode::Create).expect_err("not an object");
    assert_eq!(errors.get(NON_FIELD_ERRORS), Some(&[NOT_OBJECT.to_owned()][..]));
}

#[rstest]
#[case(json!({ "text": "x", "group": 3 }), WriteMode::Create, Some(Some(GroupId::new(3))))]
#[case(json!({ "text": "x", "group": "3" }), WriteMode::Create, Some(Some(GroupId::new(3))))]
#[case(json!({ "text": "x", "group": null }), WriteMode::Partial, Some(None))]
#[case(json!({ "text": "x", "group": "" }), WriteMode::Replace, Some(None))]
#[case(json!({ "text": "x" }), WriteMode::Replace, Some(None))]
#[case(json!({ "text": "x" }), WriteMode::Partial, None)]
fn group_reference_parsing(
    #[case] payload: Value,
    #[case] mode: WriteMode,
    #[case] expected: Option<Option<GroupId>>,
) {
    let input = parse_post(&payload, mode).expect("valid payload");
    assert_eq!(input.group, expected);
}

#[rstest]
#[case(json!({ "text": "x", "group": 1.5 }), "float")]
#[case(json!({ "text": "x", "group": "abc" }), "str")]
#[case(json!({ "text": "x", "group": {} }), "dict")]
#[case(json!({ "text": "x", "group": true }), "bool")]
fn group_reference_type_errors(#[case] payload: Value, #[case] received: &str) {
    let errors = parse_post(&payload, WriteMode::Create).expect_err("bad group");
    let expected = format!("Incorrect type. Expected pk value, received {received}.");
    assert_eq!(errors.get("group"), Some(&[expected][..]));
}

#[rstest]
fn field_errors_convert_to_invalid_request() {
    let error = Error::from(FieldErrors::single("text", REQUIRED));
    assert_eq!(error.code(), crate::domain::ErrorCode::InvalidRequest);
    assert_eq!(
        error.details(),
        Some(&json!({ "fields": { "text": [REQUIRED] } }))
    );
}
