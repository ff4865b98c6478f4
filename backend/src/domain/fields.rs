//! Per-resource field classification and write-payload validation.
//!
//! Every resource declares each wire field as server-assigned, read-only or
//! writable. The same table drives input screening (server-assigned keys are
//! dropped, read-only keys are rejected) and tells controllers which values
//! they must stamp themselves.

use std::collections::BTreeMap;

use serde_json::{Map, Value, json};
use tracing::debug;

use crate::domain::{Error, GroupId, ResourceKind};

/// How a wire field may be used on write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRule {
    /// Computed by the server; silently dropped when a client sends it.
    ServerAssigned,
    /// Rendered but never accepted; a write carrying it is rejected.
    ReadOnly,
    /// Accepted and validated on write.
    Writable,
}

/// One row of a resource's field table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub rule: FieldRule,
}

const fn field(name: &'static str, rule: FieldRule) -> FieldSpec {
    FieldSpec { name, rule }
}

/// Group fields, in rendering order.
pub const GROUP_FIELDS: &[FieldSpec] = &[
    field("id", FieldRule::ServerAssigned),
    field("title", FieldRule::ReadOnly),
    field("slug", FieldRule::ReadOnly),
    field("description", FieldRule::ReadOnly),
];

/// Post fields, in rendering order.
pub const POST_FIELDS: &[FieldSpec] = &[
    field("id", FieldRule::ServerAssigned),
    field("text", FieldRule::Writable),
    field("author", FieldRule::ServerAssigned),
    field("group", FieldRule::Writable),
    field("pub_date", FieldRule::ServerAssigned),
];

/// Comment fields, in rendering order.
pub const COMMENT_FIELDS: &[FieldSpec] = &[
    field("id", FieldRule::ServerAssigned),
    field("text", FieldRule::Writable),
    field("author", FieldRule::ServerAssigned),
    field("post", FieldRule::ReadOnly),
    field("created", FieldRule::ServerAssigned),
];

/// Field table for a resource kind.
#[must_use]
pub fn schema_for(kind: ResourceKind) -> &'static [FieldSpec] {
    match kind {
        ResourceKind::Group => GROUP_FIELDS,
        ResourceKind::Post => POST_FIELDS,
        ResourceKind::Comment => COMMENT_FIELDS,
    }
}

/// Rule for `name` on `kind`, or `None` when the resource has no such field.
#[must_use]
pub fn rule_for(kind: ResourceKind, name: &str) -> Option<FieldRule> {
    schema_for(kind)
        .iter()
        .find(|spec| spec.name == name)
        .map(|spec| spec.rule)
}

/// Which write the payload belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    /// POST: required fields must be present.
    Create,
    /// PUT: required fields must be present; omitted optionals are cleared.
    Replace,
    /// PATCH: every field is optional; omitted fields keep their value.
    Partial,
}

/// Write body handed over by the inbound adapter. A body that failed to
/// decode stays an error until the caller has been authorized.
pub type WriteBody = Result<Value, Error>;

/// Borrow the decoded body, surfacing a decode failure.
pub(crate) fn decoded(body: &WriteBody) -> Result<&Value, Error> {
    body.as_ref().map_err(Clone::clone)
}

pub(crate) const REQUIRED: &str = "This field is required.";
pub(crate) const NOT_NULL: &str = "This field may not be null.";
pub(crate) const NOT_BLANK: &str = "This field may not be blank.";
pub(crate) const NOT_STRING: &str = "Not a valid string.";
pub(crate) const READ_ONLY: &str = "This field is read-only.";
pub(crate) const NOT_OBJECT: &str = "Invalid data. Expected a dictionary.";
pub(crate) const NON_FIELD_ERRORS: &str = "non_field_errors";

/// Field name to messages, reported together as one validation failure.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    /// Record a message against `field`.
    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    /// Single-entry error set.
    #[must_use]
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = Self::default();
        errors.push(field, message);
        errors
    }

    /// Whether nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Messages recorded for `field`.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    /// `Ok(value)` when no errors were recorded.
    pub fn finish<T>(self, value: T) -> Result<T, Self> {
        if self.is_empty() { Ok(value) } else { Err(self) }
    }
}

impl From<FieldErrors> for Error {
    fn from(errors: FieldErrors) -> Self {
        Self::invalid_request("request payload failed validation")
            .with_details(json!({ "fields": errors.0 }))
    }
}

/// Validated post payload. `None` means "not supplied".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostInput {
    pub text: Option<String>,
    pub group: Option<Option<GroupId>>,
}

/// Validated comment payload. `None` means "not supplied".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentInput {
    pub text: Option<String>,
}

/// Screen and validate a post write payload.
///
/// # Examples
/// ```
/// use serde_json::json;
/// use yatube_api::domain::fields::{WriteMode, parse_post};
///
/// let input = parse_post(&json!({ "text": "Hello", "author": "mallory" }), WriteMode::Create)
///     .expect("valid payload");
/// assert_eq!(input.text.as_deref(), Some("Hello"));
/// assert_eq!(input.group, Some(None));
/// ```
pub fn parse_post(payload: &Value, mode: WriteMode) -> Result<PostInput, FieldErrors> {
    let mut errors = FieldErrors::default();
    let Some(object) = screen(ResourceKind::Post, payload, &mut errors) else {
        return Err(errors);
    };
    let text = parse_text(object, mode, &mut errors);
    let group = parse_group(object, mode, &mut errors);
    errors.finish(PostInput { text, group })
}

/// Screen and validate a comment write payload.
pub fn parse_comment(payload: &Value, mode: WriteMode) -> Result<CommentInput, FieldErrors> {
    let mut errors = FieldErrors::default();
    let Some(object) = screen(ResourceKind::Comment, payload, &mut errors) else {
        return Err(errors);
    };
    let text = parse_text(object, mode, &mut errors);
    errors.finish(CommentInput { text })
}

fn screen<'a>(
    kind: ResourceKind,
    payload: &'a Value,
    errors: &mut FieldErrors,
) -> Option<&'a Map<String, Value>> {
    let Some(object) = payload.as_object() else {
        errors.push(NON_FIELD_ERRORS, NOT_OBJECT);
        return None;
    };
    for key in object.keys() {
        match rule_for(kind, key) {
            Some(FieldRule::ReadOnly) => errors.push(key.as_str(), READ_ONLY),
            Some(FieldRule::ServerAssigned) => {
                debug!(resource = ?kind, field = %key, "dropping server-assigned field");
            }
            Some(FieldRule::Writable) | None => {}
        }
    }
    Some(object)
}

fn parse_text(
    object: &Map<String, Value>,
    mode: WriteMode,
    errors: &mut FieldErrors,
) -> Option<String> {
    const FIELD: &str = "text";
    match object.get(FIELD) {
        None => {
            if mode != WriteMode::Partial {
                errors.push(FIELD, REQUIRED);
            }
            None
        }
        Some(Value::Null) => {
            errors.push(FIELD, NOT_NULL);
            None
        }
        Some(Value::String(raw)) => {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                errors.push(FIELD, NOT_BLANK);
                None
            } else {
                Some(trimmed.to_owned())
            }
        }
        Some(_) => {
            errors.push(FIELD, NOT_STRING);
            None
        }
    }
}

fn parse_group(
    object: &Map<String, Value>,
    mode: WriteMode,
    errors: &mut FieldErrors,
) -> Option<Option<GroupId>> {
    const FIELD: &str = "group";
    let Some(raw) = object.get(FIELD) else {
        return match mode {
            WriteMode::Partial => None,
            WriteMode::Create | WriteMode::Replace => Some(None),
        };
    };
    let parsed = match raw {
        Value::Null => Ok(None),
        Value::Number(number) => number
            .as_i64()
            .map(|id| Some(GroupId::new(id)))
            .ok_or("float"),
        Value::String(text) if text.trim().is_empty() => Ok(None),
        Value::String(text) => text
            .trim()
            .parse::<i64>()
            .map(|id| Some(GroupId::new(id)))
            .map_err(|_| "str"),
        Value::Bool(_) => Err("bool"),
        Value::Array(_) => Err("list"),
        Value::Object(_) => Err("dict"),
    };
    match parsed {
        Ok(group) => Some(group),
        Err(received) => {
            errors.push(
                FIELD,
                format!("Incorrect type. Expected pk value, received {received}."),
            );
            None
        }
    }
}

/// Message reported when a post names a group that does not exist.
#[must_use]
pub fn unknown_group_message(id: GroupId) -> String {
    format!("Invalid pk \"{id}\" - object does not exist.")
}

#[cfg(test)]
mod tests;
