//! Create-request body validation.
//!
//! The expected shape is a JSON object with required string properties
//! `title` and `body`; extra properties are tolerated. Checks run in a
//! fixed, deterministic order and only the first violation is reported:
//! type checks for present properties first, then requiredness, with
//! `title` always inspected before `body`.

use serde_json::{Map, Value};

use crate::domain::{Error, NewPost};

const REQUIRED_STRING_PROPERTIES: [&str; 2] = ["title", "body"];

/// Render a JSON value the way violation messages quote it: strings in
/// single quotes, everything else as compact JSON.
fn render(value: &Value) -> String {
    match value {
        Value::String(text) => format!("'{text}'"),
        other => other.to_string(),
    }
}

fn type_violation(value: &Value, expected: &str) -> Error {
    Error::unprocessable(format!("{} is not of type '{expected}'", render(value)))
}

fn required_violation(name: &str) -> Error {
    Error::unprocessable(format!("'{name}' is a required property"))
}

fn required_string(object: &Map<String, Value>, name: &str) -> Result<String, Error> {
    object
        .get(name)
        .and_then(Value::as_str)
        .map(str::to_owned)
        .ok_or_else(|| required_violation(name))
}

/// Validate a create-request body and construct the post draft.
///
/// On violation returns an unprocessable-entity error carrying exactly one
/// human-readable violation message.
///
/// # Examples
/// ```
/// use blogful::inbound::http::validation::validate_new_post;
/// use serde_json::json;
///
/// let draft = validate_new_post(&json!({"title": "Example Post", "body": "Just a test"}))
///     .expect("valid body");
/// assert_eq!(draft.title, "Example Post");
///
/// let err = validate_new_post(&json!({"title": "Example Post"})).expect_err("missing body");
/// assert_eq!(err.message(), "'body' is a required property");
/// ```
pub fn validate_new_post(value: &Value) -> Result<NewPost, Error> {
    let object = value
        .as_object()
        .ok_or_else(|| type_violation(value, "object"))?;

    // Present-but-wrongly-typed properties are reported before missing ones.
    for name in REQUIRED_STRING_PROPERTIES {
        if let Some(property) = object.get(name) {
            if !property.is_string() {
                return Err(type_violation(property, "string"));
            }
        }
    }
    for name in REQUIRED_STRING_PROPERTIES {
        if !object.contains_key(name) {
            return Err(required_violation(name));
        }
    }

    let title = required_string(object, "title")?;
    let body = required_string(object, "body")?;
    Ok(NewPost { title, body })
}
