//! Media type objects for request and response bodies.

use serde_json::Value;

use super::schema;
use crate::{
    config::UpdateMode,
    error::{InferenceError, Result},
    openapi::{Content, MediaType, Schema},
};

/// The media types whose schemas can be inferred from a body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaTypeKey {
    ApplicationJson,
    TextPlain,
}

impl MediaTypeKey {
    /// The key used in a content map.
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaTypeKey::ApplicationJson => "application/json",
            MediaTypeKey::TextPlain => "text/plain",
        }
    }
}

impl std::fmt::Display for MediaTypeKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for MediaTypeKey {
    type Err = InferenceError;

    fn from_str(key: &str) -> Result<Self> {
        match key {
            "application/json" => Ok(MediaTypeKey::ApplicationJson),
            "text/plain" => Ok(MediaTypeKey::TextPlain),
            other => Err(InferenceError::UnknownMediaTypeKey(other.to_string())),
        }
    }
}

/// Picks the media type of a body by attempting to parse it as JSON.
///
/// An empty body has no media type. A JSON document is `application/json` unless it is a
/// bare string literal, which is treated as plain text like any unparsable body.
pub fn classify_body(body: &str) -> Option<MediaTypeKey> {
    if body.is_empty() {
        return None;
    }
    match serde_json::from_str::<Value>(body) {
        Ok(Value::String(_)) | Err(_) => Some(MediaTypeKey::TextPlain),
        Ok(_) => Some(MediaTypeKey::ApplicationJson),
    }
}

/// Builds the media type of `body`, or updates `existing` with it.
///
/// `application/json` bodies go through JSON-schema inference; `text/plain` bodies through
/// [`text_schema`]. Any other key is rejected.
pub fn build_or_update_media_type(
    body: &str,
    mode: UpdateMode,
    media_type_key: &str,
    existing: Option<&MediaType>,
) -> Result<MediaType> {
    let existing_schema = existing.and_then(|media_type| media_type.schema.as_ref());
    let schema = match media_type_key.parse::<MediaTypeKey>()? {
        MediaTypeKey::ApplicationJson => {
            let value = serde_json::from_str::<Value>(body)?;
            schema::infer(&value, mode, existing_schema)
        }
        MediaTypeKey::TextPlain => text_schema(body, mode, existing_schema),
    };
    let example = existing.and_then(|media_type| media_type.example.clone());
    Ok(MediaType { schema: Some(schema), example })
}

/// The schema of a plain text value such as a text body or a header.
///
/// Generalizing mode yields an unconstrained string. Literal modes prepend the value as a
/// new `oneOf` alternative, newest first.
pub fn text_schema(text: &str, mode: UpdateMode, existing: Option<&Schema>) -> Schema {
    if mode.generalizes() {
        return Schema::string();
    }
    let literal = Schema::string_const(text);
    match existing {
        Some(existing) => schema::prepend_alternative(literal, existing.clone()),
        None => Schema::OneOf(vec![literal]),
    }
}

/// Returns `content` with the entry for `body` built or updated.
///
/// Returns `None` for an empty body when there is no prior content, and the prior content
/// unchanged for an empty body otherwise.
pub fn update_content(
    content: Option<&Content>,
    body: Option<&str>,
    mode: UpdateMode,
) -> Result<Option<Content>> {
    let Some(key) = body.and_then(classify_body) else {
        return Ok(content.cloned());
    };
    let body = body.unwrap_or_default();
    let existing = content.and_then(|content| content.get(key.as_str()));
    let media_type = build_or_update_media_type(body, mode, key.as_str(), existing)?;

    let mut updated = content.cloned().unwrap_or_default();
    updated.insert(key.as_str().to_string(), media_type);
    Ok(Some(updated))
}
