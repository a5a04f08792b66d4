//! Main-content validation, uuid parsing, body encoding, and history direction.
//!
//! This module lives in `core` (zero internal deps) so the API handlers, the
//! version-chain manager, and the persistence adapter all share one set of
//! rules for what a well-formed version reference looks like.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Maximum length of a content or version title.
pub const MAX_TITLE_LENGTH: usize = 255;

/// Placeholder strings some clients send instead of omitting a uuid field.
pub const UUID_SENTINELS: &[&str] = &["", "null", "undefined"];

/// Canonical 8-4-4-4-12 layout with version nibble 1-5 and RFC 4122 variant.
pub const VERSION_UUID_PATTERN: &str =
    r"(?i)^[0-9a-f]{8}-[0-9a-f]{4}-[1-5][0-9a-f]{3}-[89ab][0-9a-f]{3}-[0-9a-f]{12}$";

static VERSION_UUID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(VERSION_UUID_PATTERN).expect("valid regex"));

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate a title (non-empty after trimming, at most 255 chars).
pub fn validate_title(title: &str) -> Result<(), CoreError> {
    if title.trim().is_empty() {
        return Err(CoreError::Validation("Title must not be empty".into()));
    }
    if title.chars().count() > MAX_TITLE_LENGTH {
        return Err(CoreError::Validation(format!(
            "Title must be at most {MAX_TITLE_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Parse a version uuid, enforcing the canonical hyphenated layout.
///
/// `field` names the offending input in the error message.
pub fn parse_version_uuid(raw: &str, field: &str) -> Result<Uuid, CoreError> {
    if !VERSION_UUID_RE.is_match(raw) {
        return Err(CoreError::Validation(format!(
            "Invalid UUID format for {field}: '{raw}'"
        )));
    }
    Uuid::parse_str(raw)
        .map_err(|e| CoreError::Validation(format!("Invalid UUID format for {field}: {e}")))
}

/// Parse an optional client-supplied uuid, treating sentinel strings as absent.
pub fn parse_optional_uuid(raw: Option<&str>, field: &str) -> Result<Option<Uuid>, CoreError> {
    match raw.map(str::trim) {
        None => Ok(None),
        Some(value) if UUID_SENTINELS.contains(&value) => Ok(None),
        Some(value) => parse_version_uuid(value, field).map(Some),
    }
}

// ---------------------------------------------------------------------------
// Body payload
// ---------------------------------------------------------------------------

/// The opaque body of a version.
///
/// Structured documents (objects, arrays) are kept as JSON; anything else is
/// plain text. Serializes untagged, so the wire form is the payload itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ContentBody {
    Json(serde_json::Value),
    Text(String),
}

impl ContentBody {
    /// Convert a JSON request value. `null` means "no body supplied".
    pub fn from_json(value: serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::Null => None,
            serde_json::Value::String(s) => Some(ContentBody::Text(s)),
            other => Some(ContentBody::Json(other)),
        }
    }

    /// Encode for storage in a text column.
    pub fn encode(&self) -> String {
        match self {
            ContentBody::Json(value) => value.to_string(),
            ContentBody::Text(text) => text.clone(),
        }
    }

    /// Decode a stored text column. Only objects and arrays come back as JSON.
    pub fn decode(stored: String) -> Self {
        match serde_json::from_str::<serde_json::Value>(&stored) {
            Ok(value @ (serde_json::Value::Object(_) | serde_json::Value::Array(_))) => {
                ContentBody::Json(value)
            }
            _ => ContentBody::Text(stored),
        }
    }
}

// ---------------------------------------------------------------------------
// History direction
// ---------------------------------------------------------------------------

/// Which pointer a history traversal follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Follow `prev_uuid` towards version 1.
    Prev,
    /// Follow `next_uuid` towards the latest version.
    Next,
}

impl FromStr for Direction {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "prev" => Ok(Direction::Prev),
            "next" => Ok(Direction::Next),
            other => Err(CoreError::Validation(format!(
                "Invalid direction '{other}'. Valid directions: prev, next"
            ))),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Prev => f.write_str("prev"),
            Direction::Next => f.write_str("next"),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use serde_json::json;

    use super::*;

    // -- validate_title ------------------------------------------------------

    #[test]
    fn title_valid() {
        assert!(validate_title("Room A").is_ok());
    }

    #[test]
    fn title_blank_rejected() {
        assert!(validate_title("").is_err());
        assert!(validate_title("  \t").is_err());
    }

    #[test]
    fn title_too_long_rejected() {
        let long = "a".repeat(MAX_TITLE_LENGTH + 1);
        assert!(validate_title(&long).is_err());
        assert!(validate_title(&"a".repeat(MAX_TITLE_LENGTH)).is_ok());
    }

    // -- parse_version_uuid --------------------------------------------------

    #[test]
    fn uuid_v4_accepted() {
        let id = Uuid::new_v4();
        assert_eq!(parse_version_uuid(&id.to_string(), "prevUuid").unwrap(), id);
    }

    #[test]
    fn uuid_uppercase_accepted() {
        let raw = "3F2504E0-4F89-41D3-9A0C-0305E82C3301";
        assert!(parse_version_uuid(raw, "uuid").is_ok());
    }

    #[test]
    fn uuid_bad_version_nibble_rejected() {
        // Version nibble 7 is outside 1..=5.
        let raw = "3f2504e0-4f89-71d3-9a0c-0305e82c3301";
        assert_matches!(parse_version_uuid(raw, "uuid"), Err(CoreError::Validation(_)));
    }

    #[test]
    fn uuid_bad_variant_nibble_rejected() {
        let raw = "3f2504e0-4f89-41d3-ca0c-0305e82c3301";
        assert_matches!(parse_version_uuid(raw, "uuid"), Err(CoreError::Validation(_)));
    }

    #[test]
    fn uuid_simple_form_rejected() {
        let raw = "3f2504e04f8941d39a0c0305e82c3301";
        assert!(parse_version_uuid(raw, "uuid").is_err());
    }

    #[test]
    fn uuid_error_names_field() {
        let err = parse_version_uuid("nope", "nextUuid").unwrap_err();
        assert!(err.to_string().contains("nextUuid"));
    }

    // -- parse_optional_uuid -------------------------------------------------

    #[test]
    fn sentinels_are_absent() {
        for raw in ["", "null", "undefined", "  null "] {
            assert_eq!(parse_optional_uuid(Some(raw), "prevUuid").unwrap(), None);
        }
        assert_eq!(parse_optional_uuid(None, "prevUuid").unwrap(), None);
    }

    #[test]
    fn optional_malformed_rejected() {
        assert!(parse_optional_uuid(Some("abc"), "prevUuid").is_err());
    }

    // -- ContentBody ---------------------------------------------------------

    #[test]
    fn body_from_json_maps_kinds() {
        assert_eq!(ContentBody::from_json(json!(null)), None);
        assert_eq!(
            ContentBody::from_json(json!("hello")),
            Some(ContentBody::Text("hello".into()))
        );
        assert_eq!(
            ContentBody::from_json(json!({"blocks": []})),
            Some(ContentBody::Json(json!({"blocks": []})))
        );
    }

    #[test]
    fn body_decode_keeps_documents_as_json() {
        let body = ContentBody::Json(json!({"blocks": [{"text": "hi"}]}));
        assert_eq!(ContentBody::decode(body.encode()), body);
    }

    #[test]
    fn body_decode_keeps_scalars_as_text() {
        // A bare number or quoted string is plain text, not a document.
        assert_eq!(ContentBody::decode("123".into()), ContentBody::Text("123".into()));
        assert_eq!(
            ContentBody::decode("\"quoted\"".into()),
            ContentBody::Text("\"quoted\"".into())
        );
        assert_eq!(
            ContentBody::decode("<p>hello</p>".into()),
            ContentBody::Text("<p>hello</p>".into())
        );
    }

    #[test]
    fn body_serializes_untagged() {
        let text = serde_json::to_value(ContentBody::Text("hi".into())).unwrap();
        assert_eq!(text, json!("hi"));
        let doc = serde_json::to_value(ContentBody::Json(json!({"a": 1}))).unwrap();
        assert_eq!(doc, json!({"a": 1}));
    }

    // -- Direction -----------------------------------------------------------

    #[test]
    fn direction_parses() {
        assert_eq!("prev".parse::<Direction>().unwrap(), Direction::Prev);
        assert_eq!("next".parse::<Direction>().unwrap(), Direction::Next);
        assert!("sideways".parse::<Direction>().is_err());
    }

    #[test]
    fn direction_display_round_trips() {
        assert_eq!(Direction::Next.to_string(), "next");
    }
}
