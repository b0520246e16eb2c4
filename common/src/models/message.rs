//! Message models.
//!
//! Contains the stored message entity and the request/response payloads of
//! the `/api/messages` endpoints.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Identifier assigned by the API to a saved message.
///
/// Numeric ids are the norm, but string ids are accepted as-is.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(untagged)]
pub enum MessageId {
    Number(i64),
    Text(String),
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageId::Number(n) => write!(f, "{}", n),
            MessageId::Text(s) => f.write_str(s),
        }
    }
}

/// Creation time of a message as sent by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(untagged)]
pub enum Timestamp {
    /// Milliseconds since the Unix epoch.
    Millis(i64),
    /// A date string (RFC 3339 or `YYYY-MM-DD HH:MM:SS`).
    Text(String),
    /// Anything else (`null`, fractional millis, ...). Kept so one odd row
    /// does not fail the whole list.
    Other(serde_json::Value),
}

impl Default for Timestamp {
    fn default() -> Self {
        Timestamp::Other(serde_json::Value::Null)
    }
}

/// A stored text entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub struct Message {
    /// Message content, untrusted.
    pub text: String,
    /// Creation timestamp.
    #[serde(default)]
    pub created_at: Timestamp,
}

/// Request body for `POST /api/messages`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct SaveMessageRequest {
    /// Message text, already trimmed.
    #[validate(length(min = 1, message = "Please enter a message"))]
    pub text: String,
}

impl SaveMessageRequest {
    /// Builds a request from raw input, trimming surrounding whitespace.
    pub fn from_input(input: &str) -> Self {
        Self {
            text: input.trim().to_string(),
        }
    }
}

/// Payload of a successful `POST /api/messages`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct SavedMessage {
    #[serde(default)]
    pub id: Option<MessageId>,
}

/// Payload of a successful `GET /api/messages`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct MessageList {
    #[serde(default)]
    pub messages: Option<Vec<Message>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case("hello", "hello")]
    #[case("  hello world \n", "hello world")]
    #[case("\t", "")]
    fn test_request_trims_input(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(SaveMessageRequest::from_input(input).text, expected);
    }

    #[test]
    fn test_blank_request_fails_validation() {
        let err = SaveMessageRequest::from_input("   ").validate().unwrap_err();
        assert!(err.field_errors().contains_key("text"));
        assert!(SaveMessageRequest::from_input(" hi ").validate().is_ok());
    }

    #[test]
    fn test_message_id_accepts_number_and_string() {
        let n: MessageId = serde_json::from_value(json!(42)).unwrap();
        let s: MessageId = serde_json::from_value(json!("abc-1")).unwrap();
        assert_eq!(n.to_string(), "42");
        assert_eq!(s.to_string(), "abc-1");
    }

    #[test]
    fn test_message_timestamp_variants() {
        let list: MessageList = serde_json::from_value(json!({
            "messages": [
                { "text": "a", "created_at": "2024-03-01T10:00:00Z" },
                { "text": "b", "created_at": 1709287200000_i64 }
            ]
        }))
        .unwrap();

        let messages = list.messages.unwrap();
        assert_eq!(messages[0].created_at, Timestamp::Text("2024-03-01T10:00:00Z".into()));
        assert_eq!(messages[1].created_at, Timestamp::Millis(1_709_287_200_000));
    }

    #[test]
    fn test_odd_timestamps_do_not_fail_the_list() {
        let list: MessageList = serde_json::from_value(json!({
            "messages": [
                { "text": "a", "created_at": null },
                { "text": "b", "created_at": 1709287200000.5 },
                { "text": "c", "created_at": true },
                { "text": "d" }
            ]
        }))
        .unwrap();

        let messages = list.messages.unwrap();
        assert_eq!(messages.len(), 4);
        assert_eq!(messages[0].created_at, Timestamp::Other(json!(null)));
        assert_eq!(messages[1].created_at, Timestamp::Other(json!(1709287200000.5)));
        assert_eq!(messages[2].created_at, Timestamp::Other(json!(true)));
        assert_eq!(messages[3].created_at, Timestamp::default());
    }

    #[test]
    fn test_request_serializes_text_only() {
        let body = serde_json::to_value(SaveMessageRequest::from_input(" hello ")).unwrap();
        assert_eq!(body, json!({ "text": "hello" }));
    }
}
