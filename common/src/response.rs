//! Response wrapper types.
//!
//! [`ApiResponse`] is the JSON shape the console itself returns on error;
//! [`Envelope`] is the `{ success, error?, ...payload }` shape returned by
//! the upstream messages API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::errors::RequestError;

/// Text used when the upstream API reports a failure without saying why.
pub const UNKNOWN_ERROR: &str = "Unknown error";

/// Standard console response wrapper.
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,

    /// Response data (present on success).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,

    /// Error details (present on failure).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,

    /// Response metadata.
    pub meta: ResponseMeta,
}

/// API error details.
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiError {
    /// Error code for client handling (e.g., "CONFIG_ERROR").
    pub code: String,

    /// Human-readable error message.
    pub message: String,
}

/// Response metadata.
#[derive(Debug, Serialize, ToSchema)]
pub struct ResponseMeta {
    /// Response timestamp.
    pub timestamp: DateTime<Utc>,
}

impl Default for ResponseMeta {
    fn default() -> Self {
        Self {
            timestamp: Utc::now(),
        }
    }
}

impl ApiResponse<()> {
    /// Creates an error response.
    pub fn err(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(ApiError {
                code: code.into(),
                message: message.into(),
            }),
            meta: ResponseMeta::default(),
        }
    }
}

/// Envelope returned by every upstream endpoint.
///
/// The payload fields sit next to `success` and `error` at the top level,
/// so `T` is flattened and should keep its fields optional: a failure
/// envelope carries none of them.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    #[serde(default)]
    pub success: bool,

    #[serde(default)]
    pub error: Option<String>,

    #[serde(flatten)]
    pub payload: T,
}

impl<T> Envelope<T> {
    /// Splits the envelope into its payload or an application-tier error.
    pub fn into_result(self) -> Result<T, RequestError> {
        if self.success {
            Ok(self.payload)
        } else {
            Err(RequestError::Application(
                self.error.unwrap_or_else(|| UNKNOWN_ERROR.to_string()),
            ))
        }
    }
}
