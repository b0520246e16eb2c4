//! Error types shared by the console crates.
//!
//! Two families live here:
//! - [`RequestError`]: failures of a call to the upstream messages API,
//!   split into the transport tier and the envelope (application) tier.
//! - [`AppError`]: failures of the console's own HTTP handlers.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::response::ApiResponse;

/// Result alias for console handlers.
pub type AppResult<T> = Result<T, AppError>;

/// Failure of a single upstream API call.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RequestError {
    /// The request could not be sent or the body could not be read.
    #[error("{0}")]
    Transport(String),

    /// The body was not a valid response envelope.
    #[error("{0}")]
    Decode(String),

    /// The envelope reported `success: false`.
    #[error("{0}")]
    Application(String),
}

impl RequestError {
    /// Whether the upstream API answered and explicitly reported a failure.
    pub fn is_application(&self) -> bool {
        matches!(self, RequestError::Application(_))
    }

    /// Whether the call failed before a usable envelope was obtained.
    pub fn is_transport(&self) -> bool {
        !self.is_application()
    }
}

/// Errors produced by the console service itself.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("配置错误: {0}")]
    Config(String),

    #[error("模板渲染失败: {0}")]
    Template(String),
}

impl AppError {
    /// Machine-readable error code for the JSON error body.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Config(_) => "CONFIG_ERROR",
            AppError::Template(_) => "TEMPLATE_ERROR",
        }
    }

    /// 配置和模板错误都属于服务端故障
    pub fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        tracing::error!(code = self.code(), error = %self, "请求处理失败");
        (status, Json(ApiResponse::err(self.code(), self.to_string()))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_error_tiers() {
        assert!(RequestError::Application("timeout".into()).is_application());
        assert!(RequestError::Transport("refused".into()).is_transport());
        assert!(RequestError::Decode("bad json".into()).is_transport());
    }

    #[test]
    fn test_request_error_displays_bare_message() {
        let err = RequestError::Application("timeout".into());
        assert_eq!(err.to_string(), "timeout");
    }

    #[test]
    fn test_app_error_codes() {
        let config = AppError::Config("API_ENDPOINT is not set".into());
        let template = AppError::Template("index.html: syntax error".into());
        assert_eq!(config.code(), "CONFIG_ERROR");
        assert_eq!(template.code(), "TEMPLATE_ERROR");
        assert_eq!(config.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(template.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
