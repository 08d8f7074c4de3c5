//! Page and API error responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use serde_json::json;
use thiserror::Error;

use oms_core::errors::CoreError;
use oms_db::error::DatabaseError;

/// Everything a page can answer with besides its view model.
#[derive(Debug, Error)]
pub enum PageError {
    /// Send the browser to a safe page instead of rendering.
    #[error("redirect to {0}")]
    Redirect(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Forbidden")]
    Forbidden,

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Internal(String),
}

impl PageError {
    pub fn redirect(path: impl Into<String>) -> Self {
        Self::Redirect(path.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Redirect(_) => StatusCode::SEE_OTHER,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        if let Self::Redirect(path) = &self {
            return Redirect::to(path).into_response();
        }
        let status = self.status();
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

impl From<DatabaseError> for PageError {
    fn from(error: DatabaseError) -> Self {
        match error {
            DatabaseError::NoResult => Self::not_found("Not found"),
            DatabaseError::InvalidState(message) => Self::BadRequest(message),
            other => {
                tracing::error!(error = %other, "store query failed");
                Self::Internal("Internal server error".into())
            }
        }
    }
}

impl From<CoreError> for PageError {
    fn from(error: CoreError) -> Self {
        match error {
            CoreError::Validation(message) => Self::BadRequest(message),
            CoreError::Forbidden(_) => Self::Forbidden,
            CoreError::NotFound { entity_type, .. } => Self::NotFound(format!("{entity_type} not found")),
            CoreError::Other(error) => {
                tracing::error!(error = %error, "unexpected failure");
                Self::Internal("Internal server error".into())
            }
        }
    }
}

/// Store-result adapters used by the pages.
pub trait StoreResultExt<T> {
    /// Missing row becomes a 404 carrying `message`.
    fn or_not_found(self, message: &str) -> Result<T, PageError>;

    /// Any failure is logged and becomes a redirect to `path`.
    fn or_redirect(self, path: &str) -> Result<T, PageError>;
}

impl<T> StoreResultExt<T> for Result<T, DatabaseError> {
    fn or_not_found(self, message: &str) -> Result<T, PageError> {
        self.map_err(|error| match error {
            DatabaseError::NoResult => PageError::not_found(message),
            other => other.into(),
        })
    }

    fn or_redirect(self, path: &str) -> Result<T, PageError> {
        self.map_err(|error| {
            tracing::error!(%error, redirect = path, "page query failed");
            PageError::redirect(path)
        })
    }
}
