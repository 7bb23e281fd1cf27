//! Client-facing errors and the plain-text responses they map to.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Errors returned to HTTP clients.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HttpError {
    /// Form missing, unparseable, or with an empty field.
    #[error("Invalid data!")]
    ClientInput,

    #[error("Not Found")]
    NotFound,

    /// A configured page or stylesheet is not on disk.
    #[error("File not found")]
    AssetMissing,
}

impl HttpError {
    pub fn status(&self) -> StatusCode {
        match self {
            HttpError::ClientInput => StatusCode::BAD_REQUEST,
            HttpError::NotFound | HttpError::AssetMissing => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        (self.status(), self.to_string()).into_response()
    }
}
