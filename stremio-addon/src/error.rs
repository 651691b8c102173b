use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::{fmt, io};
use thiserror::Error;

use stremio_model::MediaType;

pub type AppResult<T> = Result<T, AppError>;

/// Error surfaced to HTTP clients as `{"error": "<message>"}`.
#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = Json(json!({ "error": self.message }));
        (self.status, body).into_response()
    }
}

/// Misuse detected while registering catalogs.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error(
        "catalog '{id}' of type {media_type} is already registered at {path}"
    )]
    DuplicateCatalog {
        media_type: MediaType,
        id: String,
        path: String,
    },
    #[error("catalog name '{name}' yields identifier '{id}' which cannot be routed")]
    UnroutableName { name: String, id: String },
}

/// Failure to start or keep the HTTP listener running.
#[derive(Debug, Error)]
pub enum ServeError {
    #[error("failed to bind {addr}")]
    Bind {
        addr: String,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Io(#[from] io::Error),
}
