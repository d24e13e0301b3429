//! Error handling module for the cart quoting service
//!
//! This module defines the error types used throughout the application,
//! providing a unified error handling strategy with proper error context
//! and HTTP response mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Result type alias for cart quoting operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the cart quoting service
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Validation errors for the inbound cart request
    #[error("Validation error: {0}")]
    Validation(String),

    /// A requested product id does not exist in the catalog
    #[error("Product with ID {product_id} not found")]
    NotFound { product_id: String },

    /// A requested quantity exceeds the adjusted stock figure
    #[error(
        "Insufficient stock for product '{name}' (ID: {product_id}). \
         Requested: {requested}, Available (Sr): {available}"
    )]
    InsufficientStock {
        product_id: String,
        name: String,
        requested: i64,
        available: i64,
    },

    /// The product catalog could not be fetched; the detail stays in the logs
    #[error("Product catalog is currently unavailable")]
    UpstreamUnavailable { detail: String },

    /// Neither courier produced a valid shipping quote
    #[error("Could not obtain shipping prices from couriers. Please try again.")]
    NoQuoteAvailable,

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Error::Config(msg.into())
    }

    /// Create a validation error
    pub fn validation<S: Into<String>>(msg: S) -> Self {
        Error::Validation(msg.into())
    }

    /// Create a catalog-unavailable error
    pub fn upstream<S: Into<String>>(detail: S) -> Self {
        Error::UpstreamUnavailable {
            detail: detail.into(),
        }
    }

    /// Create an internal error
    pub fn internal<S: Into<String>>(msg: S) -> Self {
        Error::Internal(msg.into())
    }

    /// Get the appropriate HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::Validation(_) | Error::InsufficientStock { .. } => StatusCode::BAD_REQUEST,
            Error::NotFound { .. } => StatusCode::NOT_FOUND,
            Error::UpstreamUnavailable { .. } => StatusCode::BAD_GATEWAY,
            Error::NoQuoteAvailable
            | Error::Config(_)
            | Error::Serialization(_)
            | Error::Io(_)
            | Error::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Implement IntoResponse for automatic error responses in Axum
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // The body carries only our own message, never upstream error bodies
        let body = Json(json!({
            "error": {
                "message": self.to_string(),
                "type": error_type(&self),
                "status": status.as_u16(),
            }
        }));

        // Log error based on severity
        match status {
            StatusCode::INTERNAL_SERVER_ERROR | StatusCode::BAD_GATEWAY => {
                tracing::error!(error = ?self, "Request failed");
            },
            StatusCode::BAD_REQUEST | StatusCode::NOT_FOUND => {
                tracing::warn!(error = ?self, "Client error");
            },
            _ => {
                tracing::info!(error = ?self, "Request error");
            },
        }

        (status, body).into_response()
    }
}

/// Get a string representation of the error type
fn error_type(error: &Error) -> &'static str {
    match error {
        Error::Config(_) => "configuration_error",
        Error::Validation(_) => "validation_error",
        Error::NotFound { .. } => "not_found",
        Error::InsufficientStock { .. } => "insufficient_stock",
        Error::UpstreamUnavailable { .. } => "upstream_unavailable",
        Error::NoQuoteAvailable => "no_quote_available",
        Error::Serialization(_) => "serialization_error",
        Error::Io(_) => "io_error",
        Error::Internal(_) => "internal_error",
    }
}

/// Convert from anyhow::Error to our Error type
impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Error::Internal(err.to_string())
    }
}

/// Convert from envconfig::Error to our Error type
impl From<envconfig::Error> for Error {
    fn from(err: envconfig::Error) -> Self {
        Error::Config(err.to_string())
    }
}
