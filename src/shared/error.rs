//! Shared Error Types
//!
//! This module defines the error taxonomy used across the page builder.
//! Remote Block Store failures, precondition failures, and serialization
//! failures all funnel through [`BuilderError`] so the session layer can
//! catch them at one boundary and turn them into user-visible notifications.
//!
//! # Error Categories
//!
//! - `Http` - the Remote Block Store answered with a non-2xx status
//! - `Network` - the request never produced a response
//! - `Serialization` - JSON encode/decode failures
//! - `MissingContext` - a required precondition (current page, selected
//!   website) was absent, checked before any remote call is made
//! - `InvalidSlug` - a shared-block create returned a slug that does not
//!   follow the `shared-block-{id}` format
//!
//! # Thread Safety
//!
//! All error types are `Send + Sync` and can be safely shared across thread
//! boundaries.
use thiserror::Error;

/// Errors produced by the page-builder core
#[derive(Debug, Error, Clone)]
pub enum BuilderError {
    /// The Remote Block Store answered with a non-success status
    #[error("request failed: {status} - {message}")]
    Http {
        /// HTTP status code
        status: u16,
        /// Response body text, or the status line when the body is unreadable
        message: String,
    },

    /// The request could not be sent or the response never arrived
    #[error("network error: {message}")]
    Network {
        /// Human-readable error message
        message: String,
    },

    /// JSON serialization or deserialization error
    #[error("serialization error: {message}")]
    Serialization {
        /// Human-readable error message
        message: String,
    },

    /// A required piece of editing context was missing
    #[error("missing context: {0}")]
    MissingContext(&'static str),

    /// A shared-block slug did not match `shared-block-{id}`
    #[error("invalid shared block slug: {0:?}")]
    InvalidSlug(Option<String>),
}

impl BuilderError {
    /// Create a new HTTP error from a status code and response body
    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self::Http {
            status,
            message: message.into(),
        }
    }

    /// Create a new network error
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Create a new serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }

    /// True when the error came from the remote store rather than local state
    pub fn is_remote(&self) -> bool {
        matches!(self, Self::Http { .. } | Self::Network { .. })
    }
}

impl From<serde_json::Error> for BuilderError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization(format!("JSON error: {}", err))
    }
}

impl From<reqwest::Error> for BuilderError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::serialization(format!("Failed to parse response: {}", err))
        } else {
            Self::network(format!("Network error: {}", err))
        }
    }
}
