//! Error types for Courier operations.
//!
//! Every failure the lifecycle engine can raise is one of a fixed set of
//! kinds. Each kind maps onto a transport-neutral [`RestStatus`]; the boundary
//! layer (HTTP routes, CLI) decides how to present it.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Result type alias for Courier operations
pub type Result<T> = std::result::Result<T, Error>;

/// Status class attached to an outcome.
///
/// Used both for error reporting and for the per-id results of a bulk delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RestStatus {
    /// 200
    Ok,
    /// 400
    BadRequest,
    /// 403
    Forbidden,
    /// 404
    NotFound,
    /// 406
    NotAcceptable,
    /// 408
    RequestTimeout,
    /// 500
    InternalServerError,
}

impl RestStatus {
    /// Numeric status code for this class.
    pub fn code(self) -> u16 {
        match self {
            Self::Ok => 200,
            Self::BadRequest => 400,
            Self::Forbidden => 403,
            Self::NotFound => 404,
            Self::NotAcceptable => 406,
            Self::RequestTimeout => 408,
            Self::InternalServerError => 500,
        }
    }

    /// Returns `true` for the 2xx class.
    pub fn is_success(self) -> bool {
        matches!(self, Self::Ok)
    }
}

impl fmt::Display for RestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Ok => "OK",
            Self::BadRequest => "BAD_REQUEST",
            Self::Forbidden => "FORBIDDEN",
            Self::NotFound => "NOT_FOUND",
            Self::NotAcceptable => "NOT_ACCEPTABLE",
            Self::RequestTimeout => "REQUEST_TIMEOUT",
            Self::InternalServerError => "INTERNAL_SERVER_ERROR",
        };
        f.write_str(label)
    }
}

/// Errors that can occur while validating or applying a config operation.
///
/// All variants are raised at the point of detection and are never retried
/// inside the core.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// Malformed request (e.g. an ID named as both account and group)
    #[error("Bad request: {message}")]
    BadRequest {
        /// What was wrong with the request
        message: String,
    },

    /// Caller identity or access list does not permit the operation
    #[error("Forbidden: {message}")]
    Forbidden {
        /// Why access was denied
        message: String,
    },

    /// Target or referenced config does not exist
    #[error("Not found: {message}")]
    NotFound {
        /// Which IDs were missing
        message: String,
    },

    /// Config type is not acceptable in this position
    #[error("Not acceptable: {message}")]
    NotAcceptable {
        /// Which config was rejected
        message: String,
    },

    /// Storage collaborator did not complete a delete
    #[error("Request timeout: {message}")]
    RequestTimeout {
        /// Which delete failed
        message: String,
    },

    /// Storage collaborator reported a create/update failure
    #[error("Internal error: {message}")]
    Internal {
        /// Which operation failed
        message: String,
    },
}

impl Error {
    /// Creates a bad-request error.
    pub fn bad_request<S: Into<String>>(message: S) -> Self {
        Error::BadRequest {
            message: message.into(),
        }
    }

    /// Creates a forbidden error.
    pub fn forbidden<S: Into<String>>(message: S) -> Self {
        Error::Forbidden {
            message: message.into(),
        }
    }

    /// Creates a not-found error.
    pub fn not_found<S: Into<String>>(message: S) -> Self {
        Error::NotFound {
            message: message.into(),
        }
    }

    /// Creates a not-acceptable error.
    pub fn not_acceptable<S: Into<String>>(message: S) -> Self {
        Error::NotAcceptable {
            message: message.into(),
        }
    }

    /// Creates a request-timeout error.
    pub fn request_timeout<S: Into<String>>(message: S) -> Self {
        Error::RequestTimeout {
            message: message.into(),
        }
    }

    /// Creates an internal error.
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Error::Internal {
            message: message.into(),
        }
    }

    /// Status class the boundary layer should report for this error.
    pub fn status(&self) -> RestStatus {
        match self {
            Error::BadRequest { .. } => RestStatus::BadRequest,
            Error::Forbidden { .. } => RestStatus::Forbidden,
            Error::NotFound { .. } => RestStatus::NotFound,
            Error::NotAcceptable { .. } => RestStatus::NotAcceptable,
            Error::RequestTimeout { .. } => RestStatus::RequestTimeout,
            Error::Internal { .. } => RestStatus::InternalServerError,
        }
    }

    /// The caller-facing message without the kind prefix.
    pub fn message(&self) -> &str {
        match self {
            Error::BadRequest { message }
            | Error::Forbidden { message }
            | Error::NotFound { message }
            | Error::NotAcceptable { message }
            | Error::RequestTimeout { message }
            | Error::Internal { message } => message,
        }
    }
}
