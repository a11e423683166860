use std::fmt::{Display, Formatter};
use std::{fmt, io};

use reqwest::StatusCode;

/// Errors surfaced to callers of the API client and services.
#[derive(Debug)]
pub enum ApiError {
    Transport(reqwest::Error),
    Json(serde_json::Error),
    Storage(StoreError),
    Status { status: StatusCode, message: String },
    SessionExpired,
}

impl ApiError {
    /// HTTP status attached to the error, when the backend produced one.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl Display for ApiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Transport(e) => write!(f, "network error: {e}"),
            ApiError::Json(e) => write!(f, "json error: {e}"),
            ApiError::Storage(e) => write!(f, "storage error: {e}"),
            ApiError::Status { status, message } => {
                write!(f, "api error ({status}): {message}")
            }
            ApiError::SessionExpired => {
                write!(f, "session expired: re-authentication required")
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        ApiError::Transport(e)
    }
}
impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::Json(e)
    }
}
impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        ApiError::Storage(e)
    }
}
impl From<RefreshError> for ApiError {
    fn from(_: RefreshError) -> Self {
        ApiError::SessionExpired
    }
}

/// Outcome of a credential refresh attempt.
///
/// Cloneable so every caller awaiting the shared in-flight refresh can
/// receive the same settled result.
#[derive(Debug, Clone)]
pub enum RefreshError {
    MissingRefreshCredential,
    Transport(String),
    Rejected { status: u16, message: String },
    Wire(String),
    Storage(String),
}

impl Display for RefreshError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            RefreshError::MissingRefreshCredential => write!(f, "no refresh credential available"),
            RefreshError::Transport(msg) => write!(f, "refresh network error: {msg}"),
            RefreshError::Rejected { status, message } => {
                write!(f, "refresh rejected ({status}): {message}")
            }
            RefreshError::Wire(msg) => write!(f, "refresh wire error: {msg}"),
            RefreshError::Storage(msg) => write!(f, "refresh storage error: {msg}"),
        }
    }
}

impl std::error::Error for RefreshError {}

/// Errors from the durable credential store.
#[derive(Debug)]
pub enum StoreError {
    Io(io::Error),
    Json(serde_json::Error),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Io(e) => write!(f, "io error: {e}"),
            StoreError::Json(e) => write!(f, "json error: {e}"),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<io::Error> for StoreError {
    fn from(e: io::Error) -> Self {
        StoreError::Io(e)
    }
}
impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Json(e)
    }
}
