//! Error type definitions.
//!
//! This module defines the error types raised while setting up the client and
//! while submitting analysis queries. Hostname lookup failures have their own
//! type in the resolver and never leave it.

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use thiserror::Error;

use crate::config::{ANALYSIS_FAILED_MESSAGE, NETWORK_ERROR_MESSAGE};

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),

    /// An endpoint URL could not be derived from the base URL.
    #[error("Endpoint URL error: {0}")]
    EndpointError(#[from] url::ParseError),
}

/// Why an analysis submission did not produce results.
///
/// The first two variants mean no usable response arrived; the third means the
/// backend answered and reported a failure.
#[derive(Error, Debug)]
pub enum SubmitError {
    /// Transport-level failure (connect, timeout, body read).
    #[error("analysis request failed: {0}")]
    Transport(#[from] ReqwestError),

    /// The response body was not the expected JSON document.
    #[error("analysis response could not be decoded: {0}")]
    Decode(#[from] serde_json::Error),

    /// The backend answered with `success: false`.
    #[error("analysis rejected by backend: {}", .message.as_deref().unwrap_or("no message"))]
    Rejected {
        /// Server-supplied `error` field, if any
        message: Option<String>,
    },
}

impl SubmitError {
    /// Text shown in the error banner for this failure.
    pub fn user_message(&self) -> String {
        match self {
            SubmitError::Transport(_) | SubmitError::Decode(_) => NETWORK_ERROR_MESSAGE.to_string(),
            SubmitError::Rejected { message } => message
                .as_deref()
                .map(str::trim)
                .filter(|m| !m.is_empty())
                .unwrap_or(ANALYSIS_FAILED_MESSAGE)
                .to_string(),
        }
    }

    /// Whether the backend was reached and answered.
    pub fn is_rejection(&self) -> bool {
        matches!(self, SubmitError::Rejected { .. })
    }
}
