// SPDX-License-Identifier: Apache-2.0

//! Error types for sampleapp.
//!
//! Uses `thiserror` for deriving `std::error::Error` implementations.
//! Application code should use `anyhow::Result` for top-level error handling.

use thiserror::Error;

/// Errors that can occur during sampleapp operations.
#[derive(Error, Debug)]
pub enum SampleError {
    /// Remote fetch failed (transport, HTTP status or response parsing).
    #[error("Request to {url} failed: {message}")]
    Request {
        /// URL that was requested.
        url: String,
        /// Error message.
        message: String,
    },

    /// Simulated database connection failed.
    #[error("Connection to {host}:{port} failed: {message}")]
    Connection {
        /// Database host.
        host: String,
        /// Database port.
        port: u16,
        /// Error message.
        message: String,
    },

    /// Configuration file or validation error.
    #[error("Configuration error: {message}")]
    Config {
        /// Error message.
        message: String,
    },
}

impl SampleError {
    /// Creates a `Config` error from any displayable message.
    pub fn config(message: impl Into<String>) -> Self {
        SampleError::Config {
            message: message.into(),
        }
    }
}

impl From<reqwest::Error> for SampleError {
    fn from(err: reqwest::Error) -> Self {
        let url = err
            .url()
            .map_or_else(|| "<unknown>".to_string(), ToString::to_string);
        SampleError::Request {
            url,
            message: err.to_string(),
        }
    }
}

impl From<config::ConfigError> for SampleError {
    fn from(err: config::ConfigError) -> Self {
        SampleError::Config {
            message: err.to_string(),
        }
    }
}
