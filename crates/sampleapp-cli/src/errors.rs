// SPDX-License-Identifier: Apache-2.0

//! CLI-specific error formatting with user-friendly hints.
//!
//! Downcasts `anyhow::Error` to `SampleError` and adds a hint per variant.
//! Step failures never reach this module; they are reported by the demo run.

use anyhow::Error;
use sampleapp_core::SampleError;

/// Formats an error for CLI display with helpful hints.
///
/// If the error is not a `SampleError`, returns the error chain.
pub fn format_error(error: &Error) -> String {
    if let Some(sample_err) = error.downcast_ref::<SampleError>() {
        match sample_err {
            SampleError::Config { .. } => {
                let path = sampleapp_core::config_file_path().map_or_else(
                    |_| "~/.config/sampleapp/config.toml".to_string(),
                    |path| path.display().to_string(),
                );
                format!(
                    "{sample_err}\n\nTip: Check your config file at {path} \
                     or the SAMPLEAPP_* environment variables."
                )
            }
            SampleError::Request { .. } => {
                format!("{sample_err}\n\nTip: Check api.base_url and your network connection.")
            }
            SampleError::Connection { .. } => {
                format!("{sample_err}\n\nTip: Check database.host and database.port.")
            }
        }
    } else {
        format!("{error:#}")
    }
}
