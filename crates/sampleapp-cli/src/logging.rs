// SPDX-License-Identifier: Apache-2.0

//! Logging initialization for the sampleapp CLI.
//!
//! Uses `tracing` with `tracing-subscriber` for structured logging on stderr.
//! Status lines go to stdout and are handled separately by `output`.
//!
//! # Examples
//!
//! ```bash
//! # Default: tracing suppressed, status lines only
//! cargo run
//!
//! # Swallowed step failures and the encryption warning as log events
//! RUST_LOG=sampleapp_core=warn cargo run
//!
//! # Debug output for troubleshooting
//! RUST_LOG=sampleapp=debug,sampleapp_core=debug cargo run
//! ```

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

/// Initialize the logging subsystem.
///
/// The `RUST_LOG` environment variable controls tracing output. Without it
/// only errors are logged: every warning the core raises is already printed
/// once as a status line.
pub fn init_logging() {
    let fmt_layer = fmt::layer().with_target(false).with_writer(std::io::stderr);

    let default_filter = "sampleapp=error,sampleapp_core=error,reqwest=error";
    let filter_layer = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .expect("valid default filter directives");

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();
}
