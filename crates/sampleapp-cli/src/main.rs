// SPDX-License-Identifier: Apache-2.0

//! Sampleapp - intentionally insecure demo application.
//!
//! Runs the demo steps in sequence, printing a status line after each, and
//! always finishes with a completion line. Step failures do not change the
//! exit code.

mod cli;
mod commands;
mod errors;
mod logging;
mod output;

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use sampleapp_core::{Profile, load_config_with};
use tracing::debug;

use crate::cli::{Cli, OutputContext};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init_logging();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let formatted = errors::format_error(&e);
            eprintln!("Error: {formatted}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let output_ctx = OutputContext::from_cli(cli.output, cli.verbose);

    let config = load_config_with(cli.config.as_deref(), cli.profile.map(Profile::from))
        .context("Failed to load configuration")?;
    debug!(profile = %config.profile, "Configuration loaded successfully");

    commands::run(&output_ctx, &config).await
}
