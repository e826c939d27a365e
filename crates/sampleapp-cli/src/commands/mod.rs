// SPDX-License-Identifier: Apache-2.0

//! Command handlers for the sampleapp CLI.

use std::io;

use anyhow::{Context, Result};
use sampleapp_core::{AppConfig, ConfigCredentialProvider, run_demo};
use tracing::debug;

use crate::cli::OutputContext;
use crate::output::{self, StepPrinter};

/// Run the demo and render its report.
///
/// Step failures are part of the report and never make this fail; only
/// errors writing to stdout do.
pub async fn run(ctx: &OutputContext, config: &AppConfig) -> Result<()> {
    let provider = ConfigCredentialProvider::new(config);

    let mut printer = StepPrinter::new(io::stdout(), ctx);
    printer
        .intro(config.profile)
        .context("Failed to write status line")?;

    let report = run_demo(config, &provider, &mut printer).await;
    printer.finish().context("Failed to write status line")?;
    debug!(
        failed = report.failed_count(),
        findings = report.findings().count(),
        "Demo finished"
    );

    output::render(&report, ctx)
}
