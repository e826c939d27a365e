// SPDX-License-Identifier: Apache-2.0

//! Output rendering for the CLI.
//!
//! Supports text, JSON and YAML. In text mode step status lines are streamed
//! by [`StepPrinter`] while the demo runs; the final report is rendered here.

use anyhow::{Context, Result};
use serde::Serialize;
use std::io::{self, Write};

use crate::cli::{OutputContext, OutputFormat};

mod report;

pub use report::StepPrinter;

/// Trait for types that can be rendered in multiple output formats.
pub trait Renderable: Serialize {
    /// Render as human-readable text to the given writer.
    fn render_text(&self, w: &mut dyn Write, ctx: &OutputContext) -> io::Result<()>;
}

/// Generic render function - handles JSON/YAML via serde, delegates text to the trait.
pub fn render<T: Renderable>(result: &T, ctx: &OutputContext) -> Result<()> {
    render_to(result, ctx, &mut io::stdout())
}

/// Like [`render`], writing to `w`.
pub fn render_to<T: Renderable>(result: &T, ctx: &OutputContext, w: &mut dyn Write) -> Result<()> {
    match ctx.format {
        OutputFormat::Json => {
            let json =
                serde_json::to_string_pretty(result).context("Failed to serialize to JSON")?;
            writeln!(w, "{json}").context("Failed to write JSON")?;
        }
        OutputFormat::Yaml => {
            let yaml = serde_saphyr::to_string(result).context("Failed to serialize to YAML")?;
            writeln!(w, "{yaml}").context("Failed to write YAML")?;
        }
        OutputFormat::Text => {
            result
                .render_text(w, ctx)
                .context("Failed to render text")?;
        }
    }
    Ok(())
}
