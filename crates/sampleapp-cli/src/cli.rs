// SPDX-License-Identifier: Apache-2.0

//! Command-line interface definition for sampleapp.
//!
//! Running with no arguments executes the demo. Every flag is optional.

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use sampleapp_core::Profile;

/// Output format for CLI results.
#[derive(Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable status lines (default)
    #[default]
    Text,
    /// JSON report for programmatic consumption
    Json,
    /// YAML report for programmatic consumption
    Yaml,
}

/// Sample variant selectable on the command line.
#[derive(Clone, Copy, ValueEnum)]
pub enum ProfileArg {
    /// Reproduce the vulnerable sample
    Insecure,
    /// Run the safe reference variant
    Hardened,
}

impl From<ProfileArg> for Profile {
    fn from(arg: ProfileArg) -> Self {
        match arg {
            ProfileArg::Insecure => Profile::Insecure,
            ProfileArg::Hardened => Profile::Hardened,
        }
    }
}

/// Global output configuration passed to commands.
#[derive(Clone)]
pub struct OutputContext {
    /// Output format (text, json, yaml)
    pub format: OutputFormat,
    /// Show findings and details under each status line
    pub verbose: bool,
    /// Whether stdout is a terminal (TTY)
    pub is_tty: bool,
}

impl OutputContext {
    /// Creates an `OutputContext` from CLI arguments.
    pub fn from_cli(format: OutputFormat, verbose: bool) -> Self {
        Self {
            format,
            verbose,
            is_tty: std::io::stdout().is_terminal(),
        }
    }

    /// Returns true if interactive elements (spinners, colors) should be shown.
    pub fn is_interactive(&self) -> bool {
        self.is_tty && matches!(self.format, OutputFormat::Text)
    }
}

/// Sampleapp - intentionally insecure demo application.
///
/// Fetches remote data with a static token over plain HTTP, builds a database
/// config with encryption disabled and a firewall config open to the world,
/// then reports which compliance controls each step violates.
#[derive(Parser)]
#[command(name = "sampleapp")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format (text, json, yaml)
    #[arg(long, short = 'o', default_value = "text", value_enum)]
    pub output: OutputFormat,

    /// Override the configured profile
    #[arg(long, value_enum)]
    pub profile: Option<ProfileArg>,

    /// Read configuration from this file instead of the default location
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Show findings and step details
    #[arg(long, short = 'v')]
    pub verbose: bool,
}
