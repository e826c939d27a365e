// SPDX-License-Identifier: Apache-2.0

#![warn(missing_docs)]

//! # Sampleapp Core
//!
//! Core library for sampleapp, an intentionally insecure application used to
//! exercise compliance scanners.
//!
//! This crate provides:
//! - A remote data fetcher (plain HTTP, static bearer token)
//! - Database and network configuration builders
//! - A placeholder credential/auth manager
//! - A compliance audit mapping each defect to its control (AC-2, AC-3, SC-8, SC-13)
//! - Configuration with an `insecure` (default) and a `hardened` profile
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use sampleapp_core::{ConfigCredentialProvider, StepObserver, StepReport, load_config, run_demo};
//!
//! struct Printer;
//!
//! impl StepObserver for Printer {
//!     fn step_finished(&mut self, report: &StepReport) {
//!         println!("{}", report.outcome.message());
//!     }
//! }
//!
//! # async fn example() -> sampleapp_core::Result<()> {
//! let config = load_config()?;
//! let provider = ConfigCredentialProvider::new(&config);
//! let report = run_demo(&config, &provider, &mut Printer).await;
//! println!("{}", report.completion_message());
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`audit`] - Compliance findings
//! - [`auth`] - Credentials and providers
//! - [`config`] - Configuration loading and paths
//! - [`database`] - Database config builder and simulated connection
//! - [`error`] - Error types
//! - [`facade`] - Demo orchestrator
//! - [`fetch`] - Remote data fetcher
//! - [`network`] - Firewall config builders
//! - [`samples`] - Literal values of the vulnerable sample
//! - [`security`] - Auth manager

// ============================================================================
// Authentication
// ============================================================================

pub use auth::{ConfigCredentialProvider, CredentialProvider, Credentials};

// ============================================================================
// Error Handling
// ============================================================================

pub use error::SampleError;

/// Convenience Result type for sampleapp operations.
///
/// This is equivalent to `std::result::Result<T, SampleError>`.
pub type Result<T> = std::result::Result<T, SampleError>;

// ============================================================================
// Configuration
// ============================================================================

pub use config::{
    ApiConfig, AppConfig, DatabaseSettings, NetworkSettings, Profile, SecuritySettings,
    config_dir, config_file_path, load_config, load_config_with,
};

// ============================================================================
// Builders
// ============================================================================

pub use database::{DatabaseConfig, build_database_config, build_hardened_database_config};
pub use fetch::{ApiClient, RemoteRequestConfig};
pub use network::{NetworkConfig, build_network_config, build_restricted_network_config};
pub use security::{Sealed, SecurityManager};

// ============================================================================
// Audit
// ============================================================================

pub use audit::{Control, Finding, Severity};

// ============================================================================
// Orchestration
// ============================================================================

pub use facade::{DemoReport, Step, StepObserver, StepOutcome, StepReport, run_demo};

// ============================================================================
// Modules
// ============================================================================

pub mod audit;
pub mod auth;
pub mod config;
pub mod database;
pub mod error;
pub mod facade;
pub mod fetch;
pub mod network;
pub mod samples;
pub mod security;
