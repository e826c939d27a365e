// SPDX-License-Identifier: Apache-2.0

//! Orchestrator for the demo application.
//!
//! [`run_demo`] runs every step in sequence and never aborts: each step's
//! failure is caught, logged once and recorded as [`StepOutcome::Failed`].
//! Presentation is left to the caller, which receives each [`StepReport`]
//! through a [`StepObserver`] as soon as the step finishes.

use std::time::Duration;

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::audit::{self, Finding};
use crate::auth::CredentialProvider;
use crate::config::{AppConfig, Profile};
use crate::database::{self, DatabaseConfig};
use crate::fetch::{ApiClient, RemoteRequestConfig};
use crate::network;
use crate::samples;
use crate::security::SecurityManager;

/// Payload handed to the placeholder encryption step.
pub const SAMPLE_PAYLOAD: &str = "sensitive information";

/// A step of the demo run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    /// Fetch `{base_url}/data`.
    FetchData,
    /// Build the database config.
    DatabaseConfig,
    /// Probe the database host.
    DatabaseConnection,
    /// Build the network config.
    NetworkConfig,
    /// Check the sample admin credentials.
    Authentication,
    /// Run the placeholder encryption.
    Encryption,
}

impl Step {
    /// Short human-readable name.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Step::FetchData => "Fetching remote data",
            Step::DatabaseConfig => "Configuring database",
            Step::DatabaseConnection => "Connecting to database",
            Step::NetworkConfig => "Configuring network",
            Step::Authentication => "Authenticating admin",
            Step::Encryption => "Encrypting data",
        }
    }
}

/// Success/failure union for a single step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "message", rename_all = "snake_case")]
pub enum StepOutcome {
    /// Step finished; the message is its status line.
    Completed(String),
    /// Step failed and was skipped over; the message describes the failure.
    Failed(String),
}

impl StepOutcome {
    /// The status line.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            StepOutcome::Completed(message) | StepOutcome::Failed(message) => message,
        }
    }

    /// True for [`StepOutcome::Failed`].
    #[must_use]
    pub fn is_failed(&self) -> bool {
        matches!(self, StepOutcome::Failed(_))
    }
}

/// Result of one step.
#[derive(Debug, Clone, Serialize)]
pub struct StepReport {
    /// Which step ran.
    pub step: Step,
    /// What happened.
    pub outcome: StepOutcome,
    /// Non-fatal warnings raised by the step.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
    /// Control violations in the records the step built.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub findings: Vec<Finding>,
    /// The record the step produced, secrets redacted. `None` on failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<Value>,
}

impl StepReport {
    fn new(step: Step, outcome: StepOutcome) -> Self {
        Self {
            step,
            outcome,
            warnings: Vec::new(),
            findings: Vec::new(),
            detail: None,
        }
    }

    fn with_findings(mut self, findings: Vec<Finding>) -> Self {
        self.findings = findings;
        self
    }

    fn with_detail<T: Serialize>(mut self, detail: &T) -> Self {
        self.detail = serde_json::to_value(detail).ok();
        self
    }
}

/// Result of a whole demo run.
#[derive(Debug, Clone, Serialize)]
pub struct DemoReport {
    /// Profile the run used.
    pub profile: Profile,
    /// Step reports in execution order.
    pub steps: Vec<StepReport>,
    /// Always true once `run_demo` returns.
    pub completed: bool,
}

impl DemoReport {
    /// All findings across steps.
    pub fn findings(&self) -> impl Iterator<Item = &Finding> {
        self.steps.iter().flat_map(|s| s.findings.iter())
    }

    /// Number of steps that failed.
    #[must_use]
    pub fn failed_count(&self) -> usize {
        self.steps.iter().filter(|s| s.outcome.is_failed()).count()
    }

    /// Final status line.
    #[must_use]
    pub fn completion_message(&self) -> &'static str {
        match self.profile {
            Profile::Insecure => "Application started (with security vulnerabilities)",
            Profile::Hardened => "Application started",
        }
    }
}

/// Receives step progress from [`run_demo`].
pub trait StepObserver {
    /// Called before a step starts.
    fn step_started(&mut self, _step: Step) {}

    /// Called as soon as a step finishes.
    fn step_finished(&mut self, report: &StepReport);
}

struct Run<'o> {
    observer: &'o mut dyn StepObserver,
    steps: Vec<StepReport>,
}

impl Run<'_> {
    fn start(&mut self, step: Step) {
        debug!(?step, "Starting step");
        self.observer.step_started(step);
    }

    fn finish(&mut self, report: StepReport) {
        self.observer.step_finished(&report);
        self.steps.push(report);
    }
}

/// Runs the demo: fetch, database config and connection, network config,
/// authentication and encryption, in that order.
///
/// Never fails. Step errors are logged and recorded in the report.
#[instrument(skip_all, fields(profile = %config.profile))]
pub async fn run_demo(
    config: &AppConfig,
    provider: &dyn CredentialProvider,
    observer: &mut dyn StepObserver,
) -> DemoReport {
    let mut run = Run {
        observer,
        steps: Vec::with_capacity(6),
    };

    run.start(Step::FetchData);
    run.finish(fetch_step(config, provider).await);

    run.start(Step::DatabaseConfig);
    let (report, db_config) = database_config_step(config);
    run.finish(report);

    run.start(Step::DatabaseConnection);
    run.finish(database_connection_step(config, &db_config).await);

    run.start(Step::NetworkConfig);
    run.finish(network_step(config));

    let manager = SecurityManager::from_provider(provider, config.encryption_enabled());

    run.start(Step::Authentication);
    run.finish(authentication_step(&manager));

    run.start(Step::Encryption);
    run.finish(encryption_step(&manager));

    DemoReport {
        profile: config.profile,
        steps: run.steps,
        completed: true,
    }
}

async fn fetch_step(config: &AppConfig, provider: &dyn CredentialProvider) -> StepReport {
    let request = RemoteRequestConfig::new(
        &config.api.base_url,
        &provider.api_credentials(),
        config.verify_tls(),
    );
    let findings = audit::audit_request(&request);
    let timeout = Duration::from_secs(config.api.timeout_seconds);

    let result = match ApiClient::new(request, timeout) {
        Ok(client) => client.fetch_data().await,
        Err(e) => Err(e),
    };

    let report = match result {
        Ok(data) => {
            let outcome =
                StepOutcome::Completed(format!("API data received ({} fields)", data.len()));
            StepReport::new(Step::FetchData, outcome).with_detail(&data)
        }
        Err(e) => {
            warn!(error = %e, "API request failed");
            let outcome = StepOutcome::Failed(format!("API request failed: {e}"));
            StepReport::new(Step::FetchData, outcome)
        }
    };
    report.with_findings(findings)
}

fn database_config_step(config: &AppConfig) -> (StepReport, DatabaseConfig) {
    let db_config = match config.profile {
        Profile::Insecure => database::build_database_config(&config.database),
        Profile::Hardened => database::build_hardened_database_config(&config.database),
    };

    let encryption = if db_config.encryption_enabled {
        "enabled"
    } else {
        "disabled"
    };
    let outcome = StepOutcome::Completed(format!(
        "Database configured for {}@{}:{} (encryption {encryption})",
        db_config.user, db_config.host, db_config.port
    ));
    let report = StepReport::new(Step::DatabaseConfig, outcome)
        .with_findings(audit::audit_database(&db_config))
        .with_detail(&db_config);

    (report, db_config)
}

async fn database_connection_step(config: &AppConfig, db_config: &DatabaseConfig) -> StepReport {
    let timeout = Duration::from_secs(config.database.connect_timeout_seconds);
    match database::connect(db_config, timeout).await {
        Ok(handle) => {
            handle.close();
            StepReport::new(
                Step::DatabaseConnection,
                StepOutcome::Completed("Database connected successfully".to_string()),
            )
        }
        Err(e) => {
            warn!(error = %e, "Database connection failed");
            StepReport::new(
                Step::DatabaseConnection,
                StepOutcome::Failed(format!("Database connection failed: {e}")),
            )
        }
    }
}

fn network_step(config: &AppConfig) -> StepReport {
    let net = match config.profile {
        Profile::Insecure => network::build_network_config(),
        Profile::Hardened => network::build_restricted_network_config(&config.network),
    };

    let sources: Vec<&str> = net.allowed_sources.iter().map(String::as_str).collect();
    let ports: Vec<String> = net.ports.iter().map(ToString::to_string).collect();
    let outcome = StepOutcome::Completed(format!(
        "Network configured: sources [{}], ports [{}], allow_all={}",
        sources.join(", "),
        ports.join(", "),
        net.allow_all
    ));

    StepReport::new(Step::NetworkConfig, outcome)
        .with_findings(audit::audit_network(&net))
        .with_detail(&net)
}

fn authentication_step(manager: &SecurityManager) -> StepReport {
    let authenticated =
        manager.authenticate(samples::SAMPLE_ADMIN_USER, samples::SAMPLE_ADMIN_PASSWORD);
    let message = if authenticated {
        "Admin authenticated successfully with the sample credentials"
    } else {
        "Sample admin credentials rejected"
    };

    StepReport::new(Step::Authentication, StepOutcome::Completed(message.to_string()))
        .with_findings(audit::audit_security(manager))
}

fn encryption_step(manager: &SecurityManager) -> StepReport {
    let sealed = manager.encrypt(SAMPLE_PAYLOAD);

    let mut report = StepReport::new(
        Step::Encryption,
        StepOutcome::Completed(format!("Data processed: {}", sealed.data)),
    )
    .with_detail(&sealed);
    report.warnings.extend(sealed.warning.map(String::from));
    report
}
