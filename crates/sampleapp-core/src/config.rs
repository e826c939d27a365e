// SPDX-License-Identifier: Apache-2.0

//! Configuration management for sampleapp.
//!
//! Provides layered configuration from files and environment variables.
//! Uses XDG-compliant paths with environment variable support.
//!
//! # Configuration Sources (in priority order)
//!
//! 1. Command-line overrides (`--profile`)
//! 2. Environment variables (prefix: `SAMPLEAPP_`)
//! 3. Config file: `~/.config/sampleapp/config.toml` (or `--config <path>`)
//! 4. Built-in defaults
//!
//! The built-in defaults are the literal values of the vulnerable sample
//! (see [`crate::samples`]). The `hardened` profile refuses to run with them.
//!
//! # Examples
//!
//! ```bash
//! # Inject the API token instead of using the sample literal
//! SAMPLEAPP_API__TOKEN=... SAMPLEAPP_PROFILE=hardened cargo run
//! ```

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use config::{Config, Environment, File, FileFormat};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::SampleError;
use crate::network::is_restricted_source;
use crate::samples;

/// Which variant of the sample runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Profile {
    /// Reproduces the vulnerable sample (hardcoded secrets, plain HTTP, open firewall).
    #[default]
    Insecure,
    /// Safe reference variant: injected secrets, HTTPS, encryption on, restricted network.
    Hardened,
}

impl Profile {
    /// Returns the lowercase name used in config files and on the command line.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Profile::Insecure => "insecure",
            Profile::Hardened => "hardened",
        }
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Sample variant to run.
    pub profile: Profile,
    /// Remote API settings.
    pub api: ApiConfig,
    /// Database settings.
    pub database: DatabaseSettings,
    /// Credential/auth manager settings.
    pub security: SecuritySettings,
    /// Restricted network settings (hardened profile only).
    pub network: NetworkSettings,
}

/// Remote API settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL; `/data` is appended.
    pub base_url: String,
    /// Bearer token.
    #[serde(deserialize_with = "deserialize_secret")]
    pub token: SecretString,
    /// Verify TLS certificates.
    pub verify_tls: bool,
    /// Request timeout in seconds.
    pub timeout_seconds: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: samples::SAMPLE_BASE_URL.to_string(),
            token: SecretString::from(samples::SAMPLE_API_TOKEN),
            verify_tls: false,
            timeout_seconds: 10,
        }
    }
}

/// Database settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    /// Database host.
    pub host: String,
    /// Database port.
    pub port: u16,
    /// Database name.
    pub name: String,
    /// Database user.
    pub user: String,
    /// Database password.
    #[serde(deserialize_with = "deserialize_secret")]
    pub password: SecretString,
    /// Timeout for the simulated connection attempt, in seconds.
    pub connect_timeout_seconds: u64,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            host: samples::SAMPLE_DATABASE_HOST.to_string(),
            port: 3306,
            name: "app".to_string(),
            user: samples::SAMPLE_DATABASE_USER.to_string(),
            password: SecretString::from(samples::SAMPLE_DATABASE_PASSWORD),
            connect_timeout_seconds: 3,
        }
    }
}

/// Credential/auth manager settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SecuritySettings {
    /// Administrator account name.
    pub admin_user: String,
    /// Administrator password.
    #[serde(deserialize_with = "deserialize_secret")]
    pub admin_password: SecretString,
    /// Whether `encrypt` tags data instead of passing it through.
    pub encryption_enabled: bool,
}

impl Default for SecuritySettings {
    fn default() -> Self {
        Self {
            admin_user: samples::SAMPLE_ADMIN_USER.to_string(),
            admin_password: SecretString::from(samples::SAMPLE_ADMIN_PASSWORD),
            encryption_enabled: false,
        }
    }
}

/// Restricted network settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct NetworkSettings {
    /// Source CIDRs allowed inbound.
    #[serde(deserialize_with = "deserialize_list")]
    pub allowed_sources: Vec<String>,
    /// Inbound TCP ports.
    #[serde(deserialize_with = "deserialize_list")]
    pub ports: Vec<u16>,
}

impl Default for NetworkSettings {
    fn default() -> Self {
        Self {
            allowed_sources: vec!["10.0.0.0/8".to_string()],
            ports: vec![443],
        }
    }
}

fn deserialize_secret<'de, D>(deserializer: D) -> Result<SecretString, D::Error>
where
    D: Deserializer<'de>,
{
    String::deserialize(deserializer).map(SecretString::from)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ListValue<T> {
    List(Vec<T>),
    Joined(String),
}

/// Accepts a TOML array or a comma separated string (environment variables).
fn deserialize_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + FromStr,
    T::Err: fmt::Display,
{
    match ListValue::<T>::deserialize(deserializer)? {
        ListValue::List(items) => Ok(items),
        ListValue::Joined(joined) => joined
            .split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(|item| item.parse().map_err(serde::de::Error::custom))
            .collect(),
    }
}

impl AppConfig {
    /// Whether TLS certificates are verified. Always true in the hardened profile.
    #[must_use]
    pub fn verify_tls(&self) -> bool {
        self.api.verify_tls || self.profile == Profile::Hardened
    }

    /// Whether the auth manager encrypts. Always true in the hardened profile.
    #[must_use]
    pub fn encryption_enabled(&self) -> bool {
        self.security.encryption_enabled || self.profile == Profile::Hardened
    }

    /// Checks the configuration against its profile.
    ///
    /// The insecure profile accepts anything. The hardened profile requires an
    /// HTTPS base URL, injected (non-sample, non-empty) secrets and at least
    /// one restricted network source.
    ///
    /// # Errors
    ///
    /// Returns `SampleError::Config` listing every problem found.
    pub fn validate(&self) -> Result<(), SampleError> {
        if self.profile == Profile::Insecure {
            return Ok(());
        }

        let mut problems = Vec::new();

        if !self.api.base_url.to_ascii_lowercase().starts_with("https://") {
            problems.push(format!("api.base_url must use https (got {})", self.api.base_url));
        }
        check_injected_secret(&mut problems, "api.token", &self.api.token);
        check_injected_secret(&mut problems, "database.password", &self.database.password);
        check_injected_secret(
            &mut problems,
            "security.admin_password",
            &self.security.admin_password,
        );
        if !self
            .network
            .allowed_sources
            .iter()
            .any(|source| is_restricted_source(source))
        {
            problems.push(
                "network.allowed_sources must name at least one restricted source".to_string(),
            );
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(SampleError::config(format!(
                "hardened profile rejected: {}",
                problems.join("; ")
            )))
        }
    }
}

fn check_injected_secret(problems: &mut Vec<String>, key: &str, secret: &SecretString) {
    let value = secret.expose_secret();
    if value.is_empty() {
        problems.push(format!("{key} must be set"));
    } else if samples::is_sample_secret(value) {
        problems.push(format!("{key} must not use the built-in sample value"));
    }
}

/// Returns the sampleapp configuration directory.
///
/// Respects the `XDG_CONFIG_HOME` environment variable if set,
/// otherwise defaults to `~/.config/sampleapp`.
///
/// # Errors
///
/// Returns `SampleError::Config` if neither `XDG_CONFIG_HOME` nor a home
/// directory is available.
pub fn config_dir() -> Result<PathBuf, SampleError> {
    if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME")
        && !xdg_config.is_empty()
    {
        return Ok(PathBuf::from(xdg_config).join("sampleapp"));
    }
    dirs::home_dir()
        .map(|home| home.join(".config").join("sampleapp"))
        .ok_or_else(|| {
            SampleError::config("could not determine home directory; set HOME or --config")
        })
}

/// Returns the path to the configuration file.
///
/// # Errors
///
/// See [`config_dir`].
pub fn config_file_path() -> Result<PathBuf, SampleError> {
    Ok(config_dir()?.join("config.toml"))
}

/// Load application configuration from the default locations.
///
/// # Errors
///
/// Returns `SampleError::Config` if the config file exists but is invalid,
/// or if the resulting configuration fails [`AppConfig::validate`].
pub fn load_config() -> Result<AppConfig, SampleError> {
    load_config_with(None, None)
}

/// Load application configuration with optional overrides.
///
/// `path` replaces the default config file location and must exist.
/// `profile` overrides whatever profile the file or environment selected.
/// Environment variables use the prefix `SAMPLEAPP_` and double underscore
/// for nested keys (e.g., `SAMPLEAPP_DATABASE__HOST`). Values are read
/// verbatim, so secrets like `0123` are not reinterpreted as numbers. List
/// values (`network.ports`, `network.allowed_sources`) are comma separated.
///
/// # Errors
///
/// Returns `SampleError::Config` on unreadable/invalid input or a failed
/// profile validation.
pub fn load_config_with(
    path: Option<&Path>,
    profile: Option<Profile>,
) -> Result<AppConfig, SampleError> {
    let file = match path {
        Some(path) => File::new(path.to_string_lossy().as_ref(), FileFormat::Toml).required(true),
        None => File::new(config_file_path()?.to_string_lossy().as_ref(), FileFormat::Toml)
            .required(false),
    };

    let config = Config::builder()
        .add_source(file)
        .add_source(
            Environment::with_prefix("SAMPLEAPP")
                .prefix_separator("_")
                .separator("__"),
        )
        .set_override_option("profile", profile.map(Profile::as_str))?
        .build()?;

    let app_config: AppConfig = config.try_deserialize()?;
    app_config.validate()?;

    Ok(app_config)
}
