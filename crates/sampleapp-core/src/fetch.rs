// SPDX-License-Identifier: Apache-2.0

//! Remote data fetcher.
//!
//! Issues a single `GET {base_url}/data` with a bearer token. In the insecure
//! profile the base URL is plain HTTP and certificate verification is off.

use std::fmt::Display;
use std::time::Duration;

use reqwest::Client;
use reqwest::header::{AUTHORIZATION, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::ser::{SerializeStruct, Serializer};
use serde_json::{Map, Value};
use tracing::{debug, instrument};

use crate::auth::Credentials;
use crate::error::SampleError;

/// Path appended to the base URL.
pub const DATA_PATH: &str = "/data";

/// Everything needed to issue the fetch.
#[derive(Debug, Clone)]
pub struct RemoteRequestConfig {
    /// Full request URL (`{base_url}/data`).
    pub url: String,
    auth_header: SecretString,
    /// Verify TLS certificates.
    pub verify_tls: bool,
}

impl RemoteRequestConfig {
    /// Builds the request for `base_url` with the credential's secret as bearer token.
    ///
    /// Trailing slashes on `base_url` are dropped before `/data` is appended.
    #[must_use]
    pub fn new(base_url: &str, credentials: &Credentials, verify_tls: bool) -> Self {
        let url = format!("{}{DATA_PATH}", base_url.trim_end_matches('/'));
        let auth_header = SecretString::from(format!(
            "Bearer {}",
            credentials.secret().expose_secret()
        ));
        Self {
            url,
            auth_header,
            verify_tls,
        }
    }

    /// The `Authorization` header value (`Bearer <token>`).
    #[must_use]
    pub fn auth_header(&self) -> &SecretString {
        &self.auth_header
    }

    /// The bearer token without the scheme prefix.
    #[must_use]
    pub fn token(&self) -> &str {
        let header = self.auth_header.expose_secret();
        header.strip_prefix("Bearer ").unwrap_or(header)
    }

    /// True when the request travels over HTTPS.
    #[must_use]
    pub fn is_encrypted(&self) -> bool {
        self.url
            .get(..8)
            .is_some_and(|scheme| scheme.eq_ignore_ascii_case("https://"))
    }
}

impl Serialize for RemoteRequestConfig {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("RemoteRequestConfig", 3)?;
        state.serialize_field("url", &self.url)?;
        state.serialize_field("auth_header", "Bearer ********")?;
        state.serialize_field("verify_tls", &self.verify_tls)?;
        state.end()
    }
}

/// HTTP client bound to one [`RemoteRequestConfig`].
#[derive(Debug)]
pub struct ApiClient {
    request: RemoteRequestConfig,
    http: Client,
}

impl ApiClient {
    /// Creates a client honoring the request's TLS verification flag.
    ///
    /// # Errors
    ///
    /// Returns `SampleError::Request` if the HTTP client cannot be built.
    pub fn new(request: RemoteRequestConfig, timeout: Duration) -> Result<Self, SampleError> {
        let http = Client::builder()
            .timeout(timeout)
            .danger_accept_invalid_certs(!request.verify_tls)
            .build()?;

        Ok(Self { request, http })
    }

    /// The request this client issues.
    #[must_use]
    pub fn request(&self) -> &RemoteRequestConfig {
        &self.request
    }

    /// Fetches and parses the remote JSON object.
    ///
    /// # Errors
    ///
    /// Returns `SampleError::Request` on transport failure, a non-success
    /// status, an unparseable body, or a body that is not a JSON object.
    #[instrument(skip(self), fields(url = %self.request.url, verify_tls = self.request.verify_tls))]
    pub async fn fetch_data(&self) -> Result<Map<String, Value>, SampleError> {
        let url = &self.request.url;

        let mut header = HeaderValue::from_str(self.request.auth_header.expose_secret())
            .map_err(|e| request_error(url, e))?;
        header.set_sensitive(true);

        let response = self
            .http
            .get(url)
            .header(AUTHORIZATION, header)
            .send()
            .await
            .map_err(|e| request_error(url, e))?;

        let status = response.status();
        debug!(status = status.as_u16(), "Received response");
        let response = response
            .error_for_status()
            .map_err(|e| request_error(url, e))?;

        let body: Value = response.json().await.map_err(|e| request_error(url, e))?;
        match body {
            Value::Object(map) => Ok(map),
            other => Err(request_error(
                url,
                format!("expected a JSON object, got {}", json_kind(&other)),
            )),
        }
    }
}

fn request_error(url: &str, err: impl Display) -> SampleError {
    SampleError::Request {
        url: url.to_string(),
        message: err.to_string(),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
