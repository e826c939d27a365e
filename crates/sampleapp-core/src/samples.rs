// SPDX-License-Identifier: Apache-2.0

//! Literal values of the vulnerable sample.
//!
//! WARNING: these are intentionally hardcoded credentials. They are the
//! defaults of the `insecure` profile and exist so compliance scanners have
//! something to detect. DO NOT reuse them anywhere else.

/// Base URL of the sample API (plain HTTP).
pub const SAMPLE_BASE_URL: &str = "http://api.internal.com";

/// Bearer token sent to the sample API.
pub const SAMPLE_API_TOKEN: &str = "secret-key-hardcoded";

/// Database host of the sample.
pub const SAMPLE_DATABASE_HOST: &str = "db.example.com";

/// Database user of the sample.
pub const SAMPLE_DATABASE_USER: &str = "admin";

/// Database password of the sample.
pub const SAMPLE_DATABASE_PASSWORD: &str = "admin123";

/// Administrator account name.
pub const SAMPLE_ADMIN_USER: &str = "admin";

/// Administrator password.
pub const SAMPLE_ADMIN_PASSWORD: &str = "admin123";

/// Every secret literal that ships with either sample script.
const KNOWN_SAMPLE_SECRETS: &[&str] = &[
    SAMPLE_API_TOKEN,
    SAMPLE_DATABASE_PASSWORD,
    SAMPLE_ADMIN_PASSWORD,
    "password123",
    "sk-1234567890abcdef",
];

/// Returns true if `value` is one of the secrets embedded in the samples.
#[must_use]
pub fn is_sample_secret(value: &str) -> bool {
    KNOWN_SAMPLE_SECRETS.contains(&value)
}
