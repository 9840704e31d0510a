//! Client configuration.
//!
//! `PartnerConfig::default()` targets the public endpoint. `from_env()` layers
//! `PARTNER_CENTER_*` environment variables over the defaults.

use std::time::Duration;

use crate::error::{PartnerError, Result};

pub const DEFAULT_BASE_URL: &str = "https://api.partnercenter.microsoft.com";
pub const DEFAULT_API_VERSION: &str = "v1";
pub const DEFAULT_LOCALE: &str = "en-US";

const ENV_BASE_URL: &str = "PARTNER_CENTER_BASE_URL";
const ENV_API_VERSION: &str = "PARTNER_CENTER_API_VERSION";
const ENV_LOCALE: &str = "PARTNER_CENTER_LOCALE";
const ENV_ACCESS_TOKEN: &str = "PARTNER_CENTER_ACCESS_TOKEN";
const ENV_TIMEOUT_SECS: &str = "PARTNER_CENTER_TIMEOUT_SECS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartnerConfig {
    /// Scheme and host, without a trailing slash.
    pub base_url: String,
    /// Version segment placed between the base URL and every route path.
    pub api_version: String,
    pub locale: String,
    pub user_agent: String,
    /// Sent as a bearer token when present.
    pub access_token: Option<String>,
    /// Applied by the default transport; `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl Default for PartnerConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            locale: DEFAULT_LOCALE.to_string(),
            user_agent: format!("partnercenter-rust/{}", env!("CARGO_PKG_VERSION")),
            access_token: None,
            timeout: Some(Duration::from_secs(60)),
        }
    }
}

impl PartnerConfig {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            ..Self::default()
        }
    }

    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }

    /// Read overrides from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as `from_env` with an injectable lookup, so tests never touch the
    /// real environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(url) = lookup(ENV_BASE_URL) {
            config.base_url = url.trim_end_matches('/').to_string();
        }
        if let Some(version) = lookup(ENV_API_VERSION) {
            config.api_version = version.trim_matches('/').to_string();
        }
        if let Some(locale) = lookup(ENV_LOCALE) {
            config = config.with_locale(locale);
        }
        if let Some(token) = lookup(ENV_ACCESS_TOKEN).filter(|t| !t.trim().is_empty()) {
            config = config.with_access_token(token);
        }
        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            let secs: u64 = raw.trim().parse().map_err(|_| {
                PartnerError::configuration(format!(
                    "{ENV_TIMEOUT_SECS} must be a whole number of seconds, got {raw:?}"
                ))
            })?;
            config.timeout = (secs > 0).then(|| Duration::from_secs(secs));
        }
        Ok(config)
    }

    /// Prefix every resolved route path is appended to.
    pub fn endpoint(&self) -> String {
        if self.api_version.is_empty() {
            self.base_url.clone()
        } else {
            format!("{}/{}", self.base_url, self.api_version)
        }
    }
}
