//! Console runtime configuration.
//!
//! This module defines configuration that should be resolved once at process startup and then
//! passed into the API client and screen controllers. Nothing in the core reads environment
//! variables itself; binaries read them and hand the raw values to the parsing helpers here.

use crate::constants::{DEFAULT_API_BASE_URL, DEFAULT_ASSET_BASE_URL};
use crate::{AdminError, AdminResult};
use std::str::FromStr;
use std::time::Duration;

/// How a confirmed delete is carried out.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DeleteMode {
    /// Remove from the screen's local list only; no network call is made.
    #[default]
    LocalOnly,
    /// Remove locally, then ask the remote API to delete the record as well.
    RemoteConfirmed,
}

impl FromStr for DeleteMode {
    type Err = AdminError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "local-only" | "local_only" | "localonly" => Ok(DeleteMode::LocalOnly),
            "remote-confirmed" | "remote_confirmed" | "remoteconfirmed" => {
                Ok(DeleteMode::RemoteConfirmed)
            }
            other => Err(AdminError::InvalidConfig(format!(
                "unknown delete mode '{other}' (expected local-only or remote-confirmed)"
            ))),
        }
    }
}

/// Console configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct ConsoleConfig {
    api_base_url: String,
    asset_base_url: String,
    delete_mode: DeleteMode,
    http_timeout: Option<Duration>,
}

impl ConsoleConfig {
    /// Create a new `ConsoleConfig`.
    ///
    /// Both base URLs must be absolute `http`/`https` URLs. Trailing slashes are stripped so
    /// endpoint paths can be appended verbatim.
    pub fn new(
        api_base_url: impl Into<String>,
        asset_base_url: impl Into<String>,
        delete_mode: DeleteMode,
        http_timeout: Option<Duration>,
    ) -> AdminResult<Self> {
        let api_base_url = normalise_base_url("api base url", api_base_url.into())?;
        let asset_base_url = normalise_base_url("asset base url", asset_base_url.into())?;

        Ok(Self {
            api_base_url,
            asset_base_url,
            delete_mode,
            http_timeout,
        })
    }

    pub fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    pub fn asset_base_url(&self) -> &str {
        &self.asset_base_url
    }

    pub fn delete_mode(&self) -> DeleteMode {
        self.delete_mode
    }

    pub fn http_timeout(&self) -> Option<Duration> {
        self.http_timeout
    }

    /// Full URL of an admin API endpoint, e.g. `endpoint_url("/admin/stats")`.
    pub fn endpoint_url(&self, path: &str) -> String {
        format!("{}/{}", self.api_base_url, path.trim_start_matches('/'))
    }

    /// Resolve a relative image or media filename against the asset base URL.
    ///
    /// Returns `None` for an absent or empty reference. References that are already absolute
    /// URLs are returned unchanged.
    pub fn asset_url(&self, reference: Option<&str>) -> Option<String> {
        let reference = reference.filter(|r| !r.is_empty())?;
        if reference.starts_with("http://") || reference.starts_with("https://") {
            return Some(reference.to_string());
        }
        Some(format!(
            "{}/{}",
            self.asset_base_url,
            reference.trim_start_matches('/')
        ))
    }
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.into(),
            asset_base_url: DEFAULT_ASSET_BASE_URL.into(),
            delete_mode: DeleteMode::LocalOnly,
            http_timeout: None,
        }
    }
}

fn normalise_base_url(label: &str, value: String) -> AdminResult<String> {
    let trimmed = value.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(AdminError::InvalidConfig(format!("{label} cannot be empty")));
    }

    let parsed = reqwest::Url::parse(trimmed)
        .map_err(|e| AdminError::InvalidConfig(format!("{label} '{trimmed}' is invalid: {e}")))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(AdminError::InvalidConfig(format!(
            "{label} must use http or https, got '{}'",
            parsed.scheme()
        )));
    }

    Ok(trimmed.to_string())
}

/// Pick a base URL from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns `default`.
pub fn base_url_from_env_value(value: Option<String>, default: &str) -> String {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Parse the delete mode from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns [`DeleteMode::LocalOnly`].
pub fn delete_mode_from_env_value(value: Option<String>) -> AdminResult<DeleteMode> {
    let value = value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());
    let parsed = value.map(|v| v.parse::<DeleteMode>()).transpose()?;

    Ok(parsed.unwrap_or_default())
}

/// Parse an HTTP timeout in whole seconds from an optional string value.
///
/// `None` or empty means "use the HTTP client's default". Zero is rejected.
pub fn http_timeout_from_env_value(value: Option<String>) -> AdminResult<Option<Duration>> {
    let Some(value) = value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
    else {
        return Ok(None);
    };

    let secs: u64 = value
        .parse()
        .map_err(|_| AdminError::InvalidConfig(format!("invalid timeout '{value}'")))?;
    if secs == 0 {
        return Err(AdminError::InvalidConfig(
            "timeout must be at least one second".into(),
        ));
    }

    Ok(Some(Duration::from_secs(secs)))
}
