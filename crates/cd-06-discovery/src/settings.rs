//! Runtime settings for the discovery service

use std::path::PathBuf;
use std::time::Duration;

use crate::error::DiscoveryError;

/// Env var naming the discovery document.
pub const CONFIG_PATH_ENV: &str = "CD_DISCOVERY_CONFIG";

/// Env var holding the authorization timeout in milliseconds.
pub const AUTHZ_TIMEOUT_ENV: &str = "CD_AUTHZ_TIMEOUT_MS";

pub const DEFAULT_CONFIG_PATH: &str = "config.json";

pub const DEFAULT_AUTHZ_TIMEOUT_MS: u64 = 5_000;

/// Settings for a [`DiscoveryService`](crate::DiscoveryService).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoverySettings {
    /// Location of the discovery document. A missing file means "not configured".
    pub config_path: PathBuf,
    /// Upper bound on a single authorization round trip.
    pub authz_timeout: Duration,
}

impl Default for DiscoverySettings {
    fn default() -> Self {
        Self {
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
            authz_timeout: Duration::from_millis(DEFAULT_AUTHZ_TIMEOUT_MS),
        }
    }
}

impl DiscoverySettings {
    pub fn new(config_path: impl Into<PathBuf>, authz_timeout: Duration) -> Result<Self, DiscoveryError> {
        let settings = Self {
            config_path: config_path.into(),
            authz_timeout,
        };
        settings.validate()?;
        Ok(settings)
    }

    /// Read settings from `CD_DISCOVERY_CONFIG` and `CD_AUTHZ_TIMEOUT_MS`.
    pub fn from_env() -> Result<Self, DiscoveryError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, DiscoveryError> {
        let mut settings = Self::default();

        if let Some(path) = lookup(CONFIG_PATH_ENV) {
            settings.config_path = PathBuf::from(path);
        }
        if let Some(raw) = lookup(AUTHZ_TIMEOUT_ENV) {
            let millis: u64 = raw.trim().parse().map_err(|_| {
                DiscoveryError::InvalidSettings(format!("{} is not a number of milliseconds: {}", AUTHZ_TIMEOUT_ENV, raw))
            })?;
            settings.authz_timeout = Duration::from_millis(millis);
        }

        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), DiscoveryError> {
        if self.config_path.as_os_str().is_empty() {
            return Err(DiscoveryError::InvalidSettings("config path is empty".into()));
        }
        if self.authz_timeout.is_zero() {
            return Err(DiscoveryError::InvalidSettings(
                "authorization timeout must be greater than zero".into(),
            ));
        }
        Ok(())
    }

    // Builder methods

    pub fn with_config_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_path = path.into();
        self
    }

    pub fn with_authz_timeout(mut self, timeout: Duration) -> Self {
        self.authz_timeout = timeout;
        self
    }
}
