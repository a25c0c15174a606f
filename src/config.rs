use crate::domain::ports::push_channel::DEFAULT_EVENT;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://localhost:3000";
pub const DEFAULT_REPORTS_PATH: &str = "/api/reportes";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Collaborator settings, read from `ECOALERTAS_*` environment variables.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedConfig {
    pub api_url: String,
    pub reports_path: String,
    pub event: String,
    pub timeout: Duration,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.into(),
            reports_path: DEFAULT_REPORTS_PATH.into(),
            event: DEFAULT_EVENT.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl FeedConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Unset or invalid values fall back
    /// to defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let timeout = match lookup("ECOALERTAS_TIMEOUT_SECS") {
            Some(raw) => match raw.parse::<u64>() {
                Ok(secs) => Duration::from_secs(secs),
                Err(_) => {
                    tracing::warn!(value = %raw, "invalid ECOALERTAS_TIMEOUT_SECS, using default");
                    defaults.timeout
                }
            },
            None => defaults.timeout,
        };

        Self {
            api_url: lookup("ECOALERTAS_API_URL").unwrap_or(defaults.api_url),
            reports_path: lookup("ECOALERTAS_REPORTS_PATH").unwrap_or(defaults.reports_path),
            event: lookup("ECOALERTAS_EVENT").unwrap_or(defaults.event),
            timeout,
        }
    }

    pub fn reports_url(&self) -> String {
        format!(
            "{}/{}",
            self.api_url.trim_end_matches('/'),
            self.reports_path.trim_start_matches('/')
        )
    }
}
