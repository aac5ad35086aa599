/// Dashboard configuration
///
/// Per-mode defaults reproduce the two observed dashboards. Every tunable can be
/// overridden through `DASHBOARD_*` environment variables.
use std::{path::PathBuf, time::Duration};

use url::Url;

use super::error::ConfigError;

pub const DEFAULT_ENDPOINT: &str = "http://15.236.201.18:5000/api/data";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_HISTORY_CAPACITY: usize = 500;

const ENV_ENDPOINT: &str = "DASHBOARD_ENDPOINT";
const ENV_INTERVAL: &str = "DASHBOARD_INTERVAL_SECS";
const ENV_TIMEOUT: &str = "DASHBOARD_TIMEOUT_SECS";
const ENV_WINDOW: &str = "DASHBOARD_WINDOW_SIZE";
const ENV_LOG_FILE: &str = "DASHBOARD_LOG_FILE";

/// Which of the two dashboards is running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Slow plain re-render (30s)
    Snapshot,
    /// Fast refresh with update counter and keyword highlighting (10s)
    Live,
}

impl Mode {
    pub fn default_interval(self) -> Duration {
        match self {
            Mode::Snapshot => Duration::from_secs(30),
            Mode::Live => Duration::from_secs(10),
        }
    }

    pub fn default_window_size(self) -> usize {
        match self {
            Mode::Snapshot => 15,
            Mode::Live => 20,
        }
    }

    /// Minimum series length before a chart is drawn
    pub fn min_chart_points(self) -> usize {
        match self {
            Mode::Snapshot => 1,
            // a single point cannot form a line
            Mode::Live => 2,
        }
    }

    pub fn tracks_refreshes(self) -> bool {
        matches!(self, Mode::Live)
    }

    pub fn highlights_activity(self) -> bool {
        matches!(self, Mode::Live)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    pub mode: Mode,
    /// Index service endpoint to poll
    pub endpoint: String,
    /// Pause between the end of one cycle and the start of the next
    pub interval: Duration,
    /// Per-fetch deadline
    pub timeout: Duration,
    /// Activity feed truncation length
    pub window_size: usize,
    /// Upper bound on retained chart points
    pub history_capacity: usize,
    /// Log destination; logging is disabled when unset
    pub log_file: Option<PathBuf>,
}

impl DashboardConfig {
    /// Defaults for the given mode
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            interval: mode.default_interval(),
            timeout: DEFAULT_TIMEOUT,
            window_size: mode.default_window_size(),
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            log_file: None,
        }
    }

    /// Defaults for the given mode, overridden by `DASHBOARD_*` env vars
    pub fn from_env(mode: Mode) -> Result<Self, ConfigError> {
        Self::from_lookup(mode, |key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an injectable lookup
    pub fn from_lookup<F>(mode: Mode, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::new(mode);

        if let Some(raw) = lookup(ENV_ENDPOINT) {
            let endpoint = Url::parse(raw.trim()).map_err(|e| invalid(ENV_ENDPOINT, &raw, e))?;
            config = config.with_endpoint(endpoint.as_str());
        }
        if let Some(raw) = lookup(ENV_INTERVAL) {
            config = config.with_interval(Duration::from_secs(parse_positive(ENV_INTERVAL, &raw)?));
        }
        if let Some(raw) = lookup(ENV_TIMEOUT) {
            config = config.with_timeout(Duration::from_secs(parse_positive(ENV_TIMEOUT, &raw)?));
        }
        if let Some(raw) = lookup(ENV_WINDOW) {
            config = config.with_window_size(parse_positive(ENV_WINDOW, &raw)? as usize);
        }
        if let Some(raw) = lookup(ENV_LOG_FILE).filter(|s| !s.trim().is_empty()) {
            config = config.with_log_file(PathBuf::from(raw.trim()));
        }

        Ok(config)
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_window_size(mut self, window_size: usize) -> Self {
        self.window_size = window_size;
        self
    }

    pub fn with_history_capacity(mut self, capacity: usize) -> Self {
        self.history_capacity = capacity;
        self
    }

    pub fn with_log_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_file = Some(path.into());
        self
    }
}

fn parse_positive(key: &'static str, raw: &str) -> Result<u64, ConfigError> {
    match raw.trim().parse::<u64>() {
        Ok(0) => Err(invalid(key, raw, "must be greater than zero")),
        Ok(value) => Ok(value),
        Err(e) => Err(invalid(key, raw, e)),
    }
}

fn invalid(key: &'static str, raw: &str, reason: impl ToString) -> ConfigError {
    ConfigError::Invalid {
        key,
        value: raw.to_string(),
        reason: reason.to_string(),
    }
}
