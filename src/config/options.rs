// src/config/options.rs
use std::path::PathBuf;
use std::time::Duration;

use super::consts::*;

/// How hard the fetcher tries before giving up on a URL.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total number of requests allowed for one logical fetch.
    pub max_retries: u32,
    /// Body text that marks a 200 response as a server-side failure.
    pub error_marker: String,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            error_marker: ERROR_MARKER.to_string(),
        }
    }
}

impl RetryPolicy {
    /// Wait after failed attempt `attempt` (0-based): 2s, 4s, 8s, ...
    pub fn backoff(&self, attempt: u32) -> Duration {
        let secs = 1u64.checked_shl(attempt.saturating_add(1)).unwrap_or(u64::MAX);
        Duration::from_secs(secs)
    }
}

/// What a batch does when one trip fails.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BatchPolicy {
    #[default]
    StopOnError,
    KeepGoing,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportOptions {
    /// Root under which one directory per trip is created.
    pub out_dir: PathBuf,
    /// Value of the TRAILAUTH cookie; GPX/KML exports need it.
    pub auth_cookie: Option<String>,
    pub skip_photos: bool,
    pub base_url: String,
    pub retry: RetryPolicy,
    pub photo_pause: Duration,
    pub timeout: Duration,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from(DEFAULT_OUT_DIR),
            auth_cookie: None,
            skip_photos: false,
            base_url: URL_BASE.to_string(),
            retry: RetryPolicy::default(),
            photo_pause: Duration::from_millis(PHOTO_PAUSE_MS),
            timeout: Duration::from_secs(HTTP_TIMEOUT_SECS),
        }
    }
}

impl ExportOptions {
    fn endpoint(&self, path: &str, trip_id: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        format!("{base}{path}{trip_id}")
    }

    pub fn trip_url(&self, trip_id: &str) -> String {
        self.endpoint(TRIP_PATH, trip_id)
    }

    pub fn gpx_url(&self, trip_id: &str) -> String {
        self.endpoint(GPX_PATH, trip_id)
    }

    pub fn kml_url(&self, trip_id: &str) -> String {
        self.endpoint(KML_PATH, trip_id)
    }

    /// Auth cookie as a `(name, value)` pair, if one was supplied.
    pub fn auth(&self) -> Option<(&'static str, &str)> {
        self.auth_cookie
            .as_deref()
            .filter(|v| !v.trim().is_empty())
            .map(|v| (AUTH_COOKIE, v))
    }
}
