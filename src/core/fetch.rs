// src/core/fetch.rs
use std::time::Duration;

use tracing::{debug, warn};

use super::net::{Cookie, HttpResponse, Pause, ThreadPause, Transport};
use crate::config::RetryPolicy;
use crate::error::{ExportError, Result};

/// GET with status/marker validation and exponential backoff.
///
/// A response is a retryable failure when its status is not 200 or its body
/// contains the policy's error marker (the site serves a generic
/// "Application error" page with status 200 when it is struggling). Anything
/// else is returned as-is; content checks belong to the caller.
///
/// Meant for sequential use; the origin should never see concurrent requests.
pub struct Fetcher<T, P = ThreadPause> {
    transport: T,
    pause: P,
    policy: RetryPolicy,
}

impl<T: Transport> Fetcher<T, ThreadPause> {
    pub fn new(transport: T, policy: RetryPolicy) -> Self {
        Self::with_pause(transport, ThreadPause, policy)
    }
}

impl<T: Transport, P: Pause> Fetcher<T, P> {
    pub fn with_pause(transport: T, pause: P, policy: RetryPolicy) -> Self {
        Self { transport, pause, policy }
    }

    /// Why `resp` should be retried, or `None` if it counts as a success.
    pub fn classify(&self, resp: &HttpResponse) -> Option<String> {
        if resp.status != 200 {
            Some(format!("Response came back with HTTP status {}", resp.status))
        } else if resp.contains(&self.policy.error_marker) {
            Some(format!("Response came back \"{}\"", self.policy.error_marker))
        } else {
            None
        }
    }

    /// Fetch `url`, retrying up to `max_retries` requests in total.
    /// `exhausted` is the hint shown to the user if every attempt fails.
    pub fn fetch(&self, url: &str, cookies: &[Cookie<'_>], exhausted: &str) -> Result<HttpResponse> {
        let max = self.policy.max_retries;
        let mut last_problem = String::from("no request was made");

        for attempt in 0..max {
            if attempt > 0 {
                self.pause.pause(self.policy.backoff(attempt - 1));
            }
            let resp = self.transport.get(url, cookies)?;
            match self.classify(&resp) {
                None => {
                    debug!(url, attempt, "fetch ok");
                    return Ok(resp);
                }
                Some(problem) => {
                    if attempt + 1 < max {
                        let wait = self.policy.backoff(attempt).as_secs();
                        warn!(url, attempt, "{problem}; trying again in {wait} seconds...");
                    } else {
                        warn!(url, attempt, "{problem}; giving up");
                    }
                    last_problem = problem;
                }
            }
        }

        Err(ExportError::RetryExhausted {
            url: url.to_string(),
            attempts: max,
            last_problem,
            message: exhausted.to_string(),
        })
    }

    /// Stream `url` into `sink` without retrying.
    pub fn download(&self, url: &str, sink: &mut dyn std::io::Write) -> Result<u64> {
        self.transport.download(url, sink)
    }

    /// Fixed politeness delay between requests that are not retries.
    pub fn pause_for(&self, d: Duration) {
        if !d.is_zero() {
            self.pause.pause(d);
        }
    }
}
