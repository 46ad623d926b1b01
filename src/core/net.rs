// src/core/net.rs
// Plain HTTP GET behind a small trait, so the fetcher and the exporter can be
// driven by canned responses in tests.

use std::collections::HashMap;
use std::io::Write;
use std::thread;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::COOKIE;
use tracing::debug;

use crate::config::consts::USER_AGENT;
use crate::error::{ExportError, Result};

/// `(name, value)` cookie pair.
pub type Cookie<'a> = (&'a str, &'a str);

/// A fully buffered response.
#[derive(Clone, Debug, Default)]
pub struct HttpResponse {
    pub status: u16,
    /// Header names are lower-cased.
    pub headers: HashMap<String, String>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_ascii_lowercase()).map(String::as_str)
    }

    /// Media type without parameters, e.g. `text/html` for `text/html; charset=utf-8`.
    pub fn content_type(&self) -> Option<String> {
        let raw = self.header("content-type")?;
        let media = raw.split(';').next().unwrap_or(raw).trim();
        Some(media.to_ascii_lowercase())
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn contains(&self, needle: &str) -> bool {
        let needle = needle.as_bytes();
        !needle.is_empty() && self.body.windows(needle.len()).any(|w| w == needle)
    }
}

/// One GET, no policy. Retry and validation live in `core::fetch`.
pub trait Transport {
    fn get(&self, url: &str, cookies: &[Cookie<'_>]) -> Result<HttpResponse>;

    /// Stream the body of `url` into `sink`; returns the number of bytes written.
    fn download(&self, url: &str, sink: &mut dyn Write) -> Result<u64>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn get(&self, url: &str, cookies: &[Cookie<'_>]) -> Result<HttpResponse> {
        (**self).get(url, cookies)
    }
    fn download(&self, url: &str, sink: &mut dyn Write) -> Result<u64> {
        (**self).download(url, sink)
    }
}

/// Blocking sleep between attempts; a trait so tests can record instead of wait.
pub trait Pause {
    fn pause(&self, d: Duration);
}

pub struct ThreadPause;

impl Pause for ThreadPause {
    fn pause(&self, d: Duration) {
        thread::sleep(d);
    }
}

impl<P: Pause + ?Sized> Pause for &P {
    fn pause(&self, d: Duration) {
        (**self).pause(d)
    }
}

/// `Cookie` header value for the given pairs.
pub fn cookie_header(cookies: &[Cookie<'_>]) -> String {
    cookies
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("; ")
}

/// reqwest-backed transport used by the CLI.
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|source| ExportError::Transport { url: String::new(), source })?;
        Ok(Self { client })
    }

    fn send(&self, url: &str, cookies: &[Cookie<'_>]) -> Result<reqwest::blocking::Response> {
        let mut req = self.client.get(url);
        if !cookies.is_empty() {
            req = req.header(COOKIE, cookie_header(cookies));
        }
        req.send().map_err(|source| ExportError::Transport { url: url.to_string(), source })
    }
}

impl Transport for HttpTransport {
    fn get(&self, url: &str, cookies: &[Cookie<'_>]) -> Result<HttpResponse> {
        debug!(url, cookies = cookies.len(), "GET");
        let resp = self.send(url, cookies)?;
        let status = resp.status().as_u16();
        let headers = resp
            .headers()
            .iter()
            .filter_map(|(k, v)| Some((k.as_str().to_ascii_lowercase(), v.to_str().ok()?.to_string())))
            .collect();
        let body = resp
            .bytes()
            .map_err(|source| ExportError::Transport { url: url.to_string(), source })?
            .to_vec();
        debug!(url, status, bytes = body.len(), "response");
        Ok(HttpResponse { status, headers, body })
    }

    fn download(&self, url: &str, sink: &mut dyn Write) -> Result<u64> {
        debug!(url, "GET (stream)");
        let mut resp = self.send(url, &[])?;
        let status = resp.status().as_u16();
        if status != 200 {
            return Err(ExportError::DownloadFailed { url: url.to_string(), status });
        }
        resp.copy_to(sink)
            .map_err(|source| ExportError::Transport { url: url.to_string(), source })
    }
}
