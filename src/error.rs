// src/error.rs
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ExportError>;

/// Everything that can stop a trip export.
///
/// Failures are never swallowed inside the library: they abort the current
/// trip and carry enough context (URL, expected vs. observed) to tell a site
/// markup change apart from an authentication problem. Whether one failed
/// trip halts a batch is decided by the caller (see `config::BatchPolicy`).
#[derive(Debug, Error)]
pub enum ExportError {
    /// Argument is neither a bare trip id nor a URL with a `trip_id` parameter.
    #[error("Argument is neither trip ID nor trip page URL: {0}")]
    InvalidReference(String),

    /// Every attempt came back as a retryable failure.
    #[error("{message}\n(gave up on {url} after {attempts} attempt(s); last problem: {last_problem})")]
    RetryExhausted {
        url: String,
        attempts: u32,
        last_problem: String,
        message: String,
    },

    #[error(
        "GPX response came back with content-type \"{found}\", expected \"{expected}\"\n\
         Content: \"{snippet}\"\n{hint}"
    )]
    UnexpectedContentType {
        url: String,
        expected: &'static str,
        found: String,
        snippet: String,
        hint: String,
    },

    /// A page lacked the structural anchor an extraction step relies on.
    #[error("expected {anchor} on {url}, but the page does not have it (site markup changed?)")]
    ExtractionFailure { url: String, anchor: &'static str },

    #[error("download of {url} failed with HTTP status {status}")]
    DownloadFailed { url: String, status: u16 },

    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("invalid URL {url}: {source}")]
    Url {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("invalid CSS selector: {0}")]
    Selector(String),
}

impl ExportError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }

    pub(crate) fn missing(url: &str, anchor: &'static str) -> Self {
        Self::ExtractionFailure { url: url.to_string(), anchor }
    }

    /// Short tag for summaries and log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidReference(_) => "invalid-reference",
            Self::RetryExhausted { .. } => "retry-exhausted",
            Self::UnexpectedContentType { .. } => "unexpected-content-type",
            Self::ExtractionFailure { .. } => "extraction-failure",
            Self::DownloadFailed { .. } => "download-failed",
            Self::Transport { .. } => "transport",
            Self::Io { .. } => "io",
            Self::Json(_) => "json",
            Self::Url { .. } => "url",
            Self::Selector(_) => "selector",
        }
    }
}
