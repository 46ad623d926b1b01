// src/lib.rs
//! Export EveryTrail trips (story, stats, GPX/KML, photos) to plain files.
//!
//! ```text
//! cli → runner::TripExporter → core::Fetcher (retry/backoff) → core::net::Transport
//!                            ↘ specs::* (page readers) → file::* (trip directory)
//! ```

pub mod config;
pub mod core;
pub mod data;
pub mod error;
pub mod file;
pub mod log;
pub mod progress;
pub mod runner;
pub mod specs;

#[cfg(feature = "cli")]
pub mod cli;

pub use config::{BatchPolicy, ExportOptions, RetryPolicy};
pub use data::{GpsExports, Photo, Trip, TripId};
pub use error::{ExportError, Result};
pub use runner::{run, RunSummary, TripExporter};
pub use specs::listing::normalize_to_id;
