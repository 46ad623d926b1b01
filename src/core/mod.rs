// src/core/mod.rs

pub mod coords;
pub mod fetch;
pub mod html;
pub mod net;
pub mod sanitize;

pub use coords::{CoordinateScraper, GLatLng};
pub use fetch::Fetcher;
pub use html::Page;
pub use net::{HttpResponse, HttpTransport, Pause, ThreadPause, Transport};
