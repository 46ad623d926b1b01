// src/specs/mod.rs
//! # Page readers
//!
//! One module per EveryTrail page. Each reader encodes *where the data lives
//! in the markup* and turns a parsed [`Page`](crate::core::html::Page) into a
//! small typed struct.
//!
//! ## What lives here
//! - **Selector choice** for each page (the only place CSS selectors appear).
//! - **Anchor naming**: when a selector finds nothing, the reader fails with
//!   `ExtractionFailure` naming the anchor it expected, never a guessed default.
//! - **URL resolution** of links relative to the page they were found on.
//!
//! ## What does **not** live here
//! - **Networking and retries** (`core::fetch`).
//! - **Writing files** and deciding which pages to visit (`runner`).
//!
//! ## Typical call chain
//! ```text
//! runner::TripExporter → Fetcher::fetch → Page::parse → specs::<page>::read*
//!                                                     ↘ typed struct
//!                       file::save_* (outside of specs)
//! ```
//!
//! ## Pages
//! - `listing` – trip id normalization and listing pages (`my_trips.php`, ...).
//! - `trip` – title, location, story, stats, gallery link.
//! - `gallery` – photo page links in grid order.
//! - `photo` – coordinates, title, original page; then the full-size image URL.
//!
//! Readers are testable offline against inline fixtures.
pub mod gallery;
pub mod listing;
pub mod photo;
pub mod trip;
