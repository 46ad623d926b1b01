// src/data.rs
//
// What one export produces. A `Trip` only lives for the duration of a run;
// everything in it is also written to the trip directory.

use std::cmp::Ordering;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::Serialize;

use crate::error::ExportError;

/// Numeric trip identifier, kept as the exact digit string the site uses.
///
/// Ordering is numeric (`"999" < "1000"`), with the raw string as a
/// tie-breaker so ids that differ only in leading zeros stay distinct.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TripId(String);

impl TripId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn significant(&self) -> &str {
        let s = self.0.trim_start_matches('0');
        if s.is_empty() { "0" } else { s }
    }
}

impl Ord for TripId {
    fn cmp(&self, other: &Self) -> Ordering {
        let (a, b) = (self.significant(), other.significant());
        a.len()
            .cmp(&b.len())
            .then_with(|| a.cmp(b))
            .then_with(|| self.0.cmp(&other.0))
    }
}

impl PartialOrd for TripId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for TripId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for TripId {
    type Err = ExportError;

    /// Accepts a bare id or a trip URL; see `specs::listing::normalize_to_id`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::specs::listing::normalize_to_id(s)
    }
}

impl TripId {
    /// Caller guarantees `digits` is non-empty ASCII digits.
    pub(crate) fn from_digits(digits: &str) -> Self {
        Self(digits.to_string())
    }
}

/// Metadata for one downloaded photo, in `photo_info.json` shape.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Photo {
    #[serde(rename = "lat")]
    pub latitude: f64,
    #[serde(rename = "lng")]
    pub longitude: f64,
    pub title: String,
    /// File name under `images/`, taken from the image URL.
    pub filename: String,
}

/// Authenticated exports. The KML carries hand-placed waypoints the GPX lacks.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GpsExports {
    pub gpx: Vec<u8>,
    pub kmz: Vec<u8>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Trip {
    pub id: TripId,
    pub title: String,
    pub location: String,
    pub info_html: String,
    pub stats_html: String,
    /// `None` when no auth cookie was supplied.
    pub gps: Option<GpsExports>,
    /// `None` when photos were skipped or the trip has no gallery.
    pub photos: Option<Vec<Photo>>,
    pub dir: PathBuf,
}
