// src/core/coords.rs
// Photo coordinates are not in the DOM; the site embeds them in an inline
// Google Maps script. Keep that scrape behind a trait so a markup change only
// touches this file.

use std::sync::LazyLock;

use regex::Regex;

/// Pulls `(latitude, longitude)` out of raw page markup.
pub trait CoordinateScraper {
    /// Human-readable description used in extraction errors.
    fn anchor(&self) -> &'static str;

    fn scrape(&self, raw: &str) -> Option<(f64, f64)>;
}

static GLATLNG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"GLatLng\(([^)]+)\)").expect("GLatLng pattern is valid"));

/// Reads the first `GLatLng(<lat>, <lng>)` literal.
#[derive(Clone, Copy, Debug, Default)]
pub struct GLatLng;

impl CoordinateScraper for GLatLng {
    fn anchor(&self) -> &'static str {
        "map coordinates literal GLatLng(<lat>, <lng>)"
    }

    fn scrape(&self, raw: &str) -> Option<(f64, f64)> {
        let args = GLATLNG.captures(raw)?.get(1)?.as_str();
        let (lat, lng) = args.split_once(',')?;
        // `f64::from_str` accepts "NaN" and "inf"; those are not coordinates
        let finite = |v: &str| v.trim().parse::<f64>().ok().filter(|x| x.is_finite());
        Some((finite(lat)?, finite(lng)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_first_literal() {
        let raw = r#"<script>var p = new GLatLng(37.9047, -122.6115); map.setCenter(new GLatLng(0, 0));</script>"#;
        assert_eq!(GLatLng.scrape(raw), Some((37.9047, -122.6115)));
    }

    #[test]
    fn tolerates_missing_space_after_comma() {
        assert_eq!(GLatLng.scrape("GLatLng(1.5,2.25)"), Some((1.5, 2.25)));
    }

    #[test]
    fn absent_or_garbled_literal_is_none() {
        assert_eq!(GLatLng.scrape("<p>no map here</p>"), None);
        assert_eq!(GLatLng.scrape("GLatLng(lat, lng)"), None);
        assert_eq!(GLatLng.scrape("GLatLng(12.0)"), None);
        assert_eq!(GLatLng.scrape("new GLatLng(NaN, inf)"), None);
        assert_eq!(GLatLng.scrape("GLatLng(37.9, -infinity)"), None);
    }
}
