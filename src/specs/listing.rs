// src/specs/listing.rs
// Trip references: bare ids, trip page URLs, and listing pages full of them.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::core::html::{attr, Page};
use crate::data::TripId;
use crate::error::{ExportError, Result};

static BARE_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+$").expect("bare id pattern is valid"));
static TRIP_ID_PARAM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[?&]trip_id=(\d+)").expect("trip_id pattern is valid"));
static TRIP_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"/view_trip\.php\?(?:[^#]*&)?trip_id=\d+").expect("trip link pattern is valid")
});

/// `"2991898"` or `"http://everytrail.com/view_trip.php?trip_id=2991898"` -> `2991898`.
pub fn normalize_to_id(arg: &str) -> Result<TripId> {
    let arg = arg.trim();
    if BARE_ID.is_match(arg) {
        return Ok(TripId::from_digits(arg));
    }
    TRIP_ID_PARAM
        .captures(arg)
        .and_then(|c| c.get(1))
        .map(|m| TripId::from_digits(m.as_str()))
        .ok_or_else(|| ExportError::InvalidReference(arg.to_string()))
}

/// Does `href` point at a trip page?
pub fn is_trip_link(href: &str) -> bool {
    TRIP_LINK.is_match(href)
}

/// Distinct trip ids linked from a listing page, ascending.
pub fn trip_ids(page: &Page) -> Result<Vec<TripId>> {
    let mut ids = BTreeSet::new();
    for a in page.select_all("a[href]")? {
        let Some(href) = attr(a, "href") else { continue };
        if is_trip_link(href) {
            ids.insert(normalize_to_id(href)?);
        }
    }
    Ok(ids.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_ids_pass_through() {
        for s in ["0", "7", "2991898", "000123"] {
            assert_eq!(normalize_to_id(s).unwrap().as_str(), s);
        }
    }

    #[test]
    fn urls_yield_trip_id_param() {
        let cases = [
            ("http://everytrail.com/view_trip.php?trip_id=2991898", "2991898"),
            ("http://www.everytrail.com/view_trip.php?trip_id=42&foo=bar", "42"),
            ("/view_trip.php?code=x&trip_id=9", "9"),
            ("http://www.everytrail.com/downloadGPX.php?trip_id=5", "5"),
        ];
        for (url, want) in cases {
            assert_eq!(normalize_to_id(url).unwrap().as_str(), want, "{url}");
        }
    }

    #[test]
    fn anything_else_is_invalid_reference() {
        for s in ["", "abc", "12a", "http://everytrail.com/my_trips.php?user_id=154142", "mytrip_id=3"] {
            let err = normalize_to_id(s).unwrap_err();
            assert!(matches!(err, ExportError::InvalidReference(_)), "{s}");
        }
    }

    #[test]
    fn listing_ids_are_deduplicated_and_sorted() {
        let html = r#"
            <a href="/view_trip.php?trip_id=1000">A</a>
            <a href="/view_trip.php?trip_id=999">B</a>
            <a href="http://www.everytrail.com/view_trip.php?trip_id=1000">A again</a>
            <a href="/my_trips.php?user_id=154142">mine</a>
            <a href="/downloadGPX.php?trip_id=5">gpx</a>
            <a name="anchor">no href</a>
        "#;
        let page = Page::parse("http://www.everytrail.com/my_trips.php?user_id=1", html.as_bytes());
        let ids = trip_ids(&page).unwrap();
        let got: Vec<&str> = ids.iter().map(TripId::as_str).collect();
        assert_eq!(got, ["999", "1000"]);
    }
}
