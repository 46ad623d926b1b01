// src/specs/photo.rs
// Photo detail page (coordinates, title, "View Original" link) and the
// original-size page behind it (a bare `<img>`).

use url::Url;

use crate::core::coords::CoordinateScraper;
use crate::core::html::{attr, text_of, Page};
use crate::error::Result;

const TITLE: &str = "h2.big-title";
const ORIGINAL_MARKER: &str = "View Original";

#[derive(Clone, Debug, PartialEq)]
pub struct PhotoDetail {
    pub latitude: f64,
    pub longitude: f64,
    pub title: String,
    /// Absolute URL of the page holding the full-resolution image.
    pub original_page_url: String,
}

pub fn read_detail(page: &Page, coords: &dyn CoordinateScraper) -> Result<PhotoDetail> {
    let (latitude, longitude) = coords.scrape(page.raw()).ok_or_else(|| page.missing(coords.anchor()))?;

    let title = text_of(page.first(TITLE, "photo title (h2.big-title)")?);

    let href = page
        .first_containing("a", ORIGINAL_MARKER)?
        .and_then(|a| attr(a, "href"))
        .ok_or_else(|| page.missing("\"View Original\" link"))?;

    Ok(PhotoDetail { latitude, longitude, title, original_page_url: page.resolve(href)? })
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OriginalImage {
    pub url: String,
    /// Final path segment of `url`; the name the image is saved under.
    pub filename: String,
}

pub fn original_image(page: &Page) -> Result<OriginalImage> {
    let img = page.first("img", "full-size image (img)")?;
    let src = attr(img, "src").ok_or_else(|| page.missing("full-size image source (img[src])"))?;
    let url = page.resolve(src)?;
    let filename = filename_from_url(&url).ok_or_else(|| page.missing("image file name in img[src]"))?;
    Ok(OriginalImage { url, filename })
}

/// Last non-empty path segment, percent-decoding left alone.
pub fn filename_from_url(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let name = parsed.path_segments()?.filter(|s| !s.is_empty()).last()?;
    // never let a crafted name climb out of images/
    if name == "." || name == ".." || name.contains('\\') {
        return None;
    }
    Some(name.to_string())
}
