// src/specs/trip.rs
// The trip page: `/view_trip.php?trip_id=N`.
//
//   <h1><span>{title}</span> - {location}</h1>
//   <div class="main-column-container left"><div><div>{story}</div>...</div></div>
//   <div class="right-column left"> ... <div class="content">Trip Info ...</div></div>
//   <a href="...">See all pictures</a>        (only when there is a gallery)

use crate::core::html::{attr, text_of, text_without, Page};
use crate::core::sanitize::strip_leading_dashes;
use crate::error::Result;

const TITLE: &str = "h1 span";
const HEADING: &str = "h1";
const INFO: &str = ".main-column-container.left > div > div";
const STATS: &str = ".right-column.left .content";
const STATS_MARKER: &str = "Trip Info";
const GALLERY_MARKER: &str = "See all pictures";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TripPage {
    pub title: String,
    pub location: String,
    pub info_html: String,
    pub stats_html: String,
    /// Absolute URL of the photo gallery, if the trip has one.
    pub gallery_url: Option<String>,
}

pub fn read(page: &Page) -> Result<TripPage> {
    let (title, location) = read_heading(page)?;
    Ok(TripPage {
        title,
        location,
        info_html: read_info(page)?,
        stats_html: read_stats(page)?,
        gallery_url: gallery_url(page)?,
    })
}

/// `(title, location)` from the first `<h1>`.
pub fn read_heading(page: &Page) -> Result<(String, String)> {
    let title = text_of(page.first(TITLE, "trip title (h1 span)")?);
    let heading = page.first(HEADING, "trip heading (h1)")?;
    let location = strip_leading_dashes(&text_without(heading, "span")).to_string();
    Ok((title, location))
}

/// Inner HTML of the story block.
pub fn read_info(page: &Page) -> Result<String> {
    Ok(page.first(INFO, "story block (.main-column-container.left > div > div)")?.inner_html())
}

/// Inner HTML of the sidebar block mentioning "Trip Info".
pub fn read_stats(page: &Page) -> Result<String> {
    Ok(page
        .first_containing(STATS, STATS_MARKER)?
        .ok_or_else(|| page.missing("\"Trip Info\" block (.right-column.left .content)"))?
        .inner_html())
}

/// The "See all pictures" link. Absent is normal: not every trip has photos.
pub fn gallery_url(page: &Page) -> Result<Option<String>> {
    let link = page.first_containing("a", GALLERY_MARKER)?;
    match link.and_then(|a| attr(a, "href")) {
        Some(href) => Ok(Some(page.resolve(href)?)),
        None => Ok(None),
    }
}
