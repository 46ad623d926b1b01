// src/specs/gallery.rs
// The "See all pictures" page: a grid of thumbnails linking to photo pages.

use crate::core::html::{attr, Page};
use crate::error::Result;

const PHOTO_LINKS: &str = ".pictures-container .center a";

/// Absolute photo-page URLs, in gallery order. An empty grid is not an error.
pub fn photo_links(page: &Page) -> Result<Vec<String>> {
    page.select_all(PHOTO_LINKS)?
        .into_iter()
        .filter_map(|a| attr(a, "href"))
        .map(|href| page.resolve(href))
        .collect()
}
