// src/core/html.rs
// DOM helpers over `scraper`. Page readers in `specs` describe *what* to pick;
// this module knows how to pick it and how to report a missing anchor.

use scraper::{ElementRef, Html, Node, Selector};
use url::Url;

use super::sanitize::normalize_ws;
use crate::error::{ExportError, Result};

pub fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| ExportError::Selector(format!("{css}: {e}")))
}

/// A fetched page: where it came from, its DOM, and the raw markup
/// (some data only lives inside inline scripts).
pub struct Page {
    url: String,
    raw: String,
    doc: Html,
}

impl Page {
    pub fn parse(url: &str, body: &[u8]) -> Self {
        let raw = String::from_utf8_lossy(body).into_owned();
        let doc = Html::parse_document(&raw);
        Self { url: url.to_string(), raw, doc }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn select_all(&self, css: &str) -> Result<Vec<ElementRef<'_>>> {
        let sel = selector(css)?;
        Ok(self.doc.select(&sel).collect())
    }

    /// First match for `css`, or `ExtractionFailure` naming `anchor`.
    pub fn first(&self, css: &str, anchor: &'static str) -> Result<ElementRef<'_>> {
        let sel = selector(css)?;
        self.doc.select(&sel).next().ok_or_else(|| self.missing(anchor))
    }

    /// First match for `css` whose text contains `needle`.
    pub fn first_containing(&self, css: &str, needle: &str) -> Result<Option<ElementRef<'_>>> {
        Ok(self
            .select_all(css)?
            .into_iter()
            .find(|el| text_of(*el).contains(needle)))
    }

    /// Resolve `href` against this page's URL.
    pub fn resolve(&self, href: &str) -> Result<String> {
        let base = Url::parse(&self.url)
            .map_err(|source| ExportError::Url { url: self.url.clone(), source })?;
        base.join(href.trim())
            .map(String::from)
            .map_err(|source| ExportError::Url { url: href.to_string(), source })
    }

    pub fn missing(&self, anchor: &'static str) -> ExportError {
        ExportError::missing(&self.url, anchor)
    }
}

/// All text below `el`, whitespace collapsed.
pub fn text_of(el: ElementRef<'_>) -> String {
    normalize_ws(&el.text().collect::<String>())
}

/// Text below `el`, skipping any subtree rooted at an element named `skip`.
pub fn text_without(el: ElementRef<'_>, skip: &str) -> String {
    let mut out = String::new();
    collect_text(el, skip, &mut out);
    normalize_ws(&out)
}

fn collect_text(el: ElementRef<'_>, skip: &str, out: &mut String) {
    for child in el.children() {
        match child.value() {
            Node::Text(t) => out.push_str(t),
            Node::Element(e) if e.name().eq_ignore_ascii_case(skip) => {
                // a dropped subtree still separates the text around it
                out.push(' ');
            }
            Node::Element(_) => {
                if let Some(child_el) = ElementRef::wrap(child) {
                    collect_text(child_el, skip, out);
                }
            }
            _ => {}
        }
    }
}

pub fn attr<'a>(el: ElementRef<'a>, name: &str) -> Option<&'a str> {
    el.value().attr(name).map(str::trim).filter(|v| !v.is_empty())
}
