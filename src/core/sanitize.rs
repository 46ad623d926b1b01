// src/core/sanitize.rs
use crate::config::consts::SLUG_MAX_CHARS;

pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

/// Drop leading `-<whitespace>` runs, as left over when the title span is
/// cut out of `<h1><span>Title</span> - Location</h1>`.
pub fn strip_leading_dashes(s: &str) -> &str {
    let mut rest = s;
    loop {
        let Some(after) = rest.strip_prefix('-') else { return rest };
        let trimmed = after.trim_start();
        if trimmed.len() == after.len() {
            // a dash not followed by whitespace belongs to the text
            return rest;
        }
        rest = trimmed;
    }
}

/// Filesystem-safe fragment of a trip title:
/// "Mt. Tam: Ridgecrest Blvd to Alpine Lake via..." -> "mt-tam-ridgecrest-blvd-to-alpi".
pub fn title_slug(title: &str) -> String {
    let mut out = String::with_capacity(title.len());
    let mut last_dash = false;
    for ch in title.to_lowercase().chars() {
        match ch {
            '.' | ',' => {}
            c if c.is_whitespace() || c == ':' || c == '/' || c == '\\' => {
                if !last_dash { out.push('-'); last_dash = true; }
            }
            '-' => {
                if !last_dash { out.push('-'); last_dash = true; }
            }
            c => { out.push(c); last_dash = false; }
        }
    }
    out.chars().take(SLUG_MAX_CHARS).collect()
}

/// `<id>-<slug>`, the per-trip output directory name.
pub fn trip_dir_name(trip_id: &str, title: &str) -> String {
    format!("{trip_id}-{}", title_slug(title))
}
