// src/config/consts.rs

// Net config
pub const URL_BASE: &str = "http://www.everytrail.com";
pub const TRIP_PATH: &str = "/view_trip.php?trip_id=";
pub const GPX_PATH: &str = "/downloadGPX.php?trip_id=";
pub const KML_PATH: &str = "/downloadKML.php?trip_id=";
pub const AUTH_COOKIE: &str = "TRAILAUTH";
pub const USER_AGENT: &str = concat!("everytrail_export/", env!("CARGO_PKG_VERSION"));
pub const HTTP_TIMEOUT_SECS: u64 = 60;

// Retry
pub const DEFAULT_MAX_RETRIES: u32 = 5;
pub const ERROR_MARKER: &str = "Application error";
pub const DEFAULT_RETRIES_MESSAGE: &str = "Retried too many times. Maybe EveryTrail is down?";

// Politeness
pub const PHOTO_PAUSE_MS: u64 = 1000; // between photo detail pages

// GPS
pub const GPX_CONTENT_TYPE: &str = "application/gpx+xml";
pub const CONTENT_SNIPPET_LEN: usize = 100;

// Output
pub const DEFAULT_OUT_DIR: &str = "trails";
pub const SLUG_MAX_CHARS: usize = 30;
pub const TITLE_FILE: &str = "title.txt";
pub const INFO_FILE: &str = "info.html";
pub const STATS_FILE: &str = "stats.html";
pub const IMAGES_SUBDIR: &str = "images";
pub const PHOTO_INFO_FILE: &str = "photo_info.json";
pub const HTML_CHARSET_PREFIX: &str = "<meta charset=\"utf-8\">\n";
