// tests/common/mod.rs
//
// Canned site for driving the exporter offline.
//
#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::io::Write;
use std::time::Duration;

use everytrail_export::core::net::{Cookie, HttpResponse, Pause, Transport};
use everytrail_export::core::Fetcher;
use everytrail_export::{ExportError, ExportOptions, Result, RetryPolicy, TripExporter};

pub const BASE: &str = "http://www.everytrail.com";

pub fn html(body: &str) -> HttpResponse {
    with_type(200, "text/html; charset=utf-8", body.as_bytes())
}

pub fn with_type(status: u16, content_type: &str, body: &[u8]) -> HttpResponse {
    let mut headers = HashMap::new();
    headers.insert("content-type".to_string(), content_type.to_string());
    HttpResponse { status, headers, body: body.to_vec() }
}

/// URL -> queued responses. The last queued response for a URL repeats.
#[derive(Default)]
pub struct CannedSite {
    pages: RefCell<HashMap<String, VecDeque<HttpResponse>>>,
    files: HashMap<String, Vec<u8>>,
    pub requests: RefCell<Vec<(String, Vec<(String, String)>)>>,
    pub downloads: RefCell<Vec<String>>,
}

impl CannedSite {
    pub fn page(mut self, url: &str, resp: HttpResponse) -> Self {
        self.pages.get_mut().entry(url.to_string()).or_default().push_back(resp);
        self
    }

    pub fn file(mut self, url: &str, bytes: &[u8]) -> Self {
        self.files.insert(url.to_string(), bytes.to_vec());
        self
    }

    pub fn hits(&self, url: &str) -> usize {
        self.requests.borrow().iter().filter(|(u, _)| u == url).count()
    }

    pub fn cookies_sent_to(&self, url: &str) -> Vec<Vec<(String, String)>> {
        self.requests.borrow().iter().filter(|(u, _)| u == url).map(|(_, c)| c.clone()).collect()
    }
}

impl Transport for CannedSite {
    fn get(&self, url: &str, cookies: &[Cookie<'_>]) -> Result<HttpResponse> {
        let sent = cookies.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        self.requests.borrow_mut().push((url.to_string(), sent));

        let mut pages = self.pages.borrow_mut();
        let queue = pages
            .get_mut(url)
            .unwrap_or_else(|| panic!("no canned response for {url}"));
        let resp = if queue.len() > 1 { queue.pop_front() } else { queue.front().cloned() };
        Ok(resp.expect("queue is never empty"))
    }

    fn download(&self, url: &str, sink: &mut dyn Write) -> Result<u64> {
        self.downloads.borrow_mut().push(url.to_string());
        match self.files.get(url) {
            Some(bytes) => {
                sink.write_all(bytes).expect("write to sink");
                Ok(bytes.len() as u64)
            }
            None => Err(ExportError::DownloadFailed { url: url.to_string(), status: 404 }),
        }
    }
}

#[derive(Default)]
pub struct RecordedPauses(pub RefCell<Vec<Duration>>);

impl Pause for RecordedPauses {
    fn pause(&self, d: Duration) {
        self.0.borrow_mut().push(d);
    }
}

impl RecordedPauses {
    pub fn secs(&self) -> Vec<u64> {
        self.0.borrow().iter().map(Duration::as_secs).collect()
    }
}

pub fn options(out_dir: &std::path::Path) -> ExportOptions {
    ExportOptions { out_dir: out_dir.to_path_buf(), base_url: BASE.to_string(), ..Default::default() }
}

pub fn exporter<'a>(
    site: &'a CannedSite,
    pauses: &'a RecordedPauses,
    options: ExportOptions,
) -> TripExporter<&'a CannedSite, &'a RecordedPauses> {
    let policy: RetryPolicy = options.retry.clone();
    TripExporter::with_fetcher(Fetcher::with_pause(site, pauses, policy), options)
}

pub fn trip_url(id: &str) -> String {
    format!("{BASE}/view_trip.php?trip_id={id}")
}

pub fn trip_page(title: &str, location: &str, gallery_href: Option<&str>) -> String {
    let gallery = gallery_href
        .map(|href| format!(r#"<p><a href="{href}">See all pictures</a></p>"#))
        .unwrap_or_default();
    format!(
        r#"<html><head><title>{title}</title></head><body>
          <h1><span>{title}</span> - {location}</h1>
          <div class="main-column-container left">
            <div>
              <div><p>Started early at the trailhead.</p></div>
              <div><p>Comments (0)</p></div>
            </div>
          </div>
          <div class="right-column left">
            <div class="content"><h3>Trip Info</h3><dl><dt>Length</dt><dd>9.4 miles</dd></dl></div>
          </div>
          {gallery}
        </body></html>"#
    )
}

pub fn gallery_page(photo_hrefs: &[&str]) -> String {
    let cells: String = photo_hrefs
        .iter()
        .map(|h| format!(r#"<div class="center"><a href="{h}"><img src="/thumb.jpg"></a></div>"#))
        .collect();
    format!(r#"<html><body><div class="pictures-container">{cells}</div></body></html>"#)
}

pub fn photo_page(title: &str, lat: f64, lng: f64, original_href: &str) -> String {
    format!(
        r#"<html><body>
          <h2 class="big-title">{title}</h2>
          <script type="text/javascript">
            var point = new GLatLng({lat}, {lng});
            map.addOverlay(new GMarker(point));
          </script>
          <a href="{original_href}">View Original</a>
        </body></html>"#
    )
}

pub fn original_page(src: &str) -> String {
    format!(r#"<html><body><img src="{src}"></body></html>"#)
}
