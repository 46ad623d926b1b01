// src/runner.rs
use std::path::{Path, PathBuf};

use tracing::{error, info};

use crate::{
    config::{consts::*, BatchPolicy, ExportOptions},
    core::{
        net::Cookie, sanitize::trip_dir_name, CoordinateScraper, Fetcher, GLatLng, HttpTransport,
        Page, Pause, ThreadPause, Transport,
    },
    data::{GpsExports, Photo, Trip, TripId},
    error::{ExportError, Result},
    file::{encode_html_for_file, ensure_directory, save_to_file, to_json_bytes, write_streamed},
    progress::Progress,
    specs,
};

/// Exports whole trips: pages, GPS files, photos.
///
/// Every request goes through one [`Fetcher`], strictly one at a time.
/// Each `export_trip` call is independent; re-running overwrites in place.
pub struct TripExporter<T, P = ThreadPause> {
    fetcher: Fetcher<T, P>,
    options: ExportOptions,
    coords: Box<dyn CoordinateScraper>,
}

impl TripExporter<HttpTransport> {
    /// Exporter over the real network.
    pub fn new(options: ExportOptions) -> Result<Self> {
        let transport = HttpTransport::new(options.timeout)?;
        let fetcher = Fetcher::new(transport, options.retry.clone());
        Ok(Self::with_fetcher(fetcher, options))
    }
}

impl<T: Transport, P: Pause> TripExporter<T, P> {
    pub fn with_fetcher(fetcher: Fetcher<T, P>, options: ExportOptions) -> Self {
        Self { fetcher, options, coords: Box::new(GLatLng) }
    }

    /// Replace the photo-coordinate scrape (the site's inline map script).
    pub fn with_coordinate_scraper(mut self, coords: impl CoordinateScraper + 'static) -> Self {
        self.coords = Box::new(coords);
        self
    }

    fn get_page(&self, url: &str) -> Result<Page> {
        let resp = self.fetcher.fetch(url, &[], DEFAULT_RETRIES_MESSAGE)?;
        Ok(Page::parse(url, &resp.body))
    }

    fn save(&self, dir: &Path, filename: &str, contents: &[u8], progress: &mut dyn Progress) -> Result<PathBuf> {
        let path = save_to_file(dir, filename, contents)?;
        progress.saved(&path);
        Ok(path)
    }

    /// Trip ids linked from a listing page such as `my_trips.php?user_id=N`.
    pub fn list_trip_ids(&self, listing_url: &str, progress: &mut dyn Progress) -> Result<Vec<TripId>> {
        progress.log(&format!("Scraping {listing_url} for trip URLs..."));
        let page = self.get_page(listing_url)?;
        let ids = specs::listing::trip_ids(&page)?;
        let shown: Vec<&str> = ids.iter().map(TripId::as_str).collect();
        progress.log(&format!("Found links to {} trips: {}", ids.len(), shown.join(" ")));
        Ok(ids)
    }

    /// Fetch one trip and write it under `out_dir/<id>-<slug>/`.
    pub fn export_trip(&self, trip_id: &TripId, progress: &mut dyn Progress) -> Result<Trip> {
        let id = trip_id.as_str();
        let trip_url = self.options.trip_url(id);
        progress.log(&format!("Downloading {trip_url}"));

        let page = self.get_page(&trip_url)?;
        let (title, location) = specs::trip::read_heading(&page)?;

        let dir = self.options.out_dir.join(trip_dir_name(id, &title));
        ensure_directory(&dir)?;

        progress.log(&format!("  {title} - {location}"));
        self.save(&dir, TITLE_FILE, format!("{title}\n{location}").as_bytes(), progress)?;

        let info_html = specs::trip::read_info(&page)?;
        self.save(&dir, INFO_FILE, &encode_html_for_file(&info_html), progress)?;

        let stats_html = specs::trip::read_stats(&page)?;
        self.save(&dir, STATS_FILE, &encode_html_for_file(&stats_html), progress)?;

        let gps = match self.options.auth() {
            Some(cookie) => Some(self.export_gps(trip_id, &dir, cookie, progress)?),
            None => {
                progress.log("  ----- Skipping GPX and KML files, since no TRAILAUTH cookie was provided. -----");
                None
            }
        };

        let photos = if self.options.skip_photos {
            None
        } else {
            match specs::trip::gallery_url(&page)? {
                Some(gallery_url) => Some(self.export_photos(&dir, &gallery_url, progress)?),
                None => {
                    progress.log("  No \"See all pictures\" link; this trip has no photos.");
                    None
                }
            }
        };

        info!(trip_id = id, dir = %dir.display(), "trip exported");
        Ok(Trip { id: trip_id.clone(), title, location, info_html, stats_html, gps, photos, dir })
    }

    fn export_gps(
        &self,
        trip_id: &TripId,
        dir: &Path,
        cookie: Cookie<'_>,
        progress: &mut dyn Progress,
    ) -> Result<GpsExports> {
        let id = trip_id.as_str();
        progress.log("  Saving GPX and KML files...");

        let gpx_url = self.options.gpx_url(id);
        progress.log(&format!("  Downloading {gpx_url}"));
        let hint = format!(
            "Did you enter your TRAILAUTH cookie correctly?\nCan you access {gpx_url} directly from your browser?"
        );
        let gpx = self.fetcher.fetch(&gpx_url, &[cookie], &format!("Retried too many times.\n{hint}"))?;

        if gpx.content_type().as_deref() != Some(GPX_CONTENT_TYPE) {
            let shown = &gpx.body[..gpx.body.len().min(CONTENT_SNIPPET_LEN)];
            return Err(ExportError::UnexpectedContentType {
                url: gpx_url,
                expected: GPX_CONTENT_TYPE,
                found: gpx.header("content-type").unwrap_or("(none)").to_string(),
                snippet: String::from_utf8_lossy(shown).into_owned(),
                hint,
            });
        }
        self.save(dir, &format!("{id}.gpx"), &gpx.body, progress)?;

        // Waypoints added by hand only show up in the KML export.
        // Once the GPX succeeded the cookie is good, so the generic hint applies.
        let kml_url = self.options.kml_url(id);
        progress.log(&format!("  Downloading {kml_url}"));
        let kmz = self.fetcher.fetch(&kml_url, &[cookie], DEFAULT_RETRIES_MESSAGE)?;
        self.save(dir, &format!("{id}.kmz"), &kmz.body, progress)?;

        Ok(GpsExports { gpx: gpx.body, kmz: kmz.body })
    }

    fn export_photos(&self, dir: &Path, gallery_url: &str, progress: &mut dyn Progress) -> Result<Vec<Photo>> {
        let images_dir = dir.join(IMAGES_SUBDIR);
        ensure_directory(&images_dir)?;

        progress.log(&format!("  Downloading photos page: {gallery_url}"));
        let gallery = self.get_page(gallery_url)?;
        let links = specs::gallery::photo_links(&gallery)?;

        let mut photos = Vec::with_capacity(links.len());
        for (i, link) in links.iter().enumerate() {
            progress.photo_started(i + 1, links.len());
            self.fetcher.pause_for(self.options.photo_pause);
            photos.push(self.export_photo(&images_dir, link, progress)?);
        }

        self.save(dir, PHOTO_INFO_FILE, &to_json_bytes(&photos)?, progress)?;
        Ok(photos)
    }

    fn export_photo(&self, images_dir: &Path, photo_url: &str, progress: &mut dyn Progress) -> Result<Photo> {
        progress.log(&format!("    Downloading photo info page: {photo_url}"));
        let page = self.get_page(photo_url)?;
        let detail = specs::photo::read_detail(&page, self.coords.as_ref())?;

        progress.log(&format!("    Finding full photo: {}", detail.original_page_url));
        let original = self.get_page(&detail.original_page_url)?;
        let image = specs::photo::original_image(&original)?;

        progress.log(&format!("    Downloading full photo: {}", image.url));
        let dest = images_dir.join(&image.filename);
        write_streamed(&dest, |sink| self.fetcher.download(&image.url, sink))?;
        progress.saved(&dest);
        progress.log(&format!("    Saved \"{}\" to {}", detail.title, dest.display()));

        Ok(Photo {
            latitude: detail.latitude,
            longitude: detail.longitude,
            title: detail.title,
            filename: image.filename,
        })
    }
}

/// Outcome of a batch.
#[derive(Debug, Default)]
pub struct RunSummary {
    /// Trip id and the directory it was written to.
    pub exported: Vec<(TripId, PathBuf)>,
    /// Only filled under `BatchPolicy::KeepGoing`.
    pub failed: Vec<(TripId, ExportError)>,
}

/// Export `ids` in order. Under `StopOnError` the first failure is returned
/// as-is; under `KeepGoing` it is logged, recorded, and the batch moves on.
pub fn run<T: Transport, P: Pause>(
    exporter: &TripExporter<T, P>,
    ids: &[TripId],
    policy: BatchPolicy,
    progress: &mut dyn Progress,
) -> Result<RunSummary> {
    progress.begin(ids.len());
    let mut summary = RunSummary::default();

    for (i, id) in ids.iter().enumerate() {
        progress.trip_started(i + 1, ids.len(), id.as_str());
        match exporter.export_trip(id, progress) {
            Ok(trip) => summary.exported.push((id.clone(), trip.dir)),
            Err(e) if policy == BatchPolicy::KeepGoing => {
                error!(trip_id = %id, kind = e.kind(), "trip failed: {e}");
                progress.log(&format!("  ----- Trip {id} failed, moving on: {e} -----"));
                summary.failed.push((id.clone(), e));
            }
            Err(e) => {
                progress.finish();
                return Err(e);
            }
        }
    }

    progress.finish();
    Ok(summary)
}
