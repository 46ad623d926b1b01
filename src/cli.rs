// src/cli.rs
use std::path::{Path, PathBuf};

use clap::{CommandFactory, Parser};

use crate::config::consts::{DEFAULT_MAX_RETRIES, DEFAULT_OUT_DIR, URL_BASE};
use crate::config::{BatchPolicy, ExportOptions, RetryPolicy};
use crate::data::TripId;
use crate::error::Result;
use crate::progress::Progress;
use crate::runner::{self, RunSummary, TripExporter};

/// Scrape EveryTrail trip page(s) and download their contents, including GPX,
/// story, and photos.
///
/// Arguments may be EveryTrail trip IDs (e.g. 2991898) or trip page URLs
/// (e.g. http://everytrail.com/view_trip.php?trip_id=2991898).
#[derive(Parser, Debug, Clone)]
#[command(name = "everytrail_export", version)]
pub struct Args {
    /// Trip ids or trip page URLs.
    #[arg(value_name = "TRIP_ID_OR_URL")]
    pub trips: Vec<String>,

    /// Value of the TRAILAUTH cookie from a browser logged into EveryTrail.
    /// Needed for GPX/KML downloads. Looks something like "d9b61a...".
    #[arg(long, value_name = "COOKIE", env = "TRAILAUTH", hide_env_values = true)]
    pub trailauth: Option<String>,

    /// Trip listing page to scrape for trip URLs,
    /// e.g. http://everytrail.com/my_trips.php?user_id=154142.
    #[arg(long, value_name = "URL")]
    pub trips_page: Option<String>,

    /// Don't download photos.
    #[arg(long)]
    pub skip_photos: bool,

    /// Directory where trip data is saved.
    #[arg(long, value_name = "DIR", default_value = DEFAULT_OUT_DIR)]
    pub out_dir: PathBuf,

    /// Requests per URL before giving up (backoff 2s, 4s, 8s, ...).
    #[arg(long, value_name = "N", default_value_t = DEFAULT_MAX_RETRIES)]
    pub max_retries: u32,

    /// Log a failed trip and continue with the next one instead of stopping.
    #[arg(long)]
    pub keep_going: bool,

    /// Site root, for mirrors or local fixtures.
    #[arg(long, value_name = "URL", default_value = URL_BASE, hide = true)]
    pub base_url: String,

    /// More diagnostics on stderr (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Append diagnostics to this file instead of stderr.
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

impl Args {
    pub fn export_options(&self) -> ExportOptions {
        ExportOptions {
            out_dir: self.out_dir.clone(),
            auth_cookie: self.trailauth.clone(),
            skip_photos: self.skip_photos,
            base_url: self.base_url.clone(),
            retry: RetryPolicy { max_retries: self.max_retries, ..Default::default() },
            ..Default::default()
        }
    }

    pub fn batch_policy(&self) -> BatchPolicy {
        if self.keep_going { BatchPolicy::KeepGoing } else { BatchPolicy::StopOnError }
    }

    /// Positional references, normalized. Fails before any network traffic.
    pub fn trip_ids(&self) -> Result<Vec<TripId>> {
        self.trips.iter().map(|s| s.parse()).collect()
    }
}

/// Prints progress lines to stdout.
pub struct ConsoleProgress;

impl Progress for ConsoleProgress {
    fn trip_started(&mut self, index: usize, total: usize, _trip_id: &str) {
        println!("Trip {index}/{total}:");
    }
    fn log(&mut self, msg: &str) {
        println!("{msg}");
    }
    fn saved(&mut self, path: &Path) {
        println!("  Saved {}", path.display());
    }
    fn photo_started(&mut self, index: usize, total: usize) {
        println!("  Photo {index}/{total}:");
    }
}

/// Parse `std::env::args` and run. `Ok(None)` means help was printed.
pub fn run() -> Result<Option<RunSummary>> {
    run_with(Args::parse())
}

pub fn run_with(args: Args) -> Result<Option<RunSummary>> {
    crate::log::init(args.verbose, args.log_file.as_deref())?;

    let mut ids = args.trip_ids()?;
    if ids.is_empty() && args.trips_page.is_none() {
        // nothing to do: show usage like a bare invocation would
        let _ = Args::command().print_help();
        return Ok(None);
    }

    let options = args.export_options();
    if options.auth().is_none() {
        println!(
            "Will not download GPX/KML files since no TRAILAUTH cookie was provided. \
             `everytrail_export --help` for more information."
        );
    }

    let exporter = TripExporter::new(options)?;
    let mut progress = ConsoleProgress;

    if let Some(listing) = &args.trips_page {
        ids.extend(exporter.list_trip_ids(listing, &mut progress)?);
    }

    let summary = runner::run(&exporter, &ids, args.batch_policy(), &mut progress)?;
    if !summary.failed.is_empty() {
        println!("{} of {} trips failed:", summary.failed.len(), ids.len());
        for (id, e) in &summary.failed {
            println!("  {id}: {e}");
        }
    }
    Ok(Some(summary))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_original_tool() {
        let args = Args::try_parse_from(["everytrail_export", "2991898"]).unwrap();
        let opts = args.export_options();
        assert_eq!(opts.out_dir, PathBuf::from("trails"));
        assert_eq!(opts.retry.max_retries, 5);
        assert!(!opts.skip_photos);
        assert_eq!(args.batch_policy(), BatchPolicy::StopOnError);
    }

    #[test]
    fn positional_references_are_normalized() {
        let args = Args::try_parse_from([
            "everytrail_export",
            "2991898",
            "http://everytrail.com/view_trip.php?trip_id=1820769",
        ])
        .unwrap();
        let ids: Vec<String> = args.trip_ids().unwrap().iter().map(ToString::to_string).collect();
        assert_eq!(ids, ["2991898", "1820769"]);
    }

    #[test]
    fn bad_reference_fails_up_front() {
        let args = Args::try_parse_from(["everytrail_export", "not-a-trip"]).unwrap();
        assert!(args.trip_ids().is_err());
    }

    #[test]
    fn flags_reach_options() {
        let args = Args::try_parse_from([
            "everytrail_export",
            "--trailauth",
            "d9b61a",
            "--skip-photos",
            "--out-dir",
            "/tmp/trails",
            "--max-retries",
            "2",
            "--keep-going",
            "7",
        ])
        .unwrap();
        let opts = args.export_options();
        assert_eq!(opts.auth(), Some(("TRAILAUTH", "d9b61a")));
        assert!(opts.skip_photos);
        assert_eq!(opts.out_dir, PathBuf::from("/tmp/trails"));
        assert_eq!(opts.retry.max_retries, 2);
        assert_eq!(args.batch_policy(), BatchPolicy::KeepGoing);
    }

    #[test]
    fn clap_definition_is_consistent() {
        Args::command().debug_assert();
    }
}
