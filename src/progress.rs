// src/progress.rs
use std::path::Path;

/// User-facing progress for long-running exports.
/// Frontends implement this to surface status; diagnostics go through `tracing`.
pub trait Progress {
    /// Called at the start of a batch with the number of trips.
    fn begin(&mut self, _total: usize) {}

    /// Called before each trip of a batch (1-based `index`).
    fn trip_started(&mut self, _index: usize, _total: usize, _trip_id: &str) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// A file landed on disk.
    fn saved(&mut self, _path: &Path) {}

    /// Called before each photo of a gallery (1-based `index`).
    fn photo_started(&mut self, _index: usize, _total: usize) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}

/// Collects every event as a line; handy for tests and dry runs.
#[derive(Default, Debug)]
pub struct RecordingProgress {
    pub lines: Vec<String>,
}

impl Progress for RecordingProgress {
    fn begin(&mut self, total: usize) {
        self.lines.push(format!("begin {total}"));
    }
    fn trip_started(&mut self, index: usize, total: usize, trip_id: &str) {
        self.lines.push(format!("trip {index}/{total} {trip_id}"));
    }
    fn log(&mut self, msg: &str) {
        self.lines.push(msg.to_string());
    }
    fn saved(&mut self, path: &Path) {
        self.lines.push(format!("saved {}", path.display()));
    }
    fn photo_started(&mut self, index: usize, total: usize) {
        self.lines.push(format!("photo {index}/{total}"));
    }
    fn finish(&mut self) {
        self.lines.push("finish".to_string());
    }
}
