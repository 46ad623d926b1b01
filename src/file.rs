// src/file.rs

use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use tracing::info;

use crate::config::consts::HTML_CHARSET_PREFIX;
use crate::error::{ExportError, Result};

/// Create `dir` (and parents). An existing directory is fine; an existing
/// non-directory is an error.
pub fn ensure_directory(dir: &Path) -> Result<()> {
    if dir.exists() && !dir.is_dir() {
        let msg = format!("path exists but is not a directory: {}", dir.display());
        return Err(ExportError::io(dir, std::io::Error::other(msg)));
    }
    fs::create_dir_all(dir).map_err(|e| ExportError::io(dir, e))
}

/// Write `contents` to `dir/filename`, replacing any existing file.
pub fn save_to_file(dir: &Path, filename: &str, contents: &[u8]) -> Result<PathBuf> {
    let dest = dir.join(filename);
    fs::write(&dest, contents).map_err(|e| ExportError::io(&dest, e))?;
    info!(path = %dest.display(), bytes = contents.len(), "saved");
    Ok(dest)
}

/// Prefix an HTML fragment with a charset declaration so it renders correctly
/// when opened on its own.
pub fn encode_html_for_file(fragment: &str) -> Vec<u8> {
    let mut out = String::with_capacity(HTML_CHARSET_PREFIX.len() + fragment.len());
    out.push_str(HTML_CHARSET_PREFIX);
    out.push_str(fragment);
    out.into_bytes()
}

/// Pretty JSON with four-space indentation.
pub fn to_json_bytes<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    value.serialize(&mut ser)?;
    Ok(buf)
}

/// Stream into `dest` via `fill`. A failed stream leaves no partial file behind.
pub fn write_streamed<F>(dest: &Path, fill: F) -> Result<u64>
where
    F: FnOnce(&mut dyn Write) -> Result<u64>,
{
    let file = File::create(dest).map_err(|e| ExportError::io(dest, e))?;
    let mut out = BufWriter::new(file);
    let result = fill(&mut out).and_then(|n| {
        out.flush().map_err(|e| ExportError::io(dest, e))?;
        Ok(n)
    });
    if result.is_err() {
        drop(out);
        let _ = fs::remove_file(dest);
    } else {
        info!(path = %dest.display(), "saved");
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn html_gets_charset_prefix() {
        let bytes = encode_html_for_file("<p>Café</p>");
        assert_eq!(String::from_utf8(bytes).unwrap(), "<meta charset=\"utf-8\">\n<p>Café</p>");
    }

    #[test]
    fn json_uses_four_space_indent() {
        let s = String::from_utf8(to_json_bytes(&vec![1, 2]).unwrap()).unwrap();
        assert_eq!(s, "[\n    1,\n    2\n]");
    }

    #[test]
    fn ensure_directory_is_idempotent_and_rejects_files() {
        let tmp = tempfile::tempdir().unwrap();
        let d = tmp.path().join("a").join("b");
        ensure_directory(&d).unwrap();
        ensure_directory(&d).unwrap();
        let f = save_to_file(tmp.path(), "plain.txt", b"x").unwrap();
        assert!(ensure_directory(&f).is_err());
    }

    #[test]
    fn failed_stream_removes_partial_file() {
        let tmp = tempfile::tempdir().unwrap();
        let dest = tmp.path().join("img.jpg");
        let err = write_streamed(&dest, |w| {
            w.write_all(b"partial").unwrap();
            Err(ExportError::DownloadFailed { url: "http://x/img.jpg".into(), status: 404 })
        });
        assert!(err.is_err());
        assert!(!dest.exists());

        let n = write_streamed(&dest, |w| {
            w.write_all(b"whole").unwrap();
            Ok(5)
        })
        .unwrap();
        assert_eq!(n, 5);
        assert_eq!(fs::read(&dest).unwrap(), b"whole");
    }
}
