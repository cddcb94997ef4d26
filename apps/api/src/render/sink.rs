//! Hand-off of rendered buffers to a host-provided file-save capability.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::info;

/// Filename used when the caller supplies none (or nothing usable).
pub const DEFAULT_FILENAME: &str = "optimized-cv.pdf";

/// Longest stem kept by [`sanitize_filename`], in characters.
const MAX_STEM_CHARS: usize = 100;

/// Where finished documents go. Implemented by the host.
pub trait FileSink {
    fn save(&self, filename: &str, bytes: &[u8]) -> io::Result<()>;
}

/// Passes `buffer` to `sink` under a sanitized `filename`; returns the name actually used.
pub fn save_as(buffer: &[u8], filename: &str, sink: &dyn FileSink) -> io::Result<String> {
    let name = sanitize_filename(filename);
    sink.save(&name, buffer)?;
    Ok(name)
}

/// Reduces `raw` to a safe basename ending in `.pdf`.
///
/// Directory components are stripped, characters outside `[A-Za-z0-9._ -]`
/// become `_`, and leading dots are removed. Falls back to [`DEFAULT_FILENAME`].
pub fn sanitize_filename(raw: &str) -> String {
    let base = raw.rsplit(['/', '\\']).next().unwrap_or_default().trim();
    let stem = base
        .strip_suffix(".pdf")
        .or_else(|| base.strip_suffix(".PDF"))
        .unwrap_or(base);

    let cleaned: String = stem
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-' | ' ') {
                c
            } else {
                '_'
            }
        })
        .take(MAX_STEM_CHARS)
        .collect();
    let cleaned = cleaned.trim_start_matches('.').trim();

    if cleaned.is_empty() || cleaned.chars().all(|c| c == '_') {
        DEFAULT_FILENAME.to_string()
    } else {
        format!("{cleaned}.pdf")
    }
}

/// Writes documents into a fixed directory.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    root: PathBuf,
}

impl DirectorySink {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl FileSink for DirectorySink {
    fn save(&self, filename: &str, bytes: &[u8]) -> io::Result<()> {
        fs::create_dir_all(&self.root)?;
        let path = self.root.join(filename);
        fs::write(&path, bytes)?;
        info!(path = %path.display(), bytes = bytes.len(), "document saved");
        Ok(())
    }
}
