//! Audit log of every fetch attempt, stored next to the TMY files.
//!
//! The manifest never drives the skip decision; file presence does. It lets an
//! operator find files that were written from error responses. Each attempt
//! is appended as one JSON line as soon as it finishes, so an interrupted
//! pass keeps the entries of the records it got through.

use crate::downloader::error::DownloadError;
use chrono::{DateTime, Utc};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

pub const MANIFEST_FILE_NAME: &str = ".tmy_manifest.jsonl";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ManifestOutcome {
    Written,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestEntry {
    /// INE code of the municipality.
    pub code: String,
    pub file_name: String,
    pub url: String,
    /// Absent when no response was received.
    pub http_status: Option<u16>,
    pub outcome: ManifestOutcome,
    pub recorded_at: DateTime<Utc>,
}

/// Latest fetch outcome per municipality code.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DownloadManifest {
    entries: BTreeMap<String, ManifestEntry>,
    /// The file on disk ends without a newline.
    unterminated: bool,
}

impl DownloadManifest {
    /// Loads the manifest, or an empty one if the file does not exist yet.
    ///
    /// Later lines win over earlier ones for the same code. Lines that do not
    /// decode (e.g. one cut short by a crash) are logged and skipped.
    pub fn load(path: &Path) -> Result<Self, DownloadError> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(DownloadError::ManifestRead(path.to_path_buf(), e)),
        };

        let mut manifest = Self {
            unterminated: !text.is_empty() && !text.ends_with('\n'),
            ..Self::default()
        };
        for (index, line) in text.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<ManifestEntry>(line) {
                Ok(entry) => {
                    manifest.entries.insert(entry.code.clone(), entry);
                }
                Err(e) => warn!(
                    "Ignoring line {} of manifest {}: {}",
                    index + 1,
                    path.display(),
                    e
                ),
            }
        }
        Ok(manifest)
    }

    /// Appends `entry` to the file at `path` and records it in memory.
    ///
    /// A cut-off last line left by an earlier crash is terminated first. The
    /// line is written with a single `write_all` on a file opened in append
    /// mode; the file is created if missing.
    pub fn append(&mut self, path: &Path, entry: ManifestEntry) -> Result<(), DownloadError> {
        let mut line = String::new();
        if self.unterminated {
            line.push('\n');
        }
        line.push_str(&serde_json::to_string(&entry).map_err(DownloadError::ManifestEncode)?);
        line.push('\n');

        OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .and_then(|mut file| file.write_all(line.as_bytes()))
            .map_err(|e| DownloadError::ManifestWrite(path.to_path_buf(), e))?;

        self.unterminated = false;
        debug!("Recorded {} in {}", entry.file_name, path.display());
        self.entries.insert(entry.code.clone(), entry);
        Ok(())
    }

    pub fn get(&self, code: &str) -> Option<&ManifestEntry> {
        self.entries.get(code)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn entry(code: &str, status: Option<u16>, outcome: ManifestOutcome) -> ManifestEntry {
        ManifestEntry {
            code: code.to_string(),
            file_name: format!("{}_Rota.csv", code),
            url: "https://re.jrc.ec.europa.eu/api/v5_2/tmy?lat=36.617&lon=-6.358&outputformat=csv"
                .to_string(),
            http_status: status,
            outcome,
            recorded_at: Utc::now(),
        }
    }

    #[test]
    fn test_load_missing_is_empty() -> Result<(), DownloadError> {
        let dir = tempdir().unwrap();
        let manifest = DownloadManifest::load(&dir.path().join(MANIFEST_FILE_NAME))?;
        assert!(manifest.is_empty());
        Ok(())
    }

    #[test]
    fn test_append_and_load() -> Result<(), DownloadError> {
        let dir = tempdir().unwrap();
        let path = dir.path().join(MANIFEST_FILE_NAME);

        let mut manifest = DownloadManifest::default();
        manifest.append(&path, entry("11030000000", Some(200), ManifestOutcome::Written))?;
        manifest.append(&path, entry("15901000000", None, ManifestOutcome::Failed))?;

        let loaded = DownloadManifest::load(&path)?;
        assert_eq!(loaded, manifest);
        assert_eq!(loaded.len(), 2);
        assert_eq!(
            loaded.get("11030000000").map(|e| e.outcome),
            Some(ManifestOutcome::Written)
        );
        assert_eq!(std::fs::read_to_string(&path).unwrap().lines().count(), 2);
        Ok(())
    }

    #[test]
    fn test_latest_line_wins() -> Result<(), DownloadError> {
        let dir = tempdir().unwrap();
        let path = dir.path().join(MANIFEST_FILE_NAME);

        let mut first_pass = DownloadManifest::default();
        first_pass.append(&path, entry("1", None, ManifestOutcome::Failed))?;
        let mut second_pass = DownloadManifest::load(&path)?;
        second_pass.append(&path, entry("1", Some(200), ManifestOutcome::Written))?;

        let loaded = DownloadManifest::load(&path)?;
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded.get("1").and_then(|e| e.http_status), Some(200));
        Ok(())
    }

    #[test]
    fn test_truncated_line_is_skipped() -> Result<(), DownloadError> {
        let dir = tempdir().unwrap();
        let path = dir.path().join(MANIFEST_FILE_NAME);

        let mut manifest = DownloadManifest::default();
        manifest.append(&path, entry("1", Some(200), ManifestOutcome::Written))?;
        let mut file = OpenOptions::new().append(true).open(&path).unwrap();
        file.write_all(b"{\"code\":\"2\",\"file_na").unwrap();

        let mut loaded = DownloadManifest::load(&path)?;
        assert_eq!(loaded.len(), 1);
        assert!(loaded.get("2").is_none());

        // The next entry starts on its own line.
        loaded.append(&path, entry("3", Some(200), ManifestOutcome::Written))?;
        let reloaded = DownloadManifest::load(&path)?;
        assert_eq!(reloaded.len(), 2);
        assert!(reloaded.get("3").is_some());
        Ok(())
    }

    #[test]
    fn test_unreadable_manifest_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(MANIFEST_FILE_NAME);
        std::fs::create_dir(&path).unwrap();
        assert!(matches!(
            DownloadManifest::load(&path),
            Err(DownloadError::ManifestRead(_, _))
        ));
    }
}
