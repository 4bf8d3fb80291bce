use crate::downloader::error::DownloadError;
use crate::downloader::fetch::{TmyFetcher, TmyResponse};
use crate::downloader::locator::TmyEndpoint;
use crate::downloader::manifest::{
    DownloadManifest, ManifestEntry, ManifestOutcome, MANIFEST_FILE_NAME,
};
use crate::downloader::target::DownloadTarget;
use crate::downloader::throttle::{FixedDelay, DEFAULT_REQUEST_DELAY};
use crate::types::municipality::MunicipalityRecord;
use crate::utils::staging_file_in;
use bon::bon;
use chrono::Utc;
use log::{debug, error, info, warn};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Final state of one record after a download pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordOutcome {
    /// The file was already present; nothing was requested.
    Skipped,
    /// The response body was written, whatever its status.
    Written { http_status: u16 },
    Failed {
        http_status: Option<u16>,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordReport {
    pub code: String,
    pub file_name: String,
    pub outcome: RecordOutcome,
}

/// Outcome of every record of a [`Downloader::download_all`] pass, in table
/// order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DownloadReport {
    pub records: Vec<RecordReport>,
    /// Why the manifest stopped being written during the pass, if it did.
    /// The TMY files are not affected.
    pub manifest_error: Option<String>,
}

impl DownloadReport {
    /// Records for which a request was sent (successful or not).
    pub fn fetched(&self) -> usize {
        self.records
            .iter()
            .filter(|r| r.outcome != RecordOutcome::Skipped)
            .count()
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, RecordOutcome::Skipped))
    }

    pub fn written(&self) -> usize {
        self.count(|o| matches!(o, RecordOutcome::Written { .. }))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, RecordOutcome::Failed { .. }))
    }

    fn count(&self, predicate: impl Fn(&RecordOutcome) -> bool) -> usize {
        self.records.iter().filter(|r| predicate(&r.outcome)).count()
    }
}

/// Downloads one TMY file per municipality, sequentially.
///
/// Records whose file already exists in the output directory are skipped
/// without a request, so a second pass over the same table fetches nothing.
/// Every request is followed by a fixed pause.
///
/// # Examples
///
/// ```no_run
/// use pvgis_tmy::{Downloader, HttpFetcher, MunicipalityRecord};
/// use std::time::Duration;
///
/// # fn main() -> Result<(), pvgis_tmy::TmyError> {
/// let records = vec![MunicipalityRecord::new(
///     "11030000000", "11", "Cádiz", "Rota", -6.358, 36.617, 13.0,
/// )];
/// let mut downloader = Downloader::builder()
///     .fetcher(HttpFetcher::new(Some(Duration::from_secs(120)))?)
///     .output_dir("data/output/tmy")
///     .build();
/// let report = downloader.download_all(&records)?;
/// println!("{} written, {} skipped", report.written(), report.skipped());
/// # Ok(())
/// # }
/// ```
pub struct Downloader<F: TmyFetcher> {
    fetcher: F,
    output_dir: PathBuf,
    endpoint: TmyEndpoint,
    throttle: FixedDelay,
    reject_error_status: bool,
    write_manifest: bool,
}

#[bon]
impl<F: TmyFetcher> Downloader<F> {
    /// Creates a downloader.
    ///
    /// * `fetcher` - performs the HTTP requests.
    /// * `output_dir` - where the TMY files go; created on first use.
    /// * `endpoint` - PVGIS location, defaults to the public v5.2 API.
    /// * `request_delay` - pause after each request, defaults to 50 ms.
    /// * `reject_error_status` - when `true`, non-2xx responses are not
    ///   written and the record is reported as failed. Defaults to `false`.
    /// * `write_manifest` - keep `.tmy_manifest.jsonl` in the output directory.
    ///   Defaults to `true`.
    #[builder]
    pub fn new(
        fetcher: F,
        #[builder(into)] output_dir: PathBuf,
        #[builder(default)] endpoint: TmyEndpoint,
        #[builder(default = DEFAULT_REQUEST_DELAY)] request_delay: Duration,
        #[builder(default)] reject_error_status: bool,
        #[builder(default = true)] write_manifest: bool,
    ) -> Self {
        Self {
            fetcher,
            output_dir,
            endpoint,
            throttle: FixedDelay::new(request_delay),
            reject_error_status,
            write_manifest,
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Number of requests sent by this downloader so far.
    pub fn requests_sent(&self) -> usize {
        self.throttle.pauses()
    }

    /// Creates the output directory (recursively) if missing.
    pub fn prepare_output_dir(&self) -> Result<(), DownloadError> {
        match std::fs::metadata(&self.output_dir) {
            Ok(metadata) if metadata.is_dir() => Ok(()),
            Ok(_) => Err(DownloadError::OutputNotDirectory(self.output_dir.clone())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!("Creating output directory: {}", self.output_dir.display());
                std::fs::create_dir_all(&self.output_dir)
                    .map_err(|e| DownloadError::OutputDirCreation(self.output_dir.clone(), e))
            }
            Err(e) => Err(DownloadError::OutputDirCreation(self.output_dir.clone(), e)),
        }
    }

    /// Runs one pass over `records` in order.
    ///
    /// Only output directory problems abort the pass. A record that cannot be
    /// fetched or written is logged, reported as failed, and the pass moves
    /// on. Manifest problems are logged and noted in
    /// [`DownloadReport::manifest_error`].
    pub fn download_all(
        &mut self,
        records: &[MunicipalityRecord],
    ) -> Result<DownloadReport, DownloadError> {
        self.prepare_output_dir()?;

        let manifest_path = self.output_dir.join(MANIFEST_FILE_NAME);
        let mut manifest = self.write_manifest.then(|| {
            DownloadManifest::load(&manifest_path).unwrap_or_else(|e| {
                warn!("Starting a fresh manifest: {}", error_chain(&e));
                DownloadManifest::default()
            })
        });

        let mut report = DownloadReport::default();
        for record in records {
            let target = DownloadTarget::from_record(record);
            let outcome = match self.download_one(&target) {
                None => RecordOutcome::Skipped,
                Some((url, outcome)) => {
                    let entry = manifest_entry(&record.code, &target, url, &outcome);
                    let append_error = match (manifest.as_mut(), entry) {
                        (Some(manifest), Some(entry)) => {
                            manifest.append(&manifest_path, entry).err()
                        }
                        _ => None,
                    };
                    if let Some(e) = append_error {
                        let reason = error_chain(&e);
                        warn!("No more manifest entries for this pass: {}", reason);
                        report.manifest_error = Some(reason);
                        manifest = None;
                    }
                    outcome
                }
            };
            report.records.push(RecordReport {
                code: record.code.clone(),
                file_name: target.file_name,
                outcome,
            });
        }

        info!(
            "Download pass finished: {} written, {} skipped, {} failed",
            report.written(),
            report.skipped(),
            report.failed()
        );
        Ok(report)
    }

    /// Returns `None` when the file already exists, otherwise the URL used and
    /// the outcome.
    fn download_one(&mut self, target: &DownloadTarget) -> Option<(String, RecordOutcome)> {
        let path = target.path_in(&self.output_dir);
        if path.is_file() {
            debug!("Skipping {}, already downloaded", target.file_name);
            return None;
        }

        let url = self.endpoint.tmy_url(target.latitude, target.longitude);
        info!("Connecting to '{}' ...", url);
        let outcome = match self.fetcher.fetch(&url) {
            Ok(response) => self.store(&path, target, response),
            Err(e) => {
                let reason = error_chain(&e);
                error!("Request for {} failed: {}", target.file_name, reason);
                RecordOutcome::Failed {
                    http_status: None,
                    reason,
                }
            }
        };
        self.throttle.pause();
        Some((url, outcome))
    }

    fn store(&self, path: &Path, target: &DownloadTarget, response: TmyResponse) -> RecordOutcome {
        let status = response.status;
        if !response.is_success() {
            warn!("PVGIS answered HTTP {} for {}", status, target.file_name);
            if self.reject_error_status {
                return RecordOutcome::Failed {
                    http_status: Some(status),
                    reason: format!("HTTP status {}", status),
                };
            }
        }

        match write_payload(&self.output_dir, path, &response.body) {
            Ok(()) => {
                info!("...Downloading data to '{}'", target.file_name);
                RecordOutcome::Written {
                    http_status: status,
                }
            }
            Err(e) => {
                let reason = error_chain(&e);
                error!("{}", reason);
                RecordOutcome::Failed {
                    http_status: Some(status),
                    reason,
                }
            }
        }
    }
}

/// Writes `body` to a temporary file in `dir` and renames it to `path`.
fn write_payload(dir: &Path, path: &Path, body: &[u8]) -> Result<(), DownloadError> {
    let mut temp_file = staging_file_in(dir)
        .map_err(|e| DownloadError::PayloadWrite(path.to_path_buf(), e))?;
    temp_file
        .write_all(body)
        .map_err(|e| DownloadError::PayloadWrite(path.to_path_buf(), e))?;
    temp_file
        .persist(path)
        .map_err(|e| DownloadError::PayloadWrite(path.to_path_buf(), e.error))?;
    Ok(())
}

fn manifest_entry(
    code: &str,
    target: &DownloadTarget,
    url: String,
    outcome: &RecordOutcome,
) -> Option<ManifestEntry> {
    let (http_status, outcome) = match outcome {
        RecordOutcome::Written { http_status } => (Some(*http_status), ManifestOutcome::Written),
        RecordOutcome::Failed { http_status, .. } => (*http_status, ManifestOutcome::Failed),
        RecordOutcome::Skipped => return None,
    };
    Some(ManifestEntry {
        code: code.to_string(),
        file_name: target.file_name.clone(),
        url,
        http_status,
        outcome,
        recorded_at: Utc::now(),
    })
}

fn error_chain(error: &dyn std::error::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
