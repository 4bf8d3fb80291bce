//! Fixed locations and constants of the two pipelines.

use crate::downloader::locator::TmyEndpoint;
use crate::downloader::throttle::DEFAULT_REQUEST_DELAY;
use crate::table::encoding::IGN_SOURCE_ENCODING;
use crate::types::correction::CorrectionTable;
use encoding_rs::Encoding;
use std::path::PathBuf;
use std::time::Duration;

/// Raw IGN municipality export.
pub const MUNICIPIOS_FILE: &str = "data/ign/MUNICIPIOS.csv";
/// Normalized table written by the normalizer and read by the downloader.
pub const MUNICIPIOS_FILE_FORMATTED: &str = "data/output/Municipios.csv";
/// Destination of the TMY files.
pub const DIR_TMY: &str = "data/output/tmy/";

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Settings shared by both binaries. [`Default`] gives the fixed relative
/// paths under `data/`, the public PVGIS endpoint and the coastal correction
/// table.
///
/// # Examples
///
/// ```
/// use pvgis_tmy::PipelineConfig;
/// use std::time::Duration;
///
/// let config = PipelineConfig {
///     tmy_dir: "/tmp/tmy".into(),
///     request_delay: Duration::from_millis(100),
///     ..PipelineConfig::default()
/// };
/// assert_eq!(config.corrections.len(), 5);
/// ```
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub raw_table_path: PathBuf,
    pub source_encoding: &'static Encoding,
    pub normalized_table_path: PathBuf,
    pub tmy_dir: PathBuf,
    pub corrections: CorrectionTable,
    pub endpoint: TmyEndpoint,
    /// Pause after every request.
    pub request_delay: Duration,
    /// `None` lets a request wait forever.
    pub request_timeout: Option<Duration>,
    /// Do not write files for non-2xx responses.
    pub reject_error_status: bool,
    pub write_manifest: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            raw_table_path: PathBuf::from(MUNICIPIOS_FILE),
            source_encoding: IGN_SOURCE_ENCODING,
            normalized_table_path: PathBuf::from(MUNICIPIOS_FILE_FORMATTED),
            tmy_dir: PathBuf::from(DIR_TMY),
            corrections: CorrectionTable::coastal_municipalities(),
            endpoint: TmyEndpoint::default(),
            request_delay: DEFAULT_REQUEST_DELAY,
            request_timeout: Some(DEFAULT_REQUEST_TIMEOUT),
            reject_error_status: false,
            write_manifest: true,
        }
    }
}
