//! Prepares the IGN municipality table and bulk-downloads PVGIS Typical
//! Meteorological Year (TMY) files, one per municipality.
//!
//! The work is split in two runs: [`run_normalize`] turns the raw IGN export
//! into a small normalized table (with coastal coordinate fixes), and
//! [`run_download`] walks that table, fetching every TMY that is not on disk
//! yet while pausing between requests.

mod config;
mod downloader;
mod error;
mod normalizer;
mod pipeline;
mod table;
mod types;
mod utils;

pub use config::*;
pub use error::TmyError;
pub use pipeline::*;

pub use normalizer::error::NormalizeError;
pub use normalizer::Normalizer;

pub use table::encoding::{decode_source, IGN_SOURCE_ENCODING};
pub use table::error::TableError;
pub use table::reader::{parse_raw_table, read_normalized, read_raw_table};
pub use table::writer::{records_to_frame, write_normalized};

pub use types::correction::{CoordinateCorrection, CorrectionTable};
pub use types::municipality::*;

pub use downloader::error::DownloadError;
pub use downloader::fetch::{HttpFetcher, TmyFetcher, TmyResponse};
pub use downloader::locator::{TmyEndpoint, PVGIS_API_VERSION, PVGIS_BASE_URL, TMY_OUTPUT_FORMAT};
pub use downloader::manifest::{DownloadManifest, ManifestEntry, ManifestOutcome, MANIFEST_FILE_NAME};
pub use downloader::run::{DownloadReport, Downloader, RecordOutcome, RecordReport};
pub use downloader::target::DownloadTarget;
pub use downloader::throttle::{FixedDelay, DEFAULT_REQUEST_DELAY};
