//! The two runs exposed by the binaries: normalize the IGN table, then
//! download the TMY files it lists.

use crate::config::PipelineConfig;
use crate::downloader::fetch::{HttpFetcher, TmyFetcher};
use crate::downloader::run::{DownloadReport, Downloader};
use crate::error::TmyError;
use crate::normalizer::Normalizer;
use crate::table::reader::{read_normalized, read_raw_table};
use crate::table::writer::write_normalized;
use crate::types::municipality::MunicipalityRecord;
use log::info;

/// Reads the raw table, normalizes it and writes the normalized file.
///
/// Nothing is written unless every row normalizes.
pub fn run_normalize(config: &PipelineConfig) -> Result<Vec<MunicipalityRecord>, TmyError> {
    let raw = read_raw_table(&config.raw_table_path, config.source_encoding)?;
    let records = Normalizer::new(config.corrections.clone()).normalize(&raw)?;
    write_normalized(&records, &config.normalized_table_path)?;
    info!("Data for {} municipalities loaded.", records.len());
    Ok(records)
}

/// Downloads the TMY of every municipality of the normalized file over HTTP.
pub fn run_download(config: &PipelineConfig) -> Result<DownloadReport, TmyError> {
    let fetcher = HttpFetcher::new(config.request_timeout)?;
    run_download_with(config, fetcher)
}

/// Same as [`run_download`] with a caller-supplied fetcher.
pub fn run_download_with<F: TmyFetcher>(
    config: &PipelineConfig,
    fetcher: F,
) -> Result<DownloadReport, TmyError> {
    let records = read_normalized(&config.normalized_table_path)?;
    let mut downloader = Downloader::builder()
        .fetcher(fetcher)
        .output_dir(config.tmy_dir.clone())
        .endpoint(config.endpoint.clone())
        .request_delay(config.request_delay)
        .reject_error_status(config.reject_error_status)
        .write_manifest(config.write_manifest)
        .build();
    Ok(downloader.download_all(&records)?)
}
