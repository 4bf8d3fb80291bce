use crate::downloader::error::DownloadError;
use crate::normalizer::error::NormalizeError;
use crate::table::error::TableError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TmyError {
    #[error(transparent)]
    Table(#[from] TableError),

    #[error(transparent)]
    Normalize(#[from] NormalizeError),

    #[error(transparent)]
    Download(#[from] DownloadError),
}
