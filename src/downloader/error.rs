use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("Failed to create output directory '{0}'")]
    OutputDirCreation(PathBuf, #[source] std::io::Error),

    #[error("Output path exists but is not a directory: '{0}'")]
    OutputNotDirectory(PathBuf),

    #[error("Failed to build HTTP client")]
    ClientBuild(#[source] reqwest::Error),

    #[error("Network request failed for {0}")]
    NetworkRequest(String, #[source] reqwest::Error),

    #[error("Failed to read response body from {0}")]
    ResponseBody(String, #[source] reqwest::Error),

    #[error("Failed to write TMY file '{0}'")]
    PayloadWrite(PathBuf, #[source] std::io::Error),

    #[error("Failed to read manifest '{0}'")]
    ManifestRead(PathBuf, #[source] std::io::Error),

    #[error("Failed to encode manifest entry")]
    ManifestEncode(#[source] serde_json::Error),

    #[error("Failed to write manifest '{0}'")]
    ManifestWrite(PathBuf, #[source] std::io::Error),
}
