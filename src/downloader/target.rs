use crate::types::municipality::{sanitize_file_name, MunicipalityRecord};
use std::path::{Path, PathBuf};

/// What one request needs: the point and the file it lands in.
#[derive(Debug, Clone, PartialEq)]
pub struct DownloadTarget {
    pub latitude: f64,
    pub longitude: f64,
    pub file_name: String,
}

impl DownloadTarget {
    /// Takes coordinates and file name from the record, sanitizing the file
    /// name again in case the table was not produced by the normalizer.
    pub fn from_record(record: &MunicipalityRecord) -> Self {
        Self {
            latitude: record.latitude,
            longitude: record.longitude,
            file_name: sanitize_file_name(&record.output_file_name),
        }
    }

    pub fn path_in(&self, dir: &Path) -> PathBuf {
        dir.join(&self.file_name)
    }
}
