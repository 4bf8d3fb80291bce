//! Turns the raw IGN municipality table into the normalized record set:
//! projection to the eight output fields, file-name derivation and the
//! coastal coordinate corrections.

pub mod error;

use crate::normalizer::error::NormalizeError;
use crate::table::extract::SourceColumns;
use crate::types::correction::CorrectionTable;
use crate::types::municipality::MunicipalityRecord;
use log::{info, warn};
use polars::prelude::DataFrame;
use std::collections::hash_map::Entry;
use std::collections::HashMap;

/// Normalizes municipality tables using an injected [`CorrectionTable`].
///
/// # Examples
///
/// ```
/// use pvgis_tmy::{CorrectionTable, Normalizer};
/// use polars::prelude::*;
///
/// let raw = df!(
///     "COD_INE" => ["11030000000"],
///     "COD_PROV" => ["11"],
///     "PROVINCIA" => ["Cádiz"],
///     "NOMBRE_ACTUAL" => ["Rota"],
///     "LONGITUD_ETRS89" => [-6.36315877],
///     "LATITUD_ETRS89" => [36.62011111],
///     "ALTITUD" => [13.0]
/// )
/// .unwrap();
///
/// let records = Normalizer::new(CorrectionTable::coastal_municipalities())
///     .normalize(&raw)
///     .unwrap();
/// assert_eq!(records[0].longitude, -6.358);
/// assert_eq!(records[0].output_file_name, "11030000000_Rota.csv");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    corrections: CorrectionTable,
}

impl Normalizer {
    pub fn new(corrections: CorrectionTable) -> Self {
        Self { corrections }
    }

    /// Normalizes a raw table. Columns other than the seven source fields are
    /// ignored; a missing source field or a non-numeric coordinate fails the
    /// whole run.
    pub fn normalize(&self, raw: &DataFrame) -> Result<Vec<MunicipalityRecord>, NormalizeError> {
        let columns = SourceColumns::from_frame(raw)?;

        let mut records: Vec<MunicipalityRecord> = (0..columns.len())
            .map(|i| {
                MunicipalityRecord::new(
                    columns.codes[i].as_str(),
                    columns.province_codes[i].as_str(),
                    columns.province_names[i].as_str(),
                    columns.names[i].as_str(),
                    columns.longitudes[i],
                    columns.latitudes[i],
                    columns.altitudes[i],
                )
            })
            .collect();

        self.apply_corrections(&mut records);
        check_unique_file_names(&records)?;

        info!("Loaded data for {} municipalities", records.len());
        Ok(records)
    }

    /// Overwrites longitude and latitude of every record whose name matches a
    /// correction exactly. Returns the number of records changed.
    pub fn apply_corrections(&self, records: &mut [MunicipalityRecord]) -> usize {
        let mut corrected = 0;
        for correction in self.corrections.iter() {
            let mut matched = false;
            for record in records
                .iter_mut()
                .filter(|record| record.current_name == correction.name)
            {
                info!(
                    "Correcting location of municipality {} ({}): moved {:.3} km",
                    correction.name,
                    record.code,
                    correction.displacement_km(record.longitude, record.latitude)
                );
                record.longitude = correction.longitude;
                record.latitude = correction.latitude;
                matched = true;
                corrected += 1;
            }
            if !matched {
                warn!(
                    "No municipality named '{}' found to correct",
                    correction.name
                );
            }
        }
        corrected
    }
}

fn check_unique_file_names(records: &[MunicipalityRecord]) -> Result<(), NormalizeError> {
    let mut seen: HashMap<&str, usize> = HashMap::with_capacity(records.len());
    for (row, record) in records.iter().enumerate() {
        match seen.entry(record.output_file_name.as_str()) {
            Entry::Occupied(entry) => {
                return Err(NormalizeError::DuplicateFileName {
                    file_name: record.output_file_name.clone(),
                    first_row: *entry.get(),
                    row,
                });
            }
            Entry::Vacant(entry) => {
                entry.insert(row);
            }
        }
    }
    Ok(())
}
