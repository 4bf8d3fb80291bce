use crate::table::error::TableError;
use crate::types::municipality::{
    MunicipalityRecord, ALTITUD, ARCHIVO_TMY, COD_INE, COD_PROV, LATITUD_ETRS89,
    LONGITUD_ETRS89, NOMBRE_ACTUAL, PROVINCIA,
};
use polars::prelude::*;

fn get_column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Column, TableError> {
    df.column(name)
        .map_err(|e| TableError::ColumnNotFound(name.to_string(), e))
}

/// Reads a column as owned strings, casting non-string columns to text.
/// Nulls are rejected.
pub(crate) fn string_values(df: &DataFrame, name: &str) -> Result<Vec<String>, TableError> {
    let series = get_column(df, name)?
        .as_materialized_series()
        .cast(&DataType::String)?;
    series
        .str()?
        .into_iter()
        .enumerate()
        .map(|(row, value)| {
            value
                .map(str::to_string)
                .ok_or_else(|| TableError::MissingValue {
                    column: name.to_string(),
                    row,
                })
        })
        .collect()
}

/// Reads a column as `f64`. Text that does not parse as a number and nulls
/// are both errors.
pub(crate) fn float_values(df: &DataFrame, name: &str) -> Result<Vec<f64>, TableError> {
    let series = get_column(df, name)?
        .as_materialized_series()
        .strict_cast(&DataType::Float64)
        .map_err(|e| TableError::NonNumericColumn {
            column: name.to_string(),
            source: e,
        })?;
    series
        .f64()?
        .into_iter()
        .enumerate()
        .map(|(row, value)| {
            value.ok_or_else(|| TableError::MissingValue {
                column: name.to_string(),
                row,
            })
        })
        .collect()
}

/// The seven source fields of a table, column by column.
pub(crate) struct SourceColumns {
    pub codes: Vec<String>,
    pub province_codes: Vec<String>,
    pub province_names: Vec<String>,
    pub names: Vec<String>,
    pub longitudes: Vec<f64>,
    pub latitudes: Vec<f64>,
    pub altitudes: Vec<f64>,
}

impl SourceColumns {
    pub(crate) fn from_frame(df: &DataFrame) -> Result<Self, TableError> {
        Ok(Self {
            codes: string_values(df, COD_INE)?,
            province_codes: string_values(df, COD_PROV)?,
            province_names: string_values(df, PROVINCIA)?,
            names: string_values(df, NOMBRE_ACTUAL)?,
            longitudes: float_values(df, LONGITUD_ETRS89)?,
            latitudes: float_values(df, LATITUD_ETRS89)?,
            altitudes: float_values(df, ALTITUD)?,
        })
    }

    pub(crate) fn len(&self) -> usize {
        self.codes.len()
    }
}

/// Extracts records from a normalized table, keeping the stored file names.
pub(crate) fn extract_normalized_records(
    df: &DataFrame,
) -> Result<Vec<MunicipalityRecord>, TableError> {
    let columns = SourceColumns::from_frame(df)?;
    let file_names = string_values(df, ARCHIVO_TMY)?;

    let records = (0..columns.len())
        .map(|i| MunicipalityRecord {
            code: columns.codes[i].clone(),
            province_code: columns.province_codes[i].clone(),
            province_name: columns.province_names[i].clone(),
            current_name: columns.names[i].clone(),
            longitude: columns.longitudes[i],
            latitude: columns.latitudes[i],
            altitude: columns.altitudes[i],
            output_file_name: file_names[i].clone(),
        })
        .collect();
    Ok(records)
}
