use crate::table::error::TableError;
use crate::types::municipality::{
    MunicipalityRecord, ALTITUD, ARCHIVO_TMY, COD_INE, COD_PROV, LATITUD_ETRS89,
    LONGITUD_ETRS89, NOMBRE_ACTUAL, PROVINCIA,
};
use log::info;
use polars::prelude::*;
use crate::utils::{parent_dir, staging_file_in};
use std::path::Path;

/// Builds the eight-column normalized DataFrame.
pub fn records_to_frame(records: &[MunicipalityRecord]) -> Result<DataFrame, TableError> {
    let codes: Vec<&str> = records.iter().map(|r| r.code.as_str()).collect();
    let province_codes: Vec<&str> = records.iter().map(|r| r.province_code.as_str()).collect();
    let province_names: Vec<&str> = records.iter().map(|r| r.province_name.as_str()).collect();
    let names: Vec<&str> = records.iter().map(|r| r.current_name.as_str()).collect();
    let longitudes: Vec<f64> = records.iter().map(|r| r.longitude).collect();
    let latitudes: Vec<f64> = records.iter().map(|r| r.latitude).collect();
    let altitudes: Vec<f64> = records.iter().map(|r| r.altitude).collect();
    let file_names: Vec<&str> = records.iter().map(|r| r.output_file_name.as_str()).collect();

    let df = df!(
        COD_INE => codes,
        COD_PROV => province_codes,
        PROVINCIA => province_names,
        NOMBRE_ACTUAL => names,
        LONGITUD_ETRS89 => longitudes,
        LATITUD_ETRS89 => latitudes,
        ALTITUD => altitudes,
        ARCHIVO_TMY => file_names
    )?;
    Ok(df)
}

/// Writes the normalized table as UTF-8, comma separated, with a header row.
///
/// Missing parent directories are created. The file is written to a
/// temporary sibling first and renamed into place, so `path` either keeps its
/// previous content or holds the complete new table.
pub fn write_normalized(records: &[MunicipalityRecord], path: &Path) -> Result<(), TableError> {
    let mut df = records_to_frame(records)?;

    let parent = parent_dir(path);
    std::fs::create_dir_all(parent)
        .map_err(|e| TableError::OutputDirCreation(parent.to_path_buf(), e))?;

    let mut temp_file = staging_file_in(parent)
        .map_err(|e| TableError::OutputWriteIo(path.to_path_buf(), e))?;
    CsvWriter::new(temp_file.as_file_mut())
        .include_header(true)
        .with_separator(b',')
        .finish(&mut df)
        .map_err(|e| TableError::OutputWritePolars(path.to_path_buf(), e))?;
    temp_file
        .persist(path)
        .map_err(|e| TableError::OutputWriteIo(path.to_path_buf(), e.error))?;

    info!(
        "Wrote {} municipalities to {}",
        records.len(),
        path.display()
    );
    Ok(())
}
