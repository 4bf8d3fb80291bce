use crate::table::encoding::decode_source;
use crate::table::error::TableError;
use crate::table::extract::extract_normalized_records;
use crate::types::municipality::{
    MunicipalityRecord, ALTITUD, ARCHIVO_TMY, COD_INE, COD_PROV, LATITUD_ETRS89,
    LONGITUD_ETRS89, NOMBRE_ACTUAL, NORMALIZED_COLUMNS, PROVINCIA, SOURCE_COLUMNS,
};
use encoding_rs::Encoding;
use log::{debug, info};
use polars::prelude::*;
use std::io::Cursor;
use std::path::Path;

/// Text columns are forced to `String` so codes like `"01001"` keep their
/// leading zero; coordinates and altitude are forced to `Float64`.
fn municipality_schema(with_file_name: bool) -> Schema {
    let mut fields = vec![
        Field::new(COD_INE.into(), DataType::String),
        Field::new(COD_PROV.into(), DataType::String),
        Field::new(PROVINCIA.into(), DataType::String),
        Field::new(NOMBRE_ACTUAL.into(), DataType::String),
        Field::new(LONGITUD_ETRS89.into(), DataType::Float64),
        Field::new(LATITUD_ETRS89.into(), DataType::Float64),
        Field::new(ALTITUD.into(), DataType::Float64),
    ];
    if with_file_name {
        fields.push(Field::new(ARCHIVO_TMY.into(), DataType::String));
    }
    Schema::from_iter(fields)
}

/// Checks that the header line names every required column.
fn check_header(
    text: &str,
    separator: char,
    required: &[&str],
    path: &Path,
) -> Result<(), TableError> {
    let header = text
        .lines()
        .next()
        .filter(|line| !line.trim().is_empty())
        .ok_or_else(|| TableError::EmptySource(path.to_path_buf()))?;
    let names: Vec<&str> = header
        .split(separator)
        .map(|name| name.trim().trim_matches('"'))
        .collect();

    match required.iter().find(|column| !names.contains(column)) {
        Some(missing) => Err(TableError::MissingColumn {
            path: path.to_path_buf(),
            column: missing.to_string(),
        }),
        None => Ok(()),
    }
}

/// Parses the decoded IGN table (`;` separated, decimal comma) keeping only
/// the seven source columns.
pub fn parse_raw_table(text: &str, path: &Path) -> Result<DataFrame, TableError> {
    check_header(text, ';', &SOURCE_COLUMNS, path)?;

    let projection: Arc<[PlSmallStr]> = SOURCE_COLUMNS
        .iter()
        .map(|name| PlSmallStr::from(*name))
        .collect();

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_columns(Some(projection))
        .with_schema_overwrite(Some(Arc::new(municipality_schema(false))))
        .with_parse_options(
            CsvParseOptions::default()
                .with_separator(b';')
                .with_decimal_comma(true),
        )
        .into_reader_with_file_handle(Cursor::new(text.as_bytes().to_vec()))
        .finish()
        .map_err(|e| TableError::CsvParse(path.to_path_buf(), e))?;

    debug!(
        "Parsed raw table '{}' with {} rows and {} columns",
        path.display(),
        df.height(),
        df.width()
    );
    Ok(df)
}

/// Reads the raw IGN municipality table, decoding it from `encoding`.
pub fn read_raw_table(path: &Path, encoding: &'static Encoding) -> Result<DataFrame, TableError> {
    info!("Loading municipality data from {}", path.display());
    let bytes =
        std::fs::read(path).map_err(|e| TableError::SourceRead(path.to_path_buf(), e))?;
    let text = decode_source(&bytes, encoding);
    parse_raw_table(&text, path)
}

/// Reads a normalized municipality table written by
/// [`write_normalized`](crate::write_normalized).
pub fn read_normalized(path: &Path) -> Result<Vec<MunicipalityRecord>, TableError> {
    let bytes =
        std::fs::read(path).map_err(|e| TableError::SourceRead(path.to_path_buf(), e))?;
    let text = String::from_utf8_lossy(&bytes);
    check_header(&text, ',', &NORMALIZED_COLUMNS, path)?;

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_schema_overwrite(Some(Arc::new(municipality_schema(true))))
        .into_reader_with_file_handle(Cursor::new(bytes))
        .finish()
        .map_err(|e| TableError::CsvParse(path.to_path_buf(), e))?;

    let records = extract_normalized_records(&df)?;
    info!(
        "Loaded {} municipalities from {}",
        records.len(),
        path.display()
    );
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::encoding::IGN_SOURCE_ENCODING;
    use crate::table::extract::{float_values, string_values, SourceColumns};
    use std::io::Write;
    use tempfile::tempdir;

    const RAW_HEADER: &str = "COD_INE;ID_REL;COD_GEO;COD_PROV;PROVINCIA;NOMBRE_ACTUAL;POBLACION_MUNI;SUPERFICIE;PERIMETRO;COD_INE_CAPITAL;CAPITAL;POBLACION_CAPITAL;HOJA_MTN25_ETRS89;LONGITUD_ETRS89;LATITUD_ETRS89;ORIGENCOOR;ALTITUD;ORIGENALTITUD";

    fn raw_row(code: &str, prov: &str, province: &str, name: &str, lon: &str, lat: &str, alt: &str) -> String {
        format!(
            "{code};1010010;10010;{prov};{province};{name};2905;1990,1;2645,7;{code};{name};2793;0112-4;{lon};{lat};MTN25;{alt};MDT5"
        )
    }

    #[test]
    fn test_parse_raw_projects_source_columns() -> Result<(), Box<dyn std::error::Error>> {
        let text = format!(
            "{}\n{}\n",
            RAW_HEADER,
            raw_row("01001000000", "01", "Araba/Álava", "Alegría-Dulantzi", "-2,51243731", "42,84148684", "561,6")
        );
        let df = parse_raw_table(&text, Path::new("MUNICIPIOS.csv"))?;

        assert_eq!(df.height(), 1);
        assert_eq!(df.width(), SOURCE_COLUMNS.len());
        assert_eq!(string_values(&df, COD_INE)?, vec!["01001000000"]);
        assert_eq!(string_values(&df, COD_PROV)?, vec!["01"]);
        assert_eq!(float_values(&df, LONGITUD_ETRS89)?, vec![-2.51243731]);
        assert_eq!(float_values(&df, LATITUD_ETRS89)?, vec![42.84148684]);
        assert_eq!(float_values(&df, ALTITUD)?, vec![561.6]);
        Ok(())
    }

    #[test]
    fn test_parse_raw_missing_column() {
        let text = "COD_INE;COD_PROV;PROVINCIA;NOMBRE_ACTUAL;LONGITUD_ETRS89;LATITUD_ETRS89\n01001;01;A;B;-2,5;42,8\n";
        let result = parse_raw_table(text, Path::new("MUNICIPIOS.csv"));
        assert!(matches!(
            result,
            Err(TableError::MissingColumn { column, .. }) if column == ALTITUD
        ));
    }

    #[test]
    fn test_parse_raw_empty_source() {
        let result = parse_raw_table("", Path::new("MUNICIPIOS.csv"));
        assert!(matches!(result, Err(TableError::EmptySource(_))));
    }

    #[test]
    fn test_parse_raw_rejects_non_numeric_coordinate() {
        let text = format!(
            "{}\n{}\n",
            RAW_HEADER,
            raw_row("01001000000", "01", "Araba/Álava", "Alegría-Dulantzi", "oeste", "42,84148684", "561,6")
        );
        // Either the CSV reader or the typed extraction must refuse the row.
        let result = parse_raw_table(&text, Path::new("MUNICIPIOS.csv"))
            .and_then(|df| SourceColumns::from_frame(&df).map(|_| ()));
        assert!(result.is_err());
    }

    #[test]
    fn test_read_raw_latin1_file() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let path = dir.path().join("MUNICIPIOS.csv");
        let row = raw_row("15901000000", "15", "A Coruña", "Cariño", "-7,868424967", "43,74035104", "40");
        let text = format!("{}\n{}\n", RAW_HEADER, row);
        let (latin1, _, _) = IGN_SOURCE_ENCODING.encode(&text);
        std::fs::File::create(&path)?.write_all(&latin1)?;

        let df = read_raw_table(&path, IGN_SOURCE_ENCODING)?;
        assert_eq!(string_values(&df, NOMBRE_ACTUAL)?, vec!["Cariño"]);
        assert_eq!(string_values(&df, PROVINCIA)?, vec!["A Coruña"]);
        Ok(())
    }

    #[test]
    fn test_read_raw_missing_file() {
        let result = read_raw_table(Path::new("/nonexistent/MUNICIPIOS.csv"), IGN_SOURCE_ENCODING);
        assert!(matches!(result, Err(TableError::SourceRead(_, _))));
    }

    #[test]
    fn test_read_normalized_keeps_leading_zeros() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let path = dir.path().join("Municipios.csv");
        std::fs::write(
            &path,
            "COD_INE,COD_PROV,PROVINCIA,NOMBRE_ACTUAL,LONGITUD_ETRS89,LATITUD_ETRS89,ALTITUD,ARCHIVO_TMY\n\
             01001,01,Araba/Álava,A/B,-6.0,40.0,500.0,01001_A__B.csv\n",
        )?;

        let records = read_normalized(&path)?;
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].code, "01001");
        assert_eq!(records[0].province_code, "01");
        assert_eq!(records[0].current_name, "A/B");
        assert_eq!(records[0].longitude, -6.0);
        assert_eq!(records[0].output_file_name, "01001_A__B.csv");
        Ok(())
    }
}
