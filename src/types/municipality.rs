//! Defines the municipality record produced by the normalizer and consumed by
//! the downloader, together with the column names used in both CSV files and
//! the file-name derivation rule.

// --- Column names (IGN naming, kept in both the raw and the normalized file) ---

pub const COD_INE: &str = "COD_INE";
pub const COD_PROV: &str = "COD_PROV";
pub const PROVINCIA: &str = "PROVINCIA";
pub const NOMBRE_ACTUAL: &str = "NOMBRE_ACTUAL";
pub const LONGITUD_ETRS89: &str = "LONGITUD_ETRS89";
pub const LATITUD_ETRS89: &str = "LATITUD_ETRS89";
pub const ALTITUD: &str = "ALTITUD";
pub const ARCHIVO_TMY: &str = "ARCHIVO_TMY";

/// Columns that must be present in the raw IGN table.
pub const SOURCE_COLUMNS: [&str; 7] = [
    COD_INE,
    COD_PROV,
    PROVINCIA,
    NOMBRE_ACTUAL,
    LONGITUD_ETRS89,
    LATITUD_ETRS89,
    ALTITUD,
];

/// Columns of the normalized table, in output order.
pub const NORMALIZED_COLUMNS: [&str; 8] = [
    COD_INE,
    COD_PROV,
    PROVINCIA,
    NOMBRE_ACTUAL,
    LONGITUD_ETRS89,
    LATITUD_ETRS89,
    ALTITUD,
    ARCHIVO_TMY,
];

/// One administrative unit of the normalized municipality table.
///
/// Fields map one to one, in order, onto [`NORMALIZED_COLUMNS`]. Codes are
/// kept as text so that leading zeros (e.g. `"01001"`) survive every read and
/// write.
#[derive(Debug, Clone, PartialEq)]
pub struct MunicipalityRecord {
    /// INE municipality code, e.g. `"11030000000"`.
    pub code: String,
    /// Two-digit province code, e.g. `"11"`.
    pub province_code: String,
    pub province_name: String,
    /// Current official name. May contain `/` for bilingual names.
    pub current_name: String,
    /// Longitude in decimal degrees (ETRS89).
    pub longitude: f64,
    /// Latitude in decimal degrees (ETRS89).
    pub latitude: f64,
    /// Altitude in meters.
    pub altitude: f64,
    /// Name of the TMY file for this municipality, see [`output_file_name`].
    pub output_file_name: String,
}

impl MunicipalityRecord {
    /// Builds a record from source fields, deriving `output_file_name`.
    pub fn new(
        code: impl Into<String>,
        province_code: impl Into<String>,
        province_name: impl Into<String>,
        current_name: impl Into<String>,
        longitude: f64,
        latitude: f64,
        altitude: f64,
    ) -> Self {
        let code = code.into();
        let current_name = current_name.into();
        let output_file_name = output_file_name(&code, &current_name);
        Self {
            code,
            province_code: province_code.into(),
            province_name: province_name.into(),
            current_name,
            longitude,
            latitude,
            altitude,
            output_file_name,
        }
    }
}

/// Replaces every `/` with `__`. No other character is touched.
///
/// Applying it twice gives the same result as applying it once.
///
/// # Examples
///
/// ```
/// use pvgis_tmy::sanitize_file_name;
///
/// assert_eq!(sanitize_file_name("Alicante/Alacant"), "Alicante__Alacant");
/// assert_eq!(sanitize_file_name("Rota"), "Rota");
/// ```
pub fn sanitize_file_name(name: &str) -> String {
    name.replace('/', "__")
}

/// Derives `{code}_{sanitized name}.csv`.
///
/// # Examples
///
/// ```
/// use pvgis_tmy::output_file_name;
///
/// assert_eq!(output_file_name("01001", "A/B"), "01001_A__B.csv");
/// ```
pub fn output_file_name(code: &str, current_name: &str) -> String {
    format!("{}_{}.csv", code, sanitize_file_name(current_name))
}

/// Looks up the coordinates of a municipality by INE code.
///
/// Returns `(longitude, latitude)` of the first record with that code.
pub fn coordinates_for(records: &[MunicipalityRecord], code: &str) -> Option<(f64, f64)> {
    records
        .iter()
        .find(|record| record.code == code)
        .map(|record| (record.longitude, record.latitude))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_name_without_slash() {
        assert_eq!(output_file_name("11030000000", "Rota"), "11030000000_Rota.csv");
    }

    #[test]
    fn test_file_name_with_one_slash() {
        assert_eq!(
            output_file_name("03014000000", "Alicante/Alacant"),
            "03014000000_Alicante__Alacant.csv"
        );
    }

    #[test]
    fn test_file_name_with_several_slashes() {
        assert_eq!(output_file_name("1", "a/b//c/"), "1_a__b____c__.csv");
    }

    #[test]
    fn test_file_name_keeps_other_characters() {
        assert_eq!(
            output_file_name("17048000000", "Castell-Platja d'Aro"),
            "17048000000_Castell-Platja d'Aro.csv"
        );
        assert_eq!(output_file_name("15901000000", "Cariño"), "15901000000_Cariño.csv");
    }

    #[test]
    fn test_sanitize_is_idempotent() {
        let once = sanitize_file_name("Vitoria/Gasteiz");
        assert_eq!(sanitize_file_name(&once), once);
    }

    #[test]
    fn test_new_derives_file_name() {
        let record = MunicipalityRecord::new("01001", "01", "Araba/Álava", "A/B", -6.0, 40.0, 500.0);
        assert_eq!(record.output_file_name, "01001_A__B.csv");
        assert_eq!(record.code, "01001");
    }

    #[test]
    fn test_coordinates_for() {
        let records = vec![
            MunicipalityRecord::new("01001", "01", "Araba/Álava", "Alegría-Dulantzi", -2.51, 42.84, 561.0),
            MunicipalityRecord::new("11030000000", "11", "Cádiz", "Rota", -6.358, 36.617, 13.0),
        ];
        assert_eq!(coordinates_for(&records, "11030000000"), Some((-6.358, 36.617)));
        assert_eq!(coordinates_for(&records, "99999"), None);
    }
}
