//! Static coordinate corrections for municipalities whose official point
//! coordinates fall in open water.
//!
//! PVGIS answers sea points with an error, so these municipalities are moved
//! a few hundred meters inland before any request is built.

use haversine::{distance, Location as HaversineLocation, Units};

/// Fixed replacement coordinates for one municipality, keyed by exact name.
#[derive(Debug, Clone, PartialEq)]
pub struct CoordinateCorrection {
    /// Exact `NOMBRE_ACTUAL` value to match.
    pub name: &'static str,
    pub longitude: f64,
    pub latitude: f64,
}

impl CoordinateCorrection {
    pub const fn new(name: &'static str, longitude: f64, latitude: f64) -> Self {
        Self {
            name,
            longitude,
            latitude,
        }
    }

    /// Great-circle distance in kilometers between the given point and the
    /// corrected one.
    pub fn displacement_km(&self, longitude: f64, latitude: f64) -> f64 {
        distance(
            HaversineLocation {
                latitude,
                longitude,
            },
            HaversineLocation {
                latitude: self.latitude,
                longitude: self.longitude,
            },
            Units::Kilometers,
        )
    }
}

const COASTAL_CORRECTIONS: [CoordinateCorrection; 5] = [
    CoordinateCorrection::new("Chipiona", -6.435, 36.736),
    CoordinateCorrection::new("Rota", -6.358, 36.617),
    CoordinateCorrection::new("Cariño", -7.869, 43.741),
    CoordinateCorrection::new("Castell-Platja d'Aro", 3.067, 41.817),
    CoordinateCorrection::new("Viveiro", -7.595, 43.662),
];

/// Immutable set of coordinate corrections handed to the
/// [`Normalizer`](crate::Normalizer).
///
/// # Examples
///
/// ```
/// use pvgis_tmy::CorrectionTable;
///
/// let table = CorrectionTable::coastal_municipalities();
/// let rota = table.lookup("Rota").unwrap();
/// assert_eq!((rota.longitude, rota.latitude), (-6.358, 36.617));
/// assert!(table.lookup("rota").is_none());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CorrectionTable {
    corrections: Vec<CoordinateCorrection>,
}

impl CorrectionTable {
    pub fn new(corrections: Vec<CoordinateCorrection>) -> Self {
        Self { corrections }
    }

    /// The five coastal municipalities whose IGN coordinates land in the sea.
    pub fn coastal_municipalities() -> Self {
        Self::new(COASTAL_CORRECTIONS.to_vec())
    }

    /// A table that corrects nothing.
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Finds the correction for an exact (case-sensitive) name match.
    pub fn lookup(&self, name: &str) -> Option<&CoordinateCorrection> {
        self.corrections.iter().find(|c| c.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CoordinateCorrection> {
        self.corrections.iter()
    }

    pub fn len(&self) -> usize {
        self.corrections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.corrections.is_empty()
    }
}

impl Default for CorrectionTable {
    fn default() -> Self {
        Self::coastal_municipalities()
    }
}
