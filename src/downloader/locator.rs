//! Builds PVGIS request URLs.
//!
//! API reference: the PVGIS non-interactive service documentation at
//! <https://joint-research-centre.ec.europa.eu/pvgis-photovoltaic-geographical-information-system/getting-started-pvgis/api-non-interactive-service_en>.

pub const PVGIS_BASE_URL: &str = "https://re.jrc.ec.europa.eu/api";
pub const PVGIS_API_VERSION: &str = "v5_2";
pub const TMY_OUTPUT_FORMAT: &str = "csv";

/// Location of the TMY service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TmyEndpoint {
    pub base_url: String,
    pub api_version: String,
    pub output_format: String,
}

impl TmyEndpoint {
    pub fn new(base_url: impl Into<String>, api_version: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_version: api_version.into(),
            output_format: TMY_OUTPUT_FORMAT.to_string(),
        }
    }

    /// URL of the TMY for a point given in decimal degrees.
    ///
    /// Coordinates use the default `f64` rendering.
    ///
    /// # Examples
    ///
    /// ```
    /// use pvgis_tmy::TmyEndpoint;
    ///
    /// let url = TmyEndpoint::default().tmy_url(36.617, -6.358);
    /// assert_eq!(
    ///     url,
    ///     "https://re.jrc.ec.europa.eu/api/v5_2/tmy?lat=36.617&lon=-6.358&outputformat=csv"
    /// );
    /// ```
    pub fn tmy_url(&self, latitude: f64, longitude: f64) -> String {
        format!(
            "{}/{}/tmy?lat={}&lon={}&outputformat={}",
            self.base_url.trim_end_matches('/'),
            self.api_version,
            latitude,
            longitude,
            self.output_format
        )
    }
}

impl Default for TmyEndpoint {
    fn default() -> Self {
        Self::new(PVGIS_BASE_URL, PVGIS_API_VERSION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_with_custom_base() {
        let endpoint = TmyEndpoint::new("http://localhost:8080/api/", "v5_3");
        assert_eq!(
            endpoint.tmy_url(40.0, -6.0),
            "http://localhost:8080/api/v5_3/tmy?lat=40&lon=-6&outputformat=csv"
        );
    }

    #[test]
    fn test_url_keeps_full_precision() {
        let url = TmyEndpoint::default().tmy_url(43.66074911, -6.36315877);
        assert!(url.contains("lat=43.66074911&lon=-6.36315877&"), "{}", url);
    }
}
