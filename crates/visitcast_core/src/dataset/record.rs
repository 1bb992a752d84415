use serde::{Deserialize, Serialize};

/// One library row of the GWR output file.
///
/// Columns are matched by header name; extra columns are ignored and any
/// column may be absent. Cells that are empty or not numeric become `None`.
///
/// Relevant columns:
/// LATITUDE,LONGITUD,log_VISITS,gwr_coef_intercept,gwr_coef_log_TOTSTAFF,
/// gwr_coef_log_TOTINCM,gwr_coef_HRS_OPEN,gwr_coef_log_TOTCOLL,
/// gwr_local_r2,gwr_residuals,gwr_predictions,LIBNAME,CITY
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct GwrObservation {
    #[serde(rename = "LATITUDE", deserialize_with = "csv::invalid_option")]
    pub latitude: Option<f64>,
    #[serde(rename = "LONGITUD", deserialize_with = "csv::invalid_option")]
    pub longitude: Option<f64>,
    #[serde(rename = "log_VISITS", deserialize_with = "csv::invalid_option")]
    pub log_visits: Option<f64>,
    #[serde(rename = "gwr_coef_intercept", deserialize_with = "csv::invalid_option")]
    pub coef_intercept: Option<f64>,
    #[serde(rename = "gwr_coef_log_TOTSTAFF", deserialize_with = "csv::invalid_option")]
    pub coef_log_staff: Option<f64>,
    #[serde(rename = "gwr_coef_log_TOTINCM", deserialize_with = "csv::invalid_option")]
    pub coef_log_income: Option<f64>,
    #[serde(rename = "gwr_coef_HRS_OPEN", deserialize_with = "csv::invalid_option")]
    pub coef_hours_open: Option<f64>,
    #[serde(rename = "gwr_coef_log_TOTCOLL", deserialize_with = "csv::invalid_option")]
    pub coef_log_collection: Option<f64>,
    #[serde(rename = "gwr_local_r2", deserialize_with = "csv::invalid_option")]
    pub local_r2: Option<f64>,
    #[serde(rename = "gwr_residuals", deserialize_with = "csv::invalid_option")]
    pub residual: Option<f64>,
    #[serde(rename = "gwr_predictions", deserialize_with = "csv::invalid_option")]
    pub prediction: Option<f64>,
    #[serde(rename = "LIBNAME")]
    pub library_name: Option<String>,
    #[serde(rename = "CITY")]
    pub city: Option<String>,
}

impl GwrObservation {
    /// Whether the row has a usable location and observed visits.
    ///
    /// A coordinate of exactly zero counts as missing.
    #[must_use]
    pub fn is_usable(&self) -> bool {
        let present = |v: Option<f64>| v.is_some_and(|v| v.is_finite() && v != 0.0);
        present(self.latitude) && present(self.longitude) && self.log_visits.is_some_and(f64::is_finite)
    }

    /// Library name, falling back to the city, then `"Unknown"`
    #[must_use]
    pub fn display_name(&self) -> &str {
        [&self.library_name, &self.city]
            .into_iter()
            .flatten()
            .map(|s| s.trim())
            .find(|s| !s.is_empty())
            .unwrap_or("Unknown")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn usable() -> GwrObservation {
        GwrObservation {
            latitude: Some(41.2),
            longitude: Some(-96.1),
            log_visits: Some(10.4),
            ..Default::default()
        }
    }

    #[test]
    fn test_usable_requires_location_and_visits() {
        assert!(usable().is_usable());
        assert!(!GwrObservation { latitude: None, ..usable() }.is_usable());
        assert!(!GwrObservation { longitude: Some(0.0), ..usable() }.is_usable());
        assert!(!GwrObservation { log_visits: None, ..usable() }.is_usable());
    }

    #[test]
    fn test_zero_log_visits_is_usable() {
        assert!(GwrObservation { log_visits: Some(0.0), ..usable() }.is_usable());
    }

    #[test]
    fn test_display_name_fallbacks() {
        let named = GwrObservation {
            library_name: Some("Main Branch".into()),
            city: Some("Omaha".into()),
            ..usable()
        };
        let city_only = GwrObservation {
            city: Some("Omaha".into()),
            ..usable()
        };
        assert_eq!(named.display_name(), "Main Branch");
        assert_eq!(city_only.display_name(), "Omaha");
        assert_eq!(usable().display_name(), "Unknown");
    }
}
