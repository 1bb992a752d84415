//! Pre-computed GWR observations and the statistics derived from them.
//!
//! The file is produced by an external regression run; this module only
//! reads it. See [`parse_observations`] for the accepted format.

mod loader;
mod record;
mod summary;

pub use loader::{load_from_path, parse_observations};
pub use record::GwrObservation;
pub use summary::{
    CoefficientField, CoordinateBounds, DEFAULT_BINS, DatasetSummary, HistogramBin, ScatterPoint,
    ValueRange, histogram,
};

/// Usable observations, in file order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Dataset {
    observations: Vec<GwrObservation>,
    discarded: usize,
}

impl Dataset {
    #[must_use]
    pub fn observations(&self) -> &[GwrObservation] {
        &self.observations
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Rows dropped for a missing location or visit count
    #[must_use]
    pub fn discarded(&self) -> usize {
        self.discarded
    }

    /// Finite values of one coefficient column
    #[must_use]
    pub fn coefficient_values(&self, field: CoefficientField) -> Vec<f64> {
        self.finite(|o| field.value(o))
    }

    #[must_use]
    pub fn local_r2_values(&self) -> Vec<f64> {
        self.finite(|o| o.local_r2)
    }

    #[must_use]
    pub fn residual_values(&self) -> Vec<f64> {
        self.finite(|o| o.residual)
    }

    /// Actual against predicted log-visits for rows that have a prediction
    #[must_use]
    pub fn scatter_actual_vs_predicted(&self) -> Vec<ScatterPoint> {
        self.observations
            .iter()
            .filter_map(|o| {
                Some(ScatterPoint {
                    actual: o.log_visits?,
                    predicted: o.prediction.filter(|p| p.is_finite())?,
                    label: o.display_name().to_string(),
                })
            })
            .collect()
    }

    fn finite(&self, column: impl Fn(&GwrObservation) -> Option<f64>) -> Vec<f64> {
        self.observations
            .iter()
            .filter_map(column)
            .filter(|v| v.is_finite())
            .collect()
    }
}
