use serde::{Deserialize, Serialize};

/// Weights of the log-linear visit model.
///
/// Treated as fixed configuration: an engine receives a copy at construction
/// and never mutates it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelCoefficients {
    pub intercept: f64,
    pub log_staff: f64,
    pub log_income: f64,
    pub hours_open: f64,
    pub log_collection: f64,
    pub spatial_factor: f64,
}

impl ModelCoefficients {
    /// Coefficients of the reference model shipped with the calculator
    pub const REFERENCE: ModelCoefficients = ModelCoefficients {
        intercept: 2.5,
        log_staff: 0.65,
        log_income: 0.35,
        hours_open: 0.012,
        log_collection: 0.28,
        spatial_factor: 0.1,
    };
}

impl Default for ModelCoefficients {
    fn default() -> Self {
        Self::REFERENCE
    }
}
