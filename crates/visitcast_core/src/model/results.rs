use serde::{Deserialize, Serialize};

/// Display-rounded output of a single prediction
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    /// Predicted annual visits, rounded to the nearest integer
    pub total_visits: u64,
    /// Visits per resident (3 decimals)
    pub visits_per_capita: f64,
    /// Thousands of visits per staff member (2 decimals)
    pub efficiency_score: f64,
    /// Visits per collection item (3 decimals)
    pub collection_utilization: f64,
}

/// Full-precision intermediate values of a prediction
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionTerms {
    pub log_staff: f64,
    pub log_income: f64,
    pub log_collection: f64,
    pub spatial_factor: f64,
    pub log_visits: f64,
    /// Back-transformed visits before rounding
    pub visits: f64,
}

/// Round to a fixed number of decimal places (display precision only).
///
/// Exact halves round away from zero. The scaled product is rounded, not the
/// decimal text, so a value like 1.005 whose binary form sits just below the
/// half rounds down.
pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(8.541748, 3), 8.542);
        assert_eq!(round_to(21.354370, 2), 21.35);
        assert_eq!(round_to(4.270874, 3), 4.271);
        assert_eq!(round_to(1.95, 0), 2.0);
    }

    #[test]
    fn test_round_to_halves() {
        assert_eq!(round_to(0.125, 2), 0.13);
        assert_eq!(round_to(-0.125, 2), -0.13);
        assert_eq!(round_to(2.5, 0), 3.0);
        assert_eq!(round_to(1.005, 2), 1.0);
    }
}
