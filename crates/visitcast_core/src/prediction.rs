//! Closed-form visit prediction.
//!
//! The model is log-linear in the log-transformed staff, income and
//! collection counts, linear in weekly hours, plus a trigonometric
//! location term:
//!
//! ```text
//! log_visits = intercept
//!            + log_staff      * ln(staff + 1)
//!            + log_income     * ln(income + 1)
//!            + hours_open     * hours
//!            + log_collection * ln(collection + 1)
//!            + spatial_factor * sin(lat) * cos(lon)
//! visits     = exp(log_visits) - 1
//! ```
//!
//! The location term is a fixed proxy of the two coordinates. It does not
//! interpolate the per-library coefficients of the observation dataset.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::error::DomainError;
use crate::model::{
    LibraryParameters, ModelCoefficients, ParameterField, PredictionResult, PredictionTerms,
    round_to,
};

/// Evaluates the visit model for a fixed set of coefficients
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PredictionEngine {
    coefficients: ModelCoefficients,
}

impl PredictionEngine {
    #[must_use]
    pub const fn new(coefficients: ModelCoefficients) -> Self {
        Self { coefficients }
    }

    #[must_use]
    pub fn coefficients(&self) -> &ModelCoefficients {
        &self.coefficients
    }

    /// Compute the unrounded model terms for `params`
    pub fn terms(&self, params: &LibraryParameters) -> Result<PredictionTerms, DomainError> {
        validate(params)?;

        let c = &self.coefficients;
        let log_staff = params.total_staff.ln_1p();
        let log_income = params.total_income.ln_1p();
        let log_collection = params.total_collection.ln_1p();
        let spatial_factor = params.latitude.to_radians().sin() * params.longitude.to_radians().cos();

        let log_visits = c.intercept
            + c.log_staff * log_staff
            + c.log_income * log_income
            + c.hours_open * params.hours_open
            + c.log_collection * log_collection
            + c.spatial_factor * spatial_factor;

        let visits = log_visits.exp_m1();
        if !visits.is_finite() {
            return Err(DomainError::Overflow { log_visits });
        }

        Ok(PredictionTerms {
            log_staff,
            log_income,
            log_collection,
            spatial_factor,
            log_visits,
            visits,
        })
    }

    /// Predict annual visits and the derived efficiency metrics.
    ///
    /// Rounding is applied to the returned values only; every ratio is
    /// derived from the full-precision visit count.
    pub fn predict(&self, params: &LibraryParameters) -> Result<PredictionResult, DomainError> {
        let terms = self.terms(params)?;
        Ok(Self::derive(params, &terms))
    }

    /// Predict a batch of independent parameter sets
    #[must_use]
    pub fn predict_batch(
        &self,
        batch: &[LibraryParameters],
    ) -> Vec<Result<PredictionResult, DomainError>> {
        #[cfg(feature = "parallel")]
        let results = batch.par_iter().map(|params| self.predict(params)).collect();

        #[cfg(not(feature = "parallel"))]
        let results = batch.iter().map(|params| self.predict(params)).collect();

        results
    }

    fn derive(params: &LibraryParameters, terms: &PredictionTerms) -> PredictionResult {
        let visits = terms.visits;
        PredictionResult {
            // exp_m1 is bounded below by -1; a negative log-scale prediction
            // (only reachable with alternate coefficients) clamps to zero.
            total_visits: visits.round().max(0.0) as u64,
            visits_per_capita: round_to(visits / params.population, 3),
            efficiency_score: round_to(visits / params.total_staff / 1000.0, 2),
            collection_utilization: round_to(visits / params.total_collection, 3),
        }
    }
}

/// Reject inputs that would make the model or its ratios undefined
/// Reject parameters outside the model's domain
pub(crate) fn validate(params: &LibraryParameters) -> Result<(), DomainError> {
    for field in ParameterField::ALL {
        let value = params.get(field);
        if !value.is_finite() {
            tracing::debug!(?field, value, "rejecting non-finite parameter");
            return Err(DomainError::NonFinite { field, value });
        }
    }

    for field in [
        ParameterField::Population,
        ParameterField::TotalStaff,
        ParameterField::TotalCollection,
    ] {
        let value = params.get(field);
        if value <= 0.0 {
            tracing::debug!(?field, value, "rejecting non-positive divisor");
            return Err(DomainError::NonPositive { field, value });
        }
    }

    for field in [ParameterField::TotalIncome, ParameterField::HoursOpen] {
        let value = params.get(field);
        if value < 0.0 {
            return Err(DomainError::Negative { field, value });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> PredictionEngine {
        PredictionEngine::new(ModelCoefficients::REFERENCE)
    }

    #[test]
    fn test_reference_terms() {
        let terms = engine().terms(&LibraryParameters::default()).unwrap();

        assert!((terms.log_staff - 11f64.ln()).abs() < 1e-12);
        assert!((terms.log_income - 500_001f64.ln()).abs() < 1e-12);
        assert!((terms.log_collection - 50_001f64.ln()).abs() < 1e-12);
        assert!((terms.spatial_factor - (-0.0940)).abs() < 1e-3);
        assert!((terms.log_visits - 12.2716).abs() < 1e-3);
    }

    #[test]
    fn test_reference_prediction() {
        let result = engine().predict(&LibraryParameters::default()).unwrap();

        assert_eq!(result.total_visits, 213_544);
        assert_eq!(result.visits_per_capita, 8.542);
        assert_eq!(result.efficiency_score, 21.35);
        assert_eq!(result.collection_utilization, 4.271);
    }

    #[test]
    fn test_zero_population_is_rejected() {
        let params = LibraryParameters {
            population: 0.0,
            ..Default::default()
        };

        let err = engine().predict(&params).unwrap_err();
        assert_eq!(
            err,
            DomainError::NonPositive {
                field: ParameterField::Population,
                value: 0.0
            }
        );
    }

    #[test]
    fn test_zero_staff_and_collection_are_rejected() {
        let no_staff = LibraryParameters {
            total_staff: 0.0,
            ..Default::default()
        };
        let no_collection = LibraryParameters {
            total_collection: 0.0,
            ..Default::default()
        };

        assert!(matches!(
            engine().predict(&no_staff),
            Err(DomainError::NonPositive {
                field: ParameterField::TotalStaff,
                ..
            })
        ));
        assert!(matches!(
            engine().predict(&no_collection),
            Err(DomainError::NonPositive {
                field: ParameterField::TotalCollection,
                ..
            })
        ));
    }

    #[test]
    fn test_negative_income_and_hours_are_rejected() {
        let params = LibraryParameters {
            hours_open: -1.0,
            ..Default::default()
        };
        assert!(matches!(
            engine().predict(&params),
            Err(DomainError::Negative {
                field: ParameterField::HoursOpen,
                ..
            })
        ));
    }

    #[test]
    fn test_non_finite_coordinates_are_rejected() {
        let params = LibraryParameters {
            latitude: f64::NAN,
            ..Default::default()
        };
        assert!(matches!(
            engine().predict(&params),
            Err(DomainError::NonFinite {
                field: ParameterField::Latitude,
                ..
            })
        ));
    }

    #[test]
    fn test_zero_income_is_accepted() {
        let params = LibraryParameters {
            total_income: 0.0,
            ..Default::default()
        };
        let result = engine().predict(&params).unwrap();
        assert!(result.total_visits > 0);
    }

    #[test]
    fn test_overflow_is_reported() {
        let params = LibraryParameters {
            hours_open: 1.0e6,
            ..Default::default()
        };
        assert!(matches!(
            engine().predict(&params),
            Err(DomainError::Overflow { .. })
        ));
    }

    #[test]
    fn test_values_outside_slider_ranges_are_accepted() {
        let params = LibraryParameters {
            total_staff: 400.0,
            total_income: 25_000_000.0,
            hours_open: 100.0,
            total_collection: 2_000_000.0,
            population: 1_500.0,
            ..Default::default()
        };
        assert!(engine().predict(&params).is_ok());
    }

    #[test]
    fn test_alternate_coefficients() {
        let flat = PredictionEngine::new(ModelCoefficients {
            intercept: 0.0,
            log_staff: 0.0,
            log_income: 0.0,
            hours_open: 0.0,
            log_collection: 0.0,
            spatial_factor: 0.0,
        });
        let result = flat.predict(&LibraryParameters::default()).unwrap();
        assert_eq!(result.total_visits, 0);
        assert_eq!(result.efficiency_score, 0.0);
    }

    #[test]
    fn test_predict_batch_keeps_order_and_errors() {
        let good = LibraryParameters::default();
        let bad = LibraryParameters {
            population: 0.0,
            ..Default::default()
        };
        let results = engine().predict_batch(&[good.clone(), bad, good]);

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].as_ref().unwrap().total_visits, 213_544);
        assert!(results[1].is_err());
        assert_eq!(results[2].as_ref().unwrap().total_visits, 213_544);
    }
}
