//! Scenario sweep - re-evaluates the model while scaling one parameter.

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::model::{LibraryParameters, PredictionResult, round_to};
use crate::prediction::PredictionEngine;

use super::SweepDimension;

/// One evaluated point of a sweep
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScenarioPoint {
    /// Scale factor applied to the base value (one decimal)
    pub multiplier: f64,
    /// Scaled, rounded value of the swept parameter
    pub control_value: f64,
    pub visits: u64,
    pub efficiency: f64,
}

impl ScenarioPoint {
    fn at(multiplier: f64, control_value: f64, prediction: &PredictionResult) -> Self {
        Self {
            multiplier: round_to(multiplier, 1),
            control_value,
            visits: prediction.total_visits,
            efficiency: prediction.efficiency_score,
        }
    }
}

/// A sweep point whose scaled parameters the engine rejected
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RejectedPoint {
    pub multiplier: f64,
    pub control_value: f64,
    pub reason: String,
}

/// Sweep output that keeps going past rejected points
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartialSweep {
    /// Accepted points, in multiplier order
    pub points: Vec<ScenarioPoint>,
    pub rejected: Vec<RejectedPoint>,
}

/// Sweep results for one dimension
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionSweep {
    pub dimension: SweepDimension,
    pub points: Vec<ScenarioPoint>,
}

/// Evaluate `params` once per multiplier, scaling only `dimension`.
///
/// The base value is read from `params` before the first point, so
/// multipliers are always relative to the current state. Every other field
/// is held fixed. The output has one point per multiplier, in input order.
pub fn sweep(
    engine: &PredictionEngine,
    params: &LibraryParameters,
    dimension: SweepDimension,
    multipliers: &[f64],
) -> Result<Vec<ScenarioPoint>, DomainError> {
    let field = dimension.field();
    let base_value = params.get(field);

    multipliers
        .iter()
        .map(|&multiplier| {
            let control_value = (base_value * multiplier).round();
            let prediction = engine.predict(&params.with(field, control_value))?;
            Ok(ScenarioPoint::at(multiplier, control_value, &prediction))
        })
        .collect()
}

/// Like [`sweep`], but a scaled value the engine rejects (staff rounded to
/// zero, say) is recorded in `rejected` instead of failing the whole run.
pub fn sweep_partial(
    engine: &PredictionEngine,
    params: &LibraryParameters,
    dimension: SweepDimension,
    multipliers: &[f64],
) -> PartialSweep {
    let field = dimension.field();
    let base_value = params.get(field);
    let mut result = PartialSweep::default();

    for &multiplier in multipliers {
        let control_value = (base_value * multiplier).round();
        match engine.predict(&params.with(field, control_value)) {
            Ok(prediction) => {
                result
                    .points
                    .push(ScenarioPoint::at(multiplier, control_value, &prediction));
            }
            Err(e) => {
                tracing::debug!(?dimension, multiplier, control_value, error = %e, "sweep point rejected");
                result.rejected.push(RejectedPoint {
                    multiplier: round_to(multiplier, 1),
                    control_value,
                    reason: e.to_string(),
                });
            }
        }
    }

    result
}

/// Sweep every dimension with the same multipliers.
///
/// Results are returned in [`SweepDimension::ALL`] order.
pub fn sweep_all(
    engine: &PredictionEngine,
    params: &LibraryParameters,
    multipliers: &[f64],
) -> Result<Vec<DimensionSweep>, DomainError> {
    let run = |dimension: &SweepDimension| {
        sweep(engine, params, *dimension, multipliers).map(|points| DimensionSweep {
            dimension: *dimension,
            points,
        })
    };

    #[cfg(feature = "parallel")]
    let results = SweepDimension::ALL[..].par_iter().map(run).collect();

    #[cfg(not(feature = "parallel"))]
    let results = SweepDimension::ALL.iter().map(run).collect();

    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::MultiplierRange;
    use crate::model::ModelCoefficients;

    fn engine() -> PredictionEngine {
        PredictionEngine::new(ModelCoefficients::REFERENCE)
    }

    #[test]
    fn test_staff_sweep_matches_reference_curve() {
        let params = LibraryParameters::default();
        let points = sweep(
            &engine(),
            &params,
            SweepDimension::Staff,
            &MultiplierRange::default().values(),
        )
        .unwrap();

        assert_eq!(points.len(), 16);
        assert_eq!(points[0].control_value, 5.0);
        assert_eq!(points[0].visits, 144_005);
        assert_eq!(points[0].efficiency, 28.8);
        assert_eq!(points[15].multiplier, 2.0);
        assert_eq!(points[15].control_value, 20.0);
        assert_eq!(points[15].visits, 325_106);
        assert_eq!(points[15].efficiency, 16.26);
    }

    #[test]
    fn test_unit_multiplier_reproduces_base() {
        let params = LibraryParameters::default();
        for dimension in SweepDimension::ALL {
            let points = sweep(&engine(), &params, dimension, &[1.0]).unwrap();
            assert_eq!(points[0].control_value, params.get(dimension.field()));
            assert_eq!(
                points[0].visits,
                engine().predict(&params).unwrap().total_visits
            );
        }
    }

    #[test]
    fn test_preserves_input_order() {
        let multipliers = [2.0, 0.5, 1.3];
        let points = sweep(
            &engine(),
            &LibraryParameters::default(),
            SweepDimension::Hours,
            &multipliers,
        )
        .unwrap();

        let got: Vec<f64> = points.iter().map(|p| p.multiplier).collect();
        assert_eq!(got, multipliers.to_vec());
        assert_eq!(points[0].control_value, 100.0);
        assert_eq!(points[1].control_value, 25.0);
        assert_eq!(points[2].control_value, 65.0);
    }

    #[test]
    fn test_only_swept_field_changes() {
        let params = LibraryParameters::default();
        let points = sweep(&engine(), &params, SweepDimension::Income, &[1.5]).unwrap();

        let expected = engine()
            .predict(&params.with(crate::model::ParameterField::TotalIncome, 750_000.0))
            .unwrap();
        assert_eq!(points[0].visits, expected.total_visits);
        assert_eq!(points[0].efficiency, expected.efficiency_score);
    }

    #[test]
    fn test_empty_multipliers() {
        let points = sweep(
            &engine(),
            &LibraryParameters::default(),
            SweepDimension::Collection,
            &[],
        )
        .unwrap();
        assert!(points.is_empty());
    }

    #[test]
    fn test_degenerate_scaled_value_is_an_error() {
        let params = LibraryParameters {
            total_staff: 1.0,
            ..Default::default()
        };
        // round(1 * 0.4) == 0 staff
        let result = sweep(&engine(), &params, SweepDimension::Staff, &[0.4, 1.0]);
        assert!(result.is_err());
    }

    #[test]
    fn test_partial_sweep_keeps_valid_points() {
        let params = LibraryParameters {
            total_staff: 0.9,
            ..Default::default()
        };
        let multipliers = MultiplierRange::default().values();
        let result = sweep_partial(&engine(), &params, SweepDimension::Staff, &multipliers);

        // round(0.9 * 0.5) == 0; every later multiplier rounds to at least 1
        assert_eq!(result.rejected.len(), 1);
        assert_eq!(result.rejected[0].multiplier, 0.5);
        assert_eq!(result.rejected[0].control_value, 0.0);
        assert!(result.rejected[0].reason.contains("Total Staff"));

        assert_eq!(result.points.len(), 15);
        assert_eq!(result.points[0].multiplier, 0.6);
        assert_eq!(result.points[0].control_value, 1.0);
        assert!(result.points.iter().all(|p| p.control_value >= 1.0));
    }

    #[test]
    fn test_partial_sweep_matches_sweep_when_all_valid() {
        let params = LibraryParameters::default();
        let multipliers = MultiplierRange::default().values();
        let partial = sweep_partial(&engine(), &params, SweepDimension::Income, &multipliers);

        assert!(partial.rejected.is_empty());
        assert_eq!(
            partial.points,
            sweep(&engine(), &params, SweepDimension::Income, &multipliers).unwrap()
        );
    }

    #[test]
    fn test_is_restartable() {
        let params = LibraryParameters::default();
        let multipliers = MultiplierRange::default().values();
        let first = sweep(&engine(), &params, SweepDimension::Collection, &multipliers).unwrap();
        let second = sweep(&engine(), &params, SweepDimension::Collection, &multipliers).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_sweep_all_covers_every_dimension_in_order() {
        let sweeps = sweep_all(
            &engine(),
            &LibraryParameters::default(),
            &MultiplierRange::default().values(),
        )
        .unwrap();

        let dims: Vec<SweepDimension> = sweeps.iter().map(|s| s.dimension).collect();
        assert_eq!(dims, SweepDimension::ALL.to_vec());
        assert!(sweeps.iter().all(|s| s.points.len() == 16));
    }
}
