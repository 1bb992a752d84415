//! One-call evaluation of a parameter set.

use serde::Serialize;

use crate::advice::{BenchmarkComparison, Recommendation, advise, performance_breakdown};
use crate::analysis::{
    QuickScenario, RejectedPoint, ScenarioPoint, SweepDimension, quick_scenarios, sweep_partial,
};
use crate::error::DomainError;
use crate::model::{LibraryParameters, PredictionResult, PredictionTerms};
use crate::prediction::PredictionEngine;

/// Everything the predictor view shows for one set of parameters
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Evaluation {
    pub parameters: LibraryParameters,
    pub prediction: PredictionResult,
    pub terms: PredictionTerms,
    pub dimension: SweepDimension,
    pub scenarios: Vec<ScenarioPoint>,
    /// Sweep points whose scaled value left the model's domain
    pub rejected_scenarios: Vec<RejectedPoint>,
    pub quick_scenarios: Vec<QuickScenario>,
    pub recommendations: Vec<Recommendation>,
    pub breakdown: Vec<BenchmarkComparison>,
}

impl Evaluation {
    /// Predict, sweep `dimension` and advise.
    ///
    /// Fails only when `params` itself is invalid; sweep points the engine
    /// rejects are listed in `rejected_scenarios`.
    pub fn compute(
        engine: &PredictionEngine,
        params: &LibraryParameters,
        dimension: SweepDimension,
        multipliers: &[f64],
    ) -> Result<Self, DomainError> {
        let terms = engine.terms(params)?;
        let prediction = engine.predict(params)?;
        let sweep = sweep_partial(engine, params, dimension, multipliers);
        let quick_scenarios = quick_scenarios(engine, params)?;
        let recommendations = advise(params)?;
        let breakdown = performance_breakdown(params, &prediction);

        Ok(Self {
            parameters: params.clone(),
            prediction,
            terms,
            dimension,
            scenarios: sweep.points,
            rejected_scenarios: sweep.rejected,
            quick_scenarios,
            recommendations,
            breakdown,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::advice::Category;
    use crate::analysis::MultiplierRange;
    use crate::model::ModelCoefficients;

    #[test]
    fn test_reference_evaluation() {
        let engine = PredictionEngine::new(ModelCoefficients::REFERENCE);
        let eval = Evaluation::compute(
            &engine,
            &LibraryParameters::default(),
            SweepDimension::Staff,
            &MultiplierRange::default().values(),
        )
        .unwrap();

        assert_eq!(eval.prediction.total_visits, 213_544);
        assert_eq!(eval.scenarios.len(), 16);
        assert_eq!(eval.scenarios[5].visits, 213_544);
        assert_eq!(eval.quick_scenarios.len(), 3);
        assert_eq!(eval.recommendations.len(), 1);
        assert_eq!(eval.recommendations[0].category, Category::Staff);
        assert_eq!(eval.breakdown.len(), 4);
        assert!(eval.rejected_scenarios.is_empty());
    }

    #[test]
    fn test_degenerate_sweep_point_keeps_prediction() {
        let engine = PredictionEngine::new(ModelCoefficients::REFERENCE);
        let params = LibraryParameters {
            total_staff: 0.9,
            ..Default::default()
        };
        let eval = Evaluation::compute(
            &engine,
            &params,
            SweepDimension::Staff,
            &MultiplierRange::default().values(),
        )
        .unwrap();

        assert_eq!(eval.prediction, engine.predict(&params).unwrap());
        assert_eq!(eval.recommendations.len(), 1);
        assert_eq!(eval.recommendations[0].category, Category::Staff);
        assert_eq!(eval.quick_scenarios.len(), 3);
        assert_eq!(eval.scenarios.len(), 15);
        assert_eq!(eval.rejected_scenarios.len(), 1);
        assert_eq!(eval.rejected_scenarios[0].control_value, 0.0);
    }

    #[test]
    fn test_invalid_parameters_fail_whole_evaluation() {
        let engine = PredictionEngine::new(ModelCoefficients::REFERENCE);
        let params = LibraryParameters {
            total_collection: -5.0,
            ..Default::default()
        };
        let result = Evaluation::compute(&engine, &params, SweepDimension::Hours, &[1.0]);
        assert!(matches!(result, Err(DomainError::NonPositive { .. })));
    }

    #[test]
    fn test_serializes_to_json() {
        let engine = PredictionEngine::default();
        let eval = Evaluation::compute(
            &engine,
            &LibraryParameters::default(),
            SweepDimension::Collection,
            &[1.0],
        )
        .unwrap();

        let json = serde_json::to_value(&eval).unwrap();
        assert_eq!(json["prediction"]["total_visits"], 213_544);
        assert_eq!(json["dimension"], "Collection");
        assert_eq!(json["recommendations"][0]["priority"], "High");
    }
}
