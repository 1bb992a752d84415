//! Fixed what-if adjustments reported as visit deltas.

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::model::{LibraryParameters, ParameterField};
use crate::prediction::PredictionEngine;

/// One of the canned adjustments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuickAdjustment {
    /// Staff × 1.2 (not rounded)
    MoreStaff,
    /// Ten more weekly hours
    LongerHours,
    /// Collection × 1.5
    LargerCollection,
}

impl QuickAdjustment {
    pub const ALL: [QuickAdjustment; 3] = [
        QuickAdjustment::MoreStaff,
        QuickAdjustment::LongerHours,
        QuickAdjustment::LargerCollection,
    ];

    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            QuickAdjustment::MoreStaff => "+20% Staff",
            QuickAdjustment::LongerHours => "+10 Hours/Week",
            QuickAdjustment::LargerCollection => "+50% Collection",
        }
    }

    fn apply(&self, params: &LibraryParameters) -> LibraryParameters {
        match self {
            QuickAdjustment::MoreStaff => params.with(
                ParameterField::TotalStaff,
                params.total_staff * 1.2,
            ),
            QuickAdjustment::LongerHours => {
                params.with(ParameterField::HoursOpen, params.hours_open + 10.0)
            }
            QuickAdjustment::LargerCollection => params.with(
                ParameterField::TotalCollection,
                params.total_collection * 1.5,
            ),
        }
    }
}

/// Visits under an adjustment compared with the unmodified prediction
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuickScenario {
    pub adjustment: QuickAdjustment,
    pub visits: u64,
    /// `visits` minus the base prediction's visits
    pub delta: i64,
}

/// Evaluate every [`QuickAdjustment`] against `params`, in declaration order
pub fn quick_scenarios(
    engine: &PredictionEngine,
    params: &LibraryParameters,
) -> Result<Vec<QuickScenario>, DomainError> {
    let base = engine.predict(params)?.total_visits as i64;

    QuickAdjustment::ALL
        .iter()
        .map(|adjustment| {
            let visits = engine.predict(&adjustment.apply(params))?.total_visits;
            Ok(QuickScenario {
                adjustment: *adjustment,
                visits,
                delta: visits as i64 - base,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ModelCoefficients;

    #[test]
    fn test_reference_deltas_are_positive_and_ordered() {
        let engine = PredictionEngine::new(ModelCoefficients::REFERENCE);
        let scenarios = quick_scenarios(&engine, &LibraryParameters::default()).unwrap();

        let order: Vec<QuickAdjustment> = scenarios.iter().map(|s| s.adjustment).collect();
        assert_eq!(order, QuickAdjustment::ALL.to_vec());
        assert!(scenarios.iter().all(|s| s.delta > 0));
    }

    #[test]
    fn test_staff_adjustment_is_unrounded() {
        let engine = PredictionEngine::new(ModelCoefficients::REFERENCE);
        let params = LibraryParameters {
            total_staff: 3.0,
            ..Default::default()
        };
        let scenarios = quick_scenarios(&engine, &params).unwrap();

        let expected = engine
            .predict(&params.with(ParameterField::TotalStaff, 3.6))
            .unwrap()
            .total_visits;
        assert_eq!(scenarios[0].visits, expected);
    }

    #[test]
    fn test_invalid_base_is_an_error() {
        let engine = PredictionEngine::new(ModelCoefficients::REFERENCE);
        let params = LibraryParameters {
            population: 0.0,
            ..Default::default()
        };
        assert!(quick_scenarios(&engine, &params).is_err());
    }
}
