//! Configuration types for scenario sweeps.

use serde::{Deserialize, Serialize};

use crate::model::ParameterField;

/// Which parameter a sweep scales
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SweepDimension {
    #[default]
    Staff,
    Hours,
    Collection,
    Income,
}

impl SweepDimension {
    pub const ALL: [SweepDimension; 4] = [
        SweepDimension::Staff,
        SweepDimension::Hours,
        SweepDimension::Collection,
        SweepDimension::Income,
    ];

    /// The parameter field this dimension scales
    #[must_use]
    pub fn field(&self) -> ParameterField {
        match self {
            SweepDimension::Staff => ParameterField::TotalStaff,
            SweepDimension::Hours => ParameterField::HoursOpen,
            SweepDimension::Collection => ParameterField::TotalCollection,
            SweepDimension::Income => ParameterField::TotalIncome,
        }
    }

    /// Title for the sweep selector
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            SweepDimension::Staff => "Staff Impact on Visits",
            SweepDimension::Hours => "Hours Impact on Visits",
            SweepDimension::Collection => "Collection Impact on Visits",
            SweepDimension::Income => "Income Impact on Visits",
        }
    }

    /// Short label suitable for chart axes
    #[must_use]
    pub fn axis_label(&self) -> &'static str {
        match self {
            SweepDimension::Staff => "Staff Count",
            SweepDimension::Hours => "Weekly Hours",
            SweepDimension::Collection => "Collection Size",
            SweepDimension::Income => "Annual Income",
        }
    }

    /// Next dimension in selector order, wrapping around
    #[must_use]
    pub fn next(&self) -> Self {
        let idx = Self::ALL.iter().position(|d| d == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }
}

/// Evenly spaced multipliers expressed in tenths.
///
/// Values are produced from an integer step index so that the sequence is
/// free of floating-point accumulation drift: `0.5, 0.6, ... 2.0` contains
/// exactly 16 points and ends on `2.0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MultiplierRange {
    pub start_tenths: u32,
    pub end_tenths: u32,
    pub step_tenths: u32,
}

impl Default for MultiplierRange {
    fn default() -> Self {
        Self {
            start_tenths: 5,
            end_tenths: 20,
            step_tenths: 1,
        }
    }
}

impl MultiplierRange {
    /// Number of multipliers in the range (inclusive of both ends)
    #[must_use]
    pub fn len(&self) -> usize {
        if self.step_tenths == 0 || self.end_tenths < self.start_tenths {
            return 0;
        }
        ((self.end_tenths - self.start_tenths) / self.step_tenths) as usize + 1
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Generate the multiplier values
    #[must_use]
    pub fn values(&self) -> Vec<f64> {
        (0..self.len())
            .map(|i| f64::from(self.start_tenths + self.step_tenths * i as u32) / 10.0)
            .collect()
    }
}
