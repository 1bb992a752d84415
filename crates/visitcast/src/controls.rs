//! Slider affordances for the parameter panel.
//!
//! Ranges only bound what the keyboard controls can reach; values loaded
//! from the config file may lie outside them.

use visitcast_core::model::{LibraryParameters, ParameterField};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderSpec {
    pub field: ParameterField,
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

/// Multiplier applied to the step by the coarse-adjust keys
pub const COARSE_FACTOR: f64 = 10.0;

pub const SLIDERS: [SliderSpec; 7] = [
    SliderSpec {
        field: ParameterField::TotalStaff,
        min: 1.0,
        max: 50.0,
        step: 1.0,
    },
    SliderSpec {
        field: ParameterField::TotalIncome,
        min: 100_000.0,
        max: 2_000_000.0,
        step: 10_000.0,
    },
    SliderSpec {
        field: ParameterField::HoursOpen,
        min: 20.0,
        max: 80.0,
        step: 1.0,
    },
    SliderSpec {
        field: ParameterField::TotalCollection,
        min: 10_000.0,
        max: 200_000.0,
        step: 1_000.0,
    },
    SliderSpec {
        field: ParameterField::Population,
        min: 5_000.0,
        max: 100_000.0,
        step: 1_000.0,
    },
    SliderSpec {
        field: ParameterField::Latitude,
        min: -90.0,
        max: 90.0,
        step: 0.01,
    },
    SliderSpec {
        field: ParameterField::Longitude,
        min: -180.0,
        max: 180.0,
        step: 0.01,
    },
];

impl SliderSpec {
    /// Slider for a field
    pub fn for_field(field: ParameterField) -> &'static SliderSpec {
        SLIDERS
            .iter()
            .find(|s| s.field == field)
            .unwrap_or(&SLIDERS[0])
    }

    /// Move `value` by `steps` slider steps, clamped to the range and
    /// snapped to the step grid.
    pub fn adjust(&self, value: f64, steps: f64) -> f64 {
        let moved = value + self.step * steps;
        let snapped = (moved / self.step).round() * self.step;
        // Keep two decimals for coordinate steps
        let snapped = (snapped * 100.0).round() / 100.0;
        snapped.clamp(self.min, self.max)
    }

    /// Fractional position of `value` within the range
    pub fn position(&self, value: f64) -> f64 {
        ((value - self.min) / (self.max - self.min)).clamp(0.0, 1.0)
    }
}

/// Apply a slider move to `params`; returns whether the value changed
pub fn adjust_field(params: &mut LibraryParameters, field: ParameterField, steps: f64) -> bool {
    let spec = SliderSpec::for_field(field);
    let current = params.get(field);
    let next = spec.adjust(current, steps);
    if next == current {
        return false;
    }
    params.set(field, next);
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_field_has_a_slider() {
        for field in ParameterField::ALL {
            assert_eq!(SliderSpec::for_field(field).field, field);
        }
    }

    #[test]
    fn test_adjust_clamps_at_bounds() {
        let staff = SliderSpec::for_field(ParameterField::TotalStaff);
        assert_eq!(staff.adjust(50.0, 1.0), 50.0);
        assert_eq!(staff.adjust(1.0, -1.0), 1.0);
        assert_eq!(staff.adjust(45.0, COARSE_FACTOR), 50.0);
        assert_eq!(staff.adjust(10.0, 1.0), 11.0);
    }

    #[test]
    fn test_adjust_snaps_to_step_grid() {
        let income = SliderSpec::for_field(ParameterField::TotalIncome);
        assert_eq!(income.adjust(503_500.0, 1.0), 510_000.0);

        let lat = SliderSpec::for_field(ParameterField::Latitude);
        assert_eq!(lat.adjust(39.5, 1.0), 39.51);
        assert_eq!(lat.adjust(39.5, -COARSE_FACTOR), 39.4);
    }

    #[test]
    fn test_out_of_range_value_is_pulled_back() {
        let hours = SliderSpec::for_field(ParameterField::HoursOpen);
        assert_eq!(hours.adjust(120.0, 1.0), 80.0);
    }

    #[test]
    fn test_adjust_field_reports_change() {
        let mut params = LibraryParameters::default();
        assert!(adjust_field(&mut params, ParameterField::HoursOpen, 1.0));
        assert_eq!(params.hours_open, 51.0);

        params.total_staff = 50.0;
        assert!(!adjust_field(&mut params, ParameterField::TotalStaff, 1.0));
    }
}
