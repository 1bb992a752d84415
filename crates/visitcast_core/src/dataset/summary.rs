//! Descriptive statistics over a loaded dataset.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::{Dataset, GwrObservation};

/// Number of bins used by the dashboard histograms
pub const DEFAULT_BINS: usize = 10;

/// Spatially varying coefficient columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CoefficientField {
    #[default]
    LogStaff,
    LogIncome,
    HoursOpen,
    LogCollection,
    Intercept,
}

impl CoefficientField {
    pub const ALL: [CoefficientField; 5] = [
        CoefficientField::LogStaff,
        CoefficientField::LogIncome,
        CoefficientField::HoursOpen,
        CoefficientField::LogCollection,
        CoefficientField::Intercept,
    ];

    /// CSV column name
    #[must_use]
    pub fn column(&self) -> &'static str {
        match self {
            CoefficientField::LogStaff => "gwr_coef_log_TOTSTAFF",
            CoefficientField::LogIncome => "gwr_coef_log_TOTINCM",
            CoefficientField::HoursOpen => "gwr_coef_HRS_OPEN",
            CoefficientField::LogCollection => "gwr_coef_log_TOTCOLL",
            CoefficientField::Intercept => "gwr_coef_intercept",
        }
    }

    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            CoefficientField::LogStaff => "log_TOTSTAFF",
            CoefficientField::LogIncome => "log_TOTINCM",
            CoefficientField::HoursOpen => "HRS_OPEN",
            CoefficientField::LogCollection => "log_TOTCOLL",
            CoefficientField::Intercept => "Intercept",
        }
    }

    #[must_use]
    pub fn value(&self, observation: &GwrObservation) -> Option<f64> {
        match self {
            CoefficientField::LogStaff => observation.coef_log_staff,
            CoefficientField::LogIncome => observation.coef_log_income,
            CoefficientField::HoursOpen => observation.coef_hours_open,
            CoefficientField::LogCollection => observation.coef_log_collection,
            CoefficientField::Intercept => observation.coef_intercept,
        }
    }

    #[must_use]
    pub fn next(&self) -> Self {
        let idx = Self::ALL.iter().position(|c| c == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }
}

/// Closed interval of observed values
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl Default for ValueRange {
    fn default() -> Self {
        Self { min: 0.0, max: 1.0 }
    }
}

impl ValueRange {
    /// Range of the finite values, or `None` when there are none
    #[must_use]
    pub fn of(values: impl IntoIterator<Item = f64>) -> Option<Self> {
        values
            .into_iter()
            .filter(|v| v.is_finite())
            .fold(None, |acc: Option<ValueRange>, v| {
                Some(match acc {
                    None => ValueRange { min: v, max: v },
                    Some(r) => ValueRange {
                        min: r.min.min(v),
                        max: r.max.max(v),
                    },
                })
            })
    }

    /// Position of `value` within the range, clamped to `[0, 1]`.
    ///
    /// A zero-width range maps everything to the midpoint.
    #[must_use]
    pub fn normalize(&self, value: f64) -> f64 {
        let span = self.max - self.min;
        if span <= 0.0 || !span.is_finite() {
            return 0.5;
        }
        ((value - self.min) / span).clamp(0.0, 1.0)
    }
}

/// Longitude/latitude extent of the observations
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CoordinateBounds {
    pub longitude: ValueRange,
    pub latitude: ValueRange,
}

/// Headline statistics shown above the analysis charts
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetSummary {
    pub observations: usize,
    /// Mean local R² with missing values counted as zero
    pub mean_local_r2: f64,
    /// Root mean square of residuals with missing values counted as zero
    pub rmse: f64,
    pub max_local_r2: f64,
    pub bounds: CoordinateBounds,
    pub coefficient_ranges: FxHashMap<CoefficientField, ValueRange>,
}

impl DatasetSummary {
    #[must_use]
    pub fn compute(dataset: &Dataset) -> Self {
        let rows = dataset.observations();
        let n = rows.len().max(1) as f64;

        let r2 = |o: &GwrObservation| o.local_r2.filter(|v| v.is_finite()).unwrap_or(0.0);
        let residual = |o: &GwrObservation| o.residual.filter(|v| v.is_finite()).unwrap_or(0.0);

        let mean_local_r2 = rows.iter().map(r2).sum::<f64>() / n;
        let rmse = (rows.iter().map(|o| residual(o).powi(2)).sum::<f64>() / n).sqrt();
        let max_local_r2 = rows.iter().map(r2).fold(f64::NEG_INFINITY, f64::max);

        let bounds = CoordinateBounds {
            longitude: ValueRange::of(rows.iter().filter_map(|o| o.longitude))
                .unwrap_or(ValueRange { min: 0.0, max: 0.0 }),
            latitude: ValueRange::of(rows.iter().filter_map(|o| o.latitude))
                .unwrap_or(ValueRange { min: 0.0, max: 0.0 }),
        };

        let coefficient_ranges = CoefficientField::ALL
            .iter()
            .map(|field| {
                let range = ValueRange::of(dataset.coefficient_values(*field)).unwrap_or_default();
                (*field, range)
            })
            .collect();

        Self {
            observations: rows.len(),
            mean_local_r2,
            rmse,
            max_local_r2: if rows.is_empty() { 0.0 } else { max_local_r2 },
            bounds,
            coefficient_ranges,
        }
    }

    /// Range of a coefficient column, `0..1` when the column is empty
    #[must_use]
    pub fn coefficient_range(&self, field: CoefficientField) -> ValueRange {
        self.coefficient_ranges
            .get(&field)
            .copied()
            .unwrap_or_default()
    }
}

/// One equal-width histogram bin
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

/// Equal-width histogram over the finite values.
///
/// A bin counts `start <= v < end`, so the maximum value itself lands in no
/// bin. Empty input yields no bins.
#[must_use]
pub fn histogram(values: &[f64], bins: usize) -> Vec<HistogramBin> {
    let Some(range) = ValueRange::of(values.iter().copied()) else {
        return Vec::new();
    };
    if bins == 0 {
        return Vec::new();
    }

    let width = (range.max - range.min) / bins as f64;
    (0..bins)
        .map(|i| {
            let start = range.min + i as f64 * width;
            let end = start + width;
            let count = values.iter().filter(|&&v| v >= start && v < end).count();
            HistogramBin { start, end, count }
        })
        .collect()
}

/// Observed against predicted log-visits for one library
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterPoint {
    pub actual: f64,
    pub predicted: f64,
    pub label: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obs(lat: f64, lon: f64, r2: Option<f64>, residual: Option<f64>) -> GwrObservation {
        GwrObservation {
            latitude: Some(lat),
            longitude: Some(lon),
            log_visits: Some(10.0),
            local_r2: r2,
            residual,
            ..Default::default()
        }
    }

    #[test]
    fn test_histogram_excludes_maximum() {
        let values: Vec<f64> = (0..=10).map(f64::from).collect();
        let bins = histogram(&values, DEFAULT_BINS);

        assert_eq!(bins.len(), 10);
        assert!(bins.iter().all(|b| b.count == 1));
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 10);
        assert_eq!(bins[0].start, 0.0);
        assert_eq!(bins[9].end, 10.0);
    }

    #[test]
    fn test_histogram_empty_and_constant() {
        assert!(histogram(&[], DEFAULT_BINS).is_empty());
        assert!(histogram(&[f64::NAN], DEFAULT_BINS).is_empty());

        let constant = histogram(&[3.0, 3.0, 3.0], DEFAULT_BINS);
        assert_eq!(constant.len(), 10);
        assert!(constant.iter().all(|b| b.count == 0));
    }

    #[test]
    fn test_normalize_clamps() {
        let range = ValueRange { min: 0.2, max: 0.6 };
        assert_eq!(range.normalize(0.2), 0.0);
        assert!((range.normalize(0.4) - 0.5).abs() < 1e-12);
        assert_eq!(range.normalize(5.0), 1.0);
        assert_eq!(range.normalize(-5.0), 0.0);
        assert_eq!(ValueRange { min: 1.0, max: 1.0 }.normalize(1.0), 0.5);
    }

    #[test]
    fn test_summary_treats_missing_as_zero() {
        let dataset = Dataset {
            observations: vec![
                obs(40.0, -100.0, Some(0.8), Some(0.3)),
                obs(42.0, -96.0, None, Some(-0.4)),
                obs(41.0, -98.0, Some(0.4), None),
            ],
            discarded: 0,
        };
        let summary = DatasetSummary::compute(&dataset);

        assert_eq!(summary.observations, 3);
        assert!((summary.mean_local_r2 - 0.4).abs() < 1e-12);
        assert!((summary.rmse - (0.25f64 / 3.0).sqrt()).abs() < 1e-12);
        assert_eq!(summary.max_local_r2, 0.8);
        assert_eq!(summary.bounds.latitude, ValueRange { min: 40.0, max: 42.0 });
        assert_eq!(
            summary.bounds.longitude,
            ValueRange {
                min: -100.0,
                max: -96.0
            }
        );
    }

    #[test]
    fn test_empty_coefficient_column_defaults_to_unit_range() {
        let dataset = Dataset {
            observations: vec![obs(40.0, -100.0, None, None)],
            discarded: 0,
        };
        let summary = DatasetSummary::compute(&dataset);
        assert_eq!(
            summary.coefficient_range(CoefficientField::Intercept),
            ValueRange { min: 0.0, max: 1.0 }
        );
    }

    #[test]
    fn test_coefficient_cycle() {
        let mut field = CoefficientField::default();
        for _ in 0..CoefficientField::ALL.len() {
            field = field.next();
        }
        assert_eq!(field, CoefficientField::LogStaff);
        assert_eq!(CoefficientField::HoursOpen.column(), "gwr_coef_HRS_OPEN");
    }
}
