//! Threshold rules that turn raw parameters into optimization advice.

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::model::{LibraryParameters, PredictionResult, round_to};
use crate::prediction::validate;

/// Staff per 1000 residents below which more staff is advised
pub const MIN_STAFF_RATIO: f64 = 0.5;
/// Weekly hours below which longer opening is advised
pub const MIN_WEEKLY_HOURS: f64 = 40.0;
/// Collection items per resident below which expansion is advised
pub const MIN_COLLECTION_RATIO: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Staff,
    Hours,
    Collection,
}

impl Category {
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Category::Staff => "Staff",
            Category::Hours => "Hours",
            Category::Collection => "Collection",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    High,
    Medium,
}

impl Priority {
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub category: Category,
    pub priority: Priority,
    pub message: String,
    /// Always equal to `priority`
    pub impact: Priority,
}

impl Recommendation {
    fn new(category: Category, priority: Priority, message: String) -> Self {
        Self {
            category,
            priority,
            message,
            impact: priority,
        }
    }
}

/// Evaluate every rule against `params`.
///
/// All rules run; the result is ordered Staff, Hours, Collection. An empty
/// list means the library is within every recommended range. Parameters the
/// engine would reject are rejected here too.
pub fn advise(params: &LibraryParameters) -> Result<Vec<Recommendation>, DomainError> {
    validate(params)?;
    let mut recommendations = Vec::new();

    let staff_ratio = params.staff_ratio();
    if staff_ratio < MIN_STAFF_RATIO {
        recommendations.push(Recommendation::new(
            Category::Staff,
            Priority::High,
            format!(
                "Consider increasing staff. Current ratio of {staff_ratio:.2} staff per 1000 residents is below recommended levels."
            ),
        ));
    }

    if params.hours_open < MIN_WEEKLY_HOURS {
        recommendations.push(Recommendation::new(
            Category::Hours,
            Priority::Medium,
            format!(
                "Extended hours could increase visits. Currently open {} hours/week.",
                params.hours_open
            ),
        ));
    }

    let collection_ratio = params.collection_ratio();
    if collection_ratio < MIN_COLLECTION_RATIO {
        recommendations.push(Recommendation::new(
            Category::Collection,
            Priority::Medium,
            format!(
                "Collection expansion recommended. Current ratio of {collection_ratio:.1} items per resident."
            ),
        ));
    }

    Ok(recommendations)
}

/// A current metric next to its peer benchmark
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkComparison {
    pub metric: String,
    pub value: f64,
    pub benchmark: f64,
}

impl BenchmarkComparison {
    fn new(metric: &str, value: f64, benchmark: f64) -> Self {
        Self {
            metric: metric.to_string(),
            value,
            benchmark,
        }
    }

    /// Value relative to the benchmark (1.0 = on benchmark)
    #[must_use]
    pub fn ratio(&self) -> f64 {
        if self.benchmark == 0.0 {
            0.0
        } else {
            self.value / self.benchmark
        }
    }
}

/// Staff ratio, hours, items per capita and efficiency against fixed benchmarks
#[must_use]
pub fn performance_breakdown(
    params: &LibraryParameters,
    prediction: &PredictionResult,
) -> Vec<BenchmarkComparison> {
    vec![
        BenchmarkComparison::new("Staff Ratio", round_to(params.staff_ratio(), 2), 0.6),
        BenchmarkComparison::new("Hours/Week", params.hours_open, 50.0),
        BenchmarkComparison::new("Items/Capita", round_to(params.collection_ratio(), 1), 3.0),
        BenchmarkComparison::new("Efficiency", prediction.efficiency_score, 2.5),
    ]
}
