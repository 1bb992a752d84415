//! Library visitation prediction and GWR analysis
//!
//! This crate provides the computational core behind the visitcast dashboard:
//! - A closed-form visit prediction with derived efficiency metrics
//! - Scenario sweeps that scale one operating parameter at a time
//! - Threshold-based optimization recommendations and benchmark comparisons
//! - Loading and summarizing pre-computed GWR observations from CSV
//! - Fixed urban/rural comparison tables
//!
//! # Example
//!
//! ```
//! use visitcast_core::analysis::{MultiplierRange, SweepDimension};
//! use visitcast_core::model::{LibraryParameters, ModelCoefficients};
//! use visitcast_core::pipeline::Evaluation;
//! use visitcast_core::prediction::PredictionEngine;
//!
//! let engine = PredictionEngine::new(ModelCoefficients::REFERENCE);
//! let eval = Evaluation::compute(
//!     &engine,
//!     &LibraryParameters::default(),
//!     SweepDimension::Staff,
//!     &MultiplierRange::default().values(),
//! )
//! .unwrap();
//!
//! assert_eq!(eval.prediction.total_visits, 213_544);
//! ```

#![warn(clippy::all)]

// ============================================================================
// Core modules
// ============================================================================

pub mod advice;
pub mod analysis;
pub mod error;
pub mod pipeline;
pub mod prediction;

// ============================================================================
// Data modules
// ============================================================================

pub mod dataset;
pub mod model;
pub mod regional;

// ============================================================================
// Test modules
// ============================================================================

#[cfg(test)]
mod tests;

// ============================================================================
// Public re-exports for convenience
// ============================================================================

pub use error::{DataLoadError, DatasetError, DomainError};
pub use model::{LibraryParameters, ModelCoefficients, PredictionResult};
pub use pipeline::Evaluation;
pub use prediction::PredictionEngine;
