//! Cross-module tests for the visitcast core
//!
//! Tests are organized by topic:
//! - `reference` - The reference library scenario end to end
//! - `properties` - Randomized monotonicity, idempotence and non-negativity
//! - `sweeps` - Sweep length, order and base-value invariants
//! - `recommendations` - Rule ordering and the well-optimized state
//! - `dataset` - Loading files from disk and summarizing them

mod recommendations;
