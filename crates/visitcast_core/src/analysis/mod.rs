//! Scenario analysis over a single prediction.
//!
//! - [`sweep`] scales one parameter over a multiplier sequence
//! - [`sweep_partial`] does the same but records rejected points
//! - [`sweep_all`] runs every [`SweepDimension`] at once
//! - [`quick_scenarios`] reports the canned what-if deltas

mod config;
mod sweep;
mod what_if;

pub use config::{MultiplierRange, SweepDimension};
pub use sweep::{
    DimensionSweep, PartialSweep, RejectedPoint, ScenarioPoint, sweep, sweep_all, sweep_partial,
};
pub use what_if::{QuickAdjustment, QuickScenario, quick_scenarios};
