//! Terminal dashboard for the library visit model.
//!
//! Three tabs: an interactive predictor over `visitcast_core`, an analysis
//! view of a pre-computed GWR output file, and the fixed urban/rural
//! comparison.

pub mod app;
pub mod components;
pub mod config;
pub mod controls;
pub mod logging;
pub mod screens;
pub mod state;
pub mod util;
pub mod worker;

pub use app::App;
pub use config::{AppConfig, DatasetSource};
pub use logging::init_logging;
