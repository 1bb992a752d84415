//! Chart components for data visualization.

mod histogram;
mod scatter;

pub use histogram::render_histogram;
pub use scatter::{MapPoint, render_fit_scatter, render_value_map};
