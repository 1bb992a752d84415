mod app_state;
mod cache;
mod dataset_state;
mod tabs;

pub use app_state::*;
pub use cache::*;
pub use dataset_state::*;
pub use tabs::*;
