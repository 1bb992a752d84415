pub mod gwr;
pub mod predictor;
pub mod urban_rural;

use crate::components::Component;

/// Trait for full screen views
pub trait Screen: Component {
    /// Get the screen title
    fn title(&self) -> &str;
}
