mod coefficients;
mod parameters;
mod results;

pub use coefficients::ModelCoefficients;
pub use parameters::{LibraryParameters, ParameterField};
pub use results::{PredictionResult, PredictionTerms};

pub(crate) use results::round_to;
