//! Business logic services for the Produce Freshness Advisor

pub mod prediction;
pub mod preprocess;

pub use prediction::PredictionService;
pub use preprocess::{prepare_image, ImageTensor};
