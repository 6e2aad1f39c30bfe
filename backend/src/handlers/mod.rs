//! HTTP handlers for the Produce Freshness Advisor

pub mod advisory;
pub mod health;
pub mod prediction;

pub use advisory::{advise_classification, list_categories};
pub use health::health_check;
pub use prediction::predict;
