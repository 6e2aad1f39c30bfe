//! Domain models for the Produce Freshness Advisor

mod freshness;

pub use freshness::*;
