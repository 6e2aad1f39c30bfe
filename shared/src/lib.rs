//! Shared types and scoring logic for the Produce Freshness Advisor
//!
//! This crate contains the freshness knowledge table and advisor used by the
//! backend, the frontend (via WASM), and other components of the system.

pub mod advisor;
pub mod models;
pub mod validation;

pub use advisor::*;
pub use models::*;
pub use validation::*;
