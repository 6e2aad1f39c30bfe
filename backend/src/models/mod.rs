//! Domain models for the Produce Freshness Advisor
//!
//! Re-exports models from the shared crate and adds backend-specific models

pub use shared::models::*;

use serde::{Deserialize, Serialize};

/// Input for scoring a classification made outside the server
#[derive(Debug, Clone, Deserialize)]
pub struct AdviseInput {
    pub category: String,
    /// Confidence as a percentage (0-100)
    pub confidence: f64,
}

/// One entry of the category knowledge table
#[derive(Debug, Serialize)]
pub struct CategoryEntry {
    pub category: FreshnessCategory,
    pub label: String,
    #[serde(flatten)]
    pub profile: &'static CategoryProfile,
}

/// Full knowledge table plus the profile used for unrecognized labels
#[derive(Debug, Serialize)]
pub struct CategoryCatalog {
    pub categories: Vec<CategoryEntry>,
    pub fallback: &'static CategoryProfile,
}

impl CategoryCatalog {
    pub fn current() -> Self {
        Self {
            categories: FreshnessCategory::ALL
                .iter()
                .map(|c| CategoryEntry {
                    category: *c,
                    label: c.to_string(),
                    profile: c.profile(),
                })
                .collect(),
            fallback: &UNKNOWN_PROFILE,
        }
    }
}
