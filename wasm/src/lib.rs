//! WebAssembly module for the Produce Freshness Advisor
//!
//! Provides client-side computation for:
//! - Freshness advisories from on-device classifications
//! - Confidence tier lookup
//! - Upload pre-checks before sending an image to the server

use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::validation::*;

/// Build a freshness report and return it as a JSON string.
///
/// `confidence_percent` uses the same 0-100 scale as the `/predict` response.
#[wasm_bindgen]
pub fn advise_freshness(category: &str, confidence_percent: f64) -> Result<String, JsValue> {
    let report = shared::advise(category, confidence_percent);
    serde_json::to_string(&report)
        .map_err(|e| JsValue::from_str(&format!("Failed to serialize report: {}", e)))
}

/// Confidence tier name ("high", "medium", "low", "very-low") for a percentage
#[wasm_bindgen]
pub fn confidence_tier(confidence_percent: f64) -> String {
    ConfidenceTier::from_percent(confidence_percent).to_string()
}

/// Check an upload filename before sending it to the server
#[wasm_bindgen]
pub fn is_allowed_image(filename: &str) -> bool {
    allowed_image_file(filename)
}

/// Convert a raw model probability (0-1) into the percentage the advisor expects
#[wasm_bindgen]
pub fn probability_to_percent(probability: f32) -> f64 {
    confidence_to_percent(probability)
}
