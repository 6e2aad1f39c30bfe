//! Validation utilities for the request boundary
//!
//! Checks that run before an upload reaches the classifier, and the single
//! place where classifier confidence is converted to a percentage.

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;

// ============================================================================
// Upload Validations
// ============================================================================

/// File extensions accepted for upload (compared case-insensitively)
pub const ALLOWED_IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif"];

/// Check that a filename carries an allowed image extension.
///
/// Only the text after the last `.` counts; a name without a dot is rejected.
pub fn allowed_image_file(filename: &str) -> bool {
    match filename.rsplit_once('.') {
        Some((_, ext)) => {
            let ext = ext.to_lowercase();
            ALLOWED_IMAGE_EXTENSIONS.contains(&ext.as_str())
        }
        None => false,
    }
}

// ============================================================================
// Confidence Conversions
// ============================================================================

/// Scale a `[0, 1]` classifier probability to a percentage rounded to two
/// decimal places (ties to even). Non-finite input comes back as NaN.
pub fn confidence_to_percent(fraction: f32) -> f64 {
    Decimal::from_f64(f64::from(fraction) * 100.0)
        .map(|d| d.round_dp(2))
        .and_then(|d| d.to_f64())
        .unwrap_or(f64::NAN)
}

/// Reject confidence values the advisor cannot meaningfully score
pub fn validate_confidence_percent(percent: f64) -> Result<f64, &'static str> {
    if !percent.is_finite() {
        return Err("Confidence must be a finite number");
    }
    Ok(percent)
}
