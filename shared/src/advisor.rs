//! Freshness advisor
//!
//! Turns a classifier's `(category, confidence)` output into a
//! market-actionable [`FreshnessReport`]. Pure and total: no I/O, no
//! shared state, no failure path.

use crate::models::{ConfidenceTier, FreshnessCategory, FreshnessReport, UNKNOWN_PROFILE};

/// Build the freshness report for a classified image.
///
/// `confidence_percent` is the classifier confidence on a 0-100 scale.
/// Values outside that range are accepted and scored with the same tier
/// thresholds.
pub fn advise(category: &str, confidence_percent: f64) -> FreshnessReport {
    let normalized = category.trim().to_lowercase();
    let profile = FreshnessCategory::parse(&normalized)
        .map(|c| c.profile())
        .unwrap_or(&UNKNOWN_PROFILE);

    let tier = ConfidenceTier::from_percent(confidence_percent);
    let score = tier.attenuate(profile.base_score);

    let action = if tier.needs_warning() {
        low_confidence_action(profile.action, confidence_percent)
    } else {
        profile.action.to_string()
    };

    FreshnessReport {
        score,
        category: capitalize(&normalized),
        confidence: confidence_percent,
        shelf_life: profile.shelf_life.to_string(),
        action,
        pricing: profile.pricing.to_string(),
        urgency: profile.urgency,
        cooling_needed: profile.cooling_needed,
    }
}

/// Wrap an action in the low-confidence warning shown to traders
pub fn low_confidence_action(action: &str, confidence_percent: f64) -> String {
    let pct = confidence_percent.floor() as i64;
    format!("⚠️ Low confidence ({}%) - {} - Double-check visually", pct, action)
}

/// Uppercase the first character and lowercase the rest
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
