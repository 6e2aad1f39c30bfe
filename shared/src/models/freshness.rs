//! Produce freshness models

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Freshness category assigned by the image classifier
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum FreshnessCategory {
    /// At peak, ready for premium sale
    Ripe,
    /// Not yet at peak, ripens within days
    Unripe,
    /// Past peak, sell or chill immediately
    Old,
    /// Bruised or split, processing only
    Damaged,
}

/// Error returned when a label is outside the known category set
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Unknown freshness category: {0}")]
pub struct UnknownCategory(pub String);

impl FreshnessCategory {
    pub const ALL: [FreshnessCategory; 4] = [
        FreshnessCategory::Ripe,
        FreshnessCategory::Unripe,
        FreshnessCategory::Old,
        FreshnessCategory::Damaged,
    ];

    /// Look up a classifier label, ignoring case and surrounding whitespace
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "ripe" => Some(FreshnessCategory::Ripe),
            "unripe" => Some(FreshnessCategory::Unripe),
            "old" => Some(FreshnessCategory::Old),
            "damaged" => Some(FreshnessCategory::Damaged),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FreshnessCategory::Ripe => "ripe",
            FreshnessCategory::Unripe => "unripe",
            FreshnessCategory::Old => "old",
            FreshnessCategory::Damaged => "damaged",
        }
    }

    /// Market profile for this category
    pub fn profile(&self) -> &'static CategoryProfile {
        match self {
            FreshnessCategory::Ripe => &RIPE_PROFILE,
            FreshnessCategory::Unripe => &UNRIPE_PROFILE,
            FreshnessCategory::Old => &OLD_PROFILE,
            FreshnessCategory::Damaged => &DAMAGED_PROFILE,
        }
    }
}

impl std::str::FromStr for FreshnessCategory {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

impl std::fmt::Display for FreshnessCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FreshnessCategory::Ripe => write!(f, "Ripe"),
            FreshnessCategory::Unripe => write!(f, "Unripe"),
            FreshnessCategory::Old => write!(f, "Old"),
            FreshnessCategory::Damaged => write!(f, "Damaged"),
        }
    }
}

/// How soon a batch has to move
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Low,
    Medium,
    High,
    Critical,
}

impl Urgency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Urgency::Low => "low",
            Urgency::Medium => "medium",
            Urgency::High => "high",
            Urgency::Critical => "critical",
        }
    }
}

impl std::fmt::Display for Urgency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Static market knowledge for one freshness category
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CategoryProfile {
    /// Score before confidence attenuation (0-100)
    pub base_score: u8,
    pub shelf_life: &'static str,
    pub action: &'static str,
    pub pricing: &'static str,
    pub urgency: Urgency,
    pub cooling_needed: bool,
}

pub static RIPE_PROFILE: CategoryProfile = CategoryProfile {
    base_score: 95,
    shelf_life: "5-7 days",
    action: "Premium market ready - excellent for immediate sale",
    pricing: "Full market price (₦15,000-₦18,000/basket)",
    urgency: Urgency::Low,
    cooling_needed: false,
};

pub static UNRIPE_PROFILE: CategoryProfile = CategoryProfile {
    base_score: 70,
    shelf_life: "3-4 days until peak ripeness",
    action: "Good for market - will ripen soon",
    pricing: "Standard price (₦12,000-₦15,000/basket)",
    urgency: Urgency::Medium,
    cooling_needed: false,
};

pub static OLD_PROFILE: CategoryProfile = CategoryProfile {
    base_score: 50,
    shelf_life: "1-2 days maximum",
    action: "Sell immediately or move to cold storage",
    pricing: "Reduced price (₦8,000-₦10,000/basket)",
    urgency: Urgency::High,
    cooling_needed: true,
};

pub static DAMAGED_PROFILE: CategoryProfile = CategoryProfile {
    base_score: 20,
    shelf_life: "Process today",
    action: "Not suitable for fresh sale - process into paste/sauce",
    pricing: "Processing price only (₦3,000-₦5,000/basket)",
    urgency: Urgency::Critical,
    cooling_needed: true,
};

/// Fallback for labels outside the known category set
pub static UNKNOWN_PROFILE: CategoryProfile = CategoryProfile {
    base_score: 50,
    shelf_life: "Unknown",
    action: "Manual inspection recommended",
    pricing: "Market rate varies",
    urgency: Urgency::Medium,
    cooling_needed: false,
};

/// Discretized classifier confidence
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ConfidenceTier {
    /// >= 0.85
    High,
    /// >= 0.70
    Medium,
    /// >= 0.50
    Low,
    /// < 0.50
    VeryLow,
}

impl ConfidenceTier {
    /// Tier for a confidence expressed as a fraction of 1.
    ///
    /// Lower bounds are inclusive. Anything that fails every comparison
    /// (including NaN) lands in `VeryLow`.
    pub fn from_fraction(fraction: f64) -> Self {
        if fraction >= 0.85 {
            ConfidenceTier::High
        } else if fraction >= 0.70 {
            ConfidenceTier::Medium
        } else if fraction >= 0.50 {
            ConfidenceTier::Low
        } else {
            ConfidenceTier::VeryLow
        }
    }

    /// Tier for a confidence expressed as a percentage
    pub fn from_percent(percent: f64) -> Self {
        Self::from_fraction(percent / 100.0)
    }

    pub fn multiplier(&self) -> f64 {
        match self {
            ConfidenceTier::High => 1.0,
            ConfidenceTier::Medium => 0.9,
            ConfidenceTier::Low => 0.75,
            ConfidenceTier::VeryLow => 0.60,
        }
    }

    /// Apply the tier multiplier to a base score, truncating toward zero
    pub fn attenuate(&self, base_score: u8) -> u8 {
        (f64::from(base_score) * self.multiplier()) as u8
    }

    /// Whether the advisory should carry a low-confidence warning
    pub fn needs_warning(&self) -> bool {
        matches!(self, ConfidenceTier::Low | ConfidenceTier::VeryLow)
    }
}

impl std::fmt::Display for ConfidenceTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfidenceTier::High => write!(f, "high"),
            ConfidenceTier::Medium => write!(f, "medium"),
            ConfidenceTier::Low => write!(f, "low"),
            ConfidenceTier::VeryLow => write!(f, "very-low"),
        }
    }
}

/// Market-actionable freshness report returned to clients
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FreshnessReport {
    /// Confidence-attenuated score (0-100)
    pub score: u8,
    /// Normalized category label, capitalized
    pub category: String,
    /// Classifier confidence as a percentage, echoed unmodified
    pub confidence: f64,
    pub shelf_life: String,
    pub action: String,
    pub pricing: String,
    pub urgency: Urgency,
    pub cooling_needed: bool,
}

/// Raw top-1 output of an image classifier
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Classification {
    pub label: String,
    /// Probability between 0.0 and 1.0
    pub confidence: f32,
}
