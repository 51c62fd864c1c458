//! Delivery timeline options.
//!
//! The timeline adjusts the package price by a fixed percentage: urgent
//! delivery costs extra, a relaxed schedule earns a small reduction.

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Urgent delivery surcharge rate (+20%).
pub const URGENT_SURCHARGE_RATE: f64 = 0.20;

/// Relaxed delivery discount rate (-5%).
pub const RELAXED_DISCOUNT_RATE: f64 = -0.05;

/// Requested delivery speed for a package.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Timeline {
    /// Expedited delivery, +20% on the base amount.
    Urgent,

    /// Standard delivery, no adjustment.
    #[default]
    Normal,

    /// Flexible schedule, -5% on the base amount.
    Relaxed,
}

impl Timeline {
    /// Surcharge rate applied to the converted base amount.
    #[must_use]
    pub const fn surcharge_rate(&self) -> f64 {
        match self {
            Self::Urgent => URGENT_SURCHARGE_RATE,
            Self::Normal => 0.0,
            Self::Relaxed => RELAXED_DISCOUNT_RATE,
        }
    }

    /// Surcharge amount for a given base amount, rounded to the nearest
    /// whole unit. Negative for [`Timeline::Relaxed`].
    #[must_use]
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
    pub fn surcharge_amount(&self, base_amount: i64) -> i64 {
        (base_amount as f64 * self.surcharge_rate()).round() as i64
    }

    /// Short display label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Urgent => "Urgent Delivery",
            Self::Normal => "Standard Delivery",
            Self::Relaxed => "Relaxed Delivery",
        }
    }

    /// Description shown on the invoice and in the exported document.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Urgent => "Expedited delivery with priority scheduling (+20%)",
            Self::Normal => "Standard delivery schedule",
            Self::Relaxed => "Flexible delivery schedule (-5%)",
        }
    }

    /// Parameter value as sent by the checkout page.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Urgent => "urgent",
            Self::Normal => "normal",
            Self::Relaxed => "relaxed",
        }
    }

    /// Parse a timeline parameter value.
    ///
    /// Unrecognized values fall back to [`Timeline::Normal`]. This mirrors
    /// the checkout page's behavior; it is a known validation gap rather
    /// than a guarantee worth relying on.
    #[must_use]
    pub fn from_param(value: &str) -> Self {
        match value {
            "urgent" => Self::Urgent,
            "relaxed" => Self::Relaxed,
            "normal" => Self::Normal,
            other => {
                if !other.is_empty() {
                    warn!(timeline = other, "unrecognized timeline, using normal");
                }
                Self::Normal
            }
        }
    }
}
