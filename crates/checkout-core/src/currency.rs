//! Currency context and conversion.
//!
//! The locale collaborator supplies a USD→target exchange rate and an
//! exemption flag. Chatbot and enterprise sessions are always priced in
//! USD regardless of locale; that bifurcation is a business rule, not a
//! bug.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::catalog::PlanSource;
use crate::error::PricingError;

/// US dollar currency code.
pub const USD: &str = "USD";

/// Locale-derived currency context for a checkout session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrencyContext {
    /// ISO 4217 currency code of the visitor's locale.
    pub code: String,

    /// USD→target multiplier, when the rate has been fetched.
    pub exchange_rate: Option<f64>,

    /// Whether the visitor's country is exempt from localized pricing
    /// and always billed in USD.
    pub is_exempt_country: bool,
}

impl Default for CurrencyContext {
    fn default() -> Self {
        Self::usd()
    }
}

impl CurrencyContext {
    /// A plain USD context (rate 1.0, exempt).
    #[must_use]
    pub fn usd() -> Self {
        Self {
            code: USD.to_string(),
            exchange_rate: Some(1.0),
            is_exempt_country: true,
        }
    }

    /// A localized context with a fetched exchange rate.
    #[must_use]
    pub fn localized(code: impl Into<String>, exchange_rate: f64) -> Self {
        Self {
            code: code.into(),
            exchange_rate: Some(exchange_rate),
            is_exempt_country: false,
        }
    }

    /// A localized context whose exchange rate has not arrived yet.
    #[must_use]
    pub fn pending(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            exchange_rate: None,
            is_exempt_country: false,
        }
    }

    /// Whether conversion applies at all for the given source.
    ///
    /// USD-only sources and exempt countries skip conversion entirely.
    #[must_use]
    pub fn applies_to(&self, source: PlanSource) -> bool {
        !source.is_usd_only() && !self.is_exempt_country
    }

    /// Whether pricing can proceed for the given source.
    ///
    /// False only when conversion applies but no exchange rate has been
    /// fetched yet.
    #[must_use]
    pub fn is_ready(&self, source: PlanSource) -> bool {
        !self.applies_to(source) || self.exchange_rate.is_some()
    }

    /// Currency code an invoice for this source is denominated in.
    #[must_use]
    pub fn effective_code(&self, source: PlanSource) -> &str {
        if self.applies_to(source) {
            &self.code
        } else {
            USD
        }
    }

    /// Convert a USD amount for the given source.
    ///
    /// USD-only sources and exempt countries return the amount unchanged.
    /// Other sources multiply by the exchange rate and round to the
    /// nearest whole unit.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::NotReady`] when conversion applies but the
    /// exchange rate is unavailable.
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
    pub fn convert(&self, amount_usd: i64, source: PlanSource) -> Result<i64, PricingError> {
        if !self.applies_to(source) {
            return Ok(amount_usd);
        }
        let Some(rate) = self.exchange_rate else {
            warn!(currency = %self.code, "exchange rate unavailable, pricing not ready");
            return Err(PricingError::NotReady);
        };
        Ok((amount_usd as f64 * rate).round() as i64)
    }
}
