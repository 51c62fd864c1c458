//! Checkout session state.
//!
//! All of the checkout page's mutable state lives in one explicit
//! [`CheckoutState`] value, changed only through [`CheckoutState::apply`].
//! Structural changes (plan, price, timeline, add-ons, currency, voice
//! bot) regenerate the invoice in full; billing edits replace the invoice
//! with one carrying the new details but never re-price. The previous
//! invoice is retained, stale, when pricing is not ready.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::catalog::PlanSource;
use crate::currency::CurrencyContext;
use crate::error::{CheckoutError, PricingError, Result};
use crate::invoice::{BillingDetails, Invoice};
use crate::params::LaunchParams;
use crate::pricing::{PricingEngine, QuoteRequest};
use crate::timeline::Timeline;

/// A transition of the checkout session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutAction {
    /// Select a plan from a flow.
    SelectPlan {
        /// Plan id to select.
        plan_id: String,
        /// Flow the selection came from.
        source: PlanSource,
    },

    /// Bill an exact pre-negotiated price, bypassing plan pricing.
    InjectPrice {
        /// Display name of the package.
        package_name: String,
        /// Exact price in whole USD.
        price_usd: i64,
    },

    /// Change the delivery timeline.
    SetTimeline(Timeline),

    /// Select or deselect an add-on.
    ToggleAddOn(String),

    /// Replace the currency context.
    SetCurrency(CurrencyContext),

    /// Enable or disable the voice bot.
    SetVoiceBot(bool),

    /// Replace the billing details. Does not re-price.
    EditBilling(BillingDetails),

    /// Clear the session back to defaults.
    Reset,
}

/// The complete state of a checkout session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CheckoutState {
    /// Selected plan id, if any.
    pub plan_id: Option<String>,

    /// Display-name override for the package.
    pub package_name: Option<String>,

    /// Flow the session originated from.
    pub source: PlanSource,

    /// Requested delivery timeline.
    pub timeline: Timeline,

    /// Selected add-on ids.
    pub selected_add_ons: BTreeSet<String>,

    /// Whether the voice bot is enabled.
    pub voice_bot_enabled: bool,

    /// Whether the visitor arrived from the main page.
    pub from_main_page: bool,

    /// Exact pre-negotiated price, when one was injected.
    pub direct_price: Option<i64>,

    /// Currency context from the locale collaborator.
    pub currency: CurrencyContext,

    /// Billing details being edited.
    pub billing: BillingDetails,

    /// The current invoice. Stale when `pricing_ready` is false.
    pub invoice: Option<Invoice>,

    /// False when the last regeneration hit a missing exchange rate;
    /// callers should disable submission until it is true again.
    pub pricing_ready: bool,
}

impl CheckoutState {
    /// A fresh session with no selection.
    #[must_use]
    pub fn new() -> Self {
        Self {
            pricing_ready: true,
            ..Self::default()
        }
    }

    /// Seed a session from launch parameters and regenerate the invoice.
    #[must_use]
    pub fn from_params(
        engine: &PricingEngine,
        params: &LaunchParams,
        currency: CurrencyContext,
    ) -> Self {
        let mut state = Self {
            plan_id: params.plan.clone(),
            package_name: params.package_name().map(ToString::to_string),
            source: params.source,
            voice_bot_enabled: params.voice_bot,
            from_main_page: params.from_main_page,
            direct_price: params.direct_price(),
            currency,
            pricing_ready: true,
            ..Self::default()
        };
        state.regenerate(engine);
        state
    }

    /// Apply an action, producing the next state.
    ///
    /// The returned state carries a fully regenerated invoice for
    /// structural actions; the previous invoice is never patched in
    /// place.
    #[must_use]
    pub fn apply(&self, engine: &PricingEngine, action: CheckoutAction) -> Self {
        let mut next = self.clone();
        match action {
            CheckoutAction::SelectPlan { plan_id, source } => {
                next.plan_id = Some(plan_id);
                next.source = source;
                // An explicit plan selection leaves any injected price
                // behind.
                next.direct_price = None;
                next.package_name = None;
                next.regenerate(engine);
            }
            CheckoutAction::InjectPrice {
                package_name,
                price_usd,
            } => {
                next.package_name = Some(package_name);
                next.direct_price = Some(price_usd);
                next.regenerate(engine);
            }
            CheckoutAction::SetTimeline(timeline) => {
                next.timeline = timeline;
                next.regenerate(engine);
            }
            CheckoutAction::ToggleAddOn(id) => {
                if !next.selected_add_ons.remove(&id) {
                    next.selected_add_ons.insert(id);
                }
                next.regenerate(engine);
            }
            CheckoutAction::SetCurrency(currency) => {
                next.currency = currency;
                next.regenerate(engine);
            }
            CheckoutAction::SetVoiceBot(enabled) => {
                next.voice_bot_enabled = enabled;
                next.regenerate(engine);
            }
            CheckoutAction::EditBilling(billing) => {
                next.billing = billing.clone();
                // Replace the invoice wholesale; pricing stays as-is.
                next.invoice = next.invoice.take().map(|inv| inv.with_billing(billing));
            }
            CheckoutAction::Reset => {
                next = Self::new();
            }
        }
        next
    }

    /// The quote request this state describes.
    #[must_use]
    pub fn quote_request(&self) -> QuoteRequest {
        QuoteRequest {
            plan_id: self.plan_id.clone().unwrap_or_default(),
            package_name: self.package_name.clone(),
            source: self.source,
            timeline: self.timeline,
            add_on_ids: self.selected_add_ons.clone(),
            voice_bot_enabled: self.voice_bot_enabled,
            from_main_page: self.from_main_page,
            currency: self.currency.clone(),
        }
    }

    /// Check that the session can be submitted.
    ///
    /// # Errors
    ///
    /// [`CheckoutError::NoInvoice`] without an invoice,
    /// [`CheckoutError::Pricing`] while pricing is not ready, and
    /// [`CheckoutError::MissingBillingField`] for incomplete billing
    /// details.
    pub fn validate_for_submission(&self) -> Result<()> {
        if self.invoice.is_none() {
            return Err(CheckoutError::NoInvoice);
        }
        if !self.pricing_ready {
            return Err(CheckoutError::Pricing(PricingError::NotReady));
        }
        self.billing.validate()
    }

    /// Regenerate the invoice from the current inputs.
    ///
    /// Billing details already entered are carried onto the fresh
    /// invoice. On `NotReady` the previous invoice is kept, stale.
    fn regenerate(&mut self, engine: &PricingEngine) {
        let generated = if let Some(price) = self.direct_price {
            let package_name = self
                .package_name
                .clone()
                .or_else(|| {
                    self.plan_id
                        .as_deref()
                        .and_then(|id| engine.catalog().plan(id))
                        .map(|plan| plan.name.clone())
                })
                .unwrap_or_default();
            Ok(engine.generate_invoice_with_price(&package_name, price))
        } else if self.plan_id.is_some() {
            engine.generate_invoice(&self.quote_request())
        } else {
            debug!("no plan selected yet, nothing to regenerate");
            return;
        };

        match generated {
            Ok(invoice) => {
                let invoice = if self.billing == BillingDetails::default() {
                    invoice
                } else {
                    invoice.with_billing(self.billing.clone())
                };
                self.invoice = Some(invoice);
                self.pricing_ready = true;
            }
            Err(PricingError::NotReady) => {
                warn!("pricing not ready, keeping previous invoice");
                self.pricing_ready = false;
            }
            Err(PricingError::NoPlanSelected) => {
                self.pricing_ready = true;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> PricingEngine {
        PricingEngine::default()
    }

    fn selected(engine: &PricingEngine, plan_id: &str, source: PlanSource) -> CheckoutState {
        CheckoutState::new().apply(
            engine,
            CheckoutAction::SelectPlan {
                plan_id: plan_id.to_string(),
                source,
            },
        )
    }

    #[test]
    fn selecting_a_plan_creates_an_invoice() {
        let engine = engine();
        let state = selected(&engine, "basic-ai-integration", PlanSource::Chatbot);
        let invoice = state.invoice.as_ref().unwrap();
        assert_eq!(invoice.total, 499);
        assert!(state.pricing_ready);
    }

    #[test]
    fn toggling_an_add_on_twice_restores_the_total() {
        let engine = engine();
        let state = selected(&engine, "basic-ai-integration", PlanSource::Chatbot);
        let original_total = state.invoice.as_ref().unwrap().total;

        let with_add_on = state.apply(
            &engine,
            CheckoutAction::ToggleAddOn("monthly-maintenance".to_string()),
        );
        assert_eq!(with_add_on.invoice.as_ref().unwrap().total, original_total + 39);

        let without = with_add_on.apply(
            &engine,
            CheckoutAction::ToggleAddOn("monthly-maintenance".to_string()),
        );
        assert_eq!(without.invoice.as_ref().unwrap().total, original_total);
        assert!(without.selected_add_ons.is_empty());
    }

    #[test]
    fn timeline_change_reprices() {
        let engine = engine();
        let state = selected(&engine, "basic-ai-integration", PlanSource::Chatbot);
        let urgent = state.apply(&engine, CheckoutAction::SetTimeline(Timeline::Urgent));
        // 499 + round(499 * 0.20) = 499 + 100
        assert_eq!(urgent.invoice.as_ref().unwrap().total, 599);
    }

    #[test]
    fn billing_edit_replaces_without_repricing() {
        let engine = engine();
        let state = selected(&engine, "basic-ai-integration", PlanSource::Chatbot);
        let before = state.invoice.clone().unwrap();

        let billing = BillingDetails {
            name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            phone: "+1 555 0100".to_string(),
            address: "1 Analytical Way".to_string(),
        };
        let edited = state.apply(&engine, CheckoutAction::EditBilling(billing.clone()));
        let after = edited.invoice.as_ref().unwrap();

        assert_eq!(after.billing.as_ref(), Some(&billing));
        assert_eq!(after.total, before.total);
        assert_eq!(after.sub_total, before.sub_total);
        assert_eq!(after.invoice_number, before.invoice_number);
    }

    #[test]
    fn billing_details_survive_repricing() {
        let engine = engine();
        let billing = BillingDetails {
            name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            phone: "+1 555 0100".to_string(),
            address: "1 Analytical Way".to_string(),
        };
        let state = selected(&engine, "basic-ai-integration", PlanSource::Chatbot)
            .apply(&engine, CheckoutAction::EditBilling(billing.clone()))
            .apply(&engine, CheckoutAction::SetTimeline(Timeline::Urgent));
        assert_eq!(
            state.invoice.as_ref().unwrap().billing.as_ref(),
            Some(&billing)
        );
    }

    #[test]
    fn missing_rate_keeps_previous_invoice_stale() {
        let engine = engine();
        let state = selected(&engine, "full-stack-basic", PlanSource::Traditional);
        let before = state.invoice.clone().unwrap();

        let stale = state.apply(
            &engine,
            CheckoutAction::SetCurrency(CurrencyContext::pending("EUR")),
        );
        assert!(!stale.pricing_ready);
        assert_eq!(stale.invoice.as_ref().unwrap().total, before.total);
        assert!(matches!(
            stale.validate_for_submission(),
            Err(CheckoutError::Pricing(PricingError::NotReady))
        ));

        let ready = stale.apply(
            &engine,
            CheckoutAction::SetCurrency(CurrencyContext::localized("EUR", 0.9)),
        );
        assert!(ready.pricing_ready);
        assert_eq!(ready.invoice.as_ref().unwrap().currency, "EUR");
    }

    #[test]
    fn injected_price_bypasses_plan_pricing() {
        let engine = engine();
        let state = CheckoutState::new().apply(
            &engine,
            CheckoutAction::InjectPrice {
                package_name: "Enterprise Automation Suite".to_string(),
                price_usd: 3200,
            },
        );
        let invoice = state.invoice.as_ref().unwrap();
        assert_eq!(invoice.total, 3200);
        assert_eq!(invoice.sub_total, 3200);
        assert_eq!(invoice.line_items.len(), 1);
    }

    #[test]
    fn selecting_a_plan_clears_injected_price() {
        let engine = engine();
        let state = CheckoutState::new()
            .apply(
                &engine,
                CheckoutAction::InjectPrice {
                    package_name: "Deal".to_string(),
                    price_usd: 3200,
                },
            )
            .apply(
                &engine,
                CheckoutAction::SelectPlan {
                    plan_id: "basic-ai-integration".to_string(),
                    source: PlanSource::Chatbot,
                },
            );
        assert_eq!(state.direct_price, None);
        assert_eq!(state.invoice.as_ref().unwrap().total, 499);
    }

    #[test]
    fn voice_bot_toggle_reprices_the_advanced_plan() {
        let engine = engine();
        let state = selected(&engine, "advanced-ai-integration", PlanSource::Chatbot);
        assert_eq!(state.invoice.as_ref().unwrap().total, 899);

        let with_voice = state.apply(&engine, CheckoutAction::SetVoiceBot(true));
        assert_eq!(with_voice.invoice.as_ref().unwrap().total, 999);
    }

    #[test]
    fn submission_requires_complete_billing() {
        let engine = engine();
        let state = selected(&engine, "basic-ai-integration", PlanSource::Chatbot);
        assert!(matches!(
            state.validate_for_submission(),
            Err(CheckoutError::MissingBillingField { field: "name" })
        ));
    }

    #[test]
    fn submission_requires_an_invoice() {
        let state = CheckoutState::new();
        assert!(matches!(
            state.validate_for_submission(),
            Err(CheckoutError::NoInvoice)
        ));
    }

    #[test]
    fn from_params_seeds_a_direct_price_session() {
        let engine = engine();
        let params = LaunchParams::from_pairs([
            ("plan", "basic-ai-integration"),
            ("source", "chatbot"),
            ("package", "Basic AI Integration"),
            ("price", "499"),
        ]);
        let state = CheckoutState::from_params(&engine, &params, CurrencyContext::usd());
        let invoice = state.invoice.as_ref().unwrap();
        assert_eq!(invoice.total, 499);
        assert_eq!(invoice.line_items.len(), 1);
        assert_eq!(invoice.package_name, "Basic AI Integration");
    }

    #[test]
    fn reset_clears_the_session() {
        let engine = engine();
        let state = selected(&engine, "basic-ai-integration", PlanSource::Chatbot)
            .apply(&engine, CheckoutAction::Reset);
        assert_eq!(state.invoice, None);
        assert_eq!(state.plan_id, None);
        assert!(state.selected_add_ons.is_empty());
    }
}
