//! Deterministic invoice pricing.
//!
//! The engine derives a complete [`Invoice`] from explicit inputs: plan,
//! timeline, selected add-ons, and the currency context. There is no
//! hidden state; the same request always prices the same way.
//!
//! Computation order is fixed: base amount, currency conversion, timeline
//! surcharge, add-ons, subtotal, discount, tax, international fee, total.

use std::collections::BTreeSet;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::catalog::{Catalog, PlanSource, LEGACY_DISCOUNT_PLAN_NAME};
use crate::currency::CurrencyContext;
use crate::error::PricingError;
use crate::invoice::{Invoice, InvoiceLineItem};
use crate::timeline::Timeline;

/// Discount percentage for the legacy basic plan.
pub const LEGACY_PLAN_DISCOUNT_PERCENT: u8 = 10;

/// Discount percentage for all other traditional plans.
pub const TRADITIONAL_DISCOUNT_PERCENT: u8 = 20;

/// Everything needed to price one invoice.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuoteRequest {
    /// Plan id to price. Unknown ids resolve to a base amount of 0.
    pub plan_id: String,

    /// Display-name override from the `package` parameter, if any.
    pub package_name: Option<String>,

    /// Where the session originated.
    pub source: PlanSource,

    /// Requested delivery timeline.
    pub timeline: Timeline,

    /// Selected add-on ids.
    pub add_on_ids: BTreeSet<String>,

    /// Whether the voice bot is enabled (affects the advanced AI plan).
    pub voice_bot_enabled: bool,

    /// Whether the visitor arrived from the main page.
    pub from_main_page: bool,

    /// Currency context from the locale collaborator.
    pub currency: CurrencyContext,
}

impl QuoteRequest {
    /// A request for a plan with everything else at defaults.
    #[must_use]
    pub fn for_plan(plan_id: impl Into<String>, source: PlanSource) -> Self {
        Self {
            plan_id: plan_id.into(),
            source,
            ..Self::default()
        }
    }
}

/// The invoice pricing engine.
#[derive(Debug, Clone, Default)]
pub struct PricingEngine {
    catalog: Catalog,
}

impl PricingEngine {
    /// Create an engine over a catalog.
    #[must_use]
    pub fn new(catalog: Catalog) -> Self {
        Self { catalog }
    }

    /// The catalog this engine prices from.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Discount percentage for a plan.
    ///
    /// AI sources and main-page traffic get no discount. The legacy
    /// basic plan keeps its original 10%; every other traditional plan
    /// gets 20%. The discount applies to the converted base amount only,
    /// never to add-ons or surcharges.
    #[must_use]
    pub fn discount_percent(
        &self,
        plan_name: &str,
        source: PlanSource,
        from_main_page: bool,
    ) -> u8 {
        if source.is_usd_only() || from_main_page {
            0
        } else if plan_name == LEGACY_DISCOUNT_PLAN_NAME {
            LEGACY_PLAN_DISCOUNT_PERCENT
        } else {
            TRADITIONAL_DISCOUNT_PERCENT
        }
    }

    /// International processing fee.
    ///
    /// Always 0 under current rules; kept as the extension point for a
    /// future non-USD settlement path.
    #[must_use]
    pub fn international_fee(&self, currency: &str, amount: i64) -> i64 {
        let _ = (currency, amount);
        0
    }

    /// Price a request into a complete invoice.
    ///
    /// # Errors
    ///
    /// [`PricingError::NoPlanSelected`] when the request has no plan id,
    /// and [`PricingError::NotReady`] when a localized plan is priced
    /// before the exchange rate has arrived. On `NotReady` the caller
    /// should keep any previous invoice and disable submission.
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
    pub fn generate_invoice(&self, request: &QuoteRequest) -> Result<Invoice, PricingError> {
        if request.plan_id.trim().is_empty() {
            return Err(PricingError::NoPlanSelected);
        }

        let plan = self.catalog.plan(&request.plan_id);
        let package_name = request
            .package_name
            .clone()
            .or_else(|| plan.map(|p| p.name.clone()))
            .unwrap_or_else(|| request.plan_id.clone());
        // Discount eligibility keys off the catalog name, not the display
        // override.
        let discount_name = plan.map_or(package_name.as_str(), |p| p.name.as_str());

        let base_usd = self
            .catalog
            .base_amount(&request.plan_id, request.voice_bot_enabled);
        let ctx = &request.currency;
        let converted_base = ctx.convert(base_usd, request.source)?;

        let surcharge = request.timeline.surcharge_amount(converted_base);

        let mut line_items = vec![InvoiceLineItem::flat(
            package_name.clone(),
            Some(request.timeline.description().to_string()),
            converted_base,
        )];

        let mut converted_add_ons = 0;
        for id in &request.add_on_ids {
            match self.catalog.add_on(id) {
                Some(add_on) => {
                    let amount = ctx.convert(add_on.price_usd, request.source)?;
                    converted_add_ons += amount;
                    line_items.push(InvoiceLineItem::flat(
                        add_on.name.clone(),
                        Some(add_on.description.clone()),
                        amount,
                    ));
                }
                None => warn!(add_on = %id, "unknown add-on id, skipped"),
            }
        }

        let sub_total = converted_base + converted_add_ons;

        let percent = self.discount_percent(discount_name, request.source, request.from_main_page);
        let discount = (converted_base as f64 * f64::from(percent) / 100.0).round() as i64;

        let tax_rate = 0.0;
        let tax_amount = 0;
        let currency = ctx.effective_code(request.source).to_string();
        let fee = self.international_fee(&currency, sub_total);

        let mut total = sub_total + surcharge - discount + tax_amount + fee;
        // A real plan never prices to zero or below.
        if total <= 0 && base_usd > 0 {
            debug!(total, converted_base, "non-positive total floored to base amount");
            total = converted_base;
        }

        if surcharge != 0 {
            line_items.push(InvoiceLineItem::flat(
                format!("{} Adjustment", request.timeline.label()),
                Some(request.timeline.description().to_string()),
                surcharge,
            ));
        }

        let issued_at = Utc::now();
        Ok(Invoice {
            invoice_number: Invoice::number_for(issued_at),
            date: issued_at,
            due_date: Invoice::due_date_for(issued_at),
            package_name,
            timeline: request.timeline,
            amount: converted_base,
            discount,
            sub_total,
            tax_rate,
            tax_amount,
            total,
            currency,
            line_items,
            billing: None,
        })
    }

    /// Produce an invoice for an exact pre-negotiated price.
    ///
    /// Used when a chatbot or enterprise flow hands over a final quote via
    /// the `price` parameter. Skips all surcharge and discount
    /// computation: subtotal and total are the direct price, and there is
    /// exactly one line item.
    #[must_use]
    pub fn generate_invoice_with_price(
        &self,
        package_name: &str,
        direct_price_usd: i64,
    ) -> Invoice {
        let issued_at = Utc::now();
        Invoice {
            invoice_number: Invoice::number_for(issued_at),
            date: issued_at,
            due_date: Invoice::due_date_for(issued_at),
            package_name: package_name.to_string(),
            timeline: Timeline::Normal,
            amount: direct_price_usd,
            discount: 0,
            sub_total: direct_price_usd,
            tax_rate: 0.0,
            tax_amount: 0,
            total: direct_price_usd,
            currency: crate::currency::USD.to_string(),
            line_items: vec![InvoiceLineItem::flat(package_name, None, direct_price_usd)],
            billing: None,
        }
    }
}
