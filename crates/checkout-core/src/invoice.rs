//! Invoice types.
//!
//! Invoices are derived documents: regenerated in full on every pricing
//! input change and never patched in place. Both the on-screen rendering
//! and the HTML export consume the same struct.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CheckoutError, Result};
use crate::timeline::Timeline;

/// Days until an invoice is due.
pub const DUE_DAYS: i64 = 7;

/// Prefix of generated invoice numbers.
pub const INVOICE_NUMBER_PREFIX: &str = "INV-";

/// A single line on an invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceLineItem {
    /// What the line covers.
    pub description: String,

    /// Optional detail text shown under the description.
    pub details: Option<String>,

    /// Quantity billed.
    pub quantity: u32,

    /// Unit rate in the invoice currency.
    pub rate: i64,

    /// Line amount in the invoice currency.
    pub amount: i64,
}

impl InvoiceLineItem {
    /// A single-quantity line where rate and amount coincide.
    #[must_use]
    pub fn flat(description: impl Into<String>, details: Option<String>, amount: i64) -> Self {
        Self {
            description: description.into(),
            details,
            quantity: 1,
            rate: amount,
            amount,
        }
    }
}

/// User-editable billing details.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingDetails {
    /// Full name.
    pub name: String,

    /// Email address.
    pub email: String,

    /// Phone number.
    pub phone: String,

    /// Postal address.
    pub address: String,
}

impl BillingDetails {
    /// Check that every required field is filled in.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::MissingBillingField`] naming the first
    /// empty field.
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("name", &self.name),
            ("email", &self.email),
            ("phone", &self.phone),
            ("address", &self.address),
        ] {
            if value.trim().is_empty() {
                return Err(CheckoutError::MissingBillingField { field });
            }
        }
        Ok(())
    }
}

/// A fully resolved, line-itemized pricing document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    /// Invoice number, `INV-` followed by the issue epoch milliseconds.
    pub invoice_number: String,

    /// Issue timestamp.
    pub date: DateTime<Utc>,

    /// Due timestamp, exactly [`DUE_DAYS`] after the issue date.
    pub due_date: DateTime<Utc>,

    /// Display name of the invoiced package.
    pub package_name: String,

    /// Delivery timeline the price was computed for.
    pub timeline: Timeline,

    /// Converted base amount of the package.
    pub amount: i64,

    /// Discount amount subtracted from the total.
    pub discount: i64,

    /// Base amount plus add-ons, before surcharge and discount.
    pub sub_total: i64,

    /// Tax rate. Always 0 under current rules.
    pub tax_rate: f64,

    /// Tax amount. Always 0 under current rules.
    pub tax_amount: i64,

    /// Final total.
    pub total: i64,

    /// Currency the invoice is denominated in.
    pub currency: String,

    /// Itemized lines: the package, selected add-ons, and a timeline
    /// adjustment when one applies.
    pub line_items: Vec<InvoiceLineItem>,

    /// Billing details, once the user has provided them.
    pub billing: Option<BillingDetails>,
}

impl Invoice {
    /// Invoice number for an issue timestamp.
    #[must_use]
    pub fn number_for(issued_at: DateTime<Utc>) -> String {
        format!("{INVOICE_NUMBER_PREFIX}{}", issued_at.timestamp_millis())
    }

    /// Due date for an issue timestamp.
    #[must_use]
    pub fn due_date_for(issued_at: DateTime<Utc>) -> DateTime<Utc> {
        issued_at + Duration::days(DUE_DAYS)
    }

    /// The same invoice with billing details replaced.
    ///
    /// Pricing figures are untouched; this is the only part of an invoice
    /// that changes without a recomputation.
    #[must_use]
    pub fn with_billing(mut self, billing: BillingDetails) -> Self {
        self.billing = Some(billing);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invoice_number_from_timestamp() {
        let issued_at = DateTime::from_timestamp_millis(1_700_000_000_123).unwrap();
        assert_eq!(Invoice::number_for(issued_at), "INV-1700000000123");
    }

    #[test]
    fn due_date_is_seven_days_out() {
        let issued_at = Utc::now();
        let due = Invoice::due_date_for(issued_at);
        assert_eq!(due - issued_at, Duration::days(7));
    }

    #[test]
    fn flat_line_item() {
        let item = InvoiceLineItem::flat("Monthly Maintenance", None, 39);
        assert_eq!(item.quantity, 1);
        assert_eq!(item.rate, 39);
        assert_eq!(item.amount, 39);
    }

    #[test]
    fn billing_validation_names_first_empty_field() {
        let mut billing = BillingDetails {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            phone: String::new(),
            address: "1 Analytical Way".to_string(),
        };
        match billing.validate() {
            Err(CheckoutError::MissingBillingField { field }) => assert_eq!(field, "phone"),
            other => panic!("expected missing phone, got {other:?}"),
        }

        billing.phone = "+1 555 0100".to_string();
        assert!(billing.validate().is_ok());
    }

    #[test]
    fn whitespace_only_field_is_missing() {
        let billing = BillingDetails {
            name: "   ".to_string(),
            email: "a@b.c".to_string(),
            phone: "1".to_string(),
            address: "x".to_string(),
        };
        assert!(matches!(
            billing.validate(),
            Err(CheckoutError::MissingBillingField { field: "name" })
        ));
    }
}
