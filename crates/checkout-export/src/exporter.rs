//! Invoice-to-HTML rendering.
//!
//! The exporter consumes the same [`Invoice`] struct the checkout page
//! renders; the template formats values but never recomputes them. The
//! output is a single self-contained HTML document with inlined styles,
//! suitable for download.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tera::Tera;
use tracing::debug;

use checkout_core::Invoice;

use crate::error::Result;

const TEMPLATE_NAME: &str = "invoice.html";
const TEMPLATE: &str = include_str!("../templates/invoice.html.tera");

/// Fixed legal terms embedded in every exported invoice.
pub const LEGAL_TERMS: &str = "Payment is due within 7 days of the invoice date. \
Work begins once payment is received. Deliverables remain the property of the \
studio until the invoice is settled in full. Prices include the listed scope \
only; change requests are quoted separately.";

/// A rendered invoice document.
#[derive(Debug, Clone)]
pub struct ExportedInvoice {
    /// Download file name, `Invoice-<invoice_number>.html`.
    pub file_name: String,

    /// The complete HTML document.
    pub html: String,
}

/// Renders invoices into static HTML documents.
#[derive(Debug)]
pub struct InvoiceExporter {
    tera: Tera,
}

impl InvoiceExporter {
    /// Create an exporter with the embedded template.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ExportError::Template`] if the embedded template
    /// fails to parse.
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_template(TEMPLATE_NAME, TEMPLATE)?;
        Ok(Self { tera })
    }

    /// Render an invoice to a downloadable HTML document.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ExportError::Template`] if rendering fails.
    pub fn render(&self, invoice: &Invoice) -> Result<ExportedInvoice> {
        let context = ExportContext::from_invoice(invoice);
        let html = self
            .tera
            .render(TEMPLATE_NAME, &tera::Context::from_serialize(&context)?)?;
        Ok(ExportedInvoice {
            file_name: format!("Invoice-{}.html", invoice.invoice_number),
            html,
        })
    }

    /// Render an invoice and write it into a directory.
    ///
    /// Returns the path of the written file.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ExportError::Template`] if rendering fails or
    /// [`crate::ExportError::Io`] if the file cannot be written.
    pub fn write_to_dir(&self, invoice: &Invoice, dir: &Path) -> Result<PathBuf> {
        let exported = self.render(invoice)?;
        let path = dir.join(&exported.file_name);
        fs::write(&path, &exported.html)?;
        debug!(path = %path.display(), "invoice exported");
        Ok(path)
    }
}

/// Display strings derived from an invoice for the template.
#[derive(Debug, Serialize)]
struct ExportContext {
    invoice_number: String,
    date: String,
    due_date: String,
    package_name: String,
    timeline_label: String,
    timeline_description: String,
    currency: String,
    line_items: Vec<LineRow>,
    sub_total: String,
    has_discount: bool,
    discount: String,
    tax_amount: String,
    total: String,
    billing: Option<BillingRow>,
    legal_terms: String,
}

#[derive(Debug, Serialize)]
struct LineRow {
    description: String,
    details: String,
    quantity: u32,
    rate: String,
    amount: String,
}

#[derive(Debug, Serialize)]
struct BillingRow {
    name: String,
    email: String,
    phone: String,
    address: String,
}

impl ExportContext {
    fn from_invoice(invoice: &Invoice) -> Self {
        let currency = invoice.currency.clone();
        Self {
            invoice_number: invoice.invoice_number.clone(),
            date: invoice.date.format("%B %d, %Y").to_string(),
            due_date: invoice.due_date.format("%B %d, %Y").to_string(),
            package_name: invoice.package_name.clone(),
            timeline_label: invoice.timeline.label().to_string(),
            timeline_description: invoice.timeline.description().to_string(),
            line_items: invoice
                .line_items
                .iter()
                .map(|item| LineRow {
                    description: item.description.clone(),
                    details: item.details.clone().unwrap_or_default(),
                    quantity: item.quantity,
                    rate: format_money(item.rate, &currency),
                    amount: format_money(item.amount, &currency),
                })
                .collect(),
            sub_total: format_money(invoice.sub_total, &currency),
            has_discount: invoice.discount != 0,
            discount: format_money(invoice.discount, &currency),
            tax_amount: format_money(invoice.tax_amount, &currency),
            total: format_money(invoice.total, &currency),
            billing: invoice.billing.as_ref().map(|billing| BillingRow {
                name: billing.name.clone(),
                email: billing.email.clone(),
                phone: billing.phone.clone(),
                address: billing.address.clone(),
            }),
            legal_terms: LEGAL_TERMS.to_string(),
            currency,
        }
    }
}

/// Format a whole-unit amount with its currency symbol and thousands
/// separators, e.g. `$1,327` or `-₹4,150`.
#[must_use]
pub fn format_money(amount: i64, currency: &str) -> String {
    let symbol = currency_symbol(currency);
    let sign = if amount < 0 { "-" } else { "" };
    format!("{sign}{symbol}{}", group_thousands(amount.unsigned_abs()))
}

fn currency_symbol(code: &str) -> &str {
    match code {
        "USD" => "$",
        "EUR" => "\u{20ac}",
        "GBP" => "\u{a3}",
        "INR" => "\u{20b9}",
        "JPY" => "\u{a5}",
        _ => code,
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn money_formatting() {
        assert_eq!(format_money(1327, "USD"), "$1,327");
        assert_eq!(format_money(499, "USD"), "$499");
        assert_eq!(format_money(-25, "USD"), "-$25");
        assert_eq!(format_money(41_517, "INR"), "\u{20b9}41,517");
        assert_eq!(format_money(1_234_567, "USD"), "$1,234,567");
        assert_eq!(format_money(0, "USD"), "$0");
    }

    #[test]
    fn unknown_currency_uses_its_code() {
        assert_eq!(format_money(100, "CHF"), "CHF100");
    }

    #[test]
    fn embedded_template_parses() {
        InvoiceExporter::new().unwrap();
    }
}
