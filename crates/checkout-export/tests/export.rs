//! End-to-end export tests: price an invoice with the engine, render it,
//! and check the document against the struct it came from.

use std::collections::BTreeSet;

use checkout_core::{
    BillingDetails, PlanSource, PricingEngine, QuoteRequest, Timeline,
};
use checkout_export::{format_money, InvoiceExporter, LEGAL_TERMS};

fn priced_invoice() -> checkout_core::Invoice {
    let engine = PricingEngine::default();
    let request = QuoteRequest {
        plan_id: "advanced-ai-integration".to_string(),
        source: PlanSource::Chatbot,
        timeline: Timeline::Urgent,
        add_on_ids: BTreeSet::from([
            "monthly-maintenance".to_string(),
            "whatsapp-integration".to_string(),
        ]),
        voice_bot_enabled: true,
        ..QuoteRequest::default()
    };
    engine
        .generate_invoice(&request)
        .unwrap()
        .with_billing(BillingDetails {
            name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            phone: "+1 555 0100".to_string(),
            address: "1 Analytical Way".to_string(),
        })
}

#[test]
fn exported_document_matches_the_invoice() {
    let invoice = priced_invoice();
    let exporter = InvoiceExporter::new().unwrap();
    let exported = exporter.render(&invoice).unwrap();

    assert_eq!(
        exported.file_name,
        format!("Invoice-{}.html", invoice.invoice_number)
    );
    assert!(exported.html.contains(&invoice.invoice_number));
    assert!(exported.html.contains("Advanced AI Integration"));
    assert!(exported.html.contains("Monthly Maintenance"));
    assert!(exported.html.contains("WhatsApp Integration"));
    assert!(exported.html.contains("Urgent Delivery"));
    assert!(exported.html.contains(LEGAL_TERMS));
    assert!(exported.html.contains("Ada Lovelace"));

    // Totals come straight from the struct: 1127 subtotal, 1327 total.
    assert!(exported.html.contains(&format_money(invoice.sub_total, "USD")));
    assert!(exported.html.contains(&format_money(invoice.total, "USD")));
    assert!(exported.html.contains("$1,327"));
}

#[test]
fn discount_row_only_appears_when_discounted() {
    let engine = PricingEngine::default();
    let exporter = InvoiceExporter::new().unwrap();

    let undiscounted = priced_invoice();
    let html = exporter.render(&undiscounted).unwrap().html;
    assert!(!html.contains("Discount"));

    let discounted = engine
        .generate_invoice(&QuoteRequest::for_plan(
            "full-stack-basic",
            PlanSource::Traditional,
        ))
        .unwrap();
    let html = exporter.render(&discounted).unwrap().html;
    assert!(html.contains("Discount"));
    assert!(html.contains("-$50"));
}

#[test]
fn invoice_without_billing_omits_the_billed_to_block() {
    let engine = PricingEngine::default();
    let invoice = engine
        .generate_invoice(&QuoteRequest::for_plan(
            "basic-ai-integration",
            PlanSource::Chatbot,
        ))
        .unwrap();
    let html = InvoiceExporter::new().unwrap().render(&invoice).unwrap().html;
    assert!(!html.contains("Billed To"));
}

#[test]
fn write_to_dir_uses_the_derived_file_name() {
    let invoice = priced_invoice();
    let dir = tempfile::tempdir().unwrap();
    let path = InvoiceExporter::new()
        .unwrap()
        .write_to_dir(&invoice, dir.path())
        .unwrap();

    assert_eq!(
        path.file_name().unwrap().to_str().unwrap(),
        format!("Invoice-{}.html", invoice.invoice_number)
    );
    let written = std::fs::read_to_string(&path).unwrap();
    assert!(written.contains(&invoice.invoice_number));
}
