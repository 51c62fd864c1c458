//! Static HTML invoice export for the studio checkout.
//!
//! Turns a priced [`checkout_core::Invoice`] into a self-contained HTML
//! document the visitor can download. This crate is pure presentation:
//! every number on the page comes from the invoice struct, so the export
//! can never drift from what the checkout screen shows.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod error;
mod exporter;

pub use error::{ExportError, Result};
pub use exporter::{format_money, ExportedInvoice, InvoiceExporter, LEGAL_TERMS};
