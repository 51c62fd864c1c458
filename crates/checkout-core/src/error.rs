//! Error types for the checkout engine.

/// Result type for checkout operations.
pub type Result<T> = std::result::Result<T, CheckoutError>;

/// Errors that can occur while driving a checkout session.
#[derive(Debug, thiserror::Error)]
pub enum CheckoutError {
    /// A required billing field is empty.
    #[error("missing billing field: {field}")]
    MissingBillingField {
        /// Name of the empty field.
        field: &'static str,
    },

    /// The session has no invoice to act on.
    #[error("no invoice available")]
    NoInvoice,

    /// Pricing could not produce an invoice.
    #[error(transparent)]
    Pricing(#[from] PricingError),
}

/// Errors that can occur during invoice generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PricingError {
    /// The exchange rate for a localized plan is not yet available.
    ///
    /// Callers should keep any previous invoice visible and disable
    /// submission until the currency context is ready.
    #[error("pricing not ready: exchange rate unavailable")]
    NotReady,

    /// No plan has been selected yet.
    #[error("no plan selected")]
    NoPlanSelected,
}
