//! Error types for invoice export.

/// Result type for export operations.
pub type Result<T> = std::result::Result<T, ExportError>;

/// Errors that can occur while exporting an invoice.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// The template failed to parse or render.
    #[error("template error: {0}")]
    Template(#[from] tera::Error),

    /// The document could not be written to disk.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
