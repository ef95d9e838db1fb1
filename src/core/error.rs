use thiserror::Error;

/// Errors that can occur while building, validating, storing or exporting invoices.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BijakError {
    /// One or more validation rules failed.
    #[error("validation failed: {0}")]
    Validation(String),

    /// Builder encountered invalid or missing configuration.
    #[error("builder error: {0}")]
    Builder(String),

    /// An amount does not fit in the decimal range.
    #[error("amount out of range: {0}")]
    Overflow(String),

    /// Invoice number sequencing error.
    #[error("numbering error: {0}")]
    Numbering(String),

    /// The store already holds an invoice with this number for this user.
    #[error("invoice number '{number}' is already used by {user}")]
    DuplicateNumber { user: String, number: String },

    /// The requested record does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Persistence collaborator failure.
    #[error("store error: {0}")]
    Store(String),

    /// Settings could not be loaded.
    #[error("config error: {0}")]
    Config(String),

    /// CSV export failure.
    #[error("export error: {0}")]
    Export(String),
}

impl BijakError {
    /// True for a uniqueness violation on `(user, invoice_number)`.
    ///
    /// Callers react by requesting a fresh suggestion or asking the user to
    /// edit the number.
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::DuplicateNumber { .. })
    }
}

/// A single validation error with field path and message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dot-separated path to the invalid field (e.g. "seller.gstin").
    pub field: String,
    /// Human-readable error description.
    pub message: String,
    /// CGST Rule 46 clause if applicable (e.g. "46(b)").
    pub rule: Option<String>,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(rule) = &self.rule {
            write!(f, "[{}] {}: {}", rule, self.field, self.message)
        } else {
            write!(f, "{}: {}", self.field, self.message)
        }
    }
}

impl ValidationError {
    /// Create a validation error without a rule reference.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            rule: None,
        }
    }

    /// Create a validation error tied to a CGST Rule 46 clause.
    pub fn with_rule(
        field: impl Into<String>,
        message: impl Into<String>,
        rule: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            rule: Some(rule.into()),
        }
    }
}

/// Join validation errors into the message carried by [`BijakError::Validation`].
pub(crate) fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}
