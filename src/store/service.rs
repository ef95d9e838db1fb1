use tracing::{debug, info, warn};
use uuid::Uuid;

use super::{InvoiceStore, StoredInvoice, UserId};
use crate::core::{
    BijakError, Invoice, checked_next_invoice_number, join_errors, try_recalculate,
    validate_invoice, validate_numeric_number,
};

/// Suggests invoice numbers and saves invoices through an [`InvoiceStore`].
///
/// Totals are always recomputed right before a write, so a stale snapshot
/// from an edited form is never persisted. Reads return the stored
/// snapshot as saved.
pub struct InvoiceService<S> {
    store: S,
    strict_numbering: bool,
}

impl<S: InvoiceStore> InvoiceService<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            strict_numbering: false,
        }
    }

    /// Build a service from loaded settings.
    #[cfg(feature = "config")]
    pub fn with_settings(store: S, settings: &crate::config::Settings) -> Self {
        Self::new(store).strict_numbering(settings.strict_numbering)
    }

    /// Refuse to save invoice numbers that are not purely numeric.
    ///
    /// Off by default: a manually typed number like "INV-7" is saved but
    /// ignored by [`suggest_number`](Self::suggest_number).
    pub fn strict_numbering(mut self, strict: bool) -> Self {
        self.strict_numbering = strict;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Suggest the next invoice number for a new draft.
    ///
    /// Advisory only: nothing is reserved, and a concurrent save can take
    /// the same number first. Fails with [`BijakError::Numbering`] when the
    /// next number would exceed the 16 characters a tax invoice allows.
    pub fn suggest_number(&self, user: &UserId) -> Result<String, BijakError> {
        let existing = self.store.invoice_numbers(user)?;
        let number = checked_next_invoice_number(&existing)?;
        debug!(user = %user, existing = existing.len(), suggested = %number, "suggested invoice number");
        Ok(number)
    }

    /// Recompute, validate and insert an invoice under its own number.
    ///
    /// A number already used by this user is returned as
    /// [`BijakError::DuplicateNumber`]; the caller decides whether to fetch a
    /// fresh suggestion or let the user edit the number.
    pub fn save(&self, user: &UserId, mut invoice: Invoice) -> Result<StoredInvoice, BijakError> {
        self.prepare(&mut invoice)?;
        let number = invoice.number.clone();
        let stored = self
            .store
            .insert(user, invoice)
            .inspect_err(|e| log_conflict(user, &number, e))?;
        info!(user = %user, invoice_number = %number, id = %stored.id, "saved invoice");
        Ok(stored)
    }

    /// Recompute, validate and replace an existing invoice.
    pub fn update(
        &self,
        user: &UserId,
        id: Uuid,
        mut invoice: Invoice,
    ) -> Result<StoredInvoice, BijakError> {
        self.prepare(&mut invoice)?;
        let number = invoice.number.clone();
        let stored = self
            .store
            .update(user, id, invoice)
            .inspect_err(|e| log_conflict(user, &number, e))?;
        info!(user = %user, invoice_number = %number, id = %id, "updated invoice");
        Ok(stored)
    }

    /// Recompute, validate and insert, letting the store assign the next
    /// number in the same operation.
    pub fn save_with_next_number(
        &self,
        user: &UserId,
        mut invoice: Invoice,
    ) -> Result<StoredInvoice, BijakError> {
        // Validate against the number the store is about to assign.
        invoice.number = self.suggest_number(user)?;
        self.prepare(&mut invoice)?;
        let suggested = invoice.number.clone();
        let stored = self
            .store
            .insert_with_next_number(user, invoice)
            .inspect_err(|e| log_conflict(user, &suggested, e))?;
        info!(
            user = %user,
            invoice_number = %stored.invoice.number,
            id = %stored.id,
            "saved invoice with assigned number"
        );
        Ok(stored)
    }

    /// Stored invoice with its saved totals.
    pub fn get(&self, user: &UserId, id: Uuid) -> Result<Option<StoredInvoice>, BijakError> {
        self.store.get(user, id)
    }

    pub fn list(&self, user: &UserId) -> Result<Vec<StoredInvoice>, BijakError> {
        self.store.list(user)
    }

    fn prepare(&self, invoice: &mut Invoice) -> Result<(), BijakError> {
        try_recalculate(invoice)?;

        let mut errors = validate_invoice(invoice);
        if self.strict_numbering {
            errors.extend(validate_numeric_number(&invoice.number));
        }
        if !errors.is_empty() {
            warn!(invoice_number = %invoice.number, errors = errors.len(), "invoice failed validation");
            return Err(BijakError::Validation(join_errors(&errors)));
        }
        Ok(())
    }
}

fn log_conflict(user: &UserId, number: &str, err: &BijakError) {
    if err.is_conflict() {
        warn!(user = %user, invoice_number = %number, "invoice number already in use");
    }
}
