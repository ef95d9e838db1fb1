//! Invoice persistence seam and the numbering/saving service built on it.
//!
//! The store is an external collaborator: it lists a user's invoice
//! numbers and enforces uniqueness of `(user, invoice_number)` on write.
//! [`MemoryStore`] is a mutex-guarded reference implementation.
//!
//! # Example
//!
//! ```
//! use bijak::store::*;
//!
//! let service = InvoiceService::new(MemoryStore::new());
//! let user = UserId::from("user-1");
//! assert_eq!(service.suggest_number(&user).unwrap(), "1");
//! ```

mod memory;
mod service;

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::{BijakError, Invoice, checked_next_invoice_number};

pub use memory::MemoryStore;
pub use service::InvoiceService;

/// Identity of the requesting user, resolved from the session by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for UserId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An invoice as persisted, with its totals snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredInvoice {
    pub id: Uuid,
    pub user_id: UserId,
    pub invoice: Invoice,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Persistence operations the invoicing core relies on.
///
/// Implementations must reject a write that would give one user two
/// invoices with the same number, returning [`BijakError::DuplicateNumber`].
pub trait InvoiceStore: Send + Sync {
    /// All invoice numbers saved by `user`, in no particular order.
    fn invoice_numbers(&self, user: &UserId) -> Result<Vec<String>, BijakError>;

    /// Insert a new invoice under `invoice.number`.
    fn insert(&self, user: &UserId, invoice: Invoice) -> Result<StoredInvoice, BijakError>;

    /// Replace an existing invoice. Renumbering onto a number the user
    /// already has is a conflict.
    fn update(&self, user: &UserId, id: Uuid, invoice: Invoice)
    -> Result<StoredInvoice, BijakError>;

    fn get(&self, user: &UserId, id: Uuid) -> Result<Option<StoredInvoice>, BijakError>;

    /// All of `user`'s invoices, oldest first.
    fn list(&self, user: &UserId) -> Result<Vec<StoredInvoice>, BijakError>;

    /// Assign the next number and insert in one operation.
    ///
    /// The default reads the numbers, then inserts: it is only as safe as
    /// the uniqueness check in [`insert`](Self::insert), and a concurrent
    /// writer surfaces as a `DuplicateNumber` error. Stores that can run
    /// both steps in one transaction should override it.
    fn insert_with_next_number(
        &self,
        user: &UserId,
        mut invoice: Invoice,
    ) -> Result<StoredInvoice, BijakError> {
        invoice.number = checked_next_invoice_number(self.invoice_numbers(user)?)?;
        self.insert(user, invoice)
    }
}
