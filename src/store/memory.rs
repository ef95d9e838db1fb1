use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use chrono::Utc;
use uuid::Uuid;

use super::{InvoiceStore, StoredInvoice, UserId};
use crate::core::{BijakError, Invoice, checked_next_invoice_number};

/// In-memory invoice store.
///
/// Every operation takes the single lock, so
/// [`insert_with_next_number`](InvoiceStore::insert_with_next_number) reads
/// the numbers and inserts without a gap another writer could use.
#[derive(Debug, Default)]
pub struct MemoryStore {
    invoices: Mutex<HashMap<UserId, Vec<StoredInvoice>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<UserId, Vec<StoredInvoice>>>, BijakError> {
        self.invoices
            .lock()
            .map_err(|_| BijakError::Store("invoice store lock poisoned".into()))
    }
}

fn duplicate(user: &UserId, number: &str) -> BijakError {
    BijakError::DuplicateNumber {
        user: user.to_string(),
        number: number.to_string(),
    }
}

fn insert_locked(
    records: &mut Vec<StoredInvoice>,
    user: &UserId,
    invoice: Invoice,
) -> Result<StoredInvoice, BijakError> {
    if records.iter().any(|r| r.invoice.number == invoice.number) {
        return Err(duplicate(user, &invoice.number));
    }

    let now = Utc::now();
    let record = StoredInvoice {
        id: Uuid::new_v4(),
        user_id: user.clone(),
        invoice,
        created_at: now,
        updated_at: now,
    };
    records.push(record.clone());
    Ok(record)
}

impl InvoiceStore for MemoryStore {
    fn invoice_numbers(&self, user: &UserId) -> Result<Vec<String>, BijakError> {
        let invoices = self.lock()?;
        Ok(invoices
            .get(user)
            .map(|records| records.iter().map(|r| r.invoice.number.clone()).collect())
            .unwrap_or_default())
    }

    fn insert(&self, user: &UserId, invoice: Invoice) -> Result<StoredInvoice, BijakError> {
        let mut invoices = self.lock()?;
        insert_locked(invoices.entry(user.clone()).or_default(), user, invoice)
    }

    fn update(
        &self,
        user: &UserId,
        id: Uuid,
        invoice: Invoice,
    ) -> Result<StoredInvoice, BijakError> {
        let mut invoices = self.lock()?;
        let not_found = || BijakError::NotFound(format!("invoice {id}"));
        let records = invoices.get_mut(user).ok_or_else(not_found)?;
        let index = records
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(not_found)?;

        if records
            .iter()
            .any(|r| r.id != id && r.invoice.number == invoice.number)
        {
            return Err(duplicate(user, &invoice.number));
        }

        let record = &mut records[index];
        record.invoice = invoice;
        record.updated_at = Utc::now();
        Ok(record.clone())
    }

    fn get(&self, user: &UserId, id: Uuid) -> Result<Option<StoredInvoice>, BijakError> {
        let invoices = self.lock()?;
        Ok(invoices
            .get(user)
            .and_then(|records| records.iter().find(|r| r.id == id))
            .cloned())
    }

    fn list(&self, user: &UserId) -> Result<Vec<StoredInvoice>, BijakError> {
        let invoices = self.lock()?;
        Ok(invoices.get(user).cloned().unwrap_or_default())
    }

    fn insert_with_next_number(
        &self,
        user: &UserId,
        mut invoice: Invoice,
    ) -> Result<StoredInvoice, BijakError> {
        let mut invoices = self.lock()?;
        let records = invoices.entry(user.clone()).or_default();
        invoice.number =
            checked_next_invoice_number(records.iter().map(|r| r.invoice.number.as_str()))?;
        insert_locked(records, user, invoice)
    }
}
