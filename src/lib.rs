//! # bijak
//!
//! GST invoicing library for small Indian businesses: invoice totals with
//! single or split (IGST/SGST/CGST) tax rates, per-user sequential invoice
//! numbering, GSTIN validation, CGST Rule 46 content checks and CSV export.
//!
//! All monetary values use [`rust_decimal::Decimal`], never floating point.
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::NaiveDate;
//! use bijak::core::*;
//! use rust_decimal_macros::dec;
//!
//! let invoice = InvoiceBuilder::new("1", NaiveDate::from_ymd_opt(2024, 6, 15).unwrap())
//!     .seller(PartyBuilder::new("Sharma Traders", AddressBuilder::new("Pune", "27", "411001").build())
//!         .gstin("27AAPFU0939F1ZV").build())
//!     .buyer(PartyBuilder::new("Rao Stores", AddressBuilder::new("Bengaluru", "29", "560001").build()).build())
//!     .add_item(LineItemBuilder::new("Consulting", dec!(2), dec!(100)).hsn_sac("998311").build())
//!     .add_item(LineItemBuilder::new("Travel", dec!(1), dec!(50)).build())
//!     .tax(TaxConfiguration::single(dec!(18)))
//!     .build()
//!     .unwrap();
//!
//! let totals = invoice.totals.unwrap();
//! assert_eq!(totals.subtotal, dec!(250));
//! assert_eq!(totals.tax_amount(TaxKind::Gst), dec!(45));
//! assert_eq!(totals.total, dec!(295));
//! assert_eq!(next_invoice_number(["3", "7", "abc", "10"]), "11");
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` (default) | Invoice types, totals, numbering, GSTIN and Rule 46 validation |
//! | `store` | Invoice store trait, in-memory store, numbering/saving service |
//! | `csv` | CSV export of invoices and line items |
//! | `config` | Settings loaded from `BIJAK_*` environment variables |
//! | `all` | Everything |

#[cfg(feature = "core")]
pub mod core;

#[cfg(feature = "store")]
pub mod store;

#[cfg(feature = "csv")]
pub mod export;

#[cfg(feature = "config")]
pub mod config;

// Re-export core types at crate root for convenience
#[cfg(feature = "core")]
pub use crate::core::*;
