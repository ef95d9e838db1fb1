//! Tabular export of invoices.
//!
//! PDF and image rendering live outside this crate; CSV is produced here
//! from the stored totals snapshot.
//!
//! # Example
//!
//! ```ignore
//! use bijak::export::*;
//!
//! let summary = invoices_csv(&invoices)?;
//! let lines = line_items_csv(&invoice);
//! std::fs::write("invoices.csv", summary)?;
//! ```

mod csv;

pub use csv::{invoices_csv, line_items_csv};
