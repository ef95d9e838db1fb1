//! Core invoice types, tax totals, numbering and validation.
//!
//! This module provides the GST invoice document model, the totals
//! calculator, sequential invoice numbering, GSTIN checks and the
//! CGST Rule 46 content validation.

mod builder;
mod calculation;
mod error;
pub mod gstin;
mod numbering;
pub mod states;
mod supply;
mod types;
mod validation;

pub use builder::*;
pub use calculation::*;
pub use error::*;
pub use gstin::{GstinError, Gstin, validate_gstin};
pub use numbering::*;
pub use states::{is_known_state_code, state_name};
pub use supply::*;
pub use types::*;
pub use validation::*;
