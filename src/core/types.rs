use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::calculation::line_amount;
use super::error::BijakError;

/// A GST tax invoice.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invoice {
    /// Invoice number, unique per user.
    pub number: String,
    /// Date of issue.
    pub invoice_date: NaiveDate,
    /// Payment due date.
    pub due_date: Option<NaiveDate>,
    /// Supplier (the user's company profile).
    pub seller: Party,
    /// Recipient (a client profile).
    pub buyer: Party,
    /// GST state code of the place of supply. Falls back to the buyer's state when unset.
    pub place_of_supply: Option<String>,
    /// ISO 4217 currency code, "INR" by default.
    pub currency_code: String,
    /// Line items in display order.
    pub items: Vec<LineItem>,
    /// Tax rates applied to the subtotal.
    pub tax: TaxConfiguration,
    /// Free-text notes printed on the invoice.
    pub notes: Vec<String>,
    /// Payment terms.
    pub terms: Option<String>,
    /// Computed totals snapshot (set by `recalculate()`).
    pub totals: Option<InvoiceTotals>,
}

/// Company or client profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Party {
    pub name: String,
    /// 15-character GST identification number.
    pub gstin: Option<String>,
    /// Permanent Account Number.
    pub pan: Option<String>,
    pub address: Address,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// Postal address.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Address {
    pub line1: Option<String>,
    pub line2: Option<String>,
    pub city: String,
    /// Two-digit GST state code (e.g. "27" for Maharashtra).
    pub state_code: String,
    /// Six-digit PIN code.
    pub pin_code: String,
}

/// Invoice line item.
///
/// `amount` is always `quantity * rate`; quantity and rate are only
/// changed through setters that recompute it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "LineItemFields")]
pub struct LineItem {
    pub description: String,
    /// HSN (goods) or SAC (services) classification code.
    pub hsn_sac_code: Option<String>,
    /// Unit of measure shown on the invoice (e.g. "NOS", "HRS").
    pub unit: Option<String>,
    quantity: Decimal,
    rate: Decimal,
    amount: Decimal,
}

impl LineItem {
    /// Create a line item.
    ///
    /// # Panics
    ///
    /// Panics when `quantity * rate` is outside the `Decimal` range. Use
    /// [`try_new`](Self::try_new) for values that have not been checked.
    pub fn new(description: impl Into<String>, quantity: Decimal, rate: Decimal) -> Self {
        match Self::try_new(description, quantity, rate) {
            Ok(item) => item,
            Err(e) => panic!("{e}"),
        }
    }

    /// Create a line item, failing with [`BijakError::Overflow`] when
    /// `quantity * rate` is outside the `Decimal` range.
    pub fn try_new(
        description: impl Into<String>,
        quantity: Decimal,
        rate: Decimal,
    ) -> Result<Self, BijakError> {
        Ok(Self {
            description: description.into(),
            hsn_sac_code: None,
            unit: None,
            quantity,
            rate,
            amount: checked_amount(quantity, rate)?,
        })
    }

    pub fn quantity(&self) -> Decimal {
        self.quantity
    }

    /// Unit price in currency units.
    pub fn rate(&self) -> Decimal {
        self.rate
    }

    /// `quantity * rate`.
    pub fn amount(&self) -> Decimal {
        self.amount
    }

    /// # Panics
    ///
    /// Panics when the new amount is outside the `Decimal` range.
    pub fn set_quantity(&mut self, quantity: Decimal) {
        self.amount = expect_amount(quantity, self.rate);
        self.quantity = quantity;
    }

    /// # Panics
    ///
    /// Panics when the new amount is outside the `Decimal` range.
    pub fn set_rate(&mut self, rate: Decimal) {
        self.amount = expect_amount(self.quantity, rate);
        self.rate = rate;
    }
}

fn checked_amount(quantity: Decimal, rate: Decimal) -> Result<Decimal, BijakError> {
    line_amount(quantity, rate)
        .ok_or_else(|| BijakError::Overflow(format!("line amount {quantity} x {rate}")))
}

fn expect_amount(quantity: Decimal, rate: Decimal) -> Decimal {
    match checked_amount(quantity, rate) {
        Ok(amount) => amount,
        Err(e) => panic!("{e}"),
    }
}

/// Wire shape of a line item. A stored `amount` is ignored and recomputed.
#[derive(Deserialize)]
struct LineItemFields {
    description: String,
    #[serde(default)]
    hsn_sac_code: Option<String>,
    #[serde(default)]
    unit: Option<String>,
    quantity: Decimal,
    rate: Decimal,
}

impl TryFrom<LineItemFields> for LineItem {
    type Error = BijakError;

    fn try_from(fields: LineItemFields) -> Result<Self, Self::Error> {
        let mut item = LineItem::try_new(fields.description, fields.quantity, fields.rate)?;
        item.hsn_sac_code = fields.hsn_sac_code;
        item.unit = fields.unit;
        Ok(item)
    }
}

/// The GST components an invoice can charge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaxKind {
    /// Single combined GST rate.
    Gst,
    /// Integrated GST (inter-state supply).
    Igst,
    /// State GST (intra-state supply).
    Sgst,
    /// Central GST (intra-state supply).
    Cgst,
}

impl TaxKind {
    /// Label printed on invoices and CSV headers.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Gst => "GST",
            Self::Igst => "IGST",
            Self::Sgst => "SGST",
            Self::Cgst => "CGST",
        }
    }
}

/// Whether the supply crosses a state boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SupplyType {
    /// Seller and place of supply in the same state: SGST + CGST.
    IntraState,
    /// Different states: IGST.
    InterState,
}

/// Tax rates (percent, 0-100) applied to the invoice subtotal.
///
/// In split mode the three rates are independent; nothing forces IGST and
/// SGST/CGST to be mutually exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum TaxConfiguration {
    Single {
        gst_rate: Decimal,
    },
    Split {
        igst_rate: Decimal,
        sgst_rate: Decimal,
        cgst_rate: Decimal,
    },
}

impl Default for TaxConfiguration {
    fn default() -> Self {
        Self::Single {
            gst_rate: Decimal::ZERO,
        }
    }
}

impl TaxConfiguration {
    pub fn single(gst_rate: Decimal) -> Self {
        Self::Single { gst_rate }
    }

    pub fn split(igst_rate: Decimal, sgst_rate: Decimal, cgst_rate: Decimal) -> Self {
        Self::Split {
            igst_rate,
            sgst_rate,
            cgst_rate,
        }
    }

    /// The split a GST rate takes for the given supply type: IGST carries the
    /// whole rate inter-state, SGST and CGST share it equally intra-state.
    pub fn for_supply(supply: SupplyType, gst_rate: Decimal) -> Self {
        match supply {
            SupplyType::InterState => Self::split(gst_rate, Decimal::ZERO, Decimal::ZERO),
            SupplyType::IntraState => {
                let half = gst_rate / Decimal::TWO;
                Self::split(Decimal::ZERO, half, half)
            }
        }
    }

    /// `(kind, rate)` pairs in breakdown order.
    pub fn rates(&self) -> Vec<(TaxKind, Decimal)> {
        match *self {
            Self::Single { gst_rate } => vec![(TaxKind::Gst, gst_rate)],
            Self::Split {
                igst_rate,
                sgst_rate,
                cgst_rate,
            } => vec![
                (TaxKind::Igst, igst_rate),
                (TaxKind::Sgst, sgst_rate),
                (TaxKind::Cgst, cgst_rate),
            ],
        }
    }

    /// Sum of all configured rates.
    pub fn combined_rate(&self) -> Decimal {
        self.rates().iter().map(|(_, rate)| *rate).sum()
    }
}

/// Computed invoice totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceTotals {
    /// Sum of line amounts.
    pub subtotal: Decimal,
    /// One entry per configured tax.
    pub breakdown: Vec<TaxBreakdown>,
    /// Sum of breakdown tax amounts.
    pub total_tax: Decimal,
    /// subtotal + total_tax.
    pub total: Decimal,
}

impl InvoiceTotals {
    /// Amount charged for `kind`, zero when the configuration does not carry it.
    pub fn tax_amount(&self, kind: TaxKind) -> Decimal {
        self.breakdown
            .iter()
            .find(|b| b.kind == kind)
            .map_or(Decimal::ZERO, |b| b.tax_amount)
    }
}

/// Tax charged for a single GST component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxBreakdown {
    pub kind: TaxKind,
    /// Rate in percent.
    pub rate: Decimal,
    /// Base the rate was applied to.
    pub taxable_amount: Decimal,
    /// Rounded to 2 decimal places.
    pub tax_amount: Decimal,
}
