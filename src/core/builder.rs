use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::calculation;
use super::error::{BijakError, join_errors};
use super::types::*;
use super::validation;

/// Builder for constructing valid invoices.
///
/// ```
/// use bijak::core::*;
/// use rust_decimal_macros::dec;
/// use chrono::NaiveDate;
///
/// let invoice = InvoiceBuilder::new("1", NaiveDate::from_ymd_opt(2024, 4, 1).unwrap())
///     .seller(PartyBuilder::new("Sharma Traders", AddressBuilder::new("Pune", "27", "411001").build())
///         .gstin("27AAPFU0939F1ZV")
///         .build())
///     .buyer(PartyBuilder::new("Rao Stores", AddressBuilder::new("Mumbai", "27", "400001").build())
///         .build())
///     .add_item(LineItemBuilder::new("Basmati rice", dec!(2), dec!(100)).hsn_sac("1006").build())
///     .tax(TaxConfiguration::single(dec!(18)))
///     .build()
///     .unwrap();
///
/// assert_eq!(invoice.totals.unwrap().total, dec!(236));
/// ```
pub struct InvoiceBuilder {
    number: String,
    invoice_date: NaiveDate,
    due_date: Option<NaiveDate>,
    seller: Option<Party>,
    buyer: Option<Party>,
    place_of_supply: Option<String>,
    currency_code: String,
    items: Vec<LineItem>,
    tax: TaxConfiguration,
    notes: Vec<String>,
    terms: Option<String>,
    split_by_supply: bool,
}

impl InvoiceBuilder {
    pub fn new(number: impl Into<String>, invoice_date: NaiveDate) -> Self {
        Self {
            number: number.into(),
            invoice_date,
            due_date: None,
            seller: None,
            buyer: None,
            place_of_supply: None,
            currency_code: "INR".to_string(),
            items: Vec::new(),
            tax: TaxConfiguration::default(),
            notes: Vec::new(),
            terms: None,
            split_by_supply: false,
        }
    }

    pub fn due_date(mut self, date: NaiveDate) -> Self {
        self.due_date = Some(date);
        self
    }

    pub fn seller(mut self, party: Party) -> Self {
        self.seller = Some(party);
        self
    }

    pub fn buyer(mut self, party: Party) -> Self {
        self.buyer = Some(party);
        self
    }

    pub fn place_of_supply(mut self, state_code: impl Into<String>) -> Self {
        self.place_of_supply = Some(state_code.into());
        self
    }

    pub fn currency(mut self, code: impl Into<String>) -> Self {
        self.currency_code = code.into();
        self
    }

    pub fn add_item(mut self, item: LineItem) -> Self {
        self.items.push(item);
        self
    }

    pub fn tax(mut self, tax: TaxConfiguration) -> Self {
        self.tax = tax;
        self.split_by_supply = false;
        self
    }

    /// Single GST rate split by place of supply (IGST inter-state,
    /// SGST + CGST intra-state). Resolved at build time once both parties
    /// are known.
    pub fn gst_for_supply(mut self, gst_rate: Decimal) -> Self {
        self.tax = TaxConfiguration::single(gst_rate);
        self.split_by_supply = true;
        self
    }

    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn terms(mut self, terms: impl Into<String>) -> Self {
        self.terms = Some(terms.into());
        self
    }

    /// Build the invoice, calculating totals and running validation.
    /// Returns all validation errors (not just the first).
    pub fn build(self) -> Result<Invoice, BijakError> {
        if self.items.len() > 10_000 {
            return Err(BijakError::Builder(
                "invoice cannot have more than 10,000 line items".into(),
            ));
        }

        let invoice = self.build_unchecked()?;

        let errors = validation::validate_invoice(&invoice);
        if !errors.is_empty() {
            return Err(BijakError::Validation(join_errors(&errors)));
        }

        Ok(invoice)
    }

    /// Build without validation, useful for drafts or importing external data.
    /// Fails only on missing parties or totals outside the decimal range.
    pub fn build_unchecked(self) -> Result<Invoice, BijakError> {
        let seller = self
            .seller
            .ok_or_else(|| BijakError::Builder("seller is required".into()))?;
        let buyer = self
            .buyer
            .ok_or_else(|| BijakError::Builder("buyer is required".into()))?;

        let mut invoice = Invoice {
            number: self.number,
            invoice_date: self.invoice_date,
            due_date: self.due_date,
            seller,
            buyer,
            place_of_supply: self.place_of_supply,
            currency_code: self.currency_code,
            items: self.items,
            tax: self.tax,
            notes: self.notes,
            terms: self.terms,
            totals: None,
        };

        if self.split_by_supply {
            invoice.tax = super::supply::tax_for_invoice(&invoice, self.tax.combined_rate());
        }

        calculation::try_recalculate(&mut invoice)?;
        Ok(invoice)
    }
}

/// Builder for Party (company or client profile).
pub struct PartyBuilder {
    name: String,
    gstin: Option<String>,
    pan: Option<String>,
    address: Address,
    email: Option<String>,
    phone: Option<String>,
}

impl PartyBuilder {
    pub fn new(name: impl Into<String>, address: Address) -> Self {
        Self {
            name: name.into(),
            gstin: None,
            pan: None,
            address,
            email: None,
            phone: None,
        }
    }

    pub fn gstin(mut self, gstin: impl Into<String>) -> Self {
        self.gstin = Some(gstin.into());
        self
    }

    pub fn pan(mut self, pan: impl Into<String>) -> Self {
        self.pan = Some(pan.into());
        self
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    pub fn build(self) -> Party {
        Party {
            name: self.name,
            gstin: self.gstin,
            pan: self.pan,
            address: self.address,
            email: self.email,
            phone: self.phone,
        }
    }
}

/// Builder for Address.
pub struct AddressBuilder {
    line1: Option<String>,
    line2: Option<String>,
    city: String,
    state_code: String,
    pin_code: String,
}

impl AddressBuilder {
    pub fn new(
        city: impl Into<String>,
        state_code: impl Into<String>,
        pin_code: impl Into<String>,
    ) -> Self {
        Self {
            line1: None,
            line2: None,
            city: city.into(),
            state_code: state_code.into(),
            pin_code: pin_code.into(),
        }
    }

    pub fn line1(mut self, line: impl Into<String>) -> Self {
        self.line1 = Some(line.into());
        self
    }

    pub fn line2(mut self, line: impl Into<String>) -> Self {
        self.line2 = Some(line.into());
        self
    }

    pub fn build(self) -> Address {
        Address {
            line1: self.line1,
            line2: self.line2,
            city: self.city,
            state_code: self.state_code,
            pin_code: self.pin_code,
        }
    }
}

/// Builder for LineItem.
pub struct LineItemBuilder {
    description: String,
    quantity: Decimal,
    rate: Decimal,
    hsn_sac_code: Option<String>,
    unit: Option<String>,
}

impl LineItemBuilder {
    pub fn new(description: impl Into<String>, quantity: Decimal, rate: Decimal) -> Self {
        Self {
            description: description.into(),
            quantity,
            rate,
            hsn_sac_code: None,
            unit: None,
        }
    }

    pub fn hsn_sac(mut self, code: impl Into<String>) -> Self {
        self.hsn_sac_code = Some(code.into());
        self
    }

    pub fn unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    /// # Panics
    ///
    /// Panics when `quantity * rate` is outside the `Decimal` range; see
    /// [`try_build`](Self::try_build).
    pub fn build(self) -> LineItem {
        match self.try_build() {
            Ok(item) => item,
            Err(e) => panic!("{e}"),
        }
    }

    pub fn try_build(self) -> Result<LineItem, BijakError> {
        let mut item = LineItem::try_new(self.description, self.quantity, self.rate)?;
        item.hsn_sac_code = self.hsn_sac_code;
        item.unit = self.unit;
        Ok(item)
    }
}
