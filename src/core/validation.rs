use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::calculation::try_calculate_totals;
use super::error::ValidationError;
use super::gstin::{is_valid_pan, validate_gstin};
use super::numbering::{MAX_INVOICE_NUMBER_LEN, is_numeric_invoice_number};
use super::states::is_known_state_code;
use super::types::*;

/// Validate an invoice against the tax invoice contents of CGST Rule 46.
/// Returns all validation errors found (not just the first).
///
/// Negative quantities and rates are rejected here. The calculator itself
/// accepts them, so drafts can still show totals while being edited.
pub fn validate_invoice(invoice: &Invoice) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    // 46(b): consecutive serial number, max 16 characters
    validate_number_format(&invoice.number, &mut errors);

    if invoice.currency_code.len() != 3
        || !invoice.currency_code.bytes().all(|b| b.is_ascii_uppercase())
    {
        errors.push(ValidationError::new(
            "currency_code",
            "currency code must be 3 uppercase letters (ISO 4217)",
        ));
    }

    if let Some(due) = invoice.due_date {
        if due < invoice.invoice_date {
            errors.push(ValidationError::new(
                "due_date",
                "due date must not be before the invoice date",
            ));
        }
    }

    // 46(a): supplier name, address and GSTIN
    validate_party(&invoice.seller, "seller", "46(a)", &mut errors);
    match &invoice.seller.gstin {
        Some(gstin) => validate_gstin_field(gstin, "seller.gstin", "46(a)", &mut errors),
        None => errors.push(ValidationError::with_rule(
            "seller.gstin",
            "supplier GSTIN is required on a tax invoice",
            "46(a)",
        )),
    }

    // 46(d): recipient name and address; GSTIN when registered
    validate_party(&invoice.buyer, "buyer", "46(d)", &mut errors);
    if let Some(gstin) = &invoice.buyer.gstin {
        validate_gstin_field(gstin, "buyer.gstin", "46(d)", &mut errors);
    }

    // 46(o): place of supply
    if let Some(state) = &invoice.place_of_supply {
        if !is_known_state_code(state) {
            errors.push(ValidationError::with_rule(
                "place_of_supply",
                format!("place of supply '{state}' is not a known GST state code"),
                "46(o)",
            ));
        }
    }

    if invoice.items.is_empty() {
        errors.push(ValidationError::new(
            "items",
            "invoice must have at least one line item",
        ));
    }

    for (i, item) in invoice.items.iter().enumerate() {
        validate_item(item, i, &mut errors);
    }

    // 46(m): rate of tax
    for (kind, rate) in invoice.tax.rates() {
        if rate.is_sign_negative() || rate > dec!(100) {
            errors.push(ValidationError::with_rule(
                format!("tax.{}_rate", kind.label().to_lowercase()),
                format!("{} rate {rate} must be between 0 and 100", kind.label()),
                "46(m)",
            ));
        }
    }

    errors.extend(validate_arithmetic(invoice));

    errors
}

/// Check the stored totals snapshot against a fresh computation.
///
/// A saved invoice is read back with its stored totals; this detects a
/// snapshot that no longer matches its line items.
pub fn validate_arithmetic(invoice: &Invoice) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    let Some(totals) = &invoice.totals else {
        errors.push(ValidationError::new(
            "totals",
            "totals must be calculated before validation (call recalculate first)",
        ));
        return errors;
    };

    let expected = match try_calculate_totals(&invoice.items, &invoice.tax) {
        Ok(expected) => expected,
        Err(e) => {
            errors.push(ValidationError::new("totals", e.to_string()));
            return errors;
        }
    };

    if totals.subtotal != expected.subtotal {
        errors.push(ValidationError::with_rule(
            "totals.subtotal",
            format!(
                "subtotal {} does not match sum of line amounts {}",
                totals.subtotal, expected.subtotal
            ),
            "46(k)",
        ));
    }

    for breakdown in &expected.breakdown {
        let stored = totals.tax_amount(breakdown.kind);
        if stored != breakdown.tax_amount {
            errors.push(ValidationError::with_rule(
                format!("totals.{}_amount", breakdown.kind.label().to_lowercase()),
                format!(
                    "{} amount {} does not match {}% of {}",
                    breakdown.kind.label(),
                    stored,
                    breakdown.rate,
                    expected.subtotal
                ),
                "46(n)",
            ));
        }
    }

    let breakdown_sum = totals
        .breakdown
        .iter()
        .try_fold(Decimal::ZERO, |sum, b| sum.checked_add(b.tax_amount));
    if breakdown_sum != Some(totals.total_tax) {
        errors.push(ValidationError::new(
            "totals.total_tax",
            match breakdown_sum {
                Some(sum) => format!(
                    "total tax {} does not match sum of tax amounts {sum}",
                    totals.total_tax
                ),
                None => "sum of tax amounts exceeds the decimal range".to_string(),
            },
        ));
    }

    if totals.subtotal.checked_add(totals.total_tax) != Some(totals.total) {
        errors.push(ValidationError::with_rule(
            "totals.total",
            format!(
                "total {} does not match subtotal {} + tax {}",
                totals.total, totals.subtotal, totals.total_tax
            ),
            "46(j)",
        ));
    }

    errors
}

/// Reject invoice numbers that cannot take part in sequential numbering.
///
/// Non-numeric numbers are legal on an invoice but are skipped when the
/// next number is suggested, so a store can opt into refusing them.
pub fn validate_numeric_number(number: &str) -> Option<ValidationError> {
    if is_numeric_invoice_number(number) {
        None
    } else {
        Some(ValidationError::with_rule(
            "number",
            format!("invoice number '{number}' must contain digits only"),
            "46(b)",
        ))
    }
}

fn validate_number_format(number: &str, errors: &mut Vec<ValidationError>) {
    if number.trim().is_empty() {
        errors.push(ValidationError::with_rule(
            "number",
            "invoice number must not be empty",
            "46(b)",
        ));
        return;
    }

    if number.chars().count() > MAX_INVOICE_NUMBER_LEN {
        errors.push(ValidationError::with_rule(
            "number",
            format!("invoice number must not exceed {MAX_INVOICE_NUMBER_LEN} characters"),
            "46(b)",
        ));
    }

    if !number
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '/')
    {
        errors.push(ValidationError::with_rule(
            "number",
            "invoice number may only contain letters, digits, '-' and '/'",
            "46(b)",
        ));
    }
}

fn validate_party(party: &Party, prefix: &str, rule: &str, errors: &mut Vec<ValidationError>) {
    if party.name.trim().is_empty() {
        errors.push(ValidationError::with_rule(
            format!("{prefix}.name"),
            "name must not be empty",
            rule,
        ));
    }

    if let Some(pan) = &party.pan {
        if !is_valid_pan(pan) {
            errors.push(ValidationError::new(
                format!("{prefix}.pan"),
                format!("'{pan}' is not a valid PAN (5 letters, 4 digits, 1 letter)"),
            ));
        }
    }

    validate_address(&party.address, &format!("{prefix}.address"), rule, errors);
}

fn validate_address(address: &Address, prefix: &str, rule: &str, errors: &mut Vec<ValidationError>) {
    if address.city.trim().is_empty() {
        errors.push(ValidationError::with_rule(
            format!("{prefix}.city"),
            "city must not be empty",
            rule,
        ));
    }

    if !is_known_state_code(&address.state_code) {
        errors.push(ValidationError::with_rule(
            format!("{prefix}.state_code"),
            format!(
                "state code '{}' is not a known GST state code",
                address.state_code
            ),
            rule,
        ));
    }

    let pin = address.pin_code.as_bytes();
    if pin.len() != 6 || !pin.iter().all(u8::is_ascii_digit) || pin[0] == b'0' {
        errors.push(ValidationError::with_rule(
            format!("{prefix}.pin_code"),
            "PIN code must be 6 digits and not start with 0",
            rule,
        ));
    }
}

fn validate_gstin_field(gstin: &str, field: &str, rule: &str, errors: &mut Vec<ValidationError>) {
    if let Err(e) = validate_gstin(gstin) {
        errors.push(ValidationError::with_rule(field, e.to_string(), rule));
    }
}

fn validate_item(item: &LineItem, index: usize, errors: &mut Vec<ValidationError>) {
    let prefix = format!("items[{index}]");

    if item.description.trim().is_empty() {
        errors.push(ValidationError::with_rule(
            format!("{prefix}.description"),
            "description must not be empty",
            "46(h)",
        ));
    }

    if let Some(code) = &item.hsn_sac_code {
        if !(4..=8).contains(&code.len()) || !code.bytes().all(|b| b.is_ascii_digit()) {
            errors.push(ValidationError::with_rule(
                format!("{prefix}.hsn_sac_code"),
                format!("HSN/SAC code '{code}' must be 4 to 8 digits"),
                "46(g)",
            ));
        }
    }

    if item.quantity() <= Decimal::ZERO {
        errors.push(ValidationError::with_rule(
            format!("{prefix}.quantity"),
            "quantity must be greater than zero",
            "46(i)",
        ));
    }

    if item.rate() < Decimal::ZERO {
        errors.push(ValidationError::with_rule(
            format!("{prefix}.rate"),
            "rate must not be negative",
            "46(i)",
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::builder::*;
    use crate::core::calculation::recalculate;
    use chrono::NaiveDate;

    fn test_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    fn test_seller() -> Party {
        PartyBuilder::new("Sharma Traders", AddressBuilder::new("Pune", "27", "411001").build())
            .gstin("27AAPFU0939F1ZV")
            .build()
    }

    fn test_buyer() -> Party {
        PartyBuilder::new("Rao Stores", AddressBuilder::new("Bengaluru", "29", "560001").build())
            .gstin("29AAGCB7383J1Z4")
            .build()
    }

    fn test_item() -> LineItem {
        LineItemBuilder::new("Steel rods", dec!(10), dec!(450))
            .hsn_sac("7214")
            .build()
    }

    fn valid_builder() -> InvoiceBuilder {
        InvoiceBuilder::new("42", test_date())
            .seller(test_seller())
            .buyer(test_buyer())
            .add_item(test_item())
            .tax(TaxConfiguration::split(dec!(18), dec!(0), dec!(0)))
    }

    fn rules(errors: &[ValidationError]) -> Vec<&str> {
        errors.iter().filter_map(|e| e.rule.as_deref()).collect()
    }

    #[test]
    fn valid_invoice() {
        let inv = valid_builder().build().unwrap();
        assert!(validate_invoice(&inv).is_empty());
        let totals = inv.totals.unwrap();
        assert_eq!(totals.subtotal, dec!(4500));
        assert_eq!(totals.total, dec!(5310));
    }

    #[test]
    fn number_too_long() {
        let mut inv = valid_builder().build_unchecked().unwrap();
        inv.number = "INV-2024-0000000001".into();
        let errors = validate_invoice(&inv);
        assert!(rules(&errors).contains(&"46(b)"));
    }

    #[test]
    fn number_with_invalid_characters() {
        let mut inv = valid_builder().build_unchecked().unwrap();
        inv.number = "INV#1".into();
        assert!(
            validate_invoice(&inv)
                .iter()
                .any(|e| e.field == "number" && e.message.contains("'-' and '/'"))
        );
    }

    #[test]
    fn slash_and_dash_allowed() {
        let mut inv = valid_builder().build_unchecked().unwrap();
        inv.number = "INV/24-25/001".into();
        assert!(validate_invoice(&inv).is_empty());
    }

    #[test]
    fn seller_gstin_required() {
        let seller = PartyBuilder::new("Sharma Traders", AddressBuilder::new("Pune", "27", "411001").build()).build();
        let err = valid_builder().seller(seller).build().unwrap_err().to_string();
        assert!(err.contains("seller.gstin"));
    }

    #[test]
    fn buyer_without_gstin_is_fine() {
        let buyer = PartyBuilder::new("Walk-in customer", AddressBuilder::new("Pune", "27", "411002").build()).build();
        assert!(valid_builder().buyer(buyer).build().is_ok());
    }

    #[test]
    fn invalid_buyer_gstin() {
        let buyer = PartyBuilder::new("Rao Stores", AddressBuilder::new("Bengaluru", "29", "560001").build())
            .gstin("29AAGCB7383J1Z5")
            .build();
        let err = valid_builder().buyer(buyer).build().unwrap_err().to_string();
        assert!(err.contains("[46(d)] buyer.gstin"));
    }

    #[test]
    fn negative_quantity_and_rate_rejected() {
        let mut inv = valid_builder()
            .add_item(LineItem::new("Refund", dec!(-1), dec!(10)))
            .add_item(LineItem::new("Discount", dec!(1), dec!(-10)))
            .build_unchecked()
            .unwrap();
        recalculate(&mut inv);
        let errors = validate_invoice(&inv);
        assert!(errors.iter().any(|e| e.field == "items[1].quantity"));
        assert!(errors.iter().any(|e| e.field == "items[2].rate"));
    }

    #[test]
    fn zero_rate_item_allowed() {
        let inv = valid_builder()
            .add_item(LineItem::new("Free sample", dec!(1), dec!(0)))
            .build();
        assert!(inv.is_ok());
    }

    #[test]
    fn bad_hsn_code() {
        let item = LineItemBuilder::new("Steel rods", dec!(1), dec!(1)).hsn_sac("72A").build();
        let err = valid_builder().add_item(item).build().unwrap_err().to_string();
        assert!(err.contains("46(g)"));
    }

    #[test]
    fn tax_rate_out_of_range() {
        let err = valid_builder()
            .tax(TaxConfiguration::single(dec!(118)))
            .build()
            .unwrap_err()
            .to_string();
        assert!(err.contains("[46(m)] tax.gst_rate"));
    }

    #[test]
    fn unknown_place_of_supply() {
        let err = valid_builder().place_of_supply("77").build().unwrap_err().to_string();
        assert!(err.contains("46(o)"));
    }

    #[test]
    fn bad_pin_code() {
        let buyer = PartyBuilder::new("Rao Stores", AddressBuilder::new("Bengaluru", "29", "05600").build()).build();
        let err = valid_builder().buyer(buyer).build().unwrap_err().to_string();
        assert!(err.contains("buyer.address.pin_code"));
    }

    #[test]
    fn due_date_before_invoice_date() {
        let err = valid_builder()
            .due_date(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap())
            .build()
            .unwrap_err()
            .to_string();
        assert!(err.contains("due_date"));
    }

    #[test]
    fn stale_totals_detected() {
        let mut inv = valid_builder().build().unwrap();
        inv.items[0].set_quantity(dec!(11));
        let errors = validate_arithmetic(&inv);
        assert!(errors.iter().any(|e| e.field == "totals.subtotal"));
        assert!(errors.iter().any(|e| e.field == "totals.igst_amount"));

        recalculate(&mut inv);
        assert!(validate_arithmetic(&inv).is_empty());
    }

    #[test]
    fn out_of_range_items_reported() {
        let mut inv = valid_builder().build().unwrap();
        inv.items = vec![
            LineItem::new("Bulk", Decimal::MAX, dec!(1)),
            LineItem::new("Bulk", Decimal::MAX, dec!(1)),
        ];
        let errors = validate_arithmetic(&inv);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("amount out of range"));
    }

    #[test]
    fn huge_stored_totals_are_flagged() {
        let mut inv = valid_builder().build().unwrap();
        let totals = inv.totals.as_mut().unwrap();
        totals.subtotal = Decimal::MAX;
        totals.total_tax = Decimal::MAX;
        let errors = validate_arithmetic(&inv);
        assert!(errors.iter().any(|e| e.field == "totals.subtotal"));
        assert!(errors.iter().any(|e| e.field == "totals.total"));
    }

    #[test]
    fn missing_totals() {
        let mut inv = valid_builder().build().unwrap();
        inv.totals = None;
        assert_eq!(validate_arithmetic(&inv).len(), 1);
    }

    #[test]
    fn numeric_number_check() {
        assert!(validate_numeric_number("12").is_none());
        let err = validate_numeric_number("INV-12").unwrap();
        assert_eq!(err.rule.as_deref(), Some("46(b)"));
    }
}
