use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

use super::error::BijakError;
use super::types::*;

/// Line amount for a quantity and unit rate, `None` when the product is
/// outside the `Decimal` range.
pub fn line_amount(quantity: Decimal, rate: Decimal) -> Option<Decimal> {
    quantity.checked_mul(rate)
}

/// Compute invoice totals from line items and a tax configuration.
///
/// Pure and O(n) in the number of items, cheap enough to call on every
/// edit. Negative quantities or rates are not rejected here; they yield a
/// negative subtotal that flows through to the taxes and total.
///
/// # Panics
///
/// Panics when a sum leaves the `Decimal` range (about 7.9e28). Use
/// [`try_calculate_totals`] for items that have not been validated.
pub fn calculate_totals(items: &[LineItem], tax: &TaxConfiguration) -> InvoiceTotals {
    match try_calculate_totals(items, tax) {
        Ok(totals) => totals,
        Err(e) => panic!("{e}"),
    }
}

/// [`calculate_totals`] with every addition and multiplication checked.
pub fn try_calculate_totals(
    items: &[LineItem],
    tax: &TaxConfiguration,
) -> Result<InvoiceTotals, BijakError> {
    let subtotal = items.iter().try_fold(Decimal::ZERO, |sum, item| {
        sum.checked_add(item.amount())
            .ok_or_else(|| overflow("subtotal"))
    })?;

    let mut breakdown = Vec::with_capacity(3);
    let mut total_tax = Decimal::ZERO;
    for (kind, rate) in tax.rates() {
        let tax_amount = subtotal
            .checked_mul(rate)
            .and_then(|v| v.checked_div(dec!(100)))
            .map(|v| round_half_up(v, 2))
            .ok_or_else(|| overflow(&format!("{} amount", kind.label())))?;
        total_tax = total_tax
            .checked_add(tax_amount)
            .ok_or_else(|| overflow("total tax"))?;
        breakdown.push(TaxBreakdown {
            kind,
            rate,
            taxable_amount: subtotal,
            tax_amount,
        });
    }

    let total = subtotal
        .checked_add(total_tax)
        .ok_or_else(|| overflow("total"))?;

    Ok(InvoiceTotals {
        subtotal,
        breakdown,
        total_tax,
        total,
    })
}

/// Recompute the totals snapshot in place.
///
/// # Panics
///
/// Under the same conditions as [`calculate_totals`].
pub fn recalculate(invoice: &mut Invoice) {
    invoice.totals = Some(calculate_totals(&invoice.items, &invoice.tax));
}

/// Recompute the totals snapshot in place, leaving it untouched on overflow.
pub fn try_recalculate(invoice: &mut Invoice) -> Result<(), BijakError> {
    invoice.totals = Some(try_calculate_totals(&invoice.items, &invoice.tax)?);
    Ok(())
}

fn overflow(what: &str) -> BijakError {
    BijakError::Overflow(format!("{what} exceeds the decimal range"))
}

/// Round a Decimal to `dp` decimal places using half-up (commercial rounding).
fn round_half_up(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}
