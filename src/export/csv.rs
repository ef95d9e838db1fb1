//! CSV generation for invoice summaries and line items.
//!
//! Comma separated with a header row, text fields always double-quoted,
//! amounts rounded half-up to two decimal places and `\n` line endings.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::core::{BijakError, Invoice, TaxKind};

const SUMMARY_HEADER: &str = "invoice_number,invoice_date,due_date,client_name,client_gstin,\
place_of_supply,subtotal,gst,igst,sgst,cgst,total_tax,total,currency";

const ITEMS_HEADER: &str = "invoice_number,line,description,hsn_sac,quantity,unit,rate,amount";

/// One summary row per invoice, using each invoice's stored totals.
///
/// Fails when an invoice has no computed totals.
pub fn invoices_csv(invoices: &[Invoice]) -> Result<String, BijakError> {
    let mut out = String::from(SUMMARY_HEADER);
    out.push('\n');

    for inv in invoices {
        let totals = inv.totals.as_ref().ok_or_else(|| {
            BijakError::Export(format!(
                "invoice {} has no calculated totals, call recalculate() first",
                inv.number
            ))
        })?;

        let place_of_supply = inv
            .place_of_supply
            .as_deref()
            .unwrap_or(&inv.buyer.address.state_code);

        csv_field_str(&mut out, &inv.number);
        out.push(',');
        out.push_str(&inv.invoice_date.format("%Y-%m-%d").to_string());
        out.push(',');
        if let Some(d) = inv.due_date {
            out.push_str(&d.format("%Y-%m-%d").to_string());
        }
        out.push(',');
        csv_field_str(&mut out, &inv.buyer.name);
        out.push(',');
        csv_field_str(&mut out, inv.buyer.gstin.as_deref().unwrap_or(""));
        out.push(',');
        csv_field_str(&mut out, place_of_supply);
        out.push(',');
        csv_field_decimal(&mut out, totals.subtotal);
        for kind in [TaxKind::Gst, TaxKind::Igst, TaxKind::Sgst, TaxKind::Cgst] {
            out.push(',');
            csv_field_decimal(&mut out, totals.tax_amount(kind));
        }
        out.push(',');
        csv_field_decimal(&mut out, totals.total_tax);
        out.push(',');
        csv_field_decimal(&mut out, totals.total);
        out.push(',');
        csv_field_str(&mut out, &inv.currency_code);
        out.push('\n');
    }

    Ok(out)
}

/// One row per line item of `invoice`, numbered from 1.
pub fn line_items_csv(invoice: &Invoice) -> String {
    let mut out = String::from(ITEMS_HEADER);
    out.push('\n');

    for (i, item) in invoice.items.iter().enumerate() {
        csv_field_str(&mut out, &invoice.number);
        out.push(',');
        out.push_str(&(i + 1).to_string());
        out.push(',');
        csv_field_str(&mut out, &item.description);
        out.push(',');
        csv_field_str(&mut out, item.hsn_sac_code.as_deref().unwrap_or(""));
        out.push(',');
        out.push_str(&item.quantity().normalize().to_string());
        out.push(',');
        csv_field_str(&mut out, item.unit.as_deref().unwrap_or(""));
        out.push(',');
        csv_field_decimal(&mut out, item.rate());
        out.push(',');
        csv_field_decimal(&mut out, item.amount());
        out.push('\n');
    }

    out
}

fn csv_field_str(out: &mut String, value: &str) {
    out.push('"');
    for ch in value.chars() {
        if ch == '"' {
            out.push_str("\"\"");
        } else {
            out.push(ch);
        }
    }
    out.push('"');
}

fn csv_field_decimal(out: &mut String, d: Decimal) {
    let rounded = d.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    out.push_str(&format!("{rounded:.2}"));
}
