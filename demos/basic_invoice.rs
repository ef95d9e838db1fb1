use chrono::NaiveDate;
use bijak::core::*;
use rust_decimal_macros::dec;

fn main() {
    // Intra-state sale: GST 18% is split into SGST 9% + CGST 9%
    let invoice = InvoiceBuilder::new("1", NaiveDate::from_ymd_opt(2024, 6, 15).unwrap())
        .due_date(NaiveDate::from_ymd_opt(2024, 7, 15).unwrap())
        .seller(
            PartyBuilder::new(
                "Sharma Traders",
                AddressBuilder::new("Pune", "27", "411001")
                    .line1("14 FC Road")
                    .build(),
            )
            .gstin("27AAPFU0939F1ZV")
            .email("accounts@sharmatraders.in")
            .build(),
        )
        .buyer(
            PartyBuilder::new(
                "Kulkarni & Sons",
                AddressBuilder::new("Nashik", "27", "422001").build(),
            )
            .build(),
        )
        .add_item(
            LineItemBuilder::new("Printer paper A4", dec!(20), dec!(245))
                .hsn_sac("4802")
                .unit("REAM")
                .build(),
        )
        .add_item(
            LineItemBuilder::new("Toner cartridge", dec!(2), dec!(1899.50))
                .hsn_sac("8443")
                .unit("NOS")
                .build(),
        )
        .gst_for_supply(dec!(18))
        .terms("Payable within 30 days")
        .build()
        .expect("invoice should be valid");

    let totals = invoice.totals.as_ref().unwrap();
    println!("Invoice: {}", invoice.number);
    println!("Date:    {}", invoice.invoice_date);
    println!("Seller:  {}", invoice.seller.name);
    println!("Buyer:   {}", invoice.buyer.name);
    println!("---");
    for item in &invoice.items {
        println!(
            "  {} x {} @ {} = {}",
            item.quantity(),
            item.description,
            item.rate(),
            item.amount()
        );
    }
    println!("---");
    println!("Subtotal: {} {}", totals.subtotal, invoice.currency_code);
    for b in &totals.breakdown {
        println!("{:<5} {}%: {} {}", b.kind.label(), b.rate, b.tax_amount, invoice.currency_code);
    }
    println!("Total:    {} {}", totals.total, invoice.currency_code);
}
