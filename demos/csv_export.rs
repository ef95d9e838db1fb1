use chrono::NaiveDate;
use bijak::core::*;
use bijak::export::{invoices_csv, line_items_csv};
use rust_decimal_macros::dec;

fn main() {
    let invoice = InvoiceBuilder::new("17", NaiveDate::from_ymd_opt(2024, 6, 15).unwrap())
        .seller(
            PartyBuilder::new("Sharma Traders", AddressBuilder::new("Pune", "27", "411001").build())
                .gstin("27AAPFU0939F1ZV")
                .build(),
        )
        .buyer(
            PartyBuilder::new(
                "Rao Stores",
                AddressBuilder::new("Bengaluru", "29", "560001").build(),
            )
            .gstin("29AAGCB7383J1Z4")
            .build(),
        )
        .add_item(
            LineItemBuilder::new("Steel rods, 12mm", dec!(10), dec!(450))
                .hsn_sac("7214")
                .unit("NOS")
                .build(),
        )
        .gst_for_supply(dec!(18))
        .build()
        .expect("invoice should be valid");

    match invoices_csv(std::slice::from_ref(&invoice)) {
        Ok(csv) => print!("{csv}"),
        Err(e) => eprintln!("Export failed: {e}"),
    }
    println!();
    print!("{}", line_items_csv(&invoice));
}
