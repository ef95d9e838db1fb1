use chrono::NaiveDate;
use bijak::core::*;
use bijak::store::*;
use rust_decimal_macros::dec;

fn draft(number: &str) -> Invoice {
    InvoiceBuilder::new(number, NaiveDate::from_ymd_opt(2024, 6, 15).unwrap())
        .seller(
            PartyBuilder::new("Sharma Traders", AddressBuilder::new("Pune", "27", "411001").build())
                .gstin("27AAPFU0939F1ZV")
                .build(),
        )
        .buyer(
            PartyBuilder::new("Rao Stores", AddressBuilder::new("Bengaluru", "29", "560001").build())
                .build(),
        )
        .add_item(LineItem::new("Consulting (hours)", dec!(8), dec!(1500)))
        .gst_for_supply(dec!(18))
        .build_unchecked()
        .expect("draft has both parties")
}

fn main() {
    let service = InvoiceService::new(MemoryStore::new());
    let user = UserId::from("sharma-traders");

    // Two drafts opened at the same time get the same suggestion
    let a = service.suggest_number(&user).unwrap();
    let b = service.suggest_number(&user).unwrap();
    println!("Draft A suggested: {a}");
    println!("Draft B suggested: {b}");

    let saved = service.save(&user, draft(&a)).unwrap();
    println!("Saved draft A as {} ({})", saved.invoice.number, saved.id);

    match service.save(&user, draft(&b)) {
        Ok(_) => println!("Draft B saved"),
        Err(e) if e.is_conflict() => {
            println!("Draft B rejected: {e}");
            let retry = service.suggest_number(&user).unwrap();
            let saved = service.save(&user, draft(&retry)).unwrap();
            println!("Draft B saved as {} after a fresh suggestion", saved.invoice.number);
        }
        Err(e) => eprintln!("Error: {e}"),
    }

    // Claiming a number and saving in one step
    let claimed = service.save_with_next_number(&user, draft("")).unwrap();
    println!("Claimed and saved {}", claimed.invoice.number);

    println!("---");
    for stored in service.list(&user).unwrap() {
        let totals = stored.invoice.totals.as_ref().unwrap();
        println!("  #{:<4} total {} INR", stored.invoice.number, totals.total);
    }
}
