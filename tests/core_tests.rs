use bijak::core::*;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn seller() -> Party {
    PartyBuilder::new(
        "Sharma Traders",
        AddressBuilder::new("Pune", "27", "411001")
            .line1("14 FC Road")
            .build(),
    )
    .gstin("27AAPFU0939F1ZV")
    .pan("AAPFU0939F")
    .email("accounts@sharmatraders.in")
    .build()
}

fn buyer_in(state: &str) -> Party {
    PartyBuilder::new(
        "Rao Stores",
        AddressBuilder::new("Bengaluru", state, "560001")
            .line1("MG Road")
            .build(),
    )
    .build()
}

// --- Calculator ---

#[test]
fn single_rate_example() {
    let inv = InvoiceBuilder::new("1", date(2024, 6, 15))
        .seller(seller())
        .buyer(buyer_in("27"))
        .add_item(LineItem::new("Notebook", dec!(2), dec!(100)))
        .add_item(LineItem::new("Pen", dec!(1), dec!(50)))
        .tax(TaxConfiguration::single(dec!(18)))
        .build()
        .unwrap();

    let totals = inv.totals.as_ref().unwrap();
    assert_eq!(totals.subtotal, dec!(250));
    assert_eq!(totals.tax_amount(TaxKind::Gst), dec!(45));
    assert_eq!(totals.total, dec!(295));
    assert_eq!(inv.items[0].amount(), dec!(200));
    assert_eq!(inv.items[1].amount(), dec!(50));
}

#[test]
fn split_rate_example() {
    let inv = InvoiceBuilder::new("2", date(2024, 6, 15))
        .seller(seller())
        .buyer(buyer_in("29"))
        .add_item(LineItem::new("Laptop stand", dec!(1), dec!(1000)))
        .tax(TaxConfiguration::split(dec!(18), dec!(0), dec!(0)))
        .build()
        .unwrap();

    let totals = inv.totals.unwrap();
    assert_eq!(totals.subtotal, dec!(1000));
    assert_eq!(totals.tax_amount(TaxKind::Igst), dec!(180));
    assert_eq!(totals.tax_amount(TaxKind::Sgst), dec!(0));
    assert_eq!(totals.tax_amount(TaxKind::Cgst), dec!(0));
    assert_eq!(totals.total_tax, dec!(180));
    assert_eq!(totals.total, dec!(1180));
}

#[test]
fn gst_for_supply_picks_split() {
    let intra = InvoiceBuilder::new("3", date(2024, 6, 15))
        .seller(seller())
        .buyer(buyer_in("27"))
        .add_item(LineItem::new("Consulting", dec!(10), dec!(1500)))
        .gst_for_supply(dec!(18))
        .build()
        .unwrap();
    let totals = intra.totals.unwrap();
    assert_eq!(totals.tax_amount(TaxKind::Sgst), dec!(1350));
    assert_eq!(totals.tax_amount(TaxKind::Cgst), dec!(1350));
    assert_eq!(totals.tax_amount(TaxKind::Igst), dec!(0));
    assert_eq!(totals.total, dec!(17700));

    let inter = InvoiceBuilder::new("4", date(2024, 6, 15))
        .seller(seller())
        .buyer(buyer_in("29"))
        .add_item(LineItem::new("Consulting", dec!(10), dec!(1500)))
        .gst_for_supply(dec!(18))
        .build()
        .unwrap();
    let totals = inter.totals.unwrap();
    assert_eq!(totals.tax_amount(TaxKind::Igst), dec!(2700));
    assert_eq!(totals.total, dec!(17700));
}

#[test]
fn recompute_after_edit_matches_fresh() {
    let mut inv = InvoiceBuilder::new("5", date(2024, 6, 15))
        .seller(seller())
        .buyer(buyer_in("27"))
        .add_item(LineItem::new("Notebook", dec!(2), dec!(100)))
        .tax(TaxConfiguration::single(dec!(12)))
        .build()
        .unwrap();

    inv.items[0].set_quantity(dec!(7));
    recalculate(&mut inv);

    let fresh = calculate_totals(
        &[LineItem::new("Notebook", dec!(7), dec!(100))],
        &TaxConfiguration::single(dec!(12)),
    );
    assert_eq!(inv.totals.as_ref().unwrap(), &fresh);
    assert_eq!(fresh.total, dec!(784));

    // Recomputing again changes nothing.
    let before = inv.totals.clone();
    recalculate(&mut inv);
    assert_eq!(inv.totals, before);
}

#[test]
fn empty_draft_totals_are_zero() {
    let inv = InvoiceBuilder::new("6", date(2024, 6, 15))
        .seller(seller())
        .buyer(buyer_in("27"))
        .tax(TaxConfiguration::split(dec!(0), dec!(9), dec!(9)))
        .build_unchecked()
        .unwrap();

    let totals = inv.totals.unwrap();
    assert_eq!(totals.subtotal, Decimal::ZERO);
    assert_eq!(totals.total_tax, Decimal::ZERO);
    assert_eq!(totals.total, Decimal::ZERO);
    for kind in [TaxKind::Igst, TaxKind::Sgst, TaxKind::Cgst] {
        assert_eq!(totals.tax_amount(kind), Decimal::ZERO);
    }
}

#[test]
fn empty_invoice_fails_validation() {
    let result = InvoiceBuilder::new("6", date(2024, 6, 15))
        .seller(seller())
        .buyer(buyer_in("27"))
        .build();
    assert!(result.unwrap_err().to_string().contains("at least one line item"));
}

#[test]
fn builder_requires_parties() {
    let err = InvoiceBuilder::new("7", date(2024, 6, 15))
        .buyer(buyer_in("27"))
        .build()
        .unwrap_err();
    assert!(matches!(err, BijakError::Builder(_)));
}

#[test]
fn out_of_range_items_fail_without_panicking() {
    let item = LineItemBuilder::new("Bulk", Decimal::MAX, dec!(2)).try_build();
    assert!(matches!(item, Err(BijakError::Overflow(_))));

    let err = InvoiceBuilder::new("10", date(2024, 6, 15))
        .seller(seller())
        .buyer(buyer_in("27"))
        .add_item(LineItem::new("Bulk", Decimal::MAX, dec!(1)))
        .add_item(LineItem::new("Bulk", Decimal::MAX, dec!(1)))
        .build_unchecked()
        .unwrap_err();
    assert!(matches!(err, BijakError::Overflow(_)));

    let json = r#"{"description":"Bulk","quantity":"100000000000000000000","rate":"10000000000"}"#;
    assert!(serde_json::from_str::<LineItem>(json).is_err());
}

// --- Numbering ---

#[test]
fn numbering_examples() {
    assert_eq!(next_invoice_number(["3", "7", "abc", "10"]), "11");
    assert_eq!(next_invoice_number(Vec::<String>::new()), "1");
}

#[test]
fn numbering_ignores_manual_non_numeric_numbers() {
    let existing = vec!["1".to_string(), "2".to_string(), "INV-99".to_string()];
    assert_eq!(next_invoice_number(&existing), "3");
}

// --- Serialization ---

#[test]
fn stored_snapshot_is_read_back_verbatim() {
    let inv = InvoiceBuilder::new("8", date(2024, 6, 15))
        .seller(seller())
        .buyer(buyer_in("29"))
        .add_item(
            LineItemBuilder::new("Cement bag", dec!(20), dec!(380))
                .hsn_sac("2523")
                .unit("BAG")
                .build(),
        )
        .gst_for_supply(dec!(28))
        .build()
        .unwrap();

    let json = serde_json::to_string(&inv).unwrap();
    let back: Invoice = serde_json::from_str(&json).unwrap();

    assert_eq!(back.totals, inv.totals);
    assert_eq!(back.items, inv.items);
    assert_eq!(back.tax, inv.tax);
    assert!(validate_arithmetic(&back).is_empty());
}

#[test]
fn tampered_snapshot_is_trusted_on_read_but_flagged() {
    let inv = InvoiceBuilder::new("9", date(2024, 6, 15))
        .seller(seller())
        .buyer(buyer_in("27"))
        .add_item(LineItem::new("Notebook", dec!(2), dec!(100)))
        .tax(TaxConfiguration::single(dec!(18)))
        .build()
        .unwrap();

    let mut json: serde_json::Value = serde_json::to_value(&inv).unwrap();
    json["totals"]["total"] = serde_json::Value::String("999".into());
    let back: Invoice = serde_json::from_value(json).unwrap();

    assert_eq!(back.totals.as_ref().unwrap().total, dec!(999));
    let errors = validate_arithmetic(&back);
    assert!(errors.iter().any(|e| e.field == "totals.total"));
}

// --- GSTIN / states ---

#[test]
fn gstin_helpers() {
    assert_eq!(gstin::gstin_check_char("27AAPFU0939F1Z"), Some('V'));
    assert!(validate_gstin("27AAPFU0939F1ZV").is_ok());
    assert_eq!(state_name("29"), Some("Karnataka"));
}
