//! Place-of-supply detection.

use super::types::{Invoice, Party, SupplyType, TaxConfiguration};
use rust_decimal::Decimal;

/// Determine whether an invoice is an intra- or inter-state supply.
///
/// Compares the seller's state with the place of supply. The place of
/// supply defaults to the buyer's state when the invoice does not set one;
/// a party's state comes from its address, or from its GSTIN prefix when
/// the address carries no state code.
///
/// The caller can always override the resulting tax split by setting
/// `invoice.tax` manually.
pub fn determine_supply(invoice: &Invoice) -> SupplyType {
    let seller_state = party_state(&invoice.seller);
    let supply_state = invoice
        .place_of_supply
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .or_else(|| party_state(&invoice.buyer));

    match (seller_state, supply_state) {
        (Some(seller), Some(supply)) if seller != supply => SupplyType::InterState,
        _ => SupplyType::IntraState,
    }
}

/// Tax configuration for `gst_rate` split according to [`determine_supply`].
pub fn tax_for_invoice(invoice: &Invoice, gst_rate: Decimal) -> TaxConfiguration {
    TaxConfiguration::for_supply(determine_supply(invoice), gst_rate)
}

fn party_state(party: &Party) -> Option<&str> {
    let from_address = party.address.state_code.trim();
    if !from_address.is_empty() {
        return Some(from_address);
    }
    party
        .gstin
        .as_deref()
        .map(str::trim)
        .filter(|g| g.len() >= 2 && g.is_ascii())
        .map(|g| &g[..2])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn invoice(seller_state: &str, buyer_state: &str) -> Invoice {
        InvoiceBuilder::new("1", NaiveDate::from_ymd_opt(2024, 6, 15).unwrap())
            .seller(
                PartyBuilder::new("Sharma Traders", AddressBuilder::new("Pune", seller_state, "411001").build())
                    .gstin("27AAPFU0939F1ZV")
                    .build(),
            )
            .buyer(PartyBuilder::new("Rao Stores", AddressBuilder::new("City", buyer_state, "560001").build()).build())
            .add_item(LineItem::new("Rice", dec!(10), dec!(60)))
            .build_unchecked()
            .unwrap()
    }

    #[test]
    fn same_state_is_intra() {
        assert_eq!(determine_supply(&invoice("27", "27")), SupplyType::IntraState);
    }

    #[test]
    fn different_state_is_inter() {
        assert_eq!(determine_supply(&invoice("27", "29")), SupplyType::InterState);
    }

    #[test]
    fn place_of_supply_overrides_buyer_state() {
        let mut inv = invoice("27", "29");
        inv.place_of_supply = Some("27".into());
        assert_eq!(determine_supply(&inv), SupplyType::IntraState);
    }

    #[test]
    fn seller_state_from_gstin() {
        let mut inv = invoice("", "29");
        inv.seller.address.state_code.clear();
        assert_eq!(determine_supply(&inv), SupplyType::InterState);
    }

    #[test]
    fn tax_split_follows_supply() {
        let inv = invoice("27", "27");
        assert_eq!(
            tax_for_invoice(&inv, dec!(18)),
            TaxConfiguration::split(dec!(0), dec!(9), dec!(9))
        );
        let inv = invoice("27", "07");
        assert_eq!(
            tax_for_invoice(&inv, dec!(18)),
            TaxConfiguration::split(dec!(18), dec!(0), dec!(0))
        );
    }
}
