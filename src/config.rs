//! Settings loaded from the environment.
//!
//! Variables use the `BIJAK_` prefix (`BIJAK_CURRENCY_CODE`,
//! `BIJAK_DEFAULT_GST_RATE`, `BIJAK_STRICT_NUMBERING`). A `.env` file in
//! the working directory is read first when present.

use chrono::NaiveDate;
use dotenvy::dotenv;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;

use crate::core::{BijakError, InvoiceBuilder, TaxConfiguration};

const ENV_PREFIX: &str = "BIJAK_";

/// Defaults applied to new invoices.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Currency for new invoices.
    pub currency_code: String,
    /// GST rate (percent) offered for new invoices.
    pub default_gst_rate: Decimal,
    /// Refuse to save non-numeric invoice numbers.
    pub strict_numbering: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            currency_code: "INR".to_string(),
            default_gst_rate: dec!(18),
            strict_numbering: false,
        }
    }
}

impl Settings {
    /// Load settings from `BIJAK_*` environment variables, after loading
    /// `.env` if it exists. Unset variables keep their defaults.
    pub fn from_env() -> Result<Self, BijakError> {
        dotenv().ok();
        let settings = envy::prefixed(ENV_PREFIX)
            .from_env::<Settings>()
            .map_err(|e| BijakError::Config(e.to_string()))?;
        settings.checked()
    }

    /// Load settings from explicit `(name, value)` pairs using the same
    /// `BIJAK_` names as [`from_env`](Self::from_env).
    pub fn from_vars<I>(vars: I) -> Result<Self, BijakError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let settings = envy::prefixed(ENV_PREFIX)
            .from_iter::<_, Settings>(vars)
            .map_err(|e| BijakError::Config(e.to_string()))?;
        settings.checked()
    }

    /// Single-rate configuration at the default GST rate.
    pub fn default_tax(&self) -> TaxConfiguration {
        TaxConfiguration::single(self.default_gst_rate)
    }

    /// Start an invoice with these defaults: the configured currency and
    /// the default GST rate split by place of supply.
    pub fn invoice_builder(&self, number: impl Into<String>, invoice_date: NaiveDate) -> InvoiceBuilder {
        InvoiceBuilder::new(number, invoice_date)
            .currency(self.currency_code.clone())
            .gst_for_supply(self.default_gst_rate)
    }

    fn checked(self) -> Result<Self, BijakError> {
        if self.default_gst_rate < Decimal::ZERO || self.default_gst_rate > dec!(100) {
            return Err(BijakError::Config(format!(
                "default GST rate {} must be between 0 and 100",
                self.default_gst_rate
            )));
        }
        if self.currency_code.len() != 3 {
            return Err(BijakError::Config(format!(
                "currency code '{}' must be 3 letters",
                self.currency_code
            )));
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::*;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn defaults_when_unset() {
        let settings = Settings::from_vars(Vec::new()).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.default_tax(), TaxConfiguration::single(dec!(18)));
    }

    #[test]
    fn reads_prefixed_vars() {
        let settings = Settings::from_vars(vars(&[
            ("BIJAK_DEFAULT_GST_RATE", "12"),
            ("BIJAK_STRICT_NUMBERING", "true"),
            ("UNRELATED", "x"),
        ]))
        .unwrap();
        assert_eq!(settings.default_gst_rate, dec!(12));
        assert!(settings.strict_numbering);
        assert_eq!(settings.currency_code, "INR");
    }

    #[test]
    fn rejects_out_of_range_rate() {
        let err = Settings::from_vars(vars(&[("BIJAK_DEFAULT_GST_RATE", "180")])).unwrap_err();
        assert!(matches!(err, BijakError::Config(_)));
    }

    #[test]
    fn rejects_unparseable_value() {
        assert!(Settings::from_vars(vars(&[("BIJAK_STRICT_NUMBERING", "maybe")])).is_err());
    }

    #[test]
    fn builder_applies_defaults() {
        let settings = Settings::default();
        let inv = settings
            .invoice_builder("5", NaiveDate::from_ymd_opt(2024, 6, 15).unwrap())
            .seller(PartyBuilder::new("Sharma Traders", AddressBuilder::new("Pune", "27", "411001").build()).build())
            .buyer(PartyBuilder::new("Rao Stores", AddressBuilder::new("Mumbai", "27", "400001").build()).build())
            .add_item(LineItem::new("Tea", dec!(1), dec!(100)))
            .build_unchecked()
            .unwrap();
        assert_eq!(inv.currency_code, "INR");
        assert_eq!(inv.tax, TaxConfiguration::split(dec!(0), dec!(9), dec!(9)));
        assert_eq!(inv.totals.unwrap().total, dec!(118));
    }
}
