//! Money display using decimal arithmetic.
//!
//! The backend sends amounts as JSON numbers (or strings) without a currency;
//! the dashboard pairs them with the store currency for display.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// An amount paired with its currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (e.g., dollars, not cents).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }
}

impl std::fmt::Display for Price {
    /// Formats as `$1,234.50`: symbol, thousands separators, two decimals
    /// rounded half away from zero.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let rounded = self
            .amount
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        let digits = format!("{:.2}", rounded.abs());
        let (whole, cents) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

        let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
        for (i, ch) in whole.chars().enumerate() {
            if i > 0 && (whole.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }

        let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
            "-"
        } else {
            ""
        };
        write!(f, "{sign}{}{grouped}.{cents}", self.currency_code.symbol())
    }
}

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    USD,
    EUR,
    GBP,
    CAD,
    AUD,
}

impl CurrencyCode {
    /// Display symbol for the currency.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::USD | Self::CAD | Self::AUD => "$",
            Self::EUR => "€",
            Self::GBP => "£",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_groups_thousands() {
        let price = Price::new(Decimal::new(123_450, 2), CurrencyCode::USD);
        assert_eq!(price.to_string(), "$1,234.50");

        let price = Price::new(Decimal::new(1_000_000, 0), CurrencyCode::GBP);
        assert_eq!(price.to_string(), "£1,000,000.00");
    }

    #[test]
    fn test_display_small_amounts() {
        assert_eq!(Price::new(Decimal::ZERO, CurrencyCode::EUR).to_string(), "€0.00");
        assert_eq!(
            Price::new(Decimal::new(999, 1), CurrencyCode::USD).to_string(),
            "$99.90"
        );
    }

    #[test]
    fn test_display_rounds_half_away_from_zero() {
        let price = Price::new(Decimal::new(10_005, 3), CurrencyCode::USD);
        assert_eq!(price.to_string(), "$10.01");
    }

    #[test]
    fn test_display_negative() {
        let price = Price::new(Decimal::new(-250_075, 2), CurrencyCode::USD);
        assert_eq!(price.to_string(), "-$2,500.75");
    }
}
