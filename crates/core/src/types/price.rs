//! Type-safe price representation using decimal arithmetic.

use core::fmt;

use rust_decimal::Decimal;

/// A price in the store currency, Indian rupees.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Price {
    /// Amount in rupees, not paise.
    pub amount: Decimal,
}

impl Price {
    /// Rupee sign.
    pub const SYMBOL: &str = "₹";

    /// Create a price in the store currency.
    #[must_use]
    pub const fn store(amount: Decimal) -> Self {
        Self { amount }
    }

    /// Format for display.
    ///
    /// Whole amounts drop the fraction (`₹499`), anything else shows two
    /// decimal places (`₹499.50`).
    #[must_use]
    pub fn display(&self) -> String {
        let amount = self.amount.normalize();
        if amount.fract().is_zero() {
            format!("{}{}", Self::SYMBOL, amount.trunc())
        } else {
            format!("{}{:.2}", Self::SYMBOL, amount.round_dp(2))
        }
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_amounts_have_no_fraction() {
        assert_eq!(Price::store(Decimal::new(499, 0)).display(), "₹499");
        assert_eq!(Price::store(Decimal::new(49900, 2)).display(), "₹499");
    }

    #[test]
    fn fractional_amounts_use_two_places() {
        assert_eq!(Price::store(Decimal::new(4995, 1)).display(), "₹499.50");
        assert_eq!(Price::store(Decimal::new(1999, 2)).to_string(), "₹19.99");
    }
}
