//! Prices

use std::fmt;

use rusty_money::{
    Money,
    iso::{self, Currency},
};
use serde::{Deserialize, Serialize};

/// The currency every storefront price is denominated in.
pub const STOREFRONT_CURRENCY: &Currency = iso::INR;

/// Represents a price in minor currency units (paise).
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Price {
    value: i64,
}

impl Price {
    /// Zero price.
    pub const ZERO: Self = Self { value: 0 };

    /// Creates a new price from minor units (paise).
    #[must_use]
    pub fn from_minor(value: i64) -> Self {
        Price { value }
    }

    /// Creates a new price from major units (rupees).
    #[must_use]
    pub fn from_major(value: i64) -> Self {
        Price {
            value: value.saturating_mul(100),
        }
    }

    /// Returns the price in minor units.
    pub fn to_minor_units(self) -> i64 {
        self.value
    }

    /// Adds two prices, saturating at the numeric bounds.
    #[must_use]
    pub fn saturating_add(self, other: Self) -> Self {
        Price {
            value: self.value.saturating_add(other.value),
        }
    }

    /// Multiplies the price by a quantity, saturating at the numeric bounds.
    #[must_use]
    pub fn saturating_mul(self, quantity: u32) -> Self {
        Price {
            value: self.value.saturating_mul(i64::from(quantity)),
        }
    }

    /// Returns the price as a [`Money`] value in the given currency.
    pub fn money(self, currency: &'static Currency) -> Money<'static, Currency> {
        Money::from_minor(self.value, currency)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.money(STOREFRONT_CURRENCY))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_price_from_minor() {
        let price = Price::from_minor(1000);

        assert_eq!(price.to_minor_units(), 1000);
    }

    #[test]
    fn from_major_converts_to_minor() {
        let price = Price::from_major(499);

        assert_eq!(price.to_minor_units(), 49900);
    }

    #[test]
    fn saturating_add_sums_values() {
        let total = Price::from_minor(100).saturating_add(Price::from_minor(250));

        assert_eq!(total, Price::from_minor(350));
    }

    #[test]
    fn saturating_add_saturates_at_bounds() {
        let total = Price::from_minor(i64::MAX).saturating_add(Price::from_minor(1));

        assert_eq!(total, Price::from_minor(i64::MAX));
    }

    #[test]
    fn saturating_mul_scales_by_quantity() {
        let total = Price::from_minor(150).saturating_mul(3);

        assert_eq!(total, Price::from_minor(450));
    }

    #[test]
    fn display_formats_as_storefront_currency() {
        let price = Price::from_major(499);

        assert_eq!(price.to_string(), "₹499.00");
    }
}
