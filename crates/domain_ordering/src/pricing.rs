//! Pricing policy: the invoice currency and the single GST rate

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use core_kernel::{Currency, Money, MoneyError, Rate};

use crate::error::OrderingError;

/// GST applied to the discounted subtotal unless configured otherwise
pub const DEFAULT_TAX_PERCENT: Decimal = dec!(12);

/// Currency and tax rate every invoice is priced with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingPolicy {
    currency: Currency,
    tax_rate: Rate,
}

impl PricingPolicy {
    /// Creates a policy, rejecting tax rates outside [0, 1]
    pub fn new(currency: Currency, tax_rate: Rate) -> Result<Self, OrderingError> {
        let value = tax_rate.as_decimal();
        if value < Decimal::ZERO || value > Decimal::ONE {
            return Err(OrderingError::Configuration(format!(
                "tax rate must be between 0% and 100%, got {tax_rate}"
            )));
        }
        Ok(Self { currency, tax_rate })
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn tax_rate(&self) -> Rate {
        self.tax_rate
    }

    /// Tax due on an already discounted amount
    ///
    /// # Errors
    ///
    /// `MoneyError::Overflow` if the product does not fit a decimal.
    pub fn tax_on(&self, taxable: &Money) -> Result<Money, MoneyError> {
        self.tax_rate.checked_apply(taxable)
    }
}

impl Default for PricingPolicy {
    fn default() -> Self {
        Self {
            currency: Currency::INR,
            tax_rate: Rate::from_percentage(DEFAULT_TAX_PERCENT),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_inr_twelve_percent() {
        let policy = PricingPolicy::default();
        assert_eq!(policy.currency(), Currency::INR);
        assert_eq!(policy.tax_rate().as_decimal(), dec!(0.12));
    }

    #[test]
    fn test_tax_on() {
        let policy = PricingPolicy::default();
        let taxable = Money::new(dec!(450), Currency::INR);
        assert_eq!(policy.tax_on(&taxable).unwrap().amount(), dec!(54));
    }

    #[test]
    fn test_tax_on_full_and_zero_rates() {
        let taxable = Money::new(dec!(450), Currency::INR);

        let full = PricingPolicy::new(Currency::INR, Rate::new(dec!(1))).unwrap();
        assert_eq!(full.tax_on(&taxable).unwrap(), taxable);

        let exempt = PricingPolicy::new(Currency::INR, Rate::ZERO).unwrap();
        assert!(exempt.tax_on(&taxable).unwrap().is_zero());
    }

    #[test]
    fn test_rejects_out_of_range_rates() {
        assert!(PricingPolicy::new(Currency::INR, Rate::new(dec!(1.5))).is_err());
        assert!(PricingPolicy::new(Currency::INR, Rate::new(dec!(-0.01))).is_err());
        assert!(PricingPolicy::new(Currency::INR, Rate::ZERO).is_ok());
        assert!(PricingPolicy::new(Currency::USD, Rate::new(dec!(1))).is_ok());
    }
}
