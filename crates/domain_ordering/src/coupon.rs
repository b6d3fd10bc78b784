//! Coupon resolution
//!
//! A coupon code maps to a discount rate in [0, 1). Codes are matched
//! exactly (case-sensitive, no trimming); anything unknown, including the
//! empty string, resolves to a zero rate rather than an error.

use std::collections::BTreeMap;

use rust_decimal_macros::dec;

use core_kernel::Rate;

use crate::error::OrderingError;

/// Maps a coupon code to a discount rate
pub trait CouponResolver: Send + Sync {
    /// Returns the discount rate for `code`, or zero if the code is unknown
    fn resolve(&self, code: &str) -> Rate;
}

/// Fixed lookup table of coupon codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CouponTable {
    rates: BTreeMap<String, Rate>,
}

impl CouponTable {
    /// Creates a table with no codes; every lookup resolves to zero
    pub fn empty() -> Self {
        Self {
            rates: BTreeMap::new(),
        }
    }

    /// Adds or replaces a code
    ///
    /// # Errors
    ///
    /// `InvalidCouponRate` if the rate is negative or 100% or more.
    pub fn insert(&mut self, code: impl Into<String>, rate: Rate) -> Result<(), OrderingError> {
        let code = code.into();
        if !rate.is_fractional_discount() {
            return Err(OrderingError::InvalidCouponRate {
                code,
                rate: rate.to_string(),
            });
        }
        self.rates.insert(code, rate);
        Ok(())
    }

    /// Builder form of [`CouponTable::insert`]
    pub fn with_code(mut self, code: impl Into<String>, rate: Rate) -> Result<Self, OrderingError> {
        self.insert(code, rate)?;
        Ok(self)
    }

    /// Known codes in lexical order
    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.rates.keys().map(String::as_str)
    }

    /// Codes with their rates in lexical order
    pub fn entries(&self) -> impl Iterator<Item = (&str, Rate)> {
        self.rates.iter().map(|(code, rate)| (code.as_str(), *rate))
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

impl Default for CouponTable {
    /// WELCOME10 and SAVE10 at 10%, SAVE15 at 15%
    fn default() -> Self {
        let rates = [
            ("WELCOME10", Rate::new(dec!(0.10))),
            ("SAVE10", Rate::new(dec!(0.10))),
            ("SAVE15", Rate::new(dec!(0.15))),
        ]
        .into_iter()
        .map(|(code, rate)| (code.to_string(), rate))
        .collect();
        Self { rates }
    }
}

impl CouponResolver for CouponTable {
    fn resolve(&self, code: &str) -> Rate {
        self.rates.get(code).copied().unwrap_or(Rate::ZERO)
    }
}
