//! Ordering configuration

use std::path::Path;

use rust_decimal::Decimal;
use serde::Deserialize;

use core_kernel::{Currency, Rate};

use crate::activity::DEFAULT_ACTIVITY_CAPACITY;
use crate::coupon::CouponTable;
use crate::error::OrderingError;
use crate::pricing::{PricingPolicy, DEFAULT_TAX_PERCENT};

/// Ordering configuration
///
/// Every field has a default, so an empty environment yields a working
/// INR / 12% GST setup with the standard coupon codes.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct OrderingConfig {
    /// Currency every invoice is priced in
    pub currency: Currency,
    /// GST applied to the discounted subtotal, in percent
    pub tax_rate_percent: Decimal,
    /// Number of events kept in the activity feed
    pub activity_capacity: usize,
    /// Known coupon codes
    pub coupons: Vec<CouponConfig>,
}

/// One coupon code and its discount
///
/// Codes are values rather than table keys so they keep their case.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CouponConfig {
    pub code: String,
    /// Discount in percent, below 100
    pub percent: Decimal,
}

impl Default for OrderingConfig {
    fn default() -> Self {
        Self {
            currency: Currency::INR,
            tax_rate_percent: DEFAULT_TAX_PERCENT,
            activity_capacity: DEFAULT_ACTIVITY_CAPACITY,
            coupons: CouponTable::default()
                .entries()
                .map(|(code, rate)| CouponConfig {
                    code: code.to_string(),
                    percent: rate.as_percentage(),
                })
                .collect(),
        }
    }
}

impl OrderingConfig {
    /// Loads configuration from `ORDERING_*` environment variables
    ///
    /// * `ORDERING_CURRENCY` - ISO code (default: INR)
    /// * `ORDERING_TAX_RATE_PERCENT` - GST percent (default: 12)
    /// * `ORDERING_ACTIVITY_CAPACITY` - activity feed length (default: 50)
    pub fn from_env() -> Result<Self, OrderingError> {
        Ok(config::Config::builder()
            .add_source(config::Environment::with_prefix("ORDERING").try_parsing(true))
            .build()?
            .try_deserialize()?)
    }

    /// Loads `.env`, then an optional TOML file, then the environment
    ///
    /// Environment variables win over the file. Coupon tables are only
    /// practical to set from the file:
    ///
    /// ```toml
    /// tax_rate_percent = "12"
    ///
    /// [[coupons]]
    /// code = "WELCOME10"
    /// percent = "10"
    /// ```
    pub fn load(path: impl AsRef<Path>) -> Result<Self, OrderingError> {
        dotenvy::dotenv().ok();

        Ok(config::Config::builder()
            .add_source(config::File::from(path.as_ref()).required(false))
            .add_source(config::Environment::with_prefix("ORDERING").try_parsing(true))
            .build()?
            .try_deserialize()?)
    }

    /// Builds and validates the pricing policy
    pub fn pricing_policy(&self) -> Result<PricingPolicy, OrderingError> {
        PricingPolicy::new(self.currency, Rate::from_percentage(self.tax_rate_percent))
    }

    /// Builds and validates the coupon table
    pub fn coupon_table(&self) -> Result<CouponTable, OrderingError> {
        let mut table = CouponTable::empty();
        for coupon in &self.coupons {
            table.insert(coupon.code.clone(), Rate::from_percentage(coupon.percent))?;
        }
        Ok(table)
    }
}
