//! Ordering domain errors

use thiserror::Error;

use core_kernel::{MoneyError, PortError};
use domain_catalog::MenuItemId;

/// Errors that can occur while building or submitting an order
///
/// Unknown coupon codes are not errors; they resolve to a zero discount.
#[derive(Debug, Error)]
pub enum OrderingError {
    /// Quantity is zero or does not fit a line item
    #[error("Invalid quantity for item {item}: {quantity}")]
    InvalidQuantity { item: MenuItemId, quantity: i64 },

    /// Catalog price is negative
    #[error("Invalid price for item {0}")]
    InvalidPrice(MenuItemId),

    /// Submission was requested with nothing in the cart
    #[error("No active invoice")]
    NoActiveInvoice,

    /// The item exists but is switched off in the catalog
    #[error("Menu item {0} is not available")]
    ItemUnavailable(MenuItemId),

    /// Coupon rate outside [0, 1)
    #[error("Invalid coupon rate for {code}: {rate}")]
    InvalidCouponRate { code: String, rate: String },

    /// Configuration could not be loaded or is inconsistent
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error(transparent)]
    Money(#[from] MoneyError),

    #[error(transparent)]
    Port(#[from] PortError),
}

impl From<config::ConfigError> for OrderingError {
    fn from(err: config::ConfigError) -> Self {
        OrderingError::Configuration(err.to_string())
    }
}
