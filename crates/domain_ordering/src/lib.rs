//! Ordering Domain
//!
//! Builds a restaurant order as an invoice of line items and keeps its
//! totals right while the customer or waiter edits it.
//!
//! # Pricing
//!
//! ```text
//! subtotal = Σ unit_price × quantity
//! discount = subtotal × coupon rate
//! tax      = (subtotal − discount) × GST
//! total    = subtotal − discount + tax
//! ```
//!
//! Amounts are carried at full decimal precision; rounding to paise only
//! happens when an amount is displayed.
//!
//! # Components
//!
//! - [`InvoiceAggregator`]: the single owner of the invoice in progress
//! - [`CouponResolver`] / [`CouponTable`]: coupon code to discount rate
//! - [`PricingPolicy`]: currency and GST rate
//! - [`OrderSubmissionPort`] / [`InMemoryOrderHistory`]: hand-off to the kitchen
//! - [`ActivityFeed`]: recent events for the staff dashboard
//! - [`OrderDesk`]: wires the above to a [`MenuCatalogPort`](domain_catalog::MenuCatalogPort)
//!
//! # Example
//!
//! ```rust,ignore
//! use domain_ordering::{OrderChannel, OrderDesk, OrderingConfig};
//!
//! let config = OrderingConfig::load("ordering.toml")?;
//! let mut desk = OrderDesk::from_config(&config, catalog, history)?;
//!
//! desk.add_menu_item(MenuItemId(1), 2).await?;
//! desk.aggregator_mut().apply_coupon("SAVE10")?;
//! let receipt = desk.submit(OrderChannel::Waiter { table_number: 4 }).await?;
//! ```

pub mod activity;
pub mod aggregator;
pub mod config;
pub mod coupon;
pub mod error;
pub mod invoice;
pub mod pricing;
pub mod service;
pub mod submission;

pub use crate::activity::{ActivityEvent, ActivityFeed, ActivityKind, DEFAULT_ACTIVITY_CAPACITY};
pub use crate::aggregator::InvoiceAggregator;
pub use crate::config::{CouponConfig, OrderingConfig};
pub use crate::coupon::{CouponResolver, CouponTable};
pub use crate::error::OrderingError;
pub use crate::invoice::{AppliedCoupon, Invoice, LineItem};
pub use crate::pricing::{PricingPolicy, DEFAULT_TAX_PERCENT};
pub use crate::service::{OrderDesk, OrderReceipt};
pub use crate::submission::{
    InMemoryOrderHistory, OrderChannel, OrderHistoryPort, OrderStatus, OrderSubmission,
    OrderSubmissionPort, SubmittedOrder,
};
