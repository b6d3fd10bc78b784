//! Order desk service
//!
//! Wires the catalog, the aggregator, the submission port and the activity
//! feed together for one ordering session (a customer's phone or a
//! waiter's tablet).

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use tracing::{info, instrument, warn};

use core_kernel::{InvoiceId, Money, OrderId};
use domain_catalog::{MenuCatalogPort, MenuItemId};

use crate::activity::{ActivityFeed, ActivityKind};
use crate::aggregator::InvoiceAggregator;
use crate::config::OrderingConfig;
use crate::error::OrderingError;
use crate::submission::{OrderChannel, OrderSubmission, OrderSubmissionPort};

/// What the caller gets back for a submitted order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderReceipt {
    pub order_id: OrderId,
    pub invoice_id: InvoiceId,
    pub total: Money,
    pub channel: OrderChannel,
}

/// Application service for building and submitting one order at a time
pub struct OrderDesk {
    catalog: Arc<dyn MenuCatalogPort>,
    orders: Arc<dyn OrderSubmissionPort>,
    aggregator: InvoiceAggregator,
    activity: ActivityFeed,
}

impl OrderDesk {
    pub fn new(
        catalog: Arc<dyn MenuCatalogPort>,
        orders: Arc<dyn OrderSubmissionPort>,
        aggregator: InvoiceAggregator,
        activity: ActivityFeed,
    ) -> Self {
        Self {
            catalog,
            orders,
            aggregator,
            activity,
        }
    }

    /// Builds a desk from configuration
    ///
    /// # Errors
    ///
    /// `Configuration` or `InvalidCouponRate` if the tax rate or a coupon
    /// in `config` is out of range.
    pub fn from_config(
        config: &OrderingConfig,
        catalog: Arc<dyn MenuCatalogPort>,
        orders: Arc<dyn OrderSubmissionPort>,
    ) -> Result<Self, OrderingError> {
        let aggregator = InvoiceAggregator::new(config.pricing_policy()?, Arc::new(config.coupon_table()?));
        Ok(Self::new(
            catalog,
            orders,
            aggregator,
            ActivityFeed::with_capacity(config.activity_capacity),
        ))
    }

    /// Looks up a menu item and adds it to the invoice
    ///
    /// # Errors
    ///
    /// - `Port(NotFound)` if the catalog has no such item
    /// - `ItemUnavailable` if the item is switched off
    /// - anything [`InvoiceAggregator::add_item`] rejects
    #[instrument(skip(self))]
    pub async fn add_menu_item(&mut self, id: MenuItemId, quantity: u32) -> Result<(), OrderingError> {
        let item = self.catalog.get_item(id).await?;
        if !item.active {
            warn!(item = %id, "Rejected add of unavailable item");
            return Err(OrderingError::ItemUnavailable(id));
        }
        self.aggregator.add_item(&item, quantity)
    }

    pub fn aggregator(&self) -> &InvoiceAggregator {
        &self.aggregator
    }

    /// Direct access for quantity, note, coupon and removal changes
    pub fn aggregator_mut(&mut self) -> &mut InvoiceAggregator {
        &mut self.aggregator
    }

    /// Hands the current invoice to the kitchen
    ///
    /// The invoice is cleared only once the submission port has accepted
    /// it; if the port fails, the cart is left as it was so the caller can
    /// retry.
    ///
    /// # Errors
    ///
    /// - `NoActiveInvoice` if the cart is empty
    /// - `Port` if the submission port fails
    #[instrument(skip(self))]
    pub async fn submit(&mut self, channel: OrderChannel) -> Result<OrderReceipt, OrderingError> {
        let invoice = self.aggregator.snapshot().ok_or(OrderingError::NoActiveInvoice)?;
        let invoice_id = invoice.id();
        let total = invoice.total();

        let order_id = match self.orders.submit(OrderSubmission::new(invoice, channel)).await {
            Ok(order_id) => order_id,
            Err(err) => {
                warn!(invoice = %invoice_id, error = %err, "Order submission failed, invoice kept");
                return Err(err.into());
            }
        };

        self.activity.record(
            format!("Generated invoice #{} for {}", invoice_id.short_ref(), total),
            ActivityKind::Bill,
        );
        self.aggregator.clear();

        info!(order = %order_id, invoice = %invoice_id, %total, "Order submitted");
        Ok(OrderReceipt {
            order_id,
            invoice_id,
            total,
            channel,
        })
    }

    /// Recent activity, newest first
    pub fn activities(&self) -> &ActivityFeed {
        &self.activity
    }

    /// Records a free-form event, e.g. a table being cleaned
    pub fn record_activity(&mut self, message: impl Into<String>, kind: ActivityKind) {
        self.activity.record(message, kind);
    }
}

impl fmt::Debug for OrderDesk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrderDesk")
            .field("aggregator", &self.aggregator)
            .field("activity", &self.activity.len())
            .finish_non_exhaustive()
    }
}
