//! Order submission and order history
//!
//! Finalising an order means handing a consistent [`Invoice`] snapshot to
//! an [`OrderSubmissionPort`], which answers with an [`OrderId`]. Retries
//! and delivery guarantees belong to the adapter, not to the ordering core.
//!
//! [`InMemoryOrderHistory`] is the in-process adapter: it keeps every
//! submitted order and lets the kitchen move it through its statuses.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{info, instrument};

use core_kernel::{DomainPort, OrderId, PortError};

use crate::invoice::Invoice;

/// Where an order was placed from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OrderChannel {
    /// Customer ordering from the QR menu
    Customer,
    /// Waiter taking the order at a table
    Waiter { table_number: u32 },
}

/// A finalised invoice on its way to the kitchen
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderSubmission {
    pub invoice: Invoice,
    pub channel: OrderChannel,
    pub submitted_at: DateTime<Utc>,
}

impl OrderSubmission {
    pub fn new(invoice: Invoice, channel: OrderChannel) -> Self {
        Self {
            invoice,
            channel,
            submitted_at: Utc::now(),
        }
    }
}

/// Kitchen progress of a submitted order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Preparing,
    Ready,
    Delivered,
}

impl OrderStatus {
    /// Statuses only move forward one step at a time
    pub fn can_transition_to(&self, target: OrderStatus) -> bool {
        use OrderStatus::*;
        matches!(
            (self, target),
            (Pending, Preparing) | (Preparing, Ready) | (Ready, Delivered)
        )
    }

    pub fn is_open(&self) -> bool {
        !matches!(self, OrderStatus::Delivered)
    }
}

/// A submission as recorded by the history
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubmittedOrder {
    pub id: OrderId,
    pub submission: OrderSubmission,
    pub status: OrderStatus,
    pub updated_at: DateTime<Utc>,
}

/// Port for handing off finalised orders
#[async_trait]
pub trait OrderSubmissionPort: DomainPort {
    /// Accepts a submission and returns its order id
    async fn submit(&self, submission: OrderSubmission) -> Result<OrderId, PortError>;
}

/// Port for reading back submitted orders and progressing them
#[async_trait]
pub trait OrderHistoryPort: OrderSubmissionPort {
    /// All orders, oldest first
    async fn list_orders(&self) -> Result<Vec<SubmittedOrder>, PortError>;

    /// Retrieves one order
    async fn get_order(&self, id: OrderId) -> Result<SubmittedOrder, PortError>;

    /// Moves an order to the next kitchen status
    ///
    /// # Errors
    ///
    /// - `PortError::NotFound` for an unknown order
    /// - `PortError::Conflict` if the transition is not allowed
    async fn update_status(&self, id: OrderId, status: OrderStatus) -> Result<SubmittedOrder, PortError>;

    /// Orders the kitchen still has to finish, oldest first
    async fn kitchen_queue(&self) -> Result<Vec<SubmittedOrder>, PortError> {
        Ok(self
            .list_orders()
            .await?
            .into_iter()
            .filter(|order| order.status.is_open())
            .collect())
    }
}

/// Order history held in process memory
///
/// Order ids are time-ordered, so iteration order is submission order.
#[derive(Debug, Default)]
pub struct InMemoryOrderHistory {
    orders: RwLock<BTreeMap<OrderId, SubmittedOrder>>,
}

impl InMemoryOrderHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.orders.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.orders.read().await.is_empty()
    }
}

impl DomainPort for InMemoryOrderHistory {}

#[async_trait]
impl OrderSubmissionPort for InMemoryOrderHistory {
    #[instrument(skip(self, submission), fields(invoice = %submission.invoice.id()))]
    async fn submit(&self, submission: OrderSubmission) -> Result<OrderId, PortError> {
        let id = OrderId::new();
        let order = SubmittedOrder {
            id,
            updated_at: submission.submitted_at,
            submission,
            status: OrderStatus::Pending,
        };
        self.orders.write().await.insert(id, order);

        info!(order = %id, "Order recorded");
        Ok(id)
    }
}

#[async_trait]
impl OrderHistoryPort for InMemoryOrderHistory {
    async fn list_orders(&self) -> Result<Vec<SubmittedOrder>, PortError> {
        Ok(self.orders.read().await.values().cloned().collect())
    }

    async fn get_order(&self, id: OrderId) -> Result<SubmittedOrder, PortError> {
        self.orders
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| PortError::not_found("Order", id))
    }

    #[instrument(skip(self))]
    async fn update_status(&self, id: OrderId, status: OrderStatus) -> Result<SubmittedOrder, PortError> {
        let mut orders = self.orders.write().await;
        let order = orders
            .get_mut(&id)
            .ok_or_else(|| PortError::not_found("Order", id))?;

        if !order.status.can_transition_to(status) {
            return Err(PortError::conflict(format!(
                "order {} cannot move from {:?} to {:?}",
                id, order.status, status
            )));
        }
        order.status = status;
        order.updated_at = Utc::now();

        info!(order = %id, ?status, "Order status updated");
        Ok(order.clone())
    }
}
