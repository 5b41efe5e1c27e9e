use std::fmt::Debug;

use log::*;

use crate::{
    db_types::{Order, OrderStatusType},
    events::{EventProducers, OrderCreatedEvent, OrderUpdatedEvent},
    order_objects::{OrderSubmission, OrderValidationError},
    traits::{OrderFlowError, OrderManagement},
};

/// `OrderFlowApi` is the primary API for taking in customer orders and for admin-driven status changes.
///
/// Every successful mutation publishes exactly one event through the configured producers, carrying the order as
/// re-read from the store after the commit. Failed mutations publish nothing.
pub struct OrderFlowApi<B> {
    db: B,
    producers: EventProducers,
}

impl<B> Debug for OrderFlowApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "OrderFlowApi")
    }
}

impl<B> OrderFlowApi<B> {
    pub fn new(db: B, producers: EventProducers) -> Self {
        Self { db, producers }
    }
}

impl<B> OrderFlowApi<B>
where B: OrderManagement
{
    /// Takes a raw customer submission through normalization, atomic insertion and the created-order hook.
    ///
    /// Validation happens entirely before the store is touched: a submission that normalizes to no items fails
    /// here and persists nothing.
    pub async fn submit_order(&self, submission: OrderSubmission) -> Result<Order, OrderFlowError> {
        let new_order = submission.normalize()?;
        let order = self.db.create_order(new_order).await?;
        debug!("🍽️📦️ Order #{} stored with {} items, total {}", order.id, order.items.len(), order.total);
        self.call_order_created_hook(&order).await;
        Ok(order)
    }

    /// Changes the status of an order.
    ///
    /// `order_id` must be positive and `status` must name one of the four known statuses (matched
    /// case-insensitively). Beyond that, any status may be set from any other status; transition legality is
    /// convention, not enforcement.
    pub async fn set_order_status(&self, order_id: i64, status: &str) -> Result<Order, OrderFlowError> {
        if order_id <= 0 {
            return Err(OrderValidationError::InvalidOrderId(order_id).into());
        }
        let status = status.parse::<OrderStatusType>()?;
        let order = self.db.update_order_status(order_id, status).await?;
        debug!("🍽️🔄️ Order #{} moved to {}", order.id, order.status);
        self.call_order_updated_hook(&order).await;
        Ok(order)
    }

    pub async fn order(&self, order_id: i64) -> Result<Option<Order>, OrderFlowError> {
        self.db.fetch_order(order_id).await
    }

    /// All orders, newest first.
    pub async fn orders(&self) -> Result<Vec<Order>, OrderFlowError> {
        self.db.fetch_orders().await
    }

    async fn call_order_created_hook(&self, order: &Order) {
        for emitter in &self.producers.order_created_producer {
            trace!("🍽️📦️ Notifying order created hook subscribers");
            emitter.publish_event(OrderCreatedEvent::new(order.clone())).await;
        }
    }

    async fn call_order_updated_hook(&self, order: &Order) {
        for emitter in &self.producers.order_updated_producer {
            trace!("🍽️🔄️ Notifying order updated hook subscribers");
            emitter.publish_event(OrderUpdatedEvent::new(order.clone())).await;
        }
    }
}
