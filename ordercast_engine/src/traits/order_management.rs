use thiserror::Error;

use crate::{
    db_types::{NewOrder, Order, OrderStatusType},
    order_objects::OrderValidationError,
};

/// Order storage behaviour.
///
/// `create_order` must be atomic: the order row and every item row land in a single transaction, so no reader ever
/// observes an order with a partial item set. Both mutating calls return the order as re-read through the read
/// path, items attached in insertion order.
#[allow(async_fn_in_trait)]
pub trait OrderManagement {
    /// Inserts the order and its items in one transaction and returns the stored order, items included.
    async fn create_order(&self, order: NewOrder) -> Result<Order, OrderFlowError>;

    /// Sets the status (and refreshes `updated_at`) of the given order, returning the updated order.
    /// Fails with [`OrderFlowError::OrderNotFound`] when the id matches no row.
    async fn update_order_status(&self, id: i64, status: OrderStatusType) -> Result<Order, OrderFlowError>;

    /// Fetches a single order with its items, or `None`.
    async fn fetch_order(&self, id: i64) -> Result<Option<Order>, OrderFlowError>;

    /// Fetches all orders, newest first, each with its items attached.
    async fn fetch_orders(&self) -> Result<Vec<Order>, OrderFlowError>;
}

#[derive(Debug, Clone, Error)]
pub enum OrderFlowError {
    #[error("Invalid order payload: {0}")]
    Validation(#[from] OrderValidationError),
    #[error("Order {0} does not exist")]
    OrderNotFound(i64),
    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl From<sqlx::Error> for OrderFlowError {
    fn from(e: sqlx::Error) -> Self {
        Self::DatabaseError(e.to_string())
    }
}
