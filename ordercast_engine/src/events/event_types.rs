use serde::{Deserialize, Serialize};

use crate::db_types::Order;

/// Fired after a customer order has been committed and re-read. The payload is the stored order, items included,
/// exactly as a read through the API would return it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderCreatedEvent {
    pub order: Order,
}

impl OrderCreatedEvent {
    pub fn new(order: Order) -> Self {
        Self { order }
    }
}

/// Fired after an admin-driven status change has been committed and re-read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderUpdatedEvent {
    pub order: Order,
}

impl OrderUpdatedEvent {
    pub fn new(order: Order) -> Self {
        Self { order }
    }
}
