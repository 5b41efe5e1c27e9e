use std::{fmt::Display, str::FromStr};

use chrono::{DateTime, Utc};
use oc_common::Money;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};

use crate::order_objects::OrderValidationError;

//--------------------------------------       Admin        ----------------------------------------------------------
/// A staff account. Seeded once at bootstrap; the stored hash is a PHC string produced by
/// [`crate::helpers::hash_password`].
#[derive(Debug, Clone, FromRow)]
pub struct Admin {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

//--------------------------------------   OrderStatusType   ---------------------------------------------------------
/// The lifecycle stage of an order. `Pending` is set at creation only; every other value is admin-driven.
///
/// Any status may be set from any other status. The flow `pending → preparing → served` (with `cancelled` as the
/// escape hatch) is convention, not a constraint; see DESIGN.md for why this stays permissive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Type, Serialize, Deserialize)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum OrderStatusType {
    Pending,
    Preparing,
    Served,
    Cancelled,
}

impl Display for OrderStatusType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderStatusType::Pending => write!(f, "pending"),
            OrderStatusType::Preparing => write!(f, "preparing"),
            OrderStatusType::Served => write!(f, "served"),
            OrderStatusType::Cancelled => write!(f, "cancelled"),
        }
    }
}

impl FromStr for OrderStatusType {
    type Err = OrderValidationError;

    /// Case-insensitive; the canonical (stored and serialized) form is lowercase.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(OrderStatusType::Pending),
            "preparing" => Ok(OrderStatusType::Preparing),
            "served" => Ok(OrderStatusType::Served),
            "cancelled" => Ok(OrderStatusType::Cancelled),
            _ => Err(OrderValidationError::InvalidStatus(s.to_string())),
        }
    }
}

//--------------------------------------       Order        ----------------------------------------------------------
/// A customer order with its line items attached. `total` equals the sum of `price * qty` over the items as they
/// were at creation time. Items are ordered by insertion, which matches submission order.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: i64,
    pub customer_name: String,
    pub table_no: String,
    pub note: String,
    pub status: OrderStatusType,
    pub total: Money,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[sqlx(skip)]
    #[serde(default)]
    pub items: Vec<OrderItem>,
}

//--------------------------------------     OrderItem      ----------------------------------------------------------
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub id: i64,
    pub order_id: i64,
    pub name: String,
    pub price: Money,
    pub qty: i64,
    pub image: Option<String>,
}

//--------------------------------------      NewOrder      ----------------------------------------------------------
/// A fully normalized order, ready for insertion. Produced exclusively by
/// [`crate::order_objects::OrderSubmission::normalize`], which guarantees the invariants: at least one item, every
/// item named, prices and total non-negative, quantities within 1..=99.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub customer_name: String,
    pub table_no: String,
    pub note: String,
    pub total: Money,
    pub items: Vec<NewOrderItem>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewOrderItem {
    pub name: String,
    pub price: Money,
    pub qty: i64,
    pub image: Option<String>,
}
