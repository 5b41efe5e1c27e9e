//! Untrusted order payloads and their normalization.
//!
//! [`OrderSubmission`] is the wire shape of `POST /orders`: every field optional, numbers loosely typed. Nothing in
//! it is trusted until [`OrderSubmission::normalize`] has coerced it into a [`NewOrder`]. Normalization is a pure
//! function with no side effects, so it always runs before any storage interaction.

use oc_common::Money;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::db_types::{NewOrder, NewOrderItem};

/// Cap applied to customer and item names.
pub const MAX_NAME_LEN: usize = 120;
/// Cap applied to the table number field.
pub const MAX_TABLE_NO_LEN: usize = 32;
/// Cap applied to the free-form order note.
pub const MAX_NOTE_LEN: usize = 500;
/// Cap applied to item image references.
pub const MAX_IMAGE_LEN: usize = 2048;
/// Quantities are clamped into this range rather than rejected.
pub const QTY_RANGE: std::ops::RangeInclusive<i64> = 1..=99;

const DEFAULT_CUSTOMER_NAME: &str = "Guest";

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum OrderValidationError {
    #[error("The order contains no valid items")]
    NoItems,
    #[error("{0} is not a valid order id")]
    InvalidOrderId(i64),
    #[error("'{0}' is not a valid order status")]
    InvalidStatus(String),
}

//--------------------------------------  OrderSubmission  -----------------------------------------------------------
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSubmission {
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub table_no: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub items: Vec<RawOrderItem>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawOrderItem {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub qty: Option<f64>,
    #[serde(default)]
    pub image: Option<String>,
}

impl OrderSubmission {
    /// Coerces the submission into a [`NewOrder`], or rejects it when no usable items remain.
    ///
    /// Items without a name are dropped silently rather than failing the whole order; everything else is clamped
    /// into range. The computed total is the sum over the surviving items and is non-negative by construction.
    pub fn normalize(self) -> Result<NewOrder, OrderValidationError> {
        let customer_name = match trim_and_cap(self.customer_name, MAX_NAME_LEN) {
            Some(name) => name,
            None => DEFAULT_CUSTOMER_NAME.to_string(),
        };
        let table_no = trim_and_cap(self.table_no, MAX_TABLE_NO_LEN).unwrap_or_default();
        let note = trim_and_cap(self.note, MAX_NOTE_LEN).unwrap_or_default();
        let items = self.items.into_iter().filter_map(RawOrderItem::normalize).collect::<Vec<NewOrderItem>>();
        if items.is_empty() {
            return Err(OrderValidationError::NoItems);
        }
        let total = items.iter().map(|i| i.price * i.qty).sum();
        Ok(NewOrder { customer_name, table_no, note, total, items })
    }
}

impl RawOrderItem {
    /// `None` when the item has no usable name. Price and quantity are rounded and clamped, never rejected.
    fn normalize(self) -> Option<NewOrderItem> {
        let name = trim_and_cap(self.name, MAX_NAME_LEN)?;
        let price = Money::from_raw_clamped(self.price.unwrap_or(0.0));
        let qty = clamp_qty(self.qty.unwrap_or(1.0));
        let image = trim_and_cap(self.image, MAX_IMAGE_LEN);
        Some(NewOrderItem { name, price, qty, image })
    }
}

fn trim_and_cap(value: Option<String>, max_len: usize) -> Option<String> {
    let trimmed = value.as_deref().unwrap_or_default().trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.chars().take(max_len).collect())
}

fn clamp_qty(raw: f64) -> i64 {
    if !raw.is_finite() {
        return *QTY_RANGE.start();
    }
    #[allow(clippy::cast_possible_truncation)]
    (raw.round() as i64).clamp(*QTY_RANGE.start(), *QTY_RANGE.end())
}
