//! `SqliteDatabase` is the concrete storage backend of the OrderCast engine.
//!
//! Unsurprisingly, it uses SQLite, and implements the traits defined in the [`crate::traits`] module. Atomicity
//! for multi-row writes comes entirely from SQLite transactions; there is no application-level locking. Dropping
//! an uncommitted transaction rolls it back best-effort without masking the error that got us there.

use std::fmt::Debug;

use log::*;
use sqlx::SqlitePool;

use super::db::{admins, new_pool, orders};
use crate::{
    db_types::{Admin, NewOrder, Order, OrderStatusType},
    traits::{AdminManagement, AuthApiError, OrderFlowError, OrderManagement},
};

#[derive(Clone)]
pub struct SqliteDatabase {
    url: String,
    pool: SqlitePool,
}

impl Debug for SqliteDatabase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "SqliteDatabase ({:?})", self.pool)
    }
}

impl SqliteDatabase {
    pub async fn new_with_url(url: &str, max_connections: u32) -> Result<Self, sqlx::Error> {
        let pool = new_pool(url, max_connections).await?;
        Ok(Self { url: url.to_string(), pool })
    }

    pub fn url(&self) -> &str {
        self.url.as_str()
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

impl OrderManagement for SqliteDatabase {
    /// The order row and every item row are written inside one transaction, items strictly in submission order.
    /// Readers see either the complete order or nothing.
    async fn create_order(&self, order: NewOrder) -> Result<Order, OrderFlowError> {
        let mut tx = self.pool.begin().await?;
        let id = orders::insert_order(&order, &mut tx).await?;
        for item in &order.items {
            orders::insert_order_item(id, item, &mut tx).await?;
        }
        tx.commit().await?;
        debug!("🗃️ Order #{id} committed with {} items", order.items.len());
        let mut conn = self.pool.acquire().await?;
        orders::fetch_order_by_id(id, &mut conn).await?.ok_or(OrderFlowError::OrderNotFound(id))
    }

    async fn update_order_status(&self, id: i64, status: OrderStatusType) -> Result<Order, OrderFlowError> {
        let mut conn = self.pool.acquire().await?;
        let id = orders::update_order_status(id, status, &mut conn)
            .await?
            .ok_or(OrderFlowError::OrderNotFound(id))?;
        debug!("🗃️ Order #{id} status set to {status}");
        orders::fetch_order_by_id(id, &mut conn).await?.ok_or(OrderFlowError::OrderNotFound(id))
    }

    async fn fetch_order(&self, id: i64) -> Result<Option<Order>, OrderFlowError> {
        let mut conn = self.pool.acquire().await?;
        Ok(orders::fetch_order_by_id(id, &mut conn).await?)
    }

    async fn fetch_orders(&self) -> Result<Vec<Order>, OrderFlowError> {
        let mut conn = self.pool.acquire().await?;
        Ok(orders::fetch_all_orders(&mut conn).await?)
    }
}

impl AdminManagement for SqliteDatabase {
    async fn fetch_admin_by_username(&self, username: &str) -> Result<Option<Admin>, AuthApiError> {
        let mut conn = self.pool.acquire().await?;
        Ok(admins::fetch_admin_by_username(username, &mut conn).await?)
    }

    async fn insert_admin_if_absent(&self, username: &str, password_hash: &str) -> Result<bool, AuthApiError> {
        let mut conn = self.pool.acquire().await?;
        Ok(admins::insert_admin_if_absent(username, password_hash, &mut conn).await?)
    }
}
