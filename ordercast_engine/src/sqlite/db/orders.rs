use log::trace;
use sqlx::SqliteConnection;

use crate::db_types::{NewOrder, NewOrderItem, Order, OrderItem, OrderStatusType};

/// Inserts the bare order row and returns its id. This is not atomic on its own; `create_order` on the backend
/// wraps it, together with the item inserts, in a single transaction by passing `&mut *tx` as the connection.
pub async fn insert_order(order: &NewOrder, conn: &mut SqliteConnection) -> Result<i64, sqlx::Error> {
    let (id,): (i64,) = sqlx::query_as(
        r#"
            INSERT INTO orders (customer_name, table_no, note, status, total)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id;
        "#,
    )
    .bind(&order.customer_name)
    .bind(&order.table_no)
    .bind(&order.note)
    .bind(OrderStatusType::Pending.to_string())
    .bind(order.total.value())
    .fetch_one(conn)
    .await?;
    Ok(id)
}

/// Inserts one line item for the given order. Items are inserted one at a time, in submission order, so that
/// ascending item ids reproduce the order the customer sent.
pub async fn insert_order_item(
    order_id: i64,
    item: &NewOrderItem,
    conn: &mut SqliteConnection,
) -> Result<i64, sqlx::Error> {
    let (id,): (i64,) = sqlx::query_as(
        r#"
            INSERT INTO order_items (order_id, name, price, qty, image)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id;
        "#,
    )
    .bind(order_id)
    .bind(&item.name)
    .bind(item.price.value())
    .bind(item.qty)
    .bind(&item.image)
    .fetch_one(conn)
    .await?;
    Ok(id)
}

/// The read path: order row first, then its items in insertion order, attached to the result.
pub async fn fetch_order_by_id(id: i64, conn: &mut SqliteConnection) -> Result<Option<Order>, sqlx::Error> {
    let order: Option<Order> =
        sqlx::query_as("SELECT * FROM orders WHERE id = $1").bind(id).fetch_optional(&mut *conn).await?;
    match order {
        Some(mut order) => {
            order.items = fetch_items_for_order(order.id, conn).await?;
            Ok(Some(order))
        },
        None => Ok(None),
    }
}

pub async fn fetch_items_for_order(order_id: i64, conn: &mut SqliteConnection) -> Result<Vec<OrderItem>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM order_items WHERE order_id = $1 ORDER BY id ASC")
        .bind(order_id)
        .fetch_all(conn)
        .await
}

/// All orders, newest first, with the per-order item fetch of the read path applied to each.
pub async fn fetch_all_orders(conn: &mut SqliteConnection) -> Result<Vec<Order>, sqlx::Error> {
    let mut orders: Vec<Order> =
        sqlx::query_as("SELECT * FROM orders ORDER BY id DESC").fetch_all(&mut *conn).await?;
    trace!("📝️ Fetched {} orders", orders.len());
    for order in &mut orders {
        order.items = fetch_items_for_order(order.id, &mut *conn).await?;
    }
    Ok(orders)
}

/// Returns the id on success, `None` when no row matched.
pub async fn update_order_status(
    id: i64,
    status: OrderStatusType,
    conn: &mut SqliteConnection,
) -> Result<Option<i64>, sqlx::Error> {
    let row: Option<(i64,)> =
        sqlx::query_as("UPDATE orders SET status = $1, updated_at = CURRENT_TIMESTAMP WHERE id = $2 RETURNING id")
            .bind(status.to_string())
            .bind(id)
            .fetch_optional(conn)
            .await?;
    Ok(row.map(|(id,)| id))
}
