use sqlx::SqliteConnection;

use crate::db_types::Admin;

pub async fn fetch_admin_by_username(
    username: &str,
    conn: &mut SqliteConnection,
) -> Result<Option<Admin>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM admins WHERE username = $1").bind(username).fetch_optional(conn).await
}

/// Idempotent bootstrap insert. Returns `true` when a row was actually created.
pub async fn insert_admin_if_absent(
    username: &str,
    password_hash: &str,
    conn: &mut SqliteConnection,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        "INSERT INTO admins (username, password_hash) VALUES ($1, $2) ON CONFLICT (username) DO NOTHING",
    )
    .bind(username)
    .bind(password_hash)
    .execute(conn)
    .await?;
    Ok(result.rows_affected() > 0)
}
