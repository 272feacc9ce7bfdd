use chrono::Utc;
use sqlx::PgPool;
use tracing::warn;

use crate::error::{AppError, AppResult};
use crate::models::*;

// ── Products ──────────────────────────────────────────────────────────────────

/// Lists products, optionally filtered by a case-insensitive substring over
/// title, description and location. The ORDER BY fragment comes from the
/// whitelist in [`ProductQuery::order_by`], never from raw client input.
pub async fn search_products(pool: &PgPool, query: &ProductQuery) -> AppResult<Vec<Product>> {
    let order_by = query.order_by()?;

    let sql = format!(
        r#"
        SELECT id, title, description, location, available_inventory, created_at, updated_at
        FROM products
        WHERE ($1::text IS NULL
               OR title ILIKE '%' || $1 || '%'
               OR description ILIKE '%' || $1 || '%'
               OR location ILIKE '%' || $1 || '%')
        ORDER BY {order_by}
        "#
    );

    let products = sqlx::query_as::<_, Product>(&sql)
        .bind(query.search.as_deref())
        .fetch_all(pool)
        .await?;

    Ok(products)
}

pub async fn delete_product_by_title(pool: &PgPool, title: &str) -> AppResult<()> {
    let result = sqlx::query("DELETE FROM products WHERE title = $1")
        .bind(title)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Product not found".to_string()));
    }
    Ok(())
}

/// Decrements `available_inventory` per entry inside one transaction, so a
/// mid-batch infrastructure failure rolls back every earlier decrement.
/// Titles matching no product are logged and skipped without failing the
/// batch. No floor is applied; inventory may go negative.
pub async fn apply_availability_update(
    pool: &PgPool,
    items: &[AvailabilityItem],
) -> AppResult<()> {
    let mut tx = pool.begin().await?;

    for item in items {
        let result = sqlx::query(
            "UPDATE products
             SET available_inventory = available_inventory - $1,
                 updated_at = $2
             WHERE title = $3",
        )
        .bind(item.quantity)
        .bind(Utc::now())
        .bind(&item.title)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            warn!(title = %item.title, "availability update matched no product");
        }
    }

    tx.commit().await?;
    Ok(())
}

// ── Orders ────────────────────────────────────────────────────────────────────

pub async fn insert_order(pool: &PgPool, payload: &CreateOrder) -> AppResult<Order> {
    let order = sqlx::query_as::<_, Order>(
        r#"
        INSERT INTO orders (order_id, name, surname, phone, total_price, courses)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id, order_id, name, surname, phone, total_price, courses, created_at
        "#,
    )
    .bind(payload.order_id.as_deref())
    .bind(&payload.name)
    .bind(&payload.surname)
    .bind(&payload.phone)
    .bind(payload.total_price)
    .bind(&payload.courses)
    .fetch_one(pool)
    .await?;

    Ok(order)
}
