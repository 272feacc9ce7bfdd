use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use tracing::info;

use crate::{
    db,
    error::AppResult,
    models::{AvailabilityUpdate, Product, ProductQuery},
    AppState,
};

// ── List / search ─────────────────────────────────────────────────────────────

/// Serves both the plain listing and the search/sort endpoint: with no query
/// parameters the filter matches everything and order falls back to title
/// ascending.
pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ProductQuery>,
) -> AppResult<(StatusCode, Json<Vec<Product>>)> {
    let products = db::search_products(&state.db, &query).await?;

    info!(
        count = products.len(),
        search = query.search.as_deref().unwrap_or(""),
        "Listed products"
    );

    Ok((StatusCode::OK, Json(products)))
}

// ── Delete by title ───────────────────────────────────────────────────────────

pub async fn delete_product(
    State(state): State<AppState>,
    Path(title): Path<String>,
) -> AppResult<(StatusCode, Json<serde_json::Value>)> {
    db::delete_product_by_title(&state.db, &title).await?;

    info!(title = %title, "Deleted product");

    Ok((
        StatusCode::OK,
        Json(serde_json::json!({ "message": "Product deleted successfully" })),
    ))
}

// ── Availability update ───────────────────────────────────────────────────────

pub async fn update_availability(
    State(state): State<AppState>,
    Json(payload): Json<AvailabilityUpdate>,
) -> AppResult<(StatusCode, Json<serde_json::Value>)> {
    db::apply_availability_update(&state.db, &payload.products).await?;

    info!(items = payload.products.len(), "Updated product availability");

    Ok((
        StatusCode::OK,
        Json(serde_json::json!({
            "message": "Product availability updated successfully"
        })),
    ))
}
