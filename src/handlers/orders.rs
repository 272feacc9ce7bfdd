use axum::{extract::State, http::StatusCode, Json};
use tracing::info;

use crate::{db, error::AppResult, models::CreateOrder, AppState};

pub async fn create_order(
    State(state): State<AppState>,
    Json(payload): Json<CreateOrder>,
) -> AppResult<(StatusCode, Json<serde_json::Value>)> {
    payload.validate()?;

    let order = db::insert_order(&state.db, &payload).await?;

    info!(
        id = %order.id,
        courses = order.courses.len(),
        "Created order"
    );

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "message": "Order created successfully",
            "orderId": order.id,
        })),
    ))
}
