use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{AppError, AppResult};

/// Catalog entry. `title` is the natural key used by the delete and
/// availability endpoints; products are created out-of-band, never through
/// this service.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    /// Decremented by availability updates. No floor is enforced: a decrement
    /// past zero goes negative.
    pub available_inventory: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ── Request payloads ─────────────────────────────────────────────────────────

/// Body of `PUT /collections/products/update-availability`. An entry missing
/// `title` or `quantity` fails deserialization, rejecting the whole batch
/// before any write.
#[derive(Debug, Deserialize)]
pub struct AvailabilityUpdate {
    pub products: Vec<AvailabilityItem>,
}

#[derive(Debug, Deserialize)]
pub struct AvailabilityItem {
    pub title: String,
    pub quantity: i32,
}

// ── Query parameters ──────────────────────────────────────────────────────────

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ProductQuery {
    /// Case-insensitive substring matched against title, description and
    /// location.
    pub search: Option<String>,
    pub sort_key: Option<String>,
    pub sort_order: Option<String>,
}

impl ProductQuery {
    /// Resolves `sortKey`/`sortOrder` to a SQL ORDER BY fragment. The key is
    /// checked against a column whitelist since it cannot be bound as a query
    /// parameter.
    pub fn order_by(&self) -> AppResult<String> {
        let column = match self.sort_key.as_deref().unwrap_or("title") {
            "title" => "title",
            "description" => "description",
            "location" => "location",
            "availableInventory" => "available_inventory",
            "createdAt" => "created_at",
            other => {
                return Err(AppError::BadRequest(format!(
                    "Unsupported sortKey: {other}"
                )))
            }
        };

        let direction = match self.sort_order.as_deref().unwrap_or("asc") {
            "asc" => "ASC",
            "desc" => "DESC",
            other => {
                return Err(AppError::BadRequest(format!(
                    "sortOrder must be 'asc' or 'desc', got '{other}'"
                )))
            }
        };

        Ok(format!("{column} {direction}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(sort_key: Option<&str>, sort_order: Option<&str>) -> ProductQuery {
        ProductQuery {
            search: None,
            sort_key: sort_key.map(String::from),
            sort_order: sort_order.map(String::from),
        }
    }

    // ── order_by resolution ────────────────────────────────────────────────────

    #[test]
    fn defaults_to_title_ascending() {
        assert_eq!(query(None, None).order_by().unwrap(), "title ASC");
    }

    #[test]
    fn camel_case_key_maps_to_snake_case_column() {
        assert_eq!(
            query(Some("availableInventory"), Some("desc")).order_by().unwrap(),
            "available_inventory DESC"
        );
    }

    #[test]
    fn unknown_sort_key_is_rejected() {
        let err = query(Some("price; DROP TABLE products"), None)
            .order_by()
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[test]
    fn unknown_sort_order_is_rejected() {
        let err = query(Some("title"), Some("sideways")).order_by().unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    // ── payload shape ──────────────────────────────────────────────────────────

    #[test]
    fn availability_entry_missing_quantity_fails_deserialization() {
        let body = serde_json::json!({
            "products": [
                { "title": "Widget", "quantity": 2 },
                { "title": "Gadget" }
            ]
        });
        assert!(serde_json::from_value::<AvailabilityUpdate>(body).is_err());
    }

    #[test]
    fn availability_missing_products_field_fails_deserialization() {
        let body = serde_json::json!({ "items": [] });
        assert!(serde_json::from_value::<AvailabilityUpdate>(body).is_err());
    }

    #[test]
    fn availability_non_array_products_fails_deserialization() {
        let body = serde_json::json!({ "products": "Widget" });
        assert!(serde_json::from_value::<AvailabilityUpdate>(body).is_err());
    }
}
