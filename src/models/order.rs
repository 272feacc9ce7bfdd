use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{AppError, AppResult};

/// A placed order. Immutable once created; there is no update or delete
/// endpoint.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: Uuid,
    /// Client-supplied reference, when the caller chose to send one.
    pub order_id: Option<String>,
    pub name: String,
    pub surname: String,
    pub phone: String,
    pub total_price: f64,
    pub courses: Vec<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrder {
    pub order_id: Option<String>,
    pub name: String,
    pub surname: String,
    pub phone: String,
    pub total_price: f64,
    pub courses: Vec<String>,
}

impl CreateOrder {
    /// Presence checks beyond what deserialization enforces: non-blank
    /// contact fields and at least one purchased item.
    pub fn validate(&self) -> AppResult<()> {
        for (field, value) in [
            ("name", &self.name),
            ("surname", &self.surname),
            ("phone", &self.phone),
        ] {
            if value.trim().is_empty() {
                return Err(AppError::BadRequest(format!("{field} must not be empty")));
            }
        }
        if self.courses.is_empty() {
            return Err(AppError::BadRequest(
                "courses must be a non-empty array".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> CreateOrder {
        CreateOrder {
            order_id: None,
            name: "Ada".to_string(),
            surname: "Lovelace".to_string(),
            phone: "07000000000".to_string(),
            total_price: 49.99,
            courses: vec!["Widget".to_string()],
        }
    }

    #[test]
    fn valid_payload_passes() {
        assert!(valid().validate().is_ok());
    }

    #[test]
    fn blank_name_is_rejected() {
        let mut order = valid();
        order.name = "   ".to_string();
        assert!(matches!(
            order.validate().unwrap_err(),
            AppError::BadRequest(_)
        ));
    }

    #[test]
    fn empty_courses_is_rejected() {
        let mut order = valid();
        order.courses.clear();
        assert!(matches!(
            order.validate().unwrap_err(),
            AppError::BadRequest(_)
        ));
    }

    #[test]
    fn missing_required_field_fails_deserialization() {
        let body = serde_json::json!({
            "name": "Ada",
            "surname": "Lovelace",
            "totalPrice": 49.99,
            "courses": ["Widget"]
        });
        assert!(serde_json::from_value::<CreateOrder>(body).is_err());
    }

    #[test]
    fn non_array_courses_fails_deserialization() {
        let body = serde_json::json!({
            "name": "Ada",
            "surname": "Lovelace",
            "phone": "07000000000",
            "totalPrice": 49.99,
            "courses": "Widget"
        });
        assert!(serde_json::from_value::<CreateOrder>(body).is_err());
    }

    #[test]
    fn order_id_is_optional() {
        let body = serde_json::json!({
            "name": "Ada",
            "surname": "Lovelace",
            "phone": "07000000000",
            "totalPrice": 49.99,
            "courses": ["Widget", "Gadget"]
        });
        let order: CreateOrder = serde_json::from_value(body).unwrap();
        assert!(order.order_id.is_none());
        assert_eq!(order.courses.len(), 2);
    }
}
