use crate::db::StorageError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Default, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    pub stock: i32,
    pub location: String,
    pub rating: f64,
    pub created_by: Uuid, // owner, taken from the authenticated user
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Field invariants re-checked on the merged entity before it is written.
    pub fn invariants(&self) -> Result<(), StorageError> {
        if self.name.trim().is_empty() {
            return Err(StorageError::Validation {
                field: "name",
                message: "Please provide a product name".to_string(),
            });
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(StorageError::Validation {
                field: "price",
                message: "price must be a non-negative number".to_string(),
            });
        }
        if self.stock < 0 {
            return Err(StorageError::Validation {
                field: "stock",
                message: "stock must be a non-negative integer".to_string(),
            });
        }
        if !self.rating.is_finite() || !(0.0..=5.0).contains(&self.rating) {
            return Err(StorageError::Validation {
                field: "rating",
                message: "rating must be between 0 and 5".to_string(),
            });
        }

        Ok(())
    }
}
