use crate::models;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::convert::From;
use uuid::Uuid;

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Owner {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

/// Product detail with the owner reference resolved to a name/email
/// projection.
#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Detail {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    pub stock: i32,
    pub location: String,
    pub rating: f64,
    pub created_by: Owner,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<(models::Product, models::OwnerSummary)> for Detail {
    fn from((product, owner): (models::Product, models::OwnerSummary)) -> Self {
        Self {
            id: product.id,
            name: product.name,
            description: product.description,
            price: product.price,
            category: product.category,
            stock: product.stock,
            location: product.location,
            rating: product.rating,
            created_by: Owner {
                id: product.created_by,
                name: owner.name,
                email: owner.email,
            },
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }
}
