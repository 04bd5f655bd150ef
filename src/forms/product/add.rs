use crate::models;
use serde::{Deserialize, Serialize};
use serde_valid::Validate;
use uuid::Uuid;

#[derive(Serialize, Deserialize, Debug, Validate)]
pub struct AddProduct {
    #[validate(min_length = 1)]
    pub name: String,
    pub description: String,
    #[validate(minimum = 0.0)]
    pub price: f64,
    #[validate(min_length = 1)]
    pub category: String,
    #[validate(minimum = 0)]
    pub stock: i32,
    pub location: String,
    #[validate(minimum = 0.0)]
    #[validate(maximum = 5.0)]
    pub rating: Option<f64>,
}

impl AddProduct {
    // Ownership is attributed by the service, never by the payload.
    pub fn into_product(self, user_id: Uuid) -> models::Product {
        models::Product {
            name: self.name,
            description: self.description,
            price: self.price,
            category: self.category,
            stock: self.stock,
            location: self.location,
            rating: self.rating.unwrap_or(0.0),
            created_by: user_id,
            ..models::Product::default()
        }
    }
}
