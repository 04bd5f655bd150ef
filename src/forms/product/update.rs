use crate::models;
use serde::{Deserialize, Serialize};
use serde_valid::Validate;

#[derive(Serialize, Deserialize, Debug, Default, Validate)]
pub struct UpdateProduct {
    #[validate(min_length = 1)]
    pub name: Option<String>,
    pub description: Option<String>,
    #[validate(minimum = 0.0)]
    pub price: Option<f64>,
    #[validate(min_length = 1)]
    pub category: Option<String>,
    #[validate(minimum = 0)]
    pub stock: Option<i32>,
    pub location: Option<String>,
    #[validate(minimum = 0.0)]
    #[validate(maximum = 5.0)]
    pub rating: Option<f64>,
}

impl UpdateProduct {
    pub fn update(self, product: &mut models::Product) {
        if let Some(name) = self.name {
            product.name = name;
        }
        if let Some(description) = self.description {
            product.description = description;
        }
        if let Some(price) = self.price {
            product.price = price;
        }
        if let Some(category) = self.category {
            product.category = category;
        }
        if let Some(stock) = self.stock {
            product.stock = stock;
        }
        if let Some(location) = self.location {
            product.location = location;
        }
        if let Some(rating) = self.rating {
            product.rating = rating;
        }
    }
}
