use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::{Category, Product, Review};

#[derive(Debug, Deserialize, Validate)]
pub struct CreateProductRequest {
    #[validate(length(min = 1, max = 200, message = "name must be 1 to 200 characters"))]
    pub name: String,
    #[validate(length(max = 600, message = "description cannot exceed 600 characters"))]
    pub description: String,
    pub price: Decimal,
    pub category_id: Option<i32>,
    #[validate(length(min = 1, max = 100, message = "image path must be 1 to 100 characters"))]
    pub image: Option<String>,
}

/// Partial update. For `category_id` and `image`, `Some(None)` clears the
/// field and `None` leaves it untouched.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateProductRequest {
    #[validate(length(min = 1, max = 200, message = "name must be 1 to 200 characters"))]
    pub name: Option<String>,
    #[validate(length(max = 600, message = "description cannot exceed 600 characters"))]
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub category_id: Option<Option<i32>>,
    #[validate(length(min = 1, max = 100, message = "image path must be 1 to 100 characters"))]
    pub image: Option<Option<String>>,
}

/// Everything the product detail page shows.
#[derive(Debug, Serialize)]
pub struct ProductDetail {
    pub product: Product,
    pub category: Option<Category>,
    pub reviews: Vec<Review>,
}
