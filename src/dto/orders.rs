use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::{Order, ProductSummary};

#[derive(Debug, Deserialize, Validate)]
pub struct CreateOrderRequest {
    /// Products to include. Repeated ids count once.
    #[validate(length(min = 1, message = "an order needs at least one product"))]
    pub product_ids: Vec<i32>,
}

#[derive(Debug, Serialize)]
pub struct OrderWithProducts {
    pub order: Order,
    pub products: Vec<ProductSummary>,
}
