use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use crate::entity::{categories, orders::OrderStatus, products, reviews};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Category {
    pub id: i32,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub image: Option<String>,
    pub price: Decimal,
    pub category_id: Option<i32>,
    /// Mean of the product's review stars, `0.0` when it has none.
    pub average_rating: f64,
}

/// The slice of a product shown on an order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductSummary {
    pub id: i32,
    pub name: String,
    pub price: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Review {
    pub id: i32,
    pub stars: i32,
    pub text: String,
    pub product_id: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Order {
    pub id: Uuid,
    pub placed: NaiveDate,
    pub status: OrderStatus,
    /// Sum of the current prices of the order's products.
    pub total: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogSummary {
    pub num_products: u64,
    pub num_reviews: u64,
}

impl From<categories::Model> for Category {
    fn from(model: categories::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
        }
    }
}

impl From<reviews::Model> for Review {
    fn from(model: reviews::Model) -> Self {
        Self {
            id: model.id,
            stars: model.stars,
            text: model.text,
            product_id: model.product_id,
        }
    }
}

impl From<products::Model> for ProductSummary {
    fn from(model: products::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            price: normalize_price(model.price),
        }
    }
}

/// Prices are stored with two decimal places; some backends hand them back
/// through a float, so reads are rounded back onto the column's scale.
pub(crate) fn normalize_price(price: Decimal) -> Decimal {
    price.round_dp(2)
}
