#![allow(dead_code)]

use rust_decimal::Decimal;
use sea_orm::DatabaseConnection;
use storefront::{
    db::{create_orm_conn, run_migrations},
    dto::{categories::CategoryRequest, products::CreateProductRequest, reviews::CreateReviewRequest},
    models::{Category, Product, Review},
    services::{category_service, product_service, review_service},
};

/// Fresh in-memory database with the schema applied. One connection only:
/// each SQLite memory connection is its own database.
pub async fn setup_db() -> anyhow::Result<DatabaseConnection> {
    let orm = create_orm_conn("sqlite::memory:", 1).await?;
    run_migrations(&orm).await?;
    Ok(orm)
}

pub async fn category(db: &DatabaseConnection, name: &str) -> anyhow::Result<Category> {
    let category = category_service::create_category(
        db,
        CategoryRequest {
            name: name.to_string(),
        },
    )
    .await?;
    Ok(category)
}

pub async fn product(
    db: &DatabaseConnection,
    name: &str,
    price: Decimal,
    category_id: Option<i32>,
) -> anyhow::Result<Product> {
    let product = product_service::create_product(
        db,
        CreateProductRequest {
            name: name.to_string(),
            description: format!("{name} description"),
            price,
            category_id,
            image: None,
        },
    )
    .await?;
    Ok(product)
}

pub async fn review(
    db: &DatabaseConnection,
    product_id: i32,
    stars: i32,
    text: &str,
) -> anyhow::Result<Review> {
    let review = review_service::create_review(
        db,
        CreateReviewRequest {
            product_id,
            stars,
            text: text.to_string(),
        },
    )
    .await?;
    Ok(review)
}
