use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait};

use crate::{
    entity::{Products, Reviews},
    error::AppResult,
    models::CatalogSummary,
};

/// Counts shown on the storefront home page.
pub async fn catalog_summary(db: &DatabaseConnection) -> AppResult<CatalogSummary> {
    let num_products = Products::find().count(db).await?;
    let num_reviews = Reviews::find().count(db).await?;
    Ok(CatalogSummary {
        num_products,
        num_reviews,
    })
}
