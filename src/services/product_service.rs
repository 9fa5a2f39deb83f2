use std::collections::HashMap;

use rust_decimal::Decimal;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    FromQueryResult, ModelTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use validator::Validate;

use crate::{
    dto::products::{CreateProductRequest, ProductDetail, UpdateProductRequest},
    entity::{
        categories::Entity as Categories,
        products::{ActiveModel, Column, Entity as Products, Model as ProductModel},
        reviews::{Column as ReviewCol, Entity as Reviews},
    },
    error::{AppError, AppResult},
    models::{Category, Product, Review, normalize_price},
};

/// Star totals for one product, as returned by the aggregate queries.
#[derive(Debug, FromQueryResult)]
struct RatingTotals {
    star_total: Option<i64>,
    review_count: i64,
}

#[derive(Debug, FromQueryResult)]
struct ProductRatingTotals {
    product_id: Option<i32>,
    star_total: Option<i64>,
    review_count: i64,
}

pub async fn list_products(db: &DatabaseConnection) -> AppResult<Vec<Product>> {
    let ratings: HashMap<i32, f64> = Reviews::find()
        .select_only()
        .column(ReviewCol::ProductId)
        .column_as(Expr::col(ReviewCol::Stars).sum(), "star_total")
        .column_as(Expr::col(ReviewCol::Id).count(), "review_count")
        .filter(ReviewCol::ProductId.is_not_null())
        .group_by(ReviewCol::ProductId)
        .into_model::<ProductRatingTotals>()
        .all(db)
        .await?
        .into_iter()
        .filter_map(|row| {
            let product_id = row.product_id?;
            Some((
                product_id,
                mean_rating(row.star_total.unwrap_or(0), row.review_count),
            ))
        })
        .collect();

    let items = Products::find()
        .order_by_asc(Column::Name)
        .order_by_asc(Column::Id)
        .all(db)
        .await?
        .into_iter()
        .map(|model| {
            let rating = ratings.get(&model.id).copied().unwrap_or(0.0);
            product_from_entity(model, rating)
        })
        .collect();
    Ok(items)
}

pub async fn get_product(db: &DatabaseConnection, id: i32) -> AppResult<Product> {
    let model = find_product(db, id).await?;
    let rating = rating_for(db, model.id).await?;
    Ok(product_from_entity(model, rating))
}

/// Mean star rating of a product's reviews, exactly `0.0` without reviews.
pub async fn average_rating(db: &DatabaseConnection, id: i32) -> AppResult<f64> {
    let model = find_product(db, id).await?;
    let rating = rating_for(db, model.id).await?;
    tracing::debug!(product_id = id, rating, "average rating computed");
    Ok(rating)
}

pub async fn product_detail(db: &DatabaseConnection, id: i32) -> AppResult<ProductDetail> {
    let model = find_product(db, id).await?;

    let category = model
        .find_related(Categories)
        .one(db)
        .await?
        .map(Category::from);

    let reviews: Vec<Review> = model
        .find_related(Reviews)
        .order_by_asc(ReviewCol::Id)
        .all(db)
        .await?
        .into_iter()
        .map(Review::from)
        .collect();

    let stars: i64 = reviews.iter().map(|r| i64::from(r.stars)).sum();
    let rating = mean_rating(stars, reviews.len() as i64);

    Ok(ProductDetail {
        product: product_from_entity(model, rating),
        category,
        reviews,
    })
}

pub async fn create_product(
    db: &DatabaseConnection,
    payload: CreateProductRequest,
) -> AppResult<Product> {
    payload.validate()?;
    validate_price(&payload.price)?;

    let txn = db.begin().await?;
    if let Some(category_id) = payload.category_id {
        ensure_category(&txn, category_id).await?;
    }

    let product = ActiveModel {
        name: Set(payload.name),
        description: Set(payload.description),
        image: Set(payload.image),
        price: Set(payload.price.normalize()),
        category_id: Set(payload.category_id),
        ..Default::default()
    }
    .insert(&txn)
    .await?;
    txn.commit().await?;

    tracing::info!(
        product_id = product.id,
        name = %product,
        price = %product.price,
        category_id = ?product.category_id,
        "product created"
    );
    Ok(product_from_entity(product, 0.0))
}

pub async fn update_product(
    db: &DatabaseConnection,
    id: i32,
    payload: UpdateProductRequest,
) -> AppResult<Product> {
    payload.validate()?;
    if let Some(price) = payload.price.as_ref() {
        validate_price(price)?;
    }

    let txn = db.begin().await?;
    let existing = Products::find_by_id(id).one(&txn).await?;
    let existing = match existing {
        Some(p) => p,
        None => return Err(AppError::NotFound("product")),
    };

    let mut active: ActiveModel = existing.into();
    if let Some(name) = payload.name {
        active.name = Set(name);
    }
    if let Some(description) = payload.description {
        active.description = Set(description);
    }
    if let Some(price) = payload.price {
        active.price = Set(price.normalize());
    }
    if let Some(image) = payload.image {
        active.image = Set(image);
    }
    if let Some(category_id) = payload.category_id {
        if let Some(category_id) = category_id {
            ensure_category(&txn, category_id).await?;
        }
        active.category_id = Set(category_id);
    }

    let product = active.update(&txn).await?;
    let rating = rating_for(&txn, product.id).await?;
    txn.commit().await?;

    tracing::info!(product_id = product.id, name = %product, "product updated");
    Ok(product_from_entity(product, rating))
}

/// Deletes a product. Reviews and order memberships restrict the delete
/// through their foreign keys.
pub async fn delete_product(db: &DatabaseConnection, id: i32) -> AppResult<()> {
    let result = Products::delete_by_id(id).exec(db).await.map_err(|err| {
        AppError::from(err).restricted("product is still referenced by reviews or orders")
    })?;

    if result.rows_affected == 0 {
        return Err(AppError::NotFound("product"));
    }

    tracing::info!(product_id = id, "product deleted");
    Ok(())
}

async fn find_product<C: ConnectionTrait>(db: &C, id: i32) -> AppResult<ProductModel> {
    Products::find_by_id(id)
        .one(db)
        .await?
        .ok_or(AppError::NotFound("product"))
}

async fn ensure_category<C: ConnectionTrait>(db: &C, id: i32) -> AppResult<()> {
    match Categories::find_by_id(id).one(db).await? {
        Some(_) => Ok(()),
        None => Err(AppError::Validation(format!("category {id} does not exist"))),
    }
}

async fn rating_for<C: ConnectionTrait>(db: &C, product_id: i32) -> AppResult<f64> {
    let totals = Reviews::find()
        .select_only()
        .column_as(Expr::col(ReviewCol::Stars).sum(), "star_total")
        .column_as(Expr::col(ReviewCol::Id).count(), "review_count")
        .filter(ReviewCol::ProductId.eq(product_id))
        .into_model::<RatingTotals>()
        .one(db)
        .await?;

    Ok(totals
        .map(|t| mean_rating(t.star_total.unwrap_or(0), t.review_count))
        .unwrap_or(0.0))
}

fn mean_rating(star_total: i64, review_count: i64) -> f64 {
    if review_count == 0 {
        return 0.0;
    }
    star_total as f64 / review_count as f64
}

/// Prices must fit a `NUMERIC(10, 2)` column and cannot be negative.
pub(crate) fn validate_price(price: &Decimal) -> AppResult<()> {
    if *price < Decimal::ZERO {
        return Err(AppError::Validation("price cannot be negative".into()));
    }
    if price.normalize().scale() > 2 {
        return Err(AppError::Validation(
            "price cannot have more than 2 decimal places".into(),
        ));
    }
    if *price >= Decimal::new(100_000_000, 0) {
        return Err(AppError::Validation(
            "price cannot exceed 99999999.99".into(),
        ));
    }
    Ok(())
}

fn product_from_entity(model: ProductModel, average_rating: f64) -> Product {
    Product {
        id: model.id,
        name: model.name,
        description: model.description,
        image: model.image,
        price: normalize_price(model.price),
        category_id: model.category_id,
        average_rating,
    }
}
