use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use validator::Validate;

use crate::{
    dto::reviews::CreateReviewRequest,
    entity::{
        products::Entity as Products,
        reviews::{ActiveModel, Column, Entity as Reviews},
    },
    error::{AppError, AppResult},
    models::Review,
};

/// Lists reviews in submission order, optionally only those of one product.
pub async fn list_reviews(
    db: &DatabaseConnection,
    product_id: Option<i32>,
) -> AppResult<Vec<Review>> {
    let mut condition = Condition::all();
    if let Some(product_id) = product_id {
        condition = condition.add(Column::ProductId.eq(product_id));
    }

    let items = Reviews::find()
        .filter(condition)
        .order_by_asc(Column::Id)
        .all(db)
        .await?
        .into_iter()
        .map(Review::from)
        .collect();
    Ok(items)
}

pub async fn get_review(db: &DatabaseConnection, id: i32) -> AppResult<Review> {
    Reviews::find_by_id(id)
        .one(db)
        .await?
        .map(Review::from)
        .ok_or(AppError::NotFound("review"))
}

pub async fn create_review(
    db: &DatabaseConnection,
    payload: CreateReviewRequest,
) -> AppResult<Review> {
    payload.validate()?;

    let txn = db.begin().await?;
    if Products::find_by_id(payload.product_id).one(&txn).await?.is_none() {
        return Err(AppError::NotFound("product"));
    }

    let review = ActiveModel {
        stars: Set(payload.stars),
        text: Set(payload.text),
        product_id: Set(Some(payload.product_id)),
        ..Default::default()
    }
    .insert(&txn)
    .await?;
    txn.commit().await?;

    tracing::info!(
        review_id = review.id,
        product_id = payload.product_id,
        stars = review.stars,
        "review submitted"
    );
    Ok(review.into())
}

pub async fn delete_review(db: &DatabaseConnection, id: i32) -> AppResult<()> {
    let result = Reviews::delete_by_id(id).exec(db).await?;

    if result.rows_affected == 0 {
        return Err(AppError::NotFound("review"));
    }

    tracing::info!(review_id = id, "review deleted");
    Ok(())
}
