use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};
use validator::Validate;

use crate::{
    dto::categories::CategoryRequest,
    entity::categories::{ActiveModel, Column, Entity as Categories},
    error::{AppError, AppResult},
    models::Category,
};

pub async fn list_categories(db: &DatabaseConnection) -> AppResult<Vec<Category>> {
    let items = Categories::find()
        .order_by_asc(Column::Name)
        .order_by_asc(Column::Id)
        .all(db)
        .await?
        .into_iter()
        .map(Category::from)
        .collect();
    Ok(items)
}

pub async fn get_category(db: &DatabaseConnection, id: i32) -> AppResult<Category> {
    Categories::find_by_id(id)
        .one(db)
        .await?
        .map(Category::from)
        .ok_or(AppError::NotFound("category"))
}

pub async fn create_category(
    db: &DatabaseConnection,
    payload: CategoryRequest,
) -> AppResult<Category> {
    payload.validate()?;
    let category = ActiveModel {
        name: Set(payload.name),
        ..Default::default()
    }
    .insert(db)
    .await?;

    tracing::info!(category_id = category.id, name = %category, "category created");
    Ok(category.into())
}

pub async fn rename_category(
    db: &DatabaseConnection,
    id: i32,
    payload: CategoryRequest,
) -> AppResult<Category> {
    payload.validate()?;
    let existing = Categories::find_by_id(id).one(db).await?;
    let existing = match existing {
        Some(c) => c,
        None => return Err(AppError::NotFound("category")),
    };

    let mut active: ActiveModel = existing.into();
    active.name = Set(payload.name);
    let category = active.update(db).await?;

    tracing::info!(category_id = category.id, name = %category, "category renamed");
    Ok(category.into())
}

/// Deletes a category. The products foreign key restricts the delete, so a
/// category that still has products is refused by the store itself.
pub async fn delete_category(db: &DatabaseConnection, id: i32) -> AppResult<()> {
    let result = Categories::delete_by_id(id)
        .exec(db)
        .await
        .map_err(|err| AppError::from(err).restricted("category is still referenced by products"))?;

    if result.rows_affected == 0 {
        return Err(AppError::NotFound("category"));
    }

    tracing::info!(category_id = id, "category deleted");
    Ok(())
}
