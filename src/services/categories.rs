use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

use crate::auth::Caller;
use crate::cache::CategoryCache;
use crate::db::categories as category_db;
use crate::error::ServiceError;
use crate::models::categories::{self, CreateCategory, UpdateCategory};
use crate::models::require_min_len;
use crate::models::users::Role;

pub async fn list(
    db: &DatabaseConnection,
    cache: &CategoryCache,
) -> Result<Arc<Vec<categories::Model>>, ServiceError> {
    if let Some(cached) = cache.all().await {
        debug!("Category list served from cache");
        return Ok(cached);
    }
    let list = category_db::get_all_categories(db).await?;
    Ok(cache.put_all(list).await)
}

pub async fn find(
    db: &DatabaseConnection,
    cache: &CategoryCache,
    id: Uuid,
) -> Result<categories::Model, ServiceError> {
    if let Some(cached) = cache.get(id).await {
        return Ok(cached);
    }
    let category = category_db::get_category_by_id(db, id)
        .await?
        .ok_or_else(|| ServiceError::not_found("Category"))?;
    cache.put(category.clone()).await;
    Ok(category)
}

pub async fn create(
    db: &DatabaseConnection,
    cache: &CategoryCache,
    caller: &Caller,
    input: CreateCategory,
) -> Result<categories::Model, ServiceError> {
    caller.require_role(&[Role::Admin])?;
    require_min_len(&input.name, 1, "Name")?;

    let category = category_db::insert_category(db, input.name.trim().to_string()).await?;
    cache.invalidate();
    info!(category_id = %category.id, "Category created");
    Ok(category)
}

pub async fn update(
    db: &DatabaseConnection,
    cache: &CategoryCache,
    caller: &Caller,
    input: UpdateCategory,
) -> Result<categories::Model, ServiceError> {
    caller.require_role(&[Role::Admin])?;
    require_min_len(&input.name, 1, "Name")?;

    let category = category_db::get_category_by_id(db, input.id)
        .await?
        .ok_or_else(|| ServiceError::not_found("Category"))?;
    let category = category_db::rename_category(db, category, input.name.trim().to_string()).await?;
    cache.invalidate();
    Ok(category)
}

/// Delete a category. Projects keep existing with no category.
pub async fn delete(
    db: &DatabaseConnection,
    cache: &CategoryCache,
    caller: &Caller,
    id: Uuid,
) -> Result<(), ServiceError> {
    caller.require_role(&[Role::Admin])?;

    let result = category_db::delete_category(db, id).await?;
    if result.rows_affected == 0 {
        return Err(ServiceError::not_found("Category"));
    }
    cache.invalidate();
    info!(category_id = %id, "Category deleted");
    Ok(())
}
