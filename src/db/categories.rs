use sea_orm::*;
use uuid::Uuid;

use crate::models::categories;

pub async fn insert_category<C: ConnectionTrait>(
    db: &C,
    name: String,
) -> Result<categories::Model, DbErr> {
    let category = categories::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name),
    };

    category.insert(db).await
}

/// Fetch all categories, alphabetically.
pub async fn get_all_categories<C: ConnectionTrait>(
    db: &C,
) -> Result<Vec<categories::Model>, DbErr> {
    categories::Entity::find()
        .order_by_asc(categories::Column::Name)
        .all(db)
        .await
}

pub async fn get_category_by_id<C: ConnectionTrait>(
    db: &C,
    id: Uuid,
) -> Result<Option<categories::Model>, DbErr> {
    categories::Entity::find_by_id(id).one(db).await
}

pub async fn rename_category<C: ConnectionTrait>(
    db: &C,
    category: categories::Model,
    name: String,
) -> Result<categories::Model, DbErr> {
    let mut active: categories::ActiveModel = category.into();
    active.name = Set(name);
    active.update(db).await
}

pub async fn delete_category<C: ConnectionTrait>(
    db: &C,
    id: Uuid,
) -> Result<DeleteResult, DbErr> {
    categories::Entity::delete_by_id(id).exec(db).await
}
