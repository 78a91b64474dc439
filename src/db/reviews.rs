use sea_orm::*;
use uuid::Uuid;

use crate::models::reviews;

pub async fn insert_review<C: ConnectionTrait>(
    db: &C,
    comment: String,
    rating: i32,
    sender_id: Uuid,
    recipient_id: Uuid,
    project_id: Uuid,
) -> Result<reviews::Model, DbErr> {
    let review = reviews::ActiveModel {
        id: Set(Uuid::new_v4()),
        comment: Set(comment),
        rating: Set(rating),
        sender_id: Set(sender_id),
        recipient_id: Set(recipient_id),
        project_id: Set(project_id),
        created_at: Set(chrono::Utc::now()),
    };

    review.insert(db).await
}

pub async fn get_review_by_project<C: ConnectionTrait>(
    db: &C,
    project_id: Uuid,
) -> Result<Option<reviews::Model>, DbErr> {
    reviews::Entity::find()
        .filter(reviews::Column::ProjectId.eq(project_id))
        .one(db)
        .await
}

/// Reviews a user has received, newest first.
pub async fn get_reviews_for_user<C: ConnectionTrait>(
    db: &C,
    recipient_id: Uuid,
) -> Result<Vec<reviews::Model>, DbErr> {
    reviews::Entity::find()
        .filter(reviews::Column::RecipientId.eq(recipient_id))
        .order_by_desc(reviews::Column::CreatedAt)
        .all(db)
        .await
}

pub async fn get_review_by_id<C: ConnectionTrait>(
    db: &C,
    id: Uuid,
) -> Result<Option<reviews::Model>, DbErr> {
    reviews::Entity::find_by_id(id).one(db).await
}
