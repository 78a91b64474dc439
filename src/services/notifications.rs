use tracing::warn;
use uuid::Uuid;

use crate::auth::Caller;
use crate::cache::{RedisCache, keys};
use crate::error::ServiceError;
use crate::models::notifications::{EscrowEvent, Notification, unread_newest_first};

fn store_error(e: redis::RedisError) -> ServiceError {
    ServiceError::Internal(format!("Notification store error: {e}"))
}

pub async fn enqueue(cache: &RedisCache, notification: &Notification) -> Result<(), ServiceError> {
    cache
        .hset(
            &keys::notifications(notification.user_id),
            &notification.id.to_string(),
            notification,
        )
        .await
        .map_err(store_error)
}

/// Fire-and-forget notification for a committed escrow step.
pub async fn notify(cache: &RedisCache, recipient: Uuid, event: EscrowEvent) {
    let notification = Notification::for_event(recipient, &event);
    if let Err(e) = enqueue(cache, &notification).await {
        warn!(%recipient, ?event, "Failed to enqueue notification: {e}");
    }
}

pub async fn list_unread(
    cache: &RedisCache,
    caller: &Caller,
) -> Result<Vec<Notification>, ServiceError> {
    let all = cache
        .hvals::<Notification>(&keys::notifications(caller.id))
        .await
        .map_err(store_error)?;
    Ok(unread_newest_first(all))
}

pub async fn mark_read(
    cache: &RedisCache,
    caller: &Caller,
    id: Uuid,
) -> Result<Notification, ServiceError> {
    let key = keys::notifications(caller.id);
    let field = id.to_string();

    let mut notification: Notification = cache
        .hget(&key, &field)
        .await
        .map_err(store_error)?
        .ok_or_else(|| ServiceError::not_found("Notification"))?;
    notification.is_read = true;

    cache
        .hset(&key, &field, &notification)
        .await
        .map_err(store_error)?;
    Ok(notification)
}

pub async fn delete(cache: &RedisCache, caller: &Caller, id: Uuid) -> Result<(), ServiceError> {
    let removed = cache
        .hdel(&keys::notifications(caller.id), &id.to_string())
        .await
        .map_err(store_error)?;
    if !removed {
        return Err(ServiceError::not_found("Notification"));
    }
    Ok(())
}
