use moka::future::Cache;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

use crate::models::categories;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
enum CategoryKey {
    All,
    One(Uuid),
}

#[derive(Clone)]
enum Entry {
    All(Arc<Vec<categories::Model>>),
    One(categories::Model),
}

/// In-process cache for the category list and single lookups.
///
/// Categories change rarely and only through the admin endpoints, which call
/// [`CategoryCache::invalidate`] after every write.
#[derive(Clone)]
pub struct CategoryCache {
    cache: Cache<CategoryKey, Entry>,
}

impl CategoryCache {
    pub fn new(ttl: Duration) -> Self {
        let cache = Cache::builder().time_to_live(ttl).max_capacity(1_000).build();
        Self { cache }
    }

    pub async fn all(&self) -> Option<Arc<Vec<categories::Model>>> {
        match self.cache.get(&CategoryKey::All).await {
            Some(Entry::All(list)) => Some(list),
            _ => None,
        }
    }

    pub async fn put_all(&self, list: Vec<categories::Model>) -> Arc<Vec<categories::Model>> {
        let list = Arc::new(list);
        self.cache
            .insert(CategoryKey::All, Entry::All(list.clone()))
            .await;
        list
    }

    pub async fn get(&self, id: Uuid) -> Option<categories::Model> {
        match self.cache.get(&CategoryKey::One(id)).await {
            Some(Entry::One(category)) => Some(category),
            _ => None,
        }
    }

    pub async fn put(&self, category: categories::Model) {
        self.cache
            .insert(CategoryKey::One(category.id), Entry::One(category))
            .await;
    }

    pub fn invalidate(&self) {
        self.cache.invalidate_all();
    }
}
