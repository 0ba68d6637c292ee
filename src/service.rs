//! Order lookup service
//!
//! Cache-aside read path: serve from the cache, fall back to storage on any
//! cache failure and repopulate the cache with what storage returned.

use std::sync::Arc;

use tracing::{debug, error};

use crate::cache::{Cache, CacheStats};
use crate::error::{Result, ServiceError};
use crate::models::Order;
use crate::ports::{OrderStorage, StorageError};

/// Cache of orders keyed by `order_uid`.
pub type OrderCache = Cache<String, Arc<Order>>;

#[derive(Clone)]
pub struct OrderService {
    cache: OrderCache,
    storage: Arc<dyn OrderStorage>,
}

impl OrderService {
    pub fn new(cache: OrderCache, storage: Arc<dyn OrderStorage>) -> Self {
        Self { cache, storage }
    }

    /// Resolves one order by identifier.
    ///
    /// Concurrent misses on the same identifier each query storage and each
    /// repopulate the cache.
    pub async fn get_order(&self, order_uid: &str) -> Result<Arc<Order>> {
        if order_uid.is_empty() {
            return Err(ServiceError::EmptyIdentifier);
        }

        match self.cache.get(order_uid).await {
            Ok(order) => {
                debug!(order_uid, "order served from cache");
                return Ok(order);
            }
            Err(err) => debug!(order_uid, error = %err, "cache miss"),
        }

        let order = match self.storage.get_order(order_uid).await {
            Ok(order) => Arc::new(order),
            Err(StorageError::NotFound(_)) => {
                return Err(ServiceError::NotFound(order_uid.to_string()));
            }
            Err(err) => {
                error!(order_uid, error = %err, "failed to get order from storage");
                return Err(ServiceError::Internal(err.to_string()));
            }
        };

        if let Err(err) = self
            .cache
            .set(order_uid.to_string(), Arc::clone(&order))
            .await
        {
            error!(order_uid, error = %err, "failed to save order to cache");
        }

        Ok(order)
    }

    pub async fn cache_stats(&self) -> CacheStats {
        self.cache.stats().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;

    use crate::adapters::MemoryStorage;
    use crate::error::CacheError;
    use crate::models::sample_order;

    const UID: &str = "b563feb7b2b84b6test";

    /// Counts reads and can be told to fail them.
    #[derive(Default)]
    struct CountingStorage {
        inner: MemoryStorage,
        reads: AtomicUsize,
        broken: bool,
    }

    #[async_trait]
    impl OrderStorage for CountingStorage {
        async fn save_orders(&self, orders: &[Order]) -> std::result::Result<(), StorageError> {
            self.inner.save_orders(orders).await
        }

        async fn get_order(&self, order_uid: &str) -> std::result::Result<Order, StorageError> {
            self.reads.fetch_add(1, Ordering::SeqCst);
            if self.broken {
                return Err(StorageError::Backend("connection reset".into()));
            }
            self.inner.get_order(order_uid).await
        }
    }

    fn order_cache() -> OrderCache {
        Cache::new(10, Duration::from_secs(60))
    }

    async fn storage_with(order: Order) -> Arc<CountingStorage> {
        let storage = Arc::new(CountingStorage::default());
        storage.save_orders(&[order]).await.unwrap();
        storage
    }

    #[tokio::test]
    async fn test_order_from_cache_skips_storage() {
        let cache = order_cache();
        let storage = Arc::new(CountingStorage::default());
        cache
            .set(UID.to_string(), Arc::new(sample_order(UID)))
            .await
            .unwrap();

        let service = OrderService::new(cache, storage.clone());
        let order = service.get_order(UID).await.unwrap();

        assert_eq!(order.order_uid, UID);
        assert_eq!(storage.reads.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_order_from_storage_populates_cache() {
        let cache = order_cache();
        let storage = storage_with(sample_order(UID)).await;
        let service = OrderService::new(cache.clone(), storage.clone());

        let first = service.get_order(UID).await.unwrap();
        let second = service.get_order(UID).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(storage.reads.load(Ordering::SeqCst), 1);
        assert_eq!(cache.get(UID).await.unwrap().order_uid, UID);
    }

    #[tokio::test(start_paused = true)]
    async fn test_expired_entry_is_reloaded() {
        let cache: OrderCache = Cache::new(10, Duration::from_secs(1));
        let storage = storage_with(sample_order(UID)).await;
        let service = OrderService::new(cache.clone(), storage.clone());

        service.get_order(UID).await.unwrap();
        tokio::time::advance(Duration::from_secs(2)).await;
        assert_eq!(cache.get(UID).await, Err(CacheError::Expired));

        service.get_order(UID).await.unwrap();

        assert_eq!(storage.reads.load(Ordering::SeqCst), 2);
        assert!(cache.get(UID).await.is_ok());
    }

    #[tokio::test]
    async fn test_order_not_found() {
        let service = OrderService::new(order_cache(), Arc::new(CountingStorage::default()));

        let err = service.get_order(UID).await.unwrap_err();

        assert!(matches!(err, ServiceError::NotFound(id) if id == UID));
    }

    #[tokio::test]
    async fn test_storage_failure_is_internal() {
        let cache = order_cache();
        let storage = Arc::new(CountingStorage {
            broken: true,
            ..CountingStorage::default()
        });
        let service = OrderService::new(cache.clone(), storage);

        let err = service.get_order(UID).await.unwrap_err();

        assert!(matches!(err, ServiceError::Internal(_)));
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn test_empty_order_id() {
        let storage = Arc::new(CountingStorage::default());
        let service = OrderService::new(order_cache(), storage.clone());

        let err = service.get_order("").await.unwrap_err();

        assert!(matches!(err, ServiceError::EmptyIdentifier));
        assert_eq!(storage.reads.load(Ordering::SeqCst), 0);
        assert_eq!(service.cache_stats().await.misses, 0);
    }

    #[tokio::test]
    async fn test_concurrent_misses_each_hit_storage() {
        let storage = storage_with(sample_order(UID)).await;
        let service = OrderService::new(order_cache(), storage.clone());

        let (a, b) = tokio::join!(service.get_order(UID), service.get_order(UID));

        assert_eq!(a.unwrap().order_uid, UID);
        assert_eq!(b.unwrap().order_uid, UID);
        let reads = storage.reads.load(Ordering::SeqCst);
        assert!((1..=2).contains(&reads));
    }
}
