//! In-memory order storage
//!
//! Keeps orders in a `HashMap` keyed by `order_uid`. Batches are applied
//! atomically: one conflicting order rejects the whole batch.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::models::Order;
use crate::ports::{OrderStorage, StorageError};

#[derive(Debug, Default)]
pub struct MemoryStorage {
    orders: RwLock<HashMap<String, Order>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored orders.
    pub async fn len(&self) -> usize {
        self.orders.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.orders.read().await.is_empty()
    }
}

#[async_trait]
impl OrderStorage for MemoryStorage {
    async fn save_orders(&self, orders: &[Order]) -> Result<(), StorageError> {
        let mut stored = self.orders.write().await;

        let mut seen = HashSet::with_capacity(orders.len());
        for order in orders {
            if stored.contains_key(&order.order_uid) || !seen.insert(order.order_uid.as_str()) {
                return Err(StorageError::Backend(format!(
                    "duplicate order_uid {}",
                    order.order_uid
                )));
            }
        }

        stored.extend(
            orders
                .iter()
                .map(|order| (order.order_uid.clone(), order.clone())),
        );
        Ok(())
    }

    async fn get_order(&self, order_uid: &str) -> Result<Order, StorageError> {
        self.orders
            .read()
            .await
            .get(order_uid)
            .cloned()
            .ok_or_else(|| StorageError::NotFound(order_uid.to_string()))
    }
}
