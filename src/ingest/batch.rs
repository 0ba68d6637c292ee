//! Pending batch of validated orders.

use crate::models::Order;

// == Batch ==
/// Orders accumulated between two flushes, in consumption order.
#[derive(Debug)]
pub struct Batch {
    records: Vec<Order>,
    threshold: usize,
}

impl Batch {
    /// `threshold` below 1 is treated as 1.
    pub fn new(threshold: usize) -> Self {
        let threshold = threshold.max(1);
        Self {
            records: Vec::with_capacity(threshold),
            threshold,
        }
    }

    /// Appends an order; returns true once the batch is due for a flush.
    pub fn push(&mut self, order: Order) -> bool {
        self.records.push(order);
        self.is_full()
    }

    pub fn is_full(&self) -> bool {
        self.records.len() >= self.threshold
    }

    /// Hands the pending orders over and leaves the batch empty.
    pub fn take(&mut self) -> Vec<Order> {
        std::mem::replace(&mut self.records, Vec::with_capacity(self.threshold))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn threshold(&self) -> usize {
        self.threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::sample_order;

    #[test]
    fn test_push_reports_full_at_threshold() {
        let mut batch = Batch::new(2);

        assert!(!batch.push(sample_order("order-000001")));
        assert!(batch.push(sample_order("order-000002")));
        assert_eq!(batch.len(), 2);
    }

    #[test]
    fn test_take_clears_and_keeps_order() {
        let mut batch = Batch::new(10);
        batch.push(sample_order("order-000001"));
        batch.push(sample_order("order-000002"));

        let taken = batch.take();

        assert!(batch.is_empty());
        let uids: Vec<_> = taken.iter().map(|o| o.order_uid.as_str()).collect();
        assert_eq!(uids, vec!["order-000001", "order-000002"]);
    }

    #[test]
    fn test_zero_threshold_becomes_one() {
        let mut batch = Batch::new(0);

        assert_eq!(batch.threshold(), 1);
        assert!(batch.push(sample_order("order-000001")));
    }
}
