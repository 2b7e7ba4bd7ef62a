use std::collections::VecDeque;

/// FIFO with a fixed capacity that drops the oldest entry on overflow.
///
/// The caller is never blocked. Drops are counted so the engine can report
/// a caller that stopped draining.
#[derive(Debug, Clone)]
pub struct BoundedQueue<T> {
    items: VecDeque<T>,
    capacity: usize,
    dropped_total: u64,
    dropped_since_report: u64,
}

impl<T> BoundedQueue<T> {
    /// A capacity of zero is treated as one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            items: VecDeque::with_capacity(capacity),
            capacity,
            dropped_total: 0,
            dropped_since_report: 0,
        }
    }

    /// Appends `item`, evicting the oldest entry when full.
    ///
    /// Returns the evicted entry, if any.
    pub fn push(&mut self, item: T) -> Option<T> {
        let evicted = if self.items.len() == self.capacity {
            self.dropped_total += 1;
            self.dropped_since_report += 1;
            self.items.pop_front()
        } else {
            None
        };
        self.items.push_back(item);
        evicted
    }

    pub fn pop(&mut self) -> Option<T> {
        self.items.pop_front()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Events dropped over the queue's lifetime.
    pub fn dropped(&self) -> u64 {
        self.dropped_total
    }

    /// Returns and resets the number of drops since the previous call.
    pub fn take_dropped(&mut self) -> u64 {
        std::mem::take(&mut self.dropped_since_report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fifo_order() {
        let mut q = BoundedQueue::new(4);
        q.push(1);
        q.push(2);
        q.push(3);
        assert_eq!(q.pop(), Some(1));
        assert_eq!(q.pop(), Some(2));
        assert_eq!(q.pop(), Some(3));
        assert_eq!(q.pop(), None);
    }

    #[test]
    fn overflow_drops_oldest() {
        let mut q = BoundedQueue::new(2);
        assert_eq!(q.push('a'), None);
        assert_eq!(q.push('b'), None);
        assert_eq!(q.push('c'), Some('a'));
        assert_eq!(q.len(), 2);
        assert_eq!(q.dropped(), 1);
        assert_eq!(q.pop(), Some('b'));
        assert_eq!(q.pop(), Some('c'));
    }

    #[test]
    fn take_dropped_resets_the_report_counter_only() {
        let mut q = BoundedQueue::new(1);
        q.push(0);
        q.push(1);
        q.push(2);
        assert_eq!(q.take_dropped(), 2);
        assert_eq!(q.take_dropped(), 0);
        assert_eq!(q.dropped(), 2);
    }

    #[test]
    fn zero_capacity_holds_one() {
        let mut q = BoundedQueue::new(0);
        q.push(7);
        assert_eq!(q.capacity(), 1);
        assert_eq!(q.pop(), Some(7));
    }
}
