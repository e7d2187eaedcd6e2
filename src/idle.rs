//! Idle resource bookkeeping: staleness records and the bounded idle queue

use crossbeam::queue::ArrayQueue;
use std::time::{Duration, Instant};

/// A resource sitting in the pool, stamped with when it was returned
#[derive(Debug)]
pub(crate) struct IdleRecord<R> {
    pub(crate) resource: R,
    pub(crate) returned_at: Instant,
}

impl<R> IdleRecord<R> {
    pub fn new(resource: R) -> Self {
        Self {
            resource,
            returned_at: Instant::now(),
        }
    }

    /// Stale once it has been idle for strictly longer than `idle_timeout`
    pub fn is_stale(&self, idle_timeout: Duration) -> bool {
        self.returned_at.elapsed() > idle_timeout
    }
}

/// Bounded FIFO of idle records; neither push nor pop ever blocks
pub(crate) struct IdleQueue<R> {
    // `None` for a zero-capacity pool, which never buffers anything
    slots: Option<ArrayQueue<IdleRecord<R>>>,
}

impl<R> IdleQueue<R> {
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: (capacity > 0).then(|| ArrayQueue::new(capacity)),
        }
    }

    /// Push a record, handing it back if the queue is full
    pub fn try_push(&self, record: IdleRecord<R>) -> Result<(), IdleRecord<R>> {
        match &self.slots {
            Some(slots) => slots.push(record),
            None => Err(record),
        }
    }

    pub fn try_pop(&self) -> Option<IdleRecord<R>> {
        self.slots.as_ref().and_then(ArrayQueue::pop)
    }

    pub fn len(&self) -> usize {
        self.slots.as_ref().map_or(0, ArrayQueue::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.slots.as_ref().map_or(0, ArrayQueue::capacity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_record_staleness() {
        let record = IdleRecord::new(7);
        assert!(!record.is_stale(Duration::from_secs(60)));

        thread::sleep(Duration::from_millis(20));
        assert!(record.is_stale(Duration::from_millis(5)));
    }

    #[test]
    fn test_queue_is_fifo_and_bounded() {
        let queue = IdleQueue::new(2);
        assert_eq!(queue.capacity(), 2);
        assert!(queue.try_push(IdleRecord::new(1)).is_ok());
        assert!(queue.try_push(IdleRecord::new(2)).is_ok());

        let rejected = queue.try_push(IdleRecord::new(3)).unwrap_err();
        assert_eq!(rejected.resource, 3);
        assert_eq!(queue.len(), 2);

        assert_eq!(queue.try_pop().map(|r| r.resource), Some(1));
        assert_eq!(queue.try_pop().map(|r| r.resource), Some(2));
        assert!(queue.try_pop().is_none());
        assert!(queue.is_empty());
    }

    #[test]
    fn test_zero_capacity_queue_rejects_everything() {
        let queue = IdleQueue::new(0);
        assert_eq!(queue.capacity(), 0);
        assert!(queue.try_push(IdleRecord::new("conn")).is_err());
        assert!(queue.try_pop().is_none());
        assert_eq!(queue.len(), 0);
    }
}
