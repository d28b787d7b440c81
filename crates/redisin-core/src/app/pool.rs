use std::collections::HashMap;

use tokio::sync::mpsc;

use crate::domain::{Event, PoolError};
use crate::impls::OutboxSink;

struct PoolQueue {
    sink: OutboxSink,
    receiver: Option<mpsc::Receiver<Event>>,
}

/// Host-side registry of named, bounded event queues.
///
/// Design:
/// - Queues are created during wiring (mutable).
/// - Each queue hands out any number of sinks but exactly one receiver.
#[derive(Default)]
pub struct QueuePool {
    queues: HashMap<String, PoolQueue>,
}

impl QueuePool {
    pub fn new() -> Self {
        Self {
            queues: HashMap::new(),
        }
    }

    /// Create a queue and return a sink for it.
    pub fn create_queue(&mut self, name: &str, capacity: usize) -> Result<OutboxSink, PoolError> {
        if self.queues.contains_key(name) {
            return Err(PoolError::DuplicateQueue(name.to_string()));
        }
        let (tx, rx) = mpsc::channel(capacity.max(1));
        let sink = OutboxSink::new(tx);
        self.queues.insert(
            name.to_string(),
            PoolQueue {
                sink: sink.clone(),
                receiver: Some(rx),
            },
        );
        Ok(sink)
    }

    pub fn sink(&self, name: &str) -> Result<OutboxSink, PoolError> {
        self.queues
            .get(name)
            .map(|q| q.sink.clone())
            .ok_or_else(|| PoolError::UnknownQueue(name.to_string()))
    }

    /// Take the consuming end of a queue. Only the first call succeeds.
    pub fn take_receiver(&mut self, name: &str) -> Result<mpsc::Receiver<Event>, PoolError> {
        let queue = self
            .queues
            .get_mut(name)
            .ok_or_else(|| PoolError::UnknownQueue(name.to_string()))?;
        queue
            .receiver
            .take()
            .ok_or_else(|| PoolError::ReceiverTaken(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.queues.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.queues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queues.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::EventSink;

    #[tokio::test]
    async fn created_queue_connects_sink_to_receiver() {
        let mut pool = QueuePool::new();
        let sink = pool.create_queue("outbox", 8).unwrap();
        let mut rx = pool.take_receiver("outbox").unwrap();

        sink.emit(Event::new("x")).await.unwrap();
        pool.sink("outbox")
            .unwrap()
            .emit(Event::new("y"))
            .await
            .unwrap();

        assert_eq!(rx.recv().await.unwrap(), Event::new("x"));
        assert_eq!(rx.recv().await.unwrap(), Event::new("y"));
    }

    #[test]
    fn duplicate_queue_is_rejected() {
        let mut pool = QueuePool::new();
        pool.create_queue("outbox", 1).unwrap();
        let err = pool.create_queue("outbox", 1).unwrap_err();
        assert!(matches!(err, PoolError::DuplicateQueue(name) if name == "outbox"));
        assert_eq!(pool.len(), 1);
    }

    #[test]
    fn receiver_can_be_taken_once() {
        let mut pool = QueuePool::new();
        pool.create_queue("outbox", 1).unwrap();
        assert!(pool.take_receiver("outbox").is_ok());
        assert!(matches!(
            pool.take_receiver("outbox"),
            Err(PoolError::ReceiverTaken(_))
        ));
    }

    #[test]
    fn unknown_queue_errors() {
        let mut pool = QueuePool::new();
        assert!(pool.is_empty());
        assert!(!pool.contains("outbox"));
        assert!(matches!(pool.sink("outbox"), Err(PoolError::UnknownQueue(_))));
        assert!(matches!(
            pool.take_receiver("outbox"),
            Err(PoolError::UnknownQueue(_))
        ));
    }
}
