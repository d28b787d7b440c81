//! InMemoryQueueStore - 開発・テスト用のリスト型ストア
//!
//! # 学習ポイント
//! - Redis の LPUSH / RPOP と同じ向き（左から入れて右から取る）
//! - 論理データベースごとに別のキュー空間
//! - 接続拒否・接続断の注入（テスト用）

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;

use crate::domain::{ConnectionError, StoreConfig, StoreError};
use crate::ports::{ConnectionProvider, QueueConnection};

#[derive(Default)]
struct StoreInner {
    /// (database, queue) ごとのリスト。front が左端。
    lists: Mutex<HashMap<(u32, String), VecDeque<Vec<u8>>>>,
    refuse_connections: AtomicBool,
    broken: AtomicBool,
    connections: AtomicU64,
    pop_attempts: AtomicU64,
}

/// InMemoryQueueStore は Redis のリストを模したストア
///
/// Clone すると同じストアを共有する。
///
/// ```ignore
/// let store = InMemoryQueueStore::new();
/// store.push_left(0, "wishbone.in", "a");
/// let conn = store.connect(&StoreConfig::default()).await?;
/// ```
#[derive(Clone, Default)]
pub struct InMemoryQueueStore {
    inner: Arc<StoreInner>,
}

impl InMemoryQueueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// LPUSH: insert at the left end.
    pub fn push_left(&self, database: u32, queue: &str, payload: impl Into<Vec<u8>>) {
        let mut lists = self
            .inner
            .lists
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        lists
            .entry((database, queue.to_string()))
            .or_default()
            .push_front(payload.into());
    }

    pub fn len(&self, database: u32, queue: &str) -> usize {
        let lists = self
            .inner
            .lists
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        lists
            .get(&(database, queue.to_string()))
            .map_or(0, VecDeque::len)
    }

    /// While set, `connect` fails with `ConnectionError`.
    pub fn refuse_connections(&self, refuse: bool) {
        self.inner.refuse_connections.store(refuse, Ordering::SeqCst);
    }

    /// Every subsequent pop on any open connection fails with `StoreError`.
    pub fn break_connections(&self) {
        self.inner.broken.store(true, Ordering::SeqCst);
    }

    pub fn connections(&self) -> u64 {
        self.inner.connections.load(Ordering::SeqCst)
    }

    pub fn pop_attempts(&self) -> u64 {
        self.inner.pop_attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ConnectionProvider for InMemoryQueueStore {
    async fn connect(
        &self,
        store: &StoreConfig,
    ) -> Result<Box<dyn QueueConnection>, ConnectionError> {
        if self.inner.refuse_connections.load(Ordering::SeqCst) {
            return Err(ConnectionError::new(
                store.address(),
                store.database,
                "connection refused",
            ));
        }
        self.inner.connections.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(InMemoryConnection {
            inner: Arc::clone(&self.inner),
            database: store.database,
        }))
    }
}

struct InMemoryConnection {
    inner: Arc<StoreInner>,
    database: u32,
}

#[async_trait]
impl QueueConnection for InMemoryConnection {
    async fn pop_right(&mut self, queue: &str) -> Result<Option<Vec<u8>>, StoreError> {
        self.inner.pop_attempts.fetch_add(1, Ordering::SeqCst);
        if self.inner.broken.load(Ordering::SeqCst) {
            return Err(StoreError::pop(queue, "connection reset by peer"));
        }
        let mut lists = self
            .inner
            .lists
            .lock()
            .map_err(|e| StoreError::pop(queue, e))?;
        Ok(lists
            .get_mut(&(self.database, queue.to_string()))
            .and_then(VecDeque::pop_back))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_config(database: u32) -> StoreConfig {
        StoreConfig {
            database,
            ..StoreConfig::default()
        }
    }

    #[tokio::test]
    async fn pop_right_returns_oldest_left_push() {
        let store = InMemoryQueueStore::new();
        for payload in ["a", "b", "c"] {
            store.push_left(0, "q", payload);
        }
        let mut conn = store.connect(&store_config(0)).await.unwrap();

        assert_eq!(conn.pop_right("q").await.unwrap(), Some(b"a".to_vec()));
        assert_eq!(conn.pop_right("q").await.unwrap(), Some(b"b".to_vec()));
        assert_eq!(conn.pop_right("q").await.unwrap(), Some(b"c".to_vec()));
        assert_eq!(conn.pop_right("q").await.unwrap(), None);
        assert_eq!(store.pop_attempts(), 4);
    }

    #[tokio::test]
    async fn empty_or_unknown_queue_is_none() {
        let store = InMemoryQueueStore::new();
        let mut conn = store.connect(&store_config(0)).await.unwrap();
        assert_eq!(conn.pop_right("missing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn databases_are_isolated() {
        let store = InMemoryQueueStore::new();
        store.push_left(1, "q", "in-db-1");

        let mut db0 = store.connect(&store_config(0)).await.unwrap();
        let mut db1 = store.connect(&store_config(1)).await.unwrap();

        assert_eq!(db0.pop_right("q").await.unwrap(), None);
        assert_eq!(db1.pop_right("q").await.unwrap(), Some(b"in-db-1".to_vec()));
        assert_eq!(store.connections(), 2);
    }

    #[tokio::test]
    async fn refused_connection_is_connection_error() {
        let store = InMemoryQueueStore::new();
        store.refuse_connections(true);
        let err = store.connect(&store_config(3)).await.err().unwrap();
        assert_eq!(err.database, 3);
        assert_eq!(store.connections(), 0);
    }

    #[tokio::test]
    async fn broken_connection_fails_pop() {
        let store = InMemoryQueueStore::new();
        store.push_left(0, "q", "kept");
        let mut conn = store.connect(&store_config(0)).await.unwrap();
        store.break_connections();

        let err = conn.pop_right("q").await.unwrap_err();
        assert_eq!(err.queue, "q");
        assert_eq!(store.len(0, "q"), 1);
    }
}
