//! Store port - リスト型キューストアへの接続
//!
//! # 実装
//! - RedisConnectionProvider（本番用）
//! - InMemoryQueueStore（開発・テスト用）

use async_trait::async_trait;

use crate::domain::{ConnectionError, StoreConfig, StoreError};

/// ConnectionProvider はストアへの接続を確立する
///
/// - 論理データベースの選択まで済ませた接続を返す
/// - 失敗は ConnectionError（start() の失敗として扱われる）
#[async_trait]
pub trait ConnectionProvider: Send + Sync {
    async fn connect(
        &self,
        store: &StoreConfig,
    ) -> Result<Box<dyn QueueConnection>, ConnectionError>;
}

/// A single connection, owned by exactly one drain task.
#[async_trait]
pub trait QueueConnection: Send {
    /// Non-blocking pop of the rightmost element.
    ///
    /// `Ok(None)` means the queue is empty, which is not an error.
    async fn pop_right(&mut self, queue: &str) -> Result<Option<Vec<u8>>, StoreError>;
}
