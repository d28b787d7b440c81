//! Errors - エラー型と分類
//!
//! - ConnectionError: start() 時の接続失敗（タスクは起動しない）
//! - StoreError: 接続後の pop 失敗（致命的、ホストへ伝播）
//! - DrainError: 上記をまとめたドレイナーのエラー
//!
//! 空キューとシンクの背圧はエラーではない。

use thiserror::Error;

/// Could not open (or select the database on) the store.
#[derive(Debug, Error)]
#[error("cannot connect to {address} (database {database}): {reason}")]
pub struct ConnectionError {
    pub address: String,
    pub database: u32,
    pub reason: String,
}

impl ConnectionError {
    pub fn new(address: impl Into<String>, database: u32, reason: impl ToString) -> Self {
        Self {
            address: address.into(),
            database,
            reason: reason.to_string(),
        }
    }
}

/// A store operation failed after the connection was established.
#[derive(Debug, Error)]
#[error("{operation} on queue '{queue}' failed: {reason}")]
pub struct StoreError {
    pub operation: &'static str,
    pub queue: String,
    pub reason: String,
}

impl StoreError {
    pub fn pop(queue: &str, reason: impl ToString) -> Self {
        Self {
            operation: "pop",
            queue: queue.to_string(),
            reason: reason.to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum DrainError {
    #[error(transparent)]
    Connection(#[from] ConnectionError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("outbox closed; downstream receiver was dropped")]
    SinkClosed,

    #[error("drainer already started")]
    AlreadyStarted,

    #[error("drain task failed: {0}")]
    TaskFailed(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum PoolError {
    #[error("queue '{0}' is already registered")]
    DuplicateQueue(String),

    #[error("queue '{0}' is not registered")]
    UnknownQueue(String),

    #[error("receiver for queue '{0}' was already taken")]
    ReceiverTaken(String),
}
