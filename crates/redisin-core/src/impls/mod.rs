//! Impls - ports の実装
//!
//! # 含まれる実装
//! - **RedisConnectionProvider**: 本番用のストア接続
//! - **InMemoryQueueStore**: 開発・テスト用のストア
//! - **OutboxSink**: 有界チャネルの EventSink
//! - **RunSignal / ShutdownHandle**: watch チャネルの RunState

pub mod channel_sink;
pub mod inmem_store;
pub mod redis_store;
pub mod run_flag;

// 主要な型を再エクスポート
pub use self::channel_sink::{OutboxSink, outbox};
pub use self::inmem_store::InMemoryQueueStore;
pub use self::redis_store::RedisConnectionProvider;
pub use self::run_flag::{RunSignal, ShutdownHandle, run_flag};
