//! redisin-core
//!
//! Redis のリストを読み出し、要素をイベントとしてパイプラインに流す入力アダプタ。
//!
//! # モジュール構成
//! - **domain**: 設定、Event、状態、エラー
//! - **ports**: ConnectionProvider / QueueConnection / EventSink / RunState
//! - **impls**: Redis 接続、InMemory ストア、outbox チャネル、停止フラグ
//! - **app**: QueueDrainer, QueuePool
//! - **observability**: ドレインループのカウンタ

pub mod domain;
pub mod ports;
pub mod impls;
pub mod app;
pub mod observability;

pub use app::{QueueDrainer, QueuePool};
pub use domain::{DrainError, DrainerConfig, DrainerState, Event, StoreConfig};
