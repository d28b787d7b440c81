//! Ports - 抽象化レイヤー
//!
//! ドレイナーが依存する外部協調者のインターフェース。
//! 実装は impls に置き、ドレイナーには構築時に注入する。

pub mod store;
pub mod event_sink;
pub mod run_state;

// 主要な trait を再エクスポート
pub use self::store::{ConnectionProvider, QueueConnection};
pub use self::event_sink::EventSink;
pub use self::run_state::RunState;
