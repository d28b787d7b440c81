//! App - アプリケーション層
//!
//! ports を組み合わせてドレイナーを実装します。
//!
//! # 主要コンポーネント
//! - **QueueDrainer**: 接続 → ドレインループの起動 → 停止・join
//! - **QueuePool**: ホスト側の名前付きキュー（"outbox" の登録先）

pub mod drainer;
pub mod pool;

// 主要な型を再エクスポート
pub use self::drainer::{IDLE_BACKOFF, OUTBOX, QueueDrainer};
pub use self::pool::QueuePool;
