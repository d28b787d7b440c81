//! EventSink port - 下流ステージへのイベント受け渡し

use async_trait::async_trait;

use crate::domain::{DrainError, Event};

/// EventSink は取り出したイベントを受け取る
///
/// - emit() は背圧で待つことがある（捨てない）
/// - 受け手がいなくなった場合のみ DrainError::SinkClosed を返す
#[async_trait]
pub trait EventSink: Send + Sync {
    async fn emit(&self, event: Event) -> Result<(), DrainError>;
}
