//! OutboxSink - 有界 mpsc チャネルによる EventSink
//!
//! チャネルが満杯なら emit() はそこで待つ（背圧をドレインループに伝える）。

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::domain::{DrainError, Event};
use crate::ports::EventSink;

#[derive(Debug, Clone)]
pub struct OutboxSink {
    tx: mpsc::Sender<Event>,
}

impl OutboxSink {
    pub fn new(tx: mpsc::Sender<Event>) -> Self {
        Self { tx }
    }
}

/// Bounded outbox; `capacity` of zero is treated as one.
pub fn outbox(capacity: usize) -> (OutboxSink, mpsc::Receiver<Event>) {
    let (tx, rx) = mpsc::channel(capacity.max(1));
    (OutboxSink::new(tx), rx)
}

#[async_trait]
impl EventSink for OutboxSink {
    async fn emit(&self, event: Event) -> Result<(), DrainError> {
        self.tx.send(event).await.map_err(|_| DrainError::SinkClosed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn emit_delivers_in_order() {
        let (sink, mut rx) = outbox(4);
        sink.emit(Event::new("1")).await.unwrap();
        sink.emit(Event::new("2")).await.unwrap();
        assert_eq!(rx.recv().await.unwrap(), Event::new("1"));
        assert_eq!(rx.recv().await.unwrap(), Event::new("2"));
    }

    #[tokio::test]
    async fn full_outbox_makes_emit_wait() {
        let (sink, mut rx) = outbox(1);
        sink.emit(Event::new("first")).await.unwrap();

        let blocked =
            tokio::time::timeout(Duration::from_millis(200), sink.emit(Event::new("second"))).await;
        assert!(blocked.is_err());

        assert_eq!(rx.recv().await.unwrap(), Event::new("first"));
        sink.emit(Event::new("third")).await.unwrap();
        assert_eq!(rx.recv().await.unwrap(), Event::new("third"));
    }

    #[tokio::test]
    async fn dropped_receiver_is_sink_closed() {
        let (sink, rx) = outbox(1);
        drop(rx);
        let err = sink.emit(Event::new("lost")).await.unwrap_err();
        assert!(matches!(err, DrainError::SinkClosed));
    }
}
