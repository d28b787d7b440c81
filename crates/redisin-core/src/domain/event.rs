//! Event - キューから取り出した 1 要素のラッパー
//!
//! ペイロード以外のメタデータは持たない（下流ステージが付与する）。

use std::borrow::Cow;

/// One popped payload, unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    payload: Vec<u8>,
}

impl Event {
    pub fn new(payload: impl Into<Vec<u8>>) -> Self {
        Self {
            payload: payload.into(),
        }
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    pub fn into_payload(self) -> Vec<u8> {
        self.payload
    }

    /// Payload as text; invalid UTF-8 is replaced.
    pub fn payload_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.payload)
    }
}
