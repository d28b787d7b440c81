//! RunState port - ホストが持つ継続フラグ

use std::sync::atomic::{AtomicBool, Ordering};

/// Read-only view of the host's liveness flag.
///
/// The drain loop checks it once per iteration.
pub trait RunState: Send + Sync {
    fn is_running(&self) -> bool;
}

impl RunState for AtomicBool {
    fn is_running(&self) -> bool {
        self.load(Ordering::Acquire)
    }
}
