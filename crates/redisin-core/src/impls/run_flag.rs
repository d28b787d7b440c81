//! RunFlag - watch チャネルによる RunState
//!
//! - ShutdownHandle はホスト側（停止を要求する）
//! - RunSignal はドレイナー側（読むだけ）

use tokio::sync::watch;

use crate::ports::RunState;

/// Host side of the flag.
#[derive(Debug)]
pub struct ShutdownHandle {
    tx: watch::Sender<bool>,
}

/// Drainer side of the flag. `true` while the host wants the loop to run.
#[derive(Debug, Clone)]
pub struct RunSignal {
    rx: watch::Receiver<bool>,
}

/// New flag in the running state.
pub fn run_flag() -> (ShutdownHandle, RunSignal) {
    let (tx, rx) = watch::channel(true);
    (ShutdownHandle { tx }, RunSignal { rx })
}

impl ShutdownHandle {
    /// Ask every drain loop holding a signal to stop at its next iteration.
    pub fn request_shutdown(&self) {
        // 受信側が既に drop されていても構わない
        self.tx.send_replace(false);
    }

    pub fn is_shutdown_requested(&self) -> bool {
        !*self.tx.borrow()
    }

    pub fn signal(&self) -> RunSignal {
        RunSignal {
            rx: self.tx.subscribe(),
        }
    }
}

impl RunState for RunSignal {
    fn is_running(&self) -> bool {
        *self.rx.borrow()
    }
}
