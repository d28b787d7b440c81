//! State - ドレイナーの状態

use serde::{Deserialize, Serialize};

/// DrainerState はドレイナーのライフサイクル
///
/// # 状態遷移
/// - Uninitialized -> ConnectedIdle: start() が接続に成功
/// - ConnectedIdle <-> Draining: 空の pop / 要素ありの pop
/// - ConnectedIdle | Draining -> Stopped: RunState が停止を示す、または致命的エラー
///
/// Stopped は終端（再起動なし）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DrainerState {
    Uninitialized,
    ConnectedIdle,
    Draining,
    Stopped,
}

impl DrainerState {
    /// ConnectedIdle and Draining are both "running".
    pub fn is_running(self) -> bool {
        matches!(self, DrainerState::ConnectedIdle | DrainerState::Draining)
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, DrainerState::Stopped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(DrainerState::Uninitialized, false, false)]
    #[case(DrainerState::ConnectedIdle, true, false)]
    #[case(DrainerState::Draining, true, false)]
    #[case(DrainerState::Stopped, false, true)]
    fn running_and_terminal(
        #[case] state: DrainerState,
        #[case] running: bool,
        #[case] terminal: bool,
    ) {
        assert_eq!(state.is_running(), running);
        assert_eq!(state.is_terminal(), terminal);
    }
}
