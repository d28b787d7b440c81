//! QueueDrainer - リスト型キューを読み出してイベントとして流す入力アダプタ
//!
//! # フロー
//! 1. start(): ConnectionProvider で接続（DB 選択込み）→ ドレインループを spawn
//! 2. ループ: RunState を確認 → RPOP → 空なら 100ms 待つ / 要素ありなら Event にして EventSink へ
//! 3. RunState が停止を示したら次の周回の先頭で抜ける → 接続は task と一緒に drop
//!
//! # 方針
//! - 再接続はしない。pop の失敗はタスクの終了としてホストに返す（join() で観測）
//! - キュー名と接続パラメータは start() 時に確定し、以後変わらない

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, trace};

use crate::app::pool::QueuePool;
use crate::domain::{DrainError, DrainerConfig, DrainerState, Event, PoolError};
use crate::observability::{DrainCounts, DrainStats};
use crate::ports::{ConnectionProvider, EventSink, QueueConnection, RunState};

/// Name of the output queue the drainer registers in the host's pool.
pub const OUTBOX: &str = "outbox";

/// Pause after an empty pop.
pub const IDLE_BACKOFF: Duration = Duration::from_millis(100);

pub struct QueueDrainer {
    config: DrainerConfig,
    provider: Arc<dyn ConnectionProvider>,
    sink: Arc<dyn EventSink>,
    run_state: Arc<dyn RunState>,
    stats: Arc<DrainStats>,
    state: Arc<watch::Sender<DrainerState>>,
    task: Option<JoinHandle<Result<(), DrainError>>>,
}

impl QueueDrainer {
    pub fn new(
        config: DrainerConfig,
        provider: Arc<dyn ConnectionProvider>,
        sink: Arc<dyn EventSink>,
        run_state: Arc<dyn RunState>,
    ) -> Self {
        let (state, _) = watch::channel(DrainerState::Uninitialized);
        Self {
            config,
            provider,
            sink,
            run_state,
            stats: Arc::new(DrainStats::default()),
            state: Arc::new(state),
            task: None,
        }
    }

    /// Register the `outbox` queue in `pool` and emit into it.
    pub fn with_pool(
        config: DrainerConfig,
        provider: Arc<dyn ConnectionProvider>,
        pool: &mut QueuePool,
        outbox_capacity: usize,
        run_state: Arc<dyn RunState>,
    ) -> Result<Self, PoolError> {
        let sink = pool.create_queue(OUTBOX, outbox_capacity)?;
        Ok(Self::new(config, provider, Arc::new(sink), run_state))
    }

    pub fn config(&self) -> &DrainerConfig {
        &self.config
    }

    pub fn state(&self) -> DrainerState {
        *self.state.borrow()
    }

    pub fn watch_state(&self) -> watch::Receiver<DrainerState> {
        self.state.subscribe()
    }

    pub fn stats(&self) -> DrainCounts {
        self.stats.snapshot()
    }

    /// Connect and spawn the drain loop. Returns as soon as the task is spawned.
    ///
    /// A failed connect leaves the drainer `Uninitialized`; any other state
    /// means `start` already succeeded once.
    pub async fn start(&mut self) -> Result<(), DrainError> {
        if self.state() != DrainerState::Uninitialized {
            return Err(DrainError::AlreadyStarted);
        }

        let store = &self.config.store;
        let connection = self.provider.connect(store).await?;
        info!(
            host = %store.host,
            port = store.port,
            database = store.database,
            queue = %self.config.queue,
            "connection to {} created",
            store.host
        );

        self.state.send_replace(DrainerState::ConnectedIdle);

        let drain = DrainLoop {
            queue: self.config.queue.clone(),
            connection,
            sink: Arc::clone(&self.sink),
            run_state: Arc::clone(&self.run_state),
            stats: Arc::clone(&self.stats),
            state: Arc::clone(&self.state),
        };
        self.task = Some(tokio::spawn(drain.run()));
        Ok(())
    }

    /// Wait for the drain task to finish and return how it ended.
    ///
    /// Returns `Ok(())` immediately if no task is running. Cancel-safe: the
    /// handle is only released once the task has actually finished.
    pub async fn join(&mut self) -> Result<(), DrainError> {
        let Some(task) = self.task.as_mut() else {
            return Ok(());
        };
        let joined = task.await;
        self.task = None;
        match joined {
            Ok(result) => result,
            Err(e) => {
                self.state.send_replace(DrainerState::Stopped);
                Err(DrainError::TaskFailed(e.to_string()))
            }
        }
    }
}

/// Everything the background task owns. Captured once at `start()`.
struct DrainLoop {
    queue: String,
    connection: Box<dyn QueueConnection>,
    sink: Arc<dyn EventSink>,
    run_state: Arc<dyn RunState>,
    stats: Arc<DrainStats>,
    state: Arc<watch::Sender<DrainerState>>,
}

impl DrainLoop {
    async fn run(mut self) -> Result<(), DrainError> {
        info!(queue = %self.queue, "drain loop started");

        let result = self.drain().await;
        self.state.send_replace(DrainerState::Stopped);

        match &result {
            Ok(()) => info!(queue = %self.queue, "drain loop stopped"),
            Err(e) => error!(queue = %self.queue, error = %e, "drain loop terminated"),
        }
        result
    }

    async fn drain(&mut self) -> Result<(), DrainError> {
        while self.run_state.is_running() {
            self.stats.record_pop_attempt();
            match self.connection.pop_right(&self.queue).await? {
                None => {
                    self.stats.record_empty_poll();
                    self.set_state(DrainerState::ConnectedIdle);
                    trace!(queue = %self.queue, "queue empty");
                    tokio::time::sleep(IDLE_BACKOFF).await;
                }
                Some(payload) => {
                    self.set_state(DrainerState::Draining);
                    // 背圧がかかればここで待つ。捨てない。
                    self.sink.emit(Event::new(payload)).await?;
                    self.stats.record_emitted();
                }
            }
        }
        debug!(queue = %self.queue, "run state cleared");
        Ok(())
    }

    fn set_state(&self, next: DrainerState) {
        self.state.send_if_modified(|current| {
            if *current == next {
                return false;
            }
            *current = next;
            true
        });
    }
}
