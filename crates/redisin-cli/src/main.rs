use std::process::ExitCode;
use std::sync::Arc;

use redisin_core::app::OUTBOX;
use redisin_core::impls::{RedisConnectionProvider, run_flag};
use redisin_core::{DrainerConfig, Event, QueueDrainer, QueuePool};
use tokio::sync::mpsc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

const OUTBOX_CAPACITY: usize = 1024;
const QUEUE_ENV: &str = "REDISIN_QUEUE";

fn load_config() -> Result<DrainerConfig, String> {
    let mut config = match std::env::args().nth(1) {
        Some(path) => DrainerConfig::from_file(&path).map_err(|e| e.to_string())?,
        None => DrainerConfig::default(),
    };
    if let Ok(queue) = std::env::var(QUEUE_ENV)
        && !queue.is_empty()
    {
        config.queue = queue;
    }
    Ok(config)
}

/// outbox の消費者：1 イベント 1 行の JSON で標準出力へ
async fn print_events(mut rx: mpsc::Receiver<Event>) {
    while let Some(event) = rx.recv().await {
        let line = serde_json::json!({ "data": event.payload_lossy() });
        println!("{line}");
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "failed to load config");
            return ExitCode::FAILURE;
        }
    };

    // (A) outbox と停止フラグを用意
    let mut pool = QueuePool::new();
    let (shutdown, signal) = run_flag();
    let mut drainer = match QueueDrainer::with_pool(
        config,
        Arc::new(RedisConnectionProvider::new()),
        &mut pool,
        OUTBOX_CAPACITY,
        Arc::new(signal),
    ) {
        Ok(drainer) => drainer,
        Err(e) => {
            error!(error = %e, "failed to register outbox");
            return ExitCode::FAILURE;
        }
    };
    let rx = match pool.take_receiver(OUTBOX) {
        Ok(rx) => rx,
        Err(e) => {
            error!(error = %e, "outbox receiver unavailable");
            return ExitCode::FAILURE;
        }
    };
    let printer = tokio::spawn(print_events(rx));

    // (B) 接続してドレインループを起動
    if let Err(e) = drainer.start().await {
        error!(error = %e, "failed to start");
        return ExitCode::FAILURE;
    }

    // (C) Ctrl-C で停止を要求（ループは次の周回で抜ける）
    let finished = tokio::select! {
        signal = tokio::signal::ctrl_c() => {
            if let Err(e) = signal {
                warn!(error = %e, "cannot listen for ctrl-c; stopping");
            }
            None
        }
        result = drainer.join() => Some(result),
    };
    let result = match finished {
        Some(result) => result,
        None => {
            info!("shutdown requested");
            shutdown.request_shutdown();
            drainer.join().await
        }
    };

    // (D) drainer を drop して outbox を閉じ、残りを出力し切る
    info!(counts = ?drainer.stats(), "drainer finished");
    drop(drainer);
    drop(pool);
    let _ = printer.await;

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(_) => ExitCode::FAILURE,
    }
}
