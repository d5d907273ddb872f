use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::sync::broadcast::error::RecvError;
use tracing::info;

use roomplan::command::parse_command;
use roomplan::console::{self, Reply};
use roomplan::engine::Engine;
use roomplan::notify::NotifyHub;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let metrics_port: Option<u16> = std::env::var("ROOMPLAN_METRICS_PORT")
        .ok()
        .and_then(|s| s.parse().ok());
    roomplan::observability::init(metrics_port)?;

    let seed: Option<u64> = std::env::var("ROOMPLAN_SEED")
        .ok()
        .and_then(|s| s.parse().ok());
    let random_on_start = std::env::var("ROOMPLAN_RANDOM_ON_START")
        .map(|s| matches!(s.as_str(), "1" | "true"))
        .unwrap_or(false);

    let notify = Arc::new(NotifyHub::new());
    let engine = Arc::new(Engine::new(notify.clone(), seed));
    if random_on_start {
        engine.occupy_random().await?;
    }

    let stats = engine.stats().await;
    info!("roomplan ready");
    info!("  rooms: {} ({} available)", stats.total, stats.available);
    info!("  seed: {}", seed.map_or("entropy".to_string(), |s| s.to_string()));
    info!("  metrics: {}", metrics_port.map_or("disabled".to_string(), |p| format!("http://0.0.0.0:{p}/metrics")));

    // Stop on ctrl-c/SIGTERM as well as on `quit` or end of input
    let shutdown = async {
        let ctrl_c = tokio::signal::ctrl_c();
        #[cfg(unix)]
        {
            match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
                Ok(mut sigterm) => {
                    tokio::select! {
                        _ = ctrl_c => {}
                        _ = sigterm.recv() => {}
                    }
                }
                Err(e) => {
                    tracing::warn!("failed to register SIGTERM handler: {e}");
                    ctrl_c.await.ok();
                }
            }
        }
        #[cfg(not(unix))]
        {
            ctrl_c.await.ok();
        }
    };
    tokio::pin!(shutdown);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();
    let prune_every = Duration::from_secs(60);
    let mut prune = tokio::time::interval_at(tokio::time::Instant::now() + prune_every, prune_every);

    loop {
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;

        let line = tokio::select! {
            line = lines.next_line() => line?,
            _ = prune.tick() => {
                notify.prune();
                continue;
            }
            _ = &mut shutdown => {
                info!("shutdown signal received");
                break;
            }
        };
        let Some(line) = line else { break };
        if line.trim().is_empty() {
            continue;
        }

        let cmd = match parse_command(&line) {
            Ok(cmd) => cmd,
            Err(e) => {
                stdout.write_all(format!("error: {e}\n").as_bytes()).await?;
                continue;
            }
        };

        match console::execute_command(&engine, cmd).await {
            Ok(Reply::Quit) => break,
            Ok(Reply::Watching { room, mut events }) => {
                stdout.write_all(format!("watching room {room}\n").as_bytes()).await?;
                tokio::spawn(async move {
                    let mut out = tokio::io::stdout();
                    loop {
                        let event = match events.recv().await {
                            Ok(event) => event,
                            Err(RecvError::Lagged(n)) => {
                                tracing::warn!("watcher for room {room} skipped {n} events");
                                continue;
                            }
                            Err(RecvError::Closed) => break,
                        };
                        let line = format!("{}\n", console::render_event(room, &event));
                        if out.write_all(line.as_bytes()).await.is_err() {
                            break;
                        }
                    }
                });
            }
            Ok(reply) => stdout.write_all(format!("{reply}\n").as_bytes()).await?,
            Err(e) => stdout.write_all(format!("error: {e}\n").as_bytes()).await?,
        }
    }

    info!("roomplan stopped");
    Ok(())
}
