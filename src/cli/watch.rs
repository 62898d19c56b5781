//! `plotwatch watch` - live preview session.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};

use super::WatchArgs;
use crate::{actor::Coordinator, config::PlotConfig, core, log};

/// Run the actor system until Ctrl+C.
pub fn watch(config: Arc<PlotConfig>, args: &WatchArgs) -> Result<()> {
    config.render.check_command()?;

    let (shutdown_tx, shutdown_rx) = crossbeam::channel::bounded(1);
    core::register_shutdown(shutdown_tx);

    let rt = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
        .context("Failed to create tokio runtime")?;

    log!("watch"; "delay {}ms, timeout {}ms", config.watcher.delay, config.watcher.timeout);

    let result = rt.block_on(
        Coordinator::with_config(config)
            .with_paths(args.paths.clone())
            .with_open(args.open.clone())
            .with_stdin(!args.no_stdin)
            .with_shutdown_signal(shutdown_rx)
            .run(),
    );

    // Leftover retry timers are not worth waiting for
    rt.shutdown_timeout(Duration::from_millis(500));

    if let Err(e) = &result {
        log!("actor"; "error: {:#}", e);
    } else if core::is_shutdown() {
        log!("watch"; "stopped");
    }
    result
}
