use std::time::Duration;

use anyhow::Result;
use crossbeam::channel::Receiver;
use tokio::sync::mpsc;

use crate::actor::fs::FsActor;
use crate::actor::gate::GateActor;
use crate::actor::messages::GateMsg;

/// Run all actors concurrently.
pub(super) async fn run_actors(
    fs: FsActor,
    gate: GateActor,
    gate_tx: mpsc::Sender<GateMsg>,
    shutdown_rx: Option<Receiver<()>>,
) -> Result<()> {
    let gate_handle = tokio::spawn(async move { gate.run().await });
    let fs_handle = tokio::spawn(async move { fs.run().await });

    if let Some(rx) = shutdown_rx {
        loop {
            if rx.try_recv().is_ok() {
                crate::debug!("actor"; "shutdown signal received");
                break;
            }
            if fs_handle.is_finished() {
                crate::log!("actor"; "file watcher stopped");
                break;
            }
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
    } else {
        let _ = fs_handle.await;
    }

    crate::debug!("actor"; "sending shutdown to gate");
    let _ = gate_tx.send(GateMsg::Shutdown).await;

    // A render in progress finishes first
    let _ = tokio::time::timeout(Duration::from_secs(5), gate_handle).await;

    Ok(())
}
