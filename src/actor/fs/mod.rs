//! FileSystem Actor
//!
//! Watches script files and forwards changes to the GateActor. There is no
//! debouncing here: every accepted event goes straight to the gate, which
//! owns the coalescing window.
//!
//! Architecture:
//! ```text
//! Watcher → Classifier (scope + noise filtering) → GateMsg
//! ```

use std::path::PathBuf;
use std::time::Duration;

use notify::RecommendedWatcher;
use tokio::sync::mpsc;

use super::messages::GateMsg;

// Raw notify events -> gate messages.
mod classifier;
// Watch root attach/re-attach lifecycle.
mod watch_roots;

#[cfg(test)]
mod tests;

use classifier::EventClassifier;
use watch_roots::WatchRoots;

/// How often vanished watch roots are re-attached.
const MAINTAIN_INTERVAL: Duration = Duration::from_secs(1);

/// FileSystem Actor - watches for file changes
///
/// Dropping it drops the notify watcher, which ends the subscription.
pub struct FsActor {
    /// Channel to receive notify events (sync -> async bridge)
    notify_rx: std::sync::mpsc::Receiver<notify::Result<notify::Event>>,
    /// Watcher handle (must be kept alive)
    watcher: RecommendedWatcher,
    /// Watch-root consistency layer (attach/re-attach roots)
    watch_roots: WatchRoots,
    /// Channel to send messages to GateActor
    gate_tx: mpsc::Sender<GateMsg>,
}

impl FsActor {
    /// Create a new FsActor. Watching starts immediately; events buffer
    /// until [`run`](Self::run) drains them.
    #[rustfmt::skip]
    pub fn new(paths: Vec<PathBuf>, gate_tx: mpsc::Sender<GateMsg>) -> notify::Result<Self> {
        // Create sync channel for notify (it doesn't support async)
        let (notify_tx, notify_rx) = std::sync::mpsc::channel();

        let mut watcher = notify::recommended_watcher(move |res| {
            let _ = notify_tx.send(res);
        })?;

        // Missing roots are re-attached later by `maintain`
        let mut watch_roots = WatchRoots::new(paths);
        watch_roots.attach_existing(&mut watcher)?;

        Ok(Self {
            notify_rx,
            watcher,
            watch_roots,
            gate_tx,
        })
    }

    /// Paths this actor is watching, for the startup banner.
    pub fn roots(&self) -> Vec<PathBuf> {
        self.watch_roots.targets()
    }

    /// Run the actor event loop
    pub async fn run(self) {
        let notify_rx = self.notify_rx;
        let gate_tx = self.gate_tx;
        let mut watcher = self.watcher;
        let mut watch_roots = self.watch_roots;

        let (async_tx, mut async_rx) = tokio::sync::mpsc::channel::<notify::Event>(64);

        // Spawn a thread to poll notify events and send to async channel
        std::thread::spawn(move || {
            while let Ok(result) = notify_rx.recv() {
                match result {
                    Ok(event) => {
                        if async_tx.blocking_send(event).is_err() {
                            break; // Receiver dropped
                        }
                    }
                    Err(e) => crate::log!("watch"; "notify error: {}", e),
                }
            }
        });

        let mut maintain = tokio::time::interval(MAINTAIN_INTERVAL);
        loop {
            tokio::select! {
                biased;
                event = async_rx.recv() => {
                    let Some(event) = event else { break };
                    let config = crate::config::cfg();
                    for msg in EventClassifier::classify(&event, &watch_roots, &config) {
                        if gate_tx.send(msg).await.is_err() {
                            return; // GateActor shut down
                        }
                    }
                }
                _ = maintain.tick() => watch_roots.maintain(&mut watcher),
            }
        }
    }
}
