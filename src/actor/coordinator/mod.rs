//! Actor Coordinator - Wires up the Live Preview Actor System
//!
//! The Coordinator is a thin orchestrator that:
//! - Creates the gate mailbox
//! - Wires up actors
//! - Runs them until shutdown

mod runtime;
mod watch_paths;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Result, anyhow};
use crossbeam::channel::Receiver;
use tokio::sync::mpsc;

use super::focus::FocusActor;
use super::fs::FsActor;
use super::gate::GateActor;
use super::messages::GateMsg;
use crate::config::PlotConfig;
use crate::utils::path::{normalize_path, resolve_path};

const CHANNEL_BUFFER: usize = 32;

/// Coordinator - wires up and runs the actor system.
pub struct Coordinator {
    config: Arc<PlotConfig>,
    paths: Vec<PathBuf>,
    open: Option<PathBuf>,
    read_stdin: bool,
    shutdown_rx: Option<Receiver<()>>,
}

impl Coordinator {
    /// Create from Arc<PlotConfig>.
    pub fn with_config(config: Arc<PlotConfig>) -> Self {
        Self {
            config,
            paths: Vec::new(),
            open: None,
            read_stdin: true,
            shutdown_rx: None,
        }
    }

    /// Files or directories to watch (default: project root).
    pub fn with_paths(mut self, paths: Vec<PathBuf>) -> Self {
        self.paths = paths;
        self
    }

    /// Script to focus on start.
    pub fn with_open(mut self, open: Option<PathBuf>) -> Self {
        self.open = open;
        self
    }

    /// Whether focus commands are read from stdin.
    pub fn with_stdin(mut self, enable: bool) -> Self {
        self.read_stdin = enable;
        self
    }

    /// Set shutdown signal receiver.
    pub fn with_shutdown_signal(mut self, rx: Receiver<()>) -> Self {
        self.shutdown_rx = Some(rx);
        self
    }

    /// Run the actor system.
    pub async fn run(mut self) -> Result<()> {
        let (gate_tx, gate_rx) = mpsc::channel::<GateMsg>(CHANNEL_BUFFER);

        let watch_paths = watch_paths::collect_watch_paths(&self.config, &self.paths);
        let fs_actor = FsActor::new(watch_paths, gate_tx.clone())
            .map_err(|e| anyhow!("watcher failed: {}", e))?;
        let gate_actor = GateActor::new(gate_rx, gate_tx.clone())?;

        for root in fs_actor.roots() {
            crate::log!("watch"; "watching {}", self.config.root_relative(&root).display());
        }

        if self.read_stdin {
            FocusActor::stdin(gate_tx.clone(), self.config.get_root().to_path_buf()).spawn();
        }

        if let Some(open) = self.open.take() {
            let path = normalize_path(&resolve_path(&open, self.config.get_root()));
            gate_tx.send(GateMsg::Focus(Some(path))).await?;
        }

        crate::debug!("actor"; "start");
        let shutdown_rx = self.shutdown_rx.take();
        runtime::run_actors(fs_actor, gate_actor, gate_tx, shutdown_rx).await?;

        crate::debug!("actor"; "stopped");
        Ok(())
    }
}
