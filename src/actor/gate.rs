//! Gate Actor
//!
//! Owns the [`ChangeGate`] and is the only place it is touched, so every
//! gate decision runs on one logical thread. Renders are blocking and run
//! under `block_in_place`, which keeps them serialized on this actor while
//! the other actors keep draining their sources.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tokio::runtime::Handle;
use tokio::sync::mpsc;

use super::messages::GateMsg;
use crate::config::{LiveConfig, cfg, reload_config};
use crate::logger::status_error;
use crate::render::{FileDisplay, GnuplotRenderer};
use crate::watch::{ChangeGate, Outcome, Scheduler, SystemClock};

/// Schedules retries as timer tasks that post back into the gate mailbox.
pub struct TokioScheduler {
    tx: mpsc::Sender<GateMsg>,
    handle: Handle,
}

impl TokioScheduler {
    /// Must be called from within a tokio runtime.
    pub fn new(tx: mpsc::Sender<GateMsg>) -> Self {
        Self {
            tx,
            handle: Handle::current(),
        }
    }
}

impl Scheduler for TokioScheduler {
    fn schedule_retry(&self, identity: &Path, delay: Duration) {
        let tx = self.tx.clone();
        let path = identity.to_path_buf();
        self.handle.spawn(async move {
            tokio::time::sleep(delay).await;
            // Mailbox is gone once the gate has shut down
            let _ = tx.send(GateMsg::Retry(path)).await;
        });
    }
}

/// Gate Actor - serializes change handling and rendering
pub struct GateActor {
    rx: mpsc::Receiver<GateMsg>,
    gate: ChangeGate,
}

impl GateActor {
    /// Build the production gate: system clock, gnuplot, file display.
    ///
    /// Must be called from within a tokio runtime.
    pub fn new(rx: mpsc::Receiver<GateMsg>, tx: mpsc::Sender<GateMsg>) -> Result<Self> {
        let mut gate = ChangeGate::new(
            Arc::new(SystemClock),
            Box::new(TokioScheduler::new(tx)),
            Box::new(GnuplotRenderer::live()),
            Box::new(FileDisplay::live()),
        )
        .with_language(cfg().watcher.language.clone());
        gate.read_config(&LiveConfig)?;

        Ok(Self::with_gate(rx, gate))
    }

    pub fn with_gate(rx: mpsc::Receiver<GateMsg>, gate: ChangeGate) -> Self {
        Self { rx, gate }
    }

    /// Run the actor event loop until `Shutdown` or until every sender is gone.
    pub async fn run(mut self) {
        while let Some(msg) = self.rx.recv().await {
            match msg {
                GateMsg::Changed(path) => self.handle_change(&path, false),
                GateMsg::Retry(path) => self.handle_change(&path, true),
                GateMsg::Focus(path) => self.handle_focus(path),
                GateMsg::ReloadConfig => self.handle_reload(),
                GateMsg::Shutdown => break,
            }
        }

        crate::debug!("gate"; "stopping, {} files tracked", self.gate.registry().len());
        self.gate.teardown();
    }

    fn handle_change(&mut self, path: &Path, retry: bool) {
        let doc = cfg().watcher.document(path);
        let gate = &mut self.gate;
        let result = tokio::task::block_in_place(|| gate.on_file_change(&doc, retry));
        report(path, retry, result);
    }

    fn handle_focus(&mut self, path: Option<PathBuf>) {
        let Some(path) = path else {
            crate::debug!("gate"; "focus cleared");
            return;
        };

        let doc = cfg().watcher.document(&path);
        let gate = &mut self.gate;
        let result = tokio::task::block_in_place(|| gate.on_editor_change(Some(&doc)));
        if matches!(result, Ok(Outcome::Ignored)) {
            crate::log!("watch"; "not a {} script: {}", self.gate.language(), shown(&path));
            return;
        }
        report(&path, false, result);
    }

    fn handle_reload(&mut self) {
        match reload_config() {
            Ok(true) => {}
            Ok(false) => {
                crate::debug!("watch"; "config unchanged");
                return;
            }
            Err(e) => {
                status_error("config reload failed", &format!("{e:#}"));
                return;
            }
        }

        self.gate.set_language(cfg().watcher.language.clone());
        if let Err(e) = self.gate.read_config(&LiveConfig) {
            status_error("config reload failed", &format!("{e:#}"));
            return;
        }

        let timing = self.gate.timing();
        crate::log!("watch"; "config reloaded: delay {}ms, timeout {}ms",
            timing.delay.as_millis(), timing.timeout.as_millis());
    }
}

fn report(path: &Path, retry: bool, result: Result<Outcome>) {
    match result {
        Ok(outcome) => {
            let via = if retry { " (retry)" } else { "" };
            crate::debug!("gate"; "{}{}: {}", outcome.label(), via, shown(path));
        }
        Err(e) => status_error(&format!("render failed: {}", shown(path)), &format!("{e:#}")),
    }
}

fn shown(path: &Path) -> String {
    cfg().root_relative(path).display().to_string()
}
