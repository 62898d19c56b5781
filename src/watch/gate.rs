//! Debounce/timeout state machine.
//!
//! Per file the gate cycles through:
//!
//! ```text
//!            change < delay since last           retry, quiet for >= delay
//!   Idle ─────────────────────────────> Pending ───────────────────────────┐
//!    ▲                                     │ newer change arrived           │
//!    │                                     ▼                                ▼
//!    │                               (Superseded)                 age > timeout ?
//!    │                                                            ├─ yes: Abandoned
//!    └──────────────────────────────────────────────────────────── └─ no:  Fired
//! ```
//!
//! A change that arrives after a quiet period fires immediately. Focus
//! changes bypass the state machine and always fire.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};

use super::clock::Clock;
use super::document::Document;
use super::preview::{Renderer, Viewer};
use super::registry::WatchRegistry;
use super::schedule::Scheduler;

/// Default coalescing window.
pub const DEFAULT_DELAY_MS: u64 = 1000;
/// Default staleness cutoff.
pub const DEFAULT_TIMEOUT_MS: u64 = 5000;
/// Default watched document kind.
pub const DEFAULT_LANGUAGE: &str = "gnuplot";

/// Debounce window and staleness cutoff.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GateTiming {
    pub delay: Duration,
    pub timeout: Duration,
}

impl GateTiming {
    pub const fn from_millis(delay_ms: u64, timeout_ms: u64) -> Self {
        Self {
            delay: Duration::from_millis(delay_ms),
            timeout: Duration::from_millis(timeout_ms),
        }
    }
}

impl Default for GateTiming {
    fn default() -> Self {
        Self::from_millis(DEFAULT_DELAY_MS, DEFAULT_TIMEOUT_MS)
    }
}

/// Supplies `delay` and `timeout` on demand.
pub trait ConfigSource {
    fn timing(&self) -> Result<GateTiming>;
}

/// What the gate decided for one notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Not a watched document kind, or no document at all.
    Ignored,
    /// Inside the delay window; a retry has been scheduled.
    Pending,
    /// A retry found a newer change; that change's own retry takes over.
    Superseded,
    /// Render and view were invoked.
    Fired,
    /// Eligible, but older than the timeout.
    Abandoned,
    /// A retry arrived after teardown.
    Detached,
}

impl Outcome {
    pub fn label(self) -> &'static str {
        match self {
            Self::Ignored => "ignored",
            Self::Pending => "pending",
            Self::Superseded => "superseded",
            Self::Fired => "fired",
            Self::Abandoned => "abandoned",
            Self::Detached => "detached",
        }
    }
}

/// Decides when a change triggers a rebuild.
pub struct ChangeGate {
    registry: WatchRegistry,
    timing: GateTiming,
    language: String,
    clock: Arc<dyn Clock>,
    scheduler: Box<dyn Scheduler>,
    renderer: Box<dyn Renderer>,
    viewer: Box<dyn Viewer>,
}

impl ChangeGate {
    pub fn new(
        clock: Arc<dyn Clock>,
        scheduler: Box<dyn Scheduler>,
        renderer: Box<dyn Renderer>,
        viewer: Box<dyn Viewer>,
    ) -> Self {
        Self {
            registry: WatchRegistry::new(),
            timing: GateTiming::default(),
            language: DEFAULT_LANGUAGE.to_string(),
            clock,
            scheduler,
            renderer,
            viewer,
        }
    }

    /// Set the watched document kind.
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.set_language(language);
        self
    }

    pub fn set_language(&mut self, language: impl Into<String>) {
        self.language = language.into();
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    /// Set timing directly, bypassing a config source.
    pub fn with_timing(mut self, timing: GateTiming) -> Self {
        self.timing = timing;
        self
    }

    /// (Re-)read `delay` and `timeout`.
    pub fn read_config(&mut self, source: &dyn ConfigSource) -> Result<()> {
        let timing = source.timing()?;
        if timing != self.timing {
            crate::debug!("gate"; "delay {}ms, timeout {}ms",
                timing.delay.as_millis(), timing.timeout.as_millis());
        }
        self.timing = timing;
        Ok(())
    }

    pub fn timing(&self) -> GateTiming {
        self.timing
    }

    pub fn registry(&self) -> &WatchRegistry {
        &self.registry
    }

    /// Handle a change notification, or the delayed retry of one.
    pub fn on_file_change(&mut self, doc: &dyn Document, retry: bool) -> Result<Outcome> {
        let identity = doc.identity();
        if !self.is_watched(doc) {
            return Ok(Outcome::Ignored);
        }
        if retry && !self.registry.contains(identity) {
            crate::debug!("gate"; "retry after teardown: {}", identity.display());
            return Ok(Outcome::Detached);
        }

        let now = self.clock.now();
        let file = self.registry.ensure(identity, now);
        let elapsed = now.saturating_duration_since(file.last_change_at());

        if elapsed < self.timing.delay {
            if retry {
                return Ok(Outcome::Superseded);
            }
            file.touch(now);
            self.scheduler.schedule_retry(identity, self.timing.delay);
            return Ok(Outcome::Pending);
        }

        file.touch(now);

        // A retry stands for the change recorded before this update; a direct
        // change is being handled as it happens.
        let age = if retry { elapsed } else { Duration::ZERO };
        if age > self.timing.timeout {
            crate::debug!("gate"; "stale by {}ms: {}", age.as_millis(), identity.display());
            return Ok(Outcome::Abandoned);
        }

        self.update_preview(doc)?;
        Ok(Outcome::Fired)
    }

    /// Handle a focus change. Always refreshes the newly active file.
    pub fn on_editor_change(&mut self, doc: Option<&dyn Document>) -> Result<Outcome> {
        let Some(doc) = doc else {
            return Ok(Outcome::Ignored);
        };
        if !self.is_watched(doc) {
            return Ok(Outcome::Ignored);
        }

        self.registry.ensure(doc.identity(), self.clock.now());
        self.update_preview(doc)?;
        Ok(Outcome::Fired)
    }

    /// End the watching session. Retries still in flight become no-ops.
    pub fn teardown(&mut self) {
        if !self.registry.is_empty() {
            crate::debug!("gate"; "teardown");
        }
        self.registry.clear();
    }

    fn is_watched(&self, doc: &dyn Document) -> bool {
        doc.language() == self.language
    }

    /// Save, render, keep the result if usable, then show the last good preview.
    fn update_preview(&mut self, doc: &dyn Document) -> Result<()> {
        let identity = doc.identity();
        doc.save()
            .with_context(|| format!("failed to save {}", identity.display()))?;

        let preview = self.renderer.render(doc)?;
        if preview.is_empty() {
            crate::debug!("gate"; "empty render, keeping last preview: {}", identity.display());
        }
        self.registry.set_preview(identity, preview);

        if let Some(file) = self.registry.get(identity) {
            self.viewer.update(file.last_preview());
        }
        Ok(())
    }
}
