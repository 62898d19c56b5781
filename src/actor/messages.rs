//! Actor Message Definitions
//!
//! ```text
//! FsActor ──Changed/ReloadConfig──┐
//! FocusActor ──Focus/ReloadConfig─┼──> GateActor
//! TokioScheduler ──Retry──────────┘
//! Coordinator ──Shutdown──────────────> GateActor
//! ```

use std::path::PathBuf;

/// Messages to the Gate Actor
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateMsg {
    /// A watched file changed on disk (normalized absolute path)
    Changed(PathBuf),
    /// Delayed re-check of an earlier change, posted by the scheduler
    Retry(PathBuf),
    /// The active document changed (`None`: nothing focused)
    Focus(Option<PathBuf>),
    /// Re-read `plotwatch.toml`
    ReloadConfig,
    /// Tear down the session
    Shutdown,
}

impl GateMsg {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Changed(_) => "changed",
            Self::Retry(_) => "retry",
            Self::Focus(_) => "focus",
            Self::ReloadConfig => "reload",
            Self::Shutdown => "shutdown",
        }
    }
}
