//! Preview watching core.
//!
//! Decides, per watched file, when a change actually triggers a rebuild:
//!
//! ```text
//! notification ──> ChangeGate ──> WatchRegistry
//!                      │
//!                      ├── Scheduler (one-shot delayed retry)
//!                      └── Renderer ──> Viewer
//! ```
//!
//! # Module Structure
//!
//! - `registry` - per-file tracking state (last change, last good preview)
//! - `gate` - debounce/timeout state machine
//! - `clock` - time source (system or virtual)
//! - `schedule` - delayed retry capability
//! - `document` - buffer abstraction handed in by the host
//! - `preview` - preview artifact plus render/view collaborators
//!
//! Nothing here performs I/O on its own; the host wires the ports to the
//! file system, gnuplot and the terminal.

mod clock;
mod document;
mod gate;
mod preview;
mod registry;
mod schedule;


#[cfg(test)]
pub use clock::ManualClock;
pub use clock::{Clock, SystemClock};
pub use document::{Document, FsDocument};
pub use gate::{
    ChangeGate, ConfigSource, DEFAULT_DELAY_MS, DEFAULT_LANGUAGE, DEFAULT_TIMEOUT_MS, GateTiming,
    Outcome,
};
pub use preview::{Preview, Renderer, Viewer};
pub use registry::{WatchRegistry, WatchedFile};
pub use schedule::Scheduler;
