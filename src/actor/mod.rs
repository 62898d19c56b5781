//! Actor System for Live Preview
//!
//! Message-passing concurrency for watch mode:
//!
//! ```text
//! FsActor ───────┐
//! (notify)       │
//! FocusActor ────┼──> GateActor ──> gnuplot ──> display
//! (stdin)        │    (debounce)
//! retry timers ──┘
//! ```
//!
//! # Module Structure
//!
//! - `messages` - Message types for inter-actor communication
//! - `fs` - File system watcher and event classification
//! - `focus` - Active document commands from stdin
//! - `gate` - Owns the change gate, runs renders
//! - `coordinator` - Wires up and runs actors

pub mod coordinator;
pub mod focus;
pub mod fs;
pub mod gate;
pub mod messages;

pub use coordinator::Coordinator;
