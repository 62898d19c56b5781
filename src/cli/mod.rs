//! Command-line interface module.

mod args;
pub mod render;
pub mod watch;

pub use args::{Cli, Commands, WatchArgs};
