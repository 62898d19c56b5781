//! Render and display collaborators backed by real programs and files.
//!
//! - [`gnuplot`]: runs the gnuplot executable on a script, producing an image
//! - [`display`]: publishes the current preview and reports it on the status line

pub mod display;
pub mod gnuplot;

pub use display::FileDisplay;
pub use gnuplot::{GnuplotRenderer, RenderError};
