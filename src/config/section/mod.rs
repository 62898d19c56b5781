//! Configuration section definitions.
//!
//! | Module     | Section      |
//! |------------|--------------|
//! | `watcher`  | `[watcher]`  |
//! | `render`   | `[render]`   |
//! | `display`  | `[display]`  |

mod display;
mod render;
mod watcher;

pub use display::DisplayConfig;
pub use render::RenderConfig;
pub use watcher::WatcherConfig;
