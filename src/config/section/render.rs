//! `[render]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [render]
//! command = ["gnuplot"]                  # Program (and leading args) to run
//! terminal = "pngcairo size 800,600"     # gnuplot `set terminal` argument
//! extension = "png"                      # Extension of produced images
//! output_dir = ".plotwatch"              # Where images are written (relative to root)
//! ```

use std::path::PathBuf;

use anyhow::{Result, bail};
use serde::Deserialize;

/// gnuplot invocation settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Program and leading arguments.
    pub command: Vec<String>,

    /// Argument of `set terminal`.
    pub terminal: String,

    /// Extension of the produced image.
    pub extension: String,

    /// Output directory for rendered images.
    pub output_dir: PathBuf,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            command: vec!["gnuplot".into()],
            terminal: "pngcairo size 800,600".into(),
            extension: "png".into(),
            output_dir: PathBuf::from(".plotwatch"),
        }
    }
}

impl RenderConfig {
    /// Program that runs scripts (first element of `command`).
    pub fn program(&self) -> &str {
        self.command.first().map_or("", String::as_str)
    }

    /// Ensure the render program can be found on `PATH`.
    pub fn check_command(&self) -> Result<()> {
        let program = self.program();
        if which::which(program).is_err() {
            bail!("`{program}` not found, install gnuplot or update render.command");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::RenderConfig;
    use crate::config::test_parse_config;
    use std::path::PathBuf;

    #[test]
    fn test_render_config() {
        let config = test_parse_config(
            "[render]\ncommand = [\"/opt/gnuplot/bin/gnuplot\", \"-d\"]\nterminal = \"svg\"\nextension = \"svg\"\noutput_dir = \"out\"",
        );

        assert_eq!(config.render.command.len(), 2);
        assert_eq!(config.render.terminal, "svg");
        assert_eq!(config.render.extension, "svg");
        assert_eq!(config.render.output_dir, PathBuf::from("out"));
    }

    #[test]
    fn test_program() {
        assert_eq!(RenderConfig::default().program(), "gnuplot");

        let empty = RenderConfig {
            command: Vec::new(),
            ..RenderConfig::default()
        };
        assert_eq!(empty.program(), "");
    }

    #[test]
    fn test_check_command_missing() {
        let config = RenderConfig {
            command: vec!["plotwatch-no-such-gnuplot".into()],
            ..RenderConfig::default()
        };
        let err = config.check_command().unwrap_err();
        assert!(err.to_string().contains("render.command"));
    }
}
