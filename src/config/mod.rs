//! Configuration management for `plotwatch.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # Configuration section definitions
//! │   ├── watcher    # [watcher]
//! │   ├── render     # [render]
//! │   └── display    # [display]
//! ├── types/         # Utility types
//! │   ├── error      # ConfigError
//! │   └── handle     # Global config handle + reload
//! └── mod.rs         # PlotConfig (this file)
//! ```
//!
//! # Sections
//!
//! | Section      | Purpose                                        |
//! |--------------|------------------------------------------------|
//! | `[watcher]`  | Debounce delay, staleness timeout, file kinds  |
//! | `[render]`   | gnuplot command, terminal, output directory    |
//! | `[display]`  | Where the current preview is published         |
//!
//! A missing config file is not an error: every field has a default.

pub mod section;
pub mod types;
mod util;

use util::find_config_file;

pub use section::{DisplayConfig, RenderConfig, WatcherConfig};
pub use types::{ConfigError, LiveConfig, cfg, init_config, reload_config};

use crate::{
    cli::{Cli, Commands, WatchArgs},
    log,
};
use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing plotwatch.toml
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlotConfig {
    /// CLI arguments reference (internal use only)
    #[serde(skip)]
    pub cli: Option<&'static Cli>,

    /// Absolute path to the config file (internal use only)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Project root directory - parent of config file (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    /// Change gate settings
    #[serde(default)]
    pub watcher: WatcherConfig,

    /// gnuplot invocation
    #[serde(default)]
    pub render: RenderConfig,

    /// Preview publishing
    #[serde(default)]
    pub display: DisplayConfig,
}

impl PlotConfig {
    /// Load configuration from CLI arguments.
    ///
    /// Searches upward from cwd for the config file. Without one, the
    /// defaults apply and the project root is the current directory.
    pub fn load(cli: &'static Cli) -> Result<Self> {
        let (config_path, exists) = Self::resolve_config_path(cli)?;

        let mut config = if exists {
            Self::from_path(&config_path)?
        } else {
            Self::default()
        };

        config.config_path = config_path;
        config.cli = Some(cli);
        config.finalize(cli);
        config.validate()?;

        Ok(config)
    }

    /// Resolve config file path, returning whether it exists.
    fn resolve_config_path(cli: &Cli) -> Result<(PathBuf, bool)> {
        let cwd = std::env::current_dir().context("Failed to get current working directory")?;
        match find_config_file(&cli.config) {
            Some(path) => Ok((path, true)),
            None => Ok((cwd.join(&cli.config), false)),
        }
    }

    /// Finalize configuration after loading.
    fn finalize(&mut self, cli: &Cli) {
        let root = self
            .config_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();

        self.set_root(&root);
        self.normalize_paths(&root);
        self.apply_command_options(cli);
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;
        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>)> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })
        .map_err(ConfigError::from)?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {}, ignoring: {}", display_path, fields.join(", "));
    }

    /// Get the root directory path
    pub fn get_root(&self) -> &Path {
        &self.root
    }

    /// Set the root directory path
    pub fn set_root(&mut self, path: &Path) {
        self.root = path.to_path_buf();
    }

    /// Get path relative to the project root
    pub fn root_relative(&self, path: impl AsRef<Path>) -> PathBuf {
        path.as_ref()
            .strip_prefix(&self.root)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| path.as_ref().to_path_buf())
    }

    // ========================================================================
    // cli configuration updates
    // ========================================================================

    /// Apply command-specific configuration options.
    fn apply_command_options(&mut self, cli: &Cli) {
        crate::logger::set_verbose(cli.verbose);

        match &cli.command {
            Commands::Watch { args } => self.apply_watch_args(args),
            Commands::Render { .. } => {}
        }
    }

    /// Apply watch arguments from CLI.
    fn apply_watch_args(&mut self, args: &WatchArgs) {
        Self::update_option(&mut self.watcher.delay, args.delay.as_ref());
        Self::update_option(&mut self.watcher.timeout, args.timeout.as_ref());
    }

    /// Update config option if CLI value is provided.
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    // ========================================================================
    // path normalization
    // ========================================================================

    /// Normalize all paths relative to root directory.
    fn normalize_paths(&mut self, root: &Path) {
        let root = crate::utils::path::normalize_path(root);
        self.set_root(&root);

        self.config_path = crate::utils::path::normalize_path(&self.config_path);
        self.render.output_dir = crate::utils::path::normalize_path(&root.join(&self.render.output_dir));
    }

    // ========================================================================
    // validation
    // ========================================================================

    /// Validate configuration values.
    pub fn validate(&self) -> Result<()> {
        if self.watcher.timeout < self.watcher.delay {
            bail!(ConfigError::Validation(format!(
                "watcher.timeout ({}ms) must not be shorter than watcher.delay ({}ms)",
                self.watcher.timeout, self.watcher.delay
            )));
        }
        if self.watcher.extensions.is_empty() {
            bail!(ConfigError::Validation(
                "watcher.extensions must list at least one extension".into()
            ));
        }
        if self.render.command.is_empty() {
            bail!(ConfigError::Validation("render.command must not be empty".into()));
        }
        if self.render.extension.is_empty() {
            bail!(ConfigError::Validation("render.extension must not be empty".into()));
        }
        Ok(())
    }
}

// ============================================================================
// Test Helpers (available to all modules via `use crate::config::test_*`)
// ============================================================================

/// Parse config, panicking on unknown fields to catch typos in tests.
#[cfg(test)]
pub fn test_parse_config(content: &str) -> PlotConfig {
    let (parsed, ignored) = PlotConfig::parse_with_ignored(content).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}

// ============================================================================
// tests
// ============================================================================
