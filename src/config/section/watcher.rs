//! `[watcher]` section configuration.
//!
//! Controls the change gate.
//!
//! # Example
//!
//! ```toml
//! [watcher]
//! delay = 1000                 # Quiet period before a burst of edits is rebuilt (ms)
//! timeout = 5000               # Pending rebuilds older than this are dropped (ms)
//! language = "gnuplot"         # Document kind that triggers rebuilds
//! extensions = ["gp", "plt"]   # File extensions of that kind
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::watch::{
    DEFAULT_DELAY_MS, DEFAULT_LANGUAGE, DEFAULT_TIMEOUT_MS, FsDocument, GateTiming,
};

/// Language reported for files outside the watched kind.
pub const PLAIN_TEXT: &str = "plaintext";

/// Change gate settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WatcherConfig {
    /// Debounce coalescing window in milliseconds.
    pub delay: u64,

    /// Maximum staleness of a pending rebuild in milliseconds.
    pub timeout: u64,

    /// Watched document kind.
    pub language: String,

    /// File extensions (without dot) recognized as `language`.
    pub extensions: Vec<String>,
}

impl Default for WatcherConfig {
    fn default() -> Self {
        Self {
            delay: DEFAULT_DELAY_MS,
            timeout: DEFAULT_TIMEOUT_MS,
            language: DEFAULT_LANGUAGE.into(),
            extensions: ["gp", "gnuplot", "plt", "plot", "gpi"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

impl WatcherConfig {
    pub fn timing(&self) -> GateTiming {
        GateTiming::from_millis(self.delay, self.timeout)
    }

    /// Language kind of `path`, judged by its extension.
    pub fn language_of(&self, path: &Path) -> &str {
        let matches = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                self.extensions
                    .iter()
                    .any(|known| known.eq_ignore_ascii_case(ext))
            });

        if matches { &self.language } else { PLAIN_TEXT }
    }

    /// Open `path` as a document of its detected kind.
    pub fn document(&self, path: &Path) -> FsDocument {
        FsDocument::new(path, self.language_of(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;
    use crate::watch::Document;
    use std::time::Duration;

    #[test]
    fn test_watcher_config() {
        let config = test_parse_config(
            "[watcher]\ndelay = 250\ntimeout = 4000\nlanguage = \"plot\"\nextensions = [\"p\"]",
        );

        assert_eq!(config.watcher.delay, 250);
        assert_eq!(config.watcher.timeout, 4000);
        assert_eq!(config.watcher.language, "plot");
        assert_eq!(config.watcher.extensions, vec!["p".to_string()]);
    }

    #[test]
    fn test_timing() {
        let timing = WatcherConfig::default().timing();
        assert_eq!(timing.delay, Duration::from_millis(1000));
        assert_eq!(timing.timeout, Duration::from_millis(5000));
    }

    #[test]
    fn test_language_of() {
        let config = WatcherConfig::default();

        assert_eq!(config.language_of(Path::new("/plots/sine.gp")), "gnuplot");
        assert_eq!(config.language_of(Path::new("/plots/a.PLT")), "gnuplot");
        assert_eq!(config.language_of(Path::new("/plots/data.csv")), PLAIN_TEXT);
        assert_eq!(config.language_of(Path::new("/plots/Makefile")), PLAIN_TEXT);
    }

    #[test]
    fn test_document_carries_language() {
        let config = WatcherConfig::default();
        let doc = config.document(Path::new("/plots/sine.gp"));
        assert_eq!(doc.language(), "gnuplot");
        assert_eq!(doc.identity(), Path::new("/plots/sine.gp"));
    }
}
