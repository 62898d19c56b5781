//! `[display]` section configuration.
//!
//! The current preview is copied to a fixed path so an image viewer with
//! auto-reload can stay pointed at one file.
//!
//! ```toml
//! [display]
//! publish = true      # Copy the current preview to <output_dir>/<name>.<extension>
//! name = "preview"
//! ```

use serde::Deserialize;

/// Preview publishing settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub publish: bool,
    pub name: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            publish: true,
            name: "preview".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::test_parse_config;

    #[test]
    fn test_display_config() {
        let config = test_parse_config("[display]\npublish = false\nname = \"current\"");
        assert!(!config.display.publish);
        assert_eq!(config.display.name, "current");
    }

    #[test]
    fn test_display_defaults() {
        let config = test_parse_config("");
        assert!(config.display.publish);
        assert_eq!(config.display.name, "preview");
    }
}
