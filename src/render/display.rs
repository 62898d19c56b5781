//! Preview display.
//!
//! Each preview is reported on the status line. With `display.publish`
//! it is also copied to a fixed path (`<output_dir>/preview.png` by default)
//! so an image viewer with auto-reload always shows the focused plot.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::config::{DisplayConfig, cfg};
use crate::logger::{status_success, status_unchanged, status_warning};
use crate::watch::{Preview, Viewer};

#[derive(Debug, Clone)]
enum Target {
    /// Follow the global config, picking up reloads.
    Live,
    Fixed {
        display: DisplayConfig,
        output_dir: PathBuf,
    },
}

/// Displays previews on the terminal and optionally publishes them.
#[derive(Debug, Clone)]
pub struct FileDisplay {
    target: Target,
}

impl FileDisplay {
    pub const fn live() -> Self {
        Self {
            target: Target::Live,
        }
    }

    pub fn with_config(display: DisplayConfig, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            target: Target::Fixed {
                display,
                output_dir: output_dir.into(),
            },
        }
    }

    /// Copy `preview` to the published path, if publishing is enabled.
    ///
    /// Returns the published path.
    pub fn publish(&self, preview: &Preview) -> io::Result<Option<PathBuf>> {
        let (display, output_dir) = match &self.target {
            Target::Live => {
                let c = cfg();
                (c.display.clone(), c.render.output_dir.clone())
            }
            Target::Fixed {
                display,
                output_dir,
            } => (display.clone(), output_dir.clone()),
        };

        if !display.publish || preview.is_empty() {
            return Ok(None);
        }

        let target = published_path(&display, &output_dir, preview.as_path());
        if target != preview.as_path() {
            fs::create_dir_all(&output_dir)?;
            fs::copy(preview.as_path(), &target)?;
        }
        Ok(Some(target))
    }
}

impl Viewer for FileDisplay {
    fn update(&self, preview: &Preview) {
        if preview.is_empty() {
            status_unchanged("no preview yet");
            return;
        }

        if let Err(e) = self.publish(preview) {
            status_warning(&format!("failed to publish {}: {e}", preview));
            return;
        }

        let shown = cfg().root_relative(preview.as_path());
        status_success(&format!("preview: {}", shown.display()));
    }
}

/// `<output_dir>/<name>.<ext>`, keeping the preview's extension.
fn published_path(display: &DisplayConfig, output_dir: &Path, preview: &Path) -> PathBuf {
    let name = match preview.extension() {
        Some(ext) => format!("{}.{}", display.name, ext.to_string_lossy()),
        None => display.name.clone(),
    };
    output_dir.join(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_published_path_keeps_extension() {
        let display = DisplayConfig::default();
        assert_eq!(
            published_path(&display, Path::new("/out"), Path::new("/out/sine.svg")),
            PathBuf::from("/out/preview.svg")
        );
        assert_eq!(
            published_path(&display, Path::new("/out"), Path::new("/out/sine")),
            PathBuf::from("/out/preview")
        );
    }

    #[test]
    fn test_publish_copies_preview() {
        let dir = tempfile::tempdir().unwrap();
        let image = dir.path().join("sine.png");
        fs::write(&image, "png-bytes").unwrap();

        let display = FileDisplay::with_config(DisplayConfig::default(), dir.path().join("out"));
        let published = display.publish(&Preview::new(image.to_string_lossy())).unwrap();

        let expected = dir.path().join("out/preview.png");
        assert_eq!(published, Some(expected.clone()));
        assert_eq!(fs::read_to_string(expected).unwrap(), "png-bytes");
    }

    #[test]
    fn test_publish_disabled() {
        let dir = tempfile::tempdir().unwrap();
        let image = dir.path().join("sine.png");
        fs::write(&image, "png-bytes").unwrap();

        let config = DisplayConfig {
            publish: false,
            ..DisplayConfig::default()
        };
        let display = FileDisplay::with_config(config, dir.path());
        assert_eq!(display.publish(&Preview::new(image.to_string_lossy())).unwrap(), None);
        assert!(!dir.path().join("preview.png").exists());
    }

    #[test]
    fn test_publish_skips_empty_preview() {
        let dir = tempfile::tempdir().unwrap();
        let display = FileDisplay::with_config(DisplayConfig::default(), dir.path());
        assert_eq!(display.publish(&Preview::empty()).unwrap(), None);
    }

    #[test]
    fn test_publish_missing_image() {
        let dir = tempfile::tempdir().unwrap();
        let display = FileDisplay::with_config(DisplayConfig::default(), dir.path());
        let missing = Preview::new(dir.path().join("gone.png").to_string_lossy());
        assert!(display.publish(&missing).is_err());
    }
}
