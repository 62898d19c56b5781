//! `plotwatch render` - render one script without watching.

use std::path::Path;

use anyhow::{Result, bail};

use crate::config::PlotConfig;
use crate::render::{FileDisplay, GnuplotRenderer};
use crate::utils::path::{normalize_path, resolve_path};
use crate::watch::{Document, Renderer, Viewer};

pub fn render_once(file: &Path, config: &PlotConfig) -> Result<()> {
    config.render.check_command()?;

    let path = normalize_path(&resolve_path(file, config.get_root()));
    if !path.is_file() {
        bail!("no such script: {}", file.display());
    }

    let doc = config.watcher.document(&path);
    if doc.language() != config.watcher.language {
        bail!(
            "not a {} script: {} (known extensions: {})",
            config.watcher.language,
            file.display(),
            config.watcher.extensions.join(", ")
        );
    }

    let preview = GnuplotRenderer::live().render(&doc)?;
    FileDisplay::live().update(&preview);
    Ok(())
}
