//! gnuplot renderer.
//!
//! The script is piped to gnuplot behind a short prelude that pins the
//! terminal and the output file:
//!
//! ```text
//! set terminal pngcairo size 800,600
//! set output '/project/.plotwatch/.render-Xk3f9a.png'
//! <script content>
//! ```
//!
//! Each run draws into a scratch file next to the artifacts. Only a clean
//! exit with a non-empty image replaces `<stem>-<hash>.<ext>`, so the last
//! good preview stays on disk through failed or empty runs.
//!
//! gnuplot runs from the script's directory so relative data files resolve
//! the same way they do when the script is run by hand.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use anyhow::Result;
use thiserror::Error;

use crate::config::{RenderConfig, cfg};
use crate::utils::hash;
use crate::utils::exec::{Cmd, FilterRule};
use crate::watch::{Document, Preview, Renderer};

/// gnuplot chatter that never explains a failure.
static GNUPLOT_FILTER: FilterRule = FilterRule::new(&["Could not find/open font"]);

/// Renderer failures.
///
/// A script that runs but draws nothing is not an error; it yields an
/// empty preview.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to read {}", .0.display())]
    Read(PathBuf, #[source] io::Error),

    #[error("failed to prepare output directory {}", .0.display())]
    OutputDir(PathBuf, #[source] io::Error),

    #[error("failed to run `{program}`: {message}")]
    Spawn { program: String, message: String },

    #[error("{script}: gnuplot exited with {status}\n{detail}")]
    Script {
        script: String,
        status: String,
        detail: String,
    },
}

/// Where the render settings come from.
#[derive(Debug, Clone)]
enum Settings {
    /// Follow the global config, picking up reloads.
    Live,
    Fixed(RenderConfig),
}

/// Renders gnuplot scripts to image files.
#[derive(Debug, Clone)]
pub struct GnuplotRenderer {
    settings: Settings,
}

impl GnuplotRenderer {
    /// Renderer reading `[render]` from the global config on every render.
    pub const fn live() -> Self {
        Self {
            settings: Settings::Live,
        }
    }

    pub fn with_config(config: RenderConfig) -> Self {
        Self {
            settings: Settings::Fixed(config),
        }
    }

    fn render_with(&self, config: &RenderConfig, doc: &dyn Document) -> Result<Preview, RenderError> {
        let identity = doc.identity();
        let content = doc
            .content()
            .map_err(|e| RenderError::Read(identity.to_path_buf(), e))?;

        fs::create_dir_all(&config.output_dir)
            .map_err(|e| RenderError::OutputDir(config.output_dir.clone(), e))?;

        // Removed on drop unless persisted over the artifact
        let scratch = tempfile::Builder::new()
            .prefix(".render-")
            .suffix(&format!(".{}", config.extension))
            .tempfile_in(&config.output_dir)
            .map_err(|e| RenderError::OutputDir(config.output_dir.clone(), e))?
            .into_temp_path();

        let mut cmd = Cmd::from_slice(&config.command).stdin(script(config, &scratch, &content));
        if let Some(dir) = identity.parent().filter(|d| !d.as_os_str().is_empty()) {
            cmd = cmd.cwd(dir);
        }

        let program = cmd.program_name();
        crate::debug!("render"; "{} < {}", program, identity.display());

        let result = cmd.output().map_err(|e| RenderError::Spawn {
            program,
            message: format!("{e:#}"),
        })?;

        let stderr = String::from_utf8_lossy(&result.stderr);
        if !result.status.success() {
            return Err(RenderError::Script {
                script: display_name(identity),
                status: result.status.to_string(),
                detail: GNUPLOT_FILTER.apply(&stderr).join("\n"),
            });
        }

        let lines = GNUPLOT_FILTER.apply(&stderr);
        if !lines.is_empty() {
            crate::debug!("render"; "{}", lines.join("\n"));
        }

        if !produced_output(&scratch) {
            crate::debug!("render"; "no image from {}", identity.display());
            return Ok(Preview::empty());
        }

        let output = output_path(config, identity);
        scratch
            .persist(&output)
            .map_err(|e| RenderError::OutputDir(output.clone(), e.error))?;
        Ok(Preview::new(output.to_string_lossy()))
    }
}

impl Renderer for GnuplotRenderer {
    fn render(&self, doc: &dyn Document) -> Result<Preview> {
        let preview = match &self.settings {
            Settings::Live => self.render_with(&cfg().render, doc)?,
            Settings::Fixed(config) => self.render_with(config, doc)?,
        };
        Ok(preview)
    }
}

/// Image path for `identity`: `<output_dir>/<stem>-<hash>.<extension>`.
///
/// The hash of the full path keeps same-named scripts in different
/// directories from sharing an artifact.
pub fn output_path(config: &RenderConfig, identity: &Path) -> PathBuf {
    let stem = identity
        .file_stem()
        .map_or_else(|| "plot".into(), |s| s.to_string_lossy());
    let tag = hash::compute(identity.as_os_str().as_encoded_bytes()) as u32;
    config
        .output_dir
        .join(format!("{stem}-{tag:08x}.{}", config.extension))
}

/// Full script fed to gnuplot.
pub fn script(config: &RenderConfig, output: &Path, content: &str) -> String {
    let mut script = format!(
        "set terminal {}\nset output '{}'\n",
        config.terminal,
        quote(&output.to_string_lossy())
    );
    script.push_str(content);
    if !content.ends_with('\n') {
        script.push('\n');
    }
    script
}

/// Escape for a single-quoted gnuplot string.
fn quote(s: &str) -> String {
    s.replace('\'', "''")
}

fn produced_output(path: &Path) -> bool {
    fs::metadata(path).is_ok_and(|meta| meta.is_file() && meta.len() > 0)
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned())
}
