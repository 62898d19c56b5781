use std::path::{Path, PathBuf};

use notify::EventKind;
use notify::event::ModifyKind;

use super::watch_roots::WatchRoots;
use crate::actor::messages::GateMsg;
use crate::config::PlotConfig;
use crate::utils::path::normalize_path;

/// Turns raw notify events into gate messages.
///
/// Pipeline: accept_kind → drop editor artifacts → normalize → route
pub(super) struct EventClassifier;

impl EventClassifier {
    pub(super) fn classify(
        event: &notify::Event,
        roots: &WatchRoots,
        config: &PlotConfig,
    ) -> Vec<GateMsg> {
        if !Self::accept_kind(event.kind) {
            return Vec::new();
        }

        crate::debug!("watch"; "raw notify: {:?} {:?}", event.kind, event.paths);

        let mut seen: Vec<PathBuf> = Vec::new();
        let mut messages = Vec::new();
        for path in &event.paths {
            if is_temp_file(path) {
                continue;
            }

            let path = normalize_path(path);
            if seen.contains(&path) {
                continue;
            }
            seen.push(path.clone());

            if let Some(msg) = Self::route(path, roots, config) {
                messages.push(msg);
            }
        }
        messages
    }

    /// Content writes only.
    ///
    /// Metadata-only changes (mtime/atime/chmod) are noise, and a removal
    /// leaves nothing to render.
    fn accept_kind(kind: EventKind) -> bool {
        match kind {
            EventKind::Create(_) => true,
            EventKind::Modify(ModifyKind::Metadata(_)) => false,
            EventKind::Modify(_) => true,
            _ => false,
        }
    }

    fn route(path: PathBuf, roots: &WatchRoots, config: &PlotConfig) -> Option<GateMsg> {
        if path == config.config_path {
            return Some(GateMsg::ReloadConfig);
        }

        // Our own images
        if path.starts_with(&config.render.output_dir) {
            return None;
        }

        if !roots.covers(&path) {
            return None;
        }

        // Directories, and files already gone again
        if !path.is_file() {
            return None;
        }

        Some(GateMsg::Changed(path))
    }
}

/// Check if path is a temp/backup file (editor artifacts).
pub(super) fn is_temp_file(path: &Path) -> bool {
    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

    matches!(ext, "bck" | "bak" | "backup" | "swp" | "swo" | "swx" | "tmp")
        || name.ends_with('~')
        || name.starts_with('.')
}
