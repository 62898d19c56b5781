use std::path::{Path, PathBuf};

use notify::{RecommendedWatcher, RecursiveMode, Watcher};
use rustc_hash::FxHashSet;

/// Watch-root consistency manager.
///
/// Directory targets are watched recursively. A single-file target is
/// watched through its parent directory (non-recursive), since editors
/// that save by rename would otherwise orphan a watch on the file itself;
/// [`covers`](Self::covers) then keeps its siblings out.
///
/// Responsibility:
/// - Attach existing roots at startup
/// - Re-attach roots that were removed and recreated
pub(super) struct WatchRoots {
    dirs: Vec<PathBuf>,
    files: Vec<PathBuf>,
    plan: Vec<(PathBuf, RecursiveMode)>,
    attached: FxHashSet<PathBuf>,
}

impl WatchRoots {
    pub(super) fn new(paths: Vec<PathBuf>) -> Self {
        let mut dirs = Vec::new();
        let mut files = Vec::new();
        for path in paths {
            let bucket = if path.is_file() { &mut files } else { &mut dirs };
            if !bucket.contains(&path) {
                bucket.push(path);
            }
        }

        let plan = watch_plan(&dirs, &files);
        Self {
            dirs,
            files,
            plan,
            attached: FxHashSet::default(),
        }
    }

    /// Whether an event for `path` belongs to a watch target.
    pub(super) fn covers(&self, path: &Path) -> bool {
        self.files.iter().any(|file| file == path) || self.dirs.iter().any(|dir| path.starts_with(dir))
    }

    pub(super) fn targets(&self) -> Vec<PathBuf> {
        self.dirs.iter().chain(&self.files).cloned().collect()
    }

    pub(super) fn attach_existing(
        &mut self,
        watcher: &mut RecommendedWatcher,
    ) -> notify::Result<()> {
        for (path, mode) in &self.plan {
            if !path.exists() {
                continue;
            }
            watcher.watch(path, *mode)?;
            self.attached.insert(path.clone());
        }

        Ok(())
    }

    pub(super) fn maintain(&mut self, watcher: &mut RecommendedWatcher) {
        // Drop stale handles for roots that no longer exist.
        self.attached.retain(|path| path.exists());

        for (path, mode) in &self.plan {
            if self.attached.contains(path) || !path.exists() {
                continue;
            }

            if watcher.watch(path, *mode).is_ok() {
                self.attached.insert(path.clone());
                crate::debug!("watch"; "re-attached watch: {}", path.display());
            }
        }
    }
}

/// Directories to hand to notify.
///
/// Nested directory targets fold into their ancestor, and a file's parent
/// is skipped when a directory target already covers it.
pub(super) fn watch_plan(dirs: &[PathBuf], files: &[PathBuf]) -> Vec<(PathBuf, RecursiveMode)> {
    let mut plan: Vec<(PathBuf, RecursiveMode)> = Vec::new();

    for dir in dirs {
        let nested = dirs.iter().any(|other| other != dir && dir.starts_with(other));
        if !nested {
            plan.push((dir.clone(), RecursiveMode::Recursive));
        }
    }

    for file in files {
        let Some(parent) = file.parent() else {
            continue;
        };
        let covered = dirs.iter().any(|dir| parent.starts_with(dir));
        if !covered && !plan.iter().any(|(path, _)| path == parent) {
            plan.push((parent.to_path_buf(), RecursiveMode::NonRecursive));
        }
    }

    plan
}
