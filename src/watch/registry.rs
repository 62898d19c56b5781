use std::path::{Path, PathBuf};
use std::time::Instant;

use rustc_hash::FxHashMap;

use super::preview::Preview;

/// Tracking state of one watched file.
#[derive(Debug, Clone)]
pub struct WatchedFile {
    last_change_at: Instant,
    last_preview: Preview,
}

impl WatchedFile {
    fn new(now: Instant) -> Self {
        Self {
            last_change_at: now,
            last_preview: Preview::empty(),
        }
    }

    /// Timestamp of the most recent accepted change.
    pub fn last_change_at(&self) -> Instant {
        self.last_change_at
    }

    /// Most recent non-empty preview, or empty if none was produced yet.
    pub fn last_preview(&self) -> &Preview {
        &self.last_preview
    }

    /// Record an accepted change. The timestamp never moves backwards.
    pub(super) fn touch(&mut self, now: Instant) {
        if now > self.last_change_at {
            self.last_change_at = now;
        }
    }
}

/// Identity → tracking state, with create-on-first-sight semantics.
///
/// Entries live until [`WatchRegistry::clear`]. No locking: the registry is
/// owned by a single gate and driven from one thread of control.
#[derive(Debug, Default)]
pub struct WatchRegistry {
    files: FxHashMap<PathBuf, WatchedFile>,
}

impl WatchRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Existing entry for `identity`, or a fresh one stamped with `now`.
    pub fn ensure(&mut self, identity: &Path, now: Instant) -> &mut WatchedFile {
        self.files
            .entry(identity.to_path_buf())
            .or_insert_with(|| {
                crate::debug!("watch"; "tracking {}", identity.display());
                WatchedFile::new(now)
            })
    }

    pub fn get(&self, identity: &Path) -> Option<&WatchedFile> {
        self.files.get(identity)
    }

    pub fn contains(&self, identity: &Path) -> bool {
        self.files.contains_key(identity)
    }

    /// Store `preview` as the last good preview.
    ///
    /// Empty previews are dropped so a failed build never blanks a valid one.
    /// Returns whether the entry changed; an unknown identity is left alone.
    pub fn set_preview(&mut self, identity: &Path, preview: Preview) -> bool {
        if preview.is_empty() {
            return false;
        }
        match self.files.get_mut(identity) {
            Some(file) => {
                file.last_preview = preview;
                true
            }
            None => false,
        }
    }

    /// Drop every entry (teardown only).
    pub fn clear(&mut self) {
        self.files.clear();
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}
