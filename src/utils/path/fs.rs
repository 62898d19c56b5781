//! Script paths as stable identities.

use std::path::{Path, PathBuf};

/// Registry identity for a script: canonical when the file exists, else
/// absolute against cwd.
#[inline]
pub fn normalize_path(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir().map_or_else(|_| path.to_path_buf(), |cwd| cwd.join(path))
        }
    })
}

/// Absolute path for a script named in a focus command or on the CLI.
///
/// A path that exists relative to cwd wins; otherwise it is taken relative
/// to `root`, so `open sine.gp` finds the script under the watched root.
#[inline]
pub fn resolve_path(path: &Path, root: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }

    if path.exists() {
        return normalize_path(path);
    }
    normalize_path(&root.join(path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_path_absolute() {
        let path = Path::new("/absolute/path/sine.gp");
        let normalized = normalize_path(path);
        assert!(normalized.is_absolute());
    }

    #[test]
    fn test_normalize_path_relative() {
        let path = Path::new("relative/path/sine.gp");
        let normalized = normalize_path(path);
        assert!(normalized.is_absolute());
    }

    #[test]
    fn test_resolve_path_absolute() {
        let path = Path::new("/absolute/path");
        let resolved = resolve_path(path, Path::new("/fallback"));
        assert_eq!(resolved, PathBuf::from("/absolute/path"));
    }

    #[test]
    fn test_resolve_path_under_root() {
        let path = Path::new("plotwatch-missing/sine.gp");
        let resolved = resolve_path(path, Path::new("/project"));
        assert_eq!(resolved, PathBuf::from("/project/plotwatch-missing/sine.gp"));
    }

    #[test]
    fn test_normalize_existing_file_is_canonical() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("plots")).unwrap();
        let script = dir.path().join("plots/sine.gp");
        std::fs::write(&script, "plot sin(x)\n").unwrap();

        let dotted = dir.path().join("plots/../plots/sine.gp");
        assert_eq!(normalize_path(&dotted), script.canonicalize().unwrap());
    }
}
