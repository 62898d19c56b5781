//! Configuration utility functions.

use std::path::{Path, PathBuf};

/// Find config file by searching upward from current directory
///
/// Starts from cwd and walks up parent directories until finding `config_name`
/// Returns the absolute path to the config file if found
///
/// # Example
/// ```text
/// /home/user/plots/figures/   ← cwd
/// /home/user/plots/plotwatch.toml  ← found!
/// ```
pub fn find_config_file(config_name: &Path) -> Option<PathBuf> {
    if config_name.is_absolute() {
        return config_name.exists().then(|| config_name.to_path_buf());
    }

    let cwd = std::env::current_dir().ok()?;
    find_upward(&cwd, config_name)
}

/// Walk up from `start` looking for `config_name`.
fn find_upward(start: &Path, config_name: &Path) -> Option<PathBuf> {
    let mut current = start;
    loop {
        let candidate = current.join(config_name);
        if candidate.exists() {
            return Some(candidate);
        }

        match current.parent() {
            Some(parent) => current = parent,
            None => return None,
        }
    }
}

// ============================================================================
// tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_upward_from_nested_dir() {
        let temp = tempfile::tempdir().unwrap();
        let config = temp.path().join("plotwatch.toml");
        std::fs::write(&config, "").unwrap();
        let nested = temp.path().join("figures").join("2024");
        std::fs::create_dir_all(&nested).unwrap();

        let found = find_upward(&nested, Path::new("plotwatch.toml"));
        assert_eq!(found, Some(config));
    }

    #[test]
    fn test_find_upward_missing() {
        let temp = tempfile::tempdir().unwrap();
        let found = find_upward(temp.path(), Path::new("no-such-config-4f1c.toml"));
        assert!(found.is_none());
    }

    #[test]
    fn test_absolute_config_path() {
        let temp = tempfile::tempdir().unwrap();
        let config = temp.path().join("custom.toml");
        assert!(find_config_file(&config).is_none());

        std::fs::write(&config, "").unwrap();
        assert_eq!(find_config_file(&config), Some(config));
    }
}
