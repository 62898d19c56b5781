use std::path::PathBuf;

use crate::config::PlotConfig;
use crate::utils::path::normalize_path;

/// Watch targets: requested paths (default: project root) plus the config file.
///
/// Relative paths resolve against the current directory.
pub(super) fn collect_watch_paths(config: &PlotConfig, requested: &[PathBuf]) -> Vec<PathBuf> {
    let mut paths: Vec<PathBuf> = if requested.is_empty() {
        vec![config.get_root().to_path_buf()]
    } else {
        requested.iter().map(|p| normalize_path(p)).collect()
    };

    if config.config_path.exists() && !paths.contains(&config.config_path) {
        paths.push(config.config_path.clone());
    }

    paths.dedup();
    paths
}
