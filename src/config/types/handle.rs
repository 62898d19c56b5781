//! Global config with atomic reload support.
//!
//! Uses `arc-swap` for lock-free reads and atomic config replacement.
//! This enables hot-reloading of `plotwatch.toml` while watching.

use crate::config::PlotConfig;
use crate::watch::{ConfigSource, GateTiming};
use anyhow::{Context, Result};
use arc_swap::ArcSwap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, LazyLock};

/// Global config storage.
pub static CONFIG: LazyLock<ArcSwap<PlotConfig>> =
    LazyLock::new(|| ArcSwap::from_pointee(PlotConfig::default()));

/// Global hash of the current config file content.
static CONFIG_HASH: AtomicU64 = AtomicU64::new(0);

#[inline]
pub fn cfg() -> Arc<PlotConfig> {
    CONFIG.load_full()
}

/// Reload config from disk if content changed.
///
/// Returns `Ok(true)` if config was updated, `Ok(false)` if unchanged.
pub fn reload_config() -> Result<bool> {
    use std::fs;

    let c = cfg();
    let cli = c.cli.context("config was not loaded from the command line")?;

    let content = fs::read_to_string(&c.config_path)?;
    let new_hash = crate::utils::hash::compute(content.as_bytes());

    let old_hash = CONFIG_HASH.load(Ordering::Relaxed);
    if new_hash == old_hash {
        return Ok(false);
    }

    let new_config = PlotConfig::load(cli)?;
    CONFIG.store(Arc::new(new_config));
    CONFIG_HASH.store(new_hash, Ordering::Relaxed);

    Ok(true)
}

#[inline]
pub fn init_config(config: PlotConfig) -> Arc<PlotConfig> {
    use std::fs;

    if config.config_path.exists()
        && let Ok(content) = fs::read_to_string(&config.config_path)
    {
        let hash = crate::utils::hash::compute(content.as_bytes());
        CONFIG_HASH.store(hash, Ordering::Relaxed);
    }

    let arc = Arc::new(config);
    CONFIG.store(Arc::clone(&arc));
    arc
}

/// Configuration source backed by the global handle.
///
/// Every read sees the latest successfully reloaded config.
#[derive(Debug, Default, Clone, Copy)]
pub struct LiveConfig;

impl ConfigSource for LiveConfig {
    fn timing(&self) -> Result<GateTiming> {
        Ok(cfg().watcher.timing())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_live_config_reads_global() {
        let mut config = PlotConfig::default();
        config.watcher.delay = 300;
        config.watcher.timeout = 3000;
        init_config(config);

        let timing = LiveConfig.timing().unwrap();
        assert_eq!(timing, GateTiming::from_millis(300, 3000));
    }
}
