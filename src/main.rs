//! plotwatch - live preview for gnuplot scripts.

mod actor;
mod cli;
mod config;
mod core;
mod logger;
mod render;
mod utils;
mod watch;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::{PlotConfig, init_config};

fn main() -> Result<()> {
    // Setup global Ctrl+C handler (before any blocking operations)
    core::setup_shutdown_handler()?;

    let cli: &'static Cli = Box::leak(Box::new(Cli::parse()));

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }

    let config = init_config(PlotConfig::load(cli)?);

    match &cli.command {
        Commands::Watch { args } => cli::watch::watch(config, args),
        Commands::Render { file } => cli::render::render_once(file, &config),
    }
}
