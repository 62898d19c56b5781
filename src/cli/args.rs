//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// plotwatch - live preview for gnuplot scripts
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: plotwatch.toml, searched upward from cwd)
    #[arg(short = 'C', long, default_value = "plotwatch.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Watch scripts and rebuild their preview while you edit
    #[command(visible_alias = "w")]
    Watch {
        #[command(flatten)]
        args: WatchArgs,
    },

    /// Render a single script once
    #[command(visible_alias = "r")]
    Render {
        /// Script to render
        #[arg(value_hint = clap::ValueHint::FilePath)]
        file: PathBuf,
    },
}

/// Watch command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct WatchArgs {
    /// Files or directories to watch (default: current directory)
    #[arg(value_name = "PATH", value_hint = clap::ValueHint::AnyPath)]
    pub paths: Vec<PathBuf>,

    /// Script to focus on start (rendered immediately)
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub open: Option<PathBuf>,

    /// Debounce delay in milliseconds (overrides watcher.delay)
    #[arg(short, long)]
    pub delay: Option<u64>,

    /// Staleness timeout in milliseconds (overrides watcher.timeout)
    #[arg(short, long)]
    pub timeout: Option<u64>,

    /// Don't read focus commands (`open`, `close`, `reload`) from stdin
    #[arg(long)]
    pub no_stdin: bool,
}

#[cfg(test)]
impl Cli {
    pub const fn is_watch(&self) -> bool {
        matches!(self.command, Commands::Watch { .. })
    }
    pub const fn is_render(&self) -> bool {
        matches!(self.command, Commands::Render { .. })
    }
}
