//! Focus Actor
//!
//! Reads "active document" commands from stdin, one per line:
//!
//! ```text
//! open plots/sine.gp     focus a script (renders it immediately)
//! plots/sine.gp          same as `open`
//! close                  nothing focused
//! reload                 re-read plotwatch.toml
//! ```
//!
//! Runs on a plain thread: a blocking stdin read cannot be cancelled, and a
//! detached thread never holds up shutdown.

use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::thread::JoinHandle;

use tokio::sync::mpsc;

use super::messages::GateMsg;
use crate::utils::path::{normalize_path, resolve_path};

/// Focus Actor - turns stdin lines into gate messages
pub struct FocusActor<R> {
    reader: R,
    gate_tx: mpsc::Sender<GateMsg>,
    /// Fallback for relative paths that don't resolve against cwd
    root: PathBuf,
}

impl FocusActor<BufReader<std::io::Stdin>> {
    pub fn stdin(gate_tx: mpsc::Sender<GateMsg>, root: PathBuf) -> Self {
        Self::new(BufReader::new(std::io::stdin()), gate_tx, root)
    }
}

impl<R: BufRead + Send + 'static> FocusActor<R> {
    pub fn new(reader: R, gate_tx: mpsc::Sender<GateMsg>, root: PathBuf) -> Self {
        Self {
            reader,
            gate_tx,
            root,
        }
    }

    /// Read on a detached thread.
    pub fn spawn(self) -> JoinHandle<()> {
        std::thread::spawn(move || self.run())
    }

    /// Blocking read loop. Ends at EOF or once the gate is gone.
    pub fn run(self) {
        for line in self.reader.lines() {
            let line = match line {
                Ok(line) => line,
                Err(e) => {
                    crate::log!("watch"; "stdin error: {}", e);
                    break;
                }
            };

            match parse_command(&line, &self.root) {
                Ok(Some(msg)) => {
                    crate::debug!("watch"; "stdin: {}", msg.label());
                    if self.gate_tx.blocking_send(msg).is_err() {
                        break; // Receiver dropped
                    }
                }
                Ok(None) => {}
                Err(usage) => crate::log!("watch"; "{}", usage),
            }
        }
        crate::debug!("watch"; "stdin closed");
    }
}

/// Parse one stdin line.
///
/// Blank lines yield `Ok(None)`; malformed commands yield a usage hint.
pub fn parse_command(line: &str, root: &Path) -> Result<Option<GateMsg>, String> {
    let line = line.trim();
    let (word, rest) = line
        .split_once(char::is_whitespace)
        .map_or((line, ""), |(w, r)| (w, r.trim()));

    let msg = match word {
        "" => return Ok(None),
        "close" if rest.is_empty() => GateMsg::Focus(None),
        "reload" if rest.is_empty() => GateMsg::ReloadConfig,
        "close" | "reload" => return Err(format!("`{word}` takes no argument")),
        "open" if rest.is_empty() => return Err("usage: open <file>".into()),
        "open" => GateMsg::Focus(Some(focus_path(rest, root))),
        _ => GateMsg::Focus(Some(focus_path(line, root))),
    };
    Ok(Some(msg))
}

fn focus_path(raw: &str, root: &Path) -> PathBuf {
    normalize_path(&resolve_path(Path::new(raw), root))
}
