//! CLI failures and their exit codes.
//!
//! | code | meaning                                                  |
//! |------|----------------------------------------------------------|
//! | 2    | bad arguments (reported by clap before `run`)            |
//! | 10   | the deck refused the request: unknown preset, empty canvas, shader build |
//! | 11   | a file could not be read or written                      |
//! | 12   | a config document or `--params` object is malformed      |
//! | 13   | JSON output could not be produced                        |

use shaderdeck_core::DeckError;
use std::fmt;
use std::path::Path;

#[derive(Debug)]
pub enum CliError {
    Deck(DeckError),
    Io(String),
    Input(String),
    Serialization(serde_json::Error),
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Deck(_) => 10,
            CliError::Io(_) => 11,
            CliError::Input(_) => 12,
            CliError::Serialization(_) => 13,
        }
    }

    /// A file at `path` could not be read.
    pub fn unreadable(path: &Path, err: std::io::Error) -> Self {
        CliError::Io(format!("cannot read {}: {err}", path.display()))
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Deck(e) => write!(f, "{e}"),
            CliError::Io(msg) | CliError::Input(msg) => f.write_str(msg),
            CliError::Serialization(e) => write!(f, "cannot encode output: {e}"),
        }
    }
}

// Snapshot write failures surface as `DeckError::Io` and config parse
// failures as `DeckError::InvalidConfig`; both are reported by their cause.
impl From<DeckError> for CliError {
    fn from(e: DeckError) -> Self {
        match e {
            DeckError::Io(msg) => CliError::Io(msg),
            DeckError::InvalidConfig(msg) => CliError::Input(format!("invalid config: {msg}")),
            other => CliError::Deck(other),
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Serialization(e)
    }
}
