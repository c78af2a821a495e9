//! Unified error handling for keyhint.
//!
//! The engine distinguishes three classes of failure:
//!
//! - **Invalid state**: an operation that requires an active hint session was
//!   invoked without one (or vice versa). This indicates a collaborator and
//!   the core have desynchronized and is surfaced immediately.
//! - **Configuration**: the settings file could not be read, written, or
//!   parsed, or the configured values are unusable (e.g. a one-character
//!   hint alphabet).
//! - Everything else the engine encounters (inaccessible frames, zero
//!   targets, a typed character matching nothing) is *not* an error and is
//!   handled locally; see the `scanner` and `hinter` modules.

use std::path::PathBuf;

use thiserror::Error;

/// Unified error type for the keyhint engine.
#[derive(Debug, Error)]
pub enum KeyhintError {
    /// An operation was invoked while the state machine was in the wrong
    /// state, e.g. feeding keystrokes with no session open.
    #[error("invalid state for {operation}: expected {expected}, got {actual}")]
    InvalidState {
        operation: &'static str,
        expected: &'static str,
        actual: &'static str,
    },

    /// The configured hint alphabet has fewer than two distinct characters.
    #[error("hint alphabet {alphabet:?} has {distinct} distinct character(s), need at least 2")]
    InvalidAlphabet { alphabet: String, distinct: usize },

    /// A configured key name could not be parsed.
    #[error("unrecognized key name {name:?}")]
    UnknownKey { name: String },

    /// No platform configuration directory could be determined.
    #[error("could not determine a configuration directory")]
    ConfigDirUnavailable,

    /// Reading or writing the settings file failed.
    #[error("failed to access settings at {path}: {source}")]
    SettingsIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The settings file exists but does not parse.
    #[error("malformed settings: {0}")]
    SettingsFormat(#[from] serde_json::Error),
}

impl KeyhintError {
    /// Short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            KeyhintError::InvalidState { .. } => "E_STATE",
            KeyhintError::InvalidAlphabet { .. } => "E_ALPHABET",
            KeyhintError::UnknownKey { .. } => "E_KEY",
            KeyhintError::ConfigDirUnavailable => "E_CONFIG_DIR",
            KeyhintError::SettingsIo { .. } => "E_SETTINGS_IO",
            KeyhintError::SettingsFormat(_) => "E_SETTINGS_FORMAT",
        }
    }

    /// Whether the failure indicates a bug in the wiring between the core
    /// and a collaborator rather than a recoverable condition.
    pub fn is_desync(&self) -> bool {
        matches!(self, KeyhintError::InvalidState { .. })
    }
}

/// Result type alias used throughout the crate.
pub type KeyhintResult<T> = Result<T, KeyhintError>;
