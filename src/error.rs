//! Error types
//!
//! Nothing in the per-tick pipeline returns an error. These types cover the
//! resource edges: loading configuration, opening the recording sink, and
//! parsing recorded lines.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failure loading or validating `game.json`
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid config value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Failure opening or writing the recording sink
#[derive(Debug, Error)]
pub enum RecordingError {
    #[error("no recording directory available on this platform")]
    NoDirectory,

    #[error("recording I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Why a single recorded line was rejected
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecordParseError {
    #[error("missing 'deltaTime=' header")]
    MissingHeader,

    #[error("missing ';' between header and entity list")]
    MissingSeparator,

    #[error("invalid number '{0}'")]
    InvalidNumber(String),

    #[error("malformed entity record '{0}'")]
    MalformedEntity(String),

    #[error("unknown field '{0}'")]
    UnknownField(String),

    #[error("unknown entity kind '{0}'")]
    UnknownKind(String),
}
