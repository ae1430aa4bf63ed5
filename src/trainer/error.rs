//! Custom error types for the voctrain crate.

use thiserror::Error;

use super::Level;

/// The primary error type for all operations in this crate.
#[derive(Debug, Error)]
pub enum TrainerError {
    /// An error originating from I/O operations (store tree, terminal,
    /// editor spawn). Not retried; the user retries the whole operation.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A word was required at a level where it does not exist.
    #[error("word not found in store: {word}")]
    WordNotFound { word: String },

    /// A level outside the configured bounds was requested.
    ///
    /// Never clamped: an out-of-range level indicates a configuration
    /// or logic bug, not bad user input.
    #[error("level {level} outside configured range {min}..={max}")]
    InvalidLevel { level: Level, min: Level, max: Level },

    /// A word that cannot serve as a filename inside a level directory.
    #[error("invalid word {word:?}: {reason}")]
    InvalidWord { word: String, reason: &'static str },

    /// A menu was built with a duplicate key, a duplicate default, or a
    /// malformed key. Fatal at construction time.
    #[error("menu misconfigured: {0}")]
    MenuConfig(String),

    /// The ambient configuration is unusable (bad level bounds, no
    /// home directory).
    #[error("configuration error: {0}")]
    Config(String),
}

/// A convenience `Result` type alias using the crate's `TrainerError` type.
pub type Result<T> = std::result::Result<T, TrainerError>;
