//! Error types for the `shrubboard-domain` crate.
//!
//! All fallible construction and normalization in this crate returns
//! [`ValidationError`]. These errors are raised synchronously, before any
//! network call, and are always recoverable.

use shrubboard_types::PlayerId;

/// Errors raised by construction-time validation of domain entities.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A player name was empty or whitespace-only.
    #[error("player name must not be empty")]
    EmptyName,

    /// The requested player name is already taken (case-insensitively).
    #[error("player name already taken: {name}")]
    NameTaken {
        /// The conflicting name as requested.
        name: String,
    },

    /// A shrub referenced a player id that does not resolve.
    #[error("unknown player: {0}")]
    UnknownPlayer(PlayerId),

    /// A word field of a shrub was empty or whitespace-only.
    #[error("shrub {field} must not be empty")]
    EmptyWord {
        /// Which field was empty ("original word" or "mispronunciation").
        field: &'static str,
    },

    /// The mispronunciation was verbatim identical to the original word.
    #[error("mispronunciation must differ from the original word: {word}")]
    IdenticalWords {
        /// The repeated word.
        word: String,
    },
}
