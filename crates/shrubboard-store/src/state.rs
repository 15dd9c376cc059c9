//! Async operation state machine for the store.
//!
//! Every async operation the store exposes drives the same machine:
//!
//! ```text
//! Idle -> Loading -> { Succeeded, Failed }
//! ```
//!
//! `Failed` carries the error description for observers; the next operation
//! attempt moves straight back to `Loading` (no automatic retry).

/// Observable phase of the store's most recent async operation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    /// No operation has run yet.
    #[default]
    Idle,
    /// An operation is in flight.
    Loading,
    /// The most recent operation completed successfully.
    Succeeded,
    /// The most recent operation failed.
    Failed {
        /// Description of the failure.
        message: String,
    },
}

impl LoadState {
    /// Whether an operation is currently in flight.
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// The failure description, if the last operation failed.
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Failed { message } => Some(message),
            Self::Idle | Self::Loading | Self::Succeeded => None,
        }
    }
}
