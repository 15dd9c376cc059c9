//! Error types for the `shrubboard-store` crate.
//!
//! The store's failure taxonomy mirrors its propagation policy: validation
//! failures are rejected before any network call, transport failures leave
//! the previous projection intact (fetch) or trigger a rollback of the
//! optimistic change (mutation). Nothing here is fatal to the process.

use shrubboard_domain::ValidationError;
use shrubboard_ledger::VoteError;
use shrubboard_types::ShrubId;

/// Errors that can occur during store and remote-client operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// The remote service answered with a non-success status.
    #[error("remote service returned {status}: {message}")]
    Transport {
        /// The HTTP status code.
        status: u16,
        /// The raw response body, for diagnostics.
        message: String,
    },

    /// The request could not be completed (connection, timeout, bad URL).
    #[error("request to remote service failed: {0}")]
    Http(String),

    /// The response body could not be decoded as the expected shape.
    #[error("failed to decode remote response: {0}")]
    Decode(String),

    /// The requested entity does not exist on the remote service.
    #[error("not found: {resource}")]
    NotFound {
        /// The requested resource path.
        resource: String,
    },

    /// A shrub id did not resolve in the local projection.
    #[error("shrub not in local projection: {0}")]
    UnknownShrub(ShrubId),

    /// Domain validation rejected the input before any network call.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The vote policy rejected the operation.
    #[error(transparent)]
    Vote(#[from] VoteError),

    /// Configuration could not be loaded.
    #[error("configuration error: {0}")]
    Config(String),
}
