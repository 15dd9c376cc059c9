//! Configuration types for the store.
//!
//! All configuration is loaded from environment variables. The store needs
//! to know where the remote data service lives; everything else has a
//! sensible default.

use std::time::Duration;

use crate::error::StoreError;

/// Complete store configuration loaded from the environment.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Base URL of the remote data service (e.g. `http://localhost:3001`).
    pub api_url: String,
    /// Display name of the "current user" player, if any. Drives
    /// `current_user_rank`.
    pub current_player: Option<String>,
    /// Whether players may vote on their own shrubs.
    pub allow_self_vote: bool,
    /// Per-request timeout applied at the transport layer.
    pub request_timeout: Duration,
}

impl StoreConfig {
    /// Load configuration from environment variables.
    ///
    /// Required variables:
    /// - `SHRUBBOARD_API_URL` -- base URL of the remote data service
    ///
    /// Optional variables:
    /// - `SHRUBBOARD_CURRENT_PLAYER` -- display name of the current user
    /// - `SHRUBBOARD_ALLOW_SELF_VOTE` -- self-vote policy (default `true`)
    /// - `SHRUBBOARD_REQUEST_TIMEOUT_MS` -- request timeout (default 10000)
    pub fn from_env() -> Result<Self, StoreError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// Separated from [`Self::from_env`] so tests can inject values without
    /// mutating the process environment.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, StoreError> {
        let api_url = lookup("SHRUBBOARD_API_URL").ok_or_else(|| {
            StoreError::Config("missing required environment variable: SHRUBBOARD_API_URL".to_owned())
        })?;

        let current_player = lookup("SHRUBBOARD_CURRENT_PLAYER");

        let allow_self_vote: bool = lookup("SHRUBBOARD_ALLOW_SELF_VOTE")
            .unwrap_or_else(|| "true".to_owned())
            .parse()
            .map_err(|e| StoreError::Config(format!("invalid SHRUBBOARD_ALLOW_SELF_VOTE: {e}")))?;

        let timeout_ms: u64 = lookup("SHRUBBOARD_REQUEST_TIMEOUT_MS")
            .unwrap_or_else(|| "10000".to_owned())
            .parse()
            .map_err(|e| {
                StoreError::Config(format!("invalid SHRUBBOARD_REQUEST_TIMEOUT_MS: {e}"))
            })?;

        Ok(Self {
            api_url,
            current_player,
            allow_self_vote,
            request_timeout: Duration::from_millis(timeout_ms),
        })
    }
}
