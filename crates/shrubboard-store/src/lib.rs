//! Optimistic store and remote client for the Shrubboard leaderboard.
//!
//! This crate is the application-facing layer of the workspace: it owns
//! the cached projection of the remote data service and the only code
//! paths that mutate it. All rendering-oriented callers read from the
//! store; all writes go through it.
//!
//! # Architecture
//!
//! - [`api`] -- The REST client for the remote data service, with a
//!   unified backend enum so tests can substitute an in-memory fixture.
//! - [`store`] -- The [`LeaderboardStore`]: read-through cache,
//!   optimistic mutations with rollback, and the locally recomputed
//!   leaderboard.
//! - [`state`] -- The [`LoadState`] machine every async operation drives.
//! - [`config`] -- Environment-variable configuration.
//! - [`error`] -- The [`StoreError`] taxonomy.
//!
//! # Consistency model
//!
//! Mutations apply locally first and roll back on remote failure; fetches
//! replace the projection wholesale and leave the previous one visible
//! while in flight or after a failure. The remote service is the
//! authority on vote counts and assigned identifiers.

pub mod api;
pub mod config;
pub mod error;
pub mod state;
pub mod store;

// Re-export primary types at crate root.
pub use api::{ApiBackend, HttpBackend};
pub use config::StoreConfig;
pub use error::StoreError;
pub use state::LoadState;
pub use store::LeaderboardStore;
