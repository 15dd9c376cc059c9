//! Shared type definitions for the Shrubboard leaderboard.
//!
//! This crate is the single source of truth for all types used across the
//! Shrubboard workspace. Types defined here flow downstream to `TypeScript`
//! via `ts-rs` for the web frontend.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe opaque-string wrappers for entity identifiers
//! - [`enums`] -- Enumeration types (currently the [`Trend`] indicator)
//! - [`entities`] -- Core entity structs and the derived leaderboard entry
//! - [`wire`] -- Request/response shapes of the remote data service

pub mod entities;
pub mod enums;
pub mod ids;
pub mod wire;

// Re-export all public types at crate root for convenience.
pub use entities::{LeaderboardEntry, Player, Shrub};
pub use enums::Trend;
pub use ids::{PlayerId, ShrubId};
pub use wire::{
    LeaderboardRecord, NewPlayer, NewShrub, PlayerRecord, PlayerRef, ShrubRecord, VoteReceipt,
    VoteRequest,
};
