//! Entity validation and the pure scoring engine for Shrubboard.
//!
//! This crate holds the two stateless halves of the leaderboard core:
//!
//! - [`model`] -- construction-time validation. Entities are valid by
//!   construction whether they originate locally (optimistic submissions)
//!   or from wire records fetched from the remote data service.
//! - [`scoring`] -- pure, deterministic rank/trend/point computation over
//!   a snapshot. Functions return new values and never mutate inputs, so
//!   the store can recompute derived views at any point and reactive
//!   consumers can diff old against new.
//!
//! Neither module performs I/O. Persistence and remote communication live
//! in `shrubboard-store`; vote mutation lives in `shrubboard-ledger`.

pub mod error;
pub mod model;
pub mod scoring;

// Re-export primary items at crate root.
pub use error::ValidationError;
pub use model::{ShrubDraft, create_player, create_shrub, normalize_player, normalize_shrub};
pub use scoring::{
    DEFAULT_SHRUB_POINTS, apply_correction, compute_rank, compute_trend, record_shrub_effect,
};
