//! Core entity structs for the Shrubboard leaderboard.
//!
//! Covers the stored entities ([`Player`], [`Shrub`]) and the derived
//! [`LeaderboardEntry`] projection. Validation lives in `shrubboard-domain`;
//! these structs only define shape and a few cheap consistency accessors.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::ids::{PlayerId, ShrubId};

// ---------------------------------------------------------------------------
// Player
// ---------------------------------------------------------------------------

/// A player competing on the leaderboard.
///
/// Point total and submission count are monotonically non-decreasing except
/// via explicit administrative correction (see `apply_correction` in
/// `shrubboard-domain`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Player {
    /// Opaque stable identifier.
    pub id: PlayerId,
    /// Display name, unique case-insensitively across the system.
    pub name: String,
    /// Cumulative point total.
    pub points: u64,
    /// Cumulative count of accepted submissions.
    pub total_shrubs: u64,
    /// The player's most recent accepted mispronunciation, for display.
    pub latest_shrub: Option<String>,
    /// When the player record was created.
    pub created_at: DateTime<Utc>,
    /// When the player record was last updated.
    pub updated_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Shrub
// ---------------------------------------------------------------------------

/// A submitted humorous mispronunciation pairing.
///
/// Central invariant: `votes == voters.len()` at all times. The vote ledger
/// in `shrubboard-ledger` preserves this under repeated cast/retract calls,
/// and [`Self::vote_count_consistent`] lets any holder audit it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Shrub {
    /// Opaque stable identifier.
    pub id: ShrubId,
    /// The owning player. Must reference a known [`Player`].
    pub player_id: PlayerId,
    /// The word as it should be pronounced. Never empty.
    pub original_word: String,
    /// The mispronounced form. Never empty, never equal to `original_word`.
    pub mispronunciation: String,
    /// Optional free-text description.
    pub description: Option<String>,
    /// Vote count. Equal to the cardinality of `voters`.
    pub votes: u64,
    /// The set of player ids that have voted for this shrub.
    pub voters: BTreeSet<PlayerId>,
    /// When the shrub was submitted.
    pub created_at: DateTime<Utc>,
    /// When the shrub was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Shrub {
    /// Return the cardinality of the voter set.
    ///
    /// Returns `u64::MAX` in the (practically impossible) case where the
    /// voter set exceeds `u64::MAX` entries.
    pub fn voter_count(&self) -> u64 {
        u64::try_from(self.voters.len()).unwrap_or(u64::MAX)
    }

    /// Check whether the stored vote count matches the voter set cardinality.
    ///
    /// A reconciliation against a remote authoritative count may leave the
    /// two legitimately divergent until the next full fetch; everywhere else
    /// this must hold.
    pub fn vote_count_consistent(&self) -> bool {
        self.votes == self.voter_count()
    }

    /// Check whether a specific player has voted for this shrub.
    pub fn has_voter(&self, voter: &PlayerId) -> bool {
        self.voters.contains(voter)
    }
}

// ---------------------------------------------------------------------------
// LeaderboardEntry (derived)
// ---------------------------------------------------------------------------

/// A derived, non-persistent ranking record.
///
/// Always a pure projection over [`Player`] and [`Shrub`] data, recomputed
/// by the scoring engine whenever underlying state changes. Never mutated
/// independently and never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct LeaderboardEntry {
    /// The ranked player.
    pub player_id: PlayerId,
    /// The player's display name.
    pub name: String,
    /// Number of shrubs the player has submitted.
    pub shrub_count: u64,
    /// The player's cumulative point total.
    pub total_points: u64,
    /// Distinct voters across all of the player's shrubs.
    pub voter_count: u64,
    /// 1-based rank. Contiguous, no gaps, no shared ranks.
    pub rank: u32,
    /// The player's most recent mispronunciation, for display.
    pub latest_shrub: Option<String>,
}
