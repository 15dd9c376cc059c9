//! Wire types for the remote data service.
//!
//! The data service speaks camelCase JSON with Mongo-style `_id` keys.
//! These structs mirror its request and response shapes exactly; the
//! normalization functions in `shrubboard-domain` convert responses into
//! the validated entity types from [`crate::entities`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// Response records
// ---------------------------------------------------------------------------

/// A player record as returned by `GET /players` and friends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct PlayerRecord {
    /// Remote-assigned identifier.
    #[serde(rename = "_id")]
    pub id: String,
    /// Display name.
    pub name: String,
    /// Cumulative point total.
    pub total_points: u64,
    /// Cumulative submission count.
    pub total_shrubs: u64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last-update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// The owning-player field of a [`ShrubRecord`].
///
/// The service returns either a bare id string or, when the query populates
/// the reference, an embedded `{ _id, name }` object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(untagged)]
#[ts(export, export_to = "bindings/")]
pub enum PlayerRef {
    /// A bare player id.
    Id(String),
    /// A populated reference carrying the id and display name.
    Populated {
        /// The referenced player's id.
        #[serde(rename = "_id")]
        id: String,
        /// The referenced player's display name.
        name: String,
    },
}

impl PlayerRef {
    /// Return the referenced player id regardless of representation.
    pub fn id(&self) -> &str {
        match self {
            Self::Id(id) | Self::Populated { id, .. } => id,
        }
    }
}

/// A shrub record as returned by `GET /shrubs` and friends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct ShrubRecord {
    /// Remote-assigned identifier.
    #[serde(rename = "_id")]
    pub id: String,
    /// The owning player reference.
    pub player_id: PlayerRef,
    /// The word as it should be pronounced.
    pub original_word: String,
    /// The mispronounced form.
    pub mispronunciation: String,
    /// Optional free-text description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Vote count as known by the service.
    pub votes: u64,
    /// Ids of players that have voted.
    pub voters: Vec<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last-update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// A pre-ranked leaderboard row from `GET /players/leaderboard`.
///
/// The store recomputes ranks locally for consistency with optimistic
/// updates; this shape exists for pass-through reads and cross-checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct LeaderboardRecord {
    /// The ranked player's id.
    #[serde(rename = "_id")]
    pub id: String,
    /// The player's display name.
    pub name: String,
    /// Number of shrubs the player has submitted.
    pub shrub_count: u64,
    /// The player's point total.
    pub total_points: u64,
    /// Distinct voters across the player's shrubs.
    pub voter_count: u64,
    /// Server-computed 1-based rank.
    pub rank: u32,
    /// The player's most recent mispronunciation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latest_shrub: Option<String>,
}

/// The response to a vote or unvote request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct VoteReceipt {
    /// Whether the service accepted the request.
    pub success: bool,
    /// The authoritative vote count after the request.
    pub votes: u64,
}

// ---------------------------------------------------------------------------
// Request bodies
// ---------------------------------------------------------------------------

/// Request body for `POST /players`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct NewPlayer {
    /// Desired display name.
    pub name: String,
    /// Optional contact email.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Request body for `POST /shrubs`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct NewShrub {
    /// The submitting player's id.
    pub player_id: String,
    /// The word as it should be pronounced.
    pub original_word: String,
    /// The mispronounced form.
    pub mispronunciation: String,
    /// Optional free-text description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Request body for `POST /shrubs/vote` and `DELETE /shrubs/vote`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct VoteRequest {
    /// The shrub being voted on.
    pub shrub_id: String,
    /// The voting player.
    pub voter_id: String,
}
