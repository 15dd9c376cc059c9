//! Enumeration types for the Shrubboard leaderboard.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Direction of a player's point total between two scoring snapshots.
///
/// Serialized lowercase to match the frontend union `'up' | 'down' | 'same'`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "bindings/")]
pub enum Trend {
    /// Points increased since the previous snapshot.
    Up,
    /// Points decreased since the previous snapshot.
    Down,
    /// Points are unchanged.
    Same,
}
