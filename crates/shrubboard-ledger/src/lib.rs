//! Vote ledger for the Shrubboard leaderboard.
//!
//! Every vote in the system is realized as membership in a shrub's voter
//! set; the vote count is the cardinality of that set. This crate is the
//! only code allowed to mutate either field, and it guarantees the central
//! invariant under repeated or interleaved cast/retract requests:
//!
//! ```text
//! shrub.votes == shrub.voters.len()
//! ```
//!
//! # Architecture
//!
//! - [`ledger`] -- The [`VoteLedger`]: policy-checked, idempotent
//!   cast/retract operations plus remote-count reconciliation.
//! - [`consistency`] -- Snapshot-wide invariant verification and anomaly
//!   reporting.
//!
//! # Semantics
//!
//! - A player votes at most once per shrub. A repeat cast is idempotent
//!   (reported as [`VoteOutcome::AlreadyVoted`]), never an undo.
//! - Retracting an absent vote is a no-op (reported as
//!   [`VoteOutcome::NotVoted`]).
//! - Operations are total on well-formed input and commutative across
//!   distinct voters: casting for A then B produces the same voter set
//!   and count as B then A.
//! - Self-voting is a configurable [`VotePolicy`]; the base policy permits
//!   it.
//!
//! # Usage
//!
//! ```
//! use shrubboard_ledger::{VoteLedger, VoteOutcome, VotePolicy};
//! use shrubboard_types::{PlayerId, Shrub, ShrubId};
//! use std::collections::BTreeSet;
//!
//! let mut shrub = Shrub {
//!     id: ShrubId::new(),
//!     player_id: PlayerId::from("owner"),
//!     original_word: "obviously".to_owned(),
//!     mispronunciation: "absolutely".to_owned(),
//!     description: None,
//!     votes: 0,
//!     voters: BTreeSet::new(),
//!     created_at: chrono::Utc::now(),
//!     updated_at: chrono::Utc::now(),
//! };
//!
//! let ledger = VoteLedger::new(VotePolicy::default());
//! let voter = PlayerId::from("fan");
//!
//! // First cast lands; the repeat is an informational no-op.
//! assert!(matches!(ledger.cast_vote(&mut shrub, &voter), Ok(VoteOutcome::Cast { votes: 1 })));
//! assert!(matches!(ledger.cast_vote(&mut shrub, &voter), Ok(VoteOutcome::AlreadyVoted)));
//! assert_eq!(shrub.votes, 1);
//! ```

pub mod consistency;
pub mod ledger;

// Re-export primary types at crate root.
pub use consistency::{ConsistencyResult, VoteAnomaly, verify_vote_consistency};
pub use ledger::{VoteLedger, VoteOutcome, VotePolicy};

use shrubboard_types::{PlayerId, ShrubId};

/// Errors that can occur when applying vote operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VoteError {
    /// The active [`VotePolicy`] forbids players voting on their own shrubs.
    #[error("player {voter} may not vote on their own shrub {shrub}")]
    SelfVoteForbidden {
        /// The shrub being voted on.
        shrub: ShrubId,
        /// The owning player attempting the vote.
        voter: PlayerId,
    },
}
