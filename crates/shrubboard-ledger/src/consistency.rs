//! Vote-count consistency verification.
//!
//! The central invariant -- `votes == voters.len()` for every shrub -- is
//! preserved by construction in [`crate::VoteLedger`], so this check passes
//! for any snapshot the ledger has exclusively managed. It exists as
//! defense-in-depth against data corruption, a misbehaving remote, or
//! future bugs, and as the audit hook the store runs after a full fetch.
//!
//! The one legitimate exception is a shrub freshly reconciled against a
//! remote authoritative count (see
//! [`crate::ledger::reconcile_remote_votes`]); such divergence clears on
//! the next fetch.

use std::collections::BTreeMap;

use shrubboard_types::{Shrub, ShrubId};

/// The result of a consistency check over a snapshot of shrubs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsistencyResult {
    /// Every shrub's vote count matches its voter set cardinality.
    Consistent,
    /// One or more shrubs have a diverging count.
    Violation(VoteAnomaly),
}

/// Details of a vote-count consistency violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoteAnomaly {
    /// Per-shrub divergence: (`stored_votes`, `voter_set_size`) for each
    /// shrub that did not match.
    pub mismatches: BTreeMap<ShrubId, (u64, u64)>,
    /// Human-readable description of the anomaly.
    pub message: String,
}

impl core::fmt::Display for VoteAnomaly {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Verify the vote-count invariant for every shrub in a snapshot.
///
/// Returns [`ConsistencyResult::Consistent`] when all counts match, or a
/// [`VoteAnomaly`] listing every offending shrub otherwise.
pub fn verify_vote_consistency(shrubs: &[Shrub]) -> ConsistencyResult {
    let mut mismatches: BTreeMap<ShrubId, (u64, u64)> = BTreeMap::new();

    for shrub in shrubs {
        if !shrub.vote_count_consistent() {
            mismatches.insert(shrub.id.clone(), (shrub.votes, shrub.voter_count()));
        }
    }

    if mismatches.is_empty() {
        ConsistencyResult::Consistent
    } else {
        let count = mismatches.len();
        ConsistencyResult::Violation(VoteAnomaly {
            mismatches,
            message: format!("vote count diverges from voter set for {count} shrub(s)"),
        })
    }
}
