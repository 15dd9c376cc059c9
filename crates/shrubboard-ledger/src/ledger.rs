//! The vote ledger: policy-checked, idempotent vote mutation.
//!
//! The [`VoteLedger`] is the single mutation point for a shrub's voter set
//! and vote count. Both operations report what actually happened through
//! [`VoteOutcome`]; `AlreadyVoted` and `NotVoted` are informational
//! conditions, not errors, and callers decide whether to surface them.

use shrubboard_types::{PlayerId, Shrub};

use crate::VoteError;

// ---------------------------------------------------------------------------
// Policy
// ---------------------------------------------------------------------------

/// Configurable voting policy.
///
/// Whether players may vote on their own shrubs is a product decision the
/// source behavior leaves open, so it is a policy knob rather than a
/// hard-coded rule. The default permits self-voting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VotePolicy {
    /// Whether a player may vote on their own shrub.
    pub allow_self_vote: bool,
}

impl VotePolicy {
    /// Create a policy with an explicit self-vote setting.
    pub const fn new(allow_self_vote: bool) -> Self {
        Self { allow_self_vote }
    }
}

impl Default for VotePolicy {
    fn default() -> Self {
        Self::new(true)
    }
}

// ---------------------------------------------------------------------------
// Outcome
// ---------------------------------------------------------------------------

/// What a cast or retract operation actually did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteOutcome {
    /// The vote was added; `votes` is the count after the cast.
    Cast {
        /// Vote count after the cast.
        votes: u64,
    },
    /// The voter had already voted; nothing changed.
    AlreadyVoted,
    /// The vote was removed; `votes` is the count after the retraction.
    Retracted {
        /// Vote count after the retraction.
        votes: u64,
    },
    /// The voter had not voted; nothing changed.
    NotVoted,
}

impl VoteOutcome {
    /// Whether the operation changed any state.
    pub const fn changed(&self) -> bool {
        matches!(self, Self::Cast { .. } | Self::Retracted { .. })
    }
}

// ---------------------------------------------------------------------------
// Ledger
// ---------------------------------------------------------------------------

/// Applies vote operations to shrubs under a [`VotePolicy`].
///
/// Operations mutate the shrub in place and keep the vote count equal to
/// the voter set cardinality. They are commutative across distinct voters
/// and idempotent per voter.
#[derive(Debug, Clone, Copy, Default)]
pub struct VoteLedger {
    policy: VotePolicy,
}

impl VoteLedger {
    /// Create a ledger with the given policy.
    pub const fn new(policy: VotePolicy) -> Self {
        Self { policy }
    }

    /// Return the active policy.
    pub const fn policy(&self) -> VotePolicy {
        self.policy
    }

    /// Cast a vote by `voter` on `shrub`.
    ///
    /// If the voter is already present this is a no-op reporting
    /// [`VoteOutcome::AlreadyVoted`] -- a second cast is idempotent, not an
    /// undo. Otherwise the voter is added and the count grows by exactly 1.
    ///
    /// # Errors
    ///
    /// Returns [`VoteError::SelfVoteForbidden`] when the policy forbids
    /// self-voting and `voter` owns the shrub. The shrub is untouched.
    pub fn cast_vote(&self, shrub: &mut Shrub, voter: &PlayerId) -> Result<VoteOutcome, VoteError> {
        if !self.policy.allow_self_vote && shrub.player_id == *voter {
            return Err(VoteError::SelfVoteForbidden {
                shrub: shrub.id.clone(),
                voter: voter.clone(),
            });
        }

        if !shrub.voters.insert(voter.clone()) {
            return Ok(VoteOutcome::AlreadyVoted);
        }

        shrub.votes = shrub.votes.saturating_add(1);
        tracing::debug!(shrub_id = %shrub.id, voter = %voter, votes = shrub.votes, "vote cast");
        Ok(VoteOutcome::Cast { votes: shrub.votes })
    }

    /// Retract a vote by `voter` from `shrub`.
    ///
    /// If the voter is absent this is a no-op reporting
    /// [`VoteOutcome::NotVoted`]. Otherwise the voter is removed and the
    /// count shrinks by exactly 1.
    ///
    /// # Errors
    ///
    /// Never fails on well-formed input; the `Result` mirrors
    /// [`Self::cast_vote`] so callers handle both uniformly.
    pub fn retract_vote(
        &self,
        shrub: &mut Shrub,
        voter: &PlayerId,
    ) -> Result<VoteOutcome, VoteError> {
        if !shrub.voters.remove(voter) {
            return Ok(VoteOutcome::NotVoted);
        }

        shrub.votes = shrub.votes.saturating_sub(1);
        tracing::debug!(shrub_id = %shrub.id, voter = %voter, votes = shrub.votes, "vote retracted");
        Ok(VoteOutcome::Retracted { votes: shrub.votes })
    }

    /// Restore a vote previously removed by [`Self::retract_vote`].
    ///
    /// Rollback path for callers whose remote retraction failed after the
    /// local one succeeded. The vote existed before the retraction, so the
    /// self-vote policy does not apply: a self-vote that entered through a
    /// fetched snapshot is restored as-is even under a forbidding policy.
    /// Idempotent: restoring a still-present vote reports
    /// [`VoteOutcome::AlreadyVoted`].
    pub fn restore_vote(&self, shrub: &mut Shrub, voter: &PlayerId) -> VoteOutcome {
        if !shrub.voters.insert(voter.clone()) {
            return VoteOutcome::AlreadyVoted;
        }

        shrub.votes = shrub.votes.saturating_add(1);
        tracing::debug!(shrub_id = %shrub.id, voter = %voter, votes = shrub.votes, "vote restored");
        VoteOutcome::Cast { votes: shrub.votes }
    }
}

/// Adopt a remote authoritative vote count after a race with another client.
///
/// The remote count overwrites the local value; the voter set is left as-is
/// and may legitimately diverge from the count until the next full fetch
/// re-normalizes the shrub. Returns the previous local count.
pub fn reconcile_remote_votes(shrub: &mut Shrub, remote_votes: u64) -> u64 {
    let previous = shrub.votes;
    if previous != remote_votes {
        tracing::debug!(
            shrub_id = %shrub.id,
            local = previous,
            remote = remote_votes,
            "adopting remote vote count"
        );
    }
    shrub.votes = remote_votes;
    previous
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use chrono::Utc;
    use shrubboard_types::ShrubId;

    use super::*;

    fn shrub(owner: &str) -> Shrub {
        Shrub {
            id: ShrubId::from("s1"),
            player_id: PlayerId::from(owner),
            original_word: "especially".to_owned(),
            mispronunciation: "spaghetti".to_owned(),
            description: None,
            votes: 0,
            voters: BTreeSet::new(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn double_cast_counts_once() {
        let ledger = VoteLedger::default();
        let mut s = shrub("owner");
        let v = PlayerId::from("fan");

        let first = ledger.cast_vote(&mut s, &v);
        let second = ledger.cast_vote(&mut s, &v);

        assert!(matches!(first, Ok(VoteOutcome::Cast { votes: 1 })));
        assert!(matches!(second, Ok(VoteOutcome::AlreadyVoted)));
        assert_eq!(s.votes, 1);
        assert!(s.vote_count_consistent());
    }

    #[test]
    fn retract_without_vote_is_noop() {
        let ledger = VoteLedger::default();
        let mut s = shrub("owner");
        let v = PlayerId::from("fan");

        let result = ledger.retract_vote(&mut s, &v);
        assert!(matches!(result, Ok(VoteOutcome::NotVoted)));
        assert_eq!(s.votes, 0);
    }

    #[test]
    fn cast_then_retract_returns_to_zero() {
        let ledger = VoteLedger::default();
        let mut s = shrub("owner");
        let v = PlayerId::from("fan");

        let _ = ledger.cast_vote(&mut s, &v);
        let result = ledger.retract_vote(&mut s, &v);

        assert!(matches!(result, Ok(VoteOutcome::Retracted { votes: 0 })));
        assert_eq!(s.votes, 0);
        assert!(s.voters.is_empty());
    }

    #[test]
    fn distinct_voters_commute() {
        let ledger = VoteLedger::default();
        let a = PlayerId::from("a");
        let b = PlayerId::from("b");

        let mut forward = shrub("owner");
        let _ = ledger.cast_vote(&mut forward, &a);
        let _ = ledger.cast_vote(&mut forward, &b);

        let mut reverse = shrub("owner");
        let _ = ledger.cast_vote(&mut reverse, &b);
        let _ = ledger.cast_vote(&mut reverse, &a);

        assert_eq!(forward.voters, reverse.voters);
        assert_eq!(forward.votes, reverse.votes);
        assert_eq!(forward.votes, 2);
    }

    #[test]
    fn net_effect_matches_final_voter_count() {
        let ledger = VoteLedger::default();
        let mut s = shrub("owner");
        let a = PlayerId::from("a");
        let b = PlayerId::from("b");
        let c = PlayerId::from("c");

        // a votes, b votes twice, c votes and retracts, a retracts and re-votes.
        let _ = ledger.cast_vote(&mut s, &a);
        let _ = ledger.cast_vote(&mut s, &b);
        let _ = ledger.cast_vote(&mut s, &b);
        let _ = ledger.cast_vote(&mut s, &c);
        let _ = ledger.retract_vote(&mut s, &c);
        let _ = ledger.retract_vote(&mut s, &a);
        let _ = ledger.cast_vote(&mut s, &a);

        // Net voters: a and b.
        assert_eq!(s.votes, 2);
        assert!(s.vote_count_consistent());
        assert!(s.has_voter(&a));
        assert!(s.has_voter(&b));
        assert!(!s.has_voter(&c));
    }

    #[test]
    fn self_vote_permitted_by_default() {
        let ledger = VoteLedger::default();
        let mut s = shrub("owner");
        let owner = PlayerId::from("owner");

        let result = ledger.cast_vote(&mut s, &owner);
        assert!(matches!(result, Ok(VoteOutcome::Cast { votes: 1 })));
    }

    #[test]
    fn self_vote_rejected_when_policy_forbids() {
        let ledger = VoteLedger::new(VotePolicy::new(false));
        let mut s = shrub("owner");
        let owner = PlayerId::from("owner");

        let result = ledger.cast_vote(&mut s, &owner);
        assert!(matches!(result, Err(VoteError::SelfVoteForbidden { .. })));
        // Rejected before any state change.
        assert_eq!(s.votes, 0);
        assert!(s.voters.is_empty());
    }

    #[test]
    fn restore_reinstates_retracted_vote() {
        let ledger = VoteLedger::default();
        let mut s = shrub("owner");
        let v = PlayerId::from("fan");

        let _ = ledger.cast_vote(&mut s, &v);
        let _ = ledger.retract_vote(&mut s, &v);
        let result = ledger.restore_vote(&mut s, &v);

        assert!(matches!(result, VoteOutcome::Cast { votes: 1 }));
        assert!(s.has_voter(&v));
        assert!(s.vote_count_consistent());
    }

    #[test]
    fn restore_bypasses_self_vote_policy() {
        // A self-vote can exist in fetched state even when the local policy
        // forbids new ones; restoring it after a failed retraction must not
        // re-run the cast policy.
        let ledger = VoteLedger::new(VotePolicy::new(false));
        let mut s = shrub("owner");
        let owner = PlayerId::from("owner");
        s.voters.insert(owner.clone());
        s.votes = 1;

        let _ = ledger.retract_vote(&mut s, &owner);
        let result = ledger.restore_vote(&mut s, &owner);

        assert!(matches!(result, VoteOutcome::Cast { votes: 1 }));
        assert!(s.has_voter(&owner));
        assert!(s.vote_count_consistent());
    }

    #[test]
    fn restore_of_present_vote_is_noop() {
        let ledger = VoteLedger::default();
        let mut s = shrub("owner");
        let v = PlayerId::from("fan");

        let _ = ledger.cast_vote(&mut s, &v);
        let result = ledger.restore_vote(&mut s, &v);

        assert!(matches!(result, VoteOutcome::AlreadyVoted));
        assert_eq!(s.votes, 1);
    }

    #[test]
    fn reconcile_adopts_remote_count() {
        let ledger = VoteLedger::default();
        let mut s = shrub("owner");
        let _ = ledger.cast_vote(&mut s, &PlayerId::from("a"));

        let previous = reconcile_remote_votes(&mut s, 7);
        assert_eq!(previous, 1);
        assert_eq!(s.votes, 7);
    }
}
