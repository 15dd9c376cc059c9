//! Construction-time validation for domain entities.
//!
//! Entities enter the system two ways: constructed locally (optimistic
//! submissions, new players) or normalized from wire records fetched from
//! the remote data service. Both paths run the same checks, so an entity
//! that exists in memory is valid by construction. No function here has
//! side effects beyond building a value; persistence belongs to the store.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};

use shrubboard_types::{Player, PlayerId, PlayerRecord, Shrub, ShrubId, ShrubRecord};

use crate::error::ValidationError;

// ---------------------------------------------------------------------------
// Draft input
// ---------------------------------------------------------------------------

/// Input for a new shrub submission, before validation.
///
/// Packs the submission fields into a single struct to keep call sites
/// readable and satisfy clippy's argument count limit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShrubDraft {
    /// The submitting player's id.
    pub player_id: PlayerId,
    /// The word as it should be pronounced.
    pub original_word: String,
    /// The mispronounced form.
    pub mispronunciation: String,
    /// Optional free-text description.
    pub description: Option<String>,
}

// ---------------------------------------------------------------------------
// Constructors
// ---------------------------------------------------------------------------

/// Validate a display name and construct a new [`Player`].
///
/// The name must be non-empty after trimming and unique case-insensitively
/// among `existing`. The new player starts with zero points, zero
/// submissions, and the supplied timestamp.
///
/// # Errors
///
/// Returns [`ValidationError::EmptyName`] or [`ValidationError::NameTaken`].
pub fn create_player(
    name: &str,
    existing: &[Player],
    now: DateTime<Utc>,
) -> Result<Player, ValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyName);
    }

    let lowered = trimmed.to_lowercase();
    if existing.iter().any(|p| p.name.to_lowercase() == lowered) {
        return Err(ValidationError::NameTaken {
            name: trimmed.to_owned(),
        });
    }

    Ok(Player {
        id: PlayerId::new(),
        name: trimmed.to_owned(),
        points: 0,
        total_shrubs: 0,
        latest_shrub: None,
        created_at: now,
        updated_at: now,
    })
}

/// Validate a [`ShrubDraft`] and construct a new [`Shrub`].
///
/// The owning player must be present in `players`, both word fields must be
/// non-empty, and the mispronunciation must differ from the original word
/// by verbatim (case-sensitive) comparison. The new shrub starts with zero
/// votes and an empty voter set.
///
/// # Errors
///
/// Returns [`ValidationError::UnknownPlayer`], [`ValidationError::EmptyWord`],
/// or [`ValidationError::IdenticalWords`].
pub fn create_shrub(
    draft: ShrubDraft,
    players: &[Player],
    now: DateTime<Utc>,
) -> Result<Shrub, ValidationError> {
    validate_words(&draft.original_word, &draft.mispronunciation)?;

    if !players.iter().any(|p| p.id == draft.player_id) {
        return Err(ValidationError::UnknownPlayer(draft.player_id));
    }

    Ok(Shrub {
        id: ShrubId::new(),
        player_id: draft.player_id,
        original_word: draft.original_word,
        mispronunciation: draft.mispronunciation,
        description: draft.description,
        votes: 0,
        voters: BTreeSet::new(),
        created_at: now,
        updated_at: now,
    })
}

/// Check the word-pair rules shared by construction and normalization.
fn validate_words(original_word: &str, mispronunciation: &str) -> Result<(), ValidationError> {
    if original_word.trim().is_empty() {
        return Err(ValidationError::EmptyWord {
            field: "original word",
        });
    }
    if mispronunciation.trim().is_empty() {
        return Err(ValidationError::EmptyWord {
            field: "mispronunciation",
        });
    }
    // Verbatim comparison: "Tomato"/"tomato" is an acceptable pair.
    if original_word == mispronunciation {
        return Err(ValidationError::IdenticalWords {
            word: original_word.to_owned(),
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Wire normalization
// ---------------------------------------------------------------------------

/// Normalize a fetched [`PlayerRecord`] into a validated [`Player`].
///
/// # Errors
///
/// Returns [`ValidationError::EmptyName`] if the record carries an empty
/// display name. A record that fails validation is rejected, never patched.
pub fn normalize_player(record: PlayerRecord) -> Result<Player, ValidationError> {
    if record.name.trim().is_empty() {
        return Err(ValidationError::EmptyName);
    }

    Ok(Player {
        id: PlayerId::from(record.id),
        name: record.name,
        points: record.total_points,
        total_shrubs: record.total_shrubs,
        latest_shrub: None,
        created_at: record.created_at,
        updated_at: record.updated_at,
    })
}

/// Normalize a fetched [`ShrubRecord`] into a validated [`Shrub`].
///
/// Runs the same word-pair checks as [`create_shrub`] and resolves the
/// owning player against `players`. The remote vote count is authoritative:
/// if it disagrees with the voter set cardinality the record is kept with
/// the remote count and the divergence is logged.
///
/// # Errors
///
/// Returns [`ValidationError::UnknownPlayer`], [`ValidationError::EmptyWord`],
/// or [`ValidationError::IdenticalWords`].
pub fn normalize_shrub(record: ShrubRecord, players: &[Player]) -> Result<Shrub, ValidationError> {
    validate_words(&record.original_word, &record.mispronunciation)?;

    let player_id = PlayerId::from(record.player_id.id());
    if !players.iter().any(|p| p.id == player_id) {
        return Err(ValidationError::UnknownPlayer(player_id));
    }

    let voters: BTreeSet<PlayerId> = record.voters.into_iter().map(PlayerId::from).collect();
    let voter_count = u64::try_from(voters.len()).unwrap_or(u64::MAX);
    if record.votes != voter_count {
        tracing::warn!(
            shrub_id = record.id,
            remote_votes = record.votes,
            voter_count,
            "remote vote count diverges from voter set; keeping remote count"
        );
    }

    Ok(Shrub {
        id: ShrubId::from(record.id),
        player_id,
        original_word: record.original_word,
        mispronunciation: record.mispronunciation,
        description: record.description,
        votes: record.votes,
        voters,
        created_at: record.created_at,
        updated_at: record.updated_at,
    })
}
