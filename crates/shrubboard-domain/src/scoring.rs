//! The pure scoring engine: ranks, trends, and point effects.
//!
//! Every function here is deterministic over the snapshot it is given and
//! returns new values rather than mutating inputs. The store calls these
//! on demand whenever the underlying projection changes, so local
//! optimistic state and fetched remote state always agree in shape.
//!
//! # Tie-break policy
//!
//! Ranking is a strict total order, not competition ranking: players with
//! equal points never share a rank. Ties break toward the earlier-created
//! player, then by id, so recomputation is fully deterministic.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};

use shrubboard_types::{LeaderboardEntry, Player, PlayerId, Shrub, Trend};

/// Points awarded for an accepted submission unless the caller overrides.
pub const DEFAULT_SHRUB_POINTS: u64 = 1;

// ---------------------------------------------------------------------------
// Rank computation
// ---------------------------------------------------------------------------

/// Per-player aggregates gathered from the shrub snapshot.
struct ShrubAggregate<'a> {
    /// Union of voter ids across the player's shrubs.
    voters: BTreeSet<&'a PlayerId>,
    /// The player's most recently created shrub.
    latest: Option<&'a Shrub>,
}

/// Compute the full leaderboard from a snapshot of players and shrubs.
///
/// Sorts descending by point total; ties break by earlier creation
/// timestamp, then by id. Ranks are 1-based, contiguous, and never shared.
/// The distinct-voter count is the cardinality of the union of voter sets
/// across the player's shrubs; the displayed mispronunciation comes from
/// the player's most recently created shrub, falling back to the player's
/// own `latest_shrub` field when the snapshot holds no shrubs for them.
pub fn compute_rank(players: &[Player], shrubs: &[Shrub]) -> Vec<LeaderboardEntry> {
    let mut aggregates: BTreeMap<&PlayerId, ShrubAggregate<'_>> = BTreeMap::new();
    for shrub in shrubs {
        let agg = aggregates
            .entry(&shrub.player_id)
            .or_insert_with(|| ShrubAggregate {
                voters: BTreeSet::new(),
                latest: None,
            });
        agg.voters.extend(shrub.voters.iter());
        let is_newer = agg
            .latest
            .is_none_or(|current| shrub.created_at > current.created_at);
        if is_newer {
            agg.latest = Some(shrub);
        }
    }

    let mut ordered: Vec<&Player> = players.iter().collect();
    ordered.sort_by(|a, b| {
        b.points
            .cmp(&a.points)
            .then_with(|| a.created_at.cmp(&b.created_at))
            .then_with(|| a.id.cmp(&b.id))
    });

    ordered
        .into_iter()
        .enumerate()
        .map(|(index, player)| {
            let agg = aggregates.get(&player.id);
            let voter_count = agg
                .map(|a| u64::try_from(a.voters.len()).unwrap_or(u64::MAX))
                .unwrap_or(0);
            let latest_shrub = agg
                .and_then(|a| a.latest)
                .map(|s| s.mispronunciation.clone())
                .or_else(|| player.latest_shrub.clone());
            LeaderboardEntry {
                player_id: player.id.clone(),
                name: player.name.clone(),
                shrub_count: player.total_shrubs,
                total_points: player.points,
                voter_count,
                rank: u32::try_from(index.saturating_add(1)).unwrap_or(u32::MAX),
                latest_shrub,
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Trend
// ---------------------------------------------------------------------------

/// Compare two point-total snapshots for the same player.
///
/// Stateless: the caller supplies both values; no history is retained here.
pub const fn compute_trend(current: u64, previous: u64) -> Trend {
    if current > previous {
        Trend::Up
    } else if current < previous {
        Trend::Down
    } else {
        Trend::Same
    }
}

// ---------------------------------------------------------------------------
// Point effects
// ---------------------------------------------------------------------------

/// Return a new [`Player`] reflecting an accepted submission.
///
/// Points grow by `points_awarded` (callers usually pass
/// [`DEFAULT_SHRUB_POINTS`]), the submission count grows by one, and the
/// displayed mispronunciation is replaced. The input is never mutated, so
/// reactive consumers can diff old against new. Saturating arithmetic:
/// totals never wrap.
pub fn record_shrub_effect(
    player: &Player,
    mispronunciation: &str,
    points_awarded: u64,
    now: DateTime<Utc>,
) -> Player {
    Player {
        id: player.id.clone(),
        name: player.name.clone(),
        points: player.points.saturating_add(points_awarded),
        total_shrubs: player.total_shrubs.saturating_add(1),
        latest_shrub: Some(mispronunciation.to_owned()),
        created_at: player.created_at,
        updated_at: now,
    }
}

/// Return a new [`Player`] with administratively corrected totals.
///
/// This is the only path allowed to lower a point total or submission
/// count; everywhere else both are monotonically non-decreasing.
pub fn apply_correction(
    player: &Player,
    points: u64,
    total_shrubs: u64,
    now: DateTime<Utc>,
) -> Player {
    tracing::info!(
        player_id = %player.id,
        old_points = player.points,
        new_points = points,
        old_shrubs = player.total_shrubs,
        new_shrubs = total_shrubs,
        "administrative correction applied"
    );
    Player {
        id: player.id.clone(),
        name: player.name.clone(),
        points,
        total_shrubs,
        latest_shrub: player.latest_shrub.clone(),
        created_at: player.created_at,
        updated_at: now,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use chrono::TimeZone;
    use shrubboard_types::ShrubId;

    use super::*;

    fn day(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, d, 0, 0, 0)
            .single()
            .unwrap_or_default()
    }

    fn player(id: &str, name: &str, points: u64, created: DateTime<Utc>) -> Player {
        Player {
            id: PlayerId::from(id),
            name: name.to_owned(),
            points,
            total_shrubs: 0,
            latest_shrub: None,
            created_at: created,
            updated_at: created,
        }
    }

    fn shrub(id: &str, owner: &str, word: &str, voters: &[&str], created: DateTime<Utc>) -> Shrub {
        Shrub {
            id: ShrubId::from(id),
            player_id: PlayerId::from(owner),
            original_word: "original".to_owned(),
            mispronunciation: word.to_owned(),
            description: None,
            votes: u64::try_from(voters.len()).unwrap_or(u64::MAX),
            voters: voters.iter().map(|v| PlayerId::from(*v)).collect(),
            created_at: created,
            updated_at: created,
        }
    }

    #[test]
    fn more_points_ranks_better() {
        let players = vec![
            player("a", "A", 100, day(1)),
            player("b", "B", 300, day(1)),
            player("c", "C", 200, day(1)),
        ];
        let entries = compute_rank(&players, &[]);
        let order: Vec<(&str, u32)> = entries.iter().map(|e| (e.name.as_str(), e.rank)).collect();
        assert_eq!(order, vec![("B", 1), ("C", 2), ("A", 3)]);
    }

    #[test]
    fn equal_points_earlier_creation_wins() {
        // A created day 1, B created day 2, both at 1000 points.
        let players = vec![
            player("b", "B", 1000, day(2)),
            player("a", "A", 1000, day(1)),
        ];
        let entries = compute_rank(&players, &[]);
        assert_eq!(
            entries.first().map(|e| (e.name.as_str(), e.rank)),
            Some(("A", 1))
        );
        assert_eq!(
            entries.get(1).map(|e| (e.name.as_str(), e.rank)),
            Some(("B", 2))
        );
    }

    #[test]
    fn equal_points_and_timestamp_break_by_id() {
        let players = vec![
            player("z", "Z", 50, day(1)),
            player("a", "A", 50, day(1)),
        ];
        let entries = compute_rank(&players, &[]);
        assert_eq!(entries.first().map(|e| e.name.as_str()), Some("A"));
    }

    #[test]
    fn ranks_are_contiguous_from_one() {
        let players: Vec<Player> = (1u64..=5)
            .map(|i| player(&format!("p{i}"), &format!("P{i}"), i.saturating_mul(10), day(1)))
            .collect();
        let entries = compute_rank(&players, &[]);
        let ranks: Vec<u32> = entries.iter().map(|e| e.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn recomputation_is_pure() {
        let players = vec![
            player("a", "A", 10, day(1)),
            player("b", "B", 20, day(2)),
        ];
        let shrubs = vec![
            shrub("s1", "a", "spaghetti", &["v1", "v2"], day(3)),
            shrub("s2", "b", "refrigerator", &["v1"], day(4)),
        ];
        let first = compute_rank(&players, &shrubs);
        let second = compute_rank(&players, &shrubs);
        assert_eq!(first, second);
    }

    #[test]
    fn voter_count_is_distinct_union_across_shrubs() {
        let players = vec![player("a", "A", 10, day(1))];
        // v1 voted on both shrubs; the union is {v1, v2, v3}.
        let shrubs = vec![
            shrub("s1", "a", "spaghetti", &["v1", "v2"], day(2)),
            shrub("s2", "a", "butterfly", &["v1", "v3"], day(3)),
        ];
        let entries = compute_rank(&players, &shrubs);
        assert_eq!(entries.first().map(|e| e.voter_count), Some(3));
    }

    #[test]
    fn latest_shrub_comes_from_most_recent_submission() {
        let players = vec![player("a", "A", 10, day(1))];
        let shrubs = vec![
            shrub("s1", "a", "spaghetti", &[], day(2)),
            shrub("s2", "a", "butterfly", &[], day(5)),
            shrub("s3", "a", "chocolate", &[], day(3)),
        ];
        let entries = compute_rank(&players, &shrubs);
        assert_eq!(
            entries.first().and_then(|e| e.latest_shrub.as_deref()),
            Some("butterfly")
        );
    }

    #[test]
    fn latest_shrub_falls_back_to_player_field() {
        let mut p = player("a", "A", 10, day(1));
        p.latest_shrub = Some("absolutely".to_owned());
        let entries = compute_rank(&[p], &[]);
        assert_eq!(
            entries.first().and_then(|e| e.latest_shrub.as_deref()),
            Some("absolutely")
        );
    }

    #[test]
    fn trend_directions() {
        assert_eq!(compute_trend(10, 5), Trend::Up);
        assert_eq!(compute_trend(5, 10), Trend::Down);
        assert_eq!(compute_trend(7, 7), Trend::Same);
    }

    #[test]
    fn record_shrub_effect_returns_new_value() {
        let before = player("a", "A", 10, day(1));
        let after = record_shrub_effect(&before, "spaghetti", DEFAULT_SHRUB_POINTS, day(2));
        // Input untouched.
        assert_eq!(before.points, 10);
        assert_eq!(before.total_shrubs, 0);
        assert_eq!(before.latest_shrub, None);
        // Output advanced.
        assert_eq!(after.points, 11);
        assert_eq!(after.total_shrubs, 1);
        assert_eq!(after.latest_shrub.as_deref(), Some("spaghetti"));
    }

    #[test]
    fn record_shrub_effect_saturates_at_max() {
        let mut before = player("a", "A", 0, day(1));
        before.points = u64::MAX;
        let after = record_shrub_effect(&before, "spaghetti", 5, day(2));
        assert_eq!(after.points, u64::MAX);
    }

    #[test]
    fn correction_may_lower_totals() {
        let mut before = player("a", "A", 100, day(1));
        before.total_shrubs = 10;
        let after = apply_correction(&before, 40, 4, day(2));
        assert_eq!(after.points, 40);
        assert_eq!(after.total_shrubs, 4);
    }

    #[test]
    fn unknown_voters_do_not_panic_rank() {
        // A shrub with no voters and a player with no shrubs coexist fine.
        let players = vec![player("a", "A", 1, day(1)), player("b", "B", 2, day(1))];
        let shrubs = vec![Shrub {
            id: ShrubId::from("s1"),
            player_id: PlayerId::from("a"),
            original_word: "hospital".to_owned(),
            mispronunciation: "chocolate".to_owned(),
            description: None,
            votes: 0,
            voters: BTreeSet::new(),
            created_at: day(2),
            updated_at: day(2),
        }];
        let entries = compute_rank(&players, &shrubs);
        assert_eq!(entries.len(), 2);
    }
}
