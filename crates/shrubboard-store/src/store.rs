//! The leaderboard store: in-memory projection and mutation point.
//!
//! The [`LeaderboardStore`] owns the only mutable copy of the remote
//! state: a read-through cache of players and shrubs, plus the memoized
//! leaderboard derived from them. All other components receive read-only
//! snapshots or pure-function outputs.
//!
//! Mutations are optimistic: the projection is updated synchronously so
//! observers see the change with zero delay, then the corresponding write
//! goes to the remote service. A transport failure rolls the optimistic
//! change back and surfaces the error -- no silent partial state. For
//! votes, the remote receipt's count is authoritative and overwrites the
//! local value whenever another client raced us.
//!
//! Reconciliation is last-applied-wins per entity with no version
//! tracking, which is a deliberate simplification for a single-user
//! client; it is not a convergent design at larger scale.
//!
//! The store is constructed explicitly and passed to consumers; there is
//! no ambient global instance.

use chrono::Utc;

use shrubboard_domain::{ShrubDraft, model, scoring};
use shrubboard_ledger::{
    ConsistencyResult, VoteLedger, VoteOutcome, VotePolicy, ledger::reconcile_remote_votes,
    verify_vote_consistency,
};
use shrubboard_types::{
    LeaderboardEntry, LeaderboardRecord, NewPlayer, NewShrub, Player, PlayerId, Shrub, ShrubId,
    Trend, VoteRequest,
};

use crate::api::{ApiBackend, HttpBackend};
use crate::config::StoreConfig;
use crate::error::StoreError;
use crate::state::LoadState;

/// The read-through cache over the remote data service.
pub struct LeaderboardStore {
    api: ApiBackend,
    ledger: VoteLedger,
    current_player: Option<String>,
    players: Vec<Player>,
    shrubs: Vec<Shrub>,
    leaderboard: Vec<LeaderboardEntry>,
    load_state: LoadState,
}

impl LeaderboardStore {
    /// Create a store over an explicit backend.
    pub const fn new(
        api: ApiBackend,
        policy: VotePolicy,
        current_player: Option<String>,
    ) -> Self {
        Self {
            api,
            ledger: VoteLedger::new(policy),
            current_player,
            players: Vec::new(),
            shrubs: Vec::new(),
            leaderboard: Vec::new(),
            load_state: LoadState::Idle,
        }
    }

    /// Create a store from loaded configuration, using the HTTP backend.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Http`] if the configured base URL is invalid.
    pub fn from_config(config: &StoreConfig) -> Result<Self, StoreError> {
        let backend = HttpBackend::new(&config.api_url, config.request_timeout)?;
        Ok(Self::new(
            ApiBackend::Http(backend),
            VotePolicy::new(config.allow_self_vote),
            config.current_player.clone(),
        ))
    }

    // -----------------------------------------------------------------------
    // Read-only views
    // -----------------------------------------------------------------------

    /// The memoized leaderboard, recomputed on every projection change.
    pub fn leaderboard(&self) -> &[LeaderboardEntry] {
        &self.leaderboard
    }

    /// The cached players.
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// The cached shrubs.
    pub fn shrubs(&self) -> &[Shrub] {
        &self.shrubs
    }

    /// The current phase of the most recent async operation.
    pub const fn load_state(&self) -> &LoadState {
        &self.load_state
    }

    /// Description of the most recent failure, if the last operation failed.
    pub fn last_error(&self) -> Option<&str> {
        self.load_state.error_message()
    }

    /// The 1-based rank of the configured current player, if present.
    pub fn current_user_rank(&self) -> Option<u32> {
        let name = self.current_player.as_deref()?;
        self.leaderboard
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| entry.rank)
    }

    /// Compare a player's cached points against a previous snapshot.
    ///
    /// Returns `None` when the player is not in the projection.
    pub fn trend_for(&self, player: &PlayerId, previous_points: u64) -> Option<Trend> {
        self.players
            .iter()
            .find(|p| p.id == *player)
            .map(|p| scoring::compute_trend(p.points, previous_points))
    }

    // -----------------------------------------------------------------------
    // Fetch
    // -----------------------------------------------------------------------

    /// Fetch the full player/shrub snapshot and replace the projection.
    ///
    /// Each record is normalized through the domain model; records that
    /// fail validation are rejected with a warning rather than patched.
    /// On transport failure the previous projection stays intact
    /// (stale-but-available) and the failure is recorded in the load
    /// state.
    ///
    /// # Errors
    ///
    /// Returns the [`StoreError`] of the first failing request.
    pub async fn fetch_leaderboard(&mut self) -> Result<(), StoreError> {
        self.begin_load();

        let player_records = match self.api.players().await {
            Ok(records) => records,
            Err(err) => return Err(self.settle_err(err)),
        };
        let shrub_records = match self.api.shrubs().await {
            Ok(records) => records,
            Err(err) => return Err(self.settle_err(err)),
        };

        let mut players = Vec::with_capacity(player_records.len());
        for record in player_records {
            match model::normalize_player(record) {
                Ok(player) => players.push(player),
                Err(err) => tracing::warn!(error = %err, "rejecting invalid player record"),
            }
        }

        let mut shrubs = Vec::with_capacity(shrub_records.len());
        for record in shrub_records {
            match model::normalize_shrub(record, &players) {
                Ok(shrub) => shrubs.push(shrub),
                Err(err) => tracing::warn!(error = %err, "rejecting invalid shrub record"),
            }
        }

        if let ConsistencyResult::Violation(anomaly) = verify_vote_consistency(&shrubs) {
            tracing::warn!(%anomaly, "fetched snapshot failed the vote consistency audit");
        }

        self.players = players;
        self.shrubs = shrubs;
        self.recompute();
        self.settle_ok();
        tracing::info!(
            players = self.players.len(),
            shrubs = self.shrubs.len(),
            "projection replaced from remote snapshot"
        );
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Mutations
    // -----------------------------------------------------------------------

    /// Submit a new shrub, optimistically then remotely.
    ///
    /// The draft is validated and appended to the projection before the
    /// remote write is issued, with the owner's points and submission
    /// count advanced via the scoring engine. On remote failure both the
    /// optimistic shrub and the owner effect are rolled back.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Validation`] before any network call, or the
    /// transport error after rollback.
    pub async fn submit_shrub(&mut self, draft: ShrubDraft) -> Result<Shrub, StoreError> {
        let optimistic = model::create_shrub(draft, &self.players, Utc::now())?;
        let optimistic_id = optimistic.id.clone();

        // Advance the owner optimistically, keeping the prior value for rollback.
        let owner_index = self
            .players
            .iter()
            .position(|p| p.id == optimistic.player_id);
        let prior_owner = owner_index.and_then(|i| self.players.get(i).cloned());
        if let (Some(index), Some(owner)) = (owner_index, prior_owner.as_ref()) {
            let advanced = scoring::record_shrub_effect(
                owner,
                &optimistic.mispronunciation,
                scoring::DEFAULT_SHRUB_POINTS,
                Utc::now(),
            );
            if let Some(slot) = self.players.get_mut(index) {
                *slot = advanced;
            }
        }

        self.shrubs.push(optimistic.clone());
        self.recompute();
        self.begin_load();

        let body = NewShrub {
            player_id: optimistic.player_id.as_str().to_owned(),
            original_word: optimistic.original_word.clone(),
            mispronunciation: optimistic.mispronunciation.clone(),
            description: optimistic.description.clone(),
        };
        let result = self.api.create_shrub(&body).await;

        let persisted = match result.and_then(|record| {
            model::normalize_shrub(record, &self.players).map_err(StoreError::from)
        }) {
            Ok(persisted) => persisted,
            Err(err) => {
                // Roll back the optimistic entry and the owner effect.
                self.shrubs.retain(|s| s.id != optimistic_id);
                if let (Some(index), Some(owner)) = (owner_index, prior_owner) {
                    if let Some(slot) = self.players.get_mut(index) {
                        *slot = owner;
                    }
                }
                self.recompute();
                return Err(self.settle_err(err));
            }
        };

        // Adopt the remote-assigned record in place of the optimistic one.
        if let Some(slot) = self.shrubs.iter_mut().find(|s| s.id == optimistic_id) {
            *slot = persisted.clone();
        }
        self.recompute();
        self.settle_ok();
        tracing::info!(shrub_id = %persisted.id, player_id = %persisted.player_id, "shrub submitted");
        Ok(persisted)
    }

    /// Cast a vote, optimistically then remotely.
    ///
    /// The vote ledger is applied locally first; the remote receipt's
    /// count is authoritative and overwrites the local value on mismatch.
    /// On transport failure the local cast is rolled back.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::UnknownShrub`] for an id outside the
    /// projection, [`StoreError::Vote`] when the policy rejects the cast,
    /// or the transport error after rollback.
    pub async fn vote(
        &mut self,
        shrub_id: &ShrubId,
        voter: &PlayerId,
    ) -> Result<VoteOutcome, StoreError> {
        self.apply_vote(shrub_id, voter, VoteDirection::Cast).await
    }

    /// Retract a vote, optimistically then remotely.
    ///
    /// Mirror of [`Self::vote`]; retracting an absent vote is a no-op
    /// reported as [`VoteOutcome::NotVoted`].
    ///
    /// # Errors
    ///
    /// Same as [`Self::vote`].
    pub async fn unvote(
        &mut self,
        shrub_id: &ShrubId,
        voter: &PlayerId,
    ) -> Result<VoteOutcome, StoreError> {
        self.apply_vote(shrub_id, voter, VoteDirection::Retract)
            .await
    }

    /// Shared optimistic-apply/reconcile/rollback path for vote and unvote.
    async fn apply_vote(
        &mut self,
        shrub_id: &ShrubId,
        voter: &PlayerId,
        direction: VoteDirection,
    ) -> Result<VoteOutcome, StoreError> {
        let Some(index) = self.shrubs.iter().position(|s| s.id == *shrub_id) else {
            return Err(StoreError::UnknownShrub(shrub_id.clone()));
        };

        // Apply the ledger operation locally first. A policy rejection
        // happens here, before any network call or state change.
        let outcome = {
            let Some(shrub) = self.shrubs.get_mut(index) else {
                return Err(StoreError::UnknownShrub(shrub_id.clone()));
            };
            match direction {
                VoteDirection::Cast => self.ledger.cast_vote(shrub, voter)?,
                VoteDirection::Retract => self.ledger.retract_vote(shrub, voter)?,
            }
        };
        self.recompute();
        self.begin_load();

        let request = VoteRequest {
            shrub_id: shrub_id.as_str().to_owned(),
            voter_id: voter.as_str().to_owned(),
        };
        let result = match direction {
            VoteDirection::Cast => self.api.cast_vote(&request).await,
            VoteDirection::Retract => self.api.retract_vote(&request).await,
        };

        match result {
            Ok(receipt) => {
                if let Some(shrub) = self.shrubs.get_mut(index) {
                    reconcile_remote_votes(shrub, receipt.votes);
                }
                self.recompute();
                self.settle_ok();
                Ok(outcome)
            }
            Err(err) => {
                // Undo the optimistic ledger operation, if it changed
                // anything. Retract rollback restores the vote without the
                // cast policy check: the vote existed before.
                if outcome.changed() {
                    if let Some(shrub) = self.shrubs.get_mut(index) {
                        match direction {
                            VoteDirection::Cast => {
                                let _ = self.ledger.retract_vote(shrub, voter);
                            }
                            VoteDirection::Retract => {
                                let _ = self.ledger.restore_vote(shrub, voter);
                            }
                        }
                    }
                }
                self.recompute();
                Err(self.settle_err(err))
            }
        }
    }

    /// Create a player remotely after local validation.
    ///
    /// The name is validated against the cached roster before any network
    /// call; the remote-assigned record is then normalized and appended.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Validation`] for a rejected name, or a
    /// transport error.
    pub async fn create_player(
        &mut self,
        name: &str,
        email: Option<&str>,
    ) -> Result<Player, StoreError> {
        // Local uniqueness check rejects before the network call; the
        // remote service remains the final authority on uniqueness.
        let _ = model::create_player(name, &self.players, Utc::now())?;

        self.begin_load();
        let body = NewPlayer {
            name: name.trim().to_owned(),
            email: email.map(ToOwned::to_owned),
        };
        let result = self.api.create_player(&body).await;
        let record = match result {
            Ok(record) => record,
            Err(err) => return Err(self.settle_err(err)),
        };
        let player = match model::normalize_player(record) {
            Ok(player) => player,
            Err(err) => return Err(self.settle_err(StoreError::from(err))),
        };

        self.players.push(player.clone());
        self.recompute();
        self.settle_ok();
        tracing::info!(player_id = %player.id, name = player.name, "player created");
        Ok(player)
    }

    // -----------------------------------------------------------------------
    // Remote pass-throughs
    // -----------------------------------------------------------------------

    /// Look a player up by id on the remote service.
    ///
    /// Read-only: does not touch the projection.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] or a transport error.
    pub async fn player(&mut self, id: &PlayerId) -> Result<Player, StoreError> {
        self.begin_load();
        let result = self.api.player(id.as_str()).await;
        match result.and_then(|record| model::normalize_player(record).map_err(StoreError::from)) {
            Ok(player) => {
                self.settle_ok();
                Ok(player)
            }
            Err(err) => Err(self.settle_err(err)),
        }
    }

    /// Look a player up by display name on the remote service.
    ///
    /// Read-only: does not touch the projection.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] or a transport error.
    pub async fn player_by_name(&mut self, name: &str) -> Result<Player, StoreError> {
        self.begin_load();
        let result = self.api.player_by_name(name).await;
        match result.and_then(|record| model::normalize_player(record).map_err(StoreError::from)) {
            Ok(player) => {
                self.settle_ok();
                Ok(player)
            }
            Err(err) => Err(self.settle_err(err)),
        }
    }

    /// Fetch the most-voted shrubs from the remote service.
    ///
    /// Records are normalized against the cached roster; records owned by
    /// players outside the projection are dropped with a warning.
    ///
    /// # Errors
    ///
    /// Returns a transport error.
    pub async fn top_shrubs(&mut self, limit: u32) -> Result<Vec<Shrub>, StoreError> {
        self.begin_load();
        let result = self.api.top_shrubs(limit).await;
        match result {
            Ok(records) => {
                let shrubs = self.normalize_shrub_records(records);
                self.settle_ok();
                Ok(shrubs)
            }
            Err(err) => Err(self.settle_err(err)),
        }
    }

    /// Fetch one player's shrubs from the remote service.
    ///
    /// # Errors
    ///
    /// Returns a transport error.
    pub async fn shrubs_by_player(&mut self, player: &PlayerId) -> Result<Vec<Shrub>, StoreError> {
        self.begin_load();
        let result = self.api.shrubs_by_player(player.as_str()).await;
        match result {
            Ok(records) => {
                let shrubs = self.normalize_shrub_records(records);
                self.settle_ok();
                Ok(shrubs)
            }
            Err(err) => Err(self.settle_err(err)),
        }
    }

    /// Fetch the server-ranked leaderboard rows, unmodified.
    ///
    /// The store derives its own leaderboard locally; this pass-through
    /// exists for cross-checking the server's ordering.
    ///
    /// # Errors
    ///
    /// Returns a transport error.
    pub async fn remote_leaderboard(&mut self) -> Result<Vec<LeaderboardRecord>, StoreError> {
        self.begin_load();
        let result = self.api.leaderboard().await;
        match result {
            Ok(records) => {
                self.settle_ok();
                Ok(records)
            }
            Err(err) => Err(self.settle_err(err)),
        }
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    /// Recompute the memoized leaderboard from the current projection.
    fn recompute(&mut self) {
        self.leaderboard = scoring::compute_rank(&self.players, &self.shrubs);
    }

    /// Normalize fetched shrub records against the cached roster.
    fn normalize_shrub_records(
        &self,
        records: Vec<shrubboard_types::ShrubRecord>,
    ) -> Vec<Shrub> {
        let mut shrubs = Vec::with_capacity(records.len());
        for record in records {
            match model::normalize_shrub(record, &self.players) {
                Ok(shrub) => shrubs.push(shrub),
                Err(err) => tracing::warn!(error = %err, "rejecting invalid shrub record"),
            }
        }
        shrubs
    }

    /// Transition into `Loading`, leaving any previous `Failed` behind.
    fn begin_load(&mut self) {
        self.load_state = LoadState::Loading;
    }

    /// Settle the in-flight operation as succeeded.
    fn settle_ok(&mut self) {
        self.load_state = LoadState::Succeeded;
    }

    /// Settle the in-flight operation as failed, recording the description.
    fn settle_err(&mut self, err: StoreError) -> StoreError {
        tracing::warn!(error = %err, "store operation failed");
        self.load_state = LoadState::Failed {
            message: err.to_string(),
        };
        err
    }
}

/// Which ledger operation a vote request maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum VoteDirection {
    /// `POST /shrubs/vote` backed by `cast_vote`.
    Cast,
    /// `DELETE /shrubs/vote` backed by `retract_vote`.
    Retract,
}
