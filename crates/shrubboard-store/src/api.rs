//! HTTP client for the remote data service.
//!
//! Implements the data-service REST contract: players, shrubs, and vote
//! endpoints speaking camelCase JSON. Any non-2xx response is a transport
//! failure carrying the status and raw body -- domain validation never
//! happens on this layer.
//!
//! Uses enum dispatch instead of trait objects because async methods are
//! not dyn-compatible in Rust. The [`fixture`] backend is compiled only
//! for tests, so mock data paths never ship in production builds.

use std::time::Duration;

use reqwest::{Method, StatusCode, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;

use shrubboard_types::{
    LeaderboardRecord, NewPlayer, NewShrub, PlayerRecord, ShrubRecord, VoteReceipt, VoteRequest,
};

use crate::error::StoreError;

// ---------------------------------------------------------------------------
// Unified backend enum (dyn-compatible alternative to async trait)
// ---------------------------------------------------------------------------

/// A backend that can serve the data-service contract.
pub enum ApiBackend {
    /// The production HTTP backend.
    Http(HttpBackend),
    /// In-memory test double. Only exists in test builds.
    #[cfg(test)]
    Fixture(fixture::FixtureBackend),
}

impl ApiBackend {
    /// `GET /players` -- all player records.
    pub async fn players(&self) -> Result<Vec<PlayerRecord>, StoreError> {
        match self {
            Self::Http(b) => b.get(&["players"], &[]).await,
            #[cfg(test)]
            Self::Fixture(b) => b.players(),
        }
    }

    /// `GET /players/leaderboard` -- server-ranked leaderboard rows.
    pub async fn leaderboard(&self) -> Result<Vec<LeaderboardRecord>, StoreError> {
        match self {
            Self::Http(b) => b.get(&["players", "leaderboard"], &[]).await,
            #[cfg(test)]
            Self::Fixture(b) => b.leaderboard(),
        }
    }

    /// `GET /players/{id}` -- a single player record.
    pub async fn player(&self, id: &str) -> Result<PlayerRecord, StoreError> {
        match self {
            Self::Http(b) => b.get(&["players", id], &[]).await,
            #[cfg(test)]
            Self::Fixture(b) => b.player(id),
        }
    }

    /// `GET /players/name/{name}` -- look a player up by display name.
    pub async fn player_by_name(&self, name: &str) -> Result<PlayerRecord, StoreError> {
        match self {
            Self::Http(b) => b.get(&["players", "name", name], &[]).await,
            #[cfg(test)]
            Self::Fixture(b) => b.player_by_name(name),
        }
    }

    /// `POST /players` -- create a player.
    pub async fn create_player(&self, body: &NewPlayer) -> Result<PlayerRecord, StoreError> {
        match self {
            Self::Http(b) => b.send(Method::POST, &["players"], body).await,
            #[cfg(test)]
            Self::Fixture(b) => b.create_player(body),
        }
    }

    /// `GET /shrubs` -- all shrub records.
    pub async fn shrubs(&self) -> Result<Vec<ShrubRecord>, StoreError> {
        match self {
            Self::Http(b) => b.get(&["shrubs"], &[]).await,
            #[cfg(test)]
            Self::Fixture(b) => b.shrubs(),
        }
    }

    /// `GET /shrubs/top?limit=N` -- the most-voted shrubs.
    pub async fn top_shrubs(&self, limit: u32) -> Result<Vec<ShrubRecord>, StoreError> {
        match self {
            Self::Http(b) => {
                b.get(&["shrubs", "top"], &[("limit", limit.to_string())])
                    .await
            }
            #[cfg(test)]
            Self::Fixture(b) => b.top_shrubs(limit),
        }
    }

    /// `GET /shrubs/player/{playerId}` -- one player's shrubs.
    pub async fn shrubs_by_player(&self, player_id: &str) -> Result<Vec<ShrubRecord>, StoreError> {
        match self {
            Self::Http(b) => b.get(&["shrubs", "player", player_id], &[]).await,
            #[cfg(test)]
            Self::Fixture(b) => b.shrubs_by_player(player_id),
        }
    }

    /// `POST /shrubs` -- submit a shrub.
    pub async fn create_shrub(&self, body: &NewShrub) -> Result<ShrubRecord, StoreError> {
        match self {
            Self::Http(b) => b.send(Method::POST, &["shrubs"], body).await,
            #[cfg(test)]
            Self::Fixture(b) => b.create_shrub(body),
        }
    }

    /// `POST /shrubs/vote` -- cast a vote.
    pub async fn cast_vote(&self, body: &VoteRequest) -> Result<VoteReceipt, StoreError> {
        match self {
            Self::Http(b) => b.send(Method::POST, &["shrubs", "vote"], body).await,
            #[cfg(test)]
            Self::Fixture(b) => b.cast_vote(body),
        }
    }

    /// `DELETE /shrubs/vote` -- retract a vote.
    pub async fn retract_vote(&self, body: &VoteRequest) -> Result<VoteReceipt, StoreError> {
        match self {
            Self::Http(b) => b.send(Method::DELETE, &["shrubs", "vote"], body).await,
            #[cfg(test)]
            Self::Fixture(b) => b.retract_vote(body),
        }
    }

    /// Human-readable backend name for logging.
    pub const fn name(&self) -> &str {
        match self {
            Self::Http(_) => "http",
            #[cfg(test)]
            Self::Fixture(_) => "fixture",
        }
    }
}

// ---------------------------------------------------------------------------
// Production HTTP backend
// ---------------------------------------------------------------------------

/// reqwest-based backend for the production data service.
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpBackend {
    /// Create a backend for the service at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Http`] if the URL is invalid or the client
    /// cannot be built.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, StoreError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| StoreError::Http(format!("invalid base URL {base_url}: {e}")))?;
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| StoreError::Http(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client, base_url })
    }

    /// Build a full endpoint URL from path segments and query pairs.
    ///
    /// Segments are appended through the URL parser so names containing
    /// reserved characters are percent-encoded correctly.
    fn endpoint(&self, segments: &[&str], query: &[(&str, String)]) -> Result<Url, StoreError> {
        let mut url = self.base_url.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|()| StoreError::Http("base URL cannot serve as a base".to_owned()))?;
            path.pop_if_empty();
            path.extend(segments);
        }
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }

    /// Issue a GET request and decode the JSON response.
    async fn get<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        query: &[(&str, String)],
    ) -> Result<T, StoreError> {
        let url = self.endpoint(segments, query)?;
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| StoreError::Http(format!("GET {url} failed: {e}")))?;
        Self::decode(&url, response).await
    }

    /// Issue a request with a JSON body and decode the JSON response.
    async fn send<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        method: Method,
        segments: &[&str],
        body: &B,
    ) -> Result<T, StoreError> {
        let url = self.endpoint(segments, &[])?;
        let response = self
            .client
            .request(method, url.clone())
            .json(body)
            .send()
            .await
            .map_err(|e| StoreError::Http(format!("request to {url} failed: {e}")))?;
        Self::decode(&url, response).await
    }

    /// Map the response status and body into a decoded value or error.
    async fn decode<T: DeserializeOwned>(
        url: &Url,
        response: reqwest::Response,
    ) -> Result<T, StoreError> {
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(StoreError::NotFound {
                resource: url.path().to_owned(),
            });
        }
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "unable to read error body".to_owned());
            return Err(StoreError::Transport {
                status: status.as_u16(),
                message,
            });
        }
        response
            .json()
            .await
            .map_err(|e| StoreError::Decode(format!("{url}: {e}")))
    }
}

// ---------------------------------------------------------------------------
// Test fixture backend
// ---------------------------------------------------------------------------
