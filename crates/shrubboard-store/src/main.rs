//! Leaderboard snapshot entry point for Shrubboard.
//!
//! Connects to the remote data service, fetches the full player/shrub
//! snapshot, and logs the locally ranked leaderboard. Intended both as a
//! smoke check against a running data service and as the wiring example
//! for embedding [`LeaderboardStore`] in a host application.

use tracing::info;
use tracing_subscriber::EnvFilter;

use shrubboard_store::{LeaderboardStore, StoreConfig};

/// Application entry point.
///
/// Initializes logging, loads configuration from environment variables,
/// fetches a snapshot from the remote data service, and logs the ranked
/// leaderboard.
///
/// # Errors
///
/// Returns an error if configuration or the snapshot fetch fails.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("shrubboard starting");

    // Load configuration from environment
    let config = StoreConfig::from_env()?;
    info!(
        api_url = config.api_url,
        allow_self_vote = config.allow_self_vote,
        request_timeout_ms = config.request_timeout.as_millis(),
        "configuration loaded"
    );

    let mut store = LeaderboardStore::from_config(&config)?;
    store.fetch_leaderboard().await?;

    info!(
        players = store.players().len(),
        shrubs = store.shrubs().len(),
        "snapshot fetched"
    );

    for entry in store.leaderboard() {
        info!(
            rank = entry.rank,
            name = entry.name,
            points = entry.total_points,
            shrubs = entry.shrub_count,
            voters = entry.voter_count,
            latest = entry.latest_shrub.as_deref().unwrap_or("-"),
            "leaderboard entry"
        );
    }

    if let Some(rank) = store.current_user_rank() {
        info!(rank, "current player rank");
    }

    Ok(())
}
