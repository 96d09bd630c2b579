//! JSON-over-HTTP surface for the tracker (feature `server`).
//!
//! ## Routes
//!
//! Quest and round numbers in paths and responses are 1-based. Every write
//! runs load → transition → commit while holding the store lock, so two
//! requests against the same game never interleave.

mod error;
mod routes;

pub use error::ServerError;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::routing::{delete, get, post, put};
use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::store::GameStore;

/// Store handle shared by all handlers.
pub type SharedStore = Arc<Mutex<dyn GameStore + Send>>;

#[derive(Clone)]
pub struct AppState {
    store: SharedStore,
}

impl AppState {
    /// Wrap a store for use by the router.
    pub fn new<S>(store: S) -> Self
    where
        S: GameStore + Send + 'static,
    {
        Self {
            store: Arc::new(Mutex::new(store)),
        }
    }

    /// The shared store.
    #[must_use]
    pub fn store(&self) -> &SharedStore {
        &self.store
    }
}

/// Bind `addr` and serve until Ctrl-C.
pub async fn serve<S>(addr: SocketAddr, store: S) -> Result<(), ServerError>
where
    S: GameStore + Send + 'static,
{
    let app = router(AppState::new(store));

    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "avalon tracker listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

/// Build the API router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/players",
            post(routes::register_player).get(routes::list_players),
        )
        .route(
            "/api/games",
            post(routes::create_game).get(routes::list_games),
        )
        .route("/api/games/{game_id}", get(routes::get_game))
        .route("/api/games/{game_id}/state", put(routes::replace_state))
        .route("/api/games/{game_id}/status", post(routes::set_status))
        .route("/api/games/{game_id}/players", post(routes::add_game_player))
        .route(
            "/api/games/{game_id}/players/{player_id}",
            delete(routes::remove_game_player),
        )
        .route("/api/games/{game_id}/quests", post(routes::add_quest))
        .route(
            "/api/games/{game_id}/quests/{quest_number}",
            delete(routes::remove_quest),
        )
        .route(
            "/api/games/{game_id}/quests/{quest_number}/rounds",
            post(routes::add_round),
        )
        .route(
            "/api/games/{game_id}/quests/{quest_number}/result",
            get(routes::quest_result),
        )
        .route(
            "/api/games/{game_id}/notes",
            post(routes::add_note).get(routes::list_notes),
        )
        .route("/api/notes/{note_id}", get(routes::get_note))
        .with_state(state)
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(%err, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    info!("shutdown requested");
}
