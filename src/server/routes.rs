//! Request handlers.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use super::error::HttpApiError;
use super::AppState;
use crate::core::{quest_number_to_index, PlayerId, Quest, QuestOutcome};
use crate::engine::{self, get_quest_result, parse_game_document};
use crate::store::{
    update_game, GameId, GameRecord, GameStatus, Note, NoteId, PlayerRecord, StoreError,
};

type ApiResult<T> = Result<T, HttpApiError>;

// === Bodies ===

#[derive(Debug, Deserialize)]
pub(super) struct RegisterPlayerRequest {
    name: String,
}

#[derive(Debug, Serialize)]
pub(super) struct RegisterPlayerResponse {
    player_id: PlayerId,
}

#[derive(Debug, Serialize)]
pub(super) struct PlayersResponse {
    players: Vec<PlayerRecord>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct CreateGameResponse {
    game_id: GameId,
}

#[derive(Debug, Serialize)]
pub(super) struct GamesResponse {
    games: Vec<GameRecord>,
}

#[derive(Debug, Deserialize)]
pub(super) struct StatusRequest {
    status: GameStatus,
}

#[derive(Debug, Deserialize)]
pub(super) struct AddGamePlayerRequest {
    player_id: PlayerId,
    #[serde(default)]
    role: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct PlayerChangeResponse {
    message: &'static str,
    player_count: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct QuestChangeResponse {
    message: &'static str,
    quest_number: usize,
}

#[derive(Debug, Deserialize)]
pub(super) struct AddRoundRequest {
    team: Vec<PlayerId>,
    king: PlayerId,
    approvals: Option<Vec<PlayerId>>,
    failures: Option<i64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct RoundAddedResponse {
    message: &'static str,
    quest_number: usize,
    round_number: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct QuestResultResponse {
    quest_number: usize,
    result: Option<QuestOutcome>,
}

#[derive(Debug, Deserialize)]
pub(super) struct AddNoteRequest {
    content: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct NoteCreatedResponse {
    note_id: NoteId,
}

#[derive(Debug, Serialize)]
pub(super) struct NotesResponse {
    notes: Vec<Note>,
}

// === Players ===

pub(super) async fn register_player(
    State(state): State<AppState>,
    Json(request): Json<RegisterPlayerRequest>,
) -> ApiResult<(StatusCode, Json<RegisterPlayerResponse>)> {
    let mut store = state.store().lock().await;
    let player_id = store.register_player(&request.name)?;
    Ok((StatusCode::CREATED, Json(RegisterPlayerResponse { player_id })))
}

pub(super) async fn list_players(State(state): State<AppState>) -> ApiResult<Json<PlayersResponse>> {
    let store = state.store().lock().await;
    Ok(Json(PlayersResponse {
        players: store.list_players()?,
    }))
}

// === Games ===

pub(super) async fn create_game(
    State(state): State<AppState>,
) -> ApiResult<(StatusCode, Json<CreateGameResponse>)> {
    let mut store = state.store().lock().await;
    let game_id = store.create_game()?;
    Ok((StatusCode::CREATED, Json(CreateGameResponse { game_id })))
}

pub(super) async fn list_games(State(state): State<AppState>) -> ApiResult<Json<GamesResponse>> {
    let store = state.store().lock().await;
    Ok(Json(GamesResponse {
        games: store.list_games()?,
    }))
}

pub(super) async fn get_game(
    State(state): State<AppState>,
    Path(game_id): Path<String>,
) -> ApiResult<Json<GameRecord>> {
    let store = state.store().lock().await;
    Ok(Json(store.get_game(&GameId::from(game_id))?))
}

/// Replace a game's whole state with a client-supplied document.
pub(super) async fn replace_state(
    State(state): State<AppState>,
    Path(game_id): Path<String>,
    Json(document): Json<Value>,
) -> ApiResult<Json<GameRecord>> {
    let game_id = GameId::from(game_id);
    let mut store = state.store().lock().await;

    store.get_game(&game_id)?;
    let valid = store.list_valid_player_ids()?;
    let next = parse_game_document(&document, &valid).map_err(StoreError::from)?;
    store.commit(&game_id, &next)?;

    Ok(Json(store.get_game(&game_id)?))
}

pub(super) async fn set_status(
    State(state): State<AppState>,
    Path(game_id): Path<String>,
    Json(request): Json<StatusRequest>,
) -> ApiResult<Json<GameRecord>> {
    let game_id = GameId::from(game_id);
    let mut store = state.store().lock().await;

    store.set_status(&game_id, request.status)?;
    Ok(Json(store.get_game(&game_id)?))
}

// === Seating ===

pub(super) async fn add_game_player(
    State(state): State<AppState>,
    Path(game_id): Path<String>,
    Json(request): Json<AddGamePlayerRequest>,
) -> ApiResult<Json<PlayerChangeResponse>> {
    let game_id = GameId::from(game_id);
    let mut store = state.store().lock().await;

    store.get_game(&game_id)?;
    if store.get_player(request.player_id)?.is_none() {
        return Err(StoreError::PlayerNotRegistered(request.player_id).into());
    }

    let next = update_game(&mut *store, &game_id, |s| {
        Ok(engine::add_player(s, request.player_id, &request.role))
    })?;
    Ok(Json(PlayerChangeResponse {
        message: "Player added to game",
        player_count: next.player_count(),
    }))
}

pub(super) async fn remove_game_player(
    State(state): State<AppState>,
    Path((game_id, player_id)): Path<(String, i64)>,
) -> ApiResult<Json<PlayerChangeResponse>> {
    let game_id = GameId::from(game_id);
    let mut store = state.store().lock().await;

    let next = update_game(&mut *store, &game_id, |s| {
        engine::remove_player(s, PlayerId::new(player_id))
    })?;
    Ok(Json(PlayerChangeResponse {
        message: "Player removed from game",
        player_count: next.player_count(),
    }))
}

// === Quests and rounds ===

pub(super) async fn add_quest(
    State(state): State<AppState>,
    Path(game_id): Path<String>,
) -> ApiResult<Json<QuestChangeResponse>> {
    let game_id = GameId::from(game_id);
    let mut store = state.store().lock().await;

    let next = update_game(&mut *store, &game_id, |s| Ok(engine::add_quest(s)))?;
    Ok(Json(QuestChangeResponse {
        message: "Quest added",
        quest_number: next.quest_count(),
    }))
}

pub(super) async fn remove_quest(
    State(state): State<AppState>,
    Path((game_id, quest_number)): Path<(String, usize)>,
) -> ApiResult<Json<QuestChangeResponse>> {
    let quest_index = quest_index(quest_number)?;
    let game_id = GameId::from(game_id);
    let mut store = state.store().lock().await;

    update_game(&mut *store, &game_id, |s| engine::remove_quest(s, quest_index))?;
    Ok(Json(QuestChangeResponse {
        message: "Quest removed",
        quest_number,
    }))
}

/// Propose a team, optionally recording the vote and the mission in the same
/// commit.
pub(super) async fn add_round(
    State(state): State<AppState>,
    Path((game_id, quest_number)): Path<(String, usize)>,
    Json(request): Json<AddRoundRequest>,
) -> ApiResult<Json<RoundAddedResponse>> {
    let quest_index = quest_index(quest_number)?;
    let game_id = GameId::from(game_id);
    let mut store = state.store().lock().await;

    debug!(%game_id, quest_number, "adding round");
    let next = update_game(&mut *store, &game_id, |s| {
        let mut next = engine::add_round(s, quest_index, &request.team, request.king)?;
        let round_index = next
            .quest(quest_index)
            .map_or(0, Quest::round_count)
            .saturating_sub(1);

        if let Some(approvals) = &request.approvals {
            next = engine::update_approvals(&next, quest_index, round_index, approvals)?;
        }
        if let Some(fails) = request.failures {
            next = engine::update_fails(&next, quest_index, round_index, fails)?;
        }
        Ok(next)
    })?;

    Ok(Json(RoundAddedResponse {
        message: "Round added",
        quest_number,
        round_number: next.quest(quest_index).map_or(0, Quest::round_count),
    }))
}

pub(super) async fn quest_result(
    State(state): State<AppState>,
    Path((game_id, quest_number)): Path<(String, usize)>,
) -> ApiResult<Json<QuestResultResponse>> {
    let quest_index = quest_index(quest_number)?;
    let store = state.store().lock().await;

    let current = store.load(&GameId::from(game_id))?;
    if current.quest(quest_index).is_none() {
        return Err(invalid_quest_number(quest_number));
    }
    Ok(Json(QuestResultResponse {
        quest_number,
        result: get_quest_result(&current, quest_index),
    }))
}

// === Notes ===

pub(super) async fn add_note(
    State(state): State<AppState>,
    Path(game_id): Path<String>,
    Json(request): Json<AddNoteRequest>,
) -> ApiResult<(StatusCode, Json<NoteCreatedResponse>)> {
    let mut store = state.store().lock().await;
    let note_id = store.add_note(&GameId::from(game_id), &request.content)?;
    Ok((StatusCode::CREATED, Json(NoteCreatedResponse { note_id })))
}

pub(super) async fn list_notes(
    State(state): State<AppState>,
    Path(game_id): Path<String>,
) -> ApiResult<Json<NotesResponse>> {
    let store = state.store().lock().await;
    Ok(Json(NotesResponse {
        notes: store.list_notes(&GameId::from(game_id))?,
    }))
}

pub(super) async fn get_note(
    State(state): State<AppState>,
    Path(note_id): Path<String>,
) -> ApiResult<Json<Note>> {
    let note_id = NoteId::from(note_id);
    let store = state.store().lock().await;

    let note = store
        .get_note(&note_id)?
        .ok_or(StoreError::NoteNotFound(note_id))?;
    Ok(Json(note))
}

fn quest_index(quest_number: usize) -> ApiResult<usize> {
    quest_number_to_index(quest_number).ok_or_else(|| invalid_quest_number(quest_number))
}

fn invalid_quest_number(quest_number: usize) -> HttpApiError {
    HttpApiError::bad_request(format!("Invalid quest number: {quest_number}"))
}
