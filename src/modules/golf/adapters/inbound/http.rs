use axum::{
    Json,
    extract::rejection::JsonRejection,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::modules::golf::core::model::{Course, CourseLocation, HoleResult};
use crate::modules::golf::errors::GolfError;
use crate::modules::golf::use_cases::play_game::command::StartGame;
use crate::modules::golf::use_cases::play_game::decision::GameDecideError;
use crate::shared::core::primitives::IdGenerator;
use crate::shared::infrastructure::golf_store::StoreError;
use crate::shell::state::AppState;

#[derive(Deserialize)]
pub struct NameBody {
    pub name: String,
}

#[derive(Deserialize)]
pub struct CourseBody {
    pub id: Option<String>,
    pub name: String,
    pub hole_count: u32,
}

#[derive(Deserialize)]
pub struct AddLocationBody {
    pub id: Option<String>,
    pub name: String,
    pub courses: Vec<CourseBody>,
}

impl AddLocationBody {
    /// Missing location and course ids are drawn from `ids`.
    pub fn into_location(self, ids: &dyn IdGenerator) -> CourseLocation {
        CourseLocation {
            id: self.id.unwrap_or_else(|| ids.next_id()),
            name: self.name.trim().to_string(),
            courses: self
                .courses
                .into_iter()
                .map(|course| Course {
                    id: course.id.unwrap_or_else(|| ids.next_id()),
                    name: course.name.trim().to_string(),
                    hole_count: course.hole_count,
                })
                .collect(),
        }
    }
}

fn first_hole() -> u32 {
    1
}

#[derive(Deserialize)]
pub struct StartGameBody {
    pub season_id: String,
    pub location_id: String,
    pub course_id: String,
    #[serde(default = "first_hole")]
    pub starting_hole: u32,
    pub player_ids: Vec<String>,
}

#[derive(Deserialize)]
pub struct ExportQuery {
    pub date: Option<NaiveDate>,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

fn status_for(err: &GolfError) -> StatusCode {
    match err {
        GolfError::GameNotFound(_) => StatusCode::NOT_FOUND,
        GolfError::PreconditionFailed(_) => StatusCode::PRECONDITION_FAILED,
        GolfError::Rejected(GameDecideError::GameAlreadyFinished) => StatusCode::CONFLICT,
        GolfError::Rejected(_) => StatusCode::UNPROCESSABLE_ENTITY,
        GolfError::Store(StoreError::VersionMismatch { .. }) => StatusCode::CONFLICT,
        GolfError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn error_response(err: GolfError) -> Response {
    let status = status_for(&err);
    if status.is_server_error() {
        tracing::error!(error = %err, "request failed");
    }
    (
        status,
        Json(ErrorResponse {
            error: err.to_string(),
        }),
    )
        .into_response()
}

fn respond<T: Serialize>(status: StatusCode, outcome: Result<T, GolfError>) -> Response {
    match outcome {
        Ok(body) => (status, Json(body)).into_response(),
        Err(err) => error_response(err),
    }
}

pub async fn add_player(
    State(state): State<AppState>,
    body: Result<Json<NameBody>, JsonRejection>,
) -> Response {
    let Json(body) = match body {
        Ok(b) => b,
        Err(_) => return StatusCode::UNPROCESSABLE_ENTITY.into_response(),
    };
    respond(StatusCode::CREATED, state.repository.add_player(&body.name).await)
}

pub async fn list_players(State(state): State<AppState>) -> Response {
    respond(StatusCode::OK, state.repository.list_players().await)
}

pub async fn remove_player(
    State(state): State<AppState>,
    Path(player_id): Path<String>,
) -> Response {
    match state.repository.remove_player(&player_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => error_response(err),
    }
}

pub async fn create_season(
    State(state): State<AppState>,
    body: Result<Json<NameBody>, JsonRejection>,
) -> Response {
    let Json(body) = match body {
        Ok(b) => b,
        Err(_) => return StatusCode::UNPROCESSABLE_ENTITY.into_response(),
    };
    respond(StatusCode::CREATED, state.repository.create_season(&body.name).await)
}

pub async fn list_seasons(State(state): State<AppState>) -> Response {
    respond(StatusCode::OK, state.repository.list_seasons().await)
}

pub async fn add_location(
    State(state): State<AppState>,
    Path(season_id): Path<String>,
    body: Result<Json<AddLocationBody>, JsonRejection>,
) -> Response {
    let Json(body) = match body {
        Ok(b) => b,
        Err(_) => return StatusCode::UNPROCESSABLE_ENTITY.into_response(),
    };
    respond(
        StatusCode::CREATED,
        state
            .repository
            .add_location(&season_id, body.into_location(state.ids.as_ref()))
            .await,
    )
}

pub async fn list_locations(
    State(state): State<AppState>,
    Path(season_id): Path<String>,
) -> Response {
    respond(StatusCode::OK, state.repository.list_locations(&season_id).await)
}

pub async fn season_standings(
    State(state): State<AppState>,
    Path(season_id): Path<String>,
) -> Response {
    respond(StatusCode::OK, state.repository.season_standings(&season_id).await)
}

pub async fn export_season_stats(
    State(state): State<AppState>,
    Path(season_id): Path<String>,
    Query(query): Query<ExportQuery>,
) -> Response {
    match state
        .repository
        .export_season_stats_csv(&season_id, query.date)
        .await
    {
        Ok(csv) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/csv; charset=utf-8")],
            csv,
        )
            .into_response(),
        Err(err) => error_response(err),
    }
}

pub async fn start_game(
    State(state): State<AppState>,
    body: Result<Json<StartGameBody>, JsonRejection>,
) -> Response {
    let Json(body) = match body {
        Ok(b) => b,
        Err(_) => return StatusCode::UNPROCESSABLE_ENTITY.into_response(),
    };
    let command = StartGame {
        season_id: body.season_id,
        location_id: body.location_id,
        course_id: body.course_id,
        starting_hole: body.starting_hole,
        player_ids: body.player_ids,
    };
    respond(StatusCode::CREATED, state.repository.start_game(command).await)
}

pub async fn record_hole_result(
    State(state): State<AppState>,
    Path(game_id): Path<String>,
    body: Result<Json<HoleResult>, JsonRejection>,
) -> Response {
    let Json(result) = match body {
        Ok(b) => b,
        Err(_) => return StatusCode::UNPROCESSABLE_ENTITY.into_response(),
    };
    respond(
        StatusCode::OK,
        state.repository.record_hole_result(&game_id, result).await,
    )
}

pub async fn finish_game(State(state): State<AppState>, Path(game_id): Path<String>) -> Response {
    respond(StatusCode::OK, state.repository.finish_game(&game_id).await)
}

pub async fn player_scorecards(
    State(state): State<AppState>,
    Path(player_id): Path<String>,
) -> Response {
    respond(StatusCode::OK, state.repository.player_scorecards(&player_id).await)
}

pub async fn course_rankings(
    State(state): State<AppState>,
    Path(course_id): Path<String>,
) -> Response {
    respond(StatusCode::OK, state.repository.course_rankings(&course_id).await)
}
