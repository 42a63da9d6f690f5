use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use time::{Date, OffsetDateTime};
use tracing::instrument;
use uuid::Uuid;

use crate::foods::handlers::store_failure;
use crate::state::AppState;

use super::dto::{
    CreateEntryRequest, DayQuery, DayResponse, DaySummaryResponse, EntryResponse, HistoryQuery,
};
use super::repo_types::DATE_FORMAT;
use super::services;

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/log/day/:date", get(day))
        .route("/log/history", get(history))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/log", post(create_entry))
        .route("/log/:id", axum::routing::delete(delete_entry))
}

#[instrument(skip(state, body))]
pub async fn create_entry(
    State(state): State<AppState>,
    Json(body): Json<CreateEntryRequest>,
) -> Result<(StatusCode, Json<EntryResponse>), (StatusCode, String)> {
    if body.food.trim().is_empty() {
        return Err((StatusCode::BAD_REQUEST, "food must be non-empty".into()));
    }
    if !(body.quantity.is_finite() && body.quantity > 0.0) {
        return Err((StatusCode::BAD_REQUEST, "quantity must be positive".into()));
    }
    let food = body.food.clone();
    match services::create_entry(&state, body).await.map_err(store_failure)? {
        Some(entry) => Ok((StatusCode::CREATED, Json(entry.into()))),
        None => Err((StatusCode::NOT_FOUND, format!("no food named {food}"))),
    }
}

#[instrument(skip(state))]
pub async fn delete_entry(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, (StatusCode, String)> {
    if services::delete_entry(&state, id).await.map_err(store_failure)? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err((StatusCode::NOT_FOUND, format!("no log entry {id}")))
    }
}

#[instrument(skip(state))]
pub async fn day(
    State(state): State<AppState>,
    Path(date): Path<String>,
    Query(q): Query<DayQuery>,
) -> Result<Json<DayResponse>, (StatusCode, String)> {
    let date = Date::parse(&date, DATE_FORMAT)
        .map_err(|_| (StatusCode::BAD_REQUEST, format!("invalid date {date}")))?;
    let view = services::day_view(&state, date, q.training_day)
        .await
        .map_err(store_failure)?;
    Ok(Json(view))
}

#[instrument(skip(state))]
pub async fn history(
    State(state): State<AppState>,
    Query(q): Query<HistoryQuery>,
) -> Result<Json<Vec<DaySummaryResponse>>, (StatusCode, String)> {
    let as_of = q.as_of.unwrap_or_else(|| OffsetDateTime::now_utc().date());
    let summaries = services::history(&state, q.days, as_of, q.training_day)
        .await
        .map_err(store_failure)?;
    Ok(Json(summaries))
}
