use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use tracing::{instrument, warn};

use crate::state::AppState;
use crate::store::StoreError;

use super::dto::{FoodBody, FoodResponse};
use super::repo;

pub fn read_routes() -> Router<AppState> {
    Router::new().route("/foods", get(list_foods))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/foods", post(create_food))
        .route("/foods/:name", put(update_food).delete(delete_food))
}

#[instrument(skip(state))]
pub async fn list_foods(
    State(state): State<AppState>,
) -> Result<Json<Vec<FoodResponse>>, (StatusCode, String)> {
    let foods = repo::list_foods(&state).await.map_err(store_failure)?;
    Ok(Json(foods.into_iter().map(FoodResponse::from).collect()))
}

#[instrument(skip(state, body))]
pub async fn create_food(
    State(state): State<AppState>,
    Json(body): Json<FoodBody>,
) -> Result<(StatusCode, Json<FoodResponse>), (StatusCode, String)> {
    let food = body.validate().map_err(bad_request)?;
    let existing = repo::food_map(&state).await.map_err(store_failure)?;
    if existing.contains_key(&food.name) {
        return Err((StatusCode::CONFLICT, format!("{} already exists", food.name)));
    }
    repo::create_food(&state, &food).await.map_err(store_failure)?;
    Ok((StatusCode::CREATED, Json(food.into())))
}

#[instrument(skip(state, body))]
pub async fn update_food(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(body): Json<FoodBody>,
) -> Result<Json<FoodResponse>, (StatusCode, String)> {
    let food = body.validate().map_err(bad_request)?;
    if food.name != name {
        // Renames orphan existing log rows, which then serve their
        // snapshots (same as a deletion would).
        warn!(from = %name, to = %food.name, "food renamed; older log entries fall back to snapshots");
    }
    let updated = repo::update_food(&state, &name, &food)
        .await
        .map_err(store_failure)?;
    if !updated {
        return Err((StatusCode::NOT_FOUND, format!("no food named {name}")));
    }
    Ok(Json(food.into()))
}

#[instrument(skip(state))]
pub async fn delete_food(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<StatusCode, (StatusCode, String)> {
    let deleted = repo::delete_food(&state, &name).await.map_err(store_failure)?;
    if !deleted {
        return Err((StatusCode::NOT_FOUND, format!("no food named {name}")));
    }
    Ok(StatusCode::NO_CONTENT)
}

fn bad_request(msg: String) -> (StatusCode, String) {
    (StatusCode::BAD_REQUEST, msg)
}

pub(crate) fn store_failure(e: anyhow::Error) -> (StatusCode, String) {
    let unavailable = e
        .chain()
        .any(|cause| matches!(cause.downcast_ref::<StoreError>(), Some(StoreError::Unavailable(_))));
    if unavailable {
        (StatusCode::SERVICE_UNAVAILABLE, e.to_string())
    } else {
        (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nutrition::Unit;

    #[test]
    fn food_response_serializes_the_unit_cell() {
        let food = crate::foods::repo_types::FoodRecord {
            name: "Whey Protein".into(),
            calories_per_100: 370.0,
            protein_per_100: 75.0,
            carbs_per_100: 4.0,
            fat_per_100: 2.0,
            unit: Unit::Discrete("scoop (30g)".into()),
            standard_weight_g: 30.0,
        };
        let json = serde_json::to_string(&FoodResponse::from(food)).unwrap();
        assert!(json.contains("scoop (30g)"));
        assert!(json.contains("Whey Protein"));
    }

    #[test]
    fn unavailable_store_maps_to_503() {
        let err = anyhow::Error::from(StoreError::Unavailable("timeout".into()))
            .context("read food table");
        assert_eq!(store_failure(err).0, StatusCode::SERVICE_UNAVAILABLE);

        let err = anyhow::anyhow!("parse blew up");
        assert_eq!(store_failure(err).0, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
