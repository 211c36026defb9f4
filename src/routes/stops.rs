use axum::extract::{Path, State};
use axum::routing::{delete, get};
use axum::{Json, Router};
use serde_json::{json, Value};

use crate::auth::CurrentUser;
use crate::cascade;
use crate::error::AppError;
use crate::models::catalog::City;
use crate::models::stop::{Stop, StopCreate, StopWithCity};
use crate::ownership;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/trips/:trip_id/stops", get(list_stops).post(create_stop))
        .route("/stops/:stop_id", delete(delete_stop))
}

async fn create_stop(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(trip_id): Path<String>,
    Json(payload): Json<StopCreate>,
) -> Result<Json<StopWithCity>, AppError> {
    ownership::require_trip_ownership(&state.db, &user.id, &trip_id).await?;
    let city = City::find_by_id(&state.db, &payload.city_id)
        .await?
        .ok_or_else(|| AppError::NotFound("City not found".into()))?;

    let stop = Stop::new(&trip_id, payload);
    stop.insert(&state.db).await?;

    Ok(Json(StopWithCity {
        id: stop.id,
        trip_id: stop.trip_id,
        city_id: stop.city_id,
        start_date: stop.start_date,
        end_date: stop.end_date,
        position: stop.position,
        city_name: Some(city.name),
        city_country: Some(city.country),
    }))
}

async fn list_stops(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(trip_id): Path<String>,
) -> Result<Json<Vec<StopWithCity>>, AppError> {
    ownership::require_trip_ownership(&state.db, &user.id, &trip_id).await?;
    let stops = Stop::list_for_trip(&state.db, &trip_id).await?;
    Ok(Json(stops))
}

async fn delete_stop(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(stop_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let (stop, _trip) = ownership::require_stop_ownership(&state.db, &user.id, &stop_id).await?;
    cascade::delete_stop(&state.db, &stop.id).await?;
    Ok(Json(json!({ "message": "Stop deleted successfully" })))
}
