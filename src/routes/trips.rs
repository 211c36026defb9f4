use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};

use crate::auth::CurrentUser;
use crate::cascade;
use crate::error::AppError;
use crate::models::trip::{Trip, TripCreate, TripUpdate};
use crate::ownership;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/trips", get(list_trips).post(create_trip))
        .route("/trips/shared/:share_token", get(shared_trip))
        .route(
            "/trips/:trip_id",
            get(get_trip).put(update_trip).delete(delete_trip),
        )
}

async fn create_trip(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(payload): Json<TripCreate>,
) -> Result<Json<Trip>, AppError> {
    let trip = Trip::new(&user.id, payload);
    trip.insert(&state.db).await?;
    Ok(Json(trip))
}

async fn list_trips(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Vec<Trip>>, AppError> {
    let trips = Trip::list_for_user(&state.db, &user.id).await?;
    Ok(Json(trips))
}

async fn get_trip(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(trip_id): Path<String>,
) -> Result<Json<Trip>, AppError> {
    let trip = ownership::require_trip_ownership(&state.db, &user.id, &trip_id).await?;
    Ok(Json(trip))
}

async fn update_trip(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(trip_id): Path<String>,
    Json(payload): Json<TripUpdate>,
) -> Result<Json<Trip>, AppError> {
    ownership::require_trip_ownership(&state.db, &user.id, &trip_id).await?;
    Trip::update(&state.db, &trip_id, &payload).await?;
    let trip = ownership::require_trip_ownership(&state.db, &user.id, &trip_id).await?;
    Ok(Json(trip))
}

async fn delete_trip(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(trip_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    cascade::delete_trip(&state.db, &user.id, &trip_id).await?;
    Ok(Json(json!({ "message": "Trip deleted successfully" })))
}

async fn shared_trip(
    State(state): State<AppState>,
    Path(share_token): Path<String>,
) -> Result<Json<Trip>, AppError> {
    let trip = Trip::find_shared(&state.db, &share_token)
        .await?
        .ok_or_else(|| AppError::NotFound("Trip not found or not public".into()))?;
    Ok(Json(trip))
}
