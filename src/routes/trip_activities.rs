use axum::extract::{Path, State};
use axum::routing::{delete, get};
use axum::{Json, Router};
use serde_json::{json, Value};

use crate::auth::CurrentUser;
use crate::error::AppError;
use crate::models::catalog::Activity;
use crate::models::trip_activity::{TripActivity, TripActivityCreate, TripActivityWithName};
use crate::ownership;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/stops/:stop_id/activities",
            get(list_activities).post(create_activity),
        )
        .route("/trip-activities/:trip_activity_id", delete(delete_activity))
}

async fn create_activity(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(stop_id): Path<String>,
    Json(payload): Json<TripActivityCreate>,
) -> Result<Json<TripActivityWithName>, AppError> {
    ownership::require_stop_ownership(&state.db, &user.id, &stop_id).await?;
    let activity = Activity::find_by_id(&state.db, &payload.activity_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Activity not found".into()))?;

    let trip_activity = TripActivity::new(&stop_id, payload);
    trip_activity.insert(&state.db).await?;

    Ok(Json(TripActivityWithName {
        id: trip_activity.id,
        stop_id: trip_activity.stop_id,
        activity_id: trip_activity.activity_id,
        date: trip_activity.date,
        time: trip_activity.time,
        cost: trip_activity.cost,
        notes: trip_activity.notes,
        activity_name: Some(activity.name),
    }))
}

async fn list_activities(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(stop_id): Path<String>,
) -> Result<Json<Vec<TripActivityWithName>>, AppError> {
    ownership::require_stop_ownership(&state.db, &user.id, &stop_id).await?;
    let activities = TripActivity::list_for_stop(&state.db, &stop_id).await?;
    Ok(Json(activities))
}

async fn delete_activity(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(trip_activity_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let (trip_activity, _stop, _trip) =
        ownership::require_activity_ownership(&state.db, &user.id, &trip_activity_id).await?;
    TripActivity::delete(&state.db, &trip_activity.id).await?;
    Ok(Json(json!({ "message": "Activity deleted successfully" })))
}
