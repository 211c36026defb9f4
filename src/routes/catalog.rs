use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};

use crate::error::AppError;
use crate::models::catalog::{Activity, ActivityFilter, City, CityFilter};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/cities", get(list_cities))
        .route("/cities/:city_id", get(get_city))
        .route("/activities", get(list_activities))
        .route("/activities/:activity_id", get(get_activity))
}

async fn list_cities(
    State(state): State<AppState>,
    Query(filter): Query<CityFilter>,
) -> Result<Json<Vec<City>>, AppError> {
    let cities = City::list(&state.db, &filter).await?;
    Ok(Json(cities))
}

async fn get_city(
    State(state): State<AppState>,
    Path(city_id): Path<String>,
) -> Result<Json<City>, AppError> {
    let city = City::find_by_id(&state.db, &city_id)
        .await?
        .ok_or_else(|| AppError::NotFound("City not found".into()))?;
    Ok(Json(city))
}

async fn list_activities(
    State(state): State<AppState>,
    Query(filter): Query<ActivityFilter>,
) -> Result<Json<Vec<Activity>>, AppError> {
    let activities = Activity::list(&state.db, &filter).await?;
    Ok(Json(activities))
}

async fn get_activity(
    State(state): State<AppState>,
    Path(activity_id): Path<String>,
) -> Result<Json<Activity>, AppError> {
    let activity = Activity::find_by_id(&state.db, &activity_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Activity not found".into()))?;
    Ok(Json(activity))
}
