use axum::extract::{Path, State};
use axum::routing::{delete, get};
use axum::{Json, Router};
use serde_json::{json, Value};

use crate::auth::CurrentUser;
use crate::error::AppError;
use crate::models::trip_cost::{TripCost, TripCostCreate};
use crate::ownership;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/trips/:trip_id/costs", get(list_costs).post(create_cost))
        .route("/costs/:cost_id", delete(delete_cost))
}

async fn create_cost(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(trip_id): Path<String>,
    Json(payload): Json<TripCostCreate>,
) -> Result<Json<TripCost>, AppError> {
    ownership::require_trip_ownership(&state.db, &user.id, &trip_id).await?;
    let cost = TripCost::new(&trip_id, payload);
    cost.insert(&state.db).await?;
    Ok(Json(cost))
}

async fn list_costs(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(trip_id): Path<String>,
) -> Result<Json<Vec<TripCost>>, AppError> {
    ownership::require_trip_ownership(&state.db, &user.id, &trip_id).await?;
    let costs = TripCost::list_for_trip(&state.db, &trip_id).await?;
    Ok(Json(costs))
}

async fn delete_cost(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(cost_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let (cost, _trip) = ownership::require_cost_ownership(&state.db, &user.id, &cost_id).await?;
    TripCost::delete(&state.db, &cost.id).await?;
    Ok(Json(json!({ "message": "Cost deleted successfully" })))
}
