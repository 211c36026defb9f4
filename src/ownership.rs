//! Ownership checks for the trip → stop → activity/cost chain. Every
//! mutating or trip-scoped read passes through one of these before
//! touching the store.
//!
//! The top level filters by owner inside the query itself, so a foreign
//! trip and a missing trip are indistinguishable (404). Nested levels
//! fetch unscoped first; once the child's existence is disclosed, a
//! foreign parent surfaces as 403. The asymmetry is deliberate.

use crate::db::DbPool;
use crate::error::AppError;
use crate::models::stop::Stop;
use crate::models::trip::Trip;
use crate::models::trip_activity::TripActivity;
use crate::models::trip_cost::TripCost;

pub async fn require_trip_ownership(
    db: &DbPool,
    user_id: &str,
    trip_id: &str,
) -> Result<Trip, AppError> {
    // One lookup scoped by both id and owner; never fetch-then-compare here.
    sqlx::query_as::<_, Trip>("SELECT * FROM trips WHERE id = ? AND user_id = ?")
        .bind(trip_id)
        .bind(user_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Trip not found".into()))
}

pub async fn require_stop_ownership(
    db: &DbPool,
    user_id: &str,
    stop_id: &str,
) -> Result<(Stop, Trip), AppError> {
    let stop = Stop::find_by_id(db, stop_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Stop not found".into()))?;
    let trip = owned_parent_trip(db, user_id, &stop.trip_id).await?;
    Ok((stop, trip))
}

pub async fn require_activity_ownership(
    db: &DbPool,
    user_id: &str,
    trip_activity_id: &str,
) -> Result<(TripActivity, Stop, Trip), AppError> {
    let activity = TripActivity::find_by_id(db, trip_activity_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Activity not found".into()))?;
    let (stop, trip) = require_stop_ownership(db, user_id, &activity.stop_id).await?;
    Ok((activity, stop, trip))
}

pub async fn require_cost_ownership(
    db: &DbPool,
    user_id: &str,
    cost_id: &str,
) -> Result<(TripCost, Trip), AppError> {
    let cost = TripCost::find_by_id(db, cost_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Cost not found".into()))?;
    let trip = owned_parent_trip(db, user_id, &cost.trip_id).await?;
    Ok((cost, trip))
}

// The child's existence is already disclosed, so a missing or foreign
// parent trip becomes 403 rather than 404.
async fn owned_parent_trip(
    db: &DbPool,
    user_id: &str,
    trip_id: &str,
) -> Result<Trip, AppError> {
    match require_trip_ownership(db, user_id, trip_id).await {
        Err(AppError::NotFound(_)) => Err(AppError::Forbidden("Unauthorized".into())),
        other => other,
    }
}
