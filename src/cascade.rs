//! Cascading deletes for parent resources. Sequential best-effort
//! deletes with no cross-collection transaction: a failure mid-cascade
//! leaves the earlier deletes in place. A child created concurrently
//! with its parent's cascade may survive it; that race is accepted.

use crate::db::DbPool;
use crate::error::AppError;

/// Deletes a trip and everything under it. The delete itself is scoped
/// by owner, so the ownership check and the removal are one statement.
pub async fn delete_trip(db: &DbPool, user_id: &str, trip_id: &str) -> Result<(), AppError> {
    let result = sqlx::query("DELETE FROM trips WHERE id = ? AND user_id = ?")
        .bind(trip_id)
        .bind(user_id)
        .execute(db)
        .await?;
    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Trip not found".into()));
    }

    // Activities first: finding them still needs the stop rows.
    sqlx::query(
        "DELETE FROM trip_activities
         WHERE stop_id IN (SELECT id FROM stops WHERE trip_id = ?)",
    )
    .bind(trip_id)
    .execute(db)
    .await?;
    sqlx::query("DELETE FROM stops WHERE trip_id = ?")
        .bind(trip_id)
        .execute(db)
        .await?;
    sqlx::query("DELETE FROM trip_costs WHERE trip_id = ?")
        .bind(trip_id)
        .execute(db)
        .await?;

    Ok(())
}

/// Deletes a stop and its activities. Callers must have verified
/// ownership of the stop already.
pub async fn delete_stop(db: &DbPool, stop_id: &str) -> Result<(), AppError> {
    sqlx::query("DELETE FROM stops WHERE id = ?")
        .bind(stop_id)
        .execute(db)
        .await?;
    sqlx::query("DELETE FROM trip_activities WHERE stop_id = ?")
        .bind(stop_id)
        .execute(db)
        .await?;
    Ok(())
}
