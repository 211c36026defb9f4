use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::{db::DbPool, error::AppError};

/// A booking of a reference activity attached to a stop.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TripActivity {
    pub id: String,
    pub stop_id: String,
    pub activity_id: String,
    pub date: String,
    pub time: Option<String>,
    pub cost: f64,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TripActivityCreate {
    pub activity_id: String,
    pub date: String,
    pub time: Option<String>,
    pub cost: f64,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct TripActivityWithName {
    pub id: String,
    pub stop_id: String,
    pub activity_id: String,
    pub date: String,
    pub time: Option<String>,
    pub cost: f64,
    pub notes: Option<String>,
    pub activity_name: Option<String>,
}

impl TripActivity {
    pub fn new(stop_id: impl Into<String>, payload: TripActivityCreate) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            stop_id: stop_id.into(),
            activity_id: payload.activity_id,
            date: payload.date,
            time: payload.time,
            cost: payload.cost,
            notes: payload.notes,
        }
    }

    pub async fn insert(&self, db: &DbPool) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO trip_activities (id, stop_id, activity_id, date, time, cost, notes)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&self.id)
        .bind(&self.stop_id)
        .bind(&self.activity_id)
        .bind(&self.date)
        .bind(&self.time)
        .bind(self.cost)
        .bind(&self.notes)
        .execute(db)
        .await?;
        Ok(())
    }

    pub async fn find_by_id(db: &DbPool, id: &str) -> Result<Option<TripActivity>, AppError> {
        let activity =
            sqlx::query_as::<_, TripActivity>("SELECT * FROM trip_activities WHERE id = ?")
                .bind(id)
                .fetch_optional(db)
                .await?;
        Ok(activity)
    }

    pub async fn list_for_stop(
        db: &DbPool,
        stop_id: &str,
    ) -> Result<Vec<TripActivityWithName>, AppError> {
        let activities = sqlx::query_as::<_, TripActivityWithName>(
            "SELECT ta.id, ta.stop_id, ta.activity_id, ta.date, ta.time, ta.cost, ta.notes,
                    a.name AS activity_name
             FROM trip_activities ta
             LEFT JOIN activities a ON a.id = ta.activity_id
             WHERE ta.stop_id = ?",
        )
        .bind(stop_id)
        .fetch_all(db)
        .await?;
        Ok(activities)
    }

    pub async fn delete(db: &DbPool, id: &str) -> Result<(), AppError> {
        sqlx::query("DELETE FROM trip_activities WHERE id = ?")
            .bind(id)
            .execute(db)
            .await?;
        Ok(())
    }
}
