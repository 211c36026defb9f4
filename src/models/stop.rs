use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::{db::DbPool, error::AppError};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Stop {
    pub id: String,
    pub trip_id: String,
    pub city_id: String,
    pub start_date: String,
    pub end_date: String,
    #[serde(rename = "order")]
    pub position: i64,
}

#[derive(Debug, Deserialize)]
pub struct StopCreate {
    pub city_id: String,
    pub start_date: String,
    pub end_date: String,
    #[serde(rename = "order")]
    pub position: i64,
}

/// Stop enriched with its reference city for API responses.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct StopWithCity {
    pub id: String,
    pub trip_id: String,
    pub city_id: String,
    pub start_date: String,
    pub end_date: String,
    #[serde(rename = "order")]
    pub position: i64,
    pub city_name: Option<String>,
    pub city_country: Option<String>,
}

impl Stop {
    pub fn new(trip_id: impl Into<String>, payload: StopCreate) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            trip_id: trip_id.into(),
            city_id: payload.city_id,
            start_date: payload.start_date,
            end_date: payload.end_date,
            position: payload.position,
        }
    }

    pub async fn insert(&self, db: &DbPool) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO stops (id, trip_id, city_id, start_date, end_date, position)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&self.id)
        .bind(&self.trip_id)
        .bind(&self.city_id)
        .bind(&self.start_date)
        .bind(&self.end_date)
        .bind(self.position)
        .execute(db)
        .await?;
        Ok(())
    }

    pub async fn find_by_id(db: &DbPool, id: &str) -> Result<Option<Stop>, AppError> {
        let stop = sqlx::query_as::<_, Stop>("SELECT * FROM stops WHERE id = ?")
            .bind(id)
            .fetch_optional(db)
            .await?;
        Ok(stop)
    }

    pub async fn list_for_trip(
        db: &DbPool,
        trip_id: &str,
    ) -> Result<Vec<StopWithCity>, AppError> {
        let stops = sqlx::query_as::<_, StopWithCity>(
            "SELECT s.id, s.trip_id, s.city_id, s.start_date, s.end_date, s.position,
                    c.name AS city_name, c.country AS city_country
             FROM stops s
             LEFT JOIN cities c ON c.id = s.city_id
             WHERE s.trip_id = ?
             ORDER BY s.position",
        )
        .bind(trip_id)
        .fetch_all(db)
        .await?;
        Ok(stops)
    }
}
