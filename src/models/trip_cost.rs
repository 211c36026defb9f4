use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::{db::DbPool, error::AppError};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TripCost {
    pub id: String,
    pub trip_id: String,
    pub category: String,
    pub amount: f64,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TripCostCreate {
    pub category: String,
    pub amount: f64,
    pub description: Option<String>,
}

impl TripCost {
    pub fn new(trip_id: impl Into<String>, payload: TripCostCreate) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            trip_id: trip_id.into(),
            category: payload.category,
            amount: payload.amount,
            description: payload.description,
        }
    }

    pub async fn insert(&self, db: &DbPool) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO trip_costs (id, trip_id, category, amount, description)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&self.id)
        .bind(&self.trip_id)
        .bind(&self.category)
        .bind(self.amount)
        .bind(&self.description)
        .execute(db)
        .await?;
        Ok(())
    }

    pub async fn find_by_id(db: &DbPool, id: &str) -> Result<Option<TripCost>, AppError> {
        let cost = sqlx::query_as::<_, TripCost>("SELECT * FROM trip_costs WHERE id = ?")
            .bind(id)
            .fetch_optional(db)
            .await?;
        Ok(cost)
    }

    pub async fn list_for_trip(db: &DbPool, trip_id: &str) -> Result<Vec<TripCost>, AppError> {
        let costs = sqlx::query_as::<_, TripCost>("SELECT * FROM trip_costs WHERE trip_id = ?")
            .bind(trip_id)
            .fetch_all(db)
            .await?;
        Ok(costs)
    }

    pub async fn delete(db: &DbPool, id: &str) -> Result<(), AppError> {
        sqlx::query("DELETE FROM trip_costs WHERE id = ?")
            .bind(id)
            .execute(db)
            .await?;
        Ok(())
    }
}
