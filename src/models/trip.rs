use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{DateTime, Utc};
use rand::rngs::OsRng;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::{db::DbPool, error::AppError};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Trip {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub description: Option<String>,
    pub start_date: String,
    pub end_date: String,
    pub cover_photo: Option<String>,
    pub is_public: bool,
    pub share_token: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct TripCreate {
    pub name: String,
    pub description: Option<String>,
    pub start_date: String,
    pub end_date: String,
    pub cover_photo: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct TripUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub cover_photo: Option<String>,
    pub is_public: Option<bool>,
}

impl Trip {
    pub fn new(user_id: impl Into<String>, payload: TripCreate) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.into(),
            name: payload.name,
            description: payload.description,
            start_date: payload.start_date,
            end_date: payload.end_date,
            cover_photo: payload.cover_photo,
            is_public: false,
            share_token: generate_share_token(),
            created_at: Utc::now(),
        }
    }

    pub async fn insert(&self, db: &DbPool) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO trips (id, user_id, name, description, start_date, end_date,
                                cover_photo, is_public, share_token, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&self.id)
        .bind(&self.user_id)
        .bind(&self.name)
        .bind(&self.description)
        .bind(&self.start_date)
        .bind(&self.end_date)
        .bind(&self.cover_photo)
        .bind(self.is_public)
        .bind(&self.share_token)
        .bind(self.created_at)
        .execute(db)
        .await?;
        Ok(())
    }

    pub async fn list_for_user(db: &DbPool, user_id: &str) -> Result<Vec<Trip>, AppError> {
        let trips = sqlx::query_as::<_, Trip>("SELECT * FROM trips WHERE user_id = ?")
            .bind(user_id)
            .fetch_all(db)
            .await?;
        Ok(trips)
    }

    /// Merges only the provided fields. `share_token` and `user_id` are
    /// immutable and never part of the patch.
    pub async fn update(
        db: &DbPool,
        trip_id: &str,
        patch: &TripUpdate,
    ) -> Result<(), AppError> {
        sqlx::query(
            "UPDATE trips SET name = COALESCE(?, name),
                              description = COALESCE(?, description),
                              start_date = COALESCE(?, start_date),
                              end_date = COALESCE(?, end_date),
                              cover_photo = COALESCE(?, cover_photo),
                              is_public = COALESCE(?, is_public)
             WHERE id = ?",
        )
        .bind(&patch.name)
        .bind(&patch.description)
        .bind(&patch.start_date)
        .bind(&patch.end_date)
        .bind(&patch.cover_photo)
        .bind(patch.is_public)
        .bind(trip_id)
        .execute(db)
        .await?;
        Ok(())
    }

    /// Resolves a share token. A private trip with a known token is
    /// indistinguishable from a nonexistent one.
    pub async fn find_shared(db: &DbPool, share_token: &str) -> Result<Option<Trip>, AppError> {
        let trip = sqlx::query_as::<_, Trip>(
            "SELECT * FROM trips WHERE share_token = ? AND is_public = 1",
        )
        .bind(share_token)
        .fetch_optional(db)
        .await?;
        Ok(trip)
    }
}

// Share tokens grant unauthenticated access, so they carry more entropy
// than entity ids.
fn generate_share_token() -> String {
    let mut bytes = [0u8; 32];
    OsRng.fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}
