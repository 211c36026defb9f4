//! User accounts and their public projection.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::{db::DbPool, error::AppError};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub profile_photo: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password_hash: String,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            email: email.into(),
            password_hash,
            profile_photo: None,
            created_at: Utc::now(),
        }
    }

    pub async fn insert(&self, db: &DbPool) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO users (id, name, email, password_hash, profile_photo, created_at)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&self.id)
        .bind(&self.name)
        .bind(&self.email)
        .bind(&self.password_hash)
        .bind(&self.profile_photo)
        .bind(self.created_at)
        .execute(db)
        .await?;
        Ok(())
    }

    pub async fn find_by_id(db: &DbPool, id: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(db)
            .await?;
        Ok(user)
    }

    pub async fn find_by_email(db: &DbPool, email: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = ?")
            .bind(email)
            .fetch_optional(db)
            .await?;
        Ok(user)
    }

    /// Merges only the provided fields; absent fields stay untouched.
    pub async fn update_profile(
        db: &DbPool,
        id: &str,
        patch: &ProfileUpdate,
    ) -> Result<(), AppError> {
        sqlx::query(
            "UPDATE users SET name = COALESCE(?, name),
                              profile_photo = COALESCE(?, profile_photo)
             WHERE id = ?",
        )
        .bind(&patch.name)
        .bind(&patch.profile_photo)
        .bind(id)
        .execute(db)
        .await?;
        Ok(())
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub profile_photo: Option<String>,
}

/// What the API returns for a user; never carries the password hash.
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub profile_photo: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            profile_photo: user.profile_photo,
            created_at: user.created_at,
        }
    }
}
