use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};

use crate::auth::CurrentUser;
use crate::error::AppError;
use crate::models::user::{ProfileUpdate, User, UserResponse};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/users/profile", get(get_profile).put(update_profile))
}

async fn get_profile(CurrentUser(user): CurrentUser) -> Json<UserResponse> {
    Json(user.into())
}

async fn update_profile(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(patch): Json<ProfileUpdate>,
) -> Result<Json<UserResponse>, AppError> {
    User::update_profile(&state.db, &user.id, &patch).await?;
    let updated = User::find_by_id(&state.db, &user.id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".into()))?;
    Ok(Json(updated.into()))
}
