use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::auth::{self, CurrentUser};
use crate::error::AppError;
use crate::models::user::UserResponse;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/auth/signup", post(signup))
        .route("/auth/login", post(login))
        .route("/auth/me", get(me))
}

#[derive(Debug, Deserialize)]
struct SignupPayload {
    name: String,
    email: String,
    password: String,
}

#[derive(Debug, Deserialize)]
struct LoginPayload {
    email: String,
    password: String,
}

#[derive(Debug, Serialize)]
struct AuthResponse {
    token: String,
    user: UserResponse,
}

async fn signup(
    State(state): State<AppState>,
    Json(payload): Json<SignupPayload>,
) -> Result<Json<AuthResponse>, AppError> {
    let user =
        auth::register_user(&state, &payload.name, &payload.email, &payload.password).await?;
    let token = auth::issue_token(&state.config.jwt_secret, &user.id)?;
    Ok(Json(AuthResponse {
        token,
        user: user.into(),
    }))
}

async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginPayload>,
) -> Result<Json<AuthResponse>, AppError> {
    let user = auth::authenticate_user(&state, &payload.email, &payload.password).await?;
    let token = auth::issue_token(&state.config.jwt_secret, &user.id)?;
    Ok(Json(AuthResponse {
        token,
        user: user.into(),
    }))
}

async fn me(CurrentUser(user): CurrentUser) -> Json<UserResponse> {
    Json(user.into())
}
