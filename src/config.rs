use std::{env, net::SocketAddr};

use crate::error::AppError;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub listen_addr: SocketAddr,
    pub jwt_secret: String,
    pub cors_origins: Vec<String>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://waypoint.db".to_string());
        let listen_addr: SocketAddr = env::var("APP_LISTEN_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:3000".to_string())
            .parse()
            .map_err(|err| AppError::Config(format!("invalid APP_LISTEN_ADDR: {err}")))?;

        let jwt_secret = env::var("JWT_SECRET")
            .unwrap_or_else(|_| "change-me-super-secret-waypoint-key".to_string());

        let cors_origins: Vec<String> = env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();

        Ok(Self {
            database_url,
            listen_addr,
            jwt_secret,
            cors_origins,
        })
    }
}
