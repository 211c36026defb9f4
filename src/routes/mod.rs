pub mod auth;
pub mod catalog;
pub mod costs;
pub mod profile;
pub mod stops;
pub mod trip_activities;
pub mod trips;

use axum::http::HeaderValue;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::{config::AppConfig, state::AppState};

pub fn create_router(state: AppState) -> Router {
    let api = Router::new()
        .merge(auth::router())
        .merge(trips::router())
        .merge(stops::router())
        .merge(trip_activities::router())
        .merge(costs::router())
        .merge(catalog::router())
        .merge(profile::router());

    Router::new()
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&state.config))
        .with_state(state)
}

fn cors_layer(config: &AppConfig) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if config.cors_origins.iter().any(|origin| origin == "*") {
        layer.allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> = config
            .cors_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();
        layer.allow_origin(origins)
    }
}
