use tokio::net::TcpListener;
use tracing::{error, info};
use waypoint::config::AppConfig;
use waypoint::db::init_pool;
use waypoint::error::AppError;
use waypoint::routes::create_router;
use waypoint::seed::seed_reference_data;
use waypoint::state::AppState;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_logging();

    let config = AppConfig::from_env()?;
    let db = init_pool(&config.database_url).await?;

    if let Err(err) = sqlx::migrate!("./migrations").run(&db).await {
        error!("migration failed: {err:?}");
        return Err(AppError::Other(err.into()));
    }

    seed_reference_data(&db).await?;

    let state = AppState::new(config.clone(), db);
    let app = create_router(state);

    let listener = TcpListener::bind(config.listen_addr).await?;
    info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}

fn init_logging() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let fmt_layer = tracing_subscriber::fmt::layer().with_target(false);
    let filter_layer = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,waypoint=debug".into());

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();
}
