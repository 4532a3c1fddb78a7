#![warn(clippy::pedantic, clippy::all, clippy::nursery)]

use axum::http::HeaderValue;
use roster::{
    config::{RuntimeConfiguration, ServerConfig},
    error::{BindListenerSnafu, RosterResult, ServeSnafu},
    routes::build_router,
    state::RosterState,
};
use snafu::ResultExt;
use sqlx::{Pool, Postgres};
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[macro_use]
extern crate tracing;

async fn shutdown_signal(pool: Pool<Postgres>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    warn!("signal received, starting graceful shutdown");
    pool.close().await;
}

fn cors_layer(server_config: &ServerConfig) -> Option<CorsLayer> {
    let origins: Vec<HeaderValue> = server_config
        .cors_origins()
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(?origin, ?e, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    if origins.is_empty() {
        return None;
    }

    Some(
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any),
    )
}

async fn run(config: RuntimeConfiguration) -> RosterResult<()> {
    let (state, pool) = RosterState::connect(&config.db_config()).await?;
    let server_config = config.server_config();

    let mut app = build_router(state)
        .layer(RequestBodyLimitLayer::new(server_config.body_limit()))
        .layer(CompressionLayer::new());
    if let Some(cors) = cors_layer(&server_config) {
        app = app.layer(cors);
    }

    let server_ip = server_config.server_ip();
    let listener = TcpListener::bind(server_ip)
        .await
        .context(BindListenerSnafu { address: server_ip })?;

    info!(?server_ip, "Listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(pool))
        .await
        .context(ServeSnafu)
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing::subscriber::set_global_default(
        FmtSubscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .finish(),
    )
    .expect("unable to set tracing subscriber");

    info!("`tracing` online");

    let config = RuntimeConfiguration::new().expect("unable to create config");

    if let Err(e) = run(config).await {
        error!(?e, "Server exited with an error");
        std::process::exit(1);
    }
}
