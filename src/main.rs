use intern_portal::{
    AppState, InMemorySessionStore, SessionStoreState, StaticCredentials,
    auth::CredentialState,
    config::{AppConfig, Env},
    create_router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// main
///
/// Entry point: configuration, logging, the session store and the HTTP server.
#[tokio::main]
async fn main() {
    // 1. Configuration & Environment Loading (Fail-Fast)
    dotenv::dotenv().ok();
    let config = AppConfig::load();

    // 2. Logging Filter Setup
    // RUST_LOG wins; otherwise verbose for this crate and the HTTP stack.
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "intern_portal=debug,tower_http=info,axum=trace".into());

    // 3. Initialize Logging based on Environment
    match config.env {
        Env::Local => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
        Env::Production => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
    }

    tracing::info!("Application starting in {:?} mode", config.env);

    // 4. Session store and credential check
    let sessions =
        Arc::new(InMemorySessionStore::new(config.session_idle_timeout)) as SessionStoreState;
    let credentials = Arc::new(StaticCredentials) as CredentialState;
    tracing::info!(
        idle_minutes = config.session_idle_timeout.as_secs() / 60,
        cookie = %config.session_cookie,
        "in-memory session store ready"
    );

    let bind_addr = config.bind_addr.clone();
    let app_state = AppState {
        sessions,
        credentials,
        config,
    };

    // 5. Router and Server Startup
    let app = create_router(app_state);

    let listener = match TcpListener::bind(&bind_addr).await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!(error = %err, addr = %bind_addr, "FATAL: failed to bind HTTP listener");
            std::process::exit(1);
        }
    };

    tracing::info!("Listening on {bind_addr}");
    tracing::info!("API Documentation (Swagger UI) available at: http://{bind_addr}/swagger-ui");

    if let Err(err) = axum::serve(listener, app).await {
        tracing::error!(error = %err, "HTTP server terminated");
        std::process::exit(1);
    }
}
