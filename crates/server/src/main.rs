//! Formflow server entry point.

use std::path::PathBuf;
use std::sync::Arc;

use axum::{Router, middleware};
use formflow_api::{middleware::AppState, router as api_router};
use formflow_common::{Config, LocalStorage};
use formflow_core::{
    BlockService, FormService, InteractionService, SessionService, UserService,
};
use formflow_db::repositories::{
    FormBlockInteractionRepository, FormBlockRepository, FormRepository, FormSessionRepository,
    FormSessionResponseRepository, UserRepository,
};
use tokio::signal;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use url::Url;

/// Waits for a shutdown signal (SIGINT or SIGTERM).
///
/// On Unix systems, this listens for both SIGINT (Ctrl+C) and SIGTERM.
/// On Windows, this only listens for Ctrl+C.
async fn shutdown_signal() {
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
        () = ctrl_c => {
            info!("Received SIGINT, initiating graceful shutdown...");
        },
        () = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown...");
        },
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "formflow=debug,tower_http=debug".into()),
        )
        .init();

    info!("Starting formflow server...");

    // Load configuration
    let config = Config::load()?;
    let public_base = Url::parse(&config.server.url)?;

    // Connect to database
    let db = formflow_db::init(&config).await?;
    info!("Connected to database");

    // Run migrations
    info!("Running database migrations...");
    formflow_db::migrate(&db).await?;
    info!("Migrations completed");

    // Initialize repositories
    let db = Arc::new(db);
    let user_repo = UserRepository::new(Arc::clone(&db));
    let form_repo = FormRepository::new(Arc::clone(&db));
    let block_repo = FormBlockRepository::new(Arc::clone(&db));
    let interaction_repo = FormBlockInteractionRepository::new(Arc::clone(&db));
    let session_repo = FormSessionRepository::new(Arc::clone(&db));
    let response_repo = FormSessionResponseRepository::new(Arc::clone(&db));

    // Initialize storage
    let storage = Arc::new(LocalStorage::new(
        PathBuf::from(&config.storage.base_path),
        config.storage.public_prefix.clone(),
    ));

    // Initialize services
    let state = AppState {
        user_service: UserService::new(user_repo.clone()),
        form_service: FormService::new(
            form_repo,
            block_repo.clone(),
            response_repo.clone(),
            user_repo,
            storage,
            public_base,
        ),
        block_service: BlockService::new(block_repo.clone(), interaction_repo.clone()),
        interaction_service: InteractionService::new(interaction_repo.clone()),
        session_service: SessionService::new(
            session_repo,
            response_repo,
            block_repo,
            interaction_repo,
        ),
    };

    // Build router
    let app = Router::new()
        .nest("/api", api_router())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            formflow_api::middleware::auth_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state);

    // Start server with graceful shutdown
    let addr = format!("{}:{}", config.server.host, config.server.port);
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}
