use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use vowreel_api::config::{ServerConfig, StorageBackend};
use vowreel_api::router::build_app_router;
use vowreel_api::state::AppState;
use vowreel_events::{RevalidationBus, RevalidationWebhook, Revalidator};
use vowreel_storage::{AssetUploader, InMemoryObjectStore, ObjectStore, S3ObjectStore};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    init_tracing();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Database ---
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let max_connections = std::env::var("DB_MAX_CONNECTIONS")
        .ok()
        .map(|v| v.parse().expect("DB_MAX_CONNECTIONS must be a valid u32"))
        .unwrap_or(vowreel_db::DEFAULT_MAX_CONNECTIONS);

    let pool = vowreel_db::create_pool(&database_url, max_connections)
        .await
        .expect("Failed to connect to database");
    tracing::info!(max_connections, "Database connection pool created");

    vowreel_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database health check passed");

    vowreel_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    // --- Object storage ---
    let store: Arc<dyn ObjectStore> = match &config.storage {
        StorageBackend::S3(s3) => {
            let store = S3ObjectStore::connect(s3).await;
            tracing::info!(backend = config.storage.label(), bucket = %s3.bucket, region = %s3.region, "Object store configured");
            Arc::new(store)
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory object store, uploads are lost on restart");
            Arc::new(InMemoryObjectStore::new())
        }
    };
    let uploader = Arc::new(AssetUploader::new(
        store,
        config.public_base_url.clone(),
        config.max_upload_bytes,
    ));

    // --- Revalidation bus ---
    let revalidation = Arc::new(RevalidationBus::default());
    let webhook = config.revalidate_webhook_url.as_ref().and_then(|url| {
        match RevalidationWebhook::new(url.clone(), config.revalidate_secret.clone()) {
            Ok(webhook) => Some(webhook),
            Err(e) => {
                tracing::warn!(error = %e, url = %url, "Revalidation webhook disabled");
                None
            }
        }
    });
    if webhook.is_none() {
        tracing::info!("No revalidation webhook, signals will be logged and dropped");
    }
    let revalidator_handle = tokio::spawn(Revalidator::run(revalidation.subscribe(), webhook));
    tracing::info!("Revalidator started");

    // --- App state ---
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        uploader,
        revalidation: Arc::clone(&revalidation),
    };

    // --- Router ---
    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, cleaning up");

    // Dropping the last sender closes the channel and stops the revalidator
    // once it has drained pending signals.
    drop(revalidation);
    let _ = tokio::time::timeout(Duration::from_secs(5), revalidator_handle).await;
    tracing::info!("Revalidator shut down");

    tracing::info!("Graceful shutdown complete");
}

/// Install the global subscriber. `LOG_FORMAT=json` switches to JSON lines.
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "vowreel_api=debug,vowreel_events=debug,tower_http=debug".into());

    let json = std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
