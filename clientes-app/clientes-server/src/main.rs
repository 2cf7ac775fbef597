use axum::http::{header, HeaderValue, Method};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use clientes_api::{build_router, AppState};
use clientes_core::cache::CustomerCache;
use clientes_core::repositories::CustomerRepository;
use clientes_core::services::CustomerService;
use clientes_infrastructure::{
    create_pool, run_migrations, InMemoryCustomerRepository, MemoryCache, NoopCache, PgCustomerRepository,
};
use clientes_shared::config::{AppConfig, DatabaseBackend};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load()?;

    // Initialize telemetry; the guard flushes the file writer on drop
    let _log_guard = clientes_shared::telemetry::init_telemetry(&config.logging)?;

    info!("{} starting ({})...", config.app.name, config.app.env);

    // Storage
    let repo: Arc<dyn CustomerRepository> = match config.database.backend {
        DatabaseBackend::Postgres => {
            info!("Connecting to PostgreSQL...");
            let pool = create_pool(&config.database).await?;
            info!("Database connection established.");
            if config.database.run_migrations {
                run_migrations(&pool).await?;
            }
            Arc::new(PgCustomerRepository::new(pool))
        }
        DatabaseBackend::Memory => {
            warn!("Using in-memory storage; records are lost on restart");
            Arc::new(InMemoryCustomerRepository::new())
        }
    };

    // Read cache
    let cache: Arc<dyn CustomerCache> = if config.cache.enabled {
        let ttl = Duration::from_secs(config.cache.ttl_seconds);
        Arc::new(MemoryCache::with_ttl(Some(ttl)))
    } else {
        info!("Read cache disabled");
        Arc::new(NoopCache)
    };

    let customers = Arc::new(CustomerService::with_defaults(repo, cache));
    let state = AppState::new(customers, config.app.clone());

    let mut app = build_router(state);
    if let Some(origin) = &config.app.cors_origin {
        app = app.layer(
            CorsLayer::new()
                .allow_origin(origin.parse::<HeaderValue>()?)
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PUT,
                    Method::PATCH,
                    Method::DELETE,
                    Method::OPTIONS,
                ])
                .allow_headers([header::CONTENT_TYPE]),
        );
    }

    // Bind address
    let host: std::net::IpAddr = config.app.host.parse()?;
    let addr = SocketAddr::from((host, config.app.port));
    info!("Listening on {}", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown");
}
