use http::{HeaderValue, Method, header};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use textile_search::{
    config::{CatalogBackend, Config},
    domain::textile::repository::CatalogStore,
    infrastructure::{
        database::pool::create_pool,
        repositories::{
            memory_catalog_store::InMemoryCatalogStore, sqlx_catalog_store::PgCatalogStore,
        },
    },
    presentation::http::{routes::create_router, state::AppState},
};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Uses RUST_LOG if set, otherwise sensible defaults
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| {
            tracing_subscriber::EnvFilter::try_new("info,textile_search=debug,tower_http=debug")
        })
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let config = Config::from_env()?;
    let catalog = build_catalog(&config).await?;
    let state = AppState::new(catalog, config.clone());

    let app = create_router(state)
        .layer(cors_layer(&config))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::REFERRER_POLICY,
            HeaderValue::from_static("strict-origin-when-cross-origin"),
        ));

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Textile search listening on {}", addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

/// Creates the catalog store selected by configuration. The returned handle
/// owns the connection pool for the life of the process.
async fn build_catalog(config: &Config) -> anyhow::Result<Arc<dyn CatalogStore>> {
    match config.catalog_backend {
        CatalogBackend::Postgres => {
            let database_url = config
                .database_url
                .as_deref()
                .ok_or_else(|| anyhow::anyhow!("DATABASE_URL is required for the postgres backend"))?;
            let db = create_pool(
                database_url,
                config.database_max_connections,
                Duration::from_secs(config.database_acquire_timeout_seconds),
            )
            .await?;

            if config.run_migrations {
                let mut migrator = sqlx::migrate!("./migrations");
                migrator.set_ignore_missing(config.ignore_missing_migrations);
                migrator.run(&db).await?;
            }

            Ok(Arc::new(PgCatalogStore::new(db)))
        }
        CatalogBackend::Memory => {
            let store = match config.catalog_seed_path.as_deref() {
                Some(path) => InMemoryCatalogStore::from_json_file(Path::new(path))?,
                None => {
                    tracing::warn!("CATALOG_SEED_PATH not set, starting with an empty catalog");
                    InMemoryCatalogStore::new(Vec::new())
                }
            };
            Ok(Arc::new(store))
        }
    }
}

fn cors_layer(config: &Config) -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .max_age(Duration::from_secs(3600));

    if cfg!(debug_assertions) {
        base.allow_origin(tower_http::cors::Any)
    } else {
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|origin| match HeaderValue::from_str(origin) {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!("Ignoring invalid CORS origin {}", origin);
                    None
                }
            })
            .collect();
        base.allow_origin(AllowOrigin::list(origins))
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {}", e);
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
                tracing::error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Ctrl+C received, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("SIGTERM received, initiating graceful shutdown");
        }
    }
}
