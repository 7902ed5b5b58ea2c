/// Application state and router builder
///
/// This module defines the shared application state and provides
/// a function to build the Axum router with all routes and middleware.
///
/// # Example
///
/// ```no_run
/// use exercise_tracker_api::{app::{connect_store, build_router, AppState}, config::Config};
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let (store, _pool) = connect_store(&config).await?;
/// let state = AppState::new(store, config);
/// let app = build_router(state);
/// # Ok(())
/// # }
/// ```

use crate::config::{Config, StoreBackend};
use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, get_service, post},
    Router,
};
use exercise_tracker_shared::{
    db::{
        migrations::{ensure_database_exists, run_migrations},
        pool::{create_pool, DatabaseConfig},
    },
    store::{memory::MemoryStore, postgres::PgStore, RecordStore},
};
use sqlx::PgPool;
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::{info, Level};

/// Shared application state
///
/// This is cloned for each request handler via Axum's `State` extractor.
/// Uses Arc internally for cheap cloning.
#[derive(Clone)]
pub struct AppState {
    /// Record store shared by all handlers
    pub store: Arc<dyn RecordStore>,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates new application state
    pub fn new(store: Arc<dyn RecordStore>, config: Config) -> Self {
        Self {
            store,
            config: Arc::new(config),
        }
    }

    /// Creates state backed by a fresh in-memory store
    pub fn in_memory(config: Config) -> Self {
        Self::new(Arc::new(MemoryStore::new()), config)
    }
}

/// Opens the record store selected by `config`
///
/// For the `postgres` backend this creates the database if needed, builds the
/// pool and applies migrations. The pool is returned alongside the store so
/// the caller can close it on shutdown.
///
/// # Errors
///
/// Returns an error if the database cannot be reached or migrated.
pub async fn connect_store(
    config: &Config,
) -> anyhow::Result<(Arc<dyn RecordStore>, Option<PgPool>)> {
    match (config.store.backend, &config.store.database) {
        (StoreBackend::Memory, _) => {
            info!("Using in-memory record store");
            Ok((Arc::new(MemoryStore::new()), None))
        }
        (StoreBackend::Postgres, Some(database)) => {
            ensure_database_exists(&database.url).await?;

            let pool = create_pool(DatabaseConfig {
                url: database.url.clone(),
                max_connections: database.max_connections,
                min_connections: database.min_connections,
                acquire_timeout_seconds: database.acquire_timeout_seconds,
                idle_timeout_seconds: database.idle_timeout_seconds,
            })
            .await?;
            run_migrations(&pool).await?;

            info!("Using PostgreSQL record store");
            Ok((Arc::new(PgStore::new(pool.clone())), Some(pool)))
        }
        (StoreBackend::Postgres, None) => {
            anyhow::bail!("postgres backend selected without database configuration")
        }
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Architecture
///
/// ```text
/// /
/// ├── GET  /                          # Landing page (static)
/// ├── /api/
/// │   ├── POST /users                 # Create user
/// │   ├── GET  /users                 # List users
/// │   ├── POST /users/:_id/exercises  # Append exercise
/// │   └── GET  /users/:_id/logs       # Exercise log
/// └── *                               # Files from the public directory
/// ```
///
/// # Middleware Stack
///
/// Applied in order (bottom to top):
/// 1. Logging (tower-http TraceLayer)
/// 2. CORS (tower-http CorsLayer)
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    let api_routes = Router::new()
        .route(
            "/users",
            post(routes::users::create_user).get(routes::users::list_users),
        )
        .route(
            "/users/:_id/exercises",
            post(routes::exercises::add_exercise),
        )
        .route("/users/:_id/logs", get(routes::exercises::get_log));

    let static_files = &state.config.static_files;
    let index_page = get_service(ServeFile::new(&static_files.index_page));
    let public_dir = ServeDir::new(&static_files.public_dir);

    Router::new()
        .route("/", index_page)
        .nest("/api", api_routes)
        .fallback_service(public_dir)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors_layer(&state.config.api.cors_origins))
        .with_state(state)
}

/// Configures CORS from the allowed origin list
fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|origin| origin == "*") {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
        .max_age(std::time::Duration::from_secs(3600))
}
