use axum::http::{header, HeaderValue, Method};
use sea_orm::DatabaseConnection;
use tower_http::cors::CorsLayer;
use tower_sessions::{cookie::SameSite, Expiry, SessionManagerLayer};
use tower_sessions_sqlx_store::SqliteStore;

use crate::server::{
    config::Config,
    error::{config::ConfigError, AppError},
    util::parse::IDEMPOTENCY_KEY_HEADER,
};

/// Connects to the Sqlite database and runs pending migrations.
///
/// Establishes a connection pool to the Sqlite database using the connection string from
/// configuration, then automatically runs all pending SeaORM migrations to ensure the database
/// schema is up-to-date.
///
/// # Arguments
/// - `config` - Application configuration containing the database URL
///
/// # Returns
/// - `Ok(DatabaseConnection)` - Connected database with migrations applied
/// - `Err(Error)` - Failed to connect to database or run migrations
pub async fn connect_to_database(config: &Config) -> Result<DatabaseConnection, AppError> {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}

/// Creates the session store on the application database.
///
/// Sessions share the SeaORM connection pool. Expired rows are removed by the
/// maintenance scheduler.
///
/// # Returns
/// - `Ok(SqliteStore)` - Store with its table created
/// - `Err(SqlxErr)` - Failed to create the session table
pub async fn connect_to_session_store(db: &DatabaseConnection) -> Result<SqliteStore, AppError> {
    let pool = db.get_sqlite_connection_pool();
    let session_store = SqliteStore::new(pool.clone());
    session_store.migrate().await?;

    Ok(session_store)
}

/// Wraps the store in a session layer with a 7-day inactivity expiry.
pub fn session_layer(store: SqliteStore, config: &Config) -> SessionManagerLayer<SqliteStore> {
    SessionManagerLayer::new(store)
        .with_secure(config.session_secure)
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(time::Duration::days(7)))
}

/// Builds the CORS layer allowing the configured frontend origin with credentials.
///
/// # Returns
/// - `Ok(CorsLayer)` - Layer for the frontend origin
/// - `Err(ConfigErr)` - `FRONTEND_URL` is not a valid header value
pub fn build_cors(config: &Config) -> Result<CorsLayer, AppError> {
    let origin = HeaderValue::from_str(&config.frontend_url).map_err(|_| {
        ConfigError::InvalidEnvVar {
            name: "FRONTEND_URL".to_string(),
            value: config.frontend_url.clone(),
        }
    })?;

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([
            header::CONTENT_TYPE,
            header::ACCEPT,
            header::HeaderName::from_static(IDEMPOTENCY_KEY_HEADER),
        ]))
}
