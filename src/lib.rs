pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod jsonapi;
pub mod middleware;
pub mod server;

use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Database error: {0}")]
    Database(#[from] db::DbError),
    #[error("Server error: {0}")]
    Server(String),
}

pub async fn run(config_path: &str) -> Result<(), ServerError> {
    let config = config::Config::from_file(config_path)?;

    info!("Using config file: {}", config_path);

    let db_path = config
        .get_database_path()
        .ok_or_else(|| ServerError::Server("No database path configured".to_string()))?;

    info!("Opening database at {}", db_path);
    let db = Arc::new(db::SqliteRepository::new(&db_path).await?);

    let address = config.listen.address.as_deref().unwrap_or("[::]");
    let port = &config.listen.port;
    let addr: SocketAddr = format!("{}:{}", address, port)
        .parse()
        .map_err(|e| ServerError::Server(format!("Invalid address: {}", e)))?;

    let has_tls = config.listen.tlscert.is_some() && config.listen.tlskey.is_some();

    let state = server::AppState::new(config.clone(), db);
    let app = server::build_router(state);

    if has_tls {
        let cert_path = config.listen.tlscert.as_deref().unwrap_or_default();
        let key_path = config.listen.tlskey.as_deref().unwrap_or_default();

        info!("Loading TLS certificate from {}", cert_path);
        info!("Loading TLS key from {}", key_path);

        let tls_config = axum_server::tls_rustls::RustlsConfig::from_pem_file(cert_path, key_path)
            .await
            .map_err(|e| ServerError::Server(format!("Failed to load TLS config: {}", e)))?;

        info!("Serving HTTPS on {}", addr);

        axum_server::bind_rustls(addr, tls_config)
            .serve(app.into_make_service())
            .await
            .map_err(|e| ServerError::Server(format!("Server error: {}", e)))?;
    } else {
        info!("Serving HTTP on {}", addr);

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| ServerError::Server(format!("Failed to bind: {}", e)))?;

        axum::serve(listener, app)
            .await
            .map_err(|e| ServerError::Server(format!("Server error: {}", e)))?;
    }

    Ok(())
}

/// Loads the demo fixtures: three movies, one aggregate rating and three
/// per-user ratings. Matches the dataset the original importer staged.
pub async fn stage(config_path: &str) -> Result<(), ServerError> {
    use db::{MovieRatingRepo, MovieRepo, UserMovieRatingRepo};

    let config = config::Config::from_file(config_path)?;

    let db_path = config
        .get_database_path()
        .ok_or_else(|| ServerError::Server("No database path configured".to_string()))?;

    let db = db::SqliteRepository::new(&db_path).await?;

    for name in ["Jaws", "The Ten Commandments", "Titanic"] {
        let movie = db
            .insert_movie(&serde_json::json!({"name": name}).to_string())
            .await?;
        info!("Staged movie {}: {}", movie.movie_id, name);
    }

    db.insert_movie_rating(1, 4, 3).await?;
    db.save_user_movie_rating(1, 1, 10).await?;
    db.save_user_movie_rating(2, 1, 1).await?;
    db.save_user_movie_rating(3, 1, 1).await?;

    info!("Staged demo ratings into {}", db_path);

    Ok(())
}
