use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::db::SqliteRepository;
use crate::error::ApiError;
use crate::handlers;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub db: Arc<SqliteRepository>,
}

impl AppState {
    pub fn new(config: Config, db: Arc<SqliteRepository>) -> Self {
        Self {
            config: Arc::new(config),
            db,
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/movies/:id", get(handlers::get_movie))
        .route("/movieratings", post(handlers::post_movie_rating))
        .route(
            "/movieratings/:movie_id",
            get(handlers::get_movie_rating).patch(handlers::patch_movie_rating),
        )
        .route("/usermovieratings", post(handlers::post_user_movie_rating))
        .route(
            "/usermovieratings/:user_id/movies/:movie_id",
            get(handlers::get_user_movie_rating).patch(handlers::patch_user_movie_rating),
        )
        .fallback(fallback_handler)
        .layer(middleware::from_fn(crate::middleware::method_not_allowed))
        .layer(middleware::from_fn(crate::middleware::log_request))
        .layer(middleware::from_fn(crate::middleware::require_jsonapi))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn fallback_handler() -> ApiError {
    ApiError::NotFound("Not Found".to_string())
}
