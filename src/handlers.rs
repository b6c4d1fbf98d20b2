use axum::{
    body::Bytes,
    extract::{Path, State},
    Json,
};
use serde_json::Value;

use crate::db::{MovieRatingRepo, MovieRepo, UserMovieRatingRepo};
use crate::error::ApiError;
use crate::jsonapi::{self, Document, Field, Schema, Source};
use crate::server::AppState;

const MOVIERATINGS: Schema = Schema {
    resource_type: "movieratings",
    fields: &[
        Field {
            name: "movie_id",
            source: Source::Relationship {
                rel: "movies",
                resource_type: "movies",
            },
        },
        Field {
            name: "average_rating",
            source: Source::Attribute,
        },
        Field {
            name: "total_ratings",
            source: Source::Attribute,
        },
    ],
};

const USERMOVIERATINGS: Schema = Schema {
    resource_type: "usermovieratings",
    fields: &[
        Field {
            name: "user_id",
            source: Source::Relationship {
                rel: "users",
                resource_type: "users",
            },
        },
        Field {
            name: "movie_id",
            source: Source::Relationship {
                rel: "movies",
                resource_type: "movies",
            },
        },
        Field {
            name: "rating",
            source: Source::Attribute,
        },
    ],
};

fn parse_document(body: &Bytes) -> Result<Document, ApiError> {
    serde_json::from_slice(body).map_err(|_| ApiError::bad_request())
}

// Path parameters are matched as strings and coerced like the original
// service did: anything that is not an integer becomes 0, which no row
// ever has, so the lookup reports NotFound for the literal key.
fn path_id(raw: &str) -> i64 {
    raw.parse().unwrap_or(0)
}

pub async fn get_movie(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let movie = state.db.get_movie(path_id(&id)).await?;
    Ok(Json(jsonapi::movie_document(&movie)))
}

pub async fn get_movie_rating(
    State(state): State<AppState>,
    Path(movie_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let rating = state.db.get_movie_rating(path_id(&movie_id)).await?;
    Ok(Json(jsonapi::movie_rating_document(&rating)))
}

pub async fn post_movie_rating(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Value>, ApiError> {
    let doc = parse_document(&body)?;
    let fields = jsonapi::validate(&MOVIERATINGS, &doc, &[])?;

    let rating = state
        .db
        .insert_movie_rating(
            fields["movie_id"],
            fields["average_rating"],
            fields["total_ratings"],
        )
        .await?;

    Ok(Json(jsonapi::movie_rating_document(&rating)))
}

pub async fn patch_movie_rating(
    State(state): State<AppState>,
    Path(movie_id): Path<String>,
    body: Bytes,
) -> Result<Json<Value>, ApiError> {
    let doc = parse_document(&body)?;
    let fields = jsonapi::validate(&MOVIERATINGS, &doc, &[("movies", movie_id.as_str())])?;

    let rating = state
        .db
        .update_movie_rating(
            fields["movie_id"],
            fields["average_rating"],
            fields["total_ratings"],
        )
        .await?;

    Ok(Json(jsonapi::movie_rating_document(&rating)))
}

pub async fn post_user_movie_rating(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Value>, ApiError> {
    let doc = parse_document(&body)?;
    let fields = jsonapi::validate(&USERMOVIERATINGS, &doc, &[])?;

    // This endpoint replaces an existing (user, movie) rating instead of
    // reporting a conflict; POST /movieratings does the opposite.
    let rating = state
        .db
        .save_user_movie_rating(fields["user_id"], fields["movie_id"], fields["rating"])
        .await?;

    Ok(Json(jsonapi::user_movie_rating_document(&rating)))
}

pub async fn get_user_movie_rating(
    State(state): State<AppState>,
    Path((user_id, movie_id)): Path<(String, String)>,
) -> Result<Json<Value>, ApiError> {
    let rating = state
        .db
        .get_user_movie_rating(path_id(&user_id), path_id(&movie_id))
        .await?;

    Ok(Json(jsonapi::user_movie_rating_document(&rating)))
}

pub async fn patch_user_movie_rating(
    State(state): State<AppState>,
    Path((user_id, movie_id)): Path<(String, String)>,
    body: Bytes,
) -> Result<Json<Value>, ApiError> {
    let doc = parse_document(&body)?;
    let fields = jsonapi::validate(
        &USERMOVIERATINGS,
        &doc,
        &[("users", user_id.as_str()), ("movies", movie_id.as_str())],
    )?;

    let rating = state
        .db
        .update_user_movie_rating(fields["user_id"], fields["movie_id"], fields["rating"])
        .await?;

    Ok(Json(jsonapi::user_movie_rating_document(&rating)))
}
