use std::str::FromStr;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::info;

use super::model::*;
use super::repo::*;

pub struct SqliteRepository {
    pool: SqlitePool,
}

impl SqliteRepository {
    pub async fn new(db_path: &str) -> DbResult<Self> {
        let options = SqliteConnectOptions::from_str(db_path)?.create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        let repo = Self { pool };

        repo.init_schema().await?;

        info!("Database initialized at {}", db_path);

        Ok(repo)
    }

    async fn init_schema(&self) -> DbResult<()> {
        let schema = include_str!("schema.sql");
        sqlx::query(schema).execute(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl MovieRepo for SqliteRepository {
    async fn get_movie(&self, movie_id: i64) -> DbResult<Movie> {
        sqlx::query_as::<_, Movie>("SELECT movie_id, serialized FROM moviedata WHERE movie_id = ?")
            .bind(movie_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| match e {
                sqlx::Error::RowNotFound => {
                    DbError::NotFound(format!("No Movie for ID {}", movie_id))
                }
                _ => DbError::Sqlx(e),
            })
    }

    async fn insert_movie(&self, serialized: &str) -> DbResult<Movie> {
        let result = sqlx::query("INSERT INTO moviedata (serialized) VALUES (?)")
            .bind(serialized)
            .execute(&self.pool)
            .await?;

        self.get_movie(result.last_insert_rowid()).await
    }
}

#[async_trait]
impl MovieRatingRepo for SqliteRepository {
    async fn get_movie_rating(&self, movie_id: i64) -> DbResult<MovieRating> {
        sqlx::query_as::<_, MovieRating>(
            "SELECT movie_id, average_rating, total_ratings FROM movieratings WHERE movie_id = ?",
        )
        .bind(movie_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => {
                DbError::NotFound(format!("No MovieRating for Movie ID {}", movie_id))
            }
            _ => DbError::Sqlx(e),
        })
    }

    async fn insert_movie_rating(
        &self,
        movie_id: i64,
        average_rating: i64,
        total_ratings: i64,
    ) -> DbResult<MovieRating> {
        // The UNIQUE constraint is the conflict check; a lookup beforehand
        // would race with concurrent inserts.
        sqlx::query(
            "INSERT INTO movieratings (movie_id, average_rating, total_ratings) VALUES (?, ?, ?)",
        )
        .bind(movie_id)
        .bind(average_rating)
        .bind(total_ratings)
        .execute(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db) if db.is_unique_violation() => DbError::AlreadyExists(
                format!("MovieRating already exists for Movie ID {}", movie_id),
            ),
            other => DbError::Sqlx(other),
        })?;

        self.get_movie_rating(movie_id).await
    }

    async fn update_movie_rating(
        &self,
        movie_id: i64,
        average_rating: i64,
        total_ratings: i64,
    ) -> DbResult<MovieRating> {
        // An UPDATE that changes nothing reports zero rows, so existence
        // is established with a read first.
        self.get_movie_rating(movie_id).await?;

        sqlx::query("UPDATE movieratings SET average_rating = ?, total_ratings = ? WHERE movie_id = ?")
            .bind(average_rating)
            .bind(total_ratings)
            .bind(movie_id)
            .execute(&self.pool)
            .await?;

        self.get_movie_rating(movie_id).await
    }
}

#[async_trait]
impl UserMovieRatingRepo for SqliteRepository {
    async fn get_user_movie_rating(&self, user_id: i64, movie_id: i64) -> DbResult<UserMovieRating> {
        sqlx::query_as::<_, UserMovieRating>(
            "SELECT id, user_id, movie_id, rating FROM usermovieratings WHERE user_id = ? AND movie_id = ?",
        )
        .bind(user_id)
        .bind(movie_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => {
                // Historical message shape: only the movie id is named.
                DbError::NotFound(format!("No UserMovieRating for Movie ID {}", movie_id))
            }
            _ => DbError::Sqlx(e),
        })
    }

    async fn save_user_movie_rating(
        &self,
        user_id: i64,
        movie_id: i64,
        rating: i64,
    ) -> DbResult<UserMovieRating> {
        sqlx::query(
            "INSERT OR REPLACE INTO usermovieratings (user_id, movie_id, rating) VALUES (?, ?, ?)",
        )
        .bind(user_id)
        .bind(movie_id)
        .bind(rating)
        .execute(&self.pool)
        .await?;

        self.get_user_movie_rating(user_id, movie_id).await
    }

    async fn update_user_movie_rating(
        &self,
        user_id: i64,
        movie_id: i64,
        rating: i64,
    ) -> DbResult<UserMovieRating> {
        self.get_user_movie_rating(user_id, movie_id).await?;

        sqlx::query("UPDATE usermovieratings SET rating = ? WHERE user_id = ? AND movie_id = ?")
            .bind(rating)
            .bind(user_id)
            .bind(movie_id)
            .execute(&self.pool)
            .await?;

        self.get_user_movie_rating(user_id, movie_id).await
    }
}

impl Repository for SqliteRepository {}
