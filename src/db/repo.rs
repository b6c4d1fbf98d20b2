use async_trait::async_trait;

use super::model::*;

#[async_trait]
pub trait MovieRepo: Send + Sync {
    async fn get_movie(&self, movie_id: i64) -> DbResult<Movie>;
    async fn insert_movie(&self, serialized: &str) -> DbResult<Movie>;
}

#[async_trait]
pub trait MovieRatingRepo: Send + Sync {
    async fn get_movie_rating(&self, movie_id: i64) -> DbResult<MovieRating>;
    async fn insert_movie_rating(
        &self,
        movie_id: i64,
        average_rating: i64,
        total_ratings: i64,
    ) -> DbResult<MovieRating>;
    async fn update_movie_rating(
        &self,
        movie_id: i64,
        average_rating: i64,
        total_ratings: i64,
    ) -> DbResult<MovieRating>;
}

#[async_trait]
pub trait UserMovieRatingRepo: Send + Sync {
    async fn get_user_movie_rating(&self, user_id: i64, movie_id: i64) -> DbResult<UserMovieRating>;
    /// Insert-or-replace keyed on the (user, movie) pair.
    async fn save_user_movie_rating(
        &self,
        user_id: i64,
        movie_id: i64,
        rating: i64,
    ) -> DbResult<UserMovieRating>;
    async fn update_user_movie_rating(
        &self,
        user_id: i64,
        movie_id: i64,
        rating: i64,
    ) -> DbResult<UserMovieRating>;
}

pub trait Repository: MovieRepo + MovieRatingRepo + UserMovieRatingRepo + Send + Sync {}
