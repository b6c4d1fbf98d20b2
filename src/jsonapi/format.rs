use serde_json::{json, Map, Value};

use crate::db::{Movie, MovieRating, UserMovieRating};

/// Builds the canonical single-resource response document,
/// `{"data":[{type, id, attributes, relationships}]}`.
///
/// Every id and numeric attribute is rendered as a JSON string. The original
/// service's database driver returned all columns as strings and its clients
/// expect that, so the string typing is kept as a contract.
pub struct ResourceDocument {
    resource_type: &'static str,
    id: String,
    attributes: Value,
    relationships: Map<String, Value>,
}

impl ResourceDocument {
    pub fn new(resource_type: &'static str, id: i64) -> Self {
        Self {
            resource_type,
            id: id.to_string(),
            attributes: Value::Object(Map::new()),
            relationships: Map::new(),
        }
    }

    pub fn attr(mut self, name: &str, value: i64) -> Self {
        if let Value::Object(attributes) = &mut self.attributes {
            attributes.insert(name.to_string(), Value::String(value.to_string()));
        }
        self
    }

    /// Replaces the attributes wholesale with an arbitrary JSON object.
    pub fn attrs(mut self, attributes: Value) -> Self {
        self.attributes = attributes;
        self
    }

    pub fn rel(mut self, name: &str, resource_type: &str, id: i64) -> Self {
        self.relationships.insert(
            name.to_string(),
            json!({"data": {"type": resource_type, "id": id.to_string()}}),
        );
        self
    }

    pub fn into_value(self) -> Value {
        let mut resource = Map::new();
        resource.insert("type".to_string(), Value::String(self.resource_type.to_string()));
        resource.insert("id".to_string(), Value::String(self.id));
        resource.insert("attributes".to_string(), self.attributes);
        if !self.relationships.is_empty() {
            resource.insert("relationships".to_string(), Value::Object(self.relationships));
        }
        json!({"data": [resource]})
    }
}

pub fn movie_document(movie: &Movie) -> Value {
    let attributes = serde_json::from_str(&movie.serialized).unwrap_or_else(|_| json!({}));
    ResourceDocument::new("movies", movie.movie_id)
        .attrs(attributes)
        .into_value()
}

pub fn movie_rating_document(rating: &MovieRating) -> Value {
    ResourceDocument::new("movieratings", rating.movie_id)
        .attr("average_rating", rating.average_rating)
        .attr("total_ratings", rating.total_ratings)
        .rel("movies", "movies", rating.movie_id)
        .into_value()
}

pub fn user_movie_rating_document(rating: &UserMovieRating) -> Value {
    ResourceDocument::new("usermovieratings", rating.id)
        .attr("rating", rating.rating)
        .rel("users", "users", rating.user_id)
        .rel("movies", "movies", rating.movie_id)
        .into_value()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_movie_rating_document() {
        let doc = movie_rating_document(&MovieRating {
            movie_id: 1,
            average_rating: 4,
            total_ratings: 3,
        });
        assert_eq!(
            doc,
            json!({"data": [{
                "type": "movieratings",
                "id": "1",
                "attributes": {"average_rating": "4", "total_ratings": "3"},
                "relationships": {"movies": {"data": {"type": "movies", "id": "1"}}}
            }]})
        );
    }

    #[test]
    fn test_user_movie_rating_document_has_both_relationships() {
        let doc = user_movie_rating_document(&UserMovieRating {
            id: 4,
            user_id: 1,
            movie_id: 2,
            rating: 5,
        });
        assert_eq!(
            doc,
            json!({"data": [{
                "type": "usermovieratings",
                "id": "4",
                "attributes": {"rating": "5"},
                "relationships": {
                    "users": {"data": {"type": "users", "id": "1"}},
                    "movies": {"data": {"type": "movies", "id": "2"}}
                }
            }]})
        );
    }

    #[test]
    fn test_movie_document_carries_stored_blob_as_attributes() {
        let doc = movie_document(&Movie {
            movie_id: 1,
            serialized: r#"{"name":"Jaws"}"#.to_string(),
        });
        assert_eq!(
            doc,
            json!({"data": [{
                "type": "movies",
                "id": "1",
                "attributes": {"name": "Jaws"}
            }]})
        );
    }

    #[test]
    fn test_movie_document_with_unparseable_blob() {
        let doc = movie_document(&Movie {
            movie_id: 7,
            serialized: "not json".to_string(),
        });
        assert_eq!(
            doc,
            json!({"data": [{"type": "movies", "id": "7", "attributes": {}}]})
        );
    }
}
