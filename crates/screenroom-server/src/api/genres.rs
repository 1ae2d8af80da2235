use axum::{extract::State, Json};
use sea_orm::{EntityTrait, QueryOrder};
use serde::Serialize;
use std::sync::Arc;

use super::ApiError;
use screenroom_db::entities::genre;
use screenroom_db::AppState;

#[derive(Debug, Serialize)]
pub struct GenreResponse {
    pub id: i64,
    pub title: String,
}

impl From<genre::Model> for GenreResponse {
    fn from(g: genre::Model) -> Self {
        Self {
            id: g.id,
            title: g.title,
        }
    }
}

/// GET /genres — every genre, unpaginated, ordered by id
pub async fn list_genres(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<GenreResponse>>, ApiError> {
    let genres = genre::Entity::find()
        .order_by_asc(genre::Column::Id)
        .all(&state.db)
        .await?;

    Ok(Json(genres.into_iter().map(GenreResponse::from).collect()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn make_genre_model(id: i64, title: &str) -> genre::Model {
        genre::Model {
            id,
            title: title.into(),
            created_at: Utc::now().fixed_offset(),
            updated_at: Utc::now().fixed_offset(),
        }
    }

    #[test]
    fn test_genre_response_from_model() {
        let resp = GenreResponse::from(make_genre_model(3, "Drama"));
        assert_eq!(resp.id, 3);
        assert_eq!(resp.title, "Drama");
    }

    #[test]
    fn test_genre_response_serialization_is_flat() {
        let resp = GenreResponse::from(make_genre_model(1, "Horror"));
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json, serde_json::json!({ "id": 1, "title": "Horror" }));
    }
}
