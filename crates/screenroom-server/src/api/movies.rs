use axum::{
    extract::{Path, Query, State},
    Json,
};
use rust_decimal::prelude::ToPrimitive;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use super::ApiError;
use screenroom_db::entities::{
    genre, movie, movie_director, movie_genre, movie_star, movie_writer, person,
};
use screenroom_db::AppState;

pub const PAGE_SIZE: u64 = 5;

#[derive(Debug, Default, Deserialize)]
pub struct MovieListParams {
    /// Raw strings so malformed values reach our validation instead of
    /// being rejected by the extractor.
    pub genre: Option<String>,
    pub src: Option<String>,
    pub page: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct GenreRef {
    pub id: i64,
    pub title: String,
}

#[derive(Debug, Serialize)]
pub struct PersonRef {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Serialize)]
pub struct MovieResponse {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub release_year: i32,
    pub mpa_rating: movie::MpaRating,
    pub imdb_rating: f64,
    pub duration: i32,
    pub poster: String,
    pub bg_picture: String,
    pub genres: Vec<GenreRef>,
    pub directors: Vec<PersonRef>,
    pub writers: Vec<PersonRef>,
    pub stars: Vec<PersonRef>,
}

#[derive(Debug, Serialize)]
pub struct MovieListResponse {
    pub total: u64,
    pub pages: u64,
    pub results: Vec<MovieResponse>,
}

/// GET /movies — filtered, paginated listing
pub async fn list_movies(
    State(state): State<Arc<AppState>>,
    Query(params): Query<MovieListParams>,
) -> Result<Json<MovieListResponse>, ApiError> {
    let genre_id = parse_genre(params.genre.as_deref())?;
    let src = parse_src(params.src.as_deref())?;
    let page = parse_page(params.page.as_deref())?;

    let mut query = movie::Entity::find().order_by_asc(movie::Column::Id);

    if let Some(genre_id) = genre_id {
        let movie_ids: Vec<i64> = movie_genre::Entity::find()
            .filter(movie_genre::Column::GenreId.eq(genre_id))
            .all(&state.db)
            .await?
            .into_iter()
            .map(|link| link.movie_id)
            .collect();
        query = query.filter(movie::Column::Id.is_in(movie_ids));
    }

    if let Some(src) = src {
        // Case-sensitive prefix match; escape LIKE wildcards in the input
        let prefix = format!("{}%", like_escape(src));
        query = query.filter(movie::Column::Title.like(prefix.as_str()));
    }

    let paginator = query.paginate(&state.db, PAGE_SIZE);
    let total = paginator.num_items().await?;
    let pages = page_count(total);

    if page > pages {
        return Err(ApiError::PageOutOfBounds);
    }

    let movies = paginator.fetch_page(page - 1).await?;
    let results = load_movie_responses(&state.db, movies).await?;

    Ok(Json(MovieListResponse {
        total,
        pages,
        results,
    }))
}

/// GET /movies/{id}
pub async fn get_movie(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<MovieResponse>, ApiError> {
    // A non-numeric id can never exist, so it gets the not-found payload
    // rather than the extractor's plain-text rejection
    let id: i64 = id
        .parse()
        .map_err(|_| ApiError::NotFound("movie_not_found"))?;

    let movie_model = movie::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or(ApiError::NotFound("movie_not_found"))?;

    let mut responses = load_movie_responses(&state.db, vec![movie_model]).await?;
    // load_movie_responses returns one response per input movie, in order
    Ok(Json(responses.remove(0)))
}

fn parse_genre(raw: Option<&str>) -> Result<Option<i64>, ApiError> {
    match raw {
        None | Some("") => Ok(None),
        Some(s) => s
            .parse::<i64>()
            .map(Some)
            .map_err(|_| ApiError::InvalidParam("Invalid genre ID".into())),
    }
}

fn parse_src(raw: Option<&str>) -> Result<Option<&str>, ApiError> {
    match raw {
        None | Some("") => Ok(None),
        Some(s) => {
            let len = s.chars().count();
            if (2..=20).contains(&len) {
                Ok(Some(s))
            } else {
                Err(ApiError::InvalidParam("Invalid 'src' parameter length".into()))
            }
        }
    }
}

/// 1-based page number, defaulting to 1. Zero and non-integers are rejected.
fn parse_page(raw: Option<&str>) -> Result<u64, ApiError> {
    match raw {
        None | Some("") => Ok(1),
        Some(s) => match s.parse::<u64>() {
            Ok(page) if page >= 1 => Ok(page),
            _ => Err(ApiError::InvalidParam("Invalid page number".into())),
        },
    }
}

/// Page 1 of an empty result set is valid, so the count is never below 1.
fn page_count(total: u64) -> u64 {
    total.div_ceil(PAGE_SIZE).max(1)
}

fn like_escape(s: &str) -> String {
    // Backslash first, so escapes are not themselves escaped
    s.replace('\\', "\\\\").replace('%', "\\%").replace('_', "\\_")
}

/// Serialize one movie with its pre-fetched relations.
pub fn movie_response(
    m: movie::Model,
    genres: Vec<GenreRef>,
    directors: Vec<PersonRef>,
    writers: Vec<PersonRef>,
    stars: Vec<PersonRef>,
) -> MovieResponse {
    MovieResponse {
        id: m.id,
        title: m.title,
        description: m.description,
        release_year: m.release_year,
        mpa_rating: m.mpa_rating,
        imdb_rating: m.imdb_rating.to_f64().unwrap_or(0.0),
        duration: m.duration,
        poster: media_url(m.poster.as_deref()),
        bg_picture: media_url(m.bg_picture.as_deref()),
        genres,
        directors,
        writers,
        stars,
    }
}

/// Empty string when no image was uploaded, otherwise the public media URL.
fn media_url(path: Option<&str>) -> String {
    match path {
        None | Some("") => String::new(),
        Some(p) if p.starts_with('/') || p.starts_with("http") => p.to_string(),
        Some(p) => format!("/media/{p}"),
    }
}

fn group_links(links: impl IntoIterator<Item = (i64, i64)>) -> HashMap<i64, Vec<i64>> {
    let mut map: HashMap<i64, Vec<i64>> = HashMap::new();
    for (movie_id, other_id) in links {
        map.entry(movie_id).or_default().push(other_id);
    }
    map
}

fn person_refs(ids: Option<&Vec<i64>>, people: &HashMap<i64, person::Model>) -> Vec<PersonRef> {
    ids.map(|ids| {
        ids.iter()
            .filter_map(|id| people.get(id))
            .map(|p| PersonRef {
                id: p.id,
                first_name: p.first_name.clone(),
                last_name: p.last_name.clone(),
            })
            .collect()
    })
    .unwrap_or_default()
}

/// Batch-load nested relations for a page of movies and serialize them.
/// One query per junction table plus one each for the referenced genres and
/// people, regardless of page length. Output order matches input order.
async fn load_movie_responses(
    db: &DatabaseConnection,
    movies: Vec<movie::Model>,
) -> Result<Vec<MovieResponse>, ApiError> {
    if movies.is_empty() {
        return Ok(Vec::new());
    }

    let movie_ids: Vec<i64> = movies.iter().map(|m| m.id).collect();

    let genre_links = group_links(
        movie_genre::Entity::find()
            .filter(movie_genre::Column::MovieId.is_in(movie_ids.clone()))
            .all(db)
            .await?
            .into_iter()
            .map(|l| (l.movie_id, l.genre_id)),
    );
    let director_links = group_links(
        movie_director::Entity::find()
            .filter(movie_director::Column::MovieId.is_in(movie_ids.clone()))
            .all(db)
            .await?
            .into_iter()
            .map(|l| (l.movie_id, l.person_id)),
    );
    let writer_links = group_links(
        movie_writer::Entity::find()
            .filter(movie_writer::Column::MovieId.is_in(movie_ids.clone()))
            .all(db)
            .await?
            .into_iter()
            .map(|l| (l.movie_id, l.person_id)),
    );
    let star_links = group_links(
        movie_star::Entity::find()
            .filter(movie_star::Column::MovieId.is_in(movie_ids))
            .all(db)
            .await?
            .into_iter()
            .map(|l| (l.movie_id, l.person_id)),
    );

    let genre_ids: Vec<i64> = genre_links
        .values()
        .flatten()
        .copied()
        .collect::<HashSet<_>>()
        .into_iter()
        .collect();
    let genres: HashMap<i64, genre::Model> = if genre_ids.is_empty() {
        HashMap::new()
    } else {
        genre::Entity::find()
            .filter(genre::Column::Id.is_in(genre_ids))
            .all(db)
            .await?
            .into_iter()
            .map(|g| (g.id, g))
            .collect()
    };

    let person_ids: Vec<i64> = director_links
        .values()
        .chain(writer_links.values())
        .chain(star_links.values())
        .flatten()
        .copied()
        .collect::<HashSet<_>>()
        .into_iter()
        .collect();
    let people: HashMap<i64, person::Model> = if person_ids.is_empty() {
        HashMap::new()
    } else {
        person::Entity::find()
            .filter(person::Column::Id.is_in(person_ids))
            .all(db)
            .await?
            .into_iter()
            .map(|p| (p.id, p))
            .collect()
    };

    Ok(movies
        .into_iter()
        .map(|m| {
            let movie_genres = genre_links
                .get(&m.id)
                .map(|ids| {
                    ids.iter()
                        .filter_map(|id| genres.get(id))
                        .map(|g| GenreRef {
                            id: g.id,
                            title: g.title.clone(),
                        })
                        .collect()
                })
                .unwrap_or_default();
            let directors = person_refs(director_links.get(&m.id), &people);
            let writers = person_refs(writer_links.get(&m.id), &people);
            let stars = person_refs(star_links.get(&m.id), &people);
            movie_response(m, movie_genres, directors, writers, stars)
        })
        .collect())
}
