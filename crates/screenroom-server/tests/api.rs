mod common;

use axum::http::StatusCode;
use axum_test::TestServer;
use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase, Value};
use serde_json::{json, Value as Json};
use std::collections::BTreeMap;

use screenroom_db::entities::{
    genre, movie, movie_director, movie_genre, movie_star, movie_writer, person,
};

fn server(db: DatabaseConnection) -> TestServer {
    TestServer::new(screenroom_server::api::router(common::test_app_state(db))).unwrap()
}

fn count_row(n: i64) -> BTreeMap<&'static str, Value> {
    BTreeMap::from([("num_items", Value::BigInt(Some(n)))])
}

fn genre_model(id: i64, title: &str) -> genre::Model {
    genre::Model {
        id,
        title: title.into(),
        created_at: Utc::now().fixed_offset(),
        updated_at: Utc::now().fixed_offset(),
    }
}

fn person_model(id: i64, first: &str, last: &str, kind: person::PersonKind) -> person::Model {
    person::Model {
        id,
        first_name: first.into(),
        last_name: last.into(),
        kind,
        created_at: Utc::now().fixed_offset(),
        updated_at: Utc::now().fixed_offset(),
    }
}

fn movie_model(id: i64, title: &str) -> movie::Model {
    movie::Model {
        id,
        title: title.into(),
        description: "A film.".into(),
        poster: None,
        bg_picture: None,
        release_year: 2020,
        mpa_rating: movie::MpaRating::R,
        imdb_rating: Decimal::new(75, 1),
        duration: 110,
        created_at: Utc::now().fixed_offset(),
        updated_at: Utc::now().fixed_offset(),
    }
}

#[tokio::test]
async fn genre_listing_returns_all_genres_flat() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![
            genre_model(1, "Drama"),
            genre_model(2, "Horror"),
            genre_model(3, "Comedy"),
        ]])
        .into_connection();
    let server = server(db);

    let response = server.get("/genres/").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(
        response.json::<Json>(),
        json!([
            { "id": 1, "title": "Drama" },
            { "id": 2, "title": "Horror" },
            { "id": 3, "title": "Comedy" },
        ])
    );
}

#[tokio::test]
async fn invalid_genre_id_is_a_client_error() {
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
    let server = server(db);

    let response = server.get("/movies/").add_query_param("genre", "abc").await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Json>(), json!({ "error": ["Invalid genre ID"] }));
}

#[tokio::test]
async fn short_src_is_a_client_error() {
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
    let server = server(db);

    let response = server.get("/movies/").add_query_param("src", "a").await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Json>(),
        json!({ "error": ["Invalid 'src' parameter length"] })
    );
}

#[tokio::test]
async fn page_past_the_end_yields_out_of_bounds_payload() {
    // 7 movies -> 2 pages; page 3 must not come back as an empty page
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![count_row(7)]])
        .into_connection();
    let server = server(db);

    let response = server.get("/movies/").add_query_param("page", "3").await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Json>(),
        json!({ "errors": ["page__out_of_bounds"] })
    );
}

#[tokio::test]
async fn second_page_of_seven_movies_has_two_results() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![count_row(7)]])
        .append_query_results([vec![
            movie_model(6, "The Quiet Sea"),
            movie_model(7, "The Last Reel"),
        ]])
        .append_query_results([Vec::<movie_genre::Model>::new()])
        .append_query_results([Vec::<movie_director::Model>::new()])
        .append_query_results([Vec::<movie_writer::Model>::new()])
        .append_query_results([Vec::<movie_star::Model>::new()])
        .into_connection();
    let server = server(db);

    let response = server.get("/movies/").add_query_param("page", "2").await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let body = response.json::<Json>();
    assert_eq!(body["total"], 7);
    assert_eq!(body["pages"], 2);
    let results = body["results"].as_array().unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0]["id"], 6);
    assert_eq!(results[0]["title"], "The Quiet Sea");
    assert_eq!(results[0]["genres"], json!([]));
    assert_eq!(results[1]["id"], 7);
}

#[tokio::test]
async fn empty_catalog_still_serves_page_one() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![count_row(0)]])
        .append_query_results([Vec::<movie::Model>::new()])
        .into_connection();
    let server = server(db);

    let response = server.get("/movies/").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(
        response.json::<Json>(),
        json!({ "total": 0, "pages": 1, "results": [] })
    );
}

#[tokio::test]
async fn src_filter_returns_matching_prefix_titles() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![count_row(2)]])
        .append_query_results([vec![
            movie_model(1, "The Quiet Sea"),
            movie_model(2, "The Last Reel"),
        ]])
        .append_query_results([Vec::<movie_genre::Model>::new()])
        .append_query_results([Vec::<movie_director::Model>::new()])
        .append_query_results([Vec::<movie_writer::Model>::new()])
        .append_query_results([Vec::<movie_star::Model>::new()])
        .into_connection();
    let server = server(db);

    let response = server.get("/movies/").add_query_param("src", "The").await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let body = response.json::<Json>();
    assert_eq!(body["total"], 2);
    assert_eq!(body["pages"], 1);
    for movie in body["results"].as_array().unwrap() {
        assert!(movie["title"].as_str().unwrap().starts_with("The"));
    }
}

#[tokio::test]
async fn genre_and_src_filters_are_conjunctive() {
    // Genre 5 links movies 1 and 2; only movie 1 matches the prefix
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![
            movie_genre::Model {
                movie_id: 1,
                genre_id: 5,
            },
            movie_genre::Model {
                movie_id: 2,
                genre_id: 5,
            },
        ]])
        .append_query_results([vec![count_row(1)]])
        .append_query_results([vec![movie_model(1, "The Quiet Sea")]])
        .append_query_results([vec![movie_genre::Model {
            movie_id: 1,
            genre_id: 5,
        }]])
        .append_query_results([Vec::<movie_director::Model>::new()])
        .append_query_results([Vec::<movie_writer::Model>::new()])
        .append_query_results([Vec::<movie_star::Model>::new()])
        .append_query_results([vec![genre_model(5, "Drama")]])
        .into_connection();
    let server = server(db);

    let response = server
        .get("/movies/")
        .add_query_param("genre", "5")
        .add_query_param("src", "The")
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let body = response.json::<Json>();
    assert_eq!(body["total"], 1);
    assert_eq!(body["results"][0]["title"], "The Quiet Sea");
    assert_eq!(
        body["results"][0]["genres"],
        json!([{ "id": 5, "title": "Drama" }])
    );
}

#[tokio::test]
async fn genre_filter_restricts_and_nests_the_genre() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        // genre filter: movie ids linked to genre 5
        .append_query_results([vec![movie_genre::Model {
            movie_id: 1,
            genre_id: 5,
        }]])
        .append_query_results([vec![count_row(1)]])
        .append_query_results([vec![movie_model(1, "The Quiet Sea")]])
        // relation loading for the page
        .append_query_results([vec![movie_genre::Model {
            movie_id: 1,
            genre_id: 5,
        }]])
        .append_query_results([Vec::<movie_director::Model>::new()])
        .append_query_results([Vec::<movie_writer::Model>::new()])
        .append_query_results([Vec::<movie_star::Model>::new()])
        .append_query_results([vec![genre_model(5, "Drama")]])
        .into_connection();
    let server = server(db);

    let response = server.get("/movies/").add_query_param("genre", "5").await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let body = response.json::<Json>();
    assert_eq!(body["total"], 1);
    assert_eq!(
        body["results"][0]["genres"],
        json!([{ "id": 5, "title": "Drama" }])
    );
}

#[tokio::test]
async fn movie_detail_serializes_nested_credits() {
    let mut detailed = movie_model(1, "The Long Night");
    detailed.poster = Some("images/poster/long_night.jpg".into());

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![detailed]])
        .append_query_results([vec![movie_genre::Model {
            movie_id: 1,
            genre_id: 10,
        }]])
        .append_query_results([vec![movie_director::Model {
            movie_id: 1,
            person_id: 100,
        }]])
        .append_query_results([Vec::<movie_writer::Model>::new()])
        .append_query_results([vec![movie_star::Model {
            movie_id: 1,
            person_id: 101,
        }]])
        .append_query_results([vec![genre_model(10, "Crime")]])
        .append_query_results([vec![
            person_model(100, "Ada", "Marsh", person::PersonKind::Director),
            // kind tag is not checked against the credit association
            person_model(101, "Finn", "Serra", person::PersonKind::Writer),
        ]])
        .into_connection();
    let server = server(db);

    let response = server.get("/movies/1/").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(
        response.json::<Json>(),
        json!({
            "id": 1,
            "title": "The Long Night",
            "description": "A film.",
            "release_year": 2020,
            "mpa_rating": "R",
            "imdb_rating": 7.5,
            "duration": 110,
            "poster": "/media/images/poster/long_night.jpg",
            "bg_picture": "",
            "genres": [{ "id": 10, "title": "Crime" }],
            "directors": [{ "id": 100, "first_name": "Ada", "last_name": "Marsh" }],
            "writers": [],
            "stars": [{ "id": 101, "first_name": "Finn", "last_name": "Serra" }],
        })
    );
}

#[tokio::test]
async fn missing_movie_yields_not_found_payload() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<movie::Model>::new()])
        .into_connection();
    let server = server(db);

    let response = server.get("/movies/42/").await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Json>(), json!({ "error": ["movie_not_found"] }));
}

#[tokio::test]
async fn non_numeric_movie_id_yields_not_found_payload() {
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
    let server = server(db);

    let response = server.get("/movies/abc/").await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Json>(), json!({ "error": ["movie_not_found"] }));
}

#[tokio::test]
async fn healthz_reports_ok() {
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
    let server = server(db);

    let response = server.get("/healthz").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Json>()["status"], "ok");
}
