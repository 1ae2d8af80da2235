pub use sea_orm_migration::prelude::*;

mod m20240601_000001_create_genres;
mod m20240601_000002_create_people;
mod m20240601_000003_create_movies;
mod m20240601_000004_create_movie_genres;
mod m20240601_000005_create_movie_credits;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240601_000001_create_genres::Migration),
            Box::new(m20240601_000002_create_people::Migration),
            Box::new(m20240601_000003_create_movies::Migration),
            Box::new(m20240601_000004_create_movie_genres::Migration),
            Box::new(m20240601_000005_create_movie_credits::Migration),
        ]
    }
}
