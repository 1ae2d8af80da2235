pub mod genre;
pub mod movie;
pub mod movie_director;
pub mod movie_genre;
pub mod movie_star;
pub mod movie_writer;
pub mod person;
