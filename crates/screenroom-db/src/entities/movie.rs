use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Motion Picture Association content rating.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(5))")]
pub enum MpaRating {
    #[sea_orm(string_value = "G")]
    #[serde(rename = "G")]
    G,
    #[sea_orm(string_value = "PG")]
    #[serde(rename = "PG")]
    Pg,
    #[sea_orm(string_value = "PG13")]
    #[serde(rename = "PG13")]
    Pg13,
    #[sea_orm(string_value = "R")]
    #[serde(rename = "R")]
    R,
    #[sea_orm(string_value = "NC17")]
    #[serde(rename = "NC17")]
    Nc17,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "movies")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    /// Relative media path of the poster image, if one was uploaded.
    pub poster: Option<String>,
    /// Relative media path of the background image, if one was uploaded.
    pub bg_picture: Option<String>,
    pub release_year: i32,
    pub mpa_rating: MpaRating,
    #[sea_orm(column_type = "Decimal(Some((3, 1)))")]
    pub imdb_rating: Decimal,
    /// Runtime in minutes.
    pub duration: i32,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::movie_genre::Entity")]
    MovieGenre,
    #[sea_orm(has_many = "super::movie_director::Entity")]
    MovieDirector,
    #[sea_orm(has_many = "super::movie_writer::Entity")]
    MovieWriter,
    #[sea_orm(has_many = "super::movie_star::Entity")]
    MovieStar,
}

impl Related<super::movie_genre::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MovieGenre.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
