use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Display tag for a person. Nothing enforces that a person tagged
/// `Director` only appears in director credits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(2))")]
pub enum PersonKind {
    #[sea_orm(string_value = "DR")]
    #[serde(rename = "DR")]
    Director,
    #[sea_orm(string_value = "WR")]
    #[serde(rename = "WR")]
    Writer,
    #[sea_orm(string_value = "AC")]
    #[serde(rename = "AC")]
    Actor,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "people")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub kind: PersonKind,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::movie_director::Entity")]
    MovieDirector,
    #[sea_orm(has_many = "super::movie_writer::Entity")]
    MovieWriter,
    #[sea_orm(has_many = "super::movie_star::Entity")]
    MovieStar,
}

impl Related<super::movie_director::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MovieDirector.def()
    }
}

impl Related<super::movie_writer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MovieWriter.def()
    }
}

impl Related<super::movie_star::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MovieStar.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
