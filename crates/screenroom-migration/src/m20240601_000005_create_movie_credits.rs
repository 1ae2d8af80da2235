use sea_orm_migration::prelude::*;

use super::m20240601_000002_create_people::People;
use super::m20240601_000003_create_movies::Movies;

#[derive(DeriveMigrationName)]
pub struct Migration;

const CREDIT_TABLES: [&str; 3] = ["movie_directors", "movie_writers", "movie_stars"];

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Same shape for all three credit associations: a person row may
        // appear in any of them regardless of its kind tag.
        for table in CREDIT_TABLES {
            manager
                .create_table(
                    Table::create()
                        .table(Alias::new(table))
                        .if_not_exists()
                        .col(ColumnDef::new(Credits::MovieId).big_integer().not_null())
                        .col(ColumnDef::new(Credits::PersonId).big_integer().not_null())
                        .primary_key(
                            Index::create().col(Credits::MovieId).col(Credits::PersonId),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name(format!("fk_{table}_movie_id").as_str())
                                .from(Alias::new(table), Credits::MovieId)
                                .to(Movies::Table, Movies::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name(format!("fk_{table}_person_id").as_str())
                                .from(Alias::new(table), Credits::PersonId)
                                .to(People::Table, People::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name(format!("idx_{table}_person_id").as_str())
                        .table(Alias::new(table))
                        .col(Credits::PersonId)
                        .to_owned(),
                )
                .await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for table in CREDIT_TABLES.iter().rev() {
            manager
                .drop_table(Table::drop().table(Alias::new(*table)).to_owned())
                .await?;
        }
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Credits {
    MovieId,
    PersonId,
}
