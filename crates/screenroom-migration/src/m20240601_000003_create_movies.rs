use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Movies::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Movies::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Movies::Title).string_len(100).not_null())
                    .col(ColumnDef::new(Movies::Description).text().not_null())
                    .col(ColumnDef::new(Movies::Poster).string_len(512).null())
                    .col(ColumnDef::new(Movies::BgPicture).string_len(512).null())
                    .col(ColumnDef::new(Movies::ReleaseYear).integer().not_null())
                    .col(ColumnDef::new(Movies::MpaRating).string_len(5).not_null())
                    .col(
                        ColumnDef::new(Movies::ImdbRating)
                            .decimal_len(3, 1)
                            .not_null()
                            .check(
                                Expr::col(Movies::ImdbRating)
                                    .gte(0.0)
                                    .and(Expr::col(Movies::ImdbRating).lte(10.0)),
                            ),
                    )
                    .col(ColumnDef::new(Movies::Duration).integer().not_null())
                    .col(
                        ColumnDef::new(Movies::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Movies::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Prefix search filters on title
        manager
            .create_index(
                Index::create()
                    .name("idx_movies_title")
                    .table(Movies::Table)
                    .col(Movies::Title)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Movies::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Movies {
    Table,
    Id,
    Title,
    Description,
    Poster,
    BgPicture,
    ReleaseYear,
    MpaRating,
    ImdbRating,
    Duration,
    CreatedAt,
    UpdatedAt,
}
