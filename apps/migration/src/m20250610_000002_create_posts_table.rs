use sea_orm_migration::prelude::*;

use super::m20250610_000001_create_users_table::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Posts::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Posts::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Posts::Title).string_len(200).not_null())
                    .col(ColumnDef::new(Posts::Slug).string_len(220).not_null())
                    .col(ColumnDef::new(Posts::ContentHtml).text().not_null())
                    .col(ColumnDef::new(Posts::Excerpt).string_len(500).null())
                    .col(ColumnDef::new(Posts::FeaturedImagePath).string().null())
                    .col(ColumnDef::new(Posts::Categories).json_binary().null())
                    .col(ColumnDef::new(Posts::Tags).json_binary().null())
                    .col(
                        ColumnDef::new(Posts::Status)
                            .string_len(20)
                            .not_null()
                            .default("draft"),
                    )
                    .col(
                        ColumnDef::new(Posts::PublishedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(ColumnDef::new(Posts::AuthorId).uuid().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_posts_author")
                            .from(Posts::Table, Posts::AuthorId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .col(
                        ColumnDef::new(Posts::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Posts::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Slug uniqueness is enforced here; the service retries generation
        // when an insert trips this index.
        manager
            .create_index(
                Index::create()
                    .name("idx_posts_slug_unique")
                    .table(Posts::Table)
                    .col(Posts::Slug)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Posts::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Posts {
    Table,
    Id,
    Title,
    Slug,
    ContentHtml,
    Excerpt,
    FeaturedImagePath,
    Categories,
    Tags,
    Status,
    PublishedAt,
    AuthorId,
    CreatedAt,
    UpdatedAt,
}
