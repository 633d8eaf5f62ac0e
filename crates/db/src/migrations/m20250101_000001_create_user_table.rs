//! Create user table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(User::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(User::Id).string_len(32).not_null().primary_key())
                    .col(ColumnDef::new(User::Username).string_len(128).not_null())
                    .col(ColumnDef::new(User::Fullname).string_len(256).not_null())
                    .col(ColumnDef::new(User::Email).string_len(320).not_null())
                    .col(ColumnDef::new(User::Bio).text())
                    .col(ColumnDef::new(User::Image).string_len(1024).not_null())
                    .col(ColumnDef::new(User::ClerkId).string_len(128).not_null())
                    .col(ColumnDef::new(User::Followers).integer().not_null().default(0))
                    .col(ColumnDef::new(User::Following).integer().not_null().default(0))
                    .col(ColumnDef::new(User::Posts).integer().not_null().default(0))
                    .col(
                        ColumnDef::new(User::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Unique index: clerk_id - one user record per identity
        manager
            .create_index(
                Index::create()
                    .name("idx_user_clerk_id")
                    .table(User::Table)
                    .col(User::ClerkId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(User::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum User {
    Table,
    Id,
    Username,
    Fullname,
    Email,
    Bio,
    Image,
    ClerkId,
    Followers,
    Following,
    Posts,
    CreatedAt,
}
