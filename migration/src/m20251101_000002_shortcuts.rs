//! shortcuts table
//!
//! `code` carries a unique index; concurrent inserts of the same code race
//! here and exactly one wins. On MySQL the column is switched to a binary
//! collation so that code lookups stay byte-exact.

use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::DatabaseBackend;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Shortcuts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Shortcuts::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Shortcuts::Code).string_len(255).not_null())
                    .col(ColumnDef::new(Shortcuts::Url).text().not_null())
                    .col(
                        ColumnDef::new(Shortcuts::Created)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Shortcuts::CreatedBy).big_integer().not_null())
                    .col(
                        ColumnDef::new(Shortcuts::Updated)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Shortcuts::UpdatedBy).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        if manager.get_database_backend() == DatabaseBackend::MySql {
            manager
                .get_connection()
                .execute_unprepared(
                    "ALTER TABLE shortcuts MODIFY code VARCHAR(255) CHARACTER SET utf8mb4 COLLATE utf8mb4_bin NOT NULL",
                )
                .await?;
        }

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_shortcuts_code")
                    .table(Shortcuts::Table)
                    .col(Shortcuts::Code)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Listing orders by most recently updated
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_shortcuts_updated")
                    .table(Shortcuts::Table)
                    .col(Shortcuts::Updated)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_shortcuts_updated")
                    .table(Shortcuts::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_shortcuts_code")
                    .table(Shortcuts::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Shortcuts::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Shortcuts {
    #[sea_orm(iden = "shortcuts")]
    Table,
    Id,
    Code,
    Url,
    Created,
    CreatedBy,
    Updated,
    UpdatedBy,
}
