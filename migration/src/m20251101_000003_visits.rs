//! visits table
//!
//! Append-only log of resolved redirects. There is no foreign
//! key to `shortcuts`: deleting a shortcut leaves its visits in place.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Visits::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Visits::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Visits::Timestamp)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Visits::ShortcutId).big_integer().not_null())
                    .col(
                        ColumnDef::new(Visits::IpAddress)
                            .string_len(64)
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(Visits::Path).text().not_null())
                    .col(ColumnDef::new(Visits::Referer).text().not_null())
                    .col(
                        ColumnDef::new(Visits::UtmSource)
                            .string_len(255)
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(Visits::UserAgent).text().not_null())
                    .to_owned(),
            )
            .await?;

        // Leaderboard windows filter on timestamp
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_visits_timestamp")
                    .table(Visits::Table)
                    .col(Visits::Timestamp)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_visits_shortcut_time")
                    .table(Visits::Table)
                    .col(Visits::ShortcutId)
                    .col(Visits::Timestamp)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_visits_shortcut_time")
                    .table(Visits::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_visits_timestamp")
                    .table(Visits::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Visits::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Visits {
    #[sea_orm(iden = "visits")]
    Table,
    Id,
    Timestamp,
    ShortcutId,
    IpAddress,
    Path,
    Referer,
    UtmSource,
    UserAgent,
}
