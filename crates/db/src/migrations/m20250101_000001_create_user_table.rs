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
                    .col(
                        ColumnDef::new(User::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(User::Name).string_len(256).not_null())
                    .col(
                        ColumnDef::new(User::Email)
                            .string_len(320)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(User::ApiToken)
                            .string_len(64)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(User::CompanyName).string_len(256))
                    .col(ColumnDef::new(User::CompanyDescription).text())
                    .col(ColumnDef::new(User::PrivacyLink).string_len(2048))
                    .col(ColumnDef::new(User::LegalNoticeLink).string_len(2048))
                    .col(ColumnDef::new(User::PrivacyContactPerson).string_len(256))
                    .col(ColumnDef::new(User::PrivacyContactEmail).string_len(320))
                    .col(
                        ColumnDef::new(User::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await
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
    Name,
    Email,
    ApiToken,
    CompanyName,
    CompanyDescription,
    PrivacyLink,
    LegalNoticeLink,
    PrivacyContactPerson,
    PrivacyContactEmail,
    CreatedAt,
}
