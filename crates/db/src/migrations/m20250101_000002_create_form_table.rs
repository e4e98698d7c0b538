//! Create form table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Form::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Form::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Form::Uuid)
                            .string_len(36)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Form::UserId).string_len(32).not_null())
                    .col(ColumnDef::new(Form::Name).string_len(256).not_null())
                    .col(ColumnDef::new(Form::PublishedAt).timestamp_with_time_zone())
                    .col(ColumnDef::new(Form::BrandColor).string_len(7))
                    .col(ColumnDef::new(Form::PrivacyLink).string_len(2048))
                    .col(ColumnDef::new(Form::LegalNoticeLink).string_len(2048))
                    .col(ColumnDef::new(Form::AvatarPath).string_len(512))
                    .col(
                        ColumnDef::new(Form::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(Form::UpdatedAt).timestamp_with_time_zone())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_form_user")
                            .from(Form::Table, Form::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Index: user_id (for listing a user's forms)
        manager
            .create_index(
                Index::create()
                    .name("idx_form_user_id")
                    .table(Form::Table)
                    .col(Form::UserId)
                    .to_owned(),
            )
            .await?;

        // Index: published_at (for the published scope)
        manager
            .create_index(
                Index::create()
                    .name("idx_form_published_at")
                    .table(Form::Table)
                    .col(Form::PublishedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Form::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Form {
    Table,
    Id,
    Uuid,
    UserId,
    Name,
    PublishedAt,
    BrandColor,
    PrivacyLink,
    LegalNoticeLink,
    AvatarPath,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum User {
    Table,
    Id,
}
