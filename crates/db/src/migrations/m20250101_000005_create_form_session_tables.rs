//! Create form session and response tables migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(FormSession::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(FormSession::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(FormSession::FormId)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(FormSession::Token)
                            .string_len(64)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(FormSession::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_form_session_form")
                            .from(FormSession::Table, FormSession::FormId)
                            .to(Form::Table, Form::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_form_session_form_id")
                    .table(FormSession::Table)
                    .col(FormSession::FormId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(FormSessionResponse::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(FormSessionResponse::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(FormSessionResponse::FormSessionId)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(FormSessionResponse::FormBlockId)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(FormSessionResponse::Payload)
                            .json_binary()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(FormSessionResponse::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_form_session_response_session")
                            .from(
                                FormSessionResponse::Table,
                                FormSessionResponse::FormSessionId,
                            )
                            .to(FormSession::Table, FormSession::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_form_session_response_block")
                            .from(
                                FormSessionResponse::Table,
                                FormSessionResponse::FormBlockId,
                            )
                            .to(FormBlock::Table, FormBlock::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_form_session_response_session_id")
                    .table(FormSessionResponse::Table)
                    .col(FormSessionResponse::FormSessionId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_form_session_response_block_id")
                    .table(FormSessionResponse::Table)
                    .col(FormSessionResponse::FormBlockId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(FormSessionResponse::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(FormSession::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum FormSession {
    Table,
    Id,
    FormId,
    Token,
    CreatedAt,
}

#[derive(Iden)]
enum FormSessionResponse {
    Table,
    Id,
    FormSessionId,
    FormBlockId,
    Payload,
    CreatedAt,
}

#[derive(Iden)]
enum Form {
    Table,
    Id,
}

#[derive(Iden)]
enum FormBlock {
    Table,
    Id,
}
