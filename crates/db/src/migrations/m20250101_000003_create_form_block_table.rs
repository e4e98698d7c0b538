//! Create form block table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(FormBlock::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(FormBlock::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(FormBlock::FormId).string_len(32).not_null())
                    .col(ColumnDef::new(FormBlock::Type).string_len(32).not_null())
                    .col(ColumnDef::new(FormBlock::Position).integer().not_null())
                    .col(ColumnDef::new(FormBlock::Message).text())
                    .col(
                        ColumnDef::new(FormBlock::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_form_block_form")
                            .from(FormBlock::Table, FormBlock::FormId)
                            .to(Form::Table, Form::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Index: (form_id, position) for ordered block listing
        manager
            .create_index(
                Index::create()
                    .name("idx_form_block_form_position")
                    .table(FormBlock::Table)
                    .col(FormBlock::FormId)
                    .col(FormBlock::Position)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(FormBlock::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum FormBlock {
    Table,
    Id,
    FormId,
    Type,
    Position,
    Message,
    CreatedAt,
}

#[derive(Iden)]
enum Form {
    Table,
    Id,
}
