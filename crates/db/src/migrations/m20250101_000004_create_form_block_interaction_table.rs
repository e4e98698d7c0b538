//! Create form block interaction table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(FormBlockInteraction::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(FormBlockInteraction::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(FormBlockInteraction::Uuid)
                            .string_len(64)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(FormBlockInteraction::FormBlockId)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(FormBlockInteraction::Type)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(ColumnDef::new(FormBlockInteraction::Label).string_len(256))
                    .col(ColumnDef::new(FormBlockInteraction::Reply).text())
                    .col(
                        ColumnDef::new(FormBlockInteraction::Options)
                            .json_binary()
                            .not_null()
                            .default(Expr::cust("'{}'::jsonb")),
                    )
                    .col(
                        ColumnDef::new(FormBlockInteraction::Position)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(FormBlockInteraction::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(FormBlockInteraction::UpdatedAt).timestamp_with_time_zone())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_form_block_interaction_block")
                            .from(
                                FormBlockInteraction::Table,
                                FormBlockInteraction::FormBlockId,
                            )
                            .to(FormBlock::Table, FormBlock::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Index: form_block_id (for listing a block's interactions)
        manager
            .create_index(
                Index::create()
                    .name("idx_form_block_interaction_block_id")
                    .table(FormBlockInteraction::Table)
                    .col(FormBlockInteraction::FormBlockId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(FormBlockInteraction::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum FormBlockInteraction {
    Table,
    Id,
    Uuid,
    FormBlockId,
    Type,
    Label,
    Reply,
    Options,
    Position,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum FormBlock {
    Table,
    Id,
}
