//! Form block interaction entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Closed set of interaction types.
///
/// Independent of [`super::form_block::FormBlockType`]; which interaction
/// types a block accepts is decided by the block type registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
pub enum InteractionType {
    #[sea_orm(string_value = "button")]
    Button,
    #[sea_orm(string_value = "consent")]
    Consent,
    #[sea_orm(string_value = "checkbox")]
    Checkbox,
    #[sea_orm(string_value = "radio")]
    Radio,
    #[sea_orm(string_value = "input")]
    Input,
    #[sea_orm(string_value = "textarea")]
    Textarea,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "form_block_interaction")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// User-assignable external identifier. Generated on create, mutable.
    pub uuid: String,

    /// Owning block ID
    #[sea_orm(indexed)]
    pub form_block_id: String,

    /// Interaction type tag
    #[sea_orm(column_name = "type")]
    pub interaction_type: InteractionType,

    /// Display label (e.g. button caption)
    #[sea_orm(nullable)]
    pub label: Option<String>,

    /// Message sent back after the interaction completes
    #[sea_orm(column_type = "Text", nullable)]
    pub reply: Option<String>,

    /// Open option bag (option name -> scalar). No schema is enforced at
    /// write time; validators interpret keys at the point of use.
    #[sea_orm(column_type = "JsonBinary")]
    pub options: JsonValue,

    /// Ordinal position within the block
    pub position: i32,

    pub created_at: DateTimeWithTimeZone,

    #[sea_orm(nullable)]
    pub updated_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::form_block::Entity",
        from = "Column::FormBlockId",
        to = "super::form_block::Column::Id",
        on_delete = "Cascade"
    )]
    Block,
}

impl Related<super::form_block::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Block.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
