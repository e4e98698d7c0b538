//! Form block entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Closed set of block types.
///
/// The string values are part of the public API and the stored data; they
/// must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
pub enum FormBlockType {
    /// Static content only; never produces a response.
    #[sea_orm(string_value = "none")]
    None,
    #[sea_orm(string_value = "consent")]
    Consent,
    #[sea_orm(string_value = "checkbox")]
    Checkbox,
    #[sea_orm(string_value = "radio")]
    Radio,
    #[sea_orm(string_value = "input-long")]
    InputLong,
    #[sea_orm(string_value = "input-short")]
    InputShort,
    #[sea_orm(string_value = "input-email")]
    InputEmail,
    #[sea_orm(string_value = "input-link")]
    InputLink,
    #[sea_orm(string_value = "input-number")]
    InputNumber,
    #[sea_orm(string_value = "input-phone")]
    InputPhone,
}

impl Default for FormBlockType {
    fn default() -> Self {
        Self::None
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "form_block")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Owning form ID
    #[sea_orm(indexed)]
    pub form_id: String,

    /// Block type tag
    #[sea_orm(column_name = "type")]
    pub block_type: FormBlockType,

    /// Ordinal position within the form
    pub position: i32,

    /// Prompt text shown to the respondent
    #[sea_orm(column_type = "Text", nullable)]
    pub message: Option<String>,

    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::form::Entity",
        from = "Column::FormId",
        to = "super::form::Column::Id",
        on_delete = "Cascade"
    )]
    Form,

    #[sea_orm(has_many = "super::form_block_interaction::Entity")]
    Interactions,

    #[sea_orm(has_many = "super::form_session_response::Entity")]
    Responses,
}

impl Related<super::form::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Form.def()
    }
}

impl Related<super::form_block_interaction::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Interactions.def()
    }
}

impl Related<super::form_session_response::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Responses.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
