//! Form session response entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "form_session_response")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Session this answer belongs to
    #[sea_orm(indexed)]
    pub form_session_id: String,

    /// Block this answer was given for
    #[sea_orm(indexed)]
    pub form_block_id: String,

    /// Raw respondent answer. Shape depends on the block type.
    #[sea_orm(column_type = "JsonBinary")]
    pub payload: JsonValue,

    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::form_session::Entity",
        from = "Column::FormSessionId",
        to = "super::form_session::Column::Id",
        on_delete = "Cascade"
    )]
    Session,

    #[sea_orm(
        belongs_to = "super::form_block::Entity",
        from = "Column::FormBlockId",
        to = "super::form_block::Column::Id",
        on_delete = "Cascade"
    )]
    Block,
}

impl Related<super::form_session::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Session.def()
    }
}

impl Related<super::form_block::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Block.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
