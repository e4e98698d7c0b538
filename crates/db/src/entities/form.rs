//! Form entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "form")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Public identifier used in respondent-facing URLs
    #[sea_orm(unique)]
    pub uuid: String,

    /// Owning user ID
    #[sea_orm(indexed)]
    pub user_id: String,

    pub name: String,

    /// Publish window start. NULL or a future timestamp means unpublished.
    #[sea_orm(nullable)]
    pub published_at: Option<DateTimeWithTimeZone>,

    /// Brand color as `#rrggbb`. NULL falls back to black.
    #[sea_orm(nullable)]
    pub brand_color: Option<String>,

    /// Per-form privacy policy link override
    #[sea_orm(nullable)]
    pub privacy_link: Option<String>,

    /// Per-form legal notice link override
    #[sea_orm(nullable)]
    pub legal_notice_link: Option<String>,

    /// Storage key of the form's avatar image, if one was uploaded
    #[sea_orm(nullable)]
    pub avatar_path: Option<String>,

    pub created_at: DateTimeWithTimeZone,

    #[sea_orm(nullable)]
    pub updated_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    User,

    #[sea_orm(has_many = "super::form_block::Entity")]
    Blocks,

    #[sea_orm(has_many = "super::form_session::Entity")]
    Sessions,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::form_block::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Blocks.def()
    }
}

impl Related<super::form_session::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Sessions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
