//! User entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub name: String,

    #[sea_orm(unique)]
    pub email: String,

    /// API access token
    #[sea_orm(unique)]
    pub api_token: String,

    /// Company name shown in legal footers
    #[sea_orm(nullable)]
    pub company_name: Option<String>,

    /// Company description shown in legal footers
    #[sea_orm(column_type = "Text", nullable)]
    pub company_description: Option<String>,

    /// Default privacy policy link for this user's forms
    #[sea_orm(nullable)]
    pub privacy_link: Option<String>,

    /// Default legal notice link for this user's forms
    #[sea_orm(nullable)]
    pub legal_notice_link: Option<String>,

    /// Privacy contact person
    #[sea_orm(nullable)]
    pub privacy_contact_person: Option<String>,

    /// Privacy contact email
    #[sea_orm(nullable)]
    pub privacy_contact_email: Option<String>,

    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::form::Entity")]
    Forms,
}

impl Related<super::form::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Forms.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
