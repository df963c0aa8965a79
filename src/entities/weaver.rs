use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A worker entity, optionally assigned to looms.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "weavers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub name: String,
    pub phone: String,

    pub account_number: Option<String>,
    pub ifsc_code: Option<String>,
    pub account_type: Option<String>,
    pub name_in_bank: Option<String>,

    /// Blob-store reference for the uploaded aadhaar document
    pub aadhaar_document: Option<String>,
    pub address: Option<String>,
    pub skills: Option<String>,

    pub is_active: bool,

    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub total_credit: Decimal,

    pub user_id: i32,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    User,
    #[sea_orm(has_many = "super::loom::Entity")]
    Looms,
    #[sea_orm(has_many = "super::payment::Entity")]
    Payments,
}

impl Related<super::loom::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Looms.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::payment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Payments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
