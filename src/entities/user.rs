use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Minimal identity row backing ownership foreign keys. Authentication
/// itself lives in the external credential store; this table only anchors
/// `user_id` references and carries the assigned role string.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(unique)]
    pub username: String,
    #[sea_orm(unique)]
    pub email: String,

    pub role: String,

    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::loom::Entity")]
    Looms,
    #[sea_orm(has_many = "super::weaver::Entity")]
    Weavers,
}

impl Related<super::loom::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Looms.def()
    }
}

impl Related<super::weaver::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Weavers.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
