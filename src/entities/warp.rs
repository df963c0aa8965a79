use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Warp thread configuration attached to a loom. Data-only.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "warps")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub loom_id: i32,

    pub zari_border_left: Option<String>,
    pub zari_border_right: Option<String>,
    pub zari_body: Option<String>,
    pub silk_border_left: Option<String>,
    pub silk_border_right: Option<String>,
    pub silk_body: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::loom::Entity",
        from = "Column::LoomId",
        to = "super::loom::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Loom,
}

impl Related<super::loom::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Loom.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
