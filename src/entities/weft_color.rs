use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Weft color configuration attached to a loom.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "weft_colors")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub loom_id: i32,

    pub border_color: Option<String>,
    pub body_color: Option<String>,
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
