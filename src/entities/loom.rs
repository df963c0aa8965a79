use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Loom category. Stored as an exact, case-sensitive string so that
/// category filtering and role scoping match on equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(50))")]
pub enum LoomType {
    #[sea_orm(string_value = "Handloom")]
    Handloom,
    #[sea_orm(string_value = "Powerloom")]
    Powerloom,
    #[sea_orm(string_value = "OutsideHandloom")]
    OutsideHandloom,
    #[sea_orm(string_value = "OutsidePowerloom")]
    OutsidePowerloom,
}

impl LoomType {
    pub const ALL: [LoomType; 4] = [
        LoomType::Handloom,
        LoomType::Powerloom,
        LoomType::OutsideHandloom,
        LoomType::OutsidePowerloom,
    ];

    /// Exact-match parse against the fixed enumeration. Case-sensitive.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Handloom" => Some(LoomType::Handloom),
            "Powerloom" => Some(LoomType::Powerloom),
            "OutsideHandloom" => Some(LoomType::OutsideHandloom),
            "OutsidePowerloom" => Some(LoomType::OutsidePowerloom),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LoomType::Handloom => "Handloom",
            LoomType::Powerloom => "Powerloom",
            LoomType::OutsideHandloom => "OutsideHandloom",
            LoomType::OutsidePowerloom => "OutsidePowerloom",
        }
    }
}

/// A physical weaving unit tracked as a production and billing entity.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "looms")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub loom_no: i32,

    /// Assignment date
    pub date: Option<NaiveDate>,

    pub loom_type: LoomType,

    /// Planned saree count for the current warp
    pub num_sarees: i32,

    pub saree_type: Option<String>,
    pub saree_name: Option<String>,

    /// Denormalized display name of the assigned weaver
    pub weaver_name: Option<String>,
    pub weaver_id: Option<i32>,

    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub amount_credit: Decimal,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub amount_debit: Decimal,

    pub user_id: i32,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::weaver::Entity",
        from = "Column::WeaverId",
        to = "super::weaver::Column::Id",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    Weaver,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    User,
    #[sea_orm(has_many = "super::warp::Entity")]
    Warps,
    #[sea_orm(has_many = "super::weft::Entity")]
    Wefts,
    #[sea_orm(has_many = "super::warp_color::Entity")]
    WarpColors,
    #[sea_orm(has_many = "super::weft_color::Entity")]
    WeftColors,
    #[sea_orm(has_many = "super::saree_entry::Entity")]
    SareeEntries,
    #[sea_orm(has_many = "super::payment::Entity")]
    Payments,
}

impl Related<super::weaver::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Weaver.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::warp::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Warps.def()
    }
}

impl Related<super::weft::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Wefts.def()
    }
}

impl Related<super::warp_color::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::WarpColors.def()
    }
}

impl Related<super::weft_color::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::WeftColors.def()
    }
}

impl Related<super::saree_entry::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SareeEntries.def()
    }
}

impl Related<super::payment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Payments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Net balance = total credit - debit. Exact decimal arithmetic,
    /// computed at read time, never stored.
    pub fn balance(&self) -> Decimal {
        self.amount_credit - self.amount_debit
    }

    /// How many sarees are still left to be added, given the current
    /// entry count. Clamped at zero: over-insertion past `num_sarees`
    /// is permitted and the counter is informational only.
    pub fn remaining_sarees(&self, entry_count: u64) -> i64 {
        (i64::from(self.num_sarees) - entry_count as i64).max(0)
    }
}
