use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Direction of a ledger entry. Stored lowercase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(10))")]
#[serde(rename_all = "lowercase")]
pub enum PaymentType {
    #[sea_orm(string_value = "credit")]
    Credit,
    #[sea_orm(string_value = "debit")]
    Debit,
}

impl PaymentType {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "credit" => Some(PaymentType::Credit),
            "debit" => Some(PaymentType::Debit),
            _ => None,
        }
    }
}

/// A ledger entry. Append-only in normal flow; removed only when the
/// owning loom is deleted.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "payments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub date: NaiveDate,

    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub amount: Decimal,

    pub payment_type: PaymentType,

    pub description: Option<String>,

    pub loom_id: Option<i32>,
    pub saree_id: Option<i32>,
    pub weaver_id: Option<i32>,

    /// Bank details captured at payment time from the referenced weaver.
    /// Independent of the weaver's current bank details, so historical
    /// payments stay accurate if those change later.
    pub name_in_bank: Option<String>,
    pub account_number: Option<String>,
    pub ifsc_code: Option<String>,
    pub account_type: Option<String>,

    pub created_at: DateTime<Utc>,
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
    #[sea_orm(
        belongs_to = "super::saree_entry::Entity",
        from = "Column::SareeId",
        to = "super::saree_entry::Column::Id",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    SareeEntry,
    #[sea_orm(
        belongs_to = "super::weaver::Entity",
        from = "Column::WeaverId",
        to = "super::weaver::Column::Id",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    Weaver,
}

impl Related<super::loom::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Loom.def()
    }
}

impl Related<super::saree_entry::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SareeEntry.def()
    }
}

impl Related<super::weaver::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Weaver.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
