use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::color::resolve_color_display;

/// One saree's production and payment record within a loom.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "saree_entries")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub saree_number: Option<i32>,
    pub saree_name: Option<String>,

    /// Blob-store reference for the uploaded saree image
    pub saree_image: Option<String>,

    /// Free text, `#RRGGBB`, or `"r,g,b"`; resolved to a display name at read time
    pub colors: Option<String>,
    pub warp_weft: Option<String>,
    pub material: Option<String>,
    pub remarks: Option<String>,

    pub border_color: Option<String>,
    pub border_hex: Option<String>,
    pub body_color: Option<String>,
    pub body_hex: Option<String>,

    pub meena_a: Option<String>,
    pub meena_a_hex: Option<String>,
    pub meena_b: Option<String>,
    pub meena_b_hex: Option<String>,
    pub meena_c: Option<String>,
    pub meena_c_hex: Option<String>,
    pub meena_d: Option<String>,
    pub meena_d_hex: Option<String>,

    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub amount_credit: Decimal,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub amount_debit: Decimal,

    /// Production date
    pub date: Option<NaiveDate>,
    pub completion_date: Option<NaiveDate>,
    pub is_completed: bool,
    pub notes: Option<String>,
    pub quality_rating: Option<i32>,

    /// Immutable after creation
    pub loom_id: i32,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
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
    #[sea_orm(has_many = "super::payment::Entity")]
    Payments,
}

impl Related<super::loom::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Loom.def()
    }
}

impl Related<super::payment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Payments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn balance(&self) -> Decimal {
        self.amount_credit - self.amount_debit
    }

    /// Human-readable color name derived from the raw `colors` value.
    pub fn display_color(&self) -> Option<String> {
        self.colors.as_deref().map(resolve_color_display)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn entry(colors: Option<&str>) -> Model {
        let now = Utc::now();
        Model {
            id: 1,
            saree_number: Some(1),
            saree_name: None,
            saree_image: None,
            colors: colors.map(str::to_string),
            warp_weft: None,
            material: None,
            remarks: None,
            border_color: None,
            border_hex: None,
            body_color: None,
            body_hex: None,
            meena_a: None,
            meena_a_hex: None,
            meena_b: None,
            meena_b_hex: None,
            meena_c: None,
            meena_c_hex: None,
            meena_d: None,
            meena_d_hex: None,
            amount_credit: dec!(150.25),
            amount_debit: dec!(50.25),
            date: None,
            completion_date: None,
            is_completed: false,
            notes: None,
            quality_rating: None,
            loom_id: 1,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn balance_subtracts_debit_from_credit() {
        assert_eq!(entry(None).balance(), dec!(100.00));
    }

    #[test]
    fn display_color_is_none_without_colors() {
        assert_eq!(entry(None).display_color(), None);
        assert_eq!(entry(Some("#FF0000")).display_color().as_deref(), Some("red"));
    }
}
