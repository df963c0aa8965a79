use crate::{
    auth::{Caller, ScopePolicy},
    db::DbPool,
    entities::saree_entry::{self, Entity as SareeEntryEntity},
    errors::ServiceError,
    services::looms::LoomService,
};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info, instrument};
use validator::Validate;

#[derive(Debug, Default, Serialize, Deserialize, Validate)]
pub struct CreateSareeEntryRequest {
    pub saree_number: Option<i32>,
    pub saree_name: Option<String>,
    pub saree_image: Option<String>,
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
    pub amount_credit: Option<Decimal>,
    pub amount_debit: Option<Decimal>,
    pub date: Option<NaiveDate>,
    pub notes: Option<String>,
    #[validate(range(min = 1, max = 5, message = "Quality rating must be between 1 and 5"))]
    pub quality_rating: Option<i32>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SareeEntryResponse {
    pub id: i32,
    pub loom_id: i32,
    pub saree_number: Option<i32>,
    pub saree_name: Option<String>,
    pub saree_image: Option<String>,
    pub colors: Option<String>,
    /// Derived display name for the raw color value
    pub display_color: Option<String>,
    pub warp_weft: Option<String>,
    pub material: Option<String>,
    pub remarks: Option<String>,
    pub amount_credit: Decimal,
    pub amount_debit: Decimal,
    /// Derived: amount_credit - amount_debit
    pub balance: Decimal,
    pub date: Option<NaiveDate>,
    pub completion_date: Option<NaiveDate>,
    pub is_completed: bool,
    pub notes: Option<String>,
    pub quality_rating: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Service owning per-loom saree production entries.
///
/// Remaining capacity is always derived at read time from the entry
/// count; no hard cap is enforced at insert time. The counter is
/// informational, not a quota.
#[derive(Clone)]
pub struct ProductionService {
    db: Arc<DbPool>,
    looms: LoomService,
}

impl ProductionService {
    pub fn new(db: Arc<DbPool>) -> Self {
        let looms = LoomService::new(db.clone());
        Self { db, looms }
    }

    /// Adds a saree entry under a scoped loom.
    #[instrument(skip(self, request), fields(loom_id = loom_id))]
    pub async fn add_saree_entry(
        &self,
        caller: &Caller,
        loom_id: i32,
        request: CreateSareeEntryRequest,
    ) -> Result<SareeEntryResponse, ServiceError> {
        let policy = ScopePolicy::for_caller(caller)?;
        request.validate()?;
        self.looms.find_scoped_loom(&policy, loom_id).await?;

        let now = Utc::now();
        let model = saree_entry::ActiveModel {
            saree_number: Set(request.saree_number),
            saree_name: Set(request.saree_name),
            saree_image: Set(request.saree_image),
            colors: Set(request.colors),
            warp_weft: Set(request.warp_weft),
            material: Set(request.material),
            remarks: Set(request.remarks),
            border_color: Set(request.border_color),
            border_hex: Set(request.border_hex),
            body_color: Set(request.body_color),
            body_hex: Set(request.body_hex),
            meena_a: Set(request.meena_a),
            meena_a_hex: Set(request.meena_a_hex),
            meena_b: Set(request.meena_b),
            meena_b_hex: Set(request.meena_b_hex),
            meena_c: Set(request.meena_c),
            meena_c_hex: Set(request.meena_c_hex),
            meena_d: Set(request.meena_d),
            meena_d_hex: Set(request.meena_d_hex),
            amount_credit: Set(request.amount_credit.unwrap_or(Decimal::ZERO)),
            amount_debit: Set(request.amount_debit.unwrap_or(Decimal::ZERO)),
            date: Set(Some(
                request.date.unwrap_or_else(|| now.date_naive()),
            )),
            completion_date: Set(None),
            is_completed: Set(false),
            notes: Set(request.notes),
            quality_rating: Set(request.quality_rating),
            loom_id: Set(loom_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&*self.db)
        .await
        .map_err(|e| {
            error!(error = %e, loom_id, "Failed to insert saree entry");
            ServiceError::DatabaseError(e)
        })?;

        info!(entry_id = model.id, loom_id, "Saree entry added");

        Ok(model_to_response(model))
    }

    /// Marks an entry completed, stamping the completion date.
    #[instrument(skip(self), fields(entry_id = entry_id))]
    pub async fn mark_complete(
        &self,
        caller: &Caller,
        entry_id: i32,
        completion_date: Option<NaiveDate>,
    ) -> Result<SareeEntryResponse, ServiceError> {
        let policy = ScopePolicy::for_caller(caller)?;
        let entry = self.find_scoped_entry(&policy, entry_id).await?;

        let mut active: saree_entry::ActiveModel = entry.into();
        active.is_completed = Set(true);
        active.completion_date = Set(Some(
            completion_date.unwrap_or_else(|| Utc::now().date_naive()),
        ));
        active.updated_at = Set(Utc::now());

        let updated = active.update(&*self.db).await.map_err(|e| {
            error!(error = %e, entry_id, "Failed to mark saree entry complete");
            ServiceError::DatabaseError(e)
        })?;

        info!(entry_id, "Saree entry marked complete");

        Ok(model_to_response(updated))
    }

    /// Lists entries of a scoped loom, oldest first.
    #[instrument(skip(self), fields(loom_id = loom_id))]
    pub async fn list_entries(
        &self,
        caller: &Caller,
        loom_id: i32,
    ) -> Result<Vec<SareeEntryResponse>, ServiceError> {
        let policy = ScopePolicy::for_caller(caller)?;
        self.looms.find_scoped_loom(&policy, loom_id).await?;

        let entries = SareeEntryEntity::find()
            .filter(saree_entry::Column::LoomId.eq(loom_id))
            .order_by_asc(saree_entry::Column::Id)
            .all(&*self.db)
            .await
            .map_err(|e| {
                error!(error = %e, loom_id, "Failed to list saree entries");
                ServiceError::DatabaseError(e)
            })?;

        Ok(entries.into_iter().map(model_to_response).collect())
    }

    /// Deletes a single entry.
    #[instrument(skip(self), fields(entry_id = entry_id))]
    pub async fn delete_entry(&self, caller: &Caller, entry_id: i32) -> Result<(), ServiceError> {
        let policy = ScopePolicy::for_caller(caller)?;
        let entry = self.find_scoped_entry(&policy, entry_id).await?;

        SareeEntryEntity::delete_by_id(entry.id)
            .exec(&*self.db)
            .await
            .map_err(ServiceError::DatabaseError)?;

        info!(entry_id, "Saree entry deleted");
        Ok(())
    }

    /// Fetches an entry whose owning loom the caller may see. Absent
    /// and invisible rows get the same NotFound.
    async fn find_scoped_entry(
        &self,
        policy: &ScopePolicy,
        entry_id: i32,
    ) -> Result<saree_entry::Model, ServiceError> {
        let entry = SareeEntryEntity::find_by_id(entry_id)
            .one(&*self.db)
            .await
            .map_err(ServiceError::DatabaseError)?
            .ok_or_else(|| ServiceError::NotFound("Saree entry not found".to_string()))?;

        self.looms
            .find_scoped_loom(policy, entry.loom_id)
            .await
            .map_err(|_| ServiceError::NotFound("Saree entry not found".to_string()))?;

        Ok(entry)
    }
}

fn model_to_response(model: saree_entry::Model) -> SareeEntryResponse {
    let balance = model.balance();
    let display_color = model.display_color();

    SareeEntryResponse {
        id: model.id,
        loom_id: model.loom_id,
        saree_number: model.saree_number,
        saree_name: model.saree_name,
        saree_image: model.saree_image,
        colors: model.colors,
        display_color,
        warp_weft: model.warp_weft,
        material: model.material,
        remarks: model.remarks,
        amount_credit: model.amount_credit,
        amount_debit: model.amount_debit,
        balance,
        date: model.date,
        completion_date: model.completion_date,
        is_completed: model.is_completed,
        notes: model.notes,
        quality_rating: model.quality_rating,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}
