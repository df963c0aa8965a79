use crate::{
    auth::{Caller, ScopePolicy},
    db::DbPool,
    entities::loom::{self, Entity as LoomEntity, LoomType},
    entities::saree_entry,
    entities::warp,
    entities::warp_color,
    entities::weaver,
    entities::weft,
    entities::weft_color,
    errors::ServiceError,
};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info, instrument, warn};
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CreateLoomRequest {
    pub loom_no: i32,
    /// Must match the loom type enumeration exactly (case-sensitive)
    pub loom_type: String,
    #[validate(range(min = 0, message = "Planned saree count cannot be negative"))]
    pub num_sarees: i32,
    pub date: Option<NaiveDate>,
    pub saree_type: Option<String>,
    pub saree_name: Option<String>,
    pub weaver_id: Option<i32>,
    /// Owning user; defaults to the caller. Only the owner role may
    /// assign looms to other users.
    pub user_id: Option<i32>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct UpdateLoomRequest {
    pub loom_no: Option<i32>,
    pub num_sarees: Option<i32>,
    pub date: Option<NaiveDate>,
    pub saree_type: Option<String>,
    pub saree_name: Option<String>,
    pub weaver_id: Option<i32>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoomResponse {
    pub id: i32,
    pub loom_no: i32,
    pub date: Option<NaiveDate>,
    pub loom_type: LoomType,
    pub num_sarees: i32,
    pub saree_type: Option<String>,
    pub saree_name: Option<String>,
    pub weaver_id: Option<i32>,
    pub weaver_name: Option<String>,
    pub amount_credit: Decimal,
    pub amount_debit: Decimal,
    /// Derived: amount_credit - amount_debit
    pub balance: Decimal,
    /// Derived: max(num_sarees - entry count, 0)
    pub remaining_sarees: i64,
    pub user_id: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct WarpConfigRequest {
    pub zari_border_left: Option<String>,
    pub zari_border_right: Option<String>,
    pub zari_body: Option<String>,
    pub silk_border_left: Option<String>,
    pub silk_border_right: Option<String>,
    pub silk_body: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct WeftConfigRequest {
    pub date: Option<NaiveDate>,
    pub zari: Option<String>,
    pub silk: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ColorConfigRequest {
    pub border_color: Option<String>,
    pub body_color: Option<String>,
}

/// Service owning loom records and their structural sub-records.
#[derive(Clone)]
pub struct LoomService {
    db: Arc<DbPool>,
}

impl LoomService {
    pub fn new(db: Arc<DbPool>) -> Self {
        Self { db }
    }

    /// Creates a new loom with zero opening credit/debit.
    #[instrument(skip(self, request), fields(loom_no = request.loom_no, loom_type = %request.loom_type))]
    pub async fn create_loom(
        &self,
        caller: &Caller,
        request: CreateLoomRequest,
    ) -> Result<LoomResponse, ServiceError> {
        let policy = ScopePolicy::for_caller(caller)?;
        request.validate()?;

        let loom_type = LoomType::from_name(&request.loom_type).ok_or_else(|| {
            ServiceError::ValidationError(format!("unknown loom type: {}", request.loom_type))
        })?;

        let owner_id = request.user_id.unwrap_or(policy.user_id());
        if !policy.is_owner() && owner_id != policy.user_id() {
            return Err(ServiceError::AuthorizationError(
                "cannot assign a loom to another user".to_string(),
            ));
        }

        let db = &*self.db;

        // Resolve the assigned weaver up front so the denormalized name
        // is captured at creation time.
        let weaver_name = match request.weaver_id {
            Some(weaver_id) => {
                let weaver = weaver::Entity::find_by_id(weaver_id)
                    .one(db)
                    .await
                    .map_err(|e| {
                        error!(error = %e, weaver_id, "Failed to fetch weaver for loom creation");
                        ServiceError::DatabaseError(e)
                    })?
                    .filter(|w| policy.can_access(w.user_id))
                    .ok_or_else(|| ServiceError::NotFound("Weaver not found".to_string()))?;
                Some(weaver.name)
            }
            None => None,
        };

        let now = Utc::now();
        let model = loom::ActiveModel {
            loom_no: Set(request.loom_no),
            date: Set(Some(
                request.date.unwrap_or_else(|| now.date_naive()),
            )),
            loom_type: Set(loom_type),
            num_sarees: Set(request.num_sarees),
            saree_type: Set(request.saree_type),
            saree_name: Set(request.saree_name),
            weaver_name: Set(weaver_name),
            weaver_id: Set(request.weaver_id),
            amount_credit: Set(Decimal::ZERO),
            amount_debit: Set(Decimal::ZERO),
            user_id: Set(owner_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(db)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to create loom");
            ServiceError::DatabaseError(e)
        })?;

        info!(loom_id = model.id, user_id = owner_id, "Loom created");

        Ok(model_to_response(model, 0))
    }

    /// Retrieves one loom with its derived balance and remaining capacity.
    #[instrument(skip(self), fields(loom_id = id))]
    pub async fn get_loom(&self, caller: &Caller, id: i32) -> Result<LoomResponse, ServiceError> {
        let policy = ScopePolicy::for_caller(caller)?;
        let loom = self.find_scoped_loom(&policy, id).await?;
        let entry_count = self.entry_count(id).await?;

        Ok(model_to_response(loom, entry_count))
    }

    /// Lists looms visible to the caller, newest first.
    #[instrument(skip(self))]
    pub async fn list_looms(&self, caller: &Caller) -> Result<Vec<LoomResponse>, ServiceError> {
        let policy = ScopePolicy::for_caller(caller)?;
        let db = &*self.db;

        let mut query = LoomEntity::find().order_by_desc(loom::Column::CreatedAt);
        if !policy.is_owner() {
            query = query
                .filter(loom::Column::UserId.eq(policy.user_id()))
                .filter(
                    loom::Column::LoomType.is_in(policy.visible_categories().iter().copied()),
                );
        }

        let looms = query.all(db).await.map_err(|e| {
            error!(error = %e, "Failed to list looms");
            ServiceError::DatabaseError(e)
        })?;

        let mut responses = Vec::with_capacity(looms.len());
        for loom in looms {
            let entry_count = self.entry_count(loom.id).await?;
            responses.push(model_to_response(loom, entry_count));
        }

        Ok(responses)
    }

    /// Updates mutable loom fields. Ownership is immutable post-creation.
    #[instrument(skip(self, request), fields(loom_id = id))]
    pub async fn update_loom(
        &self,
        caller: &Caller,
        id: i32,
        request: UpdateLoomRequest,
    ) -> Result<LoomResponse, ServiceError> {
        let policy = ScopePolicy::for_caller(caller)?;
        let loom = self.find_scoped_loom(&policy, id).await?;
        let db = &*self.db;

        if let Some(num_sarees) = request.num_sarees {
            if num_sarees < 0 {
                return Err(ServiceError::ValidationError(
                    "Planned saree count cannot be negative".to_string(),
                ));
            }
        }

        let weaver_name = match request.weaver_id {
            Some(weaver_id) => {
                let weaver = weaver::Entity::find_by_id(weaver_id)
                    .one(db)
                    .await
                    .map_err(ServiceError::DatabaseError)?
                    .filter(|w| policy.can_access(w.user_id))
                    .ok_or_else(|| ServiceError::NotFound("Weaver not found".to_string()))?;
                Some(weaver.name)
            }
            None => None,
        };

        let mut active: loom::ActiveModel = loom.into();
        if let Some(loom_no) = request.loom_no {
            active.loom_no = Set(loom_no);
        }
        if let Some(num_sarees) = request.num_sarees {
            active.num_sarees = Set(num_sarees);
        }
        if let Some(date) = request.date {
            active.date = Set(Some(date));
        }
        if let Some(saree_type) = request.saree_type {
            active.saree_type = Set(Some(saree_type));
        }
        if let Some(saree_name) = request.saree_name {
            active.saree_name = Set(Some(saree_name));
        }
        if let Some(weaver_id) = request.weaver_id {
            active.weaver_id = Set(Some(weaver_id));
            active.weaver_name = Set(weaver_name);
        }
        active.updated_at = Set(Utc::now());

        let updated = active.update(db).await.map_err(|e| {
            error!(error = %e, loom_id = id, "Failed to update loom");
            ServiceError::DatabaseError(e)
        })?;

        let entry_count = self.entry_count(id).await?;
        Ok(model_to_response(updated, entry_count))
    }

    /// Deletes a loom and all of its sub-records in one transaction:
    /// payments, saree entries, warp/weft and color configs.
    #[instrument(skip(self), fields(loom_id = id))]
    pub async fn delete_loom(&self, caller: &Caller, id: i32) -> Result<(), ServiceError> {
        let policy = ScopePolicy::for_caller(caller)?;
        let loom = self.find_scoped_loom(&policy, id).await?;
        let db = &*self.db;

        let txn = db.begin().await.map_err(|e| {
            error!(error = %e, loom_id = id, "Failed to start transaction for loom deletion");
            ServiceError::DatabaseError(e)
        })?;

        use crate::entities::payment;

        payment::Entity::delete_many()
            .filter(payment::Column::LoomId.eq(id))
            .exec(&txn)
            .await
            .map_err(ServiceError::DatabaseError)?;
        saree_entry::Entity::delete_many()
            .filter(saree_entry::Column::LoomId.eq(id))
            .exec(&txn)
            .await
            .map_err(ServiceError::DatabaseError)?;
        warp::Entity::delete_many()
            .filter(warp::Column::LoomId.eq(id))
            .exec(&txn)
            .await
            .map_err(ServiceError::DatabaseError)?;
        weft::Entity::delete_many()
            .filter(weft::Column::LoomId.eq(id))
            .exec(&txn)
            .await
            .map_err(ServiceError::DatabaseError)?;
        warp_color::Entity::delete_many()
            .filter(warp_color::Column::LoomId.eq(id))
            .exec(&txn)
            .await
            .map_err(ServiceError::DatabaseError)?;
        weft_color::Entity::delete_many()
            .filter(weft_color::Column::LoomId.eq(id))
            .exec(&txn)
            .await
            .map_err(ServiceError::DatabaseError)?;

        loom::Entity::delete_by_id(loom.id)
            .exec(&txn)
            .await
            .map_err(ServiceError::DatabaseError)?;

        txn.commit().await.map_err(|e| {
            error!(error = %e, loom_id = id, "Failed to commit loom deletion");
            ServiceError::DatabaseError(e)
        })?;

        info!(loom_id = id, "Loom deleted with all sub-records");
        Ok(())
    }

    /// Attaches a warp configuration to a scoped loom.
    #[instrument(skip(self, request), fields(loom_id = loom_id))]
    pub async fn add_warp(
        &self,
        caller: &Caller,
        loom_id: i32,
        request: WarpConfigRequest,
    ) -> Result<warp::Model, ServiceError> {
        let policy = ScopePolicy::for_caller(caller)?;
        self.find_scoped_loom(&policy, loom_id).await?;

        warp::ActiveModel {
            loom_id: Set(loom_id),
            zari_border_left: Set(request.zari_border_left),
            zari_border_right: Set(request.zari_border_right),
            zari_body: Set(request.zari_body),
            silk_border_left: Set(request.silk_border_left),
            silk_border_right: Set(request.silk_border_right),
            silk_body: Set(request.silk_body),
            ..Default::default()
        }
        .insert(&*self.db)
        .await
        .map_err(ServiceError::DatabaseError)
    }

    pub async fn list_warps(
        &self,
        caller: &Caller,
        loom_id: i32,
    ) -> Result<Vec<warp::Model>, ServiceError> {
        let policy = ScopePolicy::for_caller(caller)?;
        self.find_scoped_loom(&policy, loom_id).await?;

        warp::Entity::find()
            .filter(warp::Column::LoomId.eq(loom_id))
            .all(&*self.db)
            .await
            .map_err(ServiceError::DatabaseError)
    }

    /// Attaches a weft configuration to a scoped loom.
    #[instrument(skip(self, request), fields(loom_id = loom_id))]
    pub async fn add_weft(
        &self,
        caller: &Caller,
        loom_id: i32,
        request: WeftConfigRequest,
    ) -> Result<weft::Model, ServiceError> {
        let policy = ScopePolicy::for_caller(caller)?;
        self.find_scoped_loom(&policy, loom_id).await?;

        weft::ActiveModel {
            loom_id: Set(loom_id),
            date: Set(Some(
                request.date.unwrap_or_else(|| Utc::now().date_naive()),
            )),
            zari: Set(request.zari),
            silk: Set(request.silk),
            ..Default::default()
        }
        .insert(&*self.db)
        .await
        .map_err(ServiceError::DatabaseError)
    }

    pub async fn list_wefts(
        &self,
        caller: &Caller,
        loom_id: i32,
    ) -> Result<Vec<weft::Model>, ServiceError> {
        let policy = ScopePolicy::for_caller(caller)?;
        self.find_scoped_loom(&policy, loom_id).await?;

        weft::Entity::find()
            .filter(weft::Column::LoomId.eq(loom_id))
            .all(&*self.db)
            .await
            .map_err(ServiceError::DatabaseError)
    }

    #[instrument(skip(self, request), fields(loom_id = loom_id))]
    pub async fn add_warp_color(
        &self,
        caller: &Caller,
        loom_id: i32,
        request: ColorConfigRequest,
    ) -> Result<warp_color::Model, ServiceError> {
        let policy = ScopePolicy::for_caller(caller)?;
        self.find_scoped_loom(&policy, loom_id).await?;

        warp_color::ActiveModel {
            loom_id: Set(loom_id),
            border_color: Set(request.border_color),
            body_color: Set(request.body_color),
            ..Default::default()
        }
        .insert(&*self.db)
        .await
        .map_err(ServiceError::DatabaseError)
    }

    pub async fn list_warp_colors(
        &self,
        caller: &Caller,
        loom_id: i32,
    ) -> Result<Vec<warp_color::Model>, ServiceError> {
        let policy = ScopePolicy::for_caller(caller)?;
        self.find_scoped_loom(&policy, loom_id).await?;

        warp_color::Entity::find()
            .filter(warp_color::Column::LoomId.eq(loom_id))
            .all(&*self.db)
            .await
            .map_err(ServiceError::DatabaseError)
    }

    #[instrument(skip(self, request), fields(loom_id = loom_id))]
    pub async fn add_weft_color(
        &self,
        caller: &Caller,
        loom_id: i32,
        request: ColorConfigRequest,
    ) -> Result<weft_color::Model, ServiceError> {
        let policy = ScopePolicy::for_caller(caller)?;
        self.find_scoped_loom(&policy, loom_id).await?;

        weft_color::ActiveModel {
            loom_id: Set(loom_id),
            border_color: Set(request.border_color),
            body_color: Set(request.body_color),
            ..Default::default()
        }
        .insert(&*self.db)
        .await
        .map_err(ServiceError::DatabaseError)
    }

    pub async fn list_weft_colors(
        &self,
        caller: &Caller,
        loom_id: i32,
    ) -> Result<Vec<weft_color::Model>, ServiceError> {
        let policy = ScopePolicy::for_caller(caller)?;
        self.find_scoped_loom(&policy, loom_id).await?;

        weft_color::Entity::find()
            .filter(weft_color::Column::LoomId.eq(loom_id))
            .all(&*self.db)
            .await
            .map_err(ServiceError::DatabaseError)
    }

    /// Fetches a loom the caller may see. Absent and invisible rows get
    /// the same NotFound so non-owners cannot probe for existence.
    pub(crate) async fn find_scoped_loom(
        &self,
        policy: &ScopePolicy,
        id: i32,
    ) -> Result<loom::Model, ServiceError> {
        let loom = LoomEntity::find_by_id(id)
            .one(&*self.db)
            .await
            .map_err(|e| {
                error!(error = %e, loom_id = id, "Failed to fetch loom");
                ServiceError::DatabaseError(e)
            })?;

        match loom {
            Some(loom) if policy.can_see_loom(&loom) => Ok(loom),
            Some(_) => {
                warn!(loom_id = id, user_id = policy.user_id(), "Loom access denied");
                Err(ServiceError::NotFound("Loom not found".to_string()))
            }
            None => Err(ServiceError::NotFound("Loom not found".to_string())),
        }
    }

    pub(crate) async fn entry_count(&self, loom_id: i32) -> Result<u64, ServiceError> {
        saree_entry::Entity::find()
            .filter(saree_entry::Column::LoomId.eq(loom_id))
            .count(&*self.db)
            .await
            .map_err(ServiceError::DatabaseError)
    }
}

/// Converts a loom model to its response form with derived fields.
fn model_to_response(model: loom::Model, entry_count: u64) -> LoomResponse {
    let balance = model.balance();
    let remaining_sarees = model.remaining_sarees(entry_count);

    LoomResponse {
        id: model.id,
        loom_no: model.loom_no,
        date: model.date,
        loom_type: model.loom_type,
        num_sarees: model.num_sarees,
        saree_type: model.saree_type,
        saree_name: model.saree_name,
        weaver_id: model.weaver_id,
        weaver_name: model.weaver_name,
        amount_credit: model.amount_credit,
        amount_debit: model.amount_debit,
        balance,
        remaining_sarees,
        user_id: model.user_id,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}
