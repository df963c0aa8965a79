use crate::{
    auth::{Caller, ScopePolicy},
    db::DbPool,
    entities::weaver::{self, Entity as WeaverEntity},
    errors::ServiceError,
};
use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info, instrument};
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CreateWeaverRequest {
    #[validate(length(min = 1, max = 100, message = "Weaver name is required"))]
    pub name: String,
    #[validate(length(min = 1, max = 15, message = "Phone number is required"))]
    pub phone: String,
    pub address: Option<String>,
    pub skills: Option<String>,
    pub account_number: Option<String>,
    pub ifsc_code: Option<String>,
    pub account_type: Option<String>,
    pub name_in_bank: Option<String>,
    /// Blob-store reference produced by the upload layer
    pub aadhaar_document: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct UpdateWeaverRequest {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub skills: Option<String>,
    pub account_number: Option<String>,
    pub ifsc_code: Option<String>,
    pub account_type: Option<String>,
    pub name_in_bank: Option<String>,
    pub aadhaar_document: Option<String>,
    pub is_active: Option<bool>,
}

/// Service owning weaver records.
///
/// The aadhaar document itself lives in the external blob store; this
/// service only tracks its reference. Removing the blob on delete is
/// the upload layer's job.
#[derive(Clone)]
pub struct WeaverService {
    db: Arc<DbPool>,
}

impl WeaverService {
    pub fn new(db: Arc<DbPool>) -> Self {
        Self { db }
    }

    #[instrument(skip(self, request), fields(name = %request.name))]
    pub async fn create_weaver(
        &self,
        caller: &Caller,
        request: CreateWeaverRequest,
    ) -> Result<weaver::Model, ServiceError> {
        let policy = ScopePolicy::for_caller(caller)?;
        request.validate()?;

        let now = Utc::now();
        let model = weaver::ActiveModel {
            name: Set(request.name),
            phone: Set(request.phone),
            address: Set(request.address),
            skills: Set(request.skills),
            account_number: Set(request.account_number),
            ifsc_code: Set(request.ifsc_code),
            account_type: Set(request.account_type),
            name_in_bank: Set(request.name_in_bank),
            aadhaar_document: Set(request.aadhaar_document),
            is_active: Set(true),
            total_credit: Set(Decimal::ZERO),
            user_id: Set(policy.user_id()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&*self.db)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to create weaver");
            ServiceError::DatabaseError(e)
        })?;

        info!(weaver_id = model.id, "Weaver created");
        Ok(model)
    }

    #[instrument(skip(self), fields(weaver_id = id))]
    pub async fn get_weaver(&self, caller: &Caller, id: i32) -> Result<weaver::Model, ServiceError> {
        let policy = ScopePolicy::for_caller(caller)?;
        self.find_scoped_weaver(&policy, id).await
    }

    /// Lists weavers visible to the caller, newest first.
    #[instrument(skip(self))]
    pub async fn list_weavers(
        &self,
        caller: &Caller,
    ) -> Result<Vec<weaver::Model>, ServiceError> {
        let policy = ScopePolicy::for_caller(caller)?;

        let mut query = WeaverEntity::find().order_by_desc(weaver::Column::CreatedAt);
        if !policy.is_owner() {
            query = query.filter(weaver::Column::UserId.eq(policy.user_id()));
        }

        query.all(&*self.db).await.map_err(|e| {
            error!(error = %e, "Failed to list weavers");
            ServiceError::DatabaseError(e)
        })
    }

    #[instrument(skip(self, request), fields(weaver_id = id))]
    pub async fn update_weaver(
        &self,
        caller: &Caller,
        id: i32,
        request: UpdateWeaverRequest,
    ) -> Result<weaver::Model, ServiceError> {
        let policy = ScopePolicy::for_caller(caller)?;
        let weaver = self.find_scoped_weaver(&policy, id).await?;

        if let Some(name) = &request.name {
            if name.is_empty() {
                return Err(ServiceError::ValidationError(
                    "Weaver name is required".to_string(),
                ));
            }
        }
        if let Some(phone) = &request.phone {
            if phone.is_empty() {
                return Err(ServiceError::ValidationError(
                    "Phone number is required".to_string(),
                ));
            }
        }

        let mut active: weaver::ActiveModel = weaver.into();
        if let Some(name) = request.name {
            active.name = Set(name);
        }
        if let Some(phone) = request.phone {
            active.phone = Set(phone);
        }
        if let Some(address) = request.address {
            active.address = Set(Some(address));
        }
        if let Some(skills) = request.skills {
            active.skills = Set(Some(skills));
        }
        if let Some(account_number) = request.account_number {
            active.account_number = Set(Some(account_number));
        }
        if let Some(ifsc_code) = request.ifsc_code {
            active.ifsc_code = Set(Some(ifsc_code));
        }
        if let Some(account_type) = request.account_type {
            active.account_type = Set(Some(account_type));
        }
        if let Some(name_in_bank) = request.name_in_bank {
            active.name_in_bank = Set(Some(name_in_bank));
        }
        if let Some(aadhaar_document) = request.aadhaar_document {
            active.aadhaar_document = Set(Some(aadhaar_document));
        }
        if let Some(is_active) = request.is_active {
            active.is_active = Set(is_active);
        }
        active.updated_at = Set(Utc::now());

        active.update(&*self.db).await.map_err(|e| {
            error!(error = %e, weaver_id = id, "Failed to update weaver");
            ServiceError::DatabaseError(e)
        })
    }

    /// Flips the active flag.
    #[instrument(skip(self), fields(weaver_id = id))]
    pub async fn toggle_status(
        &self,
        caller: &Caller,
        id: i32,
    ) -> Result<weaver::Model, ServiceError> {
        let policy = ScopePolicy::for_caller(caller)?;
        let weaver = self.find_scoped_weaver(&policy, id).await?;

        let was_active = weaver.is_active;
        let mut active: weaver::ActiveModel = weaver.into();
        active.is_active = Set(!was_active);
        active.updated_at = Set(Utc::now());

        let updated = active.update(&*self.db).await.map_err(|e| {
            error!(error = %e, weaver_id = id, "Failed to toggle weaver status");
            ServiceError::DatabaseError(e)
        })?;

        info!(weaver_id = id, is_active = updated.is_active, "Weaver status toggled");
        Ok(updated)
    }

    #[instrument(skip(self), fields(weaver_id = id))]
    pub async fn delete_weaver(&self, caller: &Caller, id: i32) -> Result<(), ServiceError> {
        let policy = ScopePolicy::for_caller(caller)?;
        let weaver = self.find_scoped_weaver(&policy, id).await?;

        WeaverEntity::delete_by_id(weaver.id)
            .exec(&*self.db)
            .await
            .map_err(|e| {
                error!(error = %e, weaver_id = id, "Failed to delete weaver");
                ServiceError::DatabaseError(e)
            })?;

        info!(weaver_id = id, "Weaver deleted");
        Ok(())
    }

    /// Direct record access: owner bypasses, everyone else needs to own
    /// the row. Absent and invisible rows get the same NotFound.
    async fn find_scoped_weaver(
        &self,
        policy: &ScopePolicy,
        id: i32,
    ) -> Result<weaver::Model, ServiceError> {
        WeaverEntity::find_by_id(id)
            .one(&*self.db)
            .await
            .map_err(ServiceError::DatabaseError)?
            .filter(|w| policy.can_access(w.user_id))
            .ok_or_else(|| ServiceError::NotFound("Weaver not found".to_string()))
    }
}
