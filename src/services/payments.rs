use crate::{
    auth::{Caller, ScopePolicy},
    db::DbPool,
    entities::loom::{self, LoomType},
    entities::payment::{self, Entity as PaymentEntity, PaymentType},
    entities::saree_entry,
    entities::weaver,
    errors::ServiceError,
    services::looms::LoomService,
};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, JoinType, QueryFilter, QueryOrder, QuerySelect,
    RelationTrait, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{error, info, instrument};

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct RecordPaymentRequest {
    pub date: Option<NaiveDate>,
    pub amount: Decimal,
    /// "credit" or "debit"
    pub payment_type: String,
    pub description: Option<String>,
    pub loom_id: Option<i32>,
    pub saree_id: Option<i32>,
    pub weaver_id: Option<i32>,
    /// Explicit bank snapshot; when absent and a weaver is referenced,
    /// the weaver's current bank details are captured instead.
    pub name_in_bank: Option<String>,
    pub account_number: Option<String>,
    pub ifsc_code: Option<String>,
    pub account_type: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentResponse {
    pub id: i32,
    pub date: NaiveDate,
    pub amount: Decimal,
    pub payment_type: PaymentType,
    pub description: Option<String>,
    pub loom_id: Option<i32>,
    pub loom_no: Option<i32>,
    pub saree_id: Option<i32>,
    pub weaver_id: Option<i32>,
    pub weaver_name: Option<String>,
    pub name_in_bank: Option<String>,
    pub account_number: Option<String>,
    pub ifsc_code: Option<String>,
    pub account_type: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Per-category payment lists for one date. Every category key is
/// always present; categories masked by the caller's role stay empty.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct CategoryPayments {
    pub handloom: Vec<PaymentResponse>,
    pub powerloom: Vec<PaymentResponse>,
    pub outside_handloom: Vec<PaymentResponse>,
    pub outside_powerloom: Vec<PaymentResponse>,
}

/// Per-category sums of raw payment amounts. Credit and debit rows both
/// add positively: the totals report money moved, not a net balance.
#[derive(Debug, Serialize, Deserialize)]
pub struct PaymentTotals {
    pub handloom: Decimal,
    pub powerloom: Decimal,
    pub outside_handloom: Decimal,
    pub outside_powerloom: Decimal,
    pub grand_total: Decimal,
}

impl Default for PaymentTotals {
    fn default() -> Self {
        Self {
            handloom: Decimal::ZERO,
            powerloom: Decimal::ZERO,
            outside_handloom: Decimal::ZERO,
            outside_powerloom: Decimal::ZERO,
            grand_total: Decimal::ZERO,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PaymentsByDateResponse {
    pub date: NaiveDate,
    pub payments: CategoryPayments,
    pub totals: PaymentTotals,
}

/// Service owning the append-oriented payment ledger.
///
/// Recording is not idempotent: resubmitting the same request creates a
/// duplicate ledger entry. Deduplication is the caller's responsibility.
#[derive(Clone)]
pub struct PaymentService {
    db: Arc<DbPool>,
    looms: LoomService,
}

impl PaymentService {
    pub fn new(db: Arc<DbPool>) -> Self {
        let looms = LoomService::new(db.clone());
        Self { db, looms }
    }

    /// Records one ledger entry in a single transaction. Requires at
    /// least one of loom, saree entry, or weaver reference; snapshots
    /// the weaver's bank details at creation time.
    #[instrument(skip(self, request), fields(payment_type = %request.payment_type))]
    pub async fn record_payment(
        &self,
        caller: &Caller,
        request: RecordPaymentRequest,
    ) -> Result<PaymentResponse, ServiceError> {
        let policy = ScopePolicy::for_caller(caller)?;

        let payment_type = PaymentType::from_name(&request.payment_type).ok_or_else(|| {
            ServiceError::ValidationError(format!(
                "invalid payment type: {}",
                request.payment_type
            ))
        })?;

        if request.amount <= Decimal::ZERO {
            return Err(ServiceError::ValidationError(
                "Amount must be positive".to_string(),
            ));
        }

        if request.loom_id.is_none() && request.saree_id.is_none() && request.weaver_id.is_none() {
            return Err(ServiceError::ValidationError(
                "payment must reference a loom, saree entry, or weaver".to_string(),
            ));
        }

        let db = &*self.db;
        let txn = db.begin().await.map_err(|e| {
            error!(error = %e, "Failed to start transaction for payment");
            ServiceError::DatabaseError(e)
        })?;

        let mut loom_no = None;
        if let Some(loom_id) = request.loom_id {
            let loom = loom::Entity::find_by_id(loom_id)
                .one(&txn)
                .await
                .map_err(ServiceError::DatabaseError)?
                .filter(|l| policy.can_see_loom(l))
                .ok_or_else(|| ServiceError::NotFound("Loom not found".to_string()))?;
            loom_no = Some(loom.loom_no);
        }

        if let Some(saree_id) = request.saree_id {
            let entry = saree_entry::Entity::find_by_id(saree_id)
                .one(&txn)
                .await
                .map_err(ServiceError::DatabaseError)?
                .ok_or_else(|| ServiceError::NotFound("Saree entry not found".to_string()))?;

            if let Some(loom_id) = request.loom_id {
                if entry.loom_id != loom_id {
                    return Err(ServiceError::ValidationError(
                        "saree entry does not belong to the referenced loom".to_string(),
                    ));
                }
            }

            let entry_loom = loom::Entity::find_by_id(entry.loom_id)
                .one(&txn)
                .await
                .map_err(ServiceError::DatabaseError)?
                .filter(|l| policy.can_see_loom(l))
                .ok_or_else(|| ServiceError::NotFound("Saree entry not found".to_string()))?;
            if loom_no.is_none() {
                loom_no = Some(entry_loom.loom_no);
            }
        }

        let mut weaver_name = None;
        let mut name_in_bank = request.name_in_bank;
        let mut account_number = request.account_number;
        let mut ifsc_code = request.ifsc_code;
        let mut account_type = request.account_type;

        if let Some(weaver_id) = request.weaver_id {
            let weaver = weaver::Entity::find_by_id(weaver_id)
                .one(&txn)
                .await
                .map_err(ServiceError::DatabaseError)?
                .filter(|w| policy.can_access(w.user_id))
                .ok_or_else(|| ServiceError::NotFound("Weaver not found".to_string()))?;

            // Snapshot the weaver's bank details unless explicitly given.
            name_in_bank = name_in_bank.or(weaver.name_in_bank);
            account_number = account_number.or(weaver.account_number);
            ifsc_code = ifsc_code.or(weaver.ifsc_code);
            account_type = account_type.or(weaver.account_type);
            weaver_name = Some(weaver.name);
        }

        let now = Utc::now();
        let model = payment::ActiveModel {
            date: Set(request.date.unwrap_or_else(|| now.date_naive())),
            amount: Set(request.amount),
            payment_type: Set(payment_type),
            description: Set(request.description),
            loom_id: Set(request.loom_id),
            saree_id: Set(request.saree_id),
            weaver_id: Set(request.weaver_id),
            name_in_bank: Set(name_in_bank),
            account_number: Set(account_number),
            ifsc_code: Set(ifsc_code),
            account_type: Set(account_type),
            created_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to insert payment");
            ServiceError::DatabaseError(e)
        })?;

        txn.commit().await.map_err(|e| {
            error!(error = %e, "Failed to commit payment transaction");
            ServiceError::DatabaseError(e)
        })?;

        info!(payment_id = model.id, amount = %model.amount, "Payment recorded");

        Ok(model_to_response(model, loom_no, weaver_name))
    }

    /// Distinct dates carrying at least one payment visible to the
    /// caller, newest first. Non-owners only see dates reachable
    /// through looms they own.
    #[instrument(skip(self))]
    pub async fn list_payment_dates(
        &self,
        caller: &Caller,
    ) -> Result<Vec<NaiveDate>, ServiceError> {
        let policy = ScopePolicy::for_caller(caller)?;
        let db = &*self.db;

        let mut query = PaymentEntity::find()
            .select_only()
            .column(payment::Column::Date)
            .distinct()
            .order_by_desc(payment::Column::Date);

        if !policy.is_owner() {
            query = query
                .join(JoinType::InnerJoin, payment::Relation::Loom.def())
                .filter(loom::Column::UserId.eq(policy.user_id()));
        }

        query
            .into_tuple::<NaiveDate>()
            .all(db)
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to list payment dates");
                ServiceError::DatabaseError(e)
            })
    }

    /// Payments of one date grouped by loom category, with per-category
    /// and grand totals. Categories outside the caller's role come back
    /// as empty lists, keeping the output shape constant. Payments
    /// without a loom reference cannot be categorized and are omitted.
    #[instrument(skip(self), fields(date = %date))]
    pub async fn payments_by_date(
        &self,
        caller: &Caller,
        date: NaiveDate,
    ) -> Result<PaymentsByDateResponse, ServiceError> {
        let policy = ScopePolicy::for_caller(caller)?;
        let db = &*self.db;

        let rows = PaymentEntity::find()
            .filter(payment::Column::Date.eq(date))
            .find_also_related(loom::Entity)
            .all(db)
            .await
            .map_err(|e| {
                error!(error = %e, date = %date, "Failed to fetch payments by date");
                ServiceError::DatabaseError(e)
            })?;

        let weaver_names = self.weaver_names(&rows).await?;

        let mut payments = CategoryPayments::default();
        let mut totals = PaymentTotals::default();

        for (row, loom) in rows {
            let Some(loom) = loom else {
                // unattached to a loom: no category to place it under
                continue;
            };

            if !policy.is_owner() && loom.user_id != policy.user_id() {
                continue;
            }
            if !policy.visible_categories().contains(&loom.loom_type) {
                continue;
            }

            let weaver_name = row
                .weaver_id
                .and_then(|id| weaver_names.get(&id).cloned());
            let response = model_to_response(row, Some(loom.loom_no), weaver_name);
            let amount = response.amount;

            match loom.loom_type {
                LoomType::Handloom => {
                    payments.handloom.push(response);
                    totals.handloom += amount;
                }
                LoomType::Powerloom => {
                    payments.powerloom.push(response);
                    totals.powerloom += amount;
                }
                LoomType::OutsideHandloom => {
                    payments.outside_handloom.push(response);
                    totals.outside_handloom += amount;
                }
                LoomType::OutsidePowerloom => {
                    payments.outside_powerloom.push(response);
                    totals.outside_powerloom += amount;
                }
            }
        }

        totals.grand_total =
            totals.handloom + totals.powerloom + totals.outside_handloom + totals.outside_powerloom;

        Ok(PaymentsByDateResponse {
            date,
            payments,
            totals,
        })
    }

    /// Payments recorded against one scoped loom, newest first.
    #[instrument(skip(self), fields(loom_id = loom_id))]
    pub async fn list_loom_payments(
        &self,
        caller: &Caller,
        loom_id: i32,
    ) -> Result<Vec<PaymentResponse>, ServiceError> {
        let policy = ScopePolicy::for_caller(caller)?;
        let loom = self.looms.find_scoped_loom(&policy, loom_id).await?;

        let rows = PaymentEntity::find()
            .filter(payment::Column::LoomId.eq(loom_id))
            .order_by_desc(payment::Column::Date)
            .all(&*self.db)
            .await
            .map_err(ServiceError::DatabaseError)?;

        let rows: Vec<(payment::Model, Option<loom::Model>)> =
            rows.into_iter().map(|p| (p, None)).collect();
        let weaver_names = self.weaver_names(&rows).await?;

        Ok(rows
            .into_iter()
            .map(|(row, _)| {
                let weaver_name = row
                    .weaver_id
                    .and_then(|id| weaver_names.get(&id).cloned());
                model_to_response(row, Some(loom.loom_no), weaver_name)
            })
            .collect())
    }

    /// One batched lookup of weaver display names for a payment set.
    async fn weaver_names(
        &self,
        rows: &[(payment::Model, Option<loom::Model>)],
    ) -> Result<HashMap<i32, String>, ServiceError> {
        let mut ids: Vec<i32> = rows.iter().filter_map(|(p, _)| p.weaver_id).collect();
        ids.sort_unstable();
        ids.dedup();

        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let weavers = weaver::Entity::find()
            .filter(weaver::Column::Id.is_in(ids))
            .all(&*self.db)
            .await
            .map_err(ServiceError::DatabaseError)?;

        Ok(weavers.into_iter().map(|w| (w.id, w.name)).collect())
    }
}

fn model_to_response(
    model: payment::Model,
    loom_no: Option<i32>,
    weaver_name: Option<String>,
) -> PaymentResponse {
    PaymentResponse {
        id: model.id,
        date: model.date,
        amount: model.amount,
        payment_type: model.payment_type,
        description: model.description,
        loom_id: model.loom_id,
        loom_no,
        saree_id: model.saree_id,
        weaver_id: model.weaver_id,
        weaver_name,
        name_in_bank: model.name_in_bank,
        account_number: model.account_number,
        ifsc_code: model.ifsc_code,
        account_type: model.account_type,
        created_at: model.created_at,
    }
}
