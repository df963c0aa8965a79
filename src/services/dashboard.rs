use crate::{
    auth::{Caller, ScopePolicy},
    db::DbPool,
    entities::loom::{self, LoomType},
    entities::payment,
    entities::weaver,
    errors::ServiceError,
};
use sea_orm::{
    ColumnTrait, EntityTrait, JoinType, PaginatorTrait, QueryFilter, QuerySelect, RelationTrait,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::instrument;

/// Role-scoped summary counts for the landing view.
#[derive(Debug, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub weavers: u64,
    pub payments: u64,
    pub handlooms: u64,
    pub powerlooms: u64,
    pub outside_handlooms: u64,
    pub outside_powerlooms: u64,
}

#[derive(Clone)]
pub struct DashboardService {
    db: Arc<DbPool>,
}

impl DashboardService {
    pub fn new(db: Arc<DbPool>) -> Self {
        Self { db }
    }

    /// Owner sees totals over everything; other roles see only counts
    /// over their own rows. Payments are reached through owned looms.
    #[instrument(skip(self))]
    pub async fn summary(&self, caller: &Caller) -> Result<DashboardSummary, ServiceError> {
        let policy = ScopePolicy::for_caller(caller)?;
        let db = &*self.db;

        let weavers = if policy.is_owner() {
            weaver::Entity::find().count(db).await
        } else {
            weaver::Entity::find()
                .filter(weaver::Column::UserId.eq(policy.user_id()))
                .count(db)
                .await
        }
        .map_err(ServiceError::DatabaseError)?;

        let payments = if policy.is_owner() {
            payment::Entity::find().count(db).await
        } else {
            payment::Entity::find()
                .join(JoinType::InnerJoin, payment::Relation::Loom.def())
                .filter(loom::Column::UserId.eq(policy.user_id()))
                .count(db)
                .await
        }
        .map_err(ServiceError::DatabaseError)?;

        Ok(DashboardSummary {
            weavers,
            payments,
            handlooms: self.loom_count(&policy, LoomType::Handloom).await?,
            powerlooms: self.loom_count(&policy, LoomType::Powerloom).await?,
            outside_handlooms: self.loom_count(&policy, LoomType::OutsideHandloom).await?,
            outside_powerlooms: self.loom_count(&policy, LoomType::OutsidePowerloom).await?,
        })
    }

    async fn loom_count(
        &self,
        policy: &ScopePolicy,
        loom_type: LoomType,
    ) -> Result<u64, ServiceError> {
        let mut query = loom::Entity::find().filter(loom::Column::LoomType.eq(loom_type));
        if !policy.is_owner() {
            query = query.filter(loom::Column::UserId.eq(policy.user_id()));
        }

        query
            .count(&*self.db)
            .await
            .map_err(ServiceError::DatabaseError)
    }
}
