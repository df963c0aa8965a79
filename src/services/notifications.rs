use crate::{
    db::DbPool,
    entities::{loom, saree_entry},
    errors::ServiceError,
};
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, instrument};

/// Alert emitted when a loom is two sarees away from finishing its warp.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WarpAlert {
    pub loom_id: i32,
    pub loom_no: i32,
    pub message: String,
}

/// Scans looms and emits near-completion alerts.
///
/// The threshold is a single point: an alert fires only when exactly 2
/// sarees remain, as the count crosses from 3 to 2. It does not re-fire
/// at 1 or 0. Nothing is persisted; every call recomputes from scratch,
/// so polling is safe and idempotent.
#[derive(Clone)]
pub struct NotificationService {
    db: Arc<DbPool>,
}

impl NotificationService {
    pub fn new(db: Arc<DbPool>) -> Self {
        Self { db }
    }

    /// Evaluates every loom. This is a global operational alert feed,
    /// not a per-user view.
    #[instrument(skip(self))]
    pub async fn get_notifications(&self) -> Result<Vec<WarpAlert>, ServiceError> {
        let db = &*self.db;

        let looms = loom::Entity::find()
            .all(db)
            .await
            .map_err(ServiceError::DatabaseError)?;

        let mut alerts = Vec::new();
        for loom in looms {
            let added = saree_entry::Entity::find()
                .filter(saree_entry::Column::LoomId.eq(loom.id))
                .count(db)
                .await
                .map_err(ServiceError::DatabaseError)?;

            // raw subtraction, not the clamped display value
            let remaining = i64::from(loom.num_sarees) - added as i64;

            if remaining == 2 {
                alerts.push(WarpAlert {
                    loom_id: loom.id,
                    loom_no: loom.loom_no,
                    message: format!(
                        "Loom {} needs a new warp — only {} sarees remaining!",
                        loom.loom_no, remaining
                    ),
                });
            }
        }

        debug!(count = alerts.len(), "Warp alerts evaluated");
        Ok(alerts)
    }
}
