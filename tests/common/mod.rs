use std::sync::Arc;

use chrono::Utc;
use loomtrack_api::{
    auth::Caller,
    config::AppConfig,
    db::{self, DbPool},
    entities::user,
    AppState,
};
use sea_orm::{ActiveModelTrait, Set};

/// Helper harness for spinning up an application state backed by an
/// in-memory SQLite database.
pub struct TestApp {
    pub state: AppState,
}

impl TestApp {
    /// Construct a new test application with fresh database state.
    pub async fn new() -> Self {
        let mut cfg = AppConfig::new("sqlite::memory:", "127.0.0.1", 18_080, "test");
        // A single connection keeps the in-memory database alive and shared.
        cfg.db_max_connections = 1;
        cfg.db_min_connections = 1;

        let pool = db::establish_connection_from_app_config(&cfg)
            .await
            .expect("failed to create test database");

        db::run_migrations(&pool)
            .await
            .expect("failed to run migrations in tests");

        let state = AppState {
            db: Arc::new(pool),
            config: cfg,
        };

        Self { state }
    }

    #[allow(dead_code)]
    pub fn db(&self) -> &Arc<DbPool> {
        &self.state.db
    }

    /// Inserts an identity row and returns the matching caller context.
    #[allow(dead_code)]
    pub async fn seed_user(&self, id: i32, username: &str, role: &str) -> Caller {
        user::ActiveModel {
            id: Set(id),
            username: Set(username.to_string()),
            email: Set(format!("{}@example.com", username)),
            role: Set(role.to_string()),
            created_at: Set(Utc::now()),
        }
        .insert(&*self.state.db)
        .await
        .expect("failed to seed user");

        Caller::new(id, role)
    }
}
