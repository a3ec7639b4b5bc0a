use std::sync::Arc;

use sqlx::SqlitePool;

use crate::auth::JwtService;
use crate::core::{Config, ServerError};
use crate::db::DbService;
use crate::db::repository::user;

/// Server state shared by every handler
///
/// Cloning is shallow: the pool is an `Arc` internally and the JWT
/// service is wrapped in one.
#[derive(Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Config,
    /// Database service (SQLite pool + migrations)
    pub db: DbService,
    /// JWT token service
    pub jwt_service: Arc<JwtService>,
}

impl ServerState {
    /// Assemble a state from already-built services
    ///
    /// Most callers want [`ServerState::initialize`] instead.
    pub fn new(config: Config, db: DbService, jwt_service: Arc<JwtService>) -> Self {
        Self {
            config,
            db,
            jwt_service,
        }
    }

    /// Initialize the server state
    ///
    /// 1. Data directory for the SQLite file
    /// 2. Database pool + embedded migrations
    /// 3. JWT service from config
    /// 4. Admin account seed on an empty user table
    pub async fn initialize(config: &Config) -> Result<Self, ServerError> {
        config
            .ensure_data_dir()
            .map_err(|e| ServerError::Config(format!("Failed to create data directory: {e}")))?;

        let db = DbService::new(&config.database_path)
            .await
            .map_err(|e| ServerError::Database(e.to_string()))?;

        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));
        let state = Self::new(config.clone(), db, jwt_service);
        state.seed_admin_account().await?;

        Ok(state)
    }

    /// Seed the first admin account when the user table is empty
    async fn seed_admin_account(&self) -> Result<(), ServerError> {
        let existing = user::count(self.pool())
            .await
            .map_err(|e| ServerError::Database(e.to_string()))?;
        if existing > 0 {
            return Ok(());
        }

        let admin_password = match &self.config.admin_password {
            Some(p) => p.clone(),
            None => {
                if self.config.is_production() {
                    return Err(ServerError::Config(
                        "ADMIN_PASSWORD must be set to seed the admin account in production"
                            .to_string(),
                    ));
                }
                tracing::warn!(
                    "ADMIN_PASSWORD not set, seeding admin account with the development default"
                );
                "admin123".to_string()
            }
        };

        if let Some(admin) = user::seed_admin(self.pool(), &admin_password)
            .await
            .map_err(|e| ServerError::Database(e.to_string()))?
        {
            tracing::info!(username = %admin.username, "Seeded initial admin account");
        }
        Ok(())
    }

    /// Database pool handle
    pub fn pool(&self) -> &SqlitePool {
        &self.db.pool
    }

    /// JWT service handle
    pub fn get_jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }
}
