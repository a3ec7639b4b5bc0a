use crate::auth::JwtConfig;
use std::path::Path;

/// Server configuration
///
/// Every item can be overridden through environment variables:
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | HTTP_PORT | 3000 | HTTP listen port |
/// | DATABASE_PATH | data/campus.db | SQLite database file |
/// | LOG_DIR | logs | rolling log file directory |
/// | ENVIRONMENT | development | development \| staging \| production |
/// | ADMIN_PASSWORD | (unset) | password for the seeded admin account |
/// | JWT_SECRET | (generated in dev) | token signing secret, >= 32 chars |
/// | JWT_EXPIRATION_MINUTES | 1440 | token lifetime |
///
/// # Example
///
/// ```ignore
/// DATABASE_PATH=/data/campus.db HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP API port
    pub http_port: u16,
    /// SQLite database file path
    pub database_path: String,
    /// Directory for rolling log files
    pub log_dir: String,
    /// Running environment: development | staging | production
    pub environment: String,
    /// JWT configuration
    pub jwt: JwtConfig,
    /// Password for the seeded admin account (required in production
    /// until the first account exists)
    pub admin_password: Option<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            database_path: std::env::var("DATABASE_PATH")
                .unwrap_or_else(|_| "data/campus.db".into()),
            log_dir: std::env::var("LOG_DIR").unwrap_or_else(|_| "logs".into()),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            jwt: JwtConfig::default(),
            admin_password: std::env::var("ADMIN_PASSWORD").ok(),
        }
    }

    /// Override the paths that matter in tests
    pub fn with_overrides(database_path: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.database_path = database_path.into();
        config.http_port = http_port;
        config
    }

    /// Create the directory that holds the database file
    pub fn ensure_data_dir(&self) -> std::io::Result<()> {
        if let Some(parent) = Path::new(&self.database_path).parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
