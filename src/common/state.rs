// Application state shared across all modules

use chrono::Duration;
use sqlx::SqlitePool;

use super::config::AppConfig;

/// Application state containing the database pool and auth settings
#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub jwt_secret: String,
    pub token_ttl: Duration,
    pub bcrypt_cost: u32,
}

impl AppState {
    pub fn new(db: SqlitePool, config: &AppConfig) -> Self {
        Self {
            db,
            jwt_secret: config.jwt_secret.clone(),
            token_ttl: Duration::hours(config.token_ttl_hours),
            bcrypt_cost: config.bcrypt_cost,
        }
    }
}
