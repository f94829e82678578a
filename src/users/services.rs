use sqlx::SqlitePool;
use tracing::info;

use super::models::{CreateUserRequest, User};
use super::validators::CreateUserValidator;
use crate::auth::password::hash_password;
use crate::common::{now_timestamp, safe_email_log, ApiError, Validator};

pub struct UsersService {
    db: SqlitePool,
}

impl UsersService {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    /// Validates, hashes the password and inserts the user.
    pub async fn create_user(
        &self,
        request: CreateUserRequest,
        bcrypt_cost: u32,
    ) -> Result<User, ApiError> {
        CreateUserValidator.validate(&request).into_result()?;

        let email = request.email.trim().to_lowercase();
        let password_hash = hash_password(&request.password, bcrypt_cost).await?;
        let now = now_timestamp();

        let result = sqlx::query(
            r#"
            INSERT INTO users (name, email, password_hash, role, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(request.name.trim())
        .bind(&email)
        .bind(&password_hash)
        .bind(&request.role)
        .bind(&now)
        .bind(&now)
        .execute(&self.db)
        .await
        .map_err(|e| {
            if e.to_string().contains("UNIQUE constraint failed") {
                ApiError::Conflict("email already registered".to_string())
            } else {
                ApiError::DatabaseError(e)
            }
        })?;

        let id = result.last_insert_rowid();
        info!(
            user_id = id,
            email = %safe_email_log(&email),
            role = %request.role,
            "Created user"
        );

        self.get_by_id(id).await
    }

    pub async fn find_by_id(&self, user_id: i64) -> Result<Option<User>, ApiError> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
            .bind(user_id)
            .fetch_optional(&self.db)
            .await
            .map_err(ApiError::DatabaseError)
    }

    pub async fn get_by_id(&self, user_id: i64) -> Result<User, ApiError> {
        self.find_by_id(user_id)
            .await?
            .ok_or_else(|| ApiError::NotFound("user not found".to_string()))
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, ApiError> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = ?")
            .bind(email.trim().to_lowercase())
            .fetch_optional(&self.db)
            .await
            .map_err(ApiError::DatabaseError)
    }

    pub async fn get_all(&self) -> Result<Vec<User>, ApiError> {
        sqlx::query_as::<_, User>("SELECT * FROM users ORDER BY id ASC")
            .fetch_all(&self.db)
            .await
            .map_err(ApiError::DatabaseError)
    }
}
