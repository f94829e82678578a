//! Authentication data models

use serde::{Deserialize, Serialize};

use crate::users::UserProfile;

/// JWT claims structure
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Claims {
    /// User id
    pub sub: String,
    pub email: String,
    pub role: String,
    pub exp: usize,
    pub iat: usize,
}

/// POST /api/v1/login body
#[derive(Deserialize, Debug)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Successful login payload
#[derive(Serialize, Debug)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserProfile,
    /// Epoch seconds
    pub token_expiry: i64,
}
