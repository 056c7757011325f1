//! API DTOs (Data Transfer Objects)

use serde::{Deserialize, Serialize};

use crate::domain::entity::user::User;

// ============================================================================
// Requests
// ============================================================================

/// Register request. Missing fields deserialize empty and fail validation.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub occupation: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CheckEmailRequest {
    #[serde(default)]
    pub email: String,
}

// ============================================================================
// Responses
// ============================================================================

/// User formatter shared by register, login and fetch
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: i64,
    pub name: String,
    pub occupation: String,
    pub email: String,
    pub token: String,
    pub image_url: String,
}

impl UserResponse {
    pub fn new(user: &User, token: impl Into<String>) -> Self {
        Self {
            id: user.id.get(),
            name: user.name.clone(),
            occupation: user.occupation.clone(),
            email: user.email.to_string(),
            token: token.into(),
            image_url: user.avatar_file_name.clone().unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct EmailAvailabilityResponse {
    pub is_available: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct UploadResponse {
    pub is_uploaded: bool,
}
