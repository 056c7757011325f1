//! HTTP Handlers

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Multipart, State};
use kernel::error::app_error::AppError;
use kernel::response::ApiResponse;
use platform::upload::MultipartForm;
use std::sync::Arc;

use crate::application::config::AccountConfig;
use crate::application::{
    CheckEmailUseCase, LoginInput, LoginUseCase, RegisterInput, RegisterUseCase,
    SaveAvatarUseCase,
};
use crate::domain::repository::UserRepository;
use crate::error::AccountResult;
use crate::presentation::dto::{
    CheckEmailRequest, EmailAvailabilityResponse, LoginRequest, RegisterRequest, UploadResponse,
    UserResponse,
};
use crate::presentation::middleware::Principal;

/// Shared state for account handlers
pub struct AccountAppState<U>
where
    U: UserRepository + Send + Sync + 'static,
{
    pub repo: Arc<U>,
    pub config: Arc<AccountConfig>,
}

impl<U> Clone for AccountAppState<U>
where
    U: UserRepository + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            config: self.config.clone(),
        }
    }
}

// ============================================================================
// Register / Login
// ============================================================================

/// POST /api/v1/users
pub async fn register<U>(
    State(state): State<AccountAppState<U>>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> AccountResult<ApiResponse<UserResponse>>
where
    U: UserRepository + Send + Sync + 'static,
{
    let Json(req) = payload.map_err(AppError::from)?;

    let use_case = RegisterUseCase::new(state.repo.clone(), state.config.clone());
    let output = use_case
        .execute(RegisterInput {
            name: req.name,
            occupation: req.occupation,
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok(ApiResponse::success(
        "Account has been registered",
        UserResponse::new(&output.user, output.token),
    ))
}

/// POST /api/v1/login
pub async fn login<U>(
    State(state): State<AccountAppState<U>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> AccountResult<ApiResponse<UserResponse>>
where
    U: UserRepository + Send + Sync + 'static,
{
    let Json(req) = payload.map_err(AppError::from)?;

    let use_case = LoginUseCase::new(state.repo.clone(), state.config.clone());
    let output = use_case
        .execute(LoginInput {
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok(ApiResponse::success(
        "Successfully logged in",
        UserResponse::new(&output.user, output.token),
    ))
}

// ============================================================================
// Email Availability
// ============================================================================

/// POST /api/v1/email_checkers
pub async fn check_email<U>(
    State(state): State<AccountAppState<U>>,
    payload: Result<Json<CheckEmailRequest>, JsonRejection>,
) -> AccountResult<ApiResponse<EmailAvailabilityResponse>>
where
    U: UserRepository + Send + Sync + 'static,
{
    let Json(req) = payload.map_err(AppError::from)?;

    let is_available = CheckEmailUseCase::new(state.repo.clone())
        .execute(&req.email)
        .await?;

    let message = if is_available {
        "Email is available"
    } else {
        "Email has been registered"
    };

    Ok(ApiResponse::success(
        message,
        EmailAvailabilityResponse { is_available },
    ))
}

// ============================================================================
// Current User
// ============================================================================

/// POST /api/v1/avatars
pub async fn upload_avatar<U>(
    State(state): State<AccountAppState<U>>,
    principal: Principal,
    multipart: Multipart,
) -> AccountResult<ApiResponse<UploadResponse>>
where
    U: UserRepository + Send + Sync + 'static,
{
    let mut form = MultipartForm::read(multipart).await?;
    let file = form.take_file("avatar")?;

    SaveAvatarUseCase::new(state.repo.clone(), state.config.clone())
        .execute(principal.user().id, &file.file_name, &file.bytes)
        .await?;

    Ok(ApiResponse::success(
        "Avatar successfully uploaded",
        UploadResponse { is_uploaded: true },
    ))
}

/// GET /api/v1/users/fetch
pub async fn fetch_user(principal: Principal) -> ApiResponse<UserResponse> {
    ApiResponse::success(
        "Successfully fetch user data",
        UserResponse::new(principal.user(), ""),
    )
}
