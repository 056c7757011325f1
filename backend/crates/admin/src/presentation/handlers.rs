//! HTTP Handlers
//!
//! Pages answer HTML. Successful form posts redirect (303); fixable form
//! problems re-render the form with the messages and a 4xx status.

use std::collections::HashMap;
use std::sync::Arc;

use account::application::{LoginInput, LoginUseCase, ManageUsersUseCase, SaveAvatarUseCase};
use account::{AccountConfig, AccountError, UserRepository};
use axum::Form;
use axum::extract::rejection::{FormRejection, PathRejection};
use axum::extract::{Multipart, Path, State};
use axum::http::{StatusCode, header};
use axum::response::{Html, IntoResponse, Redirect, Response};
use campaign::application::{
    CreateCampaignUseCase, GetCampaignUseCase, ListCampaignsUseCase, UpdateCampaignUseCase,
    UploadImageInput, UploadImageUseCase,
};
use campaign::{Actor, CampaignConfig, CampaignRepository};
use chrono::Utc;
use funding::TransactionRepository;
use funding::application::ListTransactionsUseCase;
use kernel::id::{CampaignId, UserId};
use platform::upload::MultipartForm;

use crate::config::AdminConfig;
use crate::error::{AdminError, AdminResult};
use crate::presentation::forms::{CampaignForm, LoginForm, UserForm};
use crate::presentation::middleware::{CurrentAdmin, LOGIN_PATH};
use crate::presentation::views;
use crate::session::issue_session;

/// Shared state for panel handlers
pub struct AdminAppState<U, C, T>
where
    U: UserRepository + Send + Sync + 'static,
    C: CampaignRepository + Send + Sync + 'static,
    T: TransactionRepository + Send + Sync + 'static,
{
    pub users: Arc<U>,
    pub campaigns: Arc<C>,
    pub transactions: Arc<T>,
    pub account_config: Arc<AccountConfig>,
    pub campaign_config: Arc<CampaignConfig>,
    pub config: Arc<AdminConfig>,
}

impl<U, C, T> Clone for AdminAppState<U, C, T>
where
    U: UserRepository + Send + Sync + 'static,
    C: CampaignRepository + Send + Sync + 'static,
    T: TransactionRepository + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            users: self.users.clone(),
            campaigns: self.campaigns.clone(),
            transactions: self.transactions.clone(),
            account_config: self.account_config.clone(),
            campaign_config: self.campaign_config.clone(),
            config: self.config.clone(),
        }
    }
}

impl<U, C, T> AdminAppState<U, C, T>
where
    U: UserRepository + Send + Sync + 'static,
    C: CampaignRepository + Send + Sync + 'static,
    T: TransactionRepository + Send + Sync + 'static,
{
    fn manage_users(&self) -> ManageUsersUseCase<U> {
        ManageUsersUseCase::new(self.users.clone(), self.account_config.clone())
    }

    fn get_campaign(&self) -> GetCampaignUseCase<C, U> {
        GetCampaignUseCase::new(self.campaigns.clone(), self.users.clone())
    }

    fn list_transactions(&self) -> ListTransactionsUseCase<T, C, U> {
        ListTransactionsUseCase::new(
            self.transactions.clone(),
            self.campaigns.clone(),
            self.users.clone(),
        )
    }
}

fn path_id(id: Result<Path<i64>, PathRejection>) -> AdminResult<i64> {
    let Path(id) = id.map_err(|e| AdminError::BadRequest(e.body_text()))?;
    Ok(id)
}

fn form_body<F>(form: Result<Form<F>, FormRejection>) -> AdminResult<F> {
    let Form(form) = form.map_err(|e| AdminError::BadRequest(e.body_text()))?;
    Ok(form)
}

/// Re-render the submitted form for fixable errors, fail otherwise
fn rerender(err: AdminError, page: impl FnOnce(&[String]) -> Html<String>) -> AdminResult<Response> {
    match err.form_errors() {
        Some(errors) => Ok((err.status_code(), page(&errors)).into_response()),
        None => Err(err),
    }
}

fn see_other(path: impl AsRef<str>) -> Response {
    Redirect::to(path.as_ref()).into_response()
}

// ============================================================================
// Session
// ============================================================================

/// GET /login
pub async fn login_page() -> Html<String> {
    views::login_page(&LoginForm::default(), &[])
}

/// POST /session
pub async fn create_session<U, C, T>(
    State(state): State<AdminAppState<U, C, T>>,
    form: Result<Form<LoginForm>, FormRejection>,
) -> AdminResult<Response>
where
    U: UserRepository + Send + Sync + 'static,
    C: CampaignRepository + Send + Sync + 'static,
    T: TransactionRepository + Send + Sync + 'static,
{
    let form = form_body(form)?;

    let output = LoginUseCase::new(state.users.clone(), state.account_config.clone())
        .execute(LoginInput {
            email: form.email.clone(),
            password: form.password.clone(),
        })
        .await;

    let user = match output {
        Ok(output) => output.user,
        Err(err) => {
            return rerender(err.into(), |errors| views::login_page(&form, errors));
        }
    };

    if !user.is_admin() {
        tracing::warn!(user_id = %user.id, "Admin panel sign-in by non-admin user");
        return Ok((
            StatusCode::FORBIDDEN,
            views::login_page(&form, &["Only administrators may sign in".to_string()]),
        )
            .into_response());
    }

    let value = issue_session(&state.config, user.id, Utc::now());
    let cookie = state
        .config
        .cookie
        .set_cookie_header(&value)
        .map_err(|e| AdminError::Internal(e.to_string()))?;

    tracing::info!(user_id = %user.id, "Admin signed in");

    Ok(([(header::SET_COOKIE, cookie)], Redirect::to("/users")).into_response())
}

/// GET /logout
pub async fn logout<U, C, T>(
    State(state): State<AdminAppState<U, C, T>>,
) -> AdminResult<Response>
where
    U: UserRepository + Send + Sync + 'static,
    C: CampaignRepository + Send + Sync + 'static,
    T: TransactionRepository + Send + Sync + 'static,
{
    let cookie = state
        .config
        .cookie
        .delete_cookie_header()
        .map_err(|e| AdminError::Internal(e.to_string()))?;

    Ok(([(header::SET_COOKIE, cookie)], Redirect::to(LOGIN_PATH)).into_response())
}

// ============================================================================
// Users
// ============================================================================

/// GET /users
pub async fn list_users<U, C, T>(
    State(state): State<AdminAppState<U, C, T>>,
    admin: CurrentAdmin,
) -> AdminResult<Html<String>>
where
    U: UserRepository + Send + Sync + 'static,
    C: CampaignRepository + Send + Sync + 'static,
    T: TransactionRepository + Send + Sync + 'static,
{
    let users = state.manage_users().list().await?;
    Ok(views::users_index(admin.user(), &users))
}

/// GET /users/new
pub async fn new_user(admin: CurrentAdmin) -> Html<String> {
    views::user_new_page(admin.user(), &UserForm::default(), &[])
}

/// POST /users
pub async fn create_user<U, C, T>(
    State(state): State<AdminAppState<U, C, T>>,
    admin: CurrentAdmin,
    form: Result<Form<UserForm>, FormRejection>,
) -> AdminResult<Response>
where
    U: UserRepository + Send + Sync + 'static,
    C: CampaignRepository + Send + Sync + 'static,
    T: TransactionRepository + Send + Sync + 'static,
{
    let form = form_body(form)?;

    let created = async {
        let input = form.create_input()?;
        Ok::<_, AdminError>(state.manage_users().create(input).await?)
    }
    .await;

    match created {
        Ok(_) => Ok(see_other("/users")),
        Err(err) => rerender(err, |errors| views::user_new_page(admin.user(), &form, errors)),
    }
}

/// GET /users/edit/{id}
pub async fn edit_user<U, C, T>(
    State(state): State<AdminAppState<U, C, T>>,
    admin: CurrentAdmin,
    id: Result<Path<i64>, PathRejection>,
) -> AdminResult<Html<String>>
where
    U: UserRepository + Send + Sync + 'static,
    C: CampaignRepository + Send + Sync + 'static,
    T: TransactionRepository + Send + Sync + 'static,
{
    let id = UserId::from_raw(path_id(id)?);
    let user = state.manage_users().get(id).await?;

    Ok(views::user_edit_page(
        admin.user(),
        id,
        &UserForm::from_user(&user),
        &[],
    ))
}

/// POST /users/update/{id}
pub async fn update_user<U, C, T>(
    State(state): State<AdminAppState<U, C, T>>,
    admin: CurrentAdmin,
    id: Result<Path<i64>, PathRejection>,
    form: Result<Form<UserForm>, FormRejection>,
) -> AdminResult<Response>
where
    U: UserRepository + Send + Sync + 'static,
    C: CampaignRepository + Send + Sync + 'static,
    T: TransactionRepository + Send + Sync + 'static,
{
    let id = UserId::from_raw(path_id(id)?);
    let form = form_body(form)?;

    let updated = async {
        let input = form.update_input()?;
        Ok::<_, AdminError>(state.manage_users().update(id, input).await?)
    }
    .await;

    match updated {
        Ok(_) => Ok(see_other("/users")),
        Err(err) => rerender(err, |errors| {
            views::user_edit_page(admin.user(), id, &form, errors)
        }),
    }
}

/// GET /users/avatar/{id}
pub async fn avatar_form<U, C, T>(
    State(state): State<AdminAppState<U, C, T>>,
    admin: CurrentAdmin,
    id: Result<Path<i64>, PathRejection>,
) -> AdminResult<Html<String>>
where
    U: UserRepository + Send + Sync + 'static,
    C: CampaignRepository + Send + Sync + 'static,
    T: TransactionRepository + Send + Sync + 'static,
{
    let user = state
        .manage_users()
        .get(UserId::from_raw(path_id(id)?))
        .await?;

    Ok(views::avatar_page(admin.user(), &user, &[]))
}

/// POST /users/avatar/{id}
pub async fn upload_avatar<U, C, T>(
    State(state): State<AdminAppState<U, C, T>>,
    admin: CurrentAdmin,
    id: Result<Path<i64>, PathRejection>,
    multipart: Multipart,
) -> AdminResult<Response>
where
    U: UserRepository + Send + Sync + 'static,
    C: CampaignRepository + Send + Sync + 'static,
    T: TransactionRepository + Send + Sync + 'static,
{
    let user = state
        .manage_users()
        .get(UserId::from_raw(path_id(id)?))
        .await?;

    let saved = async {
        let mut form = MultipartForm::read(multipart).await?;
        let file = form.take_file("avatar")?;
        SaveAvatarUseCase::new(state.users.clone(), state.account_config.clone())
            .execute(user.id, &file.file_name, &file.bytes)
            .await?;
        Ok::<_, AdminError>(())
    }
    .await;

    match saved {
        Ok(()) => Ok(see_other("/users")),
        Err(err) => rerender(err, |errors| views::avatar_page(admin.user(), &user, errors)),
    }
}

// ============================================================================
// Campaigns
// ============================================================================

/// GET /campaigns
pub async fn list_campaigns<U, C, T>(
    State(state): State<AdminAppState<U, C, T>>,
    admin: CurrentAdmin,
) -> AdminResult<Html<String>>
where
    U: UserRepository + Send + Sync + 'static,
    C: CampaignRepository + Send + Sync + 'static,
    T: TransactionRepository + Send + Sync + 'static,
{
    let campaigns = ListCampaignsUseCase::new(state.campaigns.clone())
        .execute(None)
        .await?;
    let owners: HashMap<_, _> = state
        .manage_users()
        .list()
        .await?
        .into_iter()
        .map(|user| (user.id, user))
        .collect();

    Ok(views::campaigns_index(admin.user(), &campaigns, &owners))
}

/// GET /campaigns/new
pub async fn new_campaign<U, C, T>(
    State(state): State<AdminAppState<U, C, T>>,
    admin: CurrentAdmin,
) -> AdminResult<Html<String>>
where
    U: UserRepository + Send + Sync + 'static,
    C: CampaignRepository + Send + Sync + 'static,
    T: TransactionRepository + Send + Sync + 'static,
{
    let users = state.manage_users().list().await?;
    Ok(views::campaign_new_page(
        admin.user(),
        &users,
        &CampaignForm::default(),
        &[],
    ))
}

/// POST /campaigns
///
/// Creates the campaign on behalf of the selected owner.
pub async fn create_campaign<U, C, T>(
    State(state): State<AdminAppState<U, C, T>>,
    admin: CurrentAdmin,
    form: Result<Form<CampaignForm>, FormRejection>,
) -> AdminResult<Response>
where
    U: UserRepository + Send + Sync + 'static,
    C: CampaignRepository + Send + Sync + 'static,
    T: TransactionRepository + Send + Sync + 'static,
{
    let form = form_body(form)?;

    let created = async {
        let owner = form.owner()?;
        match state.manage_users().get(owner).await {
            Ok(_) => {}
            Err(AccountError::UserNotFound) => {
                return Err(AdminError::invalid("campaign owner does not exist"));
            }
            Err(e) => return Err(e.into()),
        }
        Ok::<_, AdminError>(
            CreateCampaignUseCase::new(state.campaigns.clone())
                .execute(owner, form.input())
                .await?,
        )
    }
    .await;

    match created {
        Ok(campaign) => Ok(see_other(format!("/campaigns/show/{}", campaign.id))),
        Err(err) => {
            let users = state.manage_users().list().await?;
            rerender(err, |errors| {
                views::campaign_new_page(admin.user(), &users, &form, errors)
            })
        }
    }
}

/// GET /campaigns/show/{id}
pub async fn show_campaign<U, C, T>(
    State(state): State<AdminAppState<U, C, T>>,
    admin: CurrentAdmin,
    id: Result<Path<i64>, PathRejection>,
) -> AdminResult<Html<String>>
where
    U: UserRepository + Send + Sync + 'static,
    C: CampaignRepository + Send + Sync + 'static,
    T: TransactionRepository + Send + Sync + 'static,
{
    let id = CampaignId::from_raw(path_id(id)?);
    let detail = state.get_campaign().execute(id).await?;
    let transactions = state
        .list_transactions()
        .by_campaign(Actor::Admin, id)
        .await?;

    Ok(views::campaign_show_page(
        admin.user(),
        &detail.campaign,
        detail.owner.as_ref(),
        &transactions,
    ))
}

/// GET /campaigns/edit/{id}
pub async fn edit_campaign<U, C, T>(
    State(state): State<AdminAppState<U, C, T>>,
    admin: CurrentAdmin,
    id: Result<Path<i64>, PathRejection>,
) -> AdminResult<Html<String>>
where
    U: UserRepository + Send + Sync + 'static,
    C: CampaignRepository + Send + Sync + 'static,
    T: TransactionRepository + Send + Sync + 'static,
{
    let id = path_id(id)?;
    let detail = state.get_campaign().execute(CampaignId::from_raw(id)).await?;

    Ok(views::campaign_edit_page(
        admin.user(),
        id,
        &CampaignForm::from_campaign(&detail.campaign),
        &[],
    ))
}

/// POST /campaigns/update/{id}
pub async fn update_campaign<U, C, T>(
    State(state): State<AdminAppState<U, C, T>>,
    admin: CurrentAdmin,
    id: Result<Path<i64>, PathRejection>,
    form: Result<Form<CampaignForm>, FormRejection>,
) -> AdminResult<Response>
where
    U: UserRepository + Send + Sync + 'static,
    C: CampaignRepository + Send + Sync + 'static,
    T: TransactionRepository + Send + Sync + 'static,
{
    let id = path_id(id)?;
    let form = form_body(form)?;

    let updated = UpdateCampaignUseCase::new(state.campaigns.clone())
        .execute(Actor::Admin, CampaignId::from_raw(id), form.input())
        .await;

    match updated {
        Ok(_) => Ok(see_other(format!("/campaigns/show/{id}"))),
        Err(err) => rerender(err.into(), |errors| {
            views::campaign_edit_page(admin.user(), id, &form, errors)
        }),
    }
}

/// GET /campaigns/image/{id}
pub async fn campaign_image_form<U, C, T>(
    State(state): State<AdminAppState<U, C, T>>,
    admin: CurrentAdmin,
    id: Result<Path<i64>, PathRejection>,
) -> AdminResult<Html<String>>
where
    U: UserRepository + Send + Sync + 'static,
    C: CampaignRepository + Send + Sync + 'static,
    T: TransactionRepository + Send + Sync + 'static,
{
    let detail = state
        .get_campaign()
        .execute(CampaignId::from_raw(path_id(id)?))
        .await?;

    Ok(views::campaign_image_page(admin.user(), &detail.campaign, &[]))
}

/// POST /campaigns/image/{id}
pub async fn upload_campaign_image<U, C, T>(
    State(state): State<AdminAppState<U, C, T>>,
    admin: CurrentAdmin,
    id: Result<Path<i64>, PathRejection>,
    multipart: Multipart,
) -> AdminResult<Response>
where
    U: UserRepository + Send + Sync + 'static,
    C: CampaignRepository + Send + Sync + 'static,
    T: TransactionRepository + Send + Sync + 'static,
{
    let campaign = state
        .get_campaign()
        .execute(CampaignId::from_raw(path_id(id)?))
        .await?
        .campaign;

    let saved = async {
        let mut form = MultipartForm::read(multipart).await?;
        let is_primary = form.flag("is_primary");
        let file = form.take_file("file")?;
        UploadImageUseCase::new(state.campaigns.clone(), state.campaign_config.clone())
            .execute(
                Actor::Admin,
                UploadImageInput {
                    campaign_id: campaign.id,
                    is_primary,
                    file_name: &file.file_name,
                    bytes: &file.bytes,
                },
            )
            .await?;
        Ok::<_, AdminError>(())
    }
    .await;

    match saved {
        Ok(()) => Ok(see_other(format!("/campaigns/show/{}", campaign.id))),
        Err(err) => rerender(err, |errors| {
            views::campaign_image_page(admin.user(), &campaign, errors)
        }),
    }
}

// ============================================================================
// Transactions
// ============================================================================

/// GET /transactions
pub async fn list_transactions<U, C, T>(
    State(state): State<AdminAppState<U, C, T>>,
    admin: CurrentAdmin,
) -> AdminResult<Html<String>>
where
    U: UserRepository + Send + Sync + 'static,
    C: CampaignRepository + Send + Sync + 'static,
    T: TransactionRepository + Send + Sync + 'static,
{
    let transactions = state.list_transactions().all().await?;
    Ok(views::transactions_index(admin.user(), &transactions))
}
