/// Authentication API routes
use crate::{
    error::{Result, ServerError},
    middleware::{validation::required, Validate, ValidatedJson},
    state::AppState,
};
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Validate for LoginRequest {
    type Output = Credentials;

    fn validate(self) -> std::result::Result<Credentials, String> {
        Ok(Credentials {
            username: required("username", self.username)?,
            password: required("password", self.password)?,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RefreshRequest {
    pub refresh_token: Option<String>,
}

impl Validate for RefreshRequest {
    type Output = String;

    fn validate(self) -> std::result::Result<String, String> {
        required("refresh_token", self.refresh_token)
    }
}

#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub access_token: String,
    pub token_type: String,
}

/// POST /api/auth/login
pub async fn login(
    State(app_state): State<AppState>,
    ValidatedJson(credentials): ValidatedJson<LoginRequest>,
) -> Result<Json<LoginResponse>> {
    let invalid = || ServerError::Auth("Invalid username or password".to_string());

    let user = app_state
        .db
        .find_user_by_name(&credentials.username)
        .await?
        .ok_or_else(invalid)?;

    let password_hash = app_state
        .db
        .get_password_hash(&user.id)
        .await?
        .ok_or_else(invalid)?;

    if !app_state
        .auth_service
        .verify_password(&credentials.password, &password_hash)?
    {
        tracing::warn!(user_id = %user.id, "Login failed: wrong password");
        return Err(invalid());
    }

    let access_token = app_state
        .auth_service
        .create_access_token(&user.id, user.is_admin)?;
    let refresh_token = app_state.auth_service.create_refresh_token(&user.id)?;

    tracing::info!(user_id = %user.id, "User logged in");

    Ok(Json(LoginResponse {
        access_token,
        refresh_token,
        token_type: "Bearer".to_string(),
    }))
}

/// POST /api/auth/refresh
/// The admin flag is re-read from the store, not copied from the old token
pub async fn refresh(
    State(app_state): State<AppState>,
    ValidatedJson(refresh_token): ValidatedJson<RefreshRequest>,
) -> Result<Json<RefreshResponse>> {
    let user_id = app_state
        .auth_service
        .verify_refresh_token(&refresh_token)?;

    let user = app_state
        .db
        .get_user(&user_id)
        .await?
        .ok_or_else(|| ServerError::Auth("Unknown user".to_string()))?;

    let access_token = app_state
        .auth_service
        .create_access_token(&user.id, user.is_admin)?;

    Ok(Json(RefreshResponse {
        access_token,
        token_type: "Bearer".to_string(),
    }))
}
