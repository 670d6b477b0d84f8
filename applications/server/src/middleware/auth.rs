/// Authentication guard
///
/// Handlers opt into authentication by taking `AuthenticatedUser` or
/// `AdminUser` as an argument. Missing or invalid bearer tokens are rejected
/// with 401, valid non-admin tokens on admin routes with 403.
use crate::{error::ServerError, services::AuthService};
use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};
use mixtape_core::UserId;
use std::sync::Arc;

/// Identity resolved from a verified access token
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
    pub is_admin: bool,
}

impl AuthenticatedUser {
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }
}

/// Authenticated user that also carries the admin flag
#[derive(Debug, Clone)]
pub struct AdminUser(pub AuthenticatedUser);

fn bearer_token(headers: &HeaderMap) -> Result<&str, ServerError> {
    let auth_header = headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| ServerError::Auth("Access denied, no token provided".to_string()))?;

    auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| ServerError::Auth("Expected a Bearer token".to_string()))
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    Arc<AuthService>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ServerError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        if let Some(user) = parts.extensions.get::<AuthenticatedUser>() {
            return Ok(user.clone());
        }

        let auth_service = Arc::<AuthService>::from_ref(state);
        let token = bearer_token(&parts.headers)?;

        let identity = auth_service.verify_access_token(token).map_err(|e| {
            tracing::warn!("Token verification failed: {}", e);
            ServerError::Auth("Invalid token".to_string())
        })?;

        let user = AuthenticatedUser {
            user_id: identity.user_id,
            is_admin: identity.is_admin,
        };
        parts.extensions.insert(user.clone());

        Ok(user)
    }
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for AdminUser
where
    Arc<AuthService>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ServerError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let user = AuthenticatedUser::from_request_parts(parts, state).await?;
        if !user.is_admin {
            tracing::warn!(user_id = %user.user_id, "Non-admin attempted an admin operation");
            return Err(ServerError::Forbidden(
                "You don't have access to this content".to_string(),
            ));
        }
        Ok(AdminUser(user))
    }
}
