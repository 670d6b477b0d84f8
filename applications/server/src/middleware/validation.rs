/// Request validation
///
/// Bodies are deserialized into payload types that reject unknown fields,
/// then checked field by field and converted into domain input. Path ids
/// must parse as store identifiers. All failures are 400s that happen
/// before any handler logic runs.
use crate::error::ServerError;
use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
    Json,
};
use mixtape_core::MixtapeError;
use serde::de::DeserializeOwned;
use std::str::FromStr;

/// Schema check for a request body
pub trait Validate: DeserializeOwned {
    /// Domain input produced by a valid payload
    type Output;

    fn validate(self) -> Result<Self::Output, String>;
}

/// JSON body that passed its `Validate` schema
pub struct ValidatedJson<P: Validate>(pub P::Output);

#[async_trait]
impl<P, S> FromRequest<S> for ValidatedJson<P>
where
    P: Validate + Send,
    S: Send + Sync,
{
    type Rejection = ServerError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(payload) = Json::<P>::from_request(req, state)
            .await
            .map_err(|rejection| ServerError::Validation(rejection.body_text()))?;

        payload
            .validate()
            .map(ValidatedJson)
            .map_err(ServerError::Validation)
    }
}

/// Path identifier in valid store format
#[derive(Debug, Clone)]
pub struct ValidId<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for ValidId<T>
where
    T: FromStr<Err = MixtapeError> + Send,
    S: Send + Sync,
{
    type Rejection = ServerError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| ServerError::Validation(rejection.body_text()))?;

        raw.parse::<T>()
            .map(ValidId)
            .map_err(|_| ServerError::Validation("Invalid ID.".to_string()))
    }
}

/// A field that must be present and non-empty
pub fn required(field: &str, value: Option<String>) -> Result<String, String> {
    match value {
        None => Err(format!("\"{field}\" is required")),
        Some(v) => non_empty(field, v),
    }
}

/// A field that, when present, must be non-empty
pub fn non_empty(field: &str, value: String) -> Result<String, String> {
    if value.trim().is_empty() {
        Err(format!("\"{field}\" is not allowed to be empty"))
    } else {
        Ok(value)
    }
}

/// A field that must be present and parse as an identifier
pub fn required_id<T: FromStr>(field: &str, value: Option<String>) -> Result<T, String> {
    let raw = required(field, value)?;
    raw.parse()
        .map_err(|_| format!("\"{field}\" is not a valid id"))
}
