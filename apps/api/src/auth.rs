//! Bearer-token authentication.
//!
//! Tokens are issued by the identity provider and signed with `JWT_SECRET` (HS256).
//! This service only verifies them.

use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    #[serde(alias = "userId")]
    pub sub: Uuid,
    pub email: String,
    pub exp: usize,
}

/// The signed-in user, taken from a verified token.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthUser {
    pub id: Uuid,
    pub email: String,
}

/// For routes that behave differently for signed-in users but accept anonymous ones.
/// A missing or invalid token yields `None` rather than a rejection.
#[derive(Debug, Clone)]
pub struct MaybeAuthUser(pub Option<AuthUser>);

pub fn verify_token(token: &str, secret: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let validation = Validation::new(Algorithm::HS256);
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )?;
    Ok(data.claims)
}

fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

fn authenticate(parts: &Parts, secret: &str) -> Result<AuthUser, AppError> {
    let token = bearer_token(parts).ok_or(AppError::Unauthorized)?;
    let claims = verify_token(token, secret).map_err(|e| {
        debug!("Rejected bearer token: {e}");
        AppError::Unauthorized
    })?;
    Ok(AuthUser {
        id: claims.sub,
        email: claims.email,
    })
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        authenticate(parts, &state.config.jwt_secret)
    }
}

#[async_trait]
impl FromRequestParts<AppState> for MaybeAuthUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        Ok(MaybeAuthUser(
            authenticate(parts, &state.config.jwt_secret).ok(),
        ))
    }
}


#[cfg(test)]
mod tests {
    use super::test_tokens::{fresh_exp, sign};
    use super::*;
    use axum::http::Request;

    const SECRET: &str = "test-secret";

    fn parts_with(auth: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/");
        if let Some(value) = auth {
            builder = builder.header(header::AUTHORIZATION, value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[test]
    fn test_valid_token_authenticates() {
        let id = Uuid::new_v4();
        let token = sign(id, SECRET, fresh_exp());
        let user = authenticate(&parts_with(Some(&format!("Bearer {token}"))), SECRET).unwrap();
        assert_eq!(user.id, id);
        assert_eq!(user.email, "cook@example.com");
    }

    #[test]
    fn test_wrong_secret_is_unauthorized() {
        let token = sign(Uuid::new_v4(), "other-secret", fresh_exp());
        let result = authenticate(&parts_with(Some(&format!("Bearer {token}"))), SECRET);
        assert!(matches!(result, Err(AppError::Unauthorized)));
    }

    #[test]
    fn test_expired_token_is_unauthorized() {
        let token = sign(Uuid::new_v4(), SECRET, 1_000);
        let result = authenticate(&parts_with(Some(&format!("Bearer {token}"))), SECRET);
        assert!(matches!(result, Err(AppError::Unauthorized)));
    }

    #[test]
    fn test_missing_or_non_bearer_header_is_unauthorized() {
        assert!(authenticate(&parts_with(None), SECRET).is_err());
        assert!(authenticate(&parts_with(Some("Basic abc")), SECRET).is_err());
    }

    #[test]
    fn test_legacy_user_id_claim_is_accepted() {
        let id = Uuid::new_v4();
        let json = format!(r#"{{"userId":"{id}","email":"a@b.c","exp":1}}"#);
        let claims: Claims = serde_json::from_str(&json).unwrap();
        assert_eq!(claims.sub, id);
    }
}
