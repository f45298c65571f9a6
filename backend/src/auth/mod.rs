use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
};
use jsonwebtoken::{DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::config_loader;
use domain::value_objects::enums::user_roles::UserRole;

#[cfg(test)]
mod tests;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub role: String,
    pub company_id: Option<String>,
    pub email: Option<String>,
    pub exp: usize,
}

/// Any authenticated principal: platform admin, company operator or
/// affiliate.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub role: UserRole,
    pub company_id: Option<Uuid>,
    pub email: Option<String>,
}

/// A company operator scoped to their tenant.
#[derive(Debug, Clone)]
pub struct CompanyUser {
    pub user_id: Uuid,
    pub company_id: Uuid,
}

/// A platform administrator.
#[derive(Debug, Clone)]
pub struct AdminUser {
    pub user_id: Uuid,
}

pub fn validate_bearer_token(token: &str) -> Result<Claims, anyhow::Error> {
    let auth_secret = config_loader::get_auth_secret()
        .map_err(|e| anyhow::anyhow!("Failed to load auth secret: {}", e))?;

    let decoding_key = DecodingKey::from_secret(auth_secret.secret.as_bytes());
    let validation = Validation::new(jsonwebtoken::Algorithm::HS256);

    let token_data = decode::<Claims>(token, &decoding_key, &validation)
        .map_err(|e| anyhow::anyhow!("JWT validation failed: {}", e))?;

    Ok(token_data.claims)
}

fn unauthorized(message: &str) -> (StatusCode, String) {
    (StatusCode::UNAUTHORIZED, message.to_string())
}

fn auth_user_from_parts(parts: &Parts) -> Result<AuthUser, (StatusCode, String)> {
    let auth_header = parts
        .headers
        .get(axum::http::header::AUTHORIZATION)
        .ok_or_else(|| unauthorized("Missing Authorization header"))?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| unauthorized("Invalid Authorization header"))?;

    let token = auth_str
        .strip_prefix("Bearer ")
        .ok_or_else(|| unauthorized("Authorization header must be a Bearer token"))?;

    let claims =
        validate_bearer_token(token).map_err(|e| unauthorized(&format!("Unauthorized: {}", e)))?;

    let user_id = Uuid::parse_str(&claims.sub)
        .map_err(|_| unauthorized("Token subject is not a valid id"))?;

    let role = UserRole::from_str(&claims.role).ok_or_else(|| unauthorized("Unknown role"))?;

    let company_id = match claims.company_id {
        Some(raw) => Some(
            Uuid::parse_str(&raw).map_err(|_| unauthorized("Token company is not a valid id"))?,
        ),
        None => None,
    };

    Ok(AuthUser {
        user_id,
        role,
        company_id,
        email: claims.email,
    })
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, String);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        auth_user_from_parts(parts)
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for CompanyUser
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, String);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let auth_user = auth_user_from_parts(parts)?;

        if auth_user.role != UserRole::Company {
            return Err((
                StatusCode::FORBIDDEN,
                "Company operator access required".to_string(),
            ));
        }

        let company_id = auth_user
            .company_id
            .ok_or_else(|| unauthorized("Token has no company scope"))?;

        Ok(CompanyUser {
            user_id: auth_user.user_id,
            company_id,
        })
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, String);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let auth_user = auth_user_from_parts(parts)?;

        if auth_user.role != UserRole::Admin {
            return Err((
                StatusCode::FORBIDDEN,
                "Platform administrator access required".to_string(),
            ));
        }

        Ok(AdminUser {
            user_id: auth_user.user_id,
        })
    }
}
