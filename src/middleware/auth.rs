use crate::{error::AppError, models::User, utils::jwt::decode_token};
use axum::{extract::Request, http::HeaderMap, middleware::Next, response::Response, Extension};
use sea_orm::{DatabaseConnection, EntityTrait};

/// Identified caller, extracted from the bearer token and the users table.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: i32,
    pub role: String,
}

/// Bearer-token authentication middleware
///
/// Verifies the JWT from the Authorization header, loads the account, and
/// adds an AuthUser to request extensions for downstream handlers.
pub async fn auth_middleware(
    Extension(db): Extension<DatabaseConnection>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = extract_bearer_token(&headers)
        .ok_or_else(|| AppError::Unauthorized("Authentication required.".to_string()))?;

    let claims = decode_token(&token)
        .map_err(|_| AppError::Unauthorized("Invalid or expired token.".to_string()))?;

    let user_id: i32 = claims
        .sub
        .parse()
        .map_err(|_| AppError::Unauthorized("Invalid or expired token.".to_string()))?;

    // The account must still exist; the role comes from the row, not the claim.
    let user = User::find_by_id(user_id)
        .one(&db)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Invalid or expired token.".to_string()))?;

    let auth_user = AuthUser {
        user_id: user.id,
        role: user.role,
    };
    request.extensions_mut().insert(auth_user);

    Ok(next.run(request).await)
}

/// Admin gate, layered after auth_middleware on /api/admin routes.
pub async fn admin_middleware(request: Request, next: Next) -> Result<Response, AppError> {
    let auth_user = request
        .extensions()
        .get::<AuthUser>()
        .ok_or_else(|| AppError::Unauthorized("Authentication required.".to_string()))?;

    if auth_user.role != "admin" {
        return Err(AppError::Forbidden("Admin access required.".to_string()));
    }

    Ok(next.run(request).await)
}

fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
    let auth_header = headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())?;

    let token = auth_header.strip_prefix("Bearer ")?;
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}

/// Extractor for AuthUser from request extensions
use axum::extract::FromRequestParts;

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .ok_or_else(|| AppError::Unauthorized("Authentication required.".to_string()))
    }
}
