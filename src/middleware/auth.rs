//! Authentication middleware and extractors
//!
//! Bearer-token verification happens exactly once per request, here; the
//! extractors below only read the verified claims back out of the request
//! extensions. Handlers declare `AuthUser` or `AdminUser` parameters instead
//! of re-checking tokens themselves.

use axum::{
    extract::{Request, State},
    http::{header, request::Parts},
    middleware::Next,
    response::Response,
};
use axum::extract::FromRequestParts;
use tracing::debug;

use crate::handlers::AppState;
use crate::services::Claims;
use crate::utils::errors::EventBuddyError;

/// Verify a Bearer token, if present, and stash the claims for extractors
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Response {
    if let Some(auth_header) = req.headers().get(header::AUTHORIZATION) {
        if let Ok(auth_str) = auth_header.to_str() {
            if let Some(token) = auth_str.strip_prefix("Bearer ") {
                match state.services.auth_service.verify_token(token) {
                    Ok(claims) => {
                        req.extensions_mut().insert(claims);
                    }
                    Err(e) => {
                        debug!(error = %e, "Token verification failed");
                    }
                }
            }
        }
    }

    next.run(req).await
}

/// Any authenticated user
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

#[axum::async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = EventBuddyError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Claims>()
            .cloned()
            .map(AuthUser)
            .ok_or_else(|| EventBuddyError::Authentication("No token provided".to_string()))
    }
}

/// An authenticated user holding the admin role
#[derive(Debug, Clone)]
pub struct AdminUser(pub Claims);

#[axum::async_trait]
impl<S> FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
{
    type Rejection = EventBuddyError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let claims = parts
            .extensions
            .get::<Claims>()
            .cloned()
            .ok_or_else(|| EventBuddyError::Authentication("No token provided".to_string()))?;

        if !claims.is_admin() {
            return Err(EventBuddyError::PermissionDenied(
                "Admin access required".to_string()
            ));
        }

        Ok(AdminUser(claims))
    }
}
