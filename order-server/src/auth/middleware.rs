//! Authentication Middleware
//!
//! Axum middleware layers for JWT authentication and role gating.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use shared::error::AppError;

use crate::core::ServerState;
use crate::security_log;

use super::{CurrentUser, JwtError, JwtService};

/// Require authentication middleware
///
/// Extracts and validates the JWT token from the Authorization header.
/// If valid, adds the CurrentUser to the request extensions.
pub async fn require_auth(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let path = req.uri().path();

    // Allow OPTIONS requests for CORS preflight (skip auth)
    if req.method() == http::Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    // Skip auth for non-API routes (health check, 404s)
    if !path.starts_with("/api/") {
        return Ok(next.run(req).await);
    }

    // Catalog browsing is public
    if path.starts_with("/api/restaurants") {
        return Ok(next.run(req).await);
    }

    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let token = match auth_header {
        Some(header) => JwtService::extract_from_header(header)
            .ok_or_else(|| AppError::invalid_token("Invalid authorization header"))?,
        None => {
            security_log!("WARN", "auth_missing", uri = format!("{:?}", req.uri()));
            return Err(AppError::unauthorized());
        }
    };

    match state.jwt_service.validate_token(token) {
        Ok(claims) => {
            let user = CurrentUser::from(claims);
            tracing::debug!(
                user_id = %user.id,
                role = %user.role,
                "user authenticated"
            );
            req.extensions_mut().insert(user);
            Ok(next.run(req).await)
        }
        Err(e) => {
            security_log!(
                "WARN",
                "auth_failed",
                error = format!("{}", e),
                uri = format!("{:?}", req.uri())
            );
            match e {
                JwtError::ExpiredToken => Err(AppError::token_expired()),
                _ => Err(AppError::invalid_token("Invalid token")),
            }
        }
    }
}

/// Require admin role middleware
///
/// Must run after [`require_auth`] so the CurrentUser extension exists.
pub async fn require_admin(req: Request, next: Next) -> Result<Response, AppError> {
    let user = req
        .extensions()
        .get::<CurrentUser>()
        .ok_or_else(AppError::unauthorized)?;

    if !user.is_admin() {
        security_log!(
            "WARN",
            "admin_required",
            user_id = user.id.clone(),
            user_role = user.role.clone(),
            uri = format!("{:?}", req.uri())
        );
        return Err(AppError::admin_required());
    }

    Ok(next.run(req).await)
}
