//! Authentication middleware

use axum::{
    body::Body,
    extract::Request,
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};

use crate::error::{ApiError, Result};

/// Caller identity stored in request extensions.
///
/// The token is forwarded to the vocabulary API, which is the authority on
/// whether it is valid. Locally it scopes sessions and selections.
#[derive(Clone, Debug)]
pub struct AuthenticatedUser {
    pub token: String,
}

/// Auth middleware - extracts the bearer token from the Authorization header
pub async fn auth_middleware(mut request: Request<Body>, next: Next) -> Result<Response> {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| ApiError::Unauthorized("Missing Authorization header".to_string()))?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| ApiError::Unauthorized("Invalid Authorization format".to_string()))?
        .to_string();

    request.extensions_mut().insert(AuthenticatedUser { token });

    Ok(next.run(request).await)
}
