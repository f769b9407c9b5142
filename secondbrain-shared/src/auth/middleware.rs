/// Bearer authentication for Axum
///
/// Protected routes read the `Authorization: Bearer <token>` header, verify the
/// token and hand the resolved identity to the handler as an [`AuthContext`]
/// stored in the request extensions.
///
/// # Example
///
/// ```no_run
/// use axum::{extract::Request, middleware::{self, Next}, response::Response, routing::get, Extension, Router};
/// use secondbrain_shared::auth::middleware::{authenticate, AuthContext, AuthError};
///
/// async fn handler(Extension(auth): Extension<AuthContext>) -> String {
///     format!("Hello, user {}!", auth.user_id)
/// }
///
/// async fn require_token(mut req: Request, next: Next) -> Result<Response, AuthError> {
///     let ctx = authenticate(req.headers(), "your-jwt-secret")?;
///     req.extensions_mut().insert(ctx);
///     Ok(next.run(req).await)
/// }
///
/// let app: Router = Router::new()
///     .route("/protected", get(handler))
///     .layer(middleware::from_fn(require_token));
/// ```

use axum::{
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::jwt::{validate_token, JwtError};

/// Identity attached to a request after successful authentication
///
/// Handlers extract it with `Extension<AuthContext>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthContext {
    /// Authenticated user ID
    pub user_id: Uuid,
}

impl AuthContext {
    pub fn new(user_id: Uuid) -> Self {
        Self { user_id }
    }
}

/// Error type for bearer authentication
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Missing authorization header
    MissingCredentials,

    /// Header present but not `Bearer <token>`
    InvalidFormat(String),

    /// Token validation failed
    InvalidToken(String),
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthError::MissingCredentials => write!(f, "Authorization token missing"),
            AuthError::InvalidFormat(msg) => write!(f, "{}", msg),
            AuthError::InvalidToken(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for AuthError {}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        // Every authentication failure is a 403
        (StatusCode::FORBIDDEN, self.to_string()).into_response()
    }
}

/// Extracts the token from an `Authorization` header value
///
/// ```
/// use secondbrain_shared::auth::middleware::bearer_token;
///
/// assert_eq!(bearer_token("Bearer abc.def.ghi").unwrap(), "abc.def.ghi");
/// assert!(bearer_token("Basic dXNlcjpwYXNz").is_err());
/// ```
pub fn bearer_token(header_value: &str) -> Result<&str, AuthError> {
    header_value
        .strip_prefix("Bearer ")
        .and_then(|rest| rest.split(' ').next())
        .filter(|token| !token.is_empty())
        .ok_or_else(|| {
            AuthError::InvalidFormat("Authorization token missing or invalid format".to_string())
        })
}

/// Resolves the caller's identity from request headers
///
/// # Errors
///
/// - `MissingCredentials` when there is no `Authorization` header
/// - `InvalidFormat` when it is not a `Bearer` credential
/// - `InvalidToken` when the signature, expiry or payload check fails
pub fn authenticate(headers: &HeaderMap, secret: &str) -> Result<AuthContext, AuthError> {
    let auth_header = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(AuthError::MissingCredentials)?;

    let token = bearer_token(auth_header)?;

    let claims = validate_token(token, secret).map_err(|e| match e {
        JwtError::Expired => AuthError::InvalidToken("Token expired".to_string()),
        JwtError::MissingSubject => AuthError::InvalidToken("Invalid token structure".to_string()),
        _ => AuthError::InvalidToken("Invalid token".to_string()),
    })?;

    // validate_token guarantees the id is present
    let user_id = claims
        .id
        .ok_or_else(|| AuthError::InvalidToken("Invalid token structure".to_string()))?;

    Ok(AuthContext::new(user_id))
}
