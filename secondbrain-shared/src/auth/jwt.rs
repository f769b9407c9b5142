/// Signed bearer tokens
///
/// Signin hands out an HS256 JWT whose payload names the user:
///
/// ```json
/// { "id": "7f0c…", "iat": 1735689600 }
/// ```
///
/// By default tokens carry no `exp` claim and stay valid until the signing
/// secret changes. When an expiration is configured the token also carries
/// `exp`, and validation rejects it once that time has passed.
///
/// # Example
///
/// ```
/// use secondbrain_shared::auth::jwt::{create_token, validate_token, Claims};
/// use uuid::Uuid;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let user_id = Uuid::new_v4();
/// let token = create_token(&Claims::new(user_id), "your-secret-key")?;
///
/// let claims = validate_token(&token, "your-secret-key")?;
/// assert_eq!(claims.id, Some(user_id));
/// # Ok(())
/// # }
/// ```

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Error type for JWT operations
#[derive(Debug, thiserror::Error)]
pub enum JwtError {
    /// Failed to create token
    #[error("Failed to create token: {0}")]
    CreateError(String),

    /// Signature, format or claim validation failed
    #[error("Failed to validate token: {0}")]
    ValidationError(String),

    /// Token has expired
    #[error("Token has expired")]
    Expired,

    /// Token verified but names no user
    #[error("Token payload has no user id")]
    MissingSubject,
}

/// JWT claims
///
/// `id` is optional on the decoding side so that a correctly signed token
/// without a user id is reported as [`JwtError::MissingSubject`] instead of a
/// generic decoding failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Authenticated user ID
    #[serde(default)]
    pub id: Option<Uuid>,

    /// Issued at (Unix timestamp)
    #[serde(default)]
    pub iat: i64,

    /// Expiration time (Unix timestamp), absent for permanent tokens
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
}

impl Claims {
    /// Creates permanent claims for a user
    pub fn new(user_id: Uuid) -> Self {
        Self {
            id: Some(user_id),
            iat: Utc::now().timestamp(),
            exp: None,
        }
    }

    /// Creates claims that expire after `expires_in`
    ///
    /// ```
    /// use chrono::Duration;
    /// use secondbrain_shared::auth::jwt::Claims;
    /// use uuid::Uuid;
    ///
    /// let claims = Claims::with_expiration(Uuid::new_v4(), Duration::hours(1));
    /// assert!(!claims.is_expired());
    /// ```
    pub fn with_expiration(user_id: Uuid, expires_in: Duration) -> Self {
        let now = Utc::now();

        Self {
            id: Some(user_id),
            iat: now.timestamp(),
            exp: Some((now + expires_in).timestamp()),
        }
    }

    /// Creates claims honoring an optional lifetime in hours
    pub fn for_user(user_id: Uuid, expiration_hours: Option<i64>) -> Self {
        match expiration_hours {
            Some(hours) => Self::with_expiration(user_id, Duration::hours(hours)),
            None => Self::new(user_id),
        }
    }

    /// Checks if the token has expired (never true for permanent tokens)
    pub fn is_expired(&self) -> bool {
        self.exp
            .map(|exp| Utc::now().timestamp() >= exp)
            .unwrap_or(false)
    }
}

/// Creates a signed HS256 token from claims
pub fn create_token(claims: &Claims, secret: &str) -> Result<String, JwtError> {
    let header = Header::new(Algorithm::HS256);
    let key = EncodingKey::from_secret(secret.as_bytes());

    encode(&header, claims, &key)
        .map_err(|e| JwtError::CreateError(format!("Token encoding failed: {}", e)))
}

/// Validates a token and extracts its claims
///
/// Verifies the HS256 signature, rejects the token if it carries an `exp`
/// claim in the past, and requires a user id in the payload.
pub fn validate_token(token: &str, secret: &str) -> Result<Claims, JwtError> {
    let key = DecodingKey::from_secret(secret.as_bytes());

    let mut validation = Validation::new(Algorithm::HS256);
    // `exp` is checked only when present
    validation.required_spec_claims.clear();
    validation.validate_exp = true;

    let token_data = decode::<Claims>(token, &key, &validation).map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => JwtError::Expired,
        _ => JwtError::ValidationError(format!("Token validation failed: {}", e)),
    })?;

    if token_data.claims.id.is_none() {
        return Err(JwtError::MissingSubject);
    }

    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-key-at-least-32-bytes-long";

    #[test]
    fn test_claims_creation() {
        let user_id = Uuid::new_v4();
        let claims = Claims::new(user_id);

        assert_eq!(claims.id, Some(user_id));
        assert!(claims.exp.is_none());
        assert!(!claims.is_expired());
    }

    #[test]
    fn test_for_user() {
        let user_id = Uuid::new_v4();

        assert!(Claims::for_user(user_id, None).exp.is_none());

        let claims = Claims::for_user(user_id, Some(2));
        let left = claims.exp.unwrap() - claims.iat;
        assert_eq!(left, 2 * 3600);
    }

    #[test]
    fn test_create_and_validate_token() {
        let user_id = Uuid::new_v4();
        let token = create_token(&Claims::new(user_id), SECRET).expect("Should create token");

        let validated = validate_token(&token, SECRET).expect("Should validate token");
        assert_eq!(validated.id, Some(user_id));
        assert!(validated.exp.is_none());
    }

    #[test]
    fn test_permanent_token_has_no_exp_claim() {
        let token = create_token(&Claims::new(Uuid::new_v4()), SECRET).unwrap();

        let key = DecodingKey::from_secret(SECRET.as_bytes());
        let mut validation = Validation::new(Algorithm::HS256);
        validation.required_spec_claims.clear();
        let raw = decode::<serde_json::Value>(&token, &key, &validation).unwrap();

        assert!(raw.claims.get("exp").is_none());
        assert!(raw.claims.get("id").is_some());
    }

    #[test]
    fn test_validate_with_wrong_secret() {
        let token = create_token(&Claims::new(Uuid::new_v4()), "secret1").unwrap();

        let result = validate_token(&token, "wrong-secret");
        assert!(matches!(result, Err(JwtError::ValidationError(_))));
    }

    #[test]
    fn test_validate_garbage() {
        assert!(validate_token("not-a-token", SECRET).is_err());
        assert!(validate_token("", SECRET).is_err());
    }

    #[test]
    fn test_validate_expired_token() {
        let claims = Claims::with_expiration(Uuid::new_v4(), Duration::seconds(-3600));
        assert!(claims.is_expired());

        let token = create_token(&claims, SECRET).unwrap();
        let result = validate_token(&token, SECRET);
        assert!(matches!(result, Err(JwtError::Expired)));
    }

    #[test]
    fn test_validate_token_without_user_id() {
        let claims = Claims {
            id: None,
            iat: Utc::now().timestamp(),
            exp: None,
        };
        let token = create_token(&claims, SECRET).unwrap();

        let result = validate_token(&token, SECRET);
        assert!(matches!(result, Err(JwtError::MissingSubject)));
    }
}
