/// Account endpoints
///
/// # Endpoints
///
/// - `POST /api/v1/signup` - Create an account
/// - `POST /api/v1/signin` - Exchange email and password for a token

use crate::{
    app::AppState,
    error::{ApiError, ApiResult, ValidationErrorDetail},
};
use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use secondbrain_shared::{
    auth::{jwt, password},
    models::user::NewUser,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

/// Signup request
#[derive(Debug, Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(length(min = 3, message = "Username must contain at least 3 characters"))]
    pub username: String,

    #[validate(
        email(message = "Invalid email format"),
        length(min = 8, max = 99, message = "Email must be between 8 and 99 characters")
    )]
    pub email: String,

    /// Checked separately by the password policy
    pub password: String,
}

/// Signin request
#[derive(Debug, Deserialize)]
pub struct SigninRequest {
    pub email: String,
    pub password: String,
}

/// Signin response
#[derive(Debug, Serialize, Deserialize)]
pub struct SigninResponse {
    pub token: String,
}

/// Plain confirmation body
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl SignupRequest {
    /// Runs field validation and the password policy, collecting every failure
    fn check(&self) -> Result<(), Vec<ValidationErrorDetail>> {
        let mut errors: Vec<ValidationErrorDetail> = match self.validate() {
            Ok(()) => Vec::new(),
            Err(e) => e
                .field_errors()
                .iter()
                .flat_map(|(field, errors)| {
                    errors.iter().map(move |error| {
                        ValidationErrorDetail::new(
                            field.to_string(),
                            error
                                .message
                                .as_ref()
                                .map(|m| m.to_string())
                                .unwrap_or_else(|| "Validation failed".to_string()),
                        )
                    })
                })
                .collect(),
        };

        if let Err(message) = password::validate_password_strength(&self.password) {
            errors.push(ValidationErrorDetail::new("password", message));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            // HashMap iteration order is unstable
            errors.sort_by(|a, b| a.field.cmp(&b.field));
            Err(errors)
        }
    }
}

/// Create an account
///
/// ```text
/// POST /api/v1/signup
///
/// { "username": "ada", "email": "ada@example.com", "password": "Passw0rd!" }
/// ```
///
/// # Errors
///
/// - `403 Forbidden`: Email already registered
/// - `411 Length Required`: Validation failed; `details` lists every field
///   error, including a missing or mistyped field or a body that is not JSON
/// - `500 Internal Server Error`: Store failure
pub async fn signup(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<MessageResponse>> {
    let Json(body) = payload.map_err(|rejection| body_error(rejection.body_text()))?;

    // Duplicate email wins over validation failures
    if let Some(email) = body.get("email").and_then(Value::as_str) {
        if state.store.find_user_by_email(email).await?.is_some() {
            return Err(ApiError::Conflict("Email already exist".to_string()));
        }
    }

    let req: SignupRequest =
        serde_json::from_value(body).map_err(|e| body_error(e.to_string()))?;

    req.check().map_err(ApiError::ValidationError)?;

    let password_hash = password::hash_password(&req.password)?;

    let user = state
        .store
        .create_user(NewUser {
            username: req.username,
            email: req.email,
            password_hash,
        })
        .await?;

    tracing::info!(user_id = %user.id, "User signed up");

    Ok(Json(MessageResponse::new("User created successfully")))
}

fn body_error(message: String) -> ApiError {
    ApiError::ValidationError(vec![ValidationErrorDetail::new("body", message)])
}

/// Exchange credentials for a bearer token
///
/// ```text
/// POST /api/v1/signin
///
/// { "email": "ada@example.com", "password": "Passw0rd!" }
/// ```
///
/// Unknown email and wrong password are indistinguishable: both answer 403.
pub async fn signin(
    State(state): State<AppState>,
    Json(req): Json<SigninRequest>,
) -> ApiResult<Json<SigninResponse>> {
    let invalid = || ApiError::Unauthorized("Invalid email or password".to_string());

    let user = state
        .store
        .find_user_by_email(&req.email)
        .await?
        .ok_or_else(invalid)?;

    if !password::verify_password(&req.password, &user.password_hash)? {
        tracing::debug!(user_id = %user.id, "Signin rejected");
        return Err(invalid());
    }

    let claims = jwt::Claims::for_user(user.id, state.config.jwt.expiration_hours);
    let token = jwt::create_token(&claims, state.jwt_secret())?;

    tracing::info!(user_id = %user.id, "User signed in");

    Ok(Json(SigninResponse { token }))
}
