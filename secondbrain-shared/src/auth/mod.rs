/// Authentication utilities
///
/// # Modules
///
/// - [`password`]: Argon2id password hashing and the signup password policy
/// - [`jwt`]: HS256 token signing and validation
/// - [`middleware`]: Bearer header parsing and the request identity type
///
/// # Example
///
/// ```
/// use secondbrain_shared::auth::password::{hash_password, verify_password};
/// use secondbrain_shared::auth::jwt::{create_token, validate_token, Claims};
/// use uuid::Uuid;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let hash = hash_password("Passw0rd!")?;
/// assert!(verify_password("Passw0rd!", &hash)?);
///
/// let user_id = Uuid::new_v4();
/// let token = create_token(&Claims::new(user_id), "secret-key")?;
/// assert_eq!(validate_token(&token, "secret-key")?.id, Some(user_id));
/// # Ok(())
/// # }
/// ```

pub mod jwt;
pub mod middleware;
pub mod password;
