/// API route handlers
///
/// - `health`: Health check endpoint
/// - `auth`: Signup and signin
/// - `content`: Saving, listing and deleting content
/// - `brain`: Share links and the public shared view

pub mod auth;
pub mod brain;
pub mod content;
pub mod health;
