use crate::db::models::user_models::{SessionUser, UserRole};
use crate::error::Error;

pub mod auth;
pub mod password;

pub use auth::AuthService;

/// Check whether a session carries the required role
pub fn has_role(user: &SessionUser, required_role: UserRole) -> bool {
    match required_role {
        UserRole::Admin => user.role == UserRole::Admin,
        UserRole::Viewer => true, // All roles can do viewer actions
    }
}

/// Fail unless `actor` is a logged-in admin
pub fn require_admin(actor: Option<&SessionUser>) -> Result<&SessionUser, Error> {
    let user = actor.ok_or_else(|| Error::Authentication("Not logged in".to_string()))?;
    if !has_role(user, UserRole::Admin) {
        return Err(Error::Authorization(format!(
            "User {} is not an admin",
            user.username
        )));
    }
    Ok(user)
}
