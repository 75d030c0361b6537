use crate::config::SecurityConfig;
use crate::db::models::new_id;
use crate::db::models::user_models::{LoginCredentials, SessionUser, User, UserRole};
use crate::db::repositories::UsersRepository;
use crate::db::{keys, RecordStore};
use crate::error::Error;
use crate::security::{password, require_admin};
use anyhow::Result;
use log::{error, info};

/// Authentication service for handling signup, login and user management
pub struct AuthService {
    users_repo: UsersRepository,
    records: RecordStore,
    config: SecurityConfig,
}

impl AuthService {
    /// Create a new authentication service
    pub fn new(records: RecordStore, config: &SecurityConfig) -> Self {
        Self {
            users_repo: UsersRepository::new(records.clone()),
            records,
            config: config.clone(),
        }
    }

    /// The logged-in user, if any
    pub fn active_user(&self) -> Option<SessionUser> {
        self.records.get(keys::ACTIVE_USER, None)
    }

    fn set_active_user(&self, user: &SessionUser) {
        self.records.set(keys::ACTIVE_USER, &Some(user));
    }

    /// Register a new user.
    ///
    /// The first user is always an admin and is logged in straight away.
    /// Later users get `role` (viewer by default) and the current session is
    /// left alone.
    pub fn signup(&self, username: &str, password: &str, role: Option<UserRole>) -> Result<User> {
        if self.users_repo.get_by_username(username).is_some() {
            error!("Signup failed: Username already exists: {}", username);
            return Err(Error::AlreadyExists("Username already exists".to_string()).into());
        }

        let first_user = self.users_repo.count() == 0;
        let role = if first_user {
            UserRole::Admin
        } else {
            role.unwrap_or(UserRole::Viewer)
        };

        let user = User {
            id: new_id("user"),
            username: username.to_string(),
            password_hash: password::hash_password(password, &self.config)?,
            role,
        };
        self.users_repo.create(&user);

        if first_user {
            self.set_active_user(&SessionUser::from(&user));
        }

        info!("New user registered: {} ({})", username, role);
        Ok(user)
    }

    /// Login a user with username/password
    pub fn login(&self, credentials: &LoginCredentials) -> Result<SessionUser> {
        let user = self
            .users_repo
            .get_by_username(&credentials.username)
            .ok_or_else(|| Error::Authentication("Invalid username or password".to_string()))?;

        let valid = password::verify_password(&credentials.password, &user.password_hash)?;
        if !valid {
            return Err(Error::Authentication("Invalid username or password".to_string()).into());
        }

        let session = SessionUser::from(&user);
        self.set_active_user(&session);

        info!("User logged in: {}", user.username);
        Ok(session)
    }

    pub fn logout(&self) {
        if let Some(user) = self.active_user() {
            info!("User logged out: {}", user.username);
        }
        self.records.remove(keys::ACTIVE_USER);
    }

    /// Add a user (admin function)
    pub fn create_user(
        &self,
        actor: Option<&SessionUser>,
        username: &str,
        password: &str,
        role: UserRole,
    ) -> Result<User> {
        require_admin(actor)?;

        if password.is_empty() {
            return Err(Error::Validation("Password is required for new users".to_string()).into());
        }
        if self.users_repo.get_by_username(username).is_some() {
            return Err(Error::AlreadyExists("Username already exists".to_string()).into());
        }

        let user = User {
            id: new_id("user"),
            username: username.to_string(),
            password_hash: password::hash_password(password, &self.config)?,
            role,
        };
        Ok(self.users_repo.create(&user))
    }

    /// Edit a user (admin function). The password only changes when a
    /// non-empty one is given.
    pub fn update_user(
        &self,
        actor: Option<&SessionUser>,
        user_id: &str,
        username: &str,
        new_password: Option<&str>,
        role: UserRole,
    ) -> Result<User> {
        require_admin(actor)?;

        let mut user = self
            .users_repo
            .get_by_id(user_id)
            .ok_or_else(|| Error::NotFound("User not found".to_string()))?;

        if let Some(other) = self.users_repo.get_by_username(username) {
            if other.id != user.id {
                return Err(Error::AlreadyExists("Username already exists".to_string()).into());
            }
        }

        user.username = username.to_string();
        user.role = role;
        if let Some(new_password) = new_password.filter(|p| !p.is_empty()) {
            user.password_hash = password::hash_password(new_password, &self.config)?;
        }

        let updated = self.users_repo.update(&user)?;
        info!("User updated: {} ({})", updated.username, updated.role);
        Ok(updated)
    }

    /// Remove a user (admin function). Admins cannot delete themselves.
    pub fn delete_user(&self, actor: Option<&SessionUser>, user_id: &str) -> Result<()> {
        let admin = require_admin(actor)?;
        if admin.id == user_id {
            return Err(Error::Validation("Cannot delete yourself".to_string()).into());
        }

        if !self.users_repo.delete(user_id) {
            return Err(Error::NotFound("User not found".to_string()).into());
        }

        info!("User {} deleted by {}", user_id, admin.username);
        Ok(())
    }

    /// Change the caller's own password
    pub fn change_password(
        &self,
        user_id: &str,
        current_password: &str,
        new_password: &str,
    ) -> Result<()> {
        let mut user = self
            .users_repo
            .get_by_id(user_id)
            .ok_or_else(|| Error::NotFound("User not found".to_string()))?;

        let valid = password::verify_password(current_password, &user.password_hash)?;
        if !valid {
            return Err(Error::Authentication("Current password is incorrect".to_string()).into());
        }

        user.password_hash = password::hash_password(new_password, &self.config)?;
        self.users_repo.update(&user)?;

        info!("Password changed for user: {}", user.username);
        Ok(())
    }

    /// Reset user password (admin function), returning the new password
    pub fn reset_password(&self, actor: Option<&SessionUser>, user_id: &str) -> Result<String> {
        require_admin(actor)?;

        let mut user = self
            .users_repo
            .get_by_id(user_id)
            .ok_or_else(|| Error::NotFound("User not found".to_string()))?;

        let new_password = password::generate_random_password(12);
        user.password_hash = password::hash_password(&new_password, &self.config)?;
        self.users_repo.update(&user)?;

        info!("Password reset for user: {}", user.username);
        Ok(new_password)
    }
}
