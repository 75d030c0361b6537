use crate::{
    db::models::user_models::{User, UserRole},
    db::{keys, RecordStore},
    error::Error,
};
use anyhow::Result;
use tracing::info;

/// Users repository for handling user operations
#[derive(Clone)]
pub struct UsersRepository {
    records: RecordStore,
}

impl UsersRepository {
    /// Create a new users repository
    pub fn new(records: RecordStore) -> Self {
        Self { records }
    }

    /// Get all users
    pub fn get_all(&self) -> Vec<User> {
        self.records.get(keys::USERS, Vec::new())
    }

    pub fn count(&self) -> usize {
        self.get_all().len()
    }

    /// Get user by ID
    pub fn get_by_id(&self, id: &str) -> Option<User> {
        self.get_all().into_iter().find(|u| u.id == id)
    }

    /// Get user by username
    pub fn get_by_username(&self, username: &str) -> Option<User> {
        self.get_all().into_iter().find(|u| u.username == username)
    }

    /// Get users by role
    pub fn get_by_role(&self, role: UserRole) -> Vec<User> {
        self.get_all().into_iter().filter(|u| u.role == role).collect()
    }

    /// Create a new user
    pub fn create(&self, user: &User) -> User {
        info!("Creating new user: {}", user.username);

        let mut users = self.get_all();
        users.push(user.clone());
        self.records.set(keys::USERS, &users);
        user.clone()
    }

    /// Update user
    pub fn update(&self, user: &User) -> Result<User> {
        let mut users = self.get_all();
        let existing = users
            .iter_mut()
            .find(|u| u.id == user.id)
            .ok_or_else(|| Error::NotFound(format!("User not found: {}", user.id)))?;
        *existing = user.clone();

        self.records.set(keys::USERS, &users);
        Ok(user.clone())
    }

    /// Delete user
    pub fn delete(&self, id: &str) -> bool {
        let mut users = self.get_all();
        let before = users.len();
        users.retain(|u| u.id != id);
        if users.len() == before {
            return false;
        }

        self.records.set(keys::USERS, &users);
        true
    }
}
