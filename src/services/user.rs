//! User service
//!
//! User accounts and resolution of the acting user at the request boundary.

use tracing::info;

use crate::audit::ActorContext;
use crate::config::Settings;
use crate::error::{TrackerError, TrackerResult};
use crate::models::{Role, User};
use crate::storage::Storage;

use super::permissions::{authorize, Access};

/// Service for user management
pub struct UserService<'a> {
    storage: &'a Storage,
    settings: &'a Settings,
}

impl<'a> UserService<'a> {
    pub fn new(storage: &'a Storage, settings: &'a Settings) -> Self {
        Self { storage, settings }
    }

    /// Create a new user account
    pub fn create(
        &self,
        actor: &ActorContext,
        username: &str,
        name: &str,
        email: &str,
        role: Role,
    ) -> TrackerResult<User> {
        authorize(actor, Access::Manage, self.settings)?;

        let user = self.storage.transaction(|storage| {
            let user = User {
                id: storage.users.next_id()?,
                username: username.trim().to_string(),
                name: name.trim().to_string(),
                email: email.trim().to_string(),
                role,
            };
            user.validate().map_err(TrackerError::Validation)?;

            storage.users.insert(user.clone())?;
            Ok(user)
        })?;

        info!(user = %user.id, username = %user.username, role = %user.role, "user created");
        Ok(user)
    }

    /// List all users
    pub fn list(&self) -> TrackerResult<Vec<User>> {
        self.storage.users.get_all()
    }

    pub fn find_by_username(&self, username: &str) -> TrackerResult<Option<User>> {
        self.storage.users.get_by_username(username)
    }

    /// Change the name, email or role of a user account
    ///
    /// Fields passed as `None` are left as they are.
    pub fn update(
        &self,
        actor: &ActorContext,
        username: &str,
        name: Option<&str>,
        email: Option<&str>,
        role: Option<Role>,
    ) -> TrackerResult<User> {
        authorize(actor, Access::Manage, self.settings)?;

        let user = self.storage.transaction(|storage| {
            let mut user = storage
                .users
                .get_by_username(username)?
                .ok_or_else(|| TrackerError::user_not_found(username))?;

            if let Some(name) = name {
                user.name = name.trim().to_string();
            }
            if let Some(email) = email {
                user.email = email.trim().to_string();
            }
            if let Some(role) = role {
                user.role = role;
            }
            user.validate().map_err(TrackerError::Validation)?;

            storage.users.update(user.clone())?;
            Ok(user)
        })?;

        info!(user = %user.id, username = %user.username, role = %user.role, "user updated");
        Ok(user)
    }

    /// Delete a user account
    ///
    /// Audit entries and transfer records written by the user are kept and
    /// lose their actor.
    pub fn delete(&self, actor: &ActorContext, username: &str) -> TrackerResult<User> {
        authorize(actor, Access::Manage, self.settings)?;

        let user = self.storage.transaction(|storage| {
            let user = storage
                .users
                .get_by_username(username)?
                .ok_or_else(|| TrackerError::user_not_found(username))?;
            storage.delete_user(user.id)
        })?;

        info!(user = %user.id, username = %user.username, "user deleted");
        Ok(user)
    }

    /// Resolve the acting user from a username
    ///
    /// No username, or a blank one, is the anonymous operator. A username
    /// that matches no account is an error.
    pub fn resolve_actor(&self, username: Option<&str>) -> TrackerResult<ActorContext> {
        match username.map(str::trim).filter(|u| !u.is_empty()) {
            None => Ok(ActorContext::Anonymous),
            Some(username) => self
                .storage
                .users
                .get_by_username(username)?
                .map(|user| ActorContext::for_user(&user))
                .ok_or_else(|| TrackerError::user_not_found(username)),
        }
    }
}
