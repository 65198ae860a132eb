//! User repository for JSON storage

use std::path::PathBuf;

use crate::error::TrackerError;
use crate::models::{User, UserId};

use super::table::{Record, Table, TableCheckpoint};

impl Record for User {
    type Key = UserId;

    fn key(&self) -> UserId {
        self.id
    }
}

/// Repository for user persistence
pub struct UserRepository {
    table: Table<User>,
}

impl UserRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            table: Table::new(path),
        }
    }

    pub fn load(&self) -> Result<(), TrackerError> {
        self.table.load()
    }

    pub fn save(&self) -> Result<(), TrackerError> {
        self.table.save()
    }

    pub fn next_id(&self) -> Result<UserId, TrackerError> {
        Ok(UserId::new(self.table.allocate_key()?))
    }

    pub fn get(&self, id: UserId) -> Result<Option<User>, TrackerError> {
        self.table.get(id)
    }

    /// All users ordered by username
    pub fn get_all(&self) -> Result<Vec<User>, TrackerError> {
        let mut users = self.table.all()?;
        users.sort_by(|a, b| a.username.cmp(&b.username));
        Ok(users)
    }

    /// Find a user by username (case-insensitive)
    pub fn get_by_username(&self, username: &str) -> Result<Option<User>, TrackerError> {
        let wanted = username.trim().to_lowercase();
        Ok(self
            .table
            .filter(|u| u.username.to_lowercase() == wanted)?
            .into_iter()
            .next())
    }

    /// Insert a user, rejecting duplicate usernames and emails
    pub fn insert(&self, user: User) -> Result<(), TrackerError> {
        self.check_unique(&user)?;
        self.table.push(user)
    }

    /// Replace an existing user, rejecting collisions with other accounts
    pub fn update(&self, user: User) -> Result<(), TrackerError> {
        self.check_unique(&user)?;
        let username = user.username.clone();
        if !self.table.replace(user)? {
            return Err(TrackerError::user_not_found(username));
        }
        Ok(())
    }

    fn check_unique(&self, candidate: &User) -> Result<(), TrackerError> {
        let username = candidate.username.to_lowercase();
        if self
            .table
            .any(|u| u.id != candidate.id && u.username.to_lowercase() == username)?
        {
            return Err(TrackerError::Conflict {
                field: "username",
                value: candidate.username.clone(),
            });
        }

        let email = candidate.email.to_lowercase();
        if self
            .table
            .any(|u| u.id != candidate.id && u.email.to_lowercase() == email)?
        {
            return Err(TrackerError::Conflict {
                field: "email",
                value: candidate.email.clone(),
            });
        }

        Ok(())
    }

    pub(super) fn remove(&self, id: UserId) -> Result<Option<User>, TrackerError> {
        self.table.remove(id)
    }

    pub fn count(&self) -> Result<usize, TrackerError> {
        self.table.len()
    }

    pub(super) fn checkpoint(&self) -> Result<TableCheckpoint<User>, TrackerError> {
        self.table.checkpoint()
    }

    pub(super) fn restore(&self, checkpoint: TableCheckpoint<User>) -> Result<(), TrackerError> {
        self.table.restore(checkpoint)
    }
}
