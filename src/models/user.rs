//! User model
//!
//! Operators that can be attributed as the actor of a change.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::UserId;

/// Access level of a user
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Read-only access
    Reader,
    /// May create and edit equipment but not delete it
    #[default]
    Standard,
    /// Full access, including history and user management
    Admin,
}

impl Role {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "reader" | "read" => Some(Self::Reader),
            "standard" | "default" => Some(Self::Standard),
            "admin" | "administrator" => Some(Self::Admin),
            _ => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reader => write!(f, "reader"),
            Self::Standard => write!(f, "standard"),
            Self::Admin => write!(f, "admin"),
        }
    }
}

/// A user account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    /// Login name, unique
    pub username: String,
    #[serde(default)]
    pub name: String,
    /// Contact email, unique
    pub email: String,
    #[serde(default)]
    pub role: Role,
}

impl User {
    pub fn validate(&self) -> Result<(), String> {
        if self.username.trim().is_empty() {
            return Err("Username cannot be empty".into());
        }
        if self.username.chars().any(char::is_whitespace) {
            return Err(format!("Username '{}' cannot contain spaces", self.username));
        }
        if !self.email.contains('@') {
            return Err(format!("Invalid email address: '{}'", self.email));
        }
        Ok(())
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.username)
    }
}
