//! Acting user for a mutation
//!
//! The actor is resolved once at the request boundary and handed explicitly
//! to every service, hook and recorder call.

use crate::models::{Role, User, UserId};

/// Who is performing the current operation
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ActorContext {
    /// No authenticated user
    #[default]
    Anonymous,
    /// An authenticated user account
    User {
        id: UserId,
        username: String,
        role: Role,
    },
}

impl ActorContext {
    pub fn for_user(user: &User) -> Self {
        Self::User {
            id: user.id,
            username: user.username.clone(),
            role: user.role,
        }
    }

    /// Reference persisted on audit records; anonymous actors become `None`
    pub fn actor_ref(&self) -> Option<UserId> {
        match self {
            Self::Anonymous => None,
            Self::User { id, .. } => Some(*id),
        }
    }

    pub fn role(&self) -> Option<Role> {
        match self {
            Self::Anonymous => None,
            Self::User { role, .. } => Some(*role),
        }
    }

    pub fn is_anonymous(&self) -> bool {
        matches!(self, Self::Anonymous)
    }

    /// Name for diagnostics and terminal output
    pub fn label(&self) -> &str {
        match self {
            Self::Anonymous => "anonymous",
            Self::User { username, .. } => username.as_str(),
        }
    }
}
