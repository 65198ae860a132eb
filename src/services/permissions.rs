//! Role checks for service operations

use crate::audit::ActorContext;
use crate::config::Settings;
use crate::error::{TrackerError, TrackerResult};
use crate::models::Role;

/// Kind of access an operation needs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// List and show equipment and stocks
    Read,
    /// Create and update equipment
    Edit,
    /// Delete equipment
    Delete,
    /// Stock and user management, history
    Manage,
}

impl Access {
    fn minimum_role(self) -> Role {
        match self {
            Self::Read => Role::Reader,
            Self::Edit => Role::Standard,
            Self::Delete | Self::Manage => Role::Admin,
        }
    }

    fn describe(self) -> &'static str {
        match self {
            Self::Read => "read data",
            Self::Edit => "edit equipment",
            Self::Delete => "delete equipment",
            Self::Manage => "manage stocks, users and history",
        }
    }
}

/// Role the actor acts with
///
/// Anonymous operators act as admin when the settings allow it and as
/// readers otherwise.
pub fn effective_role(actor: &ActorContext, settings: &Settings) -> Role {
    match actor.role() {
        Some(role) => role,
        None if settings.allow_anonymous => Role::Admin,
        None => Role::Reader,
    }
}

/// Check that the actor may perform an operation, returning its role
pub fn authorize(
    actor: &ActorContext,
    access: Access,
    settings: &Settings,
) -> TrackerResult<Role> {
    let role = effective_role(actor, settings);
    if role >= access.minimum_role() {
        Ok(role)
    } else {
        Err(TrackerError::PermissionDenied(format!(
            "{} ({}) may not {}",
            actor.label(),
            role,
            access.describe()
        )))
    }
}
