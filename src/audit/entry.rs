//! Audit record data structures
//!
//! Defines the action kinds, the audit log entry and the stock transfer
//! record. Both records are immutable once created.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::{AuditEntryId, EquipmentId, TransferId, UserId};

/// Lifecycle event recorded in the audit log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AuditAction {
    /// Equipment was created
    Created,
    /// Equipment was updated
    Updated,
    /// Equipment was deleted
    Deleted,
}

impl AuditAction {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "created" | "create" => Some(Self::Created),
            "updated" | "update" => Some(Self::Updated),
            "deleted" | "delete" => Some(Self::Deleted),
            _ => None,
        }
    }
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuditAction::Created => write!(f, "CREATED"),
            AuditAction::Updated => write!(f, "UPDATED"),
            AuditAction::Deleted => write!(f, "DELETED"),
        }
    }
}

/// A single audit log entry
///
/// `subject` and `actor` are non-owning: they are cleared when the equipment
/// or the user is removed, and the entry itself is kept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditLogEntry {
    pub id: AuditEntryId,

    pub action: AuditAction,

    /// When the event was recorded (UTC), non-decreasing across entries
    pub timestamp: DateTime<Utc>,

    /// Pre-rendered human-readable description
    pub detail: String,

    #[serde(default)]
    pub subject: Option<EquipmentId>,

    #[serde(default)]
    pub actor: Option<UserId>,
}

impl AuditLogEntry {
    pub fn new(
        action: AuditAction,
        timestamp: DateTime<Utc>,
        subject: Option<EquipmentId>,
        actor: Option<UserId>,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            id: AuditEntryId::new(),
            action,
            timestamp,
            detail: detail.into(),
            subject,
            actor,
        }
    }
}

/// A stock reassignment of one piece of equipment
///
/// Owned by its subject: removing the equipment removes its transfer records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockTransferRecord {
    pub id: TransferId,
    pub subject: EquipmentId,
    #[serde(default)]
    pub actor: Option<UserId>,
    pub timestamp: DateTime<Utc>,
    pub description: String,
}

impl StockTransferRecord {
    pub fn new(
        subject: EquipmentId,
        actor: Option<UserId>,
        timestamp: DateTime<Utc>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: TransferId::new(),
            subject,
            actor,
            timestamp,
            description: description.into(),
        }
    }
}
