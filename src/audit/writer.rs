//! Audit log writer
//!
//! Persists one `AuditLogEntry` per lifecycle event. The detail text is
//! rendered by the caller; the writer stamps the time, normalizes the actor
//! and appends the entry to the log table of the current unit of work.

use chrono::Utc;
use tracing::debug;

use crate::error::TrackerResult;
use crate::models::EquipmentId;
use crate::storage::AuditLogRepository;

use super::actor::ActorContext;
use super::entry::{AuditAction, AuditLogEntry};

/// Writes entries to the audit log
pub struct AuditLogWriter<'a> {
    log: &'a AuditLogRepository,
}

impl<'a> AuditLogWriter<'a> {
    pub fn new(log: &'a AuditLogRepository) -> Self {
        Self { log }
    }

    /// Record one event
    ///
    /// Anonymous actors are stored as no actor. Fails only when the store
    /// cannot be used; the error is returned so the enclosing unit of work
    /// rolls back.
    pub fn record(
        &self,
        action: AuditAction,
        subject: Option<EquipmentId>,
        actor: &ActorContext,
        detail: impl Into<String>,
    ) -> TrackerResult<AuditLogEntry> {
        let timestamp = self.log.next_timestamp(Utc::now())?;
        let entry = AuditLogEntry::new(action, timestamp, subject, actor.actor_ref(), detail);

        self.log.append(entry.clone())?;
        debug!(
            action = %entry.action,
            subject = ?entry.subject,
            actor = actor.label(),
            "audit entry recorded"
        );

        Ok(entry)
    }
}
