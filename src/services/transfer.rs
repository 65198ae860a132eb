//! Stock transfer recorder
//!
//! Runs on the update path after the row is written. It reads the stock
//! move from the same `ChangeSet` the audit hooks use, so the two records of
//! an update can never disagree about whether the stock changed.

use chrono::Utc;
use tracing::debug;

use crate::audit::{render, ActorContext, ChangeSet, StockTransferRecord};
use crate::error::TrackerResult;
use crate::models::EquipmentId;
use crate::storage::TransferRepository;

pub struct StockTransferRecorder<'a> {
    transfers: &'a TransferRepository,
}

impl<'a> StockTransferRecorder<'a> {
    pub fn new(transfers: &'a TransferRepository) -> Self {
        Self { transfers }
    }

    /// Record a transfer if `changes` moved the equipment between stocks
    pub fn record(
        &self,
        changes: &ChangeSet,
        subject: EquipmentId,
        actor: &ActorContext,
    ) -> TrackerResult<Option<StockTransferRecord>> {
        let Some((from, to)) = changes.stock_move() else {
            return Ok(None);
        };

        let record = StockTransferRecord::new(
            subject,
            actor.actor_ref(),
            Utc::now(),
            render::describe_transfer(from, to),
        );
        self.transfers.append(record.clone())?;
        debug!(equipment = %subject, ?from, ?to, "stock transfer recorded");

        Ok(Some(record))
    }
}
