//! Core data models for equiptrack
//!
//! The inventory domain: equipment, the stocks it is kept in, and the users
//! that change it.

pub mod equipment;
pub mod ids;
pub mod stock;
pub mod user;

pub use equipment::{Equipment, EquipmentPatch, EquipmentValidationError, NewEquipment};
pub use ids::{AuditEntryId, EquipmentId, StockId, TransferId, UserId};
pub use stock::Stock;
pub use user::{Role, User};
