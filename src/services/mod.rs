//! Service layer for equiptrack
//!
//! The request-handling layer between the CLI and storage. Every mutation
//! takes the acting user explicitly and runs as one storage unit of work.

pub mod equipment;
pub mod history;
pub mod lifecycle;
pub mod permissions;
pub mod stock;
pub mod transfer;
pub mod user;

pub use equipment::EquipmentService;
pub use history::{AuditRow, HistoryService, TransferRow};
pub use lifecycle::EquipmentHooks;
pub use permissions::{authorize, effective_role, Access};
pub use stock::{StockRemoval, StockService};
pub use transfer::StockTransferRecorder;
pub use user::UserService;
