//! Display formatting for terminal output
//!
//! Plain-text tables and detail views for equipment, stocks and history.

pub mod equipment;
pub mod history;

pub use equipment::{format_equipment_details, format_equipment_list, format_stock_list};
pub use history::{format_audit_rows, format_transfer_rows};
