//! Configuration module for equiptrack
//!
//! This module provides configuration management including:
//! - data directory resolution
//! - user settings persistence

pub mod paths;
pub mod settings;

pub use paths::TrackerPaths;
pub use settings::{Settings, StockLabelPolicy};
