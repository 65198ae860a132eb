//! equiptrack - equipment inventory tracker with a durable audit trail
//!
//! Records equipment, its stock (warehouse) assignment and the users who
//! change it. Every create, update and delete of a piece of equipment leaves
//! an audit log entry, and every stock reassignment leaves a transfer record.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Data directory resolution and settings
//! - `error`: Custom error types
//! - `models`: Equipment, stocks, users and typed IDs
//! - `storage`: JSON file storage layer with units of work
//! - `audit`: Change tracking, actor context and audit entries
//! - `services`: Business logic layer
//! - `display`: Terminal formatting
//! - `export`: CSV and JSON export of history
//! - `cli`: Command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use equiptrack::audit::ActorContext;
//! use equiptrack::config::{Settings, TrackerPaths};
//! use equiptrack::services::EquipmentService;
//! use equiptrack::storage::Storage;
//!
//! let paths = TrackerPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let storage = Storage::new(paths)?;
//! storage.load_all()?;
//!
//! let service = EquipmentService::new(&storage, &settings);
//! let equipment = service.create(&ActorContext::Anonymous, new_equipment)?;
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{TrackerError, TrackerResult};
