//! Stock model
//!
//! A warehouse or storage location equipment can be assigned to.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::StockId;

/// A stock (warehouse)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stock {
    pub id: StockId,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

impl Stock {
    pub fn new(id: StockId, name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into().trim().to_string(),
            description: description.into(),
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Stock name cannot be empty".into());
        }
        if self.name.len() > 100 {
            return Err(format!("Stock name too long ({} chars, max 100)", self.name.len()));
        }
        Ok(())
    }
}

impl fmt::Display for Stock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
