//! Equipment model
//!
//! An inventory item with a unique asset tag and serial number, optionally
//! assigned to a stock (warehouse).

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{EquipmentId, StockId};

/// Maximum length of the short text fields
pub const MAX_TEXT_LEN: usize = 100;

/// Maximum length of a serial number
pub const MAX_SERIAL_LEN: usize = 30;

/// A tracked piece of equipment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Equipment {
    pub id: EquipmentId,
    pub name: String,
    pub model: String,
    pub brand: String,
    pub category: String,

    /// Patrimony number, unique across all equipment
    pub asset_tag: i64,

    /// Free-form status label (e.g. "active", "maintenance", "retired")
    pub status: String,

    #[serde(default)]
    pub description: String,

    /// Manufacturer serial number, unique across all equipment
    pub serial_number: String,

    /// Stock the equipment is currently assigned to
    #[serde(default)]
    pub stock_id: Option<StockId>,
}

/// Field values for a piece of equipment that has not been stored yet
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewEquipment {
    pub name: String,
    pub model: String,
    pub brand: String,
    pub category: String,
    pub asset_tag: i64,
    pub status: String,
    #[serde(default)]
    pub description: String,
    pub serial_number: String,
    #[serde(default)]
    pub stock_id: Option<StockId>,
}

impl NewEquipment {
    /// Attach the key assigned by storage
    pub fn into_equipment(self, id: EquipmentId) -> Equipment {
        Equipment {
            id,
            name: self.name.trim().to_string(),
            model: self.model.trim().to_string(),
            brand: self.brand.trim().to_string(),
            category: self.category.trim().to_string(),
            asset_tag: self.asset_tag,
            status: self.status.trim().to_string(),
            description: self.description,
            serial_number: self.serial_number.trim().to_string(),
            stock_id: self.stock_id,
        }
    }
}

/// Partial update of an equipment record
///
/// `None` leaves the field untouched. For `stock_id` the outer option selects
/// whether the field is touched and the inner one whether a stock is assigned.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EquipmentPatch {
    pub name: Option<String>,
    pub model: Option<String>,
    pub brand: Option<String>,
    pub category: Option<String>,
    pub asset_tag: Option<i64>,
    pub status: Option<String>,
    pub description: Option<String>,
    pub serial_number: Option<String>,
    pub stock_id: Option<Option<StockId>>,
}

impl EquipmentPatch {
    /// Drop the identity fields that only administrators may change
    pub fn without_identity_fields(mut self) -> Self {
        self.asset_tag = None;
        self.serial_number = None;
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Apply every present field onto `equipment`
    pub fn apply_to(&self, equipment: &mut Equipment) {
        if let Some(name) = &self.name {
            equipment.name = name.trim().to_string();
        }
        if let Some(model) = &self.model {
            equipment.model = model.trim().to_string();
        }
        if let Some(brand) = &self.brand {
            equipment.brand = brand.trim().to_string();
        }
        if let Some(category) = &self.category {
            equipment.category = category.trim().to_string();
        }
        if let Some(asset_tag) = self.asset_tag {
            equipment.asset_tag = asset_tag;
        }
        if let Some(status) = &self.status {
            equipment.status = status.trim().to_string();
        }
        if let Some(description) = &self.description {
            equipment.description.clone_from(description);
        }
        if let Some(serial) = &self.serial_number {
            equipment.serial_number = serial.trim().to_string();
        }
        if let Some(stock_id) = self.stock_id {
            equipment.stock_id = stock_id;
        }
    }
}

impl Equipment {
    /// Validate the equipment
    pub fn validate(&self) -> Result<(), EquipmentValidationError> {
        let required = [
            ("name", &self.name),
            ("model", &self.model),
            ("brand", &self.brand),
            ("category", &self.category),
            ("status", &self.status),
        ];

        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(EquipmentValidationError::EmptyField(field));
            }
            let len = value.chars().count();
            if len > MAX_TEXT_LEN {
                return Err(EquipmentValidationError::TooLong {
                    field,
                    len,
                    max: MAX_TEXT_LEN,
                });
            }
        }

        if self.serial_number.trim().is_empty() {
            return Err(EquipmentValidationError::EmptyField("serial number"));
        }
        let serial_len = self.serial_number.chars().count();
        if serial_len > MAX_SERIAL_LEN {
            return Err(EquipmentValidationError::TooLong {
                field: "serial number",
                len: serial_len,
                max: MAX_SERIAL_LEN,
            });
        }

        Ok(())
    }
}

impl fmt::Display for Equipment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (#{})", self.name, self.asset_tag)
    }
}

/// Validation errors for equipment
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EquipmentValidationError {
    EmptyField(&'static str),
    TooLong {
        field: &'static str,
        len: usize,
        max: usize,
    },
}

impl fmt::Display for EquipmentValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyField(field) => write!(f, "Equipment {} cannot be empty", field),
            Self::TooLong { field, len, max } => {
                write!(f, "Equipment {} too long ({} chars, max {})", field, len, max)
            }
        }
    }
}

impl std::error::Error for EquipmentValidationError {}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    /// A valid unsaved equipment record
    pub fn new_equipment(asset_tag: i64, serial: &str) -> NewEquipment {
        NewEquipment {
            name: "Laptop".into(),
            model: "T14".into(),
            brand: "Lenovo".into(),
            category: "Computers".into(),
            asset_tag,
            status: "active".into(),
            description: String::new(),
            serial_number: serial.into(),
            stock_id: None,
        }
    }
}
