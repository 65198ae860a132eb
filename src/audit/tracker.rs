//! Change tracking for equipment
//!
//! A `FieldSnapshot` is an immutable copy of every tracked field of an
//! equipment record (everything except its key). The caller captures one
//! before mutating and one after saving; `ChangeSet::between` compares them.

use std::fmt;

use crate::models::{Equipment, StockId};

/// Fields of an equipment record that are compared across a save
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrackedField {
    Name,
    Model,
    Brand,
    Category,
    AssetTag,
    Status,
    Description,
    SerialNumber,
    Stock,
}

impl TrackedField {
    /// All tracked fields in declaration order
    pub const ALL: [TrackedField; 9] = [
        TrackedField::Name,
        TrackedField::Model,
        TrackedField::Brand,
        TrackedField::Category,
        TrackedField::AssetTag,
        TrackedField::Status,
        TrackedField::Description,
        TrackedField::SerialNumber,
        TrackedField::Stock,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TrackedField::Name => "name",
            TrackedField::Model => "model",
            TrackedField::Brand => "brand",
            TrackedField::Category => "category",
            TrackedField::AssetTag => "asset_tag",
            TrackedField::Status => "status",
            TrackedField::Description => "description",
            TrackedField::SerialNumber => "serial_number",
            TrackedField::Stock => "stock",
        }
    }

    fn read(&self, equipment: &Equipment) -> FieldValue {
        match self {
            TrackedField::Name => FieldValue::Text(equipment.name.clone()),
            TrackedField::Model => FieldValue::Text(equipment.model.clone()),
            TrackedField::Brand => FieldValue::Text(equipment.brand.clone()),
            TrackedField::Category => FieldValue::Text(equipment.category.clone()),
            TrackedField::AssetTag => FieldValue::Integer(equipment.asset_tag),
            TrackedField::Status => FieldValue::Text(equipment.status.clone()),
            TrackedField::Description => FieldValue::Text(equipment.description.clone()),
            TrackedField::SerialNumber => FieldValue::Text(equipment.serial_number.clone()),
            TrackedField::Stock => FieldValue::Reference(equipment.stock_id),
        }
    }
}

impl fmt::Display for TrackedField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Value of a tracked field
///
/// Foreign references hold the identifier only; resolving it to a display
/// name is left to the renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Integer(i64),
    Reference(Option<StockId>),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::Integer(n) => write!(f, "{}", n),
            FieldValue::Reference(Some(id)) => write!(f, "{}", id),
            FieldValue::Reference(None) => f.write_str("none"),
        }
    }
}

/// Tracked field values of one equipment record at one point in time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSnapshot {
    values: Vec<(TrackedField, FieldValue)>,
}

impl FieldSnapshot {
    pub fn capture(equipment: &Equipment) -> Self {
        Self {
            values: TrackedField::ALL
                .iter()
                .map(|field| (*field, field.read(equipment)))
                .collect(),
        }
    }

    pub fn get(&self, field: TrackedField) -> Option<&FieldValue> {
        self.values
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, value)| value)
    }
}

/// One changed field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldChange {
    pub field: TrackedField,
    pub old: FieldValue,
    pub new: FieldValue,
}

/// The fields that differ between two snapshots, in declaration order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet {
    changes: Vec<FieldChange>,
}

impl ChangeSet {
    /// Compare two snapshots of the same record
    pub fn between(before: &FieldSnapshot, after: &FieldSnapshot) -> Self {
        let changes = before
            .values
            .iter()
            .filter_map(|(field, old)| {
                let new = after.get(*field)?;
                (old != new).then(|| FieldChange {
                    field: *field,
                    old: old.clone(),
                    new: new.clone(),
                })
            })
            .collect();

        Self { changes }
    }

    /// Compare against an optional prior state
    ///
    /// A record with no prior persisted state has nothing to diff against and
    /// yields an empty change set.
    pub fn since(before: Option<&FieldSnapshot>, after: &FieldSnapshot) -> Self {
        match before {
            Some(before) => Self::between(before, after),
            None => Self::default(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldChange> {
        self.changes.iter()
    }

    pub fn get(&self, field: TrackedField) -> Option<&FieldChange> {
        self.changes.iter().find(|c| c.field == field)
    }

    /// Old and new stock when the stock reference changed
    pub fn stock_move(&self) -> Option<(Option<StockId>, Option<StockId>)> {
        match self.get(TrackedField::Stock)? {
            FieldChange {
                old: FieldValue::Reference(old),
                new: FieldValue::Reference(new),
                ..
            } => Some((*old, *new)),
            _ => None,
        }
    }
}
