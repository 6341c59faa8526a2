//! Flat storage-location records as delivered by the record-fetch layer.
//!
//! Records are read-only inputs: the hierarchy builder consumes a slice of
//! them and never keeps a reference once the tree is built.

use serde::{Deserialize, Serialize};

use crate::layout::Point3;

/// Identifier of a location record in the source system.
pub type RecordId = u64;

/// Usage classification of a location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Usage {
    Internal,
    View,
    Supplier,
    Customer,
    Transit,
    Inventory,
    Production,
}

impl Usage {
    /// Structural usages are the ones that make up the physical warehouse.
    pub fn is_structural(self) -> bool {
        matches!(self, Usage::Internal | Usage::View)
    }
}

/// Optional zone hints carried by a record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoneHint {
    /// Explicitly flagged as a floor zone.
    pub is_zone: bool,
    /// Free-form zone kind, e.g. "dock" or "qc".
    pub zone_type: Option<String>,
    /// Footprint along X.
    pub width: Option<f64>,
    /// Footprint along Z.
    pub depth: Option<f64>,
}

/// A single storage location record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationRecord {
    pub id: RecordId,
    pub name: String,
    /// Full slash-delimited path, e.g. `WH/AA/01/AB/02`.
    pub complete_name: String,
    pub usage: Usage,
    pub parent_id: Option<RecordId>,
    /// Warehouse (container) the record is attached to, if known.
    pub container_id: Option<RecordId>,
    /// Explicit coordinates, overriding any computed position.
    pub position: Option<Point3>,
    #[serde(default)]
    pub zone: ZoneHint,
}

impl LocationRecord {
    pub fn new(id: RecordId, name: impl Into<String>, complete_name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            complete_name: complete_name.into(),
            usage: Usage::Internal,
            parent_id: None,
            container_id: None,
            position: None,
            zone: ZoneHint::default(),
        }
    }

    pub fn with_parent(mut self, parent_id: RecordId) -> Self {
        self.parent_id = Some(parent_id);
        self
    }

    pub fn with_container(mut self, container_id: RecordId) -> Self {
        self.container_id = Some(container_id);
        self
    }

    pub fn with_usage(mut self, usage: Usage) -> Self {
        self.usage = usage;
        self
    }

    pub fn with_position(mut self, position: Point3) -> Self {
        self.position = Some(position);
        self
    }

    pub fn with_zone(mut self, hint: ZoneHint) -> Self {
        self.zone = hint;
        self
    }

    /// Path segments with surrounding whitespace trimmed and empty segments dropped.
    pub fn segments(&self) -> Vec<&str> {
        path_segments(&self.complete_name)
    }
}

pub(crate) fn path_segments(path: &str) -> Vec<&str> {
    path.split('/')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .collect()
}
