//! Floor zones: docks, staging lanes, scrap and QC areas.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::record::LocationRecord;

/// Kind of non-rack floor area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoneType {
    Dock,
    Staging,
    Receiving,
    Shipping,
    Scrap,
    QualityControl,
    Packing,
    Other,
}

/// Name patterns, checked in order. Word boundaries keep `pack` from
/// matching inside unrelated names.
static ZONE_PATTERNS: LazyLock<Vec<(Regex, ZoneType)>> = LazyLock::new(|| {
    [
        (r"(?i)\b(dock|loading)\b", ZoneType::Dock),
        (r"(?i)\b(staging|buffer)\b", ZoneType::Staging),
        (r"(?i)\b(receiving|inbound|input)\b", ZoneType::Receiving),
        (r"(?i)\b(shipping|outbound|output)\b", ZoneType::Shipping),
        (r"(?i)\b(scrap|waste)\b", ZoneType::Scrap),
        (r"(?i)\b(qc|quality)\b", ZoneType::QualityControl),
        (r"(?i)\b(packing|pack)\b", ZoneType::Packing),
    ]
    .into_iter()
    .filter_map(|(pattern, zone_type)| Regex::new(pattern).ok().map(|re| (re, zone_type)))
    .collect()
});

/// Names the source system creates for every warehouse.
const BUILT_IN_ZONES: [(&str, ZoneType); 5] = [
    ("Input", ZoneType::Receiving),
    ("Output", ZoneType::Shipping),
    ("Packing Zone", ZoneType::Packing),
    ("Quality Control", ZoneType::QualityControl),
    ("Scrap", ZoneType::Scrap),
];

impl ZoneType {
    /// Interprets a free-form zone type hint. Unrecognised hints map to [`ZoneType::Other`].
    pub fn from_hint(hint: &str) -> Self {
        let normalized = hint.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        match normalized.as_str() {
            "dock" => ZoneType::Dock,
            "staging" => ZoneType::Staging,
            "receiving" | "input" => ZoneType::Receiving,
            "shipping" | "output" => ZoneType::Shipping,
            "scrap" => ZoneType::Scrap,
            "qc" | "quality" | "quality_control" => ZoneType::QualityControl,
            "packing" | "pack" => ZoneType::Packing,
            _ => ZoneType::from_name(hint).unwrap_or(ZoneType::Other),
        }
    }

    /// Matches a location name against the zone vocabulary.
    pub fn from_name(name: &str) -> Option<Self> {
        ZONE_PATTERNS
            .iter()
            .find(|(re, _)| re.is_match(name))
            .map(|(_, zone_type)| *zone_type)
    }
}

/// Detects whether a record is a zone, and which kind.
///
/// An explicit hint wins over the built-in names, which win over name
/// pattern matching.
pub fn detect_zone(record: &LocationRecord) -> Option<ZoneType> {
    if let Some(hint) = record.zone.zone_type.as_deref() {
        return Some(ZoneType::from_hint(hint));
    }

    let name = record.name.trim();
    if let Some((_, zone_type)) = BUILT_IN_ZONES
        .iter()
        .find(|(marker, _)| marker.eq_ignore_ascii_case(name))
    {
        return Some(*zone_type);
    }

    match ZoneType::from_name(name) {
        Some(zone_type) => Some(zone_type),
        None if record.zone.is_zone => Some(ZoneType::Other),
        None => None,
    }
}
