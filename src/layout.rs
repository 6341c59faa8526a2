//! Deterministic 3D layout of racks, zones and pick stands.
//!
//! All coordinates share one unit system (metres with the default layout).
//! X runs along a row (bay by bay), Y is height, Z runs across rows. Rows
//! are placed in back-to-back pairs: the two members of a pair sit
//! `back_to_back_gap` apart and a full aisle separates consecutive pairs.

use serde::{Deserialize, Serialize};

use crate::code::{self, ParsedLocationCode, DEFAULT_BAYS_PER_ROW, LEVEL_CODES};
use crate::error::ConfigError;
use crate::zone::ZoneType;

/// A point in layout space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3 {
    pub const ORIGIN: Point3 = Point3 { x: 0.0, y: 0.0, z: 0.0 };

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Straight-line distance.
    pub fn distance(&self, other: &Point3) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }

    /// Sum of absolute coordinate differences.
    pub fn manhattan(&self, other: &Point3) -> f64 {
        (self.x - other.x).abs() + (self.y - other.y).abs() + (self.z - other.z).abs()
    }

    pub fn offset(&self, dx: f64, dy: f64, dz: f64) -> Self {
        Self::new(self.x + dx, self.y + dy, self.z + dz)
    }
}

/// Extent of the rack block.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub width: f64,
    pub depth: f64,
    pub height: f64,
}

/// Layout constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Layout {
    pub bay_width: f64,
    /// Width of one bin; two bins (sides) share a bay.
    pub bin_width: f64,
    pub level_height: f64,
    /// Walkable width between two row pairs.
    pub aisle_width: f64,
    /// Spacing between the two rows of a back-to-back pair.
    pub back_to_back_gap: f64,
    pub bays_per_row: u8,
    pub levels_per_rack: u8,
    /// Default zone footprint along X.
    pub zone_width: f64,
    /// Default zone footprint along Z.
    pub zone_depth: f64,
    /// Spacing between successive zones of one type.
    pub zone_gap: f64,
    /// Distance from the rack block to the zone perimeter lines.
    pub zone_offset: f64,
    /// Spacing between child zones inside a parent zone.
    pub child_zone_gap: f64,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            bay_width: 2.7,
            bin_width: 1.35,
            level_height: 1.5,
            aisle_width: 3.0,
            back_to_back_gap: 0.3,
            bays_per_row: DEFAULT_BAYS_PER_ROW,
            levels_per_rack: LEVEL_CODES.len() as u8,
            zone_width: 6.0,
            zone_depth: 4.0,
            zone_gap: 1.0,
            zone_offset: 5.0,
            child_zone_gap: 0.5,
        }
    }
}

impl Layout {
    /// Parses a JSON layout document. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let layout: Layout = serde_json::from_str(json)?;
        layout.validate()?;
        Ok(layout)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        ConfigError::require_positive("bay_width", self.bay_width)?;
        ConfigError::require_positive("bin_width", self.bin_width)?;
        ConfigError::require_positive("level_height", self.level_height)?;
        ConfigError::require_positive("aisle_width", self.aisle_width)?;
        ConfigError::require_positive("back_to_back_gap", self.back_to_back_gap)?;
        ConfigError::require_positive("zone_width", self.zone_width)?;
        ConfigError::require_positive("zone_depth", self.zone_depth)?;
        if self.bays_per_row == 0 {
            return Err(ConfigError::ZeroCount("bays_per_row"));
        }
        if self.levels_per_rack == 0 {
            return Err(ConfigError::ZeroCount("levels_per_rack"));
        }
        Ok(())
    }

    /// Z distance from one row pair to the next.
    pub fn row_pitch(&self) -> f64 {
        self.aisle_width + 2.0 * self.back_to_back_gap
    }

    /// Free space between the back row of one pair and the front row of the next.
    pub fn aisle_clearance(&self) -> f64 {
        self.row_pitch() - self.back_to_back_gap
    }

    /// Position of a bin.
    pub fn position_of(&self, parsed: &ParsedLocationCode) -> Point3 {
        let x = f64::from(parsed.bay().saturating_sub(1)) * self.bay_width
            + f64::from(parsed.side().saturating_sub(1)) * self.bin_width;
        let y = parsed.level_index() as f64 * self.level_height;
        let z = self.row_z(parsed.row_index());
        Point3::new(x, y, z)
    }

    fn row_z(&self, row_index: usize) -> f64 {
        let pair = (row_index / 2) as f64;
        let second = if row_index % 2 == 1 { self.back_to_back_gap } else { 0.0 };
        pair * self.row_pitch() + second
    }

    /// Midpoint of a row at floor level.
    pub fn row_center(&self, row: &str) -> Point3 {
        let width = f64::from(self.bays_per_row) * self.bay_width;
        Point3::new(width / 2.0, 0.0, self.row_z(code::row_index(row)))
    }

    /// Extent of a block holding `row_count` rows.
    pub fn warehouse_bounds(&self, row_count: usize) -> Bounds {
        let pair_count = row_count.div_ceil(2) as f64;
        Bounds {
            width: f64::from(self.bays_per_row) * self.bay_width,
            depth: pair_count * self.row_pitch(),
            height: f64::from(self.levels_per_rack) * self.level_height,
        }
    }

    /// Overview camera point: above the block, pulled back in front of it.
    pub fn camera_focus(&self, bounds: &Bounds) -> (Point3, Point3) {
        let target = Point3::new(bounds.width / 2.0, 0.0, bounds.depth / 2.0);
        let eye = Point3::new(
            bounds.width / 2.0,
            bounds.height + bounds.depth.max(bounds.width) / 2.0,
            -bounds.depth.max(self.row_pitch()),
        );
        (eye, target)
    }

    /// Z of the aisle midline nearest to `z`.
    ///
    /// Aisle `k` runs between pair `k - 1` and pair `k`; aisle 0 is the one
    /// in front of the first pair.
    pub fn aisle_center_z(&self, z: f64) -> f64 {
        let half = self.aisle_clearance() / 2.0;
        let k = ((z + half) / self.row_pitch()).round();
        k * self.row_pitch() - half
    }

    /// Where a picker stands to reach a bin.
    ///
    /// The first row of a pair faces the lower-Z aisle and the second row
    /// the higher-Z aisle, so the stand lies on that aisle's midline in
    /// front of the bin. With `at_bin_height` false the stand is on the floor.
    pub fn pick_stand_position(&self, bin: &Point3, row: &str, at_bin_height: bool) -> Point3 {
        let half = self.aisle_clearance() / 2.0;
        let dz = if code::row_index(row) % 2 == 1 { half } else { -half };
        let y = if at_bin_height { bin.y } else { 0.0 };
        Point3::new(bin.x + self.bin_width / 2.0, y, bin.z + dz)
    }

    /// Default position of the `index`-th zone of a type that has no coordinates.
    ///
    /// Each zone type owns one line around the rack block; successive zones
    /// of the type step `zone_width + zone_gap` along that line.
    pub fn zone_position(&self, zone_type: &ZoneType, index: usize, row_count: usize) -> Point3 {
        let bounds = self.warehouse_bounds(row_count);
        let step = index as f64 * (self.zone_width + self.zone_gap);
        let half_w = self.zone_width / 2.0;
        let half_d = self.zone_depth / 2.0;
        let offset = self.zone_offset;

        match zone_type {
            ZoneType::Dock | ZoneType::Shipping => {
                Point3::new(half_w + step, 0.0, -offset - half_d)
            }
            ZoneType::Receiving | ZoneType::Staging => {
                Point3::new(half_w + step, 0.0, bounds.depth + offset + half_d)
            }
            ZoneType::Scrap => Point3::new(-offset - half_w, 0.0, half_d + step),
            ZoneType::QualityControl | ZoneType::Packing => {
                Point3::new(bounds.width + offset + half_w, 0.0, half_d + step)
            }
            ZoneType::Other => {
                Point3::new(-2.0 * offset - self.zone_width - half_w, 0.0, half_d + step)
            }
        }
    }

    /// Position of a child zone along the back edge of its parent zone.
    ///
    /// Positions are zone centres; children line up left to right starting
    /// at the parent's left edge.
    pub fn child_zone_position(
        &self,
        parent: &Point3,
        parent_width: f64,
        parent_depth: f64,
        child_index: usize,
        child_width: f64,
        child_depth: f64,
    ) -> Point3 {
        let x = parent.x - parent_width / 2.0
            + child_width / 2.0
            + child_index as f64 * (child_width + self.child_zone_gap);
        let z = parent.z + parent_depth / 2.0 - child_depth / 2.0;
        Point3::new(x, parent.y, z)
    }
}
