//! Location records for a sample warehouse coded `WH`.

use warehouse_planner::code::{LEVEL_CODES, ROW_CODES};
use warehouse_planner::hierarchy::BuildOptions;
use warehouse_planner::record::{LocationRecord, RecordId, Usage};
use warehouse_planner::stock::StockQuant;

pub const WAREHOUSE_ID: RecordId = 1;

pub const ROWS: usize = 4;
pub const BAYS: u8 = 3;
pub const LEVELS: usize = 2;
pub const SIDES: u8 = 2;

// ============================================================================
// Record ids
// ============================================================================

pub const DOCK_1: RecordId = 50;
pub const DOCK_2: RecordId = 51;
pub const INPUT: RecordId = 52;
pub const QUALITY_CONTROL: RecordId = 53;
pub const DOCK_1_LANE: RecordId = 54;

/// Bin `WH/AA/01/XX/09`: the level code is not a real level.
pub const BROKEN_BIN: RecordId = 60;

/// Level `WH/AD/03/AC` with no bins below it.
pub const BARE_LEVEL: RecordId = 70;

/// Record whose parent is not part of the export.
pub const ORPHAN: RecordId = 80;

pub fn row_id(row: usize) -> RecordId {
    100 + row as RecordId
}

pub fn bay_id(row: usize, bay: u8) -> RecordId {
    1_000 + row as RecordId * 10 + RecordId::from(bay)
}

pub fn level_id(row: usize, bay: u8, level: usize) -> RecordId {
    10_000 + row as RecordId * 100 + RecordId::from(bay) * 10 + level as RecordId
}

pub fn bin_id(row: usize, bay: u8, level: usize, side: u8) -> RecordId {
    100_000
        + row as RecordId * 1_000
        + RecordId::from(bay) * 100
        + level as RecordId * 10
        + RecordId::from(side)
}

// ============================================================================
// Records
// ============================================================================

fn record(id: RecordId, parent: RecordId, path: &str) -> LocationRecord {
    let name = path.rsplit('/').next().unwrap_or(path);
    LocationRecord::new(id, name, path)
        .with_parent(parent)
        .with_container(WAREHOUSE_ID)
}

/// Every record of the sample warehouse, in export order (parents first).
pub fn sample_records() -> Vec<LocationRecord> {
    let mut records = vec![LocationRecord::new(WAREHOUSE_ID, "WH", "WH").with_usage(Usage::View)];

    for (row, row_code) in ROW_CODES.iter().enumerate().take(ROWS) {
        let row_path = format!("WH/{row_code}");
        records.push(record(row_id(row), WAREHOUSE_ID, &row_path));

        for bay in 1..=BAYS {
            let bay_path = format!("{row_path}/{bay:02}");
            records.push(record(bay_id(row, bay), row_id(row), &bay_path));

            for (level, level_code) in LEVEL_CODES.iter().enumerate().take(LEVELS) {
                let level_path = format!("{bay_path}/{level_code}");
                records.push(record(level_id(row, bay, level), bay_id(row, bay), &level_path));

                for side in 1..=SIDES {
                    records.push(record(
                        bin_id(row, bay, level, side),
                        level_id(row, bay, level),
                        &format!("{level_path}/{side:02}"),
                    ));
                }
            }
        }
    }

    records.extend([
        record(DOCK_1, WAREHOUSE_ID, "WH/Dock 1"),
        record(DOCK_2, WAREHOUSE_ID, "WH/Dock 2"),
        record(INPUT, WAREHOUSE_ID, "WH/Input"),
        record(QUALITY_CONTROL, WAREHOUSE_ID, "WH/Quality Control"),
        record(DOCK_1_LANE, DOCK_1, "WH/Dock 1/Loading Lane A"),
        record(BROKEN_BIN, bay_id(0, 1), "WH/AA/01/XX/09"),
        record(BARE_LEVEL, bay_id(3, 3), "WH/AD/03/AC"),
        record(ORPHAN, 9_999, "WH/AB/07/AA/01"),
        LocationRecord::new(90, "Acme Corp", "Partners/Vendors/Acme Corp")
            .with_usage(Usage::Supplier),
        LocationRecord::new(91, "AA", "WH2/AA").with_parent(2).with_container(2),
    ]);
    records
}

pub fn sample_options() -> BuildOptions {
    BuildOptions::new(WAREHOUSE_ID).with_code("WH")
}

pub const WIDGET_A: u64 = 1;
pub const WIDGET_B: u64 = 2;
pub const WIDGET_C: u64 = 3;

/// Stock lines spread over a few bins, plus noise the aggregation ignores.
pub fn sample_quants() -> Vec<StockQuant> {
    vec![
        StockQuant::new(bin_id(0, 1, 0, 1), WIDGET_A, "Widget A", 12.0),
        StockQuant::new(bin_id(0, 1, 0, 1), WIDGET_B, "Widget B", 1.0),
        StockQuant::new(bin_id(1, 2, 1, 2), WIDGET_B, "Widget B", 5.0),
        StockQuant::new(bin_id(2, 3, 0, 1), WIDGET_B, "Widget B", 9.0),
        StockQuant::new(bin_id(3, 1, 1, 1), WIDGET_A, "Widget A", 4.5),
        StockQuant::new(BARE_LEVEL, WIDGET_A, "Widget A", 2.0),
        StockQuant::new(bin_id(2, 2, 0, 2), WIDGET_A, "Widget A", 0.0),
        StockQuant::new(424_242, WIDGET_C, "Widget C", 3.0),
    ]
}
