//! Folds per-location stock into the location tree.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::hierarchy::LocationTree;
use crate::record::RecordId;

/// One stock line: a quantity of a product held at a location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockQuant {
    pub location_id: RecordId,
    pub product_id: u64,
    pub product_name: String,
    pub quantity: f64,
}

impl StockQuant {
    pub fn new(
        location_id: RecordId,
        product_id: u64,
        product_name: impl Into<String>,
        quantity: f64,
    ) -> Self {
        Self {
            location_id,
            product_id,
            product_name: product_name.into(),
            quantity,
        }
    }
}

/// Stock held directly at one location, not counting descendants.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DirectStock {
    pub item_count: u32,
    pub total_quantity: f64,
}

impl DirectStock {
    /// Sums quants per location. Only quants with a positive quantity count
    /// as items.
    pub fn from_quants(quants: &[StockQuant]) -> HashMap<RecordId, DirectStock> {
        let mut by_location: HashMap<RecordId, DirectStock> = HashMap::new();
        for quant in quants.iter().filter(|quant| quant.quantity > 0.0) {
            let entry = by_location.entry(quant.location_id).or_default();
            entry.item_count += 1;
            entry.total_quantity += quant.quantity;
        }
        by_location
    }
}

/// Recomputes `item_count` and `total_quantity` for every node.
///
/// Each node ends up with its own direct stock plus the totals of its
/// children. Locations missing from `stock` contribute nothing, and stock
/// for locations outside the tree is ignored.
pub fn aggregate(tree: &mut LocationTree, stock: &HashMap<RecordId, DirectStock>) {
    for id in tree.post_order() {
        let direct = stock
            .get(&tree.node(id).record_id)
            .copied()
            .unwrap_or_default();

        let (child_items, child_quantity) = tree
            .children(id)
            .iter()
            .map(|&child| {
                let node = tree.node(child);
                (node.item_count, node.total_quantity)
            })
            .fold((0u32, 0.0f64), |(items, qty), (i, q)| (items + i, qty + q));

        let node = tree.node_mut(id);
        node.item_count = direct.item_count + child_items;
        node.total_quantity = direct.total_quantity + child_quantity;
    }
}
