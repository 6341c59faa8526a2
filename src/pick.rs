//! Resolves pick requests against the location tree.
//!
//! Routing only ever sees [`PickItem`]s that sit in a positioned bin.
//! Requests that cannot be placed are kept in
//! [`PickResolution::unresolved`] so callers can report them.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::code::ParsedLocationCode;
use crate::error::ResolveError;
use crate::hierarchy::{LocationNode, LocationTree, NodeId};
use crate::layout::Point3;
use crate::natural::natural_cmp;
use crate::record::RecordId;
use crate::stock::StockQuant;

/// What to pick: a product quantity from a source location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PickRequest {
    pub id: u64,
    pub product_id: u64,
    pub product_name: String,
    pub quantity: f64,
    pub source_location_id: RecordId,
}

impl PickRequest {
    pub fn new(
        id: u64,
        product_id: u64,
        product_name: impl Into<String>,
        quantity: f64,
        source_location_id: RecordId,
    ) -> Self {
        Self {
            id,
            product_id,
            product_name: product_name.into(),
            quantity,
            source_location_id,
        }
    }
}

/// A pick resolved to a positioned bin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PickItem {
    pub id: u64,
    pub product_id: u64,
    pub product_name: String,
    pub quantity: f64,
    pub location_id: RecordId,
    pub location_name: String,
    pub position: Point3,
    pub parsed: Option<ParsedLocationCode>,
    pub level_index: usize,
}

impl PickItem {
    /// Builds an item picked from `position`, with no bin code.
    pub fn at(id: u64, product_name: impl Into<String>, position: Point3) -> Self {
        Self {
            id,
            product_id: 0,
            product_name: product_name.into(),
            quantity: 1.0,
            location_id: 0,
            location_name: String::new(),
            position,
            parsed: None,
            level_index: 0,
        }
    }

    fn from_bin(request: &PickRequest, node: &LocationNode, position: Point3) -> Self {
        Self {
            id: request.id,
            product_id: request.product_id,
            product_name: request.product_name.clone(),
            quantity: request.quantity,
            location_id: node.record_id,
            location_name: node.complete_name.clone(),
            position,
            parsed: node.parsed,
            level_index: node.parsed.map(|parsed| parsed.level_index()).unwrap_or(0),
        }
    }
}

/// A request that could not be placed, and why.
#[derive(Debug, Clone, PartialEq)]
pub struct UnresolvedPick {
    pub request: PickRequest,
    pub error: ResolveError,
}

/// Outcome of resolving a batch of requests.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PickResolution {
    pub items: Vec<PickItem>,
    pub unresolved: Vec<UnresolvedPick>,
}

impl PickResolution {
    pub fn unresolved_count(&self) -> usize {
        self.unresolved.len()
    }

    /// Product names of unresolved requests, first occurrence order, without repeats.
    pub fn unresolved_products(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for pick in &self.unresolved {
            let name = pick.request.product_name.as_str();
            if !names.contains(&name) {
                names.push(name);
            }
        }
        names
    }
}

/// Resolves each request to a positioned bin.
///
/// The request's own source location is used when it is a positioned bin.
/// Otherwise the positioned bin holding the most of the product is used,
/// ties going to the bin that sorts first by path.
pub fn resolve_pick_items(
    tree: &LocationTree,
    requests: &[PickRequest],
    quants: &[StockQuant],
) -> PickResolution {
    let mut resolution = PickResolution::default();

    for request in requests {
        match resolve_one(tree, request, quants) {
            Ok(item) => resolution.items.push(item),
            Err(error) => resolution.unresolved.push(UnresolvedPick {
                request: request.clone(),
                error,
            }),
        }
    }

    if !resolution.unresolved.is_empty() {
        tracing::warn!(
            count = resolution.unresolved_count(),
            products = ?resolution.unresolved_products(),
            "pick requests without a bin"
        );
    }
    resolution
}

fn resolve_one(
    tree: &LocationTree,
    request: &PickRequest,
    quants: &[StockQuant],
) -> Result<PickItem, ResolveError> {
    if request.quantity.is_nan() || request.quantity <= 0.0 {
        return Err(ResolveError::NonPositiveQuantity(request.quantity));
    }

    let source = tree.find_by_record(request.source_location_id);
    if let Some((node, position)) = source.and_then(|id| positioned_bin(tree, id)) {
        return Ok(PickItem::from_bin(request, node, position));
    }

    let fallback = quants
        .iter()
        .filter(|quant| quant.product_id == request.product_id && quant.quantity > 0.0)
        .filter_map(|quant| {
            let id = tree.find_by_record(quant.location_id)?;
            positioned_bin(tree, id).map(|(node, position)| (node, position, quant.quantity))
        })
        .min_by(|a, b| {
            b.2.partial_cmp(&a.2)
                .unwrap_or(Ordering::Equal)
                .then_with(|| natural_cmp(&a.0.complete_name, &b.0.complete_name))
        });

    match (fallback, source) {
        (Some((node, position, _)), _) => Ok(PickItem::from_bin(request, node, position)),
        (None, Some(_)) => Err(ResolveError::NoPositionedBin(request.source_location_id)),
        (None, None) => Err(ResolveError::UnknownLocation(request.source_location_id)),
    }
}

fn positioned_bin(tree: &LocationTree, id: NodeId) -> Option<(&LocationNode, Point3)> {
    let node = tree.node(id);
    if !node.is_bin() {
        return None;
    }
    node.position.map(|position| (node, position))
}
