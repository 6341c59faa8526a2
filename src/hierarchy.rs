//! Builds the typed location tree from flat location records.
//!
//! The tree is an arena: nodes live in one `Vec` and refer to each other by
//! [`NodeId`]. The arena owns every node, parents list their children, and
//! children keep a plain index back to their parent.
//!
//! Construction runs as separate passes over the arena:
//!
//! 1. filter the records that belong to the target warehouse;
//! 2. classify each record (zone detection first, then path depth) and parse
//!    its bin code;
//! 3. link parents and children, turning orphans into roots;
//! 4. compute and apply reclassification patches for childless levels;
//! 5. sort siblings by natural name order;
//! 6. lay out zones that carry no coordinates.
//!
//! Nothing here fails. A record whose code cannot be parsed still becomes a
//! node, just without a position.

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::code::ParsedLocationCode;
use crate::layout::{Layout, Point3};
use crate::natural::natural_cmp;
use crate::record::{path_segments, LocationRecord, RecordId, Usage};
use crate::zone::{detect_zone, ZoneType};

/// Index of a node in a [`LocationTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Structural type of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    Row,
    Bay,
    Level,
    Bin,
    Zone,
}

impl NodeType {
    fn from_depth(depth: usize) -> Self {
        match depth {
            1 => NodeType::Row,
            2 => NodeType::Bay,
            3 => NodeType::Level,
            _ => NodeType::Bin,
        }
    }
}

/// Zone footprint attached to zone nodes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoneAttributes {
    pub zone_type: ZoneType,
    pub width: f64,
    pub depth: f64,
}

/// A node of the location tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationNode {
    pub record_id: RecordId,
    pub name: String,
    pub complete_name: String,
    pub usage: Usage,
    pub node_type: NodeType,
    /// Depth below the warehouse root (rows are at depth 1).
    pub depth: usize,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub item_count: u32,
    pub total_quantity: f64,
    pub parsed: Option<ParsedLocationCode>,
    /// Absent when the node cannot be placed; renderers skip such nodes.
    pub position: Option<Point3>,
    pub zone: Option<ZoneAttributes>,
    explicit_position: bool,
}

impl LocationNode {
    pub fn has_stock(&self) -> bool {
        self.item_count > 0
    }

    pub fn is_bin(&self) -> bool {
        self.node_type == NodeType::Bin
    }

    /// Relative path segments (below the warehouse code).
    fn relative_segments(&self) -> Vec<&str> {
        let segments = path_segments(&self.complete_name);
        let skip = segments.len().saturating_sub(self.depth);
        segments[skip..].to_vec()
    }
}

/// Which warehouse to build and how to lay it out.
#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// Record id of the warehouse (container) location.
    pub container_id: RecordId,
    /// Path of the warehouse (`WH` or `WH/Stock`), the leading segments of
    /// every path below it. Used when records are not attached to the
    /// container by id.
    pub container_code: Option<String>,
    pub layout: Layout,
}

impl BuildOptions {
    pub fn new(container_id: RecordId) -> Self {
        Self {
            container_id,
            container_code: None,
            layout: Layout::default(),
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.container_code = Some(code.into());
        self
    }

    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }
}

/// Statistics gathered while building a tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildReport {
    pub records_in: usize,
    pub kept: usize,
    pub roots: usize,
    pub zones: usize,
    /// Childless levels retyped as bins.
    pub reclassified: usize,
    /// Bins without a position (unparsable code and no explicit coordinates).
    pub unpositioned_bins: usize,
    /// Parent links dropped because they formed a cycle.
    pub broken_cycles: usize,
    /// Zones laid out on the perimeter, per type.
    pub perimeter_zones: BTreeMap<ZoneType, usize>,
}

/// The location tree of one warehouse.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LocationTree {
    nodes: Vec<LocationNode>,
    roots: Vec<NodeId>,
    by_record: HashMap<RecordId, NodeId>,
    row_count: usize,
    report: BuildReport,
}

impl LocationTree {
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: NodeId) -> &LocationNode {
        &self.nodes[id.0]
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut LocationNode {
        &mut self.nodes[id.0]
    }

    pub fn get(&self, id: NodeId) -> Option<&LocationNode> {
        self.nodes.get(id.0)
    }

    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    pub fn find_by_record(&self, record_id: RecordId) -> Option<NodeId> {
        self.by_record.get(&record_id).copied()
    }

    pub fn find_by_path(&self, complete_name: &str) -> Option<NodeId> {
        self.iter().find(|&id| self.node(id).complete_name == complete_name)
    }

    /// Number of rack rows, counting both row nodes and the rows bins refer to.
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn report(&self) -> &BuildReport {
        &self.report
    }

    /// Ancestors of `id`, nearest first.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.parent(id), move |&current| self.parent(current))
    }

    /// Depth-first pre-order over the whole tree, in sibling order.
    pub fn iter(&self) -> impl Iterator<Item = NodeId> + '_ {
        let mut stack: Vec<NodeId> = self.roots.iter().rev().copied().collect();
        std::iter::from_fn(move || {
            let id = stack.pop()?;
            stack.extend(self.children(id).iter().rev().copied());
            Some(id)
        })
    }

    /// Post-order: every node comes after all of its descendants.
    pub fn post_order(&self) -> Vec<NodeId> {
        let mut order: Vec<NodeId> = self.iter().collect();
        // Reversed pre-order puts every descendant before its ancestors.
        order.reverse();
        order
    }

    /// All bin nodes, in tree order.
    pub fn bins(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.iter().filter(|&id| self.node(id).is_bin())
    }

    /// Nodes whose name or path contains `text`, case-insensitively.
    pub fn search(&self, text: &str) -> Vec<NodeId> {
        let needle = text.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }
        self.iter()
            .filter(|&id| {
                let node = self.node(id);
                node.name.to_lowercase().contains(&needle)
                    || node.complete_name.to_lowercase().contains(&needle)
            })
            .collect()
    }
}

/// Builds the tree for one warehouse.
///
/// `records` may arrive in any order; the resulting tree only depends on the
/// set of records.
pub fn build_hierarchy(records: &[LocationRecord], options: &BuildOptions) -> LocationTree {
    let layout = &options.layout;
    let container = ContainerPath::resolve(records, options);

    let mut kept: Vec<&LocationRecord> = records
        .iter()
        .filter(|record| container.contains(record, options.container_id))
        .collect();
    kept.sort_by_key(|record| record.id);
    kept.dedup_by_key(|record| record.id);

    let mut nodes: Vec<LocationNode> = kept
        .iter()
        .map(|record| classify(record, container.depth, layout))
        .collect();
    let by_record: HashMap<RecordId, NodeId> = nodes
        .iter()
        .enumerate()
        .map(|(index, node)| (node.record_id, NodeId(index)))
        .collect();

    let broken_cycles = link(&mut nodes, &kept, &by_record);

    let patches = reclassification_patches(&nodes, layout);
    let reclassified = patches.len();
    for patch in patches {
        patch.apply(&mut nodes);
    }

    let mut roots: Vec<NodeId> = (0..nodes.len())
        .map(NodeId)
        .filter(|id| nodes[id.0].parent.is_none())
        .collect();
    sort_siblings(&mut nodes, &mut roots);

    let row_count = count_rows(&nodes);
    let mut tree = LocationTree {
        nodes,
        roots,
        by_record,
        row_count,
        report: BuildReport::default(),
    };

    let perimeter_zones = place_zones(&mut tree, layout, BTreeMap::new());

    tree.report = BuildReport {
        records_in: records.len(),
        kept: tree.len(),
        roots: tree.roots.len(),
        zones: tree.nodes.iter().filter(|n| n.node_type == NodeType::Zone).count(),
        reclassified,
        unpositioned_bins: tree
            .nodes
            .iter()
            .filter(|n| n.is_bin() && n.position.is_none())
            .count(),
        broken_cycles,
        perimeter_zones,
    };

    tracing::debug!(
        records_in = tree.report.records_in,
        kept = tree.report.kept,
        roots = tree.report.roots,
        zones = tree.report.zones,
        reclassified = tree.report.reclassified,
        unpositioned_bins = tree.report.unpositioned_bins,
        "built location hierarchy"
    );

    tree
}

/// Where the warehouse sits in the path namespace.
struct ContainerPath<'a> {
    /// Number of path segments naming the warehouse itself.
    depth: usize,
    /// Leading segments that mark a record as inside the warehouse.
    prefix: Vec<&'a str>,
}

impl<'a> ContainerPath<'a> {
    /// Takes the depth from the warehouse's own record when it is part of the
    /// input, otherwise from the configured code.
    fn resolve(records: &[LocationRecord], options: &'a BuildOptions) -> Self {
        let prefix = options
            .container_code
            .as_deref()
            .map(path_segments)
            .unwrap_or_default();
        let depth = records
            .iter()
            .find(|record| record.id == options.container_id)
            .map(|record| record.segments().len())
            .filter(|&depth| depth > 0)
            .unwrap_or(prefix.len().max(1));
        Self { depth, prefix }
    }

    fn contains(&self, record: &LocationRecord, container_id: RecordId) -> bool {
        if record.id == container_id || !record.usage.is_structural() {
            return false;
        }

        let segments = record.segments();
        let attached = record.container_id == Some(container_id);
        let prefixed = !self.prefix.is_empty()
            && segments.len() >= self.prefix.len()
            && segments
                .iter()
                .zip(&self.prefix)
                .all(|(segment, code)| segment.eq_ignore_ascii_case(code));

        if !(attached || prefixed) {
            return false;
        }
        if segments.len() <= self.depth {
            tracing::trace!(
                id = record.id,
                path = %record.complete_name,
                "skipping warehouse root"
            );
            return false;
        }
        true
    }
}

fn classify(record: &LocationRecord, container_depth: usize, layout: &Layout) -> LocationNode {
    let depth = record.segments().len().saturating_sub(container_depth);
    let zone = detect_zone(record).map(|zone_type| zone_attributes(record, zone_type, layout));
    let node_type = if zone.is_some() {
        NodeType::Zone
    } else {
        NodeType::from_depth(depth)
    };

    let mut node = LocationNode {
        record_id: record.id,
        name: record.name.clone(),
        complete_name: record.complete_name.clone(),
        usage: record.usage,
        node_type,
        depth,
        parent: None,
        children: Vec::new(),
        item_count: 0,
        total_quantity: 0.0,
        parsed: None,
        position: record.position,
        zone,
        explicit_position: record.position.is_some(),
    };
    if node_type == NodeType::Bin {
        resolve_code(&mut node, layout);
    }
    node
}

fn zone_attributes(
    record: &LocationRecord,
    zone_type: ZoneType,
    layout: &Layout,
) -> ZoneAttributes {
    ZoneAttributes {
        zone_type,
        width: record.zone.width.filter(|w| *w > 0.0).unwrap_or(layout.zone_width),
        depth: record.zone.depth.filter(|d| *d > 0.0).unwrap_or(layout.zone_depth),
    }
}

/// Parses the bin code from the path tail and places the bin.
///
/// Three-segment tails treat the level as the bin. Deeper paths use the last
/// four segments, then the last three: a rack under a zone area sits one
/// segment deeper than the same rack on the floor.
fn resolve_code(node: &mut LocationNode, layout: &Layout) {
    let segments = node.relative_segments();
    let max_bays = layout.bays_per_row;
    node.parsed = match segments.len() {
        0..=2 => None,
        3 => ParsedLocationCode::from_segments(&segments, max_bays),
        n => ParsedLocationCode::from_segments(&segments[n - 4..], max_bays)
            .or_else(|| ParsedLocationCode::from_segments(&segments[n - 3..], max_bays)),
    };
    if !node.explicit_position {
        node.position = node.parsed.as_ref().map(|parsed| layout.position_of(parsed));
    }
}

/// Links every node to its declared parent. Returns the number of links
/// dropped to break cycles.
fn link(
    nodes: &mut [LocationNode],
    records: &[&LocationRecord],
    by_record: &HashMap<RecordId, NodeId>,
) -> usize {
    for (index, record) in records.iter().enumerate() {
        nodes[index].parent = record
            .parent_id
            .and_then(|parent_id| by_record.get(&parent_id).copied())
            .filter(|parent| parent.0 != index);
    }

    let mut broken = 0;
    for index in 0..nodes.len() {
        let mut seen = HashSet::new();
        let mut current = nodes[index].parent;
        while let Some(parent) = current {
            if parent.0 == index {
                nodes[index].parent = None;
                broken += 1;
                tracing::debug!(record = nodes[index].record_id, "dropped cyclic parent link");
                break;
            }
            if !seen.insert(parent) {
                break;
            }
            current = nodes[parent.0].parent;
        }
    }

    for index in 0..nodes.len() {
        if let Some(parent) = nodes[index].parent {
            nodes[parent.0].children.push(NodeId(index));
        }
    }
    broken
}

/// Retyping of a childless level as a bin.
#[derive(Debug, Clone, PartialEq)]
struct Patch {
    node: NodeId,
    parsed: Option<ParsedLocationCode>,
    position: Option<Point3>,
}

impl Patch {
    fn apply(self, nodes: &mut [LocationNode]) {
        let node = &mut nodes[self.node.0];
        node.node_type = NodeType::Bin;
        node.parsed = self.parsed;
        node.position = self.position;
    }
}

fn reclassification_patches(nodes: &[LocationNode], layout: &Layout) -> Vec<Patch> {
    nodes
        .iter()
        .enumerate()
        .filter(|(_, node)| node.node_type == NodeType::Level && node.children.is_empty())
        .map(|(index, node)| {
            let mut retyped = node.clone();
            retyped.node_type = NodeType::Bin;
            resolve_code(&mut retyped, layout);
            Patch {
                node: NodeId(index),
                parsed: retyped.parsed,
                position: retyped.position,
            }
        })
        .collect()
}

fn sibling_order(a: &LocationNode, b: &LocationNode) -> std::cmp::Ordering {
    natural_cmp(&a.name, &b.name)
        .then_with(|| natural_cmp(&a.complete_name, &b.complete_name))
        .then_with(|| a.record_id.cmp(&b.record_id))
}

fn sort_siblings(nodes: &mut [LocationNode], roots: &mut [NodeId]) {
    roots.sort_by(|a, b| sibling_order(&nodes[a.0], &nodes[b.0]));
    for index in 0..nodes.len() {
        let mut children = std::mem::take(&mut nodes[index].children);
        children.sort_by(|a, b| sibling_order(&nodes[a.0], &nodes[b.0]));
        nodes[index].children = children;
    }
}

fn count_rows(nodes: &[LocationNode]) -> usize {
    let row_nodes = nodes.iter().filter(|n| n.node_type == NodeType::Row).count();
    let coded_rows = nodes
        .iter()
        .filter_map(|n| n.parsed.as_ref())
        .map(|parsed| parsed.row_index() + 1)
        .max()
        .unwrap_or(0);
    row_nodes.max(coded_rows)
}

/// Places zones that carry no coordinates, walking the sorted tree so the
/// per-type counters do not depend on input order. Returns the counters.
fn place_zones(
    tree: &mut LocationTree,
    layout: &Layout,
    mut counters: BTreeMap<ZoneType, usize>,
) -> BTreeMap<ZoneType, usize> {
    let order: Vec<NodeId> = tree.iter().collect();
    let mut child_slots: HashMap<NodeId, usize> = HashMap::new();

    for id in order {
        let node = tree.node(id);
        let Some(zone) = node.zone else {
            continue;
        };
        if node.explicit_position {
            continue;
        }

        let parent_zone = node.parent.and_then(|parent| {
            let parent_node = tree.node(parent);
            match (parent_node.zone, parent_node.position) {
                (Some(attrs), Some(position)) => Some((parent, attrs, position)),
                _ => None,
            }
        });

        let position = match parent_zone {
            Some((parent, attrs, parent_position)) => {
                let slot = child_slots.entry(parent).or_insert(0);
                let position = layout.child_zone_position(
                    &parent_position,
                    attrs.width,
                    attrs.depth,
                    *slot,
                    zone.width,
                    zone.depth,
                );
                *slot += 1;
                position
            }
            None => {
                let counter = counters.entry(zone.zone_type).or_insert(0);
                let position = layout.zone_position(&zone.zone_type, *counter, tree.row_count);
                *counter += 1;
                position
            }
        };
        tree.node_mut(id).position = Some(position);
    }
    counters
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::ZoneHint;

    const WH: RecordId = 1;

    fn rec(id: RecordId, parent: RecordId, path: &str) -> LocationRecord {
        let name = path.rsplit('/').next().unwrap_or(path);
        LocationRecord::new(id, name, path)
            .with_parent(parent)
            .with_container(WH)
    }

    fn options() -> BuildOptions {
        BuildOptions::new(WH).with_code("WH")
    }

    #[test]
    fn test_depth_typing_and_codes() {
        let records = vec![
            LocationRecord::new(WH, "WH", "WH").with_usage(Usage::View),
            rec(10, WH, "WH/AA"),
            rec(11, 10, "WH/AA/01"),
            rec(12, 11, "WH/AA/01/AB"),
            rec(13, 12, "WH/AA/01/AB/02"),
        ];
        let tree = build_hierarchy(&records, &options());
        assert_eq!(tree.len(), 4);
        assert_eq!(tree.roots().len(), 1);

        let types: Vec<NodeType> = tree.iter().map(|id| tree.node(id).node_type).collect();
        assert_eq!(types, vec![NodeType::Row, NodeType::Bay, NodeType::Level, NodeType::Bin]);

        let bin = tree.node(tree.find_by_record(13).unwrap());
        assert_eq!(bin.parsed.unwrap().format(), "AA01AB02");
        assert!(bin.position.is_some());
    }

    #[test]
    fn test_childless_level_becomes_bin() {
        let records = vec![
            rec(10, WH, "WH/AB"),
            rec(11, 10, "WH/AB/04"),
            rec(12, 11, "WH/AB/04/AC"),
        ];
        let tree = build_hierarchy(&records, &options());
        let level = tree.node(tree.find_by_record(12).unwrap());
        assert_eq!(level.node_type, NodeType::Bin);
        assert_eq!(level.parsed.unwrap().format(), "AB04AC01");
        assert_eq!(tree.report().reclassified, 1);
    }

    #[test]
    fn test_unparsable_bin_stays_without_position() {
        let records = vec![rec(10, WH, "WH/AA"), rec(11, 10, "WH/AA/01/XX/09")];
        let tree = build_hierarchy(&records, &options());
        let bin = tree.node(tree.find_by_record(11).unwrap());
        assert_eq!(bin.node_type, NodeType::Bin);
        assert!(bin.parsed.is_none());
        assert!(bin.position.is_none());
        assert_eq!(tree.report().unpositioned_bins, 1);
    }

    #[test]
    fn test_filtering() {
        let records = vec![
            rec(10, WH, "WH/AA"),
            rec(20, 2, "OTHER/AA").with_container(2),
            rec(21, 99, "Vendors/Acme").with_container(WH).with_usage(Usage::Supplier),
            LocationRecord::new(22, "AB", "WH/AB").with_parent(WH),
        ];
        let tree = build_hierarchy(&records, &options());
        let mut ids: Vec<RecordId> = tree.iter().map(|id| tree.node(id).record_id).collect();
        ids.sort();
        assert_eq!(ids, vec![10, 22]);

        let without_code = build_hierarchy(&records, &BuildOptions::new(WH));
        assert_eq!(without_code.len(), 1);
    }

    #[test]
    fn test_cycle_is_broken() {
        let records = vec![rec(10, 11, "WH/AA"), rec(11, 10, "WH/AA/01")];
        let tree = build_hierarchy(&records, &options());
        assert_eq!(tree.report().broken_cycles, 1);
        assert_eq!(tree.roots().len(), 1);
        assert_eq!(tree.iter().count(), 2);
    }

    #[test]
    fn test_zone_layout_and_children() {
        let records = vec![
            rec(10, WH, "WH/AA"),
            rec(30, WH, "WH/Dock 1"),
            rec(31, WH, "WH/Dock 2"),
            rec(32, 30, "WH/Dock 1/Loading Lane A"),
            rec(33, WH, "WH/Mezzanine").with_zone(ZoneHint {
                is_zone: true,
                width: Some(10.0),
                ..ZoneHint::default()
            }),
        ];
        let layout = Layout::default();
        let tree = build_hierarchy(&records, &options());

        let dock1 = tree.node(tree.find_by_record(30).unwrap());
        let dock2 = tree.node(tree.find_by_record(31).unwrap());
        assert_eq!(dock1.position, Some(layout.zone_position(&ZoneType::Dock, 0, 1)));
        assert_eq!(dock2.position, Some(layout.zone_position(&ZoneType::Dock, 1, 1)));

        let lane = tree.node(tree.find_by_record(32).unwrap());
        assert_eq!(lane.node_type, NodeType::Zone);
        let dock1_pos = dock1.position.unwrap();
        assert_eq!(
            lane.position,
            Some(layout.child_zone_position(
                &dock1_pos,
                layout.zone_width,
                layout.zone_depth,
                0,
                layout.zone_width,
                layout.zone_depth
            ))
        );

        let mezzanine = tree.node(tree.find_by_record(33).unwrap());
        assert_eq!(mezzanine.zone.unwrap().zone_type, ZoneType::Other);
        assert_eq!(mezzanine.zone.unwrap().width, 10.0);
        assert_eq!(tree.report().zones, 4);

        // The lane sits inside its dock and is not counted on the perimeter.
        let perimeter = &tree.report().perimeter_zones;
        assert_eq!(perimeter.get(&ZoneType::Dock), Some(&2));
        assert_eq!(perimeter.get(&ZoneType::Other), Some(&1));
    }

    #[test]
    fn test_rack_under_zone_keeps_codes() {
        let records = vec![
            rec(40, WH, "WH/Scrap"),
            rec(41, 40, "WH/Scrap/AA"),
            rec(42, 41, "WH/Scrap/AA/01"),
            rec(43, 42, "WH/Scrap/AA/01/AB"),
            rec(44, 42, "WH/Scrap/AA/01/AC"),
            rec(45, 44, "WH/Scrap/AA/01/AC/02"),
        ];
        let tree = build_hierarchy(&records, &options());

        let scrap = tree.node(tree.find_by_record(40).unwrap());
        assert_eq!(scrap.node_type, NodeType::Zone);
        for id in [41, 42, 43, 44, 45] {
            assert_ne!(tree.node(tree.find_by_record(id).unwrap()).node_type, NodeType::Zone);
        }

        let slot = tree.node(tree.find_by_record(43).unwrap());
        assert_eq!(slot.node_type, NodeType::Bin);
        assert_eq!(slot.parsed.map(|p| p.format()), Some("AA01AB01".to_string()));
        assert!(slot.position.is_some());

        let bin = tree.node(tree.find_by_record(45).unwrap());
        assert_eq!(bin.parsed.map(|p| p.format()), Some("AA01AC02".to_string()));
        assert!(bin.position.is_some());
    }

    #[test]
    fn test_multi_segment_warehouse_path() {
        let records = vec![
            LocationRecord::new(WH, "Stock", "WH/Stock").with_usage(Usage::View),
            rec(10, WH, "WH/Stock/AA"),
            rec(11, 10, "WH/Stock/AA/01"),
            rec(12, 11, "WH/Stock/AA/01/AB"),
            rec(13, 12, "WH/Stock/AA/01/AB/02"),
            rec(14, 11, "WH/Stock/AA/01/AC"),
        ];
        let tree = build_hierarchy(&records, &BuildOptions::new(WH));

        let types: Vec<NodeType> = [10, 11, 12, 13, 14]
            .into_iter()
            .map(|id| tree.node(tree.find_by_record(id).unwrap()).node_type)
            .collect();
        assert_eq!(
            types,
            vec![NodeType::Row, NodeType::Bay, NodeType::Level, NodeType::Bin, NodeType::Bin]
        );
        let bin = tree.node(tree.find_by_record(13).unwrap());
        assert_eq!(bin.parsed.map(|p| p.format()), Some("AA01AB02".to_string()));
        let slot = tree.node(tree.find_by_record(14).unwrap());
        assert_eq!(slot.parsed.map(|p| p.format()), Some("AA01AC01".to_string()));
        assert_eq!(tree.row_count(), 1);
    }

    #[test]
    fn test_multi_segment_code_without_container_ids() {
        let records = vec![
            LocationRecord::new(1, "Stock", "WH/Stock").with_usage(Usage::View),
            LocationRecord::new(10, "AA", "WH/Stock/AA").with_parent(1),
            LocationRecord::new(11, "01", "WH/Stock/AA/01").with_parent(10),
            LocationRecord::new(12, "AB", "WH/Stock/AA/01/AB").with_parent(11),
            LocationRecord::new(20, "Output", "WH/Output"),
        ];
        let tree = build_hierarchy(&records, &BuildOptions::new(999).with_code("wh/stock"));

        assert_eq!(tree.len(), 3);
        assert_eq!(tree.node(tree.find_by_record(10).unwrap()).node_type, NodeType::Row);
        let slot = tree.node(tree.find_by_record(12).unwrap());
        assert_eq!(slot.node_type, NodeType::Bin);
        assert_eq!(slot.parsed.map(|p| p.format()), Some("AA01AB01".to_string()));
    }

    #[test]
    fn test_explicit_position_wins() {
        let at = Point3::new(1.0, 2.0, 3.0);
        let records = vec![rec(10, WH, "WH/AA/01/AA/01").with_position(at)];
        let tree = build_hierarchy(&records, &options());
        assert_eq!(tree.node(tree.find_by_record(10).unwrap()).position, Some(at));
    }

    #[test]
    fn test_search_and_ancestors() {
        let records = vec![
            rec(10, WH, "WH/AA"),
            rec(11, 10, "WH/AA/01"),
            rec(12, 11, "WH/AA/01/AB"),
        ];
        let tree = build_hierarchy(&records, &options());
        let level = tree.find_by_record(12).unwrap();
        let ancestors: Vec<RecordId> = tree
            .ancestors(level)
            .map(|id| tree.node(id).record_id)
            .collect();
        assert_eq!(ancestors, vec![11, 10]);
        assert_eq!(tree.search("aa/01").len(), 2);
        assert!(tree.search("  ").is_empty());
        assert_eq!(tree.find_by_path("WH/AA/01"), tree.find_by_record(11));
    }
}
