use crate::error::{Result, RoutingError};
use crate::waypoint::{Node, NodeId, Position, PositionKey, Waypoint};
use core::fmt;
use fxhash::FxBuildHasher;
use indexmap::IndexMap;
use itertools::Itertools;
use log::{debug, info, warn};
use petgraph::unionfind::UnionFind;

type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

/// A warehouse facility as a directed graph over passage waypoints.
///
/// Nodes are created in passage grouping order and keyed by the composite
/// passage/order id. Consecutive waypoints of a passage are linked in both
/// directions, and passages adjacent by ascending numeric id are joined
/// through their intersection waypoints, so any aisle can be reached from
/// any other by travelling along aisles and crossing at intersections.
///
/// Once built the graph never changes: queries take `&self` and a single
/// instance can serve any number of concurrent readers.
#[derive(Clone, Debug)]
pub struct PassageGraph {
    nodes: FxIndexMap<NodeId, Node>,
    adjacency: FxIndexMap<NodeId, Vec<NodeId>>,
    position_index: FxIndexMap<PositionKey, NodeId>,
    components: UnionFind<usize>,
}

impl PassageGraph {
    /// Builds the graph from a flat list of waypoint records.
    ///
    /// Records are grouped by passage in first-seen order and sorted by
    /// `order` within each passage, which fixes node creation order and with
    /// it every iteration order downstream. Two identical inputs always
    /// build identical graphs. The empty input builds an empty graph.
    ///
    /// Fails with [RoutingError::DuplicateWaypoint] if two records share a
    /// passage and order, and with [RoutingError::MissingIntersection] if a
    /// passage other than the highest-numbered one has no intersection
    /// waypoint to link through.
    pub fn build(waypoints: &[Waypoint]) -> Result<PassageGraph> {
        let mut passages: FxIndexMap<u32, Vec<&Waypoint>> = FxIndexMap::default();
        for wp in waypoints {
            passages.entry(wp.passage_id).or_default().push(wp);
        }
        for group in passages.values_mut() {
            // Stable sort: records with equal order keep input order, and
            // are rejected as duplicates below anyway.
            group.sort_by_key(|wp| wp.order);
        }

        let mut graph = PassageGraph {
            nodes: FxIndexMap::default(),
            adjacency: FxIndexMap::default(),
            position_index: FxIndexMap::default(),
            components: UnionFind::new(0),
        };

        for group in passages.values() {
            for wp in group {
                let id = wp.node_id();
                let node = Node {
                    id,
                    position: wp.position(),
                    is_intersection: wp.is_intersection,
                    is_entrance: wp.is_entrance,
                };
                if graph.nodes.insert(id, node).is_some() {
                    return Err(RoutingError::DuplicateWaypoint(id));
                }
                graph.adjacency.insert(id, Vec::new());
                // Later records overwrite earlier ones here on purpose:
                // of several waypoints at the exact same spot, the last
                // one created is the one the position lookup resolves to.
                graph.position_index.insert(wp.position().key(), id);
            }
        }

        for group in passages.values() {
            for pair in group.windows(2) {
                graph.add_edge_pair(pair[0].node_id(), pair[1].node_id());
            }
        }

        graph.link_intersections(&passages)?;
        graph.generate_components();
        info!(
            "built passage graph: {} nodes, {} edges over {} passages",
            graph.node_count(),
            graph.edges().count(),
            passages.len()
        );
        Ok(graph)
    }

    /// Inserts the directed edges a -> b and b -> a.
    fn add_edge_pair(&mut self, a: NodeId, b: NodeId) {
        self.adjacency[&a].push(b);
        self.adjacency[&b].push(a);
    }

    /// Joins passages adjacent by ascending numeric id through their
    /// intersection waypoints. Each passage contributes the first
    /// intersection-flagged waypoint of its order-sorted group. Only the
    /// highest passage may go without one, in which case its seam stays
    /// unlinked.
    fn link_intersections(&mut self, passages: &FxIndexMap<u32, Vec<&Waypoint>>) -> Result<()> {
        let ordered: Vec<u32> = passages.keys().copied().sorted().collect();
        for pair in ordered.windows(2) {
            let (curr, next) = (pair[0], pair[1]);
            let curr_node = match Self::intersection_of(&passages[&curr]) {
                Some(id) => id,
                None => return Err(RoutingError::MissingIntersection(curr)),
            };
            let next_node = match Self::intersection_of(&passages[&next]) {
                Some(id) => id,
                None if Some(&next) == ordered.last() => {
                    warn!("passage {} has no intersection waypoint, leaving it unlinked", next);
                    continue;
                }
                None => return Err(RoutingError::MissingIntersection(next)),
            };
            self.add_edge_pair(curr_node, next_node);
            debug!(
                "linked passage {} to {} through {} and {}",
                curr, next, curr_node, next_node
            );
        }
        Ok(())
    }

    /// First intersection-flagged waypoint of an order-sorted group.
    fn intersection_of(group: &[&Waypoint]) -> Option<NodeId> {
        let mut flagged = group.iter().filter(|wp| wp.is_intersection);
        let first = flagged.next()?;
        if flagged.next().is_some() {
            warn!(
                "passage {} has multiple intersection waypoints, linking through {}",
                first.passage_id,
                first.node_id()
            );
        }
        Some(first.node_id())
    }

    /// Generates a new [UnionFind] structure and links up edge endpoints
    /// to the same components.
    fn generate_components(&mut self) {
        debug!("generating connected components");
        self.components = UnionFind::new(self.nodes.len());
        for (id, neighbours) in &self.adjacency {
            let ix = self.nodes.get_index_of(id).unwrap();
            for n in neighbours {
                self.components.union(ix, self.nodes.get_index_of(n).unwrap());
            }
        }
    }

    /// Retrieves the node stored under `id`.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    /// Checks if `id` names a node of this graph.
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// All nodes in creation order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Outgoing neighbours of `id` in edge insertion order. Unknown ids
    /// have no neighbours.
    pub fn neighbours(&self, id: NodeId) -> &[NodeId] {
        self.adjacency.get(&id).map_or(&[], Vec::as_slice)
    }

    /// Every directed edge of the graph, for export or rendering.
    pub fn edges(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        self.adjacency
            .iter()
            .flat_map(|(id, ns)| ns.iter().map(move |n| (*id, *n)))
    }

    /// The node recorded at exactly `position`, if any. Matching is on
    /// bit-identical coordinates, not proximity.
    pub fn node_at_position(&self, position: Position) -> Option<NodeId> {
        self.position_index.get(&position.key()).copied()
    }

    pub(crate) fn position_of(&self, id: NodeId) -> Position {
        self.nodes[&id].position
    }

    /// Checks if start and end are on the same component.
    pub fn reachable(&self, start: NodeId, end: NodeId) -> bool {
        !self.unreachable(start, end)
    }

    /// Checks if start and end are not on the same component. Ids that are
    /// not in the graph are unreachable by definition.
    pub fn unreachable(&self, start: NodeId, end: NodeId) -> bool {
        match (self.nodes.get_index_of(&start), self.nodes.get_index_of(&end)) {
            (Some(start_ix), Some(end_ix)) => !self.components.equiv(start_ix, end_ix),
            _ => true,
        }
    }
}

impl fmt::Display for PassageGraph {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        // One line per passage in creation order, * marking intersections.
        let mut current = None;
        for node in self.nodes.values() {
            if current != Some(node.id.passage) {
                if current.is_some() {
                    writeln!(f)?;
                }
                current = Some(node.id.passage);
                write!(f, "P{}:", node.id.passage)?;
            }
            let mark = if node.is_intersection { "*" } else { "" };
            write!(f, " W{}{}", node.id.order, mark)?;
        }
        writeln!(f)
    }
}
