//! Route queries over a built [PassageGraph].

use crate::bfs::bfs;
use crate::error::{Result, RoutingError};
use crate::graph::PassageGraph;
use crate::waypoint::{NodeId, Position};
use log::info;

/// Outcome of a nearest-node query: the winning node, where it sits and
/// how far away it is.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClosestNode {
    pub id: NodeId,
    pub position: Position,
    pub distance: f64,
}

impl PassageGraph {
    /// Computes the route with the fewest edges from `start` to `end`,
    /// including both endpoints.
    ///
    /// Every edge counts the same regardless of physical length, so this
    /// is hop-count routing: the result crosses the fewest waypoints, not
    /// the shortest distance. A node routes to itself as a single-entry
    /// path. Equal inputs on equal graphs always yield the same route.
    pub fn shortest_path(&self, start: NodeId, end: NodeId) -> Result<Vec<NodeId>> {
        if !self.contains(start) {
            return Err(RoutingError::UnknownNode(start));
        }
        if !self.contains(end) {
            return Err(RoutingError::UnknownNode(end));
        }
        if start == end {
            return Ok(vec![start]);
        }
        if self.unreachable(start, end) {
            info!("{} is not reachable from {}", end, start);
            return Err(RoutingError::NoPath { start, end });
        }
        info!("{} is reachable from {}, computing route", end, start);
        bfs(
            &start,
            |&id| self.neighbours(id).iter().copied(),
            |&id| id == end,
        )
        .ok_or(RoutingError::NoPath { start, end })
    }

    /// Same route as [PassageGraph::shortest_path] with every node id
    /// replaced by its position, ready to feed schedule synthesis.
    pub fn shortest_path_positions(&self, start: NodeId, end: NodeId) -> Result<Vec<Position>> {
        let path = self.shortest_path(start, end)?;
        Ok(path.into_iter().map(|id| self.position_of(id)).collect())
    }

    /// Finds the node nearest to `target` by straight-line distance.
    ///
    /// A linear scan with a strict comparison: of several nodes at the
    /// same distance, the one earliest in creation order wins.
    pub fn closest_node(&self, target: Position) -> Result<ClosestNode> {
        let mut closest: Option<ClosestNode> = None;
        for node in self.nodes() {
            let distance = node.position.distance(&target);
            if closest.map_or(true, |c| distance < c.distance) {
                closest = Some(ClosestNode {
                    id: node.id,
                    position: node.position,
                    distance,
                });
            }
        }
        closest.ok_or(RoutingError::EmptyGraph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::waypoint::Waypoint;

    /// Three aisles stacked in y, crossed at their middle column:
    ///
    ///  W1 - W2* - W3     (passage 1, y = 0)
    ///        |
    ///  W1 - W2* - W3     (passage 2, y = 5)
    ///        |
    ///  W1 - W2* - W3     (passage 3, y = 10)
    fn three_aisles() -> PassageGraph {
        let mut map = Vec::new();
        for passage in 1..=3 {
            let y = 5.0 * (passage - 1) as f64;
            map.push(Waypoint::new(passage, 1, 0.0, y));
            map.push(Waypoint::new(passage, 2, 5.0, y).intersection());
            map.push(Waypoint::new(passage, 3, 10.0, y));
        }
        PassageGraph::build(&map).unwrap()
    }

    #[test]
    fn routes_along_a_single_passage() {
        let graph = three_aisles();
        let path = graph
            .shortest_path(NodeId::new(1, 1), NodeId::new(1, 3))
            .unwrap();
        assert_eq!(
            path,
            vec![NodeId::new(1, 1), NodeId::new(1, 2), NodeId::new(1, 3)]
        );
    }

    #[test]
    fn linear_passage_routes_end_to_end() {
        // A lone aisle of five waypoints routes through all of them.
        let map: Vec<Waypoint> = (1..=5)
            .map(|order| Waypoint::new(1, order, 2.0 * order as f64, 0.0))
            .collect();
        let graph = PassageGraph::build(&map).unwrap();
        let path = graph
            .shortest_path(NodeId::new(1, 1), NodeId::new(1, 5))
            .unwrap();
        let expected: Vec<NodeId> = (1..=5).map(|order| NodeId::new(1, order)).collect();
        assert_eq!(path, expected);
    }

    #[test]
    fn routes_across_passages_through_intersections() {
        let graph = three_aisles();
        let path = graph
            .shortest_path(NodeId::new(1, 1), NodeId::new(3, 3))
            .unwrap();
        assert_eq!(
            path,
            vec![
                NodeId::new(1, 1),
                NodeId::new(1, 2),
                NodeId::new(2, 2),
                NodeId::new(3, 2),
                NodeId::new(3, 3),
            ]
        );
    }

    #[test]
    fn route_to_self_is_a_single_node() {
        let graph = three_aisles();
        let start = NodeId::new(2, 2);
        assert_eq!(graph.shortest_path(start, start).unwrap(), vec![start]);
    }

    #[test]
    fn route_is_fewest_edges() {
        let graph = three_aisles();
        // From one end of passage 1 to the other end of passage 2:
        // aisle to the crossing, one hop down, aisle out again.
        let path = graph
            .shortest_path(NodeId::new(1, 3), NodeId::new(2, 1))
            .unwrap();
        assert_eq!(path.len(), 4);
        assert_eq!(path.first(), Some(&NodeId::new(1, 3)));
        assert_eq!(path.last(), Some(&NodeId::new(2, 1)));
        for pair in path.windows(2) {
            assert!(graph.neighbours(pair[0]).contains(&pair[1]));
        }
    }

    #[test]
    fn unknown_endpoints_are_rejected() {
        let graph = three_aisles();
        let ghost = NodeId::new(9, 9);
        let known = NodeId::new(1, 1);
        assert_eq!(
            graph.shortest_path(ghost, known).unwrap_err(),
            RoutingError::UnknownNode(ghost)
        );
        assert_eq!(
            graph.shortest_path(known, ghost).unwrap_err(),
            RoutingError::UnknownNode(ghost)
        );
    }

    #[test]
    fn disconnected_nodes_have_no_path() {
        // Second passage has no intersection and is the highest, so it
        // builds but stays unlinked.
        let map = vec![
            Waypoint::new(1, 1, 0.0, 0.0).intersection(),
            Waypoint::new(1, 2, 5.0, 0.0),
            Waypoint::new(2, 1, 0.0, 5.0),
            Waypoint::new(2, 2, 5.0, 5.0),
        ];
        let graph = PassageGraph::build(&map).unwrap();
        let start = NodeId::new(1, 1);
        let end = NodeId::new(2, 2);
        assert_eq!(
            graph.shortest_path(start, end).unwrap_err(),
            RoutingError::NoPath { start, end }
        );
    }

    #[test]
    fn coordinate_route_mirrors_node_route() {
        let graph = three_aisles();
        let positions = graph
            .shortest_path_positions(NodeId::new(1, 1), NodeId::new(2, 2))
            .unwrap();
        assert_eq!(
            positions,
            vec![
                Position::new(0.0, 0.0, 0.0),
                Position::new(5.0, 0.0, 0.0),
                Position::new(5.0, 5.0, 0.0),
            ]
        );
    }

    #[test]
    fn repeated_queries_return_the_same_route() {
        let graph = three_aisles();
        let a = graph.shortest_path(NodeId::new(1, 1), NodeId::new(3, 1)).unwrap();
        let b = graph.shortest_path(NodeId::new(1, 1), NodeId::new(3, 1)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn closest_node_finds_exact_and_near_matches() {
        let graph = three_aisles();
        let exact = graph.closest_node(Position::new(5.0, 5.0, 0.0)).unwrap();
        assert_eq!(exact.id, NodeId::new(2, 2));
        assert_eq!(exact.distance, 0.0);

        let near = graph.closest_node(Position::new(9.0, 10.5, 0.0)).unwrap();
        assert_eq!(near.id, NodeId::new(3, 3));
        assert_eq!(near.position, Position::new(10.0, 10.0, 0.0));
    }

    #[test]
    fn closest_node_ties_go_to_creation_order() {
        // Target dead centre between P1_W2 (5, 0) and P2_W2 (5, 5).
        let graph = three_aisles();
        let hit = graph.closest_node(Position::new(5.0, 2.5, 0.0)).unwrap();
        assert_eq!(hit.id, NodeId::new(1, 2));
    }

    #[test]
    fn closest_node_on_empty_graph_fails() {
        let graph = PassageGraph::build(&[]).unwrap();
        assert_eq!(
            graph.closest_node(Position::origin()).unwrap_err(),
            RoutingError::EmptyGraph
        );
    }
}
