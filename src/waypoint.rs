//! Input records and the core geometric types of the warehouse map.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A point in the warehouse frame. Distances are metres.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Exact-identity key for position lookups. Two positions share a key
/// only when all three components are bitwise identical.
pub(crate) type PositionKey = [u64; 3];

impl Position {
    pub fn new(x: f64, y: f64, z: f64) -> Position {
        Position { x, y, z }
    }

    pub fn origin() -> Position {
        Position::default()
    }

    /// Euclidean distance to `other`.
    pub fn distance(&self, other: &Position) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }

    pub(crate) fn key(&self) -> PositionKey {
        [self.x.to_bits(), self.y.to_bits(), self.z.to_bits()]
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// Identity of a graph node: the passage it lies on and its order along
/// that passage. Renders in the canonical `P<passage>_W<order>` form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId {
    pub passage: u32,
    pub order: i32,
}

impl NodeId {
    pub fn new(passage: u32, order: i32) -> NodeId {
        NodeId { passage, order }
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "P{}_W{}", self.passage, self.order)
    }
}

/// One record of the warehouse map: a single waypoint along a passage.
///
/// Field names follow the map format produced by the warehouse survey
/// tooling, so records deserialize straight out of a map file. A missing
/// `position_z` means a ground-level waypoint, and missing routing flags
/// mean a plain one.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub passage_id: u32,
    pub order: i32,
    pub position_x: f64,
    pub position_y: f64,
    #[serde(default)]
    pub position_z: f64,
    #[serde(default)]
    pub is_intersection: bool,
    #[serde(default)]
    pub is_entrance: bool,
}

impl Waypoint {
    /// Ground-level waypoint with no routing flags set.
    pub fn new(passage_id: u32, order: i32, x: f64, y: f64) -> Waypoint {
        Waypoint {
            passage_id,
            order,
            position_x: x,
            position_y: y,
            position_z: 0.0,
            is_intersection: false,
            is_entrance: false,
        }
    }

    /// Places the waypoint at height `z`.
    pub fn at_height(mut self, z: f64) -> Waypoint {
        self.position_z = z;
        self
    }

    /// Marks the waypoint as its passage's crossing point.
    pub fn intersection(mut self) -> Waypoint {
        self.is_intersection = true;
        self
    }

    /// Marks the waypoint as a passage entrance.
    pub fn entrance(mut self) -> Waypoint {
        self.is_entrance = true;
        self
    }

    pub fn position(&self) -> Position {
        Position::new(self.position_x, self.position_y, self.position_z)
    }

    pub fn node_id(&self) -> NodeId {
        NodeId::new(self.passage_id, self.order)
    }
}

/// A vertex of the built graph: the waypoint's position and flags under
/// its composite id. Created once at build time, immutable afterwards.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Node {
    pub id: NodeId,
    pub position: Position,
    pub is_intersection: bool,
    pub is_entrance: bool,
}
