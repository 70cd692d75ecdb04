//! # aisle_routing
//!
//! A routing system for warehouses flown by autonomous drones. Models the
//! facility's passages as a directed graph over surveyed waypoints, finds
//! [breadth-first](https://en.wikipedia.org/wiki/Breadth-first_search)
//! hop-count routes between any two of them and turns a routed coordinate
//! path into the command schedule a flight scheduler replays. Note that
//! edges are uniform-cost: routes minimize waypoints crossed, not metres
//! flown. Pre-computes
//! [connected components](https://en.wikipedia.org/wiki/Component_(graph_theory))
//! to avoid flood-filling behaviour if no route exists.
mod bfs;

pub mod error;
pub mod graph;
pub mod router;
pub mod schedule;
pub mod waypoint;

pub use error::{Result, RoutingError};
pub use graph::PassageGraph;
pub use router::ClosestNode;
pub use schedule::{path_to_schedule, ScheduleCommand, ScheduleParams};
pub use waypoint::{Node, NodeId, Position, Waypoint};
