use aisle_routing::{NodeId, PassageGraph, Position, Waypoint};

// In this example a route is found across a small warehouse with shape
//
//  W1 - W2*- W3        (passage 1)
//       |
//  W1 - W2*- W3        (passage 2)
//       |
//  W1 - W2*- W3        (passage 3)
//
// where
// - * marks a passage's crossing waypoint
// The found route runs from the far end of the first aisle to the far end
// of the last one, changing aisles at the crossings.
fn main() {
    let mut map = Vec::new();
    for passage in 1..=3u32 {
        let y = 5.0 * (passage - 1) as f64;
        map.push(Waypoint::new(passage, 1, 0.0, y).at_height(2.4));
        map.push(Waypoint::new(passage, 2, 5.0, y).at_height(2.4).intersection());
        map.push(Waypoint::new(passage, 3, 10.0, y).at_height(2.4).entrance());
    }
    let graph = PassageGraph::build(&map).unwrap();
    println!("{}", graph);
    let start = NodeId::new(1, 3);
    let end = NodeId::new(3, 3);
    if let Ok(route) = graph.shortest_path(start, end) {
        println!("A route has been found:");
        for id in route {
            println!("{}", id);
        }
    }
    let target = Position::new(4.2, 9.1, 2.0);
    let nearest = graph.closest_node(target).unwrap();
    println!("\nClosest node to {}: {} at {}", target, nearest.id, nearest.position);
}
