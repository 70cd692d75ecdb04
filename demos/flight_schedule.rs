use aisle_routing::{path_to_schedule, NodeId, PassageGraph, Position, ScheduleParams, Waypoint};

// In this example a route across two aisles is turned into the command
// schedule a drone scheduler replays. The vehicle starts grounded below
// the first waypoint, so every emitted coordinate is relative to that
// point and the schedule begins with a takeoff to rack-top height.
fn main() {
    let mut map = Vec::new();
    for passage in 1..=2u32 {
        let y = 5.0 * (passage - 1) as f64;
        for order in 1..=3 {
            let mut wp = Waypoint::new(passage, order, 5.0 * (order - 1) as f64, y).at_height(2.4);
            wp.is_intersection = order == 2;
            wp.is_entrance = order == 1;
            map.push(wp);
        }
    }
    let graph = PassageGraph::build(&map).unwrap();
    let route = graph
        .shortest_path_positions(NodeId::new(1, 1), NodeId::new(2, 3))
        .unwrap();
    let params = ScheduleParams {
        offset: Position::new(0.0, 0.0, 0.0),
        wait_period: 2.0,
    };
    let schedule = path_to_schedule(&route, &params);
    println!("{}", serde_json::to_string_pretty(&schedule).unwrap());
}
