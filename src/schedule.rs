//! Flight schedule synthesis: turning a routed coordinate path into the
//! command list a drone scheduler replays.

use crate::waypoint::Position;
use log::debug;
use serde::{Deserialize, Serialize};

/// One scheduled drone instruction.
///
/// Serializes to the scheduler's record shape, for example
/// `{"type": "SCHEDULE_TAKEOFF", "arguments": {"z": 1.2}}`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "arguments")]
pub enum ScheduleCommand {
    /// Climb straight up from the ground to altitude `z`.
    #[serde(rename = "SCHEDULE_TAKEOFF")]
    Takeoff { z: f64 },
    /// Fly to `(x, y)` holding the current altitude.
    #[serde(rename = "SCHEDULE_FLY_TO_XY")]
    FlyToXy { x: f64, y: f64 },
    /// Change altitude to `z` holding the current position.
    #[serde(rename = "SCHEDULE_FLY_TO_Z")]
    FlyToZ { z: f64 },
    /// Hover in place for `period` seconds.
    #[serde(rename = "SCHEDULE_WAIT_FOR_PERIOD")]
    Wait { period: f64 },
}

/// How a warehouse-frame path maps into the vehicle frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScheduleParams {
    /// The vehicle's starting point in the warehouse frame. Every emitted
    /// coordinate is expressed relative to it.
    pub offset: Position,
    /// Hover time inserted after every motion command, in seconds.
    pub wait_period: f64,
}

impl Default for ScheduleParams {
    fn default() -> ScheduleParams {
        ScheduleParams {
            offset: Position::origin(),
            wait_period: 2.0,
        }
    }
}

/// Rounds to centimetre precision. Exact midpoints go to the even
/// centimetre, matching the survey tooling's rounding.
fn round2(v: f64) -> f64 {
    (v * 100.0).round_ties_even() / 100.0
}

/// Re-expresses a warehouse-frame point in the vehicle frame: relative to
/// the starting offset, with the y axis inverted to match the vehicle's
/// sense of it, rounded to centimetres.
fn to_vehicle_frame(p: Position, offset: Position) -> Position {
    Position::new(
        round2(p.x - offset.x),
        round2(-(p.y - offset.y)),
        round2(p.z - offset.z),
    )
}

/// Converts an ordered coordinate path into a drone flight schedule.
///
/// The vehicle starts grounded at the offset point. The schedule takes off
/// to the first point's altitude, moves over its x/y, then follows the
/// remaining points in order, skipping any command that would not move the
/// vehicle. Every motion is followed by a hover so the platform can settle
/// before the next one. An empty path yields an empty schedule.
pub fn path_to_schedule(path: &[Position], params: &ScheduleParams) -> Vec<ScheduleCommand> {
    let mut schedule = Vec::new();
    if path.is_empty() {
        return schedule;
    }
    let wait = ScheduleCommand::Wait {
        period: params.wait_period,
    };

    let first = to_vehicle_frame(path[0], params.offset);
    schedule.push(ScheduleCommand::Takeoff { z: first.z });
    schedule.push(wait);
    schedule.push(ScheduleCommand::FlyToXy {
        x: first.x,
        y: first.y,
    });
    schedule.push(wait);

    let mut prev = first;
    for &p in &path[1..] {
        let curr = to_vehicle_frame(p, params.offset);
        // Both sides of the comparison went through the same rounding.
        if curr.x != prev.x || curr.y != prev.y {
            schedule.push(ScheduleCommand::FlyToXy { x: curr.x, y: curr.y });
            schedule.push(wait);
        }
        if curr.z != prev.z {
            schedule.push(ScheduleCommand::FlyToZ { z: curr.z });
            schedule.push(wait);
        }
        prev = curr;
    }
    debug!(
        "synthesized {} commands from {} path points",
        schedule.len(),
        path.len()
    );
    schedule
}
