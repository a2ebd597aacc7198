use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Waypoint {
    pub x: i32,
    pub y: i32,
}

impl Waypoint {
    pub const fn new(x: i32, y: i32) -> Self { Self { x, y } }
}

impl From<(i32, i32)> for Waypoint {
    fn from((x, y): (i32, i32)) -> Self { Self { x, y } }
}

/// Result of one search: world-space turn points from the source outwards.
/// The source tile itself is never included.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    pub waypoints: Vec<Waypoint>,
    /// The route ends at the closest reachable cell rather than the goal.
    pub alternative: bool,
    pub success: bool,
}

impl Route {
    pub fn failed() -> Self { Self::default() }

    pub fn len(&self) -> usize { self.waypoints.len() }

    pub fn is_empty(&self) -> bool { self.waypoints.is_empty() }

    pub fn last(&self) -> Option<Waypoint> { self.waypoints.last().copied() }

    /// Succeeded on the goal itself, not a fallback.
    pub fn reached_goal(&self) -> bool { self.success && !self.alternative }
}
