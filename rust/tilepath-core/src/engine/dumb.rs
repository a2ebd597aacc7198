//! Greedy walker: heads straight for the goal one tile at a time and gives up at
//! the first step it cannot take.
//!
//! Each step is tried diagonally first when both axes still need to close, then
//! along x alone, then along y alone. Every tile walked becomes a waypoint. A
//! walk that stops short of the goal still returns the tiles it covered, with
//! `success` unset.

use tracing::debug;

use crate::flags::BlockMasks;
use crate::graph::movement::Direction;
use crate::graph::provider::FlagProvider;
use crate::models::{Route, Waypoint};
use crate::options::{PathRequest, DEFAULT_SEARCH_MAP_SIZE};
use crate::step::EdgeRules;

/// Steps walked before giving up; keeps the walk inside the window a
/// [`PathFinder`](super::PathFinder) would search with the default size.
pub const DEFAULT_MAX_STEPS: usize = DEFAULT_SEARCH_MAP_SIZE / 2;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DumbPathFinder {
    max_steps: usize,
}

impl Default for DumbPathFinder {
    fn default() -> Self {
        Self { max_steps: DEFAULT_MAX_STEPS }
    }
}

impl DumbPathFinder {
    pub fn new() -> Self { Self::default() }

    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps;
        self
    }

    pub fn max_steps(&self) -> usize { self.max_steps }

    /// Walk from the request's source towards its destination.
    ///
    /// `max_turns` and `move_near` do not apply: the route lists every tile
    /// walked and is never an alternative.
    ///
    /// Panics when the footprint or a destination dimension is below 1.
    pub fn find_path<F: FlagProvider>(&self, flags: &F, req: &PathRequest<'_>) -> Route {
        assert!(req.src_size >= 1, "footprint {} below 1", req.src_size);
        assert!(
            req.dest_width >= 1 && req.dest_height >= 1,
            "destination must be at least 1x1, got {}x{}",
            req.dest_width,
            req.dest_height
        );

        let dest = req.destination();
        let (width, height) = dest.rotated_dimensions();
        let masks = BlockMasks::select(req.route_blockers);
        let rules = EdgeRules::new(flags, req.collision, masks, req.plane, req.extra_block_flags);

        let (mut x, mut y) = (req.src_x, req.src_y);
        let mut waypoints = Vec::new();
        loop {
            if req.reach.reached(flags, req.plane, x, y, req.src_size, &dest) {
                debug!(src_x = req.src_x, src_y = req.src_y, dest_x = dest.x, dest_y = dest.y, steps = waypoints.len(), "greedy walk arrived");
                return Route { waypoints, alternative: false, success: true };
            }
            if waypoints.len() >= self.max_steps {
                break;
            }
            let dx = heading(x, req.src_size, dest.x, width);
            let dy = heading(y, req.src_size, dest.y, height);
            let Some(dir) = next_step(&rules, x, y, req.src_size, dx, dy) else { break };
            let (sx, sy) = dir.delta();
            x += sx;
            y += sy;
            waypoints.push(Waypoint::new(x, y));
        }
        debug!(src_x = req.src_x, src_y = req.src_y, x, y, steps = waypoints.len(), "greedy walk stopped short");
        Route { waypoints, alternative: false, success: false }
    }
}

/// -1, 0 or 1: which way the footprint's span `[from, from + size)` has to move
/// along one axis to overlap `[lo, lo + len)`.
#[inline]
fn heading(from: i32, size: i32, lo: i32, len: i32) -> i32 {
    if from + size <= lo {
        1
    } else if from >= lo + len {
        -1
    } else {
        0
    }
}

fn next_step<F: FlagProvider + ?Sized>(rules: &EdgeRules<'_, F>, x: i32, y: i32, size: i32, dx: i32, dy: i32) -> Option<Direction> {
    let preferred = Direction::from_delta(dx, dy)?;
    if rules.can_step(x, y, size, preferred) {
        return Some(preferred);
    }
    if !preferred.is_diagonal() {
        return None;
    }
    [Direction::from_delta(dx, 0), Direction::from_delta(0, dy)]
        .into_iter()
        .flatten()
        .find(|&dir| rules.can_step(x, y, size, dir))
}
