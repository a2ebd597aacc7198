use std::collections::VecDeque;

use tracing::debug;

use crate::error::ConfigError;
use crate::flags::BlockMasks;
use crate::graph::movement::{step_back, Direction, DIR_SOURCE};
use crate::graph::provider::FlagProvider;
use crate::models::{Route, Waypoint};
use crate::options::{PathFinderConfig, PathRequest, TurnTruncation};
use crate::reach::Destination;
use crate::step::EdgeRules;

use super::fallback::{nearest_approach, Target};
use super::frontier::Frontier;
use super::state::SearchGrid;

/// Breadth-first route finder over a square window centred on the source.
///
/// Owns its cell records and frontier and reuses them for every search, so one
/// instance per worker thread is the intended use.
pub struct PathFinder {
    config: PathFinderConfig,
    grid: SearchGrid,
    frontier: Frontier,
}

impl PathFinder {
    pub fn new(config: PathFinderConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let grid = SearchGrid::new(config.search_map_size);
        let frontier = Frontier::with_capacity(config.ring_capacity());
        Ok(Self { config, grid, frontier })
    }

    pub fn config(&self) -> &PathFinderConfig { &self.config }

    /// Search from the request's source towards its destination.
    ///
    /// Unreachable goals come back as [`Route::failed`], or as an alternative route
    /// to the closest visited cell when `move_near` is set.
    ///
    /// Panics when the footprint is below 1 or wider than half the window, or when
    /// a destination dimension is below 1.
    pub fn find_path<F: FlagProvider>(&mut self, flags: &F, req: &PathRequest<'_>) -> Route {
        let window = self.grid.size() as i32;
        assert!(
            req.src_size >= 1 && req.src_size <= window / 2,
            "footprint {} outside 1..={}",
            req.src_size,
            window / 2
        );
        assert!(
            req.dest_width >= 1 && req.dest_height >= 1,
            "destination must be at least 1x1, got {}x{}",
            req.dest_width,
            req.dest_height
        );

        self.grid.begin_search();
        self.frontier.clear();

        let half = window / 2;
        let base = (req.src_x - half, req.src_y - half);
        let source = (half, half);
        self.grid.visit(source.0, source.1, DIR_SOURCE, 0);
        self.frontier.push(source.0, source.1);

        let dest = req.destination();
        let masks = BlockMasks::select(req.route_blockers);
        let rules = EdgeRules::new(flags, req.collision, masks, req.plane, req.extra_block_flags);
        let found = match req.src_size {
            1 => self.search(flags, req, &dest, base, |x, y, dir| rules.step_1(x, y, dir)),
            2 => self.search(flags, req, &dest, base, |x, y, dir| rules.step_2(x, y, dir)),
            n => self.search(flags, req, &dest, base, |x, y, dir| rules.step_n(x, y, n, dir)),
        };

        let (end, alternative) = match found {
            Some(cell) => (cell, false),
            None if !req.move_near => {
                debug!(src_x = req.src_x, src_y = req.src_y, dest_x = dest.x, dest_y = dest.y, "no route");
                return Route::failed();
            }
            None => {
                let (width, height) = dest.rotated_dimensions();
                let target = Target { x: dest.x - base.0, y: dest.y - base.1, width, height };
                match nearest_approach(&self.grid, source, target) {
                    Some(cell) => {
                        debug!(x = cell.0 + base.0, y = cell.1 + base.1, "falling back to nearest approach");
                        (cell, true)
                    }
                    None => {
                        debug!(src_x = req.src_x, src_y = req.src_y, dest_x = dest.x, dest_y = dest.y, "no route or approach");
                        return Route::failed();
                    }
                }
            }
        };

        let waypoints = self.reconstruct(source, end, base, req.max_turns);
        debug!(
            src_x = req.src_x,
            src_y = req.src_y,
            dest_x = dest.x,
            dest_y = dest.y,
            size = req.src_size,
            alternative,
            turns = waypoints.len(),
            "route found"
        );
        Route { waypoints, alternative, success: true }
    }

    /// Drain the frontier until a cell satisfies the goal. `can_step` receives world
    /// coordinates; the loop itself works in window coordinates.
    #[inline(always)]
    fn search<F, S>(
        &mut self,
        flags: &F,
        req: &PathRequest<'_>,
        dest: &Destination,
        base: (i32, i32),
        can_step: S,
    ) -> Option<(i32, i32)>
    where
        F: FlagProvider,
        S: Fn(i32, i32, Direction) -> bool,
    {
        let limit = self.grid.size() as i32 - req.src_size;
        while let Some((x, y)) = self.frontier.pop() {
            let (wx, wy) = (x + base.0, y + base.1);
            if req.reach.reached(flags, req.plane, wx, wy, req.src_size, dest) {
                return Some((x, y));
            }
            let next = self.grid.distance(x, y).unwrap_or(0) + 1;
            for dir in Direction::EXPANSION_ORDER {
                let (dx, dy) = dir.delta();
                let (nx, ny) = (x + dx, y + dy);
                if nx < 0 || ny < 0 || nx > limit || ny > limit {
                    continue;
                }
                if self.grid.is_visited(nx, ny) || !can_step(wx, wy, dir) {
                    continue;
                }
                self.grid.visit(nx, ny, dir.flag(), next);
                self.frontier.push(nx, ny);
            }
        }
        None
    }

    /// Walk the recorded directions back from `end` to the source, keeping a turn
    /// point wherever the direction changes. Returned in source-to-end order.
    fn reconstruct(&self, source: (i32, i32), end: (i32, i32), base: (i32, i32), max_turns: usize) -> Vec<Waypoint> {
        if max_turns == 0 {
            return Vec::new();
        }
        let mut turns: VecDeque<Waypoint> = VecDeque::with_capacity(max_turns.min(64));
        let (mut x, mut y) = end;
        let mut current = None;
        let cells = self.grid.size() * self.grid.size();
        for _ in 0..cells {
            if (x, y) == source {
                break;
            }
            let Some(dir) = self.grid.direction(x, y) else { break };
            if current != Some(dir) {
                let point = Waypoint::new(x + base.0, y + base.1);
                match self.config.turn_truncation {
                    TurnTruncation::KeepNearestSource => {
                        if turns.len() >= max_turns {
                            turns.pop_back();
                        }
                        turns.push_front(point);
                    }
                    TurnTruncation::KeepNearestDestination => {
                        if turns.len() >= max_turns {
                            break;
                        }
                        turns.push_front(point);
                    }
                }
                current = Some(dir);
            }
            (x, y) = step_back(dir, x, y);
        }
        turns.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flags::OBJECT;
    use crate::graph::zone_flags::ZoneFlags;

    fn finder(truncation: TurnTruncation) -> PathFinder {
        PathFinder::new(PathFinderConfig { search_map_size: 64, turn_truncation: truncation, ..Default::default() })
            .unwrap()
    }

    #[test]
    fn rejects_bad_config() {
        let err = PathFinder::new(PathFinderConfig { search_map_size: 4, ..Default::default() }).err();
        assert!(matches!(err, Some(ConfigError::SearchMapSize { size: 4, .. })));
    }

    #[test]
    fn straight_line_has_one_turn() {
        let flags = ZoneFlags::new();
        let mut pf = finder(TurnTruncation::default());
        let route = pf.find_path(&flags, &PathRequest::new(100, 100, 110, 100, 0));
        assert!(route.reached_goal());
        assert_eq!(route.waypoints, vec![Waypoint::new(110, 100)]);
    }

    #[test]
    fn diagonal_then_straight() {
        let flags = ZoneFlags::new();
        let mut pf = finder(TurnTruncation::default());
        let route = pf.find_path(&flags, &PathRequest::new(100, 100, 110, 103, 0));
        assert!(route.reached_goal());
        // West and east expand before diagonals, so the straight leg comes first.
        assert_eq!(route.waypoints, vec![Waypoint::new(107, 100), Waypoint::new(110, 103)]);
    }

    // Walls spanning the whole window with alternating gaps, forcing a turn at each.
    fn zigzag() -> ZoneFlags {
        let mut flags = ZoneFlags::new();
        for (i, wall_x) in [102, 104, 106, 108].into_iter().enumerate() {
            let gap_y = if i % 2 == 0 { 104 } else { 96 };
            for y in 60..=140 {
                if y != gap_y {
                    flags.add(wall_x, y, 0, OBJECT);
                }
            }
        }
        flags
    }

    #[test]
    fn truncation_keeps_source_side_by_default() {
        let flags = zigzag();
        let mut full = finder(TurnTruncation::KeepNearestSource);
        let all = full.find_path(&flags, &PathRequest::new(100, 100, 110, 100, 0));
        assert!(all.success);
        assert!(all.len() > 3, "{:?}", all.waypoints);

        let mut pf = finder(TurnTruncation::KeepNearestSource);
        let req = PathRequest { max_turns: 3, ..PathRequest::new(100, 100, 110, 100, 0) };
        let cut = pf.find_path(&flags, &req);
        assert!(cut.success);
        assert_eq!(cut.waypoints, all.waypoints[..3].to_vec());
    }

    #[test]
    fn truncation_can_keep_destination_side() {
        let flags = zigzag();
        let mut full = finder(TurnTruncation::KeepNearestDestination);
        let all = full.find_path(&flags, &PathRequest::new(100, 100, 110, 100, 0));
        let req = PathRequest { max_turns: 3, ..PathRequest::new(100, 100, 110, 100, 0) };
        let cut = full.find_path(&flags, &req);
        assert!(cut.success);
        assert_eq!(cut.waypoints, all.waypoints[all.len() - 3..].to_vec());
    }

    #[test]
    fn zero_turn_budget_yields_no_waypoints() {
        let flags = ZoneFlags::new();
        let mut pf = finder(TurnTruncation::default());
        let req = PathRequest { max_turns: 0, ..PathRequest::new(0, 0, 5, 5, 0) };
        let route = pf.find_path(&flags, &req);
        assert!(route.success);
        assert!(route.is_empty());
    }

    #[test]
    fn destination_outside_window_uses_fallback_or_fails() {
        let flags = ZoneFlags::new();
        let mut pf = finder(TurnTruncation::default());
        let far = PathRequest::new(0, 0, 500, 0, 0);
        assert_eq!(pf.find_path(&flags, &far), Route::failed());
        let strict = PathRequest { move_near: false, ..far };
        assert_eq!(pf.find_path(&flags, &strict), Route::failed());
    }

    #[test]
    fn survives_generation_wrap() {
        let mut flags = ZoneFlags::new();
        flags.add(5, 0, 0, OBJECT);
        let mut pf = finder(TurnTruncation::default());
        let max = pf.grid.layout().max_generation();
        pf.grid.set_generation(max - 2);
        let req = PathRequest { move_near: false, ..PathRequest::new(0, 0, 10, 0, 0) };
        let expected = pf.find_path(&flags, &req);
        assert!(expected.reached_goal());
        for _ in 0..4 {
            assert_eq!(pf.find_path(&flags, &req), expected);
        }
        assert!(pf.grid.generation() < 4);
    }

    #[test]
    #[should_panic(expected = "footprint")]
    fn zero_footprint_panics() {
        let flags = ZoneFlags::new();
        let mut pf = finder(TurnTruncation::default());
        pf.find_path(&flags, &PathRequest { src_size: 0, ..PathRequest::new(0, 0, 1, 1, 0) });
    }
}
