//! Best stopping point when the goal itself cannot be reached.

use super::state::SearchGrid;

/// Chebyshev radius scanned around the destination rectangle.
pub const SEEK_RADIUS: i32 = 10;
/// Cells further than this many steps from the source are not considered.
pub const MAX_SEEK_DISTANCE: u32 = 100;
const NO_CANDIDATE: i32 = 1000;

/// Local rectangle the actor was trying to reach.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Target {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

/// Gap between `v` and the span `[start, start + len - 1]`, 0 when inside it.
#[inline]
fn axis_gap(v: i32, start: i32, len: i32) -> i32 {
    let end = start + len - 1;
    if v < start {
        start - v
    } else if v > end {
        v - end
    } else {
        0
    }
}

/// Visited cell closest to `target` by squared distance, preferring fewer steps on ties.
/// `None` when nothing in range was visited or the best cell is the source itself.
pub fn nearest_approach(grid: &SearchGrid, source: (i32, i32), target: Target) -> Option<(i32, i32)> {
    let last = grid.size() as i32 - 1;
    let min_x = (target.x - SEEK_RADIUS).max(0);
    let max_x = (target.x + target.width - 1 + SEEK_RADIUS).min(last);
    let min_y = (target.y - SEEK_RADIUS).max(0);
    let max_y = (target.y + target.height - 1 + SEEK_RADIUS).min(last);

    let mut lowest_cost = NO_CANDIDATE;
    let mut lowest_distance = MAX_SEEK_DISTANCE;
    let mut best = None;
    for x in min_x..=max_x {
        for y in min_y..=max_y {
            let Some(distance) = grid.distance(x, y) else { continue };
            if distance >= MAX_SEEK_DISTANCE {
                continue;
            }
            let dx = axis_gap(x, target.x, target.width);
            let dy = axis_gap(y, target.y, target.height);
            let cost = dx * dx + dy * dy;
            if cost < lowest_cost || (cost == lowest_cost && distance < lowest_distance) {
                lowest_cost = cost;
                lowest_distance = distance;
                best = Some((x, y));
            }
        }
    }
    best.filter(|&cell| cell != source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::movement::{DIR_EAST, DIR_SOURCE};

    fn grid_with(cells: &[(i32, i32, u32)]) -> SearchGrid {
        let mut grid = SearchGrid::new(64);
        grid.begin_search();
        for &(x, y, d) in cells {
            grid.visit(x, y, if d == 0 { DIR_SOURCE } else { DIR_EAST }, d);
        }
        grid
    }

    #[test]
    fn picks_closest_to_rectangle() {
        let grid = grid_with(&[(32, 32, 0), (33, 32, 1), (34, 32, 2), (35, 35, 5)]);
        let target = Target { x: 36, y: 31, width: 2, height: 2 };
        // (34,32) is two columns west of the rectangle, inside it on y.
        assert_eq!(nearest_approach(&grid, (32, 32), target), Some((34, 32)));
    }

    #[test]
    fn ties_prefer_shorter_walk() {
        // (38,32) and (36,34) are both two tiles off the 1x1 target at (36,32).
        let grid = grid_with(&[(32, 32, 0), (38, 32, 9), (36, 34, 4)]);
        let target = Target { x: 36, y: 32, width: 1, height: 1 };
        assert_eq!(nearest_approach(&grid, (32, 32), target), Some((36, 34)));
    }

    #[test]
    fn ignores_far_walks_and_unvisited_cells() {
        let mut grid = SearchGrid::new(128);
        grid.begin_search();
        grid.visit(64, 64, DIR_SOURCE, 0);
        grid.visit(72, 64, DIR_EAST, 120);
        grid.visit(62, 64, DIR_EAST, 2);
        let target = Target { x: 73, y: 64, width: 1, height: 1 };
        // (72,64) is adjacent but beyond the seek distance and (62,64) is outside
        // the radius, which leaves only the source.
        assert_eq!(nearest_approach(&grid, (64, 64), target), None);
        grid.visit(70, 65, DIR_EAST, 7);
        assert_eq!(nearest_approach(&grid, (64, 64), target), Some((70, 65)));
    }

    #[test]
    fn source_is_not_an_approach() {
        let grid = grid_with(&[(32, 32, 0)]);
        let target = Target { x: 34, y: 32, width: 1, height: 1 };
        assert_eq!(nearest_approach(&grid, (32, 32), target), None);
    }

    #[test]
    fn scan_is_clipped_to_window() {
        let grid = grid_with(&[(0, 0, 0), (1, 0, 1)]);
        let target = Target { x: 62, y: 60, width: 5, height: 5 };
        assert_eq!(nearest_approach(&grid, (0, 0), target), None);
        assert_eq!(axis_gap(5, 2, 3), 1);
        assert_eq!(axis_gap(0, 2, 3), 2);
        assert_eq!(axis_gap(3, 2, 3), 0);
    }
}
