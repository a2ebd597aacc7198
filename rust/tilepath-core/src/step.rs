//! Footprint-aware edge checks shared by the search loop and single-step queries.
//!
//! Coordinates are the south-west tile of the actor's square footprint. Every
//! check looks only at the cells the footprint newly covers after the move, each
//! tested with the mask for its position on the leading edge: corner cells use
//! the diagonal masks, interior cells use masks blocking both flanking
//! directions. Diagonal moves also test both flanking orthogonal edges, so an
//! actor can never cut a blocked corner.

use crate::collision::CollisionStrategy;
use crate::flags::BlockMasks;
use crate::graph::movement::Direction;
use crate::graph::provider::FlagProvider;

/// Edge rules bound to one plane, strategy and mask set for the duration of a search.
pub(crate) struct EdgeRules<'a, F: FlagProvider + ?Sized> {
    flags: &'a F,
    collision: &'a dyn CollisionStrategy,
    masks: &'static BlockMasks,
    plane: i32,
    extra: u32,
}

impl<'a, F: FlagProvider + ?Sized> EdgeRules<'a, F> {
    pub(crate) fn new(
        flags: &'a F,
        collision: &'a dyn CollisionStrategy,
        masks: &'static BlockMasks,
        plane: i32,
        extra: u32,
    ) -> Self {
        Self { flags, collision, masks, plane, extra }
    }

    #[inline(always)]
    fn open(&self, x: i32, y: i32, mask: u32) -> bool {
        self.collision.can_move(self.flags.get(x, y, self.plane), mask | self.extra)
    }

    #[inline]
    pub(crate) fn can_step(&self, x: i32, y: i32, size: i32, dir: Direction) -> bool {
        match size {
            1 => self.step_1(x, y, dir),
            2 => self.step_2(x, y, dir),
            n => self.step_n(x, y, n, dir),
        }
    }

    #[inline(always)]
    pub(crate) fn step_1(&self, x: i32, y: i32, dir: Direction) -> bool {
        let m = self.masks;
        match dir {
            Direction::West => self.open(x - 1, y, m.west),
            Direction::East => self.open(x + 1, y, m.east),
            Direction::South => self.open(x, y - 1, m.south),
            Direction::North => self.open(x, y + 1, m.north),
            Direction::SouthWest => {
                self.open(x - 1, y - 1, m.south_west)
                    && self.open(x - 1, y, m.west)
                    && self.open(x, y - 1, m.south)
            }
            Direction::SouthEast => {
                self.open(x + 1, y - 1, m.south_east)
                    && self.open(x + 1, y, m.east)
                    && self.open(x, y - 1, m.south)
            }
            Direction::NorthWest => {
                self.open(x - 1, y + 1, m.north_west)
                    && self.open(x - 1, y, m.west)
                    && self.open(x, y + 1, m.north)
            }
            Direction::NorthEast => {
                self.open(x + 1, y + 1, m.north_east)
                    && self.open(x + 1, y, m.east)
                    && self.open(x, y + 1, m.north)
            }
        }
    }

    #[inline(always)]
    pub(crate) fn step_2(&self, x: i32, y: i32, dir: Direction) -> bool {
        let m = self.masks;
        match dir {
            Direction::West => {
                self.open(x - 1, y, m.south_west) && self.open(x - 1, y + 1, m.north_west)
            }
            Direction::East => {
                self.open(x + 2, y, m.south_east) && self.open(x + 2, y + 1, m.north_east)
            }
            Direction::South => {
                self.open(x, y - 1, m.south_west) && self.open(x + 1, y - 1, m.south_east)
            }
            Direction::North => {
                self.open(x, y + 2, m.north_west) && self.open(x + 1, y + 2, m.north_east)
            }
            Direction::SouthWest => {
                self.open(x - 1, y, m.north_and_south_east)
                    && self.open(x - 1, y - 1, m.south_west)
                    && self.open(x, y - 1, m.north_east_and_west)
            }
            Direction::SouthEast => {
                self.open(x + 1, y - 1, m.north_east_and_west)
                    && self.open(x + 2, y - 1, m.south_east)
                    && self.open(x + 2, y, m.north_and_south_west)
            }
            Direction::NorthWest => {
                self.open(x - 1, y + 1, m.north_and_south_east)
                    && self.open(x - 1, y + 2, m.north_west)
                    && self.open(x, y + 2, m.south_east_and_west)
            }
            Direction::NorthEast => {
                self.open(x + 1, y + 2, m.south_east_and_west)
                    && self.open(x + 2, y + 2, m.north_east)
                    && self.open(x + 2, y + 1, m.north_and_south_west)
            }
        }
    }

    /// Any footprint of 2 or more; the leading edge has `n - 2` interior cells.
    #[inline(always)]
    pub(crate) fn step_n(&self, x: i32, y: i32, n: i32, dir: Direction) -> bool {
        let m = self.masks;
        match dir {
            Direction::West => {
                self.open(x - 1, y, m.south_west)
                    && self.open(x - 1, y + n - 1, m.north_west)
                    && (1..n - 1).all(|i| self.open(x - 1, y + i, m.north_and_south_east))
            }
            Direction::East => {
                self.open(x + n, y, m.south_east)
                    && self.open(x + n, y + n - 1, m.north_east)
                    && (1..n - 1).all(|i| self.open(x + n, y + i, m.north_and_south_west))
            }
            Direction::South => {
                self.open(x, y - 1, m.south_west)
                    && self.open(x + n - 1, y - 1, m.south_east)
                    && (1..n - 1).all(|i| self.open(x + i, y - 1, m.north_east_and_west))
            }
            Direction::North => {
                self.open(x, y + n, m.north_west)
                    && self.open(x + n - 1, y + n, m.north_east)
                    && (1..n - 1).all(|i| self.open(x + i, y + n, m.south_east_and_west))
            }
            Direction::SouthWest => {
                self.open(x - 1, y - 1, m.south_west)
                    && (1..n).all(|i| {
                        self.open(x - 1, y + i - 1, m.north_and_south_east)
                            && self.open(x + i - 1, y - 1, m.north_east_and_west)
                    })
            }
            Direction::SouthEast => {
                self.open(x + n, y - 1, m.south_east)
                    && (1..n).all(|i| {
                        self.open(x + n, y + i - 1, m.north_and_south_west)
                            && self.open(x + i, y - 1, m.north_east_and_west)
                    })
            }
            Direction::NorthWest => {
                self.open(x - 1, y + n, m.north_west)
                    && (1..n).all(|i| {
                        self.open(x - 1, y + i, m.north_and_south_east)
                            && self.open(x + i - 1, y + n, m.south_east_and_west)
                    })
            }
            Direction::NorthEast => {
                self.open(x + n, y + n, m.north_east)
                    && (1..n).all(|i| {
                        self.open(x + i, y + n, m.south_east_and_west)
                            && self.open(x + n, y + i, m.north_and_south_west)
                    })
            }
        }
    }
}

/// Single-step movement checks outside of a search.
pub struct StepValidator<'a, F: FlagProvider + ?Sized> {
    flags: &'a F,
    masks: &'static BlockMasks,
}

impl<'a, F: FlagProvider + ?Sized> StepValidator<'a, F> {
    pub fn new(flags: &'a F) -> Self {
        Self { flags, masks: BlockMasks::select(false) }
    }

    /// Test against the route-blocker mask set instead of the movement masks.
    pub fn with_route_blockers(mut self, enabled: bool) -> Self {
        self.masks = BlockMasks::select(enabled);
        self
    }

    /// Whether an actor of footprint `size` at (x, y) may step one tile in `dir`.
    ///
    /// Panics when `size` is below 1.
    #[allow(clippy::too_many_arguments)]
    pub fn can_step(
        &self,
        x: i32,
        y: i32,
        plane: i32,
        size: i32,
        dir: Direction,
        extra_flags: u32,
        collision: &dyn CollisionStrategy,
    ) -> bool {
        assert!(size >= 1, "footprint must be at least 1, got {size}");
        EdgeRules::new(self.flags, collision, self.masks, plane, extra_flags).can_step(x, y, size, dir)
    }

    /// Same as [`can_step`](Self::can_step) with the direction given as a unit delta.
    ///
    /// Panics unless `dx` and `dy` are in {-1, 0, 1} and not both zero.
    #[allow(clippy::too_many_arguments)]
    pub fn can_travel(
        &self,
        x: i32,
        y: i32,
        plane: i32,
        size: i32,
        dx: i32,
        dy: i32,
        extra_flags: u32,
        collision: &dyn CollisionStrategy,
    ) -> bool {
        let Some(dir) = Direction::from_delta(dx, dy) else {
            panic!("invalid step delta ({dx}, {dy})");
        };
        self.can_step(x, y, plane, size, dir, extra_flags, collision)
    }
}
