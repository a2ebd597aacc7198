//! Goal tests deciding when a search has arrived.

pub mod rectangle;
pub mod wall;

use serde::{Deserialize, Serialize};

use crate::graph::provider::FlagProvider;

use self::rectangle::{collides, reach_exclusive_rectangle, reach_rectangle, rotate_access, rotate_dimensions};
use self::wall::{reach_wall, reach_wall_decoration};

/// Shape code selecting the rectangle-beside-not-on goal.
pub const SHAPE_EXCLUSIVE_RECTANGLE: i32 = -2;
/// Shape code for plain tile goals.
pub const SHAPE_TILE: i32 = -1;

/// What the actor is walking to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Destination {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub rotation: i32,
    pub shape: i32,
    pub access_bit_mask: u32,
}

impl Destination {
    pub fn tile(x: i32, y: i32) -> Self {
        Self { x, y, width: 1, height: 1, rotation: 0, shape: SHAPE_TILE, access_bit_mask: 0 }
    }

    /// Width and height with the rotation applied.
    pub fn rotated_dimensions(&self) -> (i32, i32) {
        rotate_dimensions(self.rotation, self.width, self.height)
    }

    pub fn rotated_access(&self) -> u32 {
        rotate_access(self.rotation, self.access_bit_mask)
    }
}

pub trait ReachStrategy: Send + Sync {
    /// Whether an actor of footprint `src_size` with its south-west tile at
    /// (src_x, src_y) satisfies the goal.
    fn reached(
        &self,
        flags: &dyn FlagProvider,
        plane: i32,
        src_x: i32,
        src_y: i32,
        src_size: i32,
        dest: &Destination,
    ) -> bool;
}

/// How a shape code is approached.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStrategy {
    Tile,
    Wall,
    WallDecoration,
    Rectangle,
    ExclusiveRectangle,
}

impl ExitStrategy {
    pub fn from_shape(shape: i32) -> Self {
        match shape {
            SHAPE_EXCLUSIVE_RECTANGLE => ExitStrategy::ExclusiveRectangle,
            0..=3 | 9 => ExitStrategy::Wall,
            4..=8 => ExitStrategy::WallDecoration,
            10 | 11 | 22 => ExitStrategy::Rectangle,
            _ => ExitStrategy::Tile,
        }
    }
}

/// A single-tile actor arrives only on the destination tile itself. Larger
/// footprints arrive once they cover any tile of the destination rectangle.
#[derive(Copy, Clone, Debug, Default)]
pub struct TileReach;

impl ReachStrategy for TileReach {
    fn reached(&self, _flags: &dyn FlagProvider, _plane: i32, src_x: i32, src_y: i32, src_size: i32, dest: &Destination) -> bool {
        if src_size == 1 {
            return src_x == dest.x && src_y == dest.y;
        }
        let (width, height) = dest.rotated_dimensions();
        collides(src_x, src_y, dest.x, dest.y, src_size, src_size, width, height)
    }
}

/// Arrives on the rectangle or beside it through an unwalled, accessible side.
#[derive(Copy, Clone, Debug, Default)]
pub struct RectangleReach;

impl ReachStrategy for RectangleReach {
    fn reached(&self, flags: &dyn FlagProvider, plane: i32, src_x: i32, src_y: i32, src_size: i32, dest: &Destination) -> bool {
        let (width, height) = dest.rotated_dimensions();
        reach_rectangle(flags, plane, dest.rotated_access(), src_x, src_y, src_size, dest.x, dest.y, width, height)
    }
}

/// Oriented wall geometry for the destination's shape and rotation.
#[derive(Copy, Clone, Debug, Default)]
pub struct WallReach;

impl ReachStrategy for WallReach {
    fn reached(&self, flags: &dyn FlagProvider, plane: i32, src_x: i32, src_y: i32, src_size: i32, dest: &Destination) -> bool {
        reach_wall(flags, plane, src_x, src_y, src_size, dest.x, dest.y, dest.shape, dest.rotation)
    }
}

/// Picks the goal test from the destination's shape code.
#[derive(Copy, Clone, Debug, Default)]
pub struct DefaultReach;

impl ReachStrategy for DefaultReach {
    fn reached(&self, flags: &dyn FlagProvider, plane: i32, src_x: i32, src_y: i32, src_size: i32, dest: &Destination) -> bool {
        let exit = ExitStrategy::from_shape(dest.shape);
        if exit != ExitStrategy::ExclusiveRectangle && src_x == dest.x && src_y == dest.y {
            return true;
        }
        match exit {
            ExitStrategy::Tile => TILE_REACH.reached(flags, plane, src_x, src_y, src_size, dest),
            ExitStrategy::Wall => WALL_REACH.reached(flags, plane, src_x, src_y, src_size, dest),
            ExitStrategy::WallDecoration => {
                reach_wall_decoration(flags, plane, src_x, src_y, src_size, dest.x, dest.y, dest.shape, dest.rotation)
            }
            ExitStrategy::Rectangle => RECTANGLE_REACH.reached(flags, plane, src_x, src_y, src_size, dest),
            ExitStrategy::ExclusiveRectangle => {
                let (width, height) = dest.rotated_dimensions();
                reach_exclusive_rectangle(flags, plane, dest.rotated_access(), src_x, src_y, src_size, dest.x, dest.y, width, height)
            }
        }
    }
}

pub static TILE_REACH: TileReach = TileReach;
pub static RECTANGLE_REACH: RectangleReach = RectangleReach;
pub static WALL_REACH: WallReach = WallReach;
pub static DEFAULT_REACH: DefaultReach = DefaultReach;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::zone_flags::ZoneFlags;

    #[test]
    fn shapes_map_to_exit_strategies() {
        assert_eq!(ExitStrategy::from_shape(-2), ExitStrategy::ExclusiveRectangle);
        assert_eq!(ExitStrategy::from_shape(-1), ExitStrategy::Tile);
        assert_eq!(ExitStrategy::from_shape(0), ExitStrategy::Wall);
        assert_eq!(ExitStrategy::from_shape(9), ExitStrategy::Wall);
        assert_eq!(ExitStrategy::from_shape(6), ExitStrategy::WallDecoration);
        assert_eq!(ExitStrategy::from_shape(10), ExitStrategy::Rectangle);
        assert_eq!(ExitStrategy::from_shape(22), ExitStrategy::Rectangle);
        assert_eq!(ExitStrategy::from_shape(15), ExitStrategy::Tile);
    }

    #[test]
    fn standing_on_destination_counts_except_exclusive() {
        let flags = ZoneFlags::new();
        for shape in [-1, 0, 4, 10, 15] {
            let dest = Destination { shape, ..Destination::tile(5, 5) };
            assert!(DEFAULT_REACH.reached(&flags, 0, 5, 5, 1, &dest), "shape {shape}");
        }
        let exclusive = Destination { shape: SHAPE_EXCLUSIVE_RECTANGLE, ..Destination::tile(5, 5) };
        assert!(!DEFAULT_REACH.reached(&flags, 0, 5, 5, 1, &exclusive));
        assert!(DEFAULT_REACH.reached(&flags, 0, 4, 5, 1, &exclusive));
    }

    #[test]
    fn tile_reach_grows_with_footprint() {
        let flags = ZoneFlags::new();
        let dest = Destination::tile(5, 5);
        assert!(!TILE_REACH.reached(&flags, 0, 4, 5, 1, &dest));
        assert!(TILE_REACH.reached(&flags, 0, 4, 4, 2, &dest));
        assert!(!TILE_REACH.reached(&flags, 0, 3, 3, 2, &dest));
    }

    #[test]
    fn single_tile_actor_needs_the_exact_tile() {
        let flags = ZoneFlags::new();
        let dest = Destination { width: 3, height: 2, ..Destination::tile(5, 5) };
        assert!(TILE_REACH.reached(&flags, 0, 5, 5, 1, &dest));
        assert!(!TILE_REACH.reached(&flags, 0, 6, 5, 1, &dest));
        assert!(!TILE_REACH.reached(&flags, 0, 7, 6, 1, &dest));
        assert!(TILE_REACH.reached(&flags, 0, 6, 4, 2, &dest));
    }

    #[test]
    fn rectangle_reach_uses_rotated_dimensions() {
        let flags = ZoneFlags::new();
        // 3 wide, 1 high; rotated once it spans y 5..=7 at x 5.
        let dest = Destination { width: 3, height: 1, rotation: 1, shape: 10, ..Destination::tile(5, 5) };
        assert!(RECTANGLE_REACH.reached(&flags, 0, 4, 7, 1, &dest));
        assert!(!RECTANGLE_REACH.reached(&flags, 0, 7, 5, 1, &dest));
        assert!(RECTANGLE_REACH.reached(&flags, 0, 6, 6, 1, &dest));
    }

    #[test]
    fn rectangle_reach_rotates_access_mask() {
        let flags = ZoneFlags::new();
        // North side blocked before rotation becomes the east side after one turn.
        let dest = Destination { access_bit_mask: rectangle::BLOCK_ACCESS_NORTH, rotation: 1, shape: 10, ..Destination::tile(5, 5) };
        assert!(!DEFAULT_REACH.reached(&flags, 0, 6, 5, 1, &dest));
        assert!(DEFAULT_REACH.reached(&flags, 0, 5, 6, 1, &dest));
    }
}
