//! Wall and wall-decoration goal tests.
//!
//! Both are expressed through the four sides of the destination tile. For each
//! side there is at most one footprint position touching it, and one tile of
//! that footprint facing the destination whose flags gate the approach.

use crate::flags::{
    BLOCK_EAST, BLOCK_NORTH, BLOCK_SOUTH, BLOCK_WEST, WALL_EAST, WALL_NORTH, WALL_SOUTH, WALL_WEST,
};
use crate::graph::provider::FlagProvider;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Side {
    West,
    North,
    East,
    South,
}

// Clockwise, starting from the side a rotation-0 straight wall occupies.
const SIDES: [Side; 4] = [Side::West, Side::North, Side::East, Side::South];

#[inline]
fn side(rotation: i32, offset: i32) -> Side {
    SIDES[((rotation + offset) & 0x3) as usize]
}

impl Side {
    fn block_mask(self) -> u32 {
        match self {
            Side::West => BLOCK_WEST,
            Side::North => BLOCK_NORTH,
            Side::East => BLOCK_EAST,
            Side::South => BLOCK_SOUTH,
        }
    }

    /// The wall on the actor's tile that faces back towards the destination.
    fn facing_wall(self) -> u32 {
        match self {
            Side::West => WALL_EAST,
            Side::North => WALL_SOUTH,
            Side::East => WALL_WEST,
            Side::South => WALL_NORTH,
        }
    }
}

/// Actor placement relative to a destination tile.
struct Approach<'a> {
    flags: &'a dyn FlagProvider,
    plane: i32,
    src_x: i32,
    src_y: i32,
    size: i32,
    dest_x: i32,
    dest_y: i32,
}

impl Approach<'_> {
    fn overlaps(&self) -> bool {
        let east = self.src_x + self.size - 1;
        let north = self.src_y + self.size - 1;
        (self.src_x..=east).contains(&self.dest_x) && (self.src_y..=north).contains(&self.dest_y)
    }

    /// Footprint tile facing the destination when the actor stands on `side` of it.
    fn facing_tile(&self, side: Side) -> Option<(i32, i32)> {
        let east = self.src_x + self.size - 1;
        let north = self.src_y + self.size - 1;
        let spans_x = (self.src_x..=east).contains(&self.dest_x);
        let spans_y = (self.src_y..=north).contains(&self.dest_y);
        match side {
            Side::West => (self.src_x == self.dest_x - self.size && spans_y).then_some((east, self.dest_y)),
            Side::East => (self.src_x == self.dest_x + 1 && spans_y).then_some((self.src_x, self.dest_y)),
            Side::North => (spans_x && self.src_y == self.dest_y + 1).then_some((self.dest_x, self.src_y)),
            Side::South => (spans_x && self.src_y == self.dest_y - self.size).then_some((self.dest_x, north)),
        }
    }

    fn at(&self, side: Side) -> bool {
        self.facing_tile(side).is_some()
    }

    fn clear(&self, side: Side, mask: u32) -> bool {
        self.facing_tile(side)
            .is_some_and(|(x, y)| self.flags.get(x, y, self.plane) & mask == 0)
    }
}

/// Straight walls (0), wall corners (2) and diagonal walls (9). Other shapes are never reached
/// unless the actor stands on the destination.
#[allow(clippy::too_many_arguments)]
pub fn reach_wall(
    flags: &dyn FlagProvider,
    plane: i32,
    src_x: i32,
    src_y: i32,
    size: i32,
    dest_x: i32,
    dest_y: i32,
    shape: i32,
    rotation: i32,
) -> bool {
    let a = Approach { flags, plane, src_x, src_y, size, dest_x, dest_y };
    if a.overlaps() {
        return true;
    }
    match shape {
        0 => {
            // Open from the side the wall stands on, gated from the two ends.
            let (front, left, right) = (side(rotation, 0), side(rotation, 1), side(rotation, 3));
            a.at(front) || a.clear(left, left.block_mask()) || a.clear(right, right.block_mask())
        }
        2 => {
            let (front, next) = (side(rotation, 0), side(rotation, 1));
            let (back, last) = (side(rotation, 2), side(rotation, 3));
            a.at(front) || a.at(next) || a.clear(back, back.block_mask()) || a.clear(last, last.block_mask())
        }
        9 => SIDES.iter().any(|&s| {
            let mask = if size == 1 { s.facing_wall() } else { s.block_mask() };
            a.clear(s, mask)
        }),
        _ => false,
    }
}

/// Wall decorations: diagonal decorations (6, and 7 facing the opposite way) and
/// decorations on all sides (8).
#[allow(clippy::too_many_arguments)]
pub fn reach_wall_decoration(
    flags: &dyn FlagProvider,
    plane: i32,
    src_x: i32,
    src_y: i32,
    size: i32,
    dest_x: i32,
    dest_y: i32,
    shape: i32,
    rotation: i32,
) -> bool {
    let a = Approach { flags, plane, src_x, src_y, size, dest_x, dest_y };
    if a.overlaps() {
        return true;
    }
    match shape {
        6 | 7 => {
            let rot = if shape == 7 { (rotation + 2) & 0x3 } else { rotation & 0x3 };
            let (horizontal, vertical) = match rot {
                0 => (Side::East, Side::South),
                1 => (Side::West, Side::South),
                2 => (Side::West, Side::North),
                _ => (Side::East, Side::North),
            };
            a.clear(horizontal, horizontal.facing_wall()) || a.clear(vertical, vertical.facing_wall())
        }
        8 => SIDES.iter().any(|&s| a.clear(s, s.facing_wall())),
        _ => false,
    }
}
