//! Rectangle goal tests: overlap, and adjacency along an unwalled, accessible side.

use crate::flags::{WALL_EAST, WALL_NORTH, WALL_SOUTH, WALL_WEST};
use crate::graph::provider::FlagProvider;

// Sides of a rectangle that cannot be approached, before rotation.
pub const BLOCK_ACCESS_NORTH: u32 = 0x1;
pub const BLOCK_ACCESS_EAST: u32 = 0x2;
pub const BLOCK_ACCESS_SOUTH: u32 = 0x4;
pub const BLOCK_ACCESS_WEST: u32 = 0x8;

/// Whether two axis-aligned rectangles share at least one tile.
#[allow(clippy::too_many_arguments)]
#[inline]
pub fn collides(
    src_x: i32,
    src_y: i32,
    dest_x: i32,
    dest_y: i32,
    src_width: i32,
    src_height: i32,
    dest_width: i32,
    dest_height: i32,
) -> bool {
    if src_x >= dest_x + dest_width || src_x + src_width <= dest_x {
        return false;
    }
    src_y < dest_y + dest_height && dest_y < src_y + src_height
}

/// Width and height after applying a quarter-turn rotation.
#[inline]
pub fn rotate_dimensions(rotation: i32, width: i32, height: i32) -> (i32, i32) {
    if rotation & 0x1 != 0 { (height, width) } else { (width, height) }
}

/// Rotate a 4-bit access mask clockwise by `rotation` quarter turns.
#[inline]
pub fn rotate_access(rotation: i32, mask: u32) -> u32 {
    let r = (rotation & 0x3) as u32;
    if r == 0 {
        return mask & 0xF;
    }
    ((mask << r) & 0xF) | ((mask & 0xF) >> (4 - r))
}

/// Rectangle reach that also accepts standing on the rectangle.
#[allow(clippy::too_many_arguments)]
pub fn reach_rectangle(
    flags: &dyn FlagProvider,
    plane: i32,
    access: u32,
    src_x: i32,
    src_y: i32,
    src_size: i32,
    dest_x: i32,
    dest_y: i32,
    dest_width: i32,
    dest_height: i32,
) -> bool {
    if collides(src_x, src_y, dest_x, dest_y, src_size, src_size, dest_width, dest_height) {
        return true;
    }
    if src_size == 1 {
        reach_rectangle_1(flags, plane, access, src_x, src_y, dest_x, dest_y, dest_width, dest_height)
    } else {
        reach_rectangle_n(flags, plane, access, src_x, src_y, src_size, dest_x, dest_y, dest_width, dest_height)
    }
}

/// Rectangle reach that requires standing beside, never on, the rectangle.
#[allow(clippy::too_many_arguments)]
pub fn reach_exclusive_rectangle(
    flags: &dyn FlagProvider,
    plane: i32,
    access: u32,
    src_x: i32,
    src_y: i32,
    src_size: i32,
    dest_x: i32,
    dest_y: i32,
    dest_width: i32,
    dest_height: i32,
) -> bool {
    if src_size > 1 {
        !collides(src_x, src_y, dest_x, dest_y, src_size, src_size, dest_width, dest_height)
            && reach_rectangle_n(flags, plane, access, src_x, src_y, src_size, dest_x, dest_y, dest_width, dest_height)
    } else {
        reach_rectangle_1(flags, plane, access, src_x, src_y, dest_x, dest_y, dest_width, dest_height)
    }
}

#[allow(clippy::too_many_arguments)]
fn reach_rectangle_1(
    flags: &dyn FlagProvider,
    plane: i32,
    access: u32,
    src_x: i32,
    src_y: i32,
    dest_x: i32,
    dest_y: i32,
    dest_width: i32,
    dest_height: i32,
) -> bool {
    let east = dest_x + dest_width - 1;
    let north = dest_y + dest_height - 1;
    let within_y = src_y >= dest_y && src_y <= north;
    let within_x = src_x >= dest_x && src_x <= east;
    let tile = || flags.get(src_x, src_y, plane);

    if src_x == dest_x - 1 && within_y && tile() & WALL_EAST == 0 && access & BLOCK_ACCESS_WEST == 0 {
        return true;
    }
    if src_x == east + 1 && within_y && tile() & WALL_WEST == 0 && access & BLOCK_ACCESS_EAST == 0 {
        return true;
    }
    if src_y + 1 == dest_y && within_x && tile() & WALL_NORTH == 0 && access & BLOCK_ACCESS_SOUTH == 0 {
        return true;
    }
    src_y == north + 1 && within_x && tile() & WALL_SOUTH == 0 && access & BLOCK_ACCESS_NORTH == 0
}

/// Adjacent along a shared edge, with at least one unwalled footprint tile facing the rectangle.
#[allow(clippy::too_many_arguments)]
fn reach_rectangle_n(
    flags: &dyn FlagProvider,
    plane: i32,
    access: u32,
    src_x: i32,
    src_y: i32,
    src_size: i32,
    dest_x: i32,
    dest_y: i32,
    dest_width: i32,
    dest_height: i32,
) -> bool {
    let src_east = src_x + src_size;
    let src_north = src_y + src_size;
    let dest_east = dest_x + dest_width;
    let dest_north = dest_y + dest_height;
    let shared_y = src_y.max(dest_y)..src_north.min(dest_north);
    let shared_x = src_x.max(dest_x)..src_east.min(dest_east);
    let clear = |x: i32, y: i32, wall: u32| flags.get(x, y, plane) & wall == 0;

    if dest_east == src_x
        && access & BLOCK_ACCESS_EAST == 0
        && shared_y.clone().any(|y| clear(dest_east, y, WALL_WEST))
    {
        return true;
    }
    if src_east == dest_x
        && access & BLOCK_ACCESS_WEST == 0
        && shared_y.clone().any(|y| clear(dest_x - 1, y, WALL_EAST))
    {
        return true;
    }
    if src_y == dest_north
        && access & BLOCK_ACCESS_NORTH == 0
        && shared_x.clone().any(|x| clear(x, dest_north, WALL_SOUTH))
    {
        return true;
    }
    dest_y == src_north && access & BLOCK_ACCESS_SOUTH == 0 && shared_x.clone().any(|x| clear(x, dest_y - 1, WALL_NORTH))
}
