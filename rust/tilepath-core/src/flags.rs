//! Collision flag bit layout and the composite block masks used by movement checks.
//!
//! Wall bits describe the wall standing on the named side of a tile. A step is
//! blocked when the destination tile carries the wall facing back towards the
//! tile being left, so `BLOCK_WEST` (moving west) tests the target's east wall.

pub const WALL_NORTH_WEST: u32 = 0x1;
pub const WALL_NORTH: u32 = 0x2;
pub const WALL_NORTH_EAST: u32 = 0x4;
pub const WALL_EAST: u32 = 0x8;
pub const WALL_SOUTH_EAST: u32 = 0x10;
pub const WALL_SOUTH: u32 = 0x20;
pub const WALL_SOUTH_WEST: u32 = 0x40;
pub const WALL_WEST: u32 = 0x80;
pub const OBJECT: u32 = 0x100;

pub const WALL_NORTH_WEST_PROJECTILE_BLOCKER: u32 = 0x200;
pub const WALL_NORTH_PROJECTILE_BLOCKER: u32 = 0x400;
pub const WALL_NORTH_EAST_PROJECTILE_BLOCKER: u32 = 0x800;
pub const WALL_EAST_PROJECTILE_BLOCKER: u32 = 0x1000;
pub const WALL_SOUTH_EAST_PROJECTILE_BLOCKER: u32 = 0x2000;
pub const WALL_SOUTH_PROJECTILE_BLOCKER: u32 = 0x4000;
pub const WALL_SOUTH_WEST_PROJECTILE_BLOCKER: u32 = 0x8000;
pub const WALL_WEST_PROJECTILE_BLOCKER: u32 = 0x10000;
pub const OBJECT_PROJECTILE_BLOCKER: u32 = 0x20000;

pub const FLOOR_DECORATION: u32 = 0x40000;
pub const BLOCK_NPCS: u32 = 0x80000;
pub const BLOCK_PLAYERS: u32 = 0x100000;
pub const FLOOR: u32 = 0x200000;

pub const WALL_NORTH_WEST_ROUTE_BLOCKER: u32 = 0x400000;
pub const WALL_NORTH_ROUTE_BLOCKER: u32 = 0x800000;
pub const WALL_NORTH_EAST_ROUTE_BLOCKER: u32 = 0x1000000;
pub const WALL_EAST_ROUTE_BLOCKER: u32 = 0x2000000;
pub const WALL_SOUTH_EAST_ROUTE_BLOCKER: u32 = 0x4000000;
pub const WALL_SOUTH_ROUTE_BLOCKER: u32 = 0x8000000;
pub const WALL_SOUTH_WEST_ROUTE_BLOCKER: u32 = 0x10000000;
pub const WALL_WEST_ROUTE_BLOCKER: u32 = 0x20000000;
pub const OBJECT_ROUTE_BLOCKER: u32 = 0x40000000;

pub const ROOF: u32 = 0x80000000;

/// Every bit a tile can carry that stops ground movement outright.
pub const FULL_BLOCK: u32 = OBJECT | FLOOR_DECORATION | FLOOR;

/// Wall and object bits shifted into the projectile layout by line-of-sight checks.
pub const BLOCK_MOVEMENT: u32 = WALL_NORTH_WEST
    | WALL_NORTH
    | WALL_NORTH_EAST
    | WALL_EAST
    | WALL_SOUTH_EAST
    | WALL_SOUTH
    | WALL_SOUTH_WEST
    | WALL_WEST
    | OBJECT;

/// Route-blocker wall and object bits.
pub const BLOCK_ROUTE: u32 = WALL_NORTH_WEST_ROUTE_BLOCKER
    | WALL_NORTH_ROUTE_BLOCKER
    | WALL_NORTH_EAST_ROUTE_BLOCKER
    | WALL_EAST_ROUTE_BLOCKER
    | WALL_SOUTH_EAST_ROUTE_BLOCKER
    | WALL_SOUTH_ROUTE_BLOCKER
    | WALL_SOUTH_WEST_ROUTE_BLOCKER
    | WALL_WEST_ROUTE_BLOCKER
    | OBJECT_ROUTE_BLOCKER;

// Masks for a tile being entered while moving in the named direction.
pub const BLOCK_WEST: u32 = WALL_EAST | FULL_BLOCK;
pub const BLOCK_EAST: u32 = WALL_WEST | FULL_BLOCK;
pub const BLOCK_SOUTH: u32 = WALL_NORTH | FULL_BLOCK;
pub const BLOCK_NORTH: u32 = WALL_SOUTH | FULL_BLOCK;
pub const BLOCK_SOUTH_WEST: u32 = WALL_NORTH | WALL_NORTH_EAST | WALL_EAST | FULL_BLOCK;
pub const BLOCK_SOUTH_EAST: u32 = WALL_NORTH_WEST | WALL_NORTH | WALL_WEST | FULL_BLOCK;
pub const BLOCK_NORTH_WEST: u32 = WALL_EAST | WALL_SOUTH_EAST | WALL_SOUTH | FULL_BLOCK;
pub const BLOCK_NORTH_EAST: u32 = WALL_SOUTH | WALL_SOUTH_WEST | WALL_WEST | FULL_BLOCK;
// Interior cells along a leading edge block both flanking directions.
pub const BLOCK_NORTH_AND_SOUTH_EAST: u32 =
    WALL_NORTH | WALL_NORTH_EAST | WALL_EAST | WALL_SOUTH_EAST | WALL_SOUTH | FULL_BLOCK;
pub const BLOCK_NORTH_AND_SOUTH_WEST: u32 =
    WALL_NORTH_WEST | WALL_NORTH | WALL_SOUTH | WALL_SOUTH_WEST | WALL_WEST | FULL_BLOCK;
pub const BLOCK_NORTH_EAST_AND_WEST: u32 =
    WALL_NORTH_WEST | WALL_NORTH | WALL_NORTH_EAST | WALL_EAST | WALL_WEST | FULL_BLOCK;
pub const BLOCK_SOUTH_EAST_AND_WEST: u32 =
    WALL_EAST | WALL_SOUTH_EAST | WALL_SOUTH | WALL_SOUTH_WEST | WALL_WEST | FULL_BLOCK;

const ROUTE_FULL_BLOCK: u32 = OBJECT_ROUTE_BLOCKER | FLOOR_DECORATION | FLOOR;

pub const BLOCK_WEST_ROUTE_BLOCKER: u32 = WALL_EAST_ROUTE_BLOCKER | ROUTE_FULL_BLOCK;
pub const BLOCK_EAST_ROUTE_BLOCKER: u32 = WALL_WEST_ROUTE_BLOCKER | ROUTE_FULL_BLOCK;
pub const BLOCK_SOUTH_ROUTE_BLOCKER: u32 = WALL_NORTH_ROUTE_BLOCKER | ROUTE_FULL_BLOCK;
pub const BLOCK_NORTH_ROUTE_BLOCKER: u32 = WALL_SOUTH_ROUTE_BLOCKER | ROUTE_FULL_BLOCK;
pub const BLOCK_SOUTH_WEST_ROUTE_BLOCKER: u32 =
    WALL_NORTH_ROUTE_BLOCKER | WALL_NORTH_EAST_ROUTE_BLOCKER | WALL_EAST_ROUTE_BLOCKER | ROUTE_FULL_BLOCK;
pub const BLOCK_SOUTH_EAST_ROUTE_BLOCKER: u32 =
    WALL_NORTH_WEST_ROUTE_BLOCKER | WALL_NORTH_ROUTE_BLOCKER | WALL_WEST_ROUTE_BLOCKER | ROUTE_FULL_BLOCK;
pub const BLOCK_NORTH_WEST_ROUTE_BLOCKER: u32 =
    WALL_EAST_ROUTE_BLOCKER | WALL_SOUTH_EAST_ROUTE_BLOCKER | WALL_SOUTH_ROUTE_BLOCKER | ROUTE_FULL_BLOCK;
pub const BLOCK_NORTH_EAST_ROUTE_BLOCKER: u32 =
    WALL_SOUTH_ROUTE_BLOCKER | WALL_SOUTH_WEST_ROUTE_BLOCKER | WALL_WEST_ROUTE_BLOCKER | ROUTE_FULL_BLOCK;
pub const BLOCK_NORTH_AND_SOUTH_EAST_ROUTE_BLOCKER: u32 = WALL_NORTH_ROUTE_BLOCKER
    | WALL_NORTH_EAST_ROUTE_BLOCKER
    | WALL_EAST_ROUTE_BLOCKER
    | WALL_SOUTH_EAST_ROUTE_BLOCKER
    | WALL_SOUTH_ROUTE_BLOCKER
    | ROUTE_FULL_BLOCK;
pub const BLOCK_NORTH_AND_SOUTH_WEST_ROUTE_BLOCKER: u32 = WALL_NORTH_WEST_ROUTE_BLOCKER
    | WALL_NORTH_ROUTE_BLOCKER
    | WALL_SOUTH_ROUTE_BLOCKER
    | WALL_SOUTH_WEST_ROUTE_BLOCKER
    | WALL_WEST_ROUTE_BLOCKER
    | ROUTE_FULL_BLOCK;
pub const BLOCK_NORTH_EAST_AND_WEST_ROUTE_BLOCKER: u32 = WALL_NORTH_WEST_ROUTE_BLOCKER
    | WALL_NORTH_ROUTE_BLOCKER
    | WALL_NORTH_EAST_ROUTE_BLOCKER
    | WALL_EAST_ROUTE_BLOCKER
    | WALL_WEST_ROUTE_BLOCKER
    | ROUTE_FULL_BLOCK;
pub const BLOCK_SOUTH_EAST_AND_WEST_ROUTE_BLOCKER: u32 = WALL_EAST_ROUTE_BLOCKER
    | WALL_SOUTH_EAST_ROUTE_BLOCKER
    | WALL_SOUTH_ROUTE_BLOCKER
    | WALL_SOUTH_WEST_ROUTE_BLOCKER
    | WALL_WEST_ROUTE_BLOCKER
    | ROUTE_FULL_BLOCK;

/// One complete set of block masks. Edge checks are written once against this
/// table so the route-blocker variant only swaps the table.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BlockMasks {
    pub west: u32,
    pub east: u32,
    pub south: u32,
    pub north: u32,
    pub south_west: u32,
    pub south_east: u32,
    pub north_west: u32,
    pub north_east: u32,
    pub north_and_south_east: u32,
    pub north_and_south_west: u32,
    pub north_east_and_west: u32,
    pub south_east_and_west: u32,
}

pub static MOVEMENT_MASKS: BlockMasks = BlockMasks {
    west: BLOCK_WEST,
    east: BLOCK_EAST,
    south: BLOCK_SOUTH,
    north: BLOCK_NORTH,
    south_west: BLOCK_SOUTH_WEST,
    south_east: BLOCK_SOUTH_EAST,
    north_west: BLOCK_NORTH_WEST,
    north_east: BLOCK_NORTH_EAST,
    north_and_south_east: BLOCK_NORTH_AND_SOUTH_EAST,
    north_and_south_west: BLOCK_NORTH_AND_SOUTH_WEST,
    north_east_and_west: BLOCK_NORTH_EAST_AND_WEST,
    south_east_and_west: BLOCK_SOUTH_EAST_AND_WEST,
};

pub static ROUTE_BLOCKER_MASKS: BlockMasks = BlockMasks {
    west: BLOCK_WEST_ROUTE_BLOCKER,
    east: BLOCK_EAST_ROUTE_BLOCKER,
    south: BLOCK_SOUTH_ROUTE_BLOCKER,
    north: BLOCK_NORTH_ROUTE_BLOCKER,
    south_west: BLOCK_SOUTH_WEST_ROUTE_BLOCKER,
    south_east: BLOCK_SOUTH_EAST_ROUTE_BLOCKER,
    north_west: BLOCK_NORTH_WEST_ROUTE_BLOCKER,
    north_east: BLOCK_NORTH_EAST_ROUTE_BLOCKER,
    north_and_south_east: BLOCK_NORTH_AND_SOUTH_EAST_ROUTE_BLOCKER,
    north_and_south_west: BLOCK_NORTH_AND_SOUTH_WEST_ROUTE_BLOCKER,
    north_east_and_west: BLOCK_NORTH_EAST_AND_WEST_ROUTE_BLOCKER,
    south_east_and_west: BLOCK_SOUTH_EAST_AND_WEST_ROUTE_BLOCKER,
};

impl BlockMasks {
    #[inline]
    pub fn select(route_blockers: bool) -> &'static BlockMasks {
        if route_blockers { &ROUTE_BLOCKER_MASKS } else { &MOVEMENT_MASKS }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn route_blocker_bits_are_movement_bits_shifted() {
        assert_eq!(WALL_NORTH_WEST_ROUTE_BLOCKER, WALL_NORTH_WEST << 22);
        assert_eq!(WALL_WEST_ROUTE_BLOCKER, WALL_WEST << 22);
        assert_eq!(OBJECT_ROUTE_BLOCKER, OBJECT << 22);
        assert_eq!(BLOCK_MOVEMENT << 22, BLOCK_ROUTE);
    }

    #[test]
    fn projectile_bits_are_movement_bits_shifted() {
        assert_eq!(BLOCK_MOVEMENT << 9, WALL_NORTH_WEST_PROJECTILE_BLOCKER
            | WALL_NORTH_PROJECTILE_BLOCKER
            | WALL_NORTH_EAST_PROJECTILE_BLOCKER
            | WALL_EAST_PROJECTILE_BLOCKER
            | WALL_SOUTH_EAST_PROJECTILE_BLOCKER
            | WALL_SOUTH_PROJECTILE_BLOCKER
            | WALL_SOUTH_WEST_PROJECTILE_BLOCKER
            | WALL_WEST_PROJECTILE_BLOCKER
            | OBJECT_PROJECTILE_BLOCKER);
    }

    #[test]
    fn masks_never_contain_roof_or_actor_bits() {
        for m in [MOVEMENT_MASKS, ROUTE_BLOCKER_MASKS] {
            for mask in [m.west, m.east, m.south, m.north, m.south_west, m.south_east, m.north_west, m.north_east] {
                assert_eq!(mask & (ROOF | BLOCK_NPCS | BLOCK_PLAYERS), 0);
                assert_ne!(mask & FLOOR, 0);
            }
        }
    }

    #[test]
    fn select_picks_table() {
        assert_eq!(BlockMasks::select(false).west, BLOCK_WEST);
        assert_eq!(BlockMasks::select(true).west, BLOCK_WEST_ROUTE_BLOCKER);
    }
}
