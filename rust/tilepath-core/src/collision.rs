//! Policies deciding whether a tile's flags admit a move under a given block mask.

use crate::flags::{BLOCK_MOVEMENT, BLOCK_ROUTE, FLOOR, ROOF};

pub trait CollisionStrategy: Send + Sync {
    fn can_move(&self, tile_flags: u32, block_flags: u32) -> bool;
}

/// Any overlap between the tile and the block mask blocks.
#[derive(Copy, Clone, Debug, Default)]
pub struct Normal;

impl CollisionStrategy for Normal {
    #[inline]
    fn can_move(&self, tile_flags: u32, block_flags: u32) -> bool {
        tile_flags & block_flags == 0
    }
}

/// Nothing moves.
#[derive(Copy, Clone, Debug, Default)]
pub struct Blocked;

impl CollisionStrategy for Blocked {
    #[inline]
    fn can_move(&self, _tile_flags: u32, _block_flags: u32) -> bool {
        false
    }
}

/// Tests the mask against projectile blockers instead of walking blockers.
/// Wall/object bits shift up into the projectile layout, route-blocker bits shift down into it.
#[derive(Copy, Clone, Debug, Default)]
pub struct LineOfSight;

impl CollisionStrategy for LineOfSight {
    #[inline]
    fn can_move(&self, tile_flags: u32, block_flags: u32) -> bool {
        let movement = (block_flags & BLOCK_MOVEMENT) << 9;
        let route = (block_flags & BLOCK_ROUTE) >> 13;
        tile_flags & (movement | route) == 0
    }
}

/// Normal movement restricted to roofed tiles.
#[derive(Copy, Clone, Debug, Default)]
pub struct RoofBound;

impl CollisionStrategy for RoofBound {
    #[inline]
    fn can_move(&self, tile_flags: u32, block_flags: u32) -> bool {
        tile_flags & block_flags == 0 && tile_flags & ROOF != 0
    }
}

/// Normal movement restricted to tiles without a roof.
#[derive(Copy, Clone, Debug, Default)]
pub struct Outdoors;

impl CollisionStrategy for Outdoors {
    #[inline]
    fn can_move(&self, tile_flags: u32, block_flags: u32) -> bool {
        tile_flags & block_flags == 0 && tile_flags & ROOF == 0
    }
}

/// Requires `inverse_flag` to be present and ignores it in the block mask,
/// e.g. `Inverse::new(FLOOR)` walks only where regular actors cannot.
#[derive(Copy, Clone, Debug)]
pub struct Inverse {
    inverse_flag: u32,
}

impl Inverse {
    pub const fn new(inverse_flag: u32) -> Self { Self { inverse_flag } }
    pub fn inverse_flag(&self) -> u32 { self.inverse_flag }
}

impl CollisionStrategy for Inverse {
    #[inline]
    fn can_move(&self, tile_flags: u32, block_flags: u32) -> bool {
        let flag = block_flags & !self.inverse_flag;
        tile_flags & flag == 0 && tile_flags & self.inverse_flag != 0
    }
}

pub static NORMAL: Normal = Normal;
pub static BLOCKED: Blocked = Blocked;
pub static LINE_OF_SIGHT: LineOfSight = LineOfSight;
/// Flying actors ignore walking blockers and respect projectile blockers.
pub static FLY: LineOfSight = LineOfSight;
pub static INDOORS: RoofBound = RoofBound;
pub static OUTDOORS: Outdoors = Outdoors;
pub static FLOOR_ONLY: Inverse = Inverse::new(FLOOR);

/// Built-in strategy by name, as accepted by configuration and the command line.
pub fn by_name(name: &str) -> Option<&'static dyn CollisionStrategy> {
    let strategy: &'static dyn CollisionStrategy = match name.trim().to_ascii_lowercase().as_str() {
        "normal" => &NORMAL,
        "blocked" => &BLOCKED,
        "line-of-sight" | "line_of_sight" | "los" => &LINE_OF_SIGHT,
        "fly" => &FLY,
        "indoors" | "roof-bound" => &INDOORS,
        "outdoors" => &OUTDOORS,
        "floor-only" => &FLOOR_ONLY,
        _ => return None,
    };
    Some(strategy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flags::*;

    #[test]
    fn normal_blocks_on_any_overlap() {
        assert!(NORMAL.can_move(0, BLOCK_WEST));
        assert!(NORMAL.can_move(WALL_WEST, BLOCK_WEST));
        assert!(!NORMAL.can_move(WALL_EAST, BLOCK_WEST));
        assert!(!NORMAL.can_move(OBJECT, BLOCK_NORTH));
    }

    #[test]
    fn blocked_never_moves() {
        assert!(!BLOCKED.can_move(0, 0));
        assert!(!BLOCKED.can_move(FLOOR, BLOCK_WEST));
    }

    #[test]
    fn line_of_sight_reads_projectile_bits() {
        // A plain object does not stop projectiles.
        assert!(LINE_OF_SIGHT.can_move(OBJECT, BLOCK_WEST));
        assert!(!LINE_OF_SIGHT.can_move(OBJECT_PROJECTILE_BLOCKER, BLOCK_WEST));
        assert!(!LINE_OF_SIGHT.can_move(WALL_EAST_PROJECTILE_BLOCKER, BLOCK_WEST));
        assert!(LINE_OF_SIGHT.can_move(WALL_WEST_PROJECTILE_BLOCKER, BLOCK_WEST));
        // Route-blocker masks map onto the same projectile bits.
        assert!(!LINE_OF_SIGHT.can_move(OBJECT_PROJECTILE_BLOCKER, BLOCK_WEST_ROUTE_BLOCKER));
        assert!(!LINE_OF_SIGHT.can_move(WALL_EAST_PROJECTILE_BLOCKER, BLOCK_WEST_ROUTE_BLOCKER));
        // Floor bits are not part of the projectile layout.
        assert!(LINE_OF_SIGHT.can_move(FLOOR, BLOCK_WEST));
    }

    #[test]
    fn roof_variants_gate_on_roof_bit() {
        assert!(INDOORS.can_move(ROOF, BLOCK_WEST));
        assert!(!INDOORS.can_move(0, BLOCK_WEST));
        assert!(!INDOORS.can_move(ROOF | OBJECT, BLOCK_WEST));
        assert!(OUTDOORS.can_move(0, BLOCK_WEST));
        assert!(!OUTDOORS.can_move(ROOF, BLOCK_WEST));
    }

    #[test]
    fn inverse_requires_flag_and_ignores_it_in_mask() {
        assert!(FLOOR_ONLY.can_move(FLOOR, BLOCK_WEST));
        assert!(!FLOOR_ONLY.can_move(0, BLOCK_WEST));
        assert!(!FLOOR_ONLY.can_move(FLOOR | OBJECT, BLOCK_WEST));
        assert_eq!(FLOOR_ONLY.inverse_flag(), FLOOR);
    }

    #[test]
    fn lookup_by_name() {
        assert!(by_name("normal").is_some());
        assert!(by_name(" Line-Of-Sight ").is_some());
        assert!(by_name("outdoors").unwrap().can_move(0, BLOCK_WEST));
        assert!(by_name("teleport").is_none());
    }
}
