//! Sparse collision flag storage chunked into 8x8 zones.
//! Zones are allocated on first write; lookups into unallocated zones return the
//! store's default flag. Read access is lock-free and the store is `Send + Sync`.

use rustc_hash::FxHashMap;

use super::provider::FlagProvider;

pub const ZONE_SIZE: i32 = 8;
const ZONE_TILES: usize = (ZONE_SIZE * ZONE_SIZE) as usize;

type Zone = Box<[u32; ZONE_TILES]>;

/// Packed zone key: 11 bits of zone x, 11 bits of zone y, 2 bits of plane.
#[inline]
pub fn zone_index(x: i32, y: i32, plane: i32) -> u32 {
    ((x >> 3) & 0x7FF) as u32 | ((((y >> 3) & 0x7FF) as u32) << 11) | (((plane & 0x3) as u32) << 22)
}

#[inline]
pub fn tile_index(x: i32, y: i32) -> usize {
    ((x & 0x7) | ((y & 0x7) << 3)) as usize
}

#[derive(Clone, Debug, Default)]
pub struct ZoneFlags {
    zones: FxHashMap<u32, Zone>,
    default_flag: u32,
}

impl ZoneFlags {
    /// Empty store where every unallocated tile reads as open (`0`).
    pub fn new() -> Self { Self::with_default(0) }

    pub fn with_default(default_flag: u32) -> Self {
        Self { zones: FxHashMap::default(), default_flag }
    }

    pub fn default_flag(&self) -> u32 { self.default_flag }

    pub fn zone_count(&self) -> usize { self.zones.len() }

    #[inline]
    pub fn get(&self, x: i32, y: i32, plane: i32) -> u32 {
        match self.zones.get(&zone_index(x, y, plane)) {
            Some(zone) => zone[tile_index(x, y)],
            None => self.default_flag,
        }
    }

    /// Zone containing (x, y, plane), allocating it with all tiles open when absent.
    pub fn alloc_if_absent(&mut self, x: i32, y: i32, plane: i32) -> &mut [u32; ZONE_TILES] {
        self.zones
            .entry(zone_index(x, y, plane))
            .or_insert_with(|| Box::new([0; ZONE_TILES]))
    }

    pub fn set(&mut self, x: i32, y: i32, plane: i32, flags: u32) {
        self.alloc_if_absent(x, y, plane)[tile_index(x, y)] = flags;
    }

    pub fn add(&mut self, x: i32, y: i32, plane: i32, mask: u32) {
        self.alloc_if_absent(x, y, plane)[tile_index(x, y)] |= mask;
    }

    /// Clear `mask` on one tile. Unallocated zones are left alone so their tiles
    /// keep reading as the default flag.
    pub fn remove(&mut self, x: i32, y: i32, plane: i32, mask: u32) {
        if let Some(zone) = self.zones.get_mut(&zone_index(x, y, plane)) {
            zone[tile_index(x, y)] &= !mask;
        }
    }

    /// OR `mask` into every tile of a `width` x `height` rectangle anchored at its south-west corner.
    pub fn add_block(&mut self, x: i32, y: i32, plane: i32, width: i32, height: i32, mask: u32) {
        for tx in x..x + width {
            for ty in y..y + height {
                self.add(tx, ty, plane, mask);
            }
        }
    }

    /// Drop the zone containing (x, y, plane). Returns true when a zone was present.
    pub fn clear_zone(&mut self, x: i32, y: i32, plane: i32) -> bool {
        self.zones.remove(&zone_index(x, y, plane)).is_some()
    }
}

impl FlagProvider for ZoneFlags {
    #[inline]
    fn get(&self, x: i32, y: i32, plane: i32) -> u32 {
        ZoneFlags::get(self, x, y, plane)
    }
}
