//! Per-cell search records packed into one `u32` each.
//!
//! Layout, low to high: 7 bits of direction, enough bits of distance to cover
//! `size / 2 + 10`, and the remaining bits hold the generation that wrote the
//! cell. A record whose generation differs from the grid's current one reads
//! as unvisited, so starting a new search costs one increment. Generation 0 is
//! never live: it marks cells that have not been written since the last clear.

use aligned_vec::AVec;
use tracing::debug;

use crate::engine::fallback::SEEK_RADIUS;

pub const DIRECTION_BITS: u32 = 7;
const DIRECTION_MASK: u32 = (1 << DIRECTION_BITS) - 1;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CellLayout {
    distance_bits: u32,
    generation_shift: u32,
    max_distance: u32,
    max_generation: u32,
}

impl CellLayout {
    pub fn for_window(size: usize) -> Self {
        let distance_bits = bit_length((size / 2) as u32 + SEEK_RADIUS as u32);
        let generation_shift = DIRECTION_BITS + distance_bits;
        Self {
            distance_bits,
            generation_shift,
            max_distance: (1 << distance_bits) - 1,
            max_generation: u32::MAX >> generation_shift,
        }
    }

    pub fn distance_bits(&self) -> u32 { self.distance_bits }
    pub fn generation_bits(&self) -> u32 { 32 - self.generation_shift }
    pub fn max_distance(&self) -> u32 { self.max_distance }
    pub fn max_generation(&self) -> u32 { self.max_generation }

    /// Distances beyond the field width saturate at `max_distance`.
    #[inline(always)]
    pub fn pack(&self, direction: u8, distance: u32, generation: u32) -> CellRecord {
        CellRecord(
            (direction as u32 & DIRECTION_MASK)
                | (distance.min(self.max_distance) << DIRECTION_BITS)
                | (generation << self.generation_shift),
        )
    }
}

#[inline]
fn bit_length(v: u32) -> u32 {
    u32::BITS - v.leading_zeros()
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[repr(transparent)]
pub struct CellRecord(u32);

impl CellRecord {
    pub const EMPTY: CellRecord = CellRecord(0);

    #[inline(always)]
    pub fn raw(self) -> u32 { self.0 }

    #[inline(always)]
    pub fn direction(self) -> u8 { (self.0 & DIRECTION_MASK) as u8 }

    #[inline(always)]
    pub fn distance(self, layout: &CellLayout) -> u32 {
        (self.0 >> DIRECTION_BITS) & layout.max_distance
    }

    #[inline(always)]
    pub fn generation(self, layout: &CellLayout) -> u32 {
        self.0 >> layout.generation_shift
    }
}

/// Square window of cell records reused across searches.
pub struct SearchGrid {
    size: usize,
    layout: CellLayout,
    cells: AVec<CellRecord>,
    generation: u32,
}

impl SearchGrid {
    pub fn new(size: usize) -> Self {
        Self {
            size,
            layout: CellLayout::for_window(size),
            cells: AVec::__from_elem(64, CellRecord::EMPTY, size * size),
            generation: 0,
        }
    }

    pub fn size(&self) -> usize { self.size }
    pub fn layout(&self) -> &CellLayout { &self.layout }
    pub fn generation(&self) -> u32 { self.generation }

    /// Invalidate every record. Wrapping the generation counter clears the
    /// array on that same step and restarts at 1; returns true when it did.
    pub fn begin_search(&mut self) -> bool {
        if self.generation >= self.layout.max_generation {
            self.cells.fill(CellRecord::EMPTY);
            self.generation = 1;
            debug!(size = self.size, "search generation wrapped, grid cleared");
            true
        } else {
            self.generation += 1;
            false
        }
    }

    #[inline(always)]
    fn index(&self, x: i32, y: i32) -> usize {
        debug_assert!(x >= 0 && y >= 0 && (x as usize) < self.size && (y as usize) < self.size);
        y as usize * self.size + x as usize
    }

    #[inline(always)]
    fn live(&self, x: i32, y: i32) -> Option<CellRecord> {
        let cell = self.cells[self.index(x, y)];
        (cell.generation(&self.layout) == self.generation).then_some(cell)
    }

    #[inline(always)]
    pub fn is_visited(&self, x: i32, y: i32) -> bool {
        self.live(x, y).is_some()
    }

    #[inline(always)]
    pub fn visit(&mut self, x: i32, y: i32, direction: u8, distance: u32) {
        let i = self.index(x, y);
        self.cells[i] = self.layout.pack(direction, distance, self.generation);
    }

    /// Steps from the source, `None` when the cell was not reached by the current search.
    #[inline(always)]
    pub fn distance(&self, x: i32, y: i32) -> Option<u32> {
        self.live(x, y).map(|c| c.distance(&self.layout))
    }

    #[inline(always)]
    pub fn direction(&self, x: i32, y: i32) -> Option<u8> {
        self.live(x, y).map(CellRecord::direction)
    }

    #[cfg(test)]
    pub(crate) fn set_generation(&mut self, generation: u32) {
        self.generation = generation;
    }

    #[cfg(test)]
    pub(crate) fn raw(&self, x: i32, y: i32) -> CellRecord {
        self.cells[self.index(x, y)]
    }
}
