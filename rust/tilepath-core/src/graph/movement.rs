//! Compass directions, their packed flag bits, and step deltas.
//! A direction's flag is the set of axis bits it moves along; diagonals combine two.

pub const DIR_NORTH: u8 = 0x1;
pub const DIR_EAST: u8 = 0x2;
pub const DIR_SOUTH: u8 = 0x4;
pub const DIR_WEST: u8 = 0x8;
pub const DIR_SOUTH_WEST: u8 = DIR_WEST | DIR_SOUTH;
pub const DIR_NORTH_WEST: u8 = DIR_WEST | DIR_NORTH;
pub const DIR_SOUTH_EAST: u8 = DIR_EAST | DIR_SOUTH;
pub const DIR_NORTH_EAST: u8 = DIR_EAST | DIR_NORTH;

/// Direction value recorded on the source cell. Never produced by a real step.
pub const DIR_SOURCE: u8 = 99;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    West,
    East,
    South,
    North,
    SouthWest,
    SouthEast,
    NorthWest,
    NorthEast,
}

impl Direction {
    /// Order in which the search offers neighbours: orthogonals first, then diagonals.
    pub const EXPANSION_ORDER: [Direction; 8] = [
        Direction::West,
        Direction::East,
        Direction::South,
        Direction::North,
        Direction::SouthWest,
        Direction::SouthEast,
        Direction::NorthWest,
        Direction::NorthEast,
    ];

    #[inline]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::West => (-1, 0),
            Direction::East => (1, 0),
            Direction::South => (0, -1),
            Direction::North => (0, 1),
            Direction::SouthWest => (-1, -1),
            Direction::SouthEast => (1, -1),
            Direction::NorthWest => (-1, 1),
            Direction::NorthEast => (1, 1),
        }
    }

    #[inline]
    pub const fn flag(self) -> u8 {
        match self {
            Direction::West => DIR_WEST,
            Direction::East => DIR_EAST,
            Direction::South => DIR_SOUTH,
            Direction::North => DIR_NORTH,
            Direction::SouthWest => DIR_SOUTH_WEST,
            Direction::SouthEast => DIR_SOUTH_EAST,
            Direction::NorthWest => DIR_NORTH_WEST,
            Direction::NorthEast => DIR_NORTH_EAST,
        }
    }

    pub const fn is_diagonal(self) -> bool {
        let (dx, dy) = self.delta();
        dx != 0 && dy != 0
    }

    /// Map a unit step to its direction. `None` for (0, 0) and anything outside {-1, 0, 1}².
    #[inline]
    pub fn from_delta(dx: i32, dy: i32) -> Option<Direction> {
        if !(-1..=1).contains(&dx) || !(-1..=1).contains(&dy) {
            return None;
        }
        DELTA_TO_DIRECTION[delta_index(dx, dy)]
    }

    pub fn name(self) -> &'static str {
        match self {
            Direction::West => "west",
            Direction::East => "east",
            Direction::South => "south",
            Direction::North => "north",
            Direction::SouthWest => "southwest",
            Direction::SouthEast => "southeast",
            Direction::NorthWest => "northwest",
            Direction::NorthEast => "northeast",
        }
    }
}

#[inline]
const fn delta_index(dx: i32, dy: i32) -> usize {
    ((dx + 1) | ((dy + 1) << 2)) as usize
}

// Indexed by (dx + 1) | ((dy + 1) << 2); the unused slots stay None.
static DELTA_TO_DIRECTION: [Option<Direction>; 16] = build_delta_lookup();
const fn build_delta_lookup() -> [Option<Direction>; 16] {
    let mut table = [None; 16];
    let mut i = 0;
    while i < Direction::EXPANSION_ORDER.len() {
        let dir = Direction::EXPANSION_ORDER[i];
        let (dx, dy) = dir.delta();
        table[delta_index(dx, dy)] = Some(dir);
        i += 1;
    }
    table
}

/// Walk one cell against a recorded direction flag, i.e. back the way the search came.
#[inline]
pub fn step_back(flag: u8, x: i32, y: i32) -> (i32, i32) {
    let mut nx = x;
    let mut ny = y;
    if flag & DIR_EAST != 0 {
        nx -= 1;
    } else if flag & DIR_WEST != 0 {
        nx += 1;
    }
    if flag & DIR_NORTH != 0 {
        ny -= 1;
    } else if flag & DIR_SOUTH != 0 {
        ny += 1;
    }
    (nx, ny)
}
