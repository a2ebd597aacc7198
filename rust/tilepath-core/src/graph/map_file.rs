//! JSON collision map files, used by the command-line tool and fixtures.
//!
//! ```json
//! { "default_flag": 0,
//!   "tiles":  [ { "x": 3200, "y": 3201, "plane": 0, "flags": 256 } ],
//!   "blocks": [ { "x": 3205, "y": 3200, "width": 2, "height": 2, "flags": 256 } ] }
//! ```

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::MapError;

use super::zone_flags::ZoneFlags;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollisionMap {
    #[serde(default)]
    pub default_flag: u32,
    #[serde(default)]
    pub tiles: Vec<TileEntry>,
    #[serde(default)]
    pub blocks: Vec<BlockEntry>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileEntry {
    pub x: i32,
    pub y: i32,
    #[serde(default)]
    pub plane: i32,
    pub flags: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockEntry {
    pub x: i32,
    pub y: i32,
    #[serde(default)]
    pub plane: i32,
    pub width: i32,
    pub height: i32,
    pub flags: u32,
}

impl CollisionMap {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, MapError> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn from_reader(reader: impl Read) -> Result<Self, MapError> {
        let map: CollisionMap = serde_json::from_reader(reader)?;
        map.validate()?;
        Ok(map)
    }

    fn validate(&self) -> Result<(), MapError> {
        if let Some(b) = self.blocks.iter().find(|b| b.width < 1 || b.height < 1) {
            return Err(MapError::EmptyBlock { x: b.x, y: b.y, width: b.width, height: b.height });
        }
        Ok(())
    }

    /// Tiles are written first (replacing), blocks are OR-ed on top.
    pub fn to_zone_flags(&self) -> ZoneFlags {
        let mut flags = ZoneFlags::with_default(self.default_flag);
        for t in &self.tiles {
            flags.set(t.x, t.y, t.plane, t.flags);
        }
        for b in &self.blocks {
            flags.add_block(b.x, b.y, b.plane, b.width, b.height, b.flags);
        }
        flags
    }
}
