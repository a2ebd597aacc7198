use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::collision::{CollisionStrategy, NORMAL};
use crate::error::ConfigError;
use crate::reach::{Destination, ReachStrategy, DEFAULT_REACH, SHAPE_TILE};

pub const DEFAULT_SEARCH_MAP_SIZE: usize = 128;
pub const MIN_SEARCH_MAP_SIZE: usize = 32;
pub const MAX_SEARCH_MAP_SIZE: usize = 2048;
pub const DEFAULT_MAX_TURNS: usize = 25;

pub const ENV_SEARCH_MAP_SIZE: &str = "TILEPATH_SEARCH_MAP_SIZE";
pub const ENV_RING_BUFFER_SIZE: &str = "TILEPATH_RING_BUFFER_SIZE";
pub const ENV_TURN_TRUNCATION: &str = "TILEPATH_TURN_TRUNCATION";

/// Which turn points survive when a route has more than `max_turns` of them.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnTruncation {
    /// Keep the turns closest to the source; the walker re-routes once it gets there.
    #[default]
    KeepNearestSource,
    /// Keep the turns closest to where the route ends.
    KeepNearestDestination,
}

impl FromStr for TurnTruncation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "keep_nearest_source" | "source" => Ok(TurnTruncation::KeepNearestSource),
            "keep_nearest_destination" | "destination" => Ok(TurnTruncation::KeepNearestDestination),
            other => Err(format!("unknown turn truncation '{other}'")),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathFinderConfig {
    /// Side of the square window searched around the source.
    pub search_map_size: usize,
    /// Frontier capacity; derived from the window when absent.
    pub ring_buffer_size: Option<usize>,
    pub turn_truncation: TurnTruncation,
}

impl Default for PathFinderConfig {
    fn default() -> Self {
        Self {
            search_map_size: DEFAULT_SEARCH_MAP_SIZE,
            ring_buffer_size: None,
            turn_truncation: TurnTruncation::default(),
        }
    }
}

impl PathFinderConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Missing or unparsable values keep their defaults;
    /// range checks are left to [`validate`](Self::validate).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let search_map_size = lookup(ENV_SEARCH_MAP_SIZE)
            .and_then(|s| s.trim().parse::<usize>().ok())
            .unwrap_or(defaults.search_map_size);
        let ring_buffer_size = lookup(ENV_RING_BUFFER_SIZE).and_then(|s| s.trim().parse::<usize>().ok());
        let turn_truncation = lookup(ENV_TURN_TRUNCATION)
            .and_then(|s| s.parse::<TurnTruncation>().ok())
            .unwrap_or(defaults.turn_truncation);
        Self { search_map_size, ring_buffer_size, turn_truncation }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let size = self.search_map_size;
        if !(MIN_SEARCH_MAP_SIZE..=MAX_SEARCH_MAP_SIZE).contains(&size) {
            return Err(ConfigError::SearchMapSize { size, min: MIN_SEARCH_MAP_SIZE, max: MAX_SEARCH_MAP_SIZE });
        }
        if let Some(ring) = self.ring_buffer_size {
            if !ring.is_power_of_two() {
                return Err(ConfigError::RingBufferNotPowerOfTwo(ring));
            }
            let area = size * size;
            if ring < area {
                return Err(ConfigError::RingBufferTooSmall { size: ring, area });
            }
        }
        Ok(())
    }

    /// Frontier capacity: every cell of the window is enqueued at most once per search.
    pub fn ring_capacity(&self) -> usize {
        self.ring_buffer_size
            .unwrap_or_else(|| (self.search_map_size * self.search_map_size).next_power_of_two())
    }
}

/// One route query. Coordinates are absolute world tiles; `(src_x, src_y)` is the
/// south-west tile of the actor's square footprint.
#[derive(Clone, Copy)]
pub struct PathRequest<'a> {
    pub src_x: i32,
    pub src_y: i32,
    pub dest_x: i32,
    pub dest_y: i32,
    pub plane: i32,
    pub src_size: i32,
    pub dest_width: i32,
    pub dest_height: i32,
    pub dest_rotation: i32,
    pub dest_shape: i32,
    pub access_bit_mask: u32,
    pub max_turns: usize,
    /// OR-ed into every block mask the edge checks use.
    pub extra_block_flags: u32,
    pub collision: &'a dyn CollisionStrategy,
    pub reach: &'a dyn ReachStrategy,
    /// Settle for the closest visited cell when the goal is unreachable.
    pub move_near: bool,
    pub route_blockers: bool,
}

impl Default for PathRequest<'_> {
    fn default() -> Self {
        Self {
            src_x: 0,
            src_y: 0,
            dest_x: 0,
            dest_y: 0,
            plane: 0,
            src_size: 1,
            dest_width: 1,
            dest_height: 1,
            dest_rotation: 0,
            dest_shape: SHAPE_TILE,
            access_bit_mask: 0,
            max_turns: DEFAULT_MAX_TURNS,
            extra_block_flags: 0,
            collision: &NORMAL,
            reach: &DEFAULT_REACH,
            move_near: true,
            route_blockers: false,
        }
    }
}

impl<'a> PathRequest<'a> {
    pub fn new(src_x: i32, src_y: i32, dest_x: i32, dest_y: i32, plane: i32) -> Self {
        Self { src_x, src_y, dest_x, dest_y, plane, ..Self::default() }
    }

    pub fn destination(&self) -> Destination {
        Destination {
            x: self.dest_x,
            y: self.dest_y,
            width: self.dest_width,
            height: self.dest_height,
            rotation: self.dest_rotation,
            shape: self.dest_shape,
            access_bit_mask: self.access_bit_mask,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults() {
        let c = PathFinderConfig::default();
        assert_eq!(c.search_map_size, 128);
        assert_eq!(c.ring_capacity(), 16384);
        assert_eq!(c.turn_truncation, TurnTruncation::KeepNearestSource);
        assert_eq!(c.validate(), Ok(()));
    }

    #[test]
    fn derived_capacity_rounds_up() {
        let c = PathFinderConfig { search_map_size: 100, ..Default::default() };
        assert_eq!(c.ring_capacity(), 16384);
        let c = PathFinderConfig { search_map_size: 64, ..Default::default() };
        assert_eq!(c.ring_capacity(), 4096);
    }

    #[test]
    fn validation_errors() {
        let small = PathFinderConfig { search_map_size: 8, ..Default::default() };
        assert_eq!(small.validate(), Err(ConfigError::SearchMapSize { size: 8, min: 32, max: 2048 }));
        let odd = PathFinderConfig { ring_buffer_size: Some(20000), ..Default::default() };
        assert_eq!(odd.validate(), Err(ConfigError::RingBufferNotPowerOfTwo(20000)));
        let short = PathFinderConfig { ring_buffer_size: Some(4096), ..Default::default() };
        assert_eq!(short.validate(), Err(ConfigError::RingBufferTooSmall { size: 4096, area: 16384 }));
        let big = PathFinderConfig { ring_buffer_size: Some(1 << 15), ..Default::default() };
        assert_eq!(big.validate(), Ok(()));
        assert_eq!(big.ring_capacity(), 1 << 15);
    }

    #[test]
    fn reads_environment_keys() {
        let c = PathFinderConfig::from_lookup(lookup(&[
            (ENV_SEARCH_MAP_SIZE, "256"),
            (ENV_RING_BUFFER_SIZE, "65536"),
            (ENV_TURN_TRUNCATION, "keep-nearest-destination"),
        ]));
        assert_eq!(c.search_map_size, 256);
        assert_eq!(c.ring_buffer_size, Some(65536));
        assert_eq!(c.turn_truncation, TurnTruncation::KeepNearestDestination);
    }

    #[test]
    fn unparsable_environment_falls_back() {
        let c = PathFinderConfig::from_lookup(lookup(&[(ENV_SEARCH_MAP_SIZE, "big"), (ENV_TURN_TRUNCATION, "middle")]));
        assert_eq!(c, PathFinderConfig::default());
    }

    #[test]
    fn deserializes_with_defaults_when_missing_fields() {
        let c: PathFinderConfig = serde_json::from_value(json!({ "turn_truncation": "keep_nearest_destination" })).unwrap();
        assert_eq!(c.search_map_size, DEFAULT_SEARCH_MAP_SIZE);
        assert_eq!(c.ring_buffer_size, None);
        assert_eq!(c.turn_truncation, TurnTruncation::KeepNearestDestination);
    }

    #[test]
    fn request_defaults() {
        let r = PathRequest::new(3, 4, 10, 12, 1);
        assert_eq!((r.src_size, r.dest_width, r.dest_height), (1, 1, 1));
        assert_eq!(r.dest_shape, -1);
        assert_eq!(r.max_turns, DEFAULT_MAX_TURNS);
        assert!(r.move_near && !r.route_blockers);
        let d = r.destination();
        assert_eq!((d.x, d.y, d.shape), (10, 12, -1));
    }
}
