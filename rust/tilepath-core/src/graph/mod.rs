pub mod map_file;
pub mod movement;
pub mod provider;
pub mod zone_flags;

pub use map_file::CollisionMap;
pub use movement::Direction;
pub use provider::FlagProvider;
pub use zone_flags::ZoneFlags;
