//! Footprint-aware breadth-first route finding over tile collision flags.
//!
//! [`PathFinder`] searches a square window centred on the actor, honouring
//! per-tile collision flags, a pluggable [`CollisionStrategy`] and a pluggable
//! [`ReachStrategy`] for the goal test. [`StepValidator`] exposes the same edge
//! rules for single-step checks outside of a search. [`DumbPathFinder`] walks
//! greedily towards the goal with the same edge rules and goal tests.

pub mod collision;
pub mod engine;
pub mod error;
pub mod flags;
pub mod graph;
pub mod models;
pub mod options;
pub mod reach;
pub mod step;

pub use collision::CollisionStrategy;
pub use engine::{DumbPathFinder, PathFinder};
pub use error::{ConfigError, MapError};
pub use graph::{CollisionMap, Direction, FlagProvider, ZoneFlags};
pub use models::{Route, Waypoint};
pub use options::{PathFinderConfig, PathRequest, TurnTruncation};
pub use reach::{Destination, ReachStrategy};
pub use step::StepValidator;

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    #[test]
    fn finder_is_send() {
        fn assert_send<T: Send>() {}
        assert_send::<crate::PathFinder>();
        assert_send::<crate::DumbPathFinder>();
    }
}
