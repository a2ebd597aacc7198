pub mod dumb;
pub mod fallback;
pub mod frontier;
pub mod search;
pub mod state;

pub use dumb::DumbPathFinder;
pub use frontier::Frontier;
pub use search::PathFinder;
pub use state::{CellLayout, CellRecord, SearchGrid};
