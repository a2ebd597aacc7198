use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("search map size {size} outside supported range {min}..={max}")]
    SearchMapSize { size: usize, min: usize, max: usize },
    #[error("ring buffer size {0} is not a power of two")]
    RingBufferNotPowerOfTwo(usize),
    #[error("ring buffer size {size} cannot hold a {area}-cell search window")]
    RingBufferTooSmall { size: usize, area: usize },
}

#[derive(Debug, Error)]
pub enum MapError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error("block at ({x}, {y}) has non-positive size {width}x{height}")]
    EmptyBlock { x: i32, y: i32, width: i32, height: i32 },
}
