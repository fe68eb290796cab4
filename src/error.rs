/// Errors reported by grid, engine, renderer and worker operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LifeError {
    #[error("Grid dimensions must be non-zero, got {width}x{height}")]
    InvalidDimension { width: usize, height: usize },

    #[error("Cell ({x}, {y}) is outside the {width}x{height} grid")]
    OutOfRange {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },

    #[error("Grid holds {actual} cells, expected {expected}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Cell {index} has value {value}, expected 0 or 1")]
    InvalidCellValue { index: usize, value: u8 },

    #[error("Density must be within [0, 1], got {0}")]
    InvalidDensity(f64),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("A step request is already in flight")]
    WorkerBusy,

    #[error("Step worker has disconnected")]
    WorkerDisconnected,

    #[error("Failed to spawn step worker: {0}")]
    WorkerSpawn(String),
}

pub type Result<T> = std::result::Result<T, LifeError>;
