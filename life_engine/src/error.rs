use thiserror::Error;

/// Errors raised while building the simulation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LifeError {
    /// The surface cannot fit the 5x5 injection pattern.
    #[error("grid of {width}x{height} is too small for Game of Life, use at least 5x5")]
    GridTooSmall { width: usize, height: usize },
}
