use thiserror::Error;

/// Errors surfaced by the engine.
///
/// Fill failures during generation and solving are recovered internally by
/// retrying and never appear here.
#[derive(Debug, Error, PartialEq)]
pub enum Error {
    #[error("invalid grid dimensions {rows}x{cols}: expected 9x9 (sides must be multiples of 3)")]
    InvalidDimensions { rows: usize, cols: usize },

    #[error("hide probability {0} must be within (0, 1]")]
    InvalidProbability(f64),

    #[error("worker count {0} must be at least 1")]
    InvalidWorkerCount(usize),

    #[error("a solver worker terminated abnormally")]
    Interrupted,
}
