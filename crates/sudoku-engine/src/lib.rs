pub mod board;
pub mod difficulty;
pub mod error;
pub mod generator;
pub mod masker;
pub mod puzzle;
pub mod solver;
pub mod validation;

pub use board::{Board, Cell, MAX_NUM};
pub use difficulty::Difficulty;
pub use error::Error;
pub use generator::generate;
pub use masker::hide_digits;
pub use puzzle::generate_puzzle;
pub use solver::{DEFAULT_WORKERS, solve};
pub use validation::is_solved;
