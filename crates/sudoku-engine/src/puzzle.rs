use rand::RngExt;

use crate::board::Board;
use crate::difficulty::Difficulty;
use crate::error::Error;
use crate::generator::generate;
use crate::masker::hide_digits;

/// Board side lengths used for standard puzzles.
pub const ROWS: usize = 9;
pub const COLS: usize = 9;

/// Generate a playable puzzle at the given difficulty: a solved 9x9 board
/// with cells hidden at the difficulty's probability.
pub fn generate_puzzle<R: RngExt + ?Sized>(
    difficulty: Difficulty,
    rng: &mut R,
) -> Result<Board, Error> {
    let mut board = generate(ROWS, COLS, rng)?;
    log::debug!("solved grid:\n{board}");
    hide_digits(&mut board, difficulty.hide_probability(), rng)?;
    Ok(board)
}
