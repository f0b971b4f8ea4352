use rand::RngExt;

use crate::board::{Board, Cell, MAX_NUM, SUBGRID};
use crate::error::Error;

/// Ceiling on hidden cells within any single subgrid; every subgrid keeps
/// at least two visible clues.
const MAX_HIDES_IN_SUBGRID: usize = 7;

/// Turn a solved board into a puzzle by hiding cells in place.
///
/// Each cell is hidden with independent probability `probability`, walking
/// subgrids and their cells in a fixed row-major order; only the coin
/// flips are random. At most `ceil(rows * cols * probability)` cells are
/// hidden overall and at most [`MAX_HIDES_IN_SUBGRID`] within one subgrid.
/// The board is trusted to be fully solved; this is not re-validated.
pub fn hide_digits<R: RngExt + ?Sized>(
    board: &mut Board,
    probability: f64,
    rng: &mut R,
) -> Result<(), Error> {
    if !(probability > 0.0 && probability <= 1.0) {
        return Err(Error::InvalidProbability(probability));
    }

    let max_hides = (board.rows() as f64 * board.cols() as f64 * probability).ceil() as usize;
    let mut hides = 0;

    for r0 in (0..board.rows()).step_by(SUBGRID) {
        for c0 in (0..board.cols()).step_by(SUBGRID) {
            let mut hides_in_subgrid = 0;
            for k in 0..MAX_NUM as usize {
                if rng.random_range(0.0..1.0) >= probability {
                    continue;
                }
                let row = r0 + k / SUBGRID;
                let col = c0 + k % SUBGRID;
                if let Cell::Given(d) = board.get(row, col) {
                    board.set(row, col, Cell::Hidden(d));
                } else {
                    continue;
                }

                hides += 1;
                if hides >= max_hides {
                    return Ok(());
                }
                hides_in_subgrid += 1;
                if hides_in_subgrid >= MAX_HIDES_IN_SUBGRID {
                    break;
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn probability_must_be_in_range() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut board = Board::new(9, 9).unwrap();
        assert_eq!(
            hide_digits(&mut board, 0.0, &mut rng),
            Err(Error::InvalidProbability(0.0))
        );
        assert_eq!(
            hide_digits(&mut board, 1.5, &mut rng),
            Err(Error::InvalidProbability(1.5))
        );
        assert_eq!(
            hide_digits(&mut board, -0.1, &mut rng),
            Err(Error::InvalidProbability(-0.1))
        );
        assert!(hide_digits(&mut board, f64::NAN, &mut rng).is_err());
    }

    #[test]
    fn hidden_cells_retain_their_digit() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut board = crate::generator::generate(9, 9, &mut rng).unwrap();
        let solved = board.clone();
        hide_digits(&mut board, 0.5, &mut rng).unwrap();

        for row in 0..9 {
            for col in 0..9 {
                match board.get(row, col) {
                    Cell::Hidden(d) | Cell::Given(d) => {
                        assert_eq!(Some(d), solved.get(row, col).digit());
                    }
                    other => panic!("unexpected cell {other:?}"),
                }
            }
        }
    }
}
