use rand::RngExt;

use crate::board::{Board, Cell, MAX_NUM, SUBGRID};
use crate::error::Error;

/// How often a failed subgrid is re-randomized before the whole fill
/// attempt is abandoned.
const SUBGRID_RETRIES: usize = 3 * MAX_NUM as usize;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    /// Still available for this subgrid.
    Free,
    /// Excluded by a digit already placed in the current row line.
    Row,
    /// Excluded by a digit already placed in the current column line.
    Col,
    /// Placed in this subgrid, or present as a clue.
    Used,
}

/// Candidate pool for one subgrid: digit `i + 1` lives at index `i`.
struct Pool {
    marks: [Mark; MAX_NUM as usize],
}

impl Pool {
    fn new() -> Self {
        Self {
            marks: [Mark::Free; MAX_NUM as usize],
        }
    }

    fn exclude(&mut self, digit: u8) {
        self.marks[digit as usize - 1] = Mark::Used;
    }

    /// Drop line marks carried over from the previous row line.
    fn clear_line_marks(&mut self) {
        for mark in &mut self.marks {
            if *mark == Mark::Row || *mark == Mark::Col {
                *mark = Mark::Free;
            }
        }
    }

    /// Drop marks carried over from the previous column line.
    fn clear_col_marks(&mut self) {
        for mark in &mut self.marks {
            if *mark == Mark::Col {
                *mark = Mark::Free;
            }
        }
    }

    fn mark_row(&mut self, digit: u8) {
        let mark = &mut self.marks[digit as usize - 1];
        if *mark == Mark::Free {
            *mark = Mark::Row;
        }
    }

    fn mark_col(&mut self, digit: u8) {
        let mark = &mut self.marks[digit as usize - 1];
        if *mark == Mark::Free {
            *mark = Mark::Col;
        }
    }

    fn available(&self) -> usize {
        self.marks.iter().filter(|mark| **mark == Mark::Free).count()
    }

    /// Take the `w`-th free digit, marking it used.
    fn take(&mut self, mut w: usize) -> Option<u8> {
        for (i, mark) in self.marks.iter_mut().enumerate() {
            if *mark != Mark::Free {
                continue;
            }
            if w == 0 {
                *mark = Mark::Used;
                return Some(i as u8 + 1);
            }
            w -= 1;
        }
        None
    }
}

/// Mark every digit visible anywhere in `row`. Cells filled by earlier
/// subgrids and clues in subgrids not yet visited both count; empty cells
/// are skipped.
fn mark_row(board: &Board, pool: &mut Pool, row: usize) {
    for col in 0..board.cols() {
        if let Some(d) = board.get(row, col).digit() {
            pool.mark_row(d);
        }
    }
}

/// Mark every digit visible anywhere in `col`.
fn mark_col(board: &Board, pool: &mut Pool, col: usize) {
    for row in 0..board.rows() {
        if let Some(d) = board.get(row, col).digit() {
            pool.mark_col(d);
        }
    }
}

/// One randomized attempt at the subgrid whose top-left cell is (r0, c0).
///
/// Walks the nine cells in row-major order. Row exclusions are recomputed
/// when the walk advances to a new row line, column exclusions when it
/// advances to a new column line. Clue cells are skipped; their digits were
/// excluded from the pool up front. Fails when a cell has no available
/// candidate left.
fn fill_subgrid<R: RngExt + ?Sized>(
    board: &mut Board,
    r0: usize,
    c0: usize,
    rng: &mut R,
) -> bool {
    let mut pool = Pool::new();
    for k in 0..MAX_NUM as usize {
        if let Some(d) = board.get(r0 + k / SUBGRID, c0 + k % SUBGRID).digit() {
            pool.exclude(d);
        }
    }

    for k in 0..MAX_NUM as usize {
        let row = r0 + k / SUBGRID;
        let col = c0 + k % SUBGRID;

        if k % SUBGRID == 0 {
            pool.clear_line_marks();
            mark_row(board, &mut pool, row);
        }
        pool.clear_col_marks();
        mark_col(board, &mut pool, col);

        if board.get(row, col).is_given() {
            continue;
        }

        let available = pool.available();
        if available == 0 {
            return false;
        }
        let w = rng.random_range(0..available);
        match pool.take(w) {
            Some(digit) => board.set(row, col, Cell::Given(digit)),
            None => return false,
        }
    }

    true
}

fn snapshot_subgrid(board: &Board, r0: usize, c0: usize) -> [Cell; MAX_NUM as usize] {
    let mut cells = [Cell::Empty; MAX_NUM as usize];
    for (k, cell) in cells.iter_mut().enumerate() {
        *cell = board.get(r0 + k / SUBGRID, c0 + k % SUBGRID);
    }
    cells
}

fn restore_subgrid(board: &mut Board, r0: usize, c0: usize, cells: &[Cell; MAX_NUM as usize]) {
    for (k, cell) in cells.iter().enumerate() {
        board.set(r0 + k / SUBGRID, c0 + k % SUBGRID, *cell);
    }
}

/// Re-randomize a single failed subgrid from its pre-attempt snapshot,
/// up to [`SUBGRID_RETRIES`] times, leaving the rest of the grid alone.
fn fill_subgrid_with_retry<R: RngExt + ?Sized>(
    board: &mut Board,
    r0: usize,
    c0: usize,
    rng: &mut R,
) -> bool {
    let snapshot = snapshot_subgrid(board, r0, c0);
    for _ in 0..SUBGRID_RETRIES {
        if fill_subgrid(board, r0, c0, rng) {
            return true;
        }
        restore_subgrid(board, r0, c0, &snapshot);
    }
    false
}

/// One whole-grid constructive fill attempt, visiting subgrids in
/// row-major order. Existing givens are kept and the blanks around them
/// filled to a globally valid solution. Returns false when local retries
/// are exhausted; the caller decides whether to restart from scratch.
pub(crate) fn fill<R: RngExt + ?Sized>(board: &mut Board, rng: &mut R) -> bool {
    for r0 in (0..board.rows()).step_by(SUBGRID) {
        for c0 in (0..board.cols()).step_by(SUBGRID) {
            if !fill_subgrid_with_retry(board, r0, c0, rng) {
                return false;
            }
        }
    }
    true
}

/// Generate a fully solved board.
///
/// Fresh fill attempts are repeated until one succeeds; there is no upper
/// bound on attempts.
pub fn generate<R: RngExt + ?Sized>(
    rows: usize,
    cols: usize,
    rng: &mut R,
) -> Result<Board, Error> {
    let mut board = Board::new(rows, cols)?;
    let mut trial = 1u64;
    loop {
        if fill(&mut board, rng) {
            log::debug!("generated a full grid at trial {trial}");
            return Ok(board);
        }
        board.reset();
        trial += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::is_solved;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn generate_rejects_bad_dimensions() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(
            generate(6, 9, &mut rng),
            Err(Error::InvalidDimensions { rows: 6, cols: 9 })
        );
    }

    #[test]
    fn generated_boards_are_solved() {
        for seed in 0..10 {
            let mut rng = StdRng::seed_from_u64(seed);
            let board = generate(9, 9, &mut rng).unwrap();
            assert!(is_solved(&board), "seed {seed} produced:\n{board}");
        }
    }

    #[test]
    fn fill_keeps_existing_clues() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut board = Board::new(9, 9).unwrap();
        board.set(0, 0, Cell::Given(8));
        board.set(4, 4, Cell::Given(4));
        board.set(8, 8, Cell::Given(2));

        while !fill(&mut board, &mut rng) {
            let cells = [(0, 0, 8), (4, 4, 4), (8, 8, 2)];
            board.reset();
            for (r, c, v) in cells {
                board.set(r, c, Cell::Given(v));
            }
        }

        assert!(is_solved(&board));
        assert_eq!(board.get(0, 0), Cell::Given(8));
        assert_eq!(board.get(4, 4), Cell::Given(4));
        assert_eq!(board.get(8, 8), Cell::Given(2));
    }
}
