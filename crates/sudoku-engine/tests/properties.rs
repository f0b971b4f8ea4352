use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;
use sudoku_engine::generate;

fn is_permutation(digits: [u8; 9]) -> bool {
    let mut seen = [false; 9];
    for d in digits {
        if d == 0 || seen[d as usize - 1] {
            return false;
        }
        seen[d as usize - 1] = true;
    }
    true
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1000))]

    /// Whatever the random stream, a successful generation yields a grid
    /// where every row, column and subgrid is a permutation of 1..=9.
    #[test]
    fn every_generated_grid_is_structurally_valid(seed in any::<u64>()) {
        let board = generate(9, 9, &mut StdRng::seed_from_u64(seed)).unwrap();

        for row in 0..9 {
            let mut digits = [0u8; 9];
            for col in 0..9 {
                digits[col] = board.get(row, col).digit().unwrap_or(0);
            }
            prop_assert!(is_permutation(digits), "row {row} of seed {seed}");
        }

        for col in 0..9 {
            let mut digits = [0u8; 9];
            for row in 0..9 {
                digits[row] = board.get(row, col).digit().unwrap_or(0);
            }
            prop_assert!(is_permutation(digits), "column {col} of seed {seed}");
        }

        for r0 in [0, 3, 6] {
            for c0 in [0, 3, 6] {
                let mut digits = [0u8; 9];
                for k in 0..9 {
                    digits[k] = board.get(r0 + k / 3, c0 + k % 3).digit().unwrap_or(0);
                }
                prop_assert!(is_permutation(digits), "subgrid ({r0},{c0}) of seed {seed}");
            }
        }
    }
}
