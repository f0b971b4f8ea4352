use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::board::{Board, Cell};
use crate::error::Error;
use crate::generator;

/// Worker count used when the caller has no preference.
pub const DEFAULT_WORKERS: usize = 2;

/// Log the shared trial counter every this many attempts.
const TRIAL_LOG_INTERVAL: u64 = 1000;

/// Reconstruct a valid completion of `board` in place.
///
/// `workers` threads race independent randomized fill attempts against the
/// board's given cells; everything else is treated as blank. The first
/// successful attempt wins and is copied back into `board`. Blocks until
/// every worker has exited, so no worker is still writing once this
/// returns.
///
/// The search has no deadline: a clue set admitting no completion makes it
/// spin until interrupted. On [`Error::Interrupted`] the input board is
/// left untouched.
pub fn solve(board: &mut Board, workers: usize) -> Result<(), Error> {
    if workers == 0 {
        return Err(Error::InvalidWorkerCount(workers));
    }

    // Workers search against the clue-only projection of the input.
    let mut clues = board.clone();
    for row in 0..clues.rows() {
        for col in 0..clues.cols() {
            if !clues.get(row, col).is_given() {
                clues.set(row, col, Cell::Empty);
            }
        }
    }

    let stop = Arc::new(AtomicBool::new(false));
    let trials = Arc::new(AtomicU64::new(0));
    let winner = Arc::new(Mutex::new(None::<Board>));

    let mut handles = Vec::with_capacity(workers);
    for id in 0..workers {
        let clues = clues.clone();
        let stop = Arc::clone(&stop);
        let trials = Arc::clone(&trials);
        let winner = Arc::clone(&winner);
        handles.push(thread::spawn(move || {
            run_worker(id, &clues, &stop, &trials, &winner);
        }));
    }

    // Wait for every worker, not just the winner. A panicked worker
    // cannot raise the stop flag itself, so raise it here before joining
    // the rest.
    let mut interrupted = false;
    for handle in handles {
        if handle.join().is_err() {
            stop.store(true, Ordering::Release);
            interrupted = true;
        }
    }
    if interrupted {
        return Err(Error::Interrupted);
    }

    let solved = winner
        .lock()
        .map_err(|_| Error::Interrupted)?
        .take()
        .ok_or(Error::Interrupted)?;
    *board = solved;
    Ok(())
}

fn run_worker(
    id: usize,
    clues: &Board,
    stop: &AtomicBool,
    trials: &AtomicU64,
    winner: &Mutex<Option<Board>>,
) {
    let mut rng = StdRng::from_rng(&mut rand::rng());
    let mut own_trials = 0u64;

    // The stop flag is only polled between attempts; a worker mid-attempt
    // finishes it before noticing that someone else already won.
    while !stop.load(Ordering::Acquire) {
        let mut attempt = clues.clone();
        own_trials += 1;
        let total = trials.fetch_add(1, Ordering::Relaxed) + 1;
        if total % TRIAL_LOG_INTERVAL == 0 {
            log::debug!("solver running, {total} trials so far");
        }

        if !generator::fill(&mut attempt, &mut rng) {
            continue;
        }

        // Publish and signal under the same lock so the flag is never
        // observed before the winning board is fully written.
        let Ok(mut slot) = winner.lock() else {
            return;
        };
        if slot.is_none() {
            *slot = Some(attempt);
            stop.store(true, Ordering::Release);
            log::info!("worker {id} found a completion after {own_trials} trials");
        }
        return;
    }
}
