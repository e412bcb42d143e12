//! Simulated upload progress.
//!
//! Real transport belongs to the host; the widget only animates progress so the user sees files
//! move from queued to uploaded. Each in-flight file gets its own interval task that feeds
//! [`advance`] with a random increment.

use std::time::Duration;

use rand::Rng;

/// Interval between progress ticks.
pub const PROGRESS_TICK: Duration = Duration::from_millis(200);
/// Largest per-tick increment in percentage points.
pub const MAX_TICK_INCREMENT: u8 = 25;
/// Terminal progress value.
pub const PROGRESS_COMPLETE: u8 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Outcome of one progress tick.
pub enum ProgressStep {
    /// Progress moved but the file is still in flight.
    Advanced(u8),
    /// Progress reached [`PROGRESS_COMPLETE`].
    Completed,
}

/// Applies one tick. Values at or past 100 complete the upload.
pub fn advance(current: u8, increment: u8) -> ProgressStep {
    let next = current.saturating_add(increment);
    if next >= PROGRESS_COMPLETE {
        ProgressStep::Completed
    } else {
        ProgressStep::Advanced(next)
    }
}

/// Draws a uniform increment in `1..=MAX_TICK_INCREMENT`.
///
/// The floor of 1 bounds a simulated upload to at most 100 ticks.
pub fn random_increment<R: Rng + ?Sized>(rng: &mut R) -> u8 {
    rng.gen_range(1..=MAX_TICK_INCREMENT)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    #[test]
    fn advance_clamps_to_completion() {
        assert_eq!(advance(0, 25), ProgressStep::Advanced(25));
        assert_eq!(advance(80, 19), ProgressStep::Advanced(99));
        assert_eq!(advance(80, 20), ProgressStep::Completed);
        assert_eq!(advance(99, 25), ProgressStep::Completed);
        assert_eq!(advance(250, 25), ProgressStep::Completed);
    }

    #[test]
    fn random_walk_is_monotonic_and_bounded() {
        for seed in 0..64 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut progress = 0u8;
            let mut ticks = 0u32;
            loop {
                ticks += 1;
                let increment = random_increment(&mut rng);
                assert!((1..=MAX_TICK_INCREMENT).contains(&increment));
                match advance(progress, increment) {
                    ProgressStep::Advanced(next) => {
                        assert!(next > progress);
                        progress = next;
                    }
                    ProgressStep::Completed => break,
                }
                assert!(ticks <= u32::from(PROGRESS_COMPLETE), "seed {seed} never completed");
            }
            assert!(ticks >= 4, "seed {seed} completed in {ticks} ticks");
        }
    }
}
