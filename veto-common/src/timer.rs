//! Turn-timer reconstruction from a server-supplied start timestamp.
//!
//! The backend sends when the turn began and how long it lasts; the overlay
//! samples the local wall clock every frame and derives how far along the
//! turn is. The local clock is trusted as-is: skew against the server shifts
//! the bar but clamping keeps it well-formed. No round-trip correction.

/// Seconds allotted for a turn when the snapshot does not say.
pub const DEFAULT_TURN_SECS: u64 = 30;

/// Fraction of the turn elapsed at `now_secs` (epoch seconds), clamped to
/// `[0, 1]`. A zero-length turn is already over.
pub fn turn_progress(started_at: u64, duration_secs: u64, now_secs: f64) -> f32 {
    if duration_secs == 0 {
        return 1.0;
    }
    let elapsed = now_secs - started_at as f64;
    (elapsed / duration_secs as f64).clamp(0.0, 1.0) as f32
}

/// Whole seconds left on the turn at `now_secs`, rounded up so the display
/// only shows `0` once the turn is actually over.
pub fn remaining_secs(started_at: u64, duration_secs: u64, now_secs: f64) -> u64 {
    let end = started_at as f64 + duration_secs as f64;
    let left = end - now_secs;
    if left <= 0.0 { 0 } else { left.ceil() as u64 }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_progress_clamped() {
        // sampled before the turn started (clock skew): clamped at 0
        assert_eq!(turn_progress(1_000, 30, 990.0), 0.0);
        // sampled long after it ended: clamped at 1
        assert_eq!(turn_progress(1_000, 30, 2_000.0), 1.0);
        assert_eq!(turn_progress(1_000, 30, 1_015.0), 0.5);
    }

    #[test]
    fn test_progress_monotone_in_now() {
        let mut last = 0.0f32;
        for tick in 0..100 {
            let now = 995.0 + tick as f64;
            let progress = turn_progress(1_000, 30, now);
            assert!(progress >= last, "progress regressed at tick {tick}");
            assert!((0.0..=1.0).contains(&progress));
            last = progress;
        }
        assert_eq!(last, 1.0);
    }

    #[test]
    fn test_zero_duration_is_over() {
        assert_eq!(turn_progress(1_000, 0, 1_000.0), 1.0);
        assert_eq!(remaining_secs(1_000, 0, 1_000.0), 0);
    }

    #[test]
    fn test_remaining_rounds_up() {
        assert_eq!(remaining_secs(1_000, 30, 1_000.0), 30);
        assert_eq!(remaining_secs(1_000, 30, 1_000.2), 30);
        assert_eq!(remaining_secs(1_000, 30, 1_029.5), 1);
        assert_eq!(remaining_secs(1_000, 30, 1_030.0), 0);
        assert_eq!(remaining_secs(1_000, 30, 1_100.0), 0);
    }
}
