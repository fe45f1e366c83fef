use veto_common::snapshot::{MatchSnapshot, Side};
use veto_common::timer::{DEFAULT_TURN_SECS, remaining_secs, turn_progress};

/// Current wall clock as fractional epoch seconds, the `now` fed to the
/// timer math each frame.
pub fn wall_clock_secs() -> f64 {
    time::OffsetDateTime::now_utc().unix_timestamp_nanos() as f64 / 1e9
}

/// The single owner of turn-timer state. Lives inside the renderer context
/// (not at process scope) so two overlay instances never share a timer.
///
/// `observe` is called once per applied snapshot; the render loop then
/// samples `progress`/`remaining` every frame. A snapshot repeating the same
/// `turn_started_at` leaves the armed turn untouched, so redundant pushes
/// never restart the countdown.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TurnClock {
    turn: Option<ActiveTurn>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ActiveTurn {
    started_at: u64,
    duration: u64,
    side: Option<Side>,
}

impl TurnClock {
    pub fn observe(&mut self, snapshot: &MatchSnapshot) {
        if snapshot.series_finished {
            self.turn = None;
            return;
        }
        let armed = snapshot.turn_started_at.map(|started_at| ActiveTurn {
            started_at,
            duration: snapshot.turn_duration.unwrap_or(DEFAULT_TURN_SECS),
            side: snapshot.active_team(),
        });
        self.turn = match (self.turn, armed) {
            // Same turn still running; only the highlight side may move.
            (Some(current), Some(new)) if current.started_at == new.started_at => {
                Some(ActiveTurn {
                    side: new.side,
                    ..current
                })
            }
            // Arming a new turn replaces (cancels) the previous one.
            (_, armed) => armed,
        };
    }

    pub fn is_armed(&self) -> bool {
        self.turn.is_some()
    }

    pub fn side(&self) -> Option<Side> {
        self.turn.and_then(|turn| turn.side)
    }

    pub fn progress(&self, now_secs: f64) -> Option<f32> {
        self.turn
            .map(|turn| turn_progress(turn.started_at, turn.duration, now_secs))
    }

    pub fn remaining(&self, now_secs: f64) -> Option<u64> {
        self.turn
            .map(|turn| remaining_secs(turn.started_at, turn.duration, now_secs))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn snapshot_with_turn(started_at: u64, duration: Option<u64>) -> MatchSnapshot {
        MatchSnapshot {
            turn_started_at: Some(started_at),
            turn_duration: duration,
            ..Default::default()
        }
    }

    #[test]
    fn test_arm_and_sample() {
        let mut clock = TurnClock::default();
        clock.observe(&snapshot_with_turn(1_000, Some(20)));
        assert!(clock.is_armed());
        assert_eq!(clock.progress(1_010.0), Some(0.5));
        assert_eq!(clock.remaining(1_010.0), Some(10));
    }

    #[test]
    fn test_default_duration() {
        let mut clock = TurnClock::default();
        clock.observe(&snapshot_with_turn(1_000, None));
        assert_eq!(clock.remaining(1_000.0), Some(DEFAULT_TURN_SECS));
    }

    #[test]
    fn test_same_start_is_idempotent() {
        let mut clock = TurnClock::default();
        clock.observe(&snapshot_with_turn(1_000, Some(30)));
        let armed = clock;
        // same turn pushed again (even with a nonsense duration change)
        clock.observe(&snapshot_with_turn(1_000, Some(99)));
        assert_eq!(clock, armed);
    }

    #[test]
    fn test_new_start_rearms() {
        let mut clock = TurnClock::default();
        clock.observe(&snapshot_with_turn(1_000, Some(30)));
        clock.observe(&snapshot_with_turn(1_030, Some(30)));
        assert_eq!(clock.progress(1_030.0), Some(0.0));
        assert_eq!(clock.remaining(1_030.0), Some(30));
    }

    #[test]
    fn test_side_switch_moves_highlight() {
        use veto_common::snapshot::{Step, StepKind};

        let mut snapshot = snapshot_with_turn(1_000, Some(30));
        snapshot.flow = vec![
            Step {
                kind: StepKind::Ban,
                team: Some(Side::A),
                mode: "bo3".to_string(),
            },
            Step {
                kind: StepKind::Ban,
                team: Some(Side::B),
                mode: "bo3".to_string(),
            },
        ];
        snapshot.step = 0;

        let mut clock = TurnClock::default();
        clock.observe(&snapshot);
        assert_eq!(clock.side(), Some(Side::A));

        // B's turn begins: A must lose the active indicator
        snapshot.step = 1;
        snapshot.turn_started_at = Some(1_030);
        clock.observe(&snapshot);
        assert_eq!(clock.side(), Some(Side::B));
    }

    #[test]
    fn test_finished_series_disarms() {
        let mut clock = TurnClock::default();
        clock.observe(&snapshot_with_turn(1_000, Some(30)));
        let mut snapshot = snapshot_with_turn(1_000, Some(30));
        snapshot.series_finished = true;
        clock.observe(&snapshot);
        assert!(!clock.is_armed());
        assert_eq!(clock.progress(1_010.0), None);
    }

    #[test]
    fn test_missing_timestamp_disarms() {
        let mut clock = TurnClock::default();
        clock.observe(&snapshot_with_turn(1_000, Some(30)));
        clock.observe(&MatchSnapshot::default());
        assert!(!clock.is_armed());
    }
}
