//! Derivation of the per-frame render state from a [`MatchSnapshot`].
//!
//! Everything here is a pure function of the snapshot; the renderer calls
//! these on every refresh and keeps nothing between calls.

use crate::snapshot::{MapEntry, MapResult, MatchSnapshot, MapStatus, Side, Step};

/// Which part of the match the overlay should be presenting.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Phase<'a> {
    /// The series is decided; the final panel takes precedence over the
    /// draft views regardless of the `step` pointer.
    SeriesOver { winner: Option<Side> },
    /// A ban/pick/side step is live.
    Turn(&'a Step),
    /// The flow is exhausted but the series is not concluded, e.g. a played
    /// map's result has not been entered yet.
    AwaitingResult,
    /// No flow at all; the draft has not been configured or started.
    Waiting,
}

impl MatchSnapshot {
    pub fn current_step(&self) -> Option<&Step> {
        self.flow.get(self.step)
    }

    pub fn phase(&self) -> Phase<'_> {
        if self.series_finished {
            Phase::SeriesOver {
                winner: self.series_winner,
            }
        } else if let Some(step) = self.current_step() {
            Phase::Turn(step)
        } else if self.flow.is_empty() {
            Phase::Waiting
        } else {
            Phase::AwaitingResult
        }
    }

    /// Banner text for the current phase. Never empty.
    pub fn phase_text(&self) -> String {
        match self.phase() {
            Phase::SeriesOver { winner: Some(side) } => {
                format!("{} WINS", self.team_label(side))
            }
            Phase::SeriesOver { winner: None } => String::from("SERIES OVER"),
            Phase::Turn(step) => match step.team {
                Some(side) => format!("{} · {}", step.kind.label(), self.team_label(side)),
                None => step.kind.label(),
            },
            Phase::AwaitingResult => String::from("AWAITING RESULT"),
            Phase::Waiting => String::from("WAITING FOR DRAFT"),
        }
    }

    /// The side whose turn it is, used for highlighting only.
    pub fn active_team(&self) -> Option<Side> {
        self.current_step().and_then(|step| step.team)
    }

    /// Map entries belonging to the current step's pool, in the backend's
    /// key order. Empty when no step is live.
    pub fn active_mode_entries(&self) -> Vec<(&str, &MapEntry)> {
        match self.current_step() {
            Some(step) => self
                .maps
                .iter()
                .filter(|(_, entry)| entry.mode == step.mode)
                .map(|(key, entry)| (key.as_str(), entry))
                .collect(),
            None => Vec::new(),
        }
    }

    /// Picked entries in slot order. Slots are unique among picks, so the
    /// order is total; a pick that somehow lacks a slot sorts last.
    pub fn picked_entries(&self) -> Vec<(&str, &MapEntry)> {
        let mut picked: Vec<_> = self
            .maps
            .iter()
            .filter(|(_, entry)| entry.status == MapStatus::Picked)
            .map(|(key, entry)| (key.as_str(), entry))
            .collect();
        picked.sort_by_key(|(_, entry)| (entry.slot.is_none(), entry.slot));
        picked
    }

    /// The recorded result for a slot, if one exists yet. Picks are shown
    /// before their result arrives, so `None` is the common case mid-match.
    pub fn result_for(&self, slot: u32) -> Option<&MapResult> {
        self.map_results.get(&slot)
    }

    /// Display name for a side, upper-cased, falling back to `TEAM A`/`TEAM B`
    /// when the snapshot has no usable name.
    pub fn team_label(&self, side: Side) -> String {
        match self.teams.get(&side) {
            Some(team) if !team.name.trim().is_empty() => team.name.trim().to_uppercase(),
            _ => side.fallback_label().to_string(),
        }
    }

    /// `"2 - 1"` style series score, or an empty string when absent.
    pub fn series_score_text(&self) -> String {
        self.series_score
            .map(|score| format!("{} - {}", score.a, score.b))
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::snapshot::{SeriesScore, StepKind, TeamEntry};

    fn named_teams() -> MatchSnapshot {
        let mut snapshot = MatchSnapshot::default();
        snapshot.teams.insert(
            Side::A,
            TeamEntry {
                name: "Sharks".to_string(),
            },
        );
        snapshot.teams.insert(
            Side::B,
            TeamEntry {
                name: "Rays".to_string(),
            },
        );
        snapshot
    }

    fn entry(status: MapStatus, mode: &str, slot: Option<u32>) -> MapEntry {
        MapEntry {
            status,
            mode: mode.to_string(),
            team: None,
            side: None,
            slot,
        }
    }

    #[test]
    fn test_ban_step_scenario() {
        let mut snapshot = MatchSnapshot::default();
        snapshot.flow.push(Step {
            kind: StepKind::Ban,
            team: Some(Side::A),
            mode: "bo3".to_string(),
        });
        snapshot.step = 0;
        snapshot
            .maps
            .insert("bo3::Ascent".to_string(), entry(MapStatus::Available, "bo3", None));

        assert_eq!(snapshot.phase_text(), "BAN · TEAM A");
        assert_eq!(snapshot.active_team(), Some(Side::A));
        let active = snapshot.active_mode_entries();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].0, "bo3::Ascent");
        assert_eq!(active[0].1.status, MapStatus::Available);
        assert!(snapshot.picked_entries().is_empty());
        assert!(!matches!(snapshot.phase(), Phase::SeriesOver { .. }));
    }

    #[test]
    fn test_named_team_in_phase_text() {
        let mut snapshot = named_teams();
        snapshot.flow.push(Step {
            kind: StepKind::SidePick,
            team: Some(Side::B),
            mode: "SnD".to_string(),
        });
        assert_eq!(snapshot.phase_text(), "SIDE PICK · RAYS");
    }

    #[test]
    fn test_unrecognized_step_renders_its_wire_text() {
        let mut snapshot = MatchSnapshot::default();
        snapshot.flow.push(Step {
            kind: StepKind::Other("coin_toss".to_string()),
            team: Some(Side::A),
            mode: "bo3".to_string(),
        });
        assert_eq!(snapshot.phase_text(), "COIN TOSS · TEAM A");
    }

    #[test]
    fn test_exhausted_flow_awaits_result() {
        let mut snapshot = MatchSnapshot::default();
        snapshot.flow.push(Step {
            kind: StepKind::Ban,
            team: Some(Side::A),
            mode: "bo3".to_string(),
        });
        snapshot.step = 1;

        assert_eq!(snapshot.phase(), Phase::AwaitingResult);
        assert_eq!(snapshot.phase_text(), "AWAITING RESULT");
        assert!(snapshot.active_mode_entries().is_empty());
        assert_eq!(snapshot.active_team(), None);
    }

    #[test]
    fn test_empty_flow_is_waiting() {
        let snapshot = MatchSnapshot::default();
        assert_eq!(snapshot.phase(), Phase::Waiting);
        assert_eq!(snapshot.phase_text(), "WAITING FOR DRAFT");
    }

    #[test]
    fn test_series_over_beats_step_pointer() {
        let mut snapshot = named_teams();
        snapshot.flow.push(Step {
            kind: StepKind::Pick,
            team: Some(Side::A),
            mode: "bo3".to_string(),
        });
        snapshot.step = 0;
        snapshot.series_finished = true;
        snapshot.series_winner = Some(Side::A);
        snapshot.series_score = Some(SeriesScore { a: 2, b: 1 });

        assert_eq!(snapshot.phase(), Phase::SeriesOver { winner: Some(Side::A) });
        assert_eq!(snapshot.phase_text(), "SHARKS WINS");
        assert_eq!(snapshot.series_score_text(), "2 - 1");
    }

    #[test]
    fn test_series_over_without_winner_degrades() {
        let mut snapshot = MatchSnapshot::default();
        snapshot.series_finished = true;
        assert_eq!(snapshot.phase_text(), "SERIES OVER");
        assert_eq!(snapshot.series_score_text(), "");
    }

    #[test]
    fn test_picked_entries_sorted_by_slot() {
        let mut snapshot = MatchSnapshot::default();
        snapshot
            .maps
            .insert("HP::Skyline".to_string(), entry(MapStatus::Picked, "HP", Some(3)));
        snapshot
            .maps
            .insert("HP::Vault".to_string(), entry(MapStatus::Banned, "HP", None));
        snapshot
            .maps
            .insert("SnD::Raid".to_string(), entry(MapStatus::Picked, "SnD", Some(1)));
        snapshot
            .maps
            .insert("HP::Den".to_string(), entry(MapStatus::Picked, "HP", Some(2)));

        let slots: Vec<Option<u32>> = snapshot
            .picked_entries()
            .iter()
            .map(|(_, entry)| entry.slot)
            .collect();
        assert_eq!(slots, [Some(1), Some(2), Some(3)]);
    }

    #[test]
    fn test_slotless_pick_sorts_last() {
        let mut snapshot = MatchSnapshot::default();
        snapshot
            .maps
            .insert("m::Stray".to_string(), entry(MapStatus::Picked, "m", None));
        snapshot
            .maps
            .insert("m::First".to_string(), entry(MapStatus::Picked, "m", Some(1)));

        let keys: Vec<&str> = snapshot.picked_entries().iter().map(|(key, _)| *key).collect();
        assert_eq!(keys, ["m::First", "m::Stray"]);
    }

    #[test]
    fn test_result_for_missing_slot() {
        let mut snapshot = MatchSnapshot::default();
        snapshot.map_results.insert(
            2,
            MapResult {
                winner: Side::B,
                score: "250-180".to_string(),
            },
        );
        assert!(snapshot.result_for(1).is_none());
        assert_eq!(snapshot.result_for(2).unwrap().winner, Side::B);
    }

    #[test]
    fn test_team_label_fallbacks() {
        let mut snapshot = MatchSnapshot::default();
        assert_eq!(snapshot.team_label(Side::A), "TEAM A");
        snapshot
            .teams
            .insert(Side::B, TeamEntry { name: "   ".to_string() });
        assert_eq!(snapshot.team_label(Side::B), "TEAM B");
        snapshot
            .teams
            .insert(Side::B, TeamEntry { name: "nightfall".to_string() });
        assert_eq!(snapshot.team_label(Side::B), "NIGHTFALL");
    }

    #[test]
    fn test_active_mode_filters_other_pools() {
        let mut snapshot = MatchSnapshot::default();
        snapshot.flow.push(Step {
            kind: StepKind::Ban,
            team: Some(Side::B),
            mode: "SnD".to_string(),
        });
        snapshot
            .maps
            .insert("HP::Skyline".to_string(), entry(MapStatus::Available, "HP", None));
        snapshot
            .maps
            .insert("SnD::Raid".to_string(), entry(MapStatus::Available, "SnD", None));

        let keys: Vec<&str> = snapshot
            .active_mode_entries()
            .iter()
            .map(|(key, _)| *key)
            .collect();
        assert_eq!(keys, ["SnD::Raid"]);
    }
}
