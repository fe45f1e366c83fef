use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// One complete, backend-authoritative description of a match's draft state.
/// Each push message fully replaces the previous snapshot; nothing here is
/// ever patched incrementally.
#[derive(Debug, Default, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub struct MatchSnapshot {
    #[serde(default)]
    pub teams: HashMap<Side, TeamEntry>,
    #[serde(default)]
    pub flow: Vec<Step>,
    /// Index into `flow`; `flow.len()` means the draft sequence is exhausted.
    #[serde(default)]
    pub step: usize,
    /// Keyed by `mode::mapName`. An `IndexMap` so the backend's key order
    /// survives decoding and the grid renders in a stable order.
    #[serde(default)]
    pub maps: IndexMap<String, MapEntry>,
    #[serde(default)]
    pub map_results: BTreeMap<u32, MapResult>,
    /// Epoch seconds when the current turn's timer began.
    #[serde(default)]
    pub turn_started_at: Option<u64>,
    #[serde(default)]
    pub turn_duration: Option<u64>,
    #[serde(default)]
    pub series_finished: bool,
    #[serde(default)]
    pub series_winner: Option<Side>,
    #[serde(default)]
    pub series_score: Option<SeriesScore>,
    /// Optional monotonic sequence number; stale snapshots are dropped by
    /// the connection manager when it is present.
    #[serde(default)]
    pub seq: Option<u64>,
}

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Serialize, Deserialize)]
pub enum Side {
    A,
    B,
}

impl Side {
    pub fn other(self) -> Self {
        match self {
            Self::A => Self::B,
            Self::B => Self::A,
        }
    }

    /// Placeholder team name used when the snapshot carries no name.
    pub fn fallback_label(self) -> &'static str {
        match self {
            Self::A => "TEAM A",
            Self::B => "TEAM B",
        }
    }
}

impl core::fmt::Display for Side {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match *self {
            Self::A => write!(f, "A"),
            Self::B => write!(f, "B"),
        }
    }
}

#[derive(Debug, Default, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub struct TeamEntry {
    #[serde(default)]
    pub name: String,
}

/// One entry of the veto flow, in the draft's temporal order.
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub struct Step {
    #[serde(rename = "type")]
    pub kind: StepKind,
    #[serde(default)]
    pub team: Option<Side>,
    /// Map-pool identifier this step draws from.
    #[serde(default)]
    pub mode: String,
}

#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum StepKind {
    Ban,
    Pick,
    SidePick,
    /// The step-kind set is open on the wire. Kinds this build does not know
    /// about keep their raw text so they still render meaningfully.
    Other(String),
}

impl From<String> for StepKind {
    fn from(kind: String) -> Self {
        match kind.as_str() {
            "ban" => Self::Ban,
            "pick" => Self::Pick,
            // "side" is what older backends send for a side choice
            "side_pick" | "side" => Self::SidePick,
            _ => Self::Other(kind),
        }
    }
}

impl From<StepKind> for String {
    fn from(kind: StepKind) -> Self {
        match kind {
            StepKind::Ban => String::from("ban"),
            StepKind::Pick => String::from("pick"),
            StepKind::SidePick => String::from("side_pick"),
            StepKind::Other(raw) => raw,
        }
    }
}

impl StepKind {
    /// Display form of the kind: upper-cased with `_`/`-` word separators
    /// shown as spaces, for known and unrecognized kinds alike.
    pub fn label(&self) -> String {
        let raw = match self {
            Self::Ban => "ban",
            Self::Pick => "pick",
            Self::SidePick => "side_pick",
            Self::Other(raw) => raw.as_str(),
        };
        let label: String = raw
            .chars()
            .map(|c| match c {
                '_' | '-' => ' ',
                c => c.to_ascii_uppercase(),
            })
            .collect();
        if label.trim().is_empty() {
            String::from("STEP")
        } else {
            label
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub struct MapEntry {
    pub status: MapStatus,
    #[serde(default)]
    pub mode: String,
    #[serde(default)]
    pub team: Option<Side>,
    /// Starting condition chosen for a picked map (attack/defense); free-form
    /// on the wire, displayed verbatim.
    #[serde(default)]
    pub side: Option<String>,
    /// 1-based position within the played-map order; assigned on pick only.
    #[serde(default)]
    pub slot: Option<u32>,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MapStatus {
    Available,
    Banned,
    Picked,
}

#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub struct MapResult {
    pub winner: Side,
    #[serde(default)]
    pub score: String,
}

#[derive(Debug, Default, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
pub struct SeriesScore {
    #[serde(rename = "A")]
    pub a: u32,
    #[serde(rename = "B")]
    pub b: u32,
}

/// Extract the display name from a `mode::mapName` composite key. Keys
/// without a separator are returned whole.
pub fn map_name_of(key: &str) -> &str {
    key.split_once("::").map_or(key, |(_, name)| name)
}
