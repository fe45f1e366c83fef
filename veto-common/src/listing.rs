//! Wire types and client for the pull-based match list.
//!
//! The list view does not touch the per-match push channel at all; it polls
//! `GET /api/matches` and replaces its table wholesale on every response.

use crate::snapshot::MapResult;
use log::debug;
use reqwest::{Client, ClientBuilder};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

/// One row of the match list as the backend reports it.
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub struct MatchSummary {
    /// Pre-formatted pairing, e.g. `"Sharks vs Rays"`.
    pub teams: String,
    #[serde(default)]
    pub mode: Option<String>,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub results: BTreeMap<u32, MapResult>,
}

impl MatchSummary {
    /// Per-map result lines in slot order, `M<slot>: <score> (<winner>)`,
    /// or a dash when nothing has been played yet.
    pub fn results_lines(&self) -> String {
        if self.results.is_empty() {
            return String::from("—");
        }
        self.results
            .iter()
            .map(|(slot, result)| format!("M{slot}: {} ({})", result.score, result.winner))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

pub struct MatchListClient {
    base_url: String,
    client: Client,
}

impl MatchListClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = ClientBuilder::new().timeout(timeout).build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub async fn fetch_matches(&self) -> Result<Vec<MatchSummary>, reqwest::Error> {
        let url = format!("{}/api/matches", self.base_url);
        debug!("Requesting match list from {url}");
        self.client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::snapshot::Side;

    #[test]
    fn test_decode_list() {
        let list: Vec<MatchSummary> = serde_json::from_str(
            r#"[
                {"teams": "Sharks vs Rays", "mode": "bo3", "status": "in progress",
                 "results": {"1": {"winner": "A", "score": "250-198"}}},
                {"teams": "Owls vs Crows", "status": "waiting"}
            ]"#,
        )
        .unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].results[&1].winner, Side::A);
        assert_eq!(list[1].mode, None);
        assert!(list[1].results.is_empty());
    }

    #[test]
    fn test_results_lines_in_slot_order() {
        let summary: MatchSummary = serde_json::from_str(
            r#"{"teams": "Sharks vs Rays", "status": "finished",
                "results": {
                    "2": {"winner": "B", "score": "6-4"},
                    "1": {"winner": "A", "score": "250-198"},
                    "3": {"winner": "A", "score": "3-1"}
                }}"#,
        )
        .unwrap();
        assert_eq!(
            summary.results_lines(),
            "M1: 250-198 (A)\nM2: 6-4 (B)\nM3: 3-1 (A)"
        );
    }

    #[test]
    fn test_results_lines_empty() {
        let summary = MatchSummary {
            teams: String::from("Sharks vs Rays"),
            mode: None,
            status: String::from("waiting"),
            results: BTreeMap::new(),
        };
        assert_eq!(summary.results_lines(), "—");
    }
}
