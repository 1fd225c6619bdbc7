//! Leaderboard standings
//!
//! Keeps the latest leaderboard sorted by steps and guards against an older refresh
//! landing after a newer one.

use serde::{Deserialize, Serialize};

use crate::endpoint::lenient_count;

/// How many entries the podium shows
pub const PODIUM_SIZE: usize = 3;

/// Seconds between periodic leaderboard refreshes
pub const REFRESH_INTERVAL_SECS: u64 = 30;

/// One participant's cumulative totals
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub user_name: String,
    #[serde(default, deserialize_with = "lenient_count")]
    pub total_steps: u64,
    #[serde(default, deserialize_with = "lenient_count")]
    pub total_calories: u64,
}

/// Sequence number of one leaderboard refresh
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RefreshTicket(u64);

/// Current leaderboard plus refresh bookkeeping
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Standings {
    entries: Vec<LeaderboardEntry>,
    issued: u64,
    applied: u64,
}

impl Standings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a refresh cycle
    pub fn begin_refresh(&mut self) -> RefreshTicket {
        self.issued += 1;
        RefreshTicket(self.issued)
    }

    /// Apply a refresh response.
    ///
    /// Responses older than the last applied one are dropped. Returns whether the
    /// entries were replaced.
    pub fn apply(&mut self, ticket: RefreshTicket, mut entries: Vec<LeaderboardEntry>) -> bool {
        if ticket.0 <= self.applied {
            tracing::debug!(
                ticket = ticket.0,
                applied = self.applied,
                "Discarding stale leaderboard response"
            );
            return false;
        }

        // Endpoint sorts already; a stable sort keeps its tie order
        entries.sort_by(|a, b| b.total_steps.cmp(&a.total_steps));
        self.entries = entries;
        self.applied = ticket.0;
        true
    }

    /// Full list, descending by steps
    pub fn entries(&self) -> &[LeaderboardEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Top entries shown on the board
    pub fn podium(&self) -> &[LeaderboardEntry] {
        &self.entries[..self.entries.len().min(PODIUM_SIZE)]
    }

    /// 1-based position of a participant in the full list
    pub fn rank_of(&self, user_name: &str) -> Option<usize> {
        if user_name.is_empty() {
            return None;
        }
        self.entries
            .iter()
            .position(|e| e.user_name == user_name)
            .map(|idx| idx + 1)
    }

    pub fn entry_for(&self, user_name: &str) -> Option<&LeaderboardEntry> {
        self.entries.iter().find(|e| e.user_name == user_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refresh_interval_is_thirty_seconds() {
        assert_eq!(REFRESH_INTERVAL_SECS, 30);
    }

    fn entry(name: &str, steps: u64) -> LeaderboardEntry {
        LeaderboardEntry {
            user_name: name.to_string(),
            total_steps: steps,
            total_calories: steps * 4 / 100,
        }
    }

    #[test]
    fn test_apply_sorts_descending() {
        let mut standings = Standings::new();
        let ticket = standings.begin_refresh();
        assert!(standings.apply(
            ticket,
            vec![entry("Ana", 100), entry("Luis", 900), entry("Eva", 500), entry("Max", 50)],
        ));

        let names: Vec<_> = standings.entries().iter().map(|e| e.user_name.as_str()).collect();
        assert_eq!(names, vec!["Luis", "Eva", "Ana", "Max"]);

        let podium = standings.podium();
        assert_eq!(podium.len(), 3);
        assert!(podium.windows(2).all(|w| w[0].total_steps > w[1].total_steps));
    }

    #[test]
    fn test_rank_uses_full_list() {
        let mut standings = Standings::new();
        let ticket = standings.begin_refresh();
        standings.apply(
            ticket,
            vec![entry("Ana", 400), entry("Luis", 300), entry("Eva", 200), entry("Max", 100)],
        );

        assert_eq!(standings.rank_of("Ana"), Some(1));
        assert_eq!(standings.rank_of("Max"), Some(4));
        assert_eq!(standings.rank_of("Nadie"), None);
        assert_eq!(standings.rank_of(""), None);
    }

    #[test]
    fn test_stale_response_is_discarded() {
        let mut standings = Standings::new();
        let older = standings.begin_refresh();
        let newer = standings.begin_refresh();

        assert!(standings.apply(newer, vec![entry("Ana", 800)]));
        assert!(!standings.apply(older, vec![entry("Ana", 100)]));
        assert_eq!(standings.entries()[0].total_steps, 800);
    }

    #[test]
    fn test_in_order_responses_both_apply() {
        let mut standings = Standings::new();
        let older = standings.begin_refresh();
        let newer = standings.begin_refresh();

        assert!(standings.apply(older, vec![entry("Ana", 100)]));
        assert!(standings.apply(newer, vec![entry("Ana", 800)]));
        assert_eq!(standings.entries()[0].total_steps, 800);
    }

    #[test]
    fn test_empty_board() {
        let mut standings = Standings::new();
        let ticket = standings.begin_refresh();
        standings.apply(ticket, Vec::new());
        assert!(standings.is_empty());
        assert!(standings.podium().is_empty());
    }

    #[test]
    fn test_deserialize_wire_entry() {
        let json = r#"[{"userName":"Ana","totalSteps":5000,"totalCalories":200.0},
                       {"userName":"Eva","totalSteps":"120"}]"#;
        let entries: Vec<LeaderboardEntry> = serde_json::from_str(json).unwrap();
        assert_eq!(entries[0], entry("Ana", 5000));
        assert_eq!(entries[1].total_steps, 120);
        assert_eq!(entries[1].total_calories, 0);
    }
}
