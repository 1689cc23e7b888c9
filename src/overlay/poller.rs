use crate::models::CongestionMap;
#[allow(unused_imports)]
use crate::logging::log;
use chrono::{DateTime, Utc};
use indexmap::IndexSet;

/// A request the caller should send to the congestion endpoint.
///
/// The ticket carries the generation it was issued under; its response is
/// only applied if no newer ticket has been issued since.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollTicket {
    generation: u64,
    pub station_ids: Vec<String>,
    pub token: String,
}

impl PollTicket {
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome {
    /// The response replaced the congestion map (number of entries)
    Applied(usize),
    /// A newer poll was issued, or the overlay was torn down
    Superseded,
    /// The request failed; the previous map is kept
    Failed(String),
}

/// Tracks congestion polls for the visible station set.
///
/// Polls are ordered by generation, not by arrival: each `issue` advances the
/// generation, and `complete` discards any result whose ticket is not from
/// the latest generation.
#[derive(Debug, Default)]
pub struct CongestionPoller {
    generation: u64,
    levels: CongestionMap,
    updated_at: Option<DateTime<Utc>>,
    disposed: bool,
}

impl CongestionPoller {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a poll for the given identifiers.
    ///
    /// Returns `None` when there is no credential or no identifiers; the
    /// generation still advances so that any in-flight poll for the previous
    /// inputs is discarded on arrival.
    pub fn issue(&mut self, station_ids: &[String], token: Option<&str>) -> Option<PollTicket> {
        if self.disposed {
            return None;
        }
        self.generation += 1;

        let token = token.map(str::trim).filter(|t| !t.is_empty())?;
        let unique: IndexSet<&String> = station_ids.iter().collect();
        if unique.is_empty() {
            return None;
        }

        log!("Congestion poll #{} for {} stations", self.generation, unique.len());

        Some(PollTicket {
            generation: self.generation,
            station_ids: unique.into_iter().cloned().collect(),
            token: token.to_string(),
        })
    }

    /// Apply the result of a poll, if it is still the latest one
    pub fn complete(&mut self, ticket: &PollTicket, result: Result<CongestionMap, String>) -> PollOutcome {
        if self.disposed || ticket.generation != self.generation {
            log!("Discarding congestion poll #{} (current #{})", ticket.generation, self.generation);
            return PollOutcome::Superseded;
        }

        match result {
            Ok(levels) => {
                let count = levels.len();
                self.levels = levels;
                self.updated_at = Some(Utc::now());
                PollOutcome::Applied(count)
            }
            Err(e) => {
                leptos::logging::error!("Failed to fetch congestion levels: {}", e);
                PollOutcome::Failed(e)
            }
        }
    }

    /// Tear down: every outstanding and future poll is discarded
    pub fn cancel(&mut self) {
        self.generation += 1;
        self.disposed = true;
        self.levels.clear();
    }

    #[must_use]
    pub fn levels(&self) -> &CongestionMap {
        &self.levels
    }

    #[must_use]
    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CongestionLevel;

    fn ids(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| (*v).to_string()).collect()
    }

    fn levels(entries: &[(&str, CongestionLevel)]) -> CongestionMap {
        entries.iter().map(|(id, l)| ((*id).to_string(), *l)).collect()
    }

    #[test]
    fn test_no_credential_is_noop() {
        let mut poller = CongestionPoller::new();
        let ticket = poller.issue(&ids(&["s1"]), Some("tok")).unwrap();
        poller.complete(&ticket, Ok(levels(&[("s1", CongestionLevel::High)])));

        assert!(poller.issue(&ids(&["s1", "s2"]), None).is_none());
        assert!(poller.issue(&ids(&["s1", "s2"]), Some("  ")).is_none());
        assert_eq!(poller.levels()["s1"], CongestionLevel::High);
    }

    #[test]
    fn test_empty_ids_is_noop() {
        let mut poller = CongestionPoller::new();
        assert!(poller.issue(&[], Some("tok")).is_none());
        assert!(poller.levels().is_empty());
    }

    #[test]
    fn test_duplicates_are_tolerated() {
        let mut poller = CongestionPoller::new();
        let ticket = poller.issue(&ids(&["s2", "s1", "s2"]), Some("tok")).unwrap();
        assert_eq!(ticket.station_ids, ids(&["s2", "s1"]));
        assert_eq!(ticket.token, "tok");
    }

    #[test]
    fn test_success_replaces_map_wholesale() {
        let mut poller = CongestionPoller::new();
        let first = poller.issue(&ids(&["s1", "s2"]), Some("tok")).unwrap();
        poller.complete(
            &first,
            Ok(levels(&[("s1", CongestionLevel::Low), ("s2", CongestionLevel::High)])),
        );

        let second = poller.issue(&ids(&["s1", "s2"]), Some("tok")).unwrap();
        let outcome = poller.complete(&second, Ok(levels(&[("s1", CongestionLevel::Medium)])));

        assert_eq!(outcome, PollOutcome::Applied(1));
        assert_eq!(poller.levels().len(), 1);
        assert!(!poller.levels().contains_key("s2"));
        assert!(poller.updated_at().is_some());
    }

    #[test]
    fn test_failure_keeps_previous_map() {
        let mut poller = CongestionPoller::new();
        let first = poller.issue(&ids(&["s1"]), Some("tok")).unwrap();
        poller.complete(&first, Ok(levels(&[("s1", CongestionLevel::Low)])));
        let updated = poller.updated_at();

        let second = poller.issue(&ids(&["s1"]), Some("tok")).unwrap();
        let outcome = poller.complete(&second, Err("HTTP error! status: 500".to_string()));

        assert!(matches!(outcome, PollOutcome::Failed(_)));
        assert_eq!(poller.levels()["s1"], CongestionLevel::Low);
        assert_eq!(poller.updated_at(), updated);
    }

    #[test]
    fn test_stale_response_discarded_in_every_order() {
        let a_result = levels(&[("s1", CongestionLevel::High), ("s2", CongestionLevel::High)]);
        let b_result = levels(&[
            ("s1", CongestionLevel::Low),
            ("s2", CongestionLevel::Medium),
            ("s3", CongestionLevel::Low),
        ]);

        for a_first in [true, false] {
            let mut poller = CongestionPoller::new();
            let a = poller.issue(&ids(&["s1", "s2"]), Some("tok")).unwrap();
            let b = poller.issue(&ids(&["s1", "s2", "s3"]), Some("tok")).unwrap();

            if a_first {
                assert_eq!(poller.complete(&a, Ok(a_result.clone())), PollOutcome::Superseded);
                assert_eq!(poller.complete(&b, Ok(b_result.clone())), PollOutcome::Applied(3));
            } else {
                assert_eq!(poller.complete(&b, Ok(b_result.clone())), PollOutcome::Applied(3));
                assert_eq!(poller.complete(&a, Ok(a_result.clone())), PollOutcome::Superseded);
            }

            assert_eq!(poller.levels(), &b_result);
        }
    }

    #[test]
    fn test_stale_failure_is_not_reported() {
        let mut poller = CongestionPoller::new();
        let a = poller.issue(&ids(&["s1"]), Some("tok")).unwrap();
        let _b = poller.issue(&ids(&["s1"]), Some("other")).unwrap();
        assert_eq!(poller.complete(&a, Err("boom".to_string())), PollOutcome::Superseded);
    }

    #[test]
    fn test_withdrawn_credential_discards_in_flight_poll() {
        let mut poller = CongestionPoller::new();
        let a = poller.issue(&ids(&["s1"]), Some("tok")).unwrap();
        assert!(poller.issue(&ids(&["s1"]), None).is_none());

        let outcome = poller.complete(&a, Ok(levels(&[("s1", CongestionLevel::High)])));
        assert_eq!(outcome, PollOutcome::Superseded);
        assert!(poller.levels().is_empty());
    }

    #[test]
    fn test_cancel_discards_everything() {
        let mut poller = CongestionPoller::new();
        let a = poller.issue(&ids(&["s1"]), Some("tok")).unwrap();
        poller.cancel();

        assert!(poller.is_disposed());
        assert_eq!(
            poller.complete(&a, Ok(levels(&[("s1", CongestionLevel::High)]))),
            PollOutcome::Superseded
        );
        assert!(poller.issue(&ids(&["s1"]), Some("tok")).is_none());
        assert!(poller.levels().is_empty());
    }

    #[test]
    fn test_generation_increases() {
        let mut poller = CongestionPoller::new();
        let a = poller.issue(&ids(&["s1"]), Some("tok")).unwrap();
        let b = poller.issue(&ids(&["s1"]), Some("tok")).unwrap();
        assert!(b.generation() > a.generation());
        assert_eq!(poller.generation(), b.generation());
    }
}
