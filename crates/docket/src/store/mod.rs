//! Storage contracts for active events and archived decisions.
//!
//! Both stores are capability interfaces: the workflow composes against
//! [`EventStore`] and [`DecisionArchive`] trait objects, and a concrete
//! backend is injected at composition time. [`MemoryEventStore`] and
//! [`MemoryDecisionArchive`] are the in-process reference backends, with
//! JSON snapshot persistence in the same module.

mod memory;
mod persistence;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::Result;
use crate::event::{QAEvent, TopicKey};
use crate::patch::PatchOperation;

pub use memory::{MemoryDecisionArchive, MemoryEventStore};

/// The active-events index.
///
/// Implementations are shared across requests and must be safe for
/// concurrent use; a removal must be visible to every lookup that starts
/// after `remove` returns.
pub trait EventStore: Send + Sync {
    /// Look up a single active event by id.
    fn find_by_id(&self, event_id: &str) -> Result<Option<QAEvent>>;

    /// Return one page of the events under a topic key.
    ///
    /// Events match on source and topic, and on target when the key carries
    /// one. Pages are ordered by trust descending with detection order as
    /// the tie-break, so windows are deterministic across calls. A window
    /// past the end is empty, never an error.
    fn find_by_topic(&self, key: &TopicKey, offset: usize, limit: usize) -> Result<Vec<QAEvent>>;

    /// Count every event under a topic key, independent of any window.
    fn count_by_topic(&self, key: &TopicKey) -> Result<usize>;

    /// Land a freshly detected event in the active index.
    fn insert(&self, event: QAEvent) -> Result<()>;

    /// Remove an event; returns whether anything was removed.
    ///
    /// Removing an absent id is not an error at this layer. The workflow
    /// decides whether absence is a `NotFound` at its own boundary.
    fn remove(&self, event_id: &str) -> Result<bool>;

    /// Apply correction operations to an event's payload in place.
    ///
    /// Structural validation is delegated to the injected patch applier.
    /// The event keeps its id; only the payload is replaced. Fails with
    /// `NotFound` for an absent id and `InvalidPatch` when the applier
    /// refuses, leaving the stored event untouched in both cases.
    fn apply_correction(&self, event_id: &str, operations: &[PatchOperation]) -> Result<QAEvent>;
}

/// Append-only archive of terminal decisions.
pub trait DecisionArchive: Send + Sync {
    /// Append a decision record.
    ///
    /// Never updates or removes a prior record: a re-detected event id
    /// rejected again produces a second, distinct entry keyed by
    /// `(event_id, decided_at)`.
    fn record(&self, record: DecisionRecord) -> Result<()>;

    /// All records for an event id, oldest first.
    fn records_for(&self, event_id: &str) -> Result<Vec<DecisionRecord>>;
}

/// Durable record of one rejection decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionRecord {
    /// Id of the rejected event.
    pub event_id: String,

    /// The catalogued item the event concerned.
    pub target: Uuid,

    /// Who made the decision (e.g., "reviewer@example.org").
    pub decided_by: String,

    /// When the decision was made.
    pub decided_at: DateTime<Utc>,
}

impl DecisionRecord {
    /// Create a record timestamped now.
    pub fn new(event_id: impl Into<String>, target: Uuid, decided_by: impl Into<String>) -> Self {
        Self {
            event_id: event_id.into(),
            target,
            decided_by: decided_by.into(),
            decided_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_decision_record() {
        let target = Uuid::new_v4();
        let record = DecisionRecord::new("ev-001", target, "reviewer@example.org");

        assert_eq!(record.event_id, "ev-001");
        assert_eq!(record.target, target);
        assert_eq!(record.decided_by, "reviewer@example.org");
    }

    #[test]
    fn test_record_serialization() {
        let record = DecisionRecord::new("ev-002", Uuid::new_v4(), "curator");
        let json = serde_json::to_string(&record).unwrap();
        let parsed: DecisionRecord = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed, record);
    }
}
