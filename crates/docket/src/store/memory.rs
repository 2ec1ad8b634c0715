//! In-process reference backends for the event store and decision archive.

use std::sync::{Arc, RwLock};

use indexmap::IndexMap;
use tracing::debug;

use crate::error::{DocketError, Result};
use crate::event::{QAEvent, TopicKey};
use crate::patch::{JsonPatchApplier, PatchApplier, PatchOperation};

use super::{DecisionArchive, DecisionRecord, EventStore};

/// An active event plus the detection sequence number used as tie-break.
#[derive(Debug, Clone)]
struct StoredEvent {
    event: QAEvent,
    seq: u64,
}

#[derive(Debug, Default)]
struct StoreInner {
    events: IndexMap<String, StoredEvent>,
    next_seq: u64,
}

/// In-memory [`EventStore`] backed by an insertion-ordered index.
///
/// Each operation takes the lock once, so reads are snapshot-consistent
/// individually; `find_by_topic` and `count_by_topic` are separate calls
/// and may drift if a removal lands between them.
pub struct MemoryEventStore {
    inner: RwLock<StoreInner>,
    applier: Arc<dyn PatchApplier>,
}

impl std::fmt::Debug for MemoryEventStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryEventStore")
            .field("inner", &self.inner)
            .finish_non_exhaustive()
    }
}

impl MemoryEventStore {
    /// Create an empty store with the JSON reference applier.
    pub fn new() -> Self {
        Self::with_applier(JsonPatchApplier::new())
    }

    /// Create an empty store with a custom patch applier.
    pub fn with_applier(applier: impl PatchApplier + 'static) -> Self {
        Self {
            inner: RwLock::new(StoreInner::default()),
            applier: Arc::new(applier),
        }
    }

    /// Every active event in detection order. Used by snapshots and tests.
    pub fn all_events(&self) -> Result<Vec<QAEvent>> {
        let inner = self.read()?;
        Ok(inner.events.values().map(|s| s.event.clone()).collect())
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, StoreInner>> {
        self.inner
            .read()
            .map_err(|_| DocketError::Store("event store lock poisoned".to_string()))
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, StoreInner>> {
        self.inner
            .write()
            .map_err(|_| DocketError::Store("event store lock poisoned".to_string()))
    }
}

impl Default for MemoryEventStore {
    fn default() -> Self {
        Self::new()
    }
}

impl EventStore for MemoryEventStore {
    fn find_by_id(&self, event_id: &str) -> Result<Option<QAEvent>> {
        let inner = self.read()?;
        Ok(inner.events.get(event_id).map(|s| s.event.clone()))
    }

    fn find_by_topic(&self, key: &TopicKey, offset: usize, limit: usize) -> Result<Vec<QAEvent>> {
        let inner = self.read()?;

        let mut matches: Vec<&StoredEvent> = inner
            .events
            .values()
            .filter(|s| key.matches(&s.event))
            .collect();

        // Trust descending; detection sequence breaks ties so pagination
        // windows never overlap or skip.
        matches.sort_by(|a, b| {
            b.event
                .trust
                .total_cmp(&a.event.trust)
                .then_with(|| a.seq.cmp(&b.seq))
        });

        Ok(matches
            .into_iter()
            .skip(offset)
            .take(limit)
            .map(|s| s.event.clone())
            .collect())
    }

    fn count_by_topic(&self, key: &TopicKey) -> Result<usize> {
        let inner = self.read()?;
        Ok(inner.events.values().filter(|s| key.matches(&s.event)).count())
    }

    fn insert(&self, event: QAEvent) -> Result<()> {
        let mut inner = self.write()?;
        let seq = inner.next_seq;
        inner.next_seq += 1;
        debug!(event_id = %event.event_id, seq, "event landed in active store");
        inner.events.insert(event.event_id.clone(), StoredEvent { event, seq });
        Ok(())
    }

    fn remove(&self, event_id: &str) -> Result<bool> {
        let mut inner = self.write()?;
        let removed = inner.events.shift_remove(event_id).is_some();
        if removed {
            debug!(event_id, "event removed from active store");
        }
        Ok(removed)
    }

    fn apply_correction(&self, event_id: &str, operations: &[PatchOperation]) -> Result<QAEvent> {
        let mut inner = self.write()?;

        let stored = inner
            .events
            .get_mut(event_id)
            .ok_or_else(|| DocketError::NotFound(event_id.to_string()))?;

        // Apply against a copy first; the stored payload changes only once
        // the whole operation list succeeds.
        let patched = self.applier.apply(&stored.event.payload, operations)?;
        stored.event.payload = patched;

        debug!(event_id, ops = operations.len(), "correction applied");
        Ok(stored.event.clone())
    }
}

/// In-memory append-only [`DecisionArchive`].
#[derive(Debug, Default)]
pub struct MemoryDecisionArchive {
    records: RwLock<Vec<DecisionRecord>>,
}

impl MemoryDecisionArchive {
    /// Create an empty archive.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every record in append order. Used by snapshots and tests.
    pub fn all_records(&self) -> Result<Vec<DecisionRecord>> {
        let records = self.read()?;
        Ok(records.clone())
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, Vec<DecisionRecord>>> {
        self.records
            .read()
            .map_err(|_| DocketError::Store("decision archive lock poisoned".to_string()))
    }
}

impl DecisionArchive for MemoryDecisionArchive {
    fn record(&self, record: DecisionRecord) -> Result<()> {
        let mut records = self
            .records
            .write()
            .map_err(|_| DocketError::Store("decision archive lock poisoned".to_string()))?;
        debug!(event_id = %record.event_id, decided_by = %record.decided_by, "decision archived");
        records.push(record);
        Ok(())
    }

    fn records_for(&self, event_id: &str) -> Result<Vec<DecisionRecord>> {
        let records = self.read()?;
        Ok(records
            .iter()
            .filter(|r| r.event_id == event_id)
            .cloned()
            .collect())
    }
}
