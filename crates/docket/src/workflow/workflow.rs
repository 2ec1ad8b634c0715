//! The curation workflow - orchestration over store, archive, and collaborators.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{DocketError, Result};
use crate::event::{QAEvent, TopicKey};
use crate::patch::PatchOperation;
use crate::store::{DecisionArchive, DecisionRecord, EventStore};

use super::auth::{Action, AllowAll, Authorizer};
use super::context::RequestContext;
use super::resolver::{ItemResolver, PassthroughResolver};

/// One page of a topic listing plus the window-independent total.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopicPage {
    /// Events in the requested window, trust descending.
    pub events: Vec<QAEvent>,

    /// Total events under the key, regardless of the window.
    pub total: usize,
}

/// Orchestrates event lookup, topic search, corrections, and rejections.
///
/// Per event the workflow walks a small state machine: `ACTIVE` in the
/// store, `STAGED` inside one request after a correction, then either
/// `CORRECTED` (committed back to `ACTIVE` with the new payload) or
/// `REJECTED` (archived and removed, terminal).
///
/// There is deliberately no way to enumerate events without a topic key:
/// listings are always topic-scoped, and the absence of a `find_all` here
/// is a contract, not an omission.
pub struct CurationWorkflow {
    store: Arc<dyn EventStore>,
    archive: Arc<dyn DecisionArchive>,
    authorizer: Arc<dyn Authorizer>,
    resolver: Arc<dyn ItemResolver>,
}

impl CurationWorkflow {
    /// Create a workflow over a store and archive.
    ///
    /// Starts with an allow-everything authorizer and a passthrough item
    /// resolver; swap them in with [`with_authorizer`](Self::with_authorizer)
    /// and [`with_resolver`](Self::with_resolver).
    pub fn new(
        store: impl EventStore + 'static,
        archive: impl DecisionArchive + 'static,
    ) -> Self {
        Self {
            store: Arc::new(store),
            archive: Arc::new(archive),
            authorizer: Arc::new(AllowAll),
            resolver: Arc::new(PassthroughResolver),
        }
    }

    /// Create a workflow from already-shared backends.
    pub fn with_shared(store: Arc<dyn EventStore>, archive: Arc<dyn DecisionArchive>) -> Self {
        Self {
            store,
            archive,
            authorizer: Arc::new(AllowAll),
            resolver: Arc::new(PassthroughResolver),
        }
    }

    /// Set the authorization collaborator.
    pub fn with_authorizer(mut self, authorizer: impl Authorizer + 'static) -> Self {
        self.authorizer = Arc::new(authorizer);
        self
    }

    /// Set the item-resolution collaborator.
    pub fn with_resolver(mut self, resolver: impl ItemResolver + 'static) -> Self {
        self.resolver = Arc::new(resolver);
        self
    }

    /// Look up a single event by id.
    ///
    /// On a store miss, falls back to the request's staged event when its id
    /// equals `event_id` exactly. That fallback is the only path by which an
    /// uncommitted correction becomes visible to a read, and only to the
    /// request that produced it.
    pub fn get_event(&self, ctx: &RequestContext, event_id: &str) -> Result<Option<QAEvent>> {
        self.authorizer.authorize(event_id, Action::Read)?;

        if let Some(event) = self.store.find_by_id(event_id)? {
            return Ok(Some(event));
        }

        Ok(ctx.staged_matching(event_id).cloned())
    }

    /// List one page of a topic and count its total events.
    ///
    /// A raw key that fails to parse is a `MalformedKey` error, never an
    /// empty page; callers can tell bad input from an empty topic. Every
    /// event in the window is subject to the read permission check, and a
    /// denial fails the whole search rather than silently thinning the
    /// page. The page and the total come from two store calls, not one
    /// transaction, so a concurrent removal between them may make `total`
    /// drift by the removed events.
    pub fn search_by_topic(&self, raw_key: &str, offset: usize, limit: usize) -> Result<TopicPage> {
        let key = TopicKey::decode(raw_key)?;

        debug!(%key, offset, limit, "topic search");
        let events = self.store.find_by_topic(&key, offset, limit)?;
        for event in &events {
            self.authorizer.authorize(&event.event_id, Action::Read)?;
        }
        let total = self.store.count_by_topic(&key)?;

        Ok(TopicPage { events, total })
    }

    /// Reject an event: archive a decision record, then remove it.
    ///
    /// Rejecting an id with no active event is `NotFound`, not a no-op.
    /// The record is written before the removal so that a failure between
    /// the two leaves the archive as the source of truth; the store-level
    /// remove is idempotent, so a retry is safe. Once a first call has
    /// completed the removal, a duplicate call observes `NotFound`.
    pub fn reject(&self, event_id: &str, decided_by: &str) -> Result<DecisionRecord> {
        self.authorizer.authorize(event_id, Action::Delete)?;

        let event = self
            .store
            .find_by_id(event_id)?
            .ok_or_else(|| DocketError::NotFound(event_id.to_string()))?;

        // Audit-time existence check; resolution failure aborts the rejection.
        let item = self.resolver.resolve(event.target)?;

        let record = DecisionRecord::new(event_id, event.target, decided_by);
        self.archive.record(record.clone())?;
        self.store.remove(event_id)?;

        info!(
            event_id,
            target = %item.id,
            decided_by,
            "event rejected and archived"
        );
        Ok(record)
    }

    /// Apply a correction to an event and stage the result in the request.
    ///
    /// On success the updated event is the new active record, and the same
    /// request can read it back through [`get_event`](Self::get_event) even
    /// before the store's commit is externally visible.
    pub fn correct(
        &self,
        ctx: &mut RequestContext,
        event_id: &str,
        operations: &[PatchOperation],
    ) -> Result<QAEvent> {
        self.authorizer.authorize(event_id, Action::Write)?;

        let updated = self.store.apply_correction(event_id, operations)?;
        ctx.stage(updated.clone());

        info!(event_id, ops = operations.len(), "correction committed");
        Ok(updated)
    }
}
