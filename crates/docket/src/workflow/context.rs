//! Request-scoped context for the curation workflow.
//!
//! The context carries the one piece of per-request state the workflow
//! needs: a staged event produced by a correction that is not yet durably
//! committed. It is passed explicitly down the call chain and must never be
//! stored in anything reachable from another request; the staged event's
//! whole safety property is that only its own request can see it.

use crate::event::QAEvent;

/// Per-request state, owned by the caller for the lifetime of one request.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    user: Option<String>,
    staged: Option<QAEvent>,
}

impl RequestContext {
    /// Create an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a context for a known user.
    pub fn for_user(user: impl Into<String>) -> Self {
        Self {
            user: Some(user.into()),
            staged: None,
        }
    }

    /// The requesting user, if known.
    pub fn user(&self) -> Option<&str> {
        self.user.as_deref()
    }

    /// Stage an uncommitted event, replacing any previous one.
    pub fn stage(&mut self, event: QAEvent) {
        self.staged = Some(event);
    }

    /// The staged event, whatever its id.
    pub fn staged(&self) -> Option<&QAEvent> {
        self.staged.as_ref()
    }

    /// The staged event, only if its id equals `event_id` exactly.
    pub fn staged_matching(&self, event_id: &str) -> Option<&QAEvent> {
        self.staged.as_ref().filter(|e| e.event_id == event_id)
    }

    /// Drop the staged event.
    pub fn clear_staged(&mut self) {
        self.staged = None;
    }
}
