//! Authorization collaborator contract.
//!
//! Every workflow operation is gated by an externally supplied permission
//! check keyed on the event id and an [`Action`]. The policy behind the
//! check is out of scope here; the workflow only calls it as a precondition
//! and aborts with `Forbidden` on denial.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{DocketError, Result};

/// The action a caller wants to perform on an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Action {
    /// Look up or list events.
    Read,
    /// Apply a correction.
    Write,
    /// Reject (archive and remove) an event.
    Delete,
}

impl Action {
    /// Get a human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Action::Read => "READ",
            Action::Write => "WRITE",
            Action::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Permission check collaborator.
pub trait Authorizer: Send + Sync {
    /// Allow or deny an action on an event; deny with `Forbidden`.
    fn authorize(&self, event_id: &str, action: Action) -> Result<()>;
}

/// Authorizer that allows everything. Default for composition and tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAll;

impl Authorizer for AllowAll {
    fn authorize(&self, _event_id: &str, _action: Action) -> Result<()> {
        Ok(())
    }
}

/// Build the `Forbidden` error an authorizer denies with.
pub fn forbidden(event_id: &str, action: Action) -> DocketError {
    DocketError::Forbidden {
        event_id: event_id.to_string(),
        action,
    }
}
