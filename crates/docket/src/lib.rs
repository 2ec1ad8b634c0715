//! Docket: curation workflow for machine-detected quality-assurance events.
//!
//! An external detection source flags catalogued items with suggested
//! corrections ("QA events"). Docket is the reviewing side: events are
//! browsed by topic, inspected one at a time, and either corrected (a patch
//! applied to the event payload) or rejected (a decision record appended to
//! an audit archive as the event leaves the active store).
//!
//! # Core Principles
//!
//! - **Two-tier identifiers**: a topic key addresses a group of events; an
//!   event id addresses exactly one
//! - **Rejection is not deletion**: every rejection leaves an append-only
//!   decision record behind
//! - **Request-scoped staging**: an uncommitted correction is visible only
//!   to the request that produced it
//!
//! # Example
//!
//! ```
//! use docket::store::{EventStore, MemoryDecisionArchive, MemoryEventStore};
//! use docket::workflow::CurationWorkflow;
//! use docket::QAEvent;
//! use uuid::Uuid;
//!
//! let store = MemoryEventStore::new();
//! store.insert(QAEvent::new("ev-001", "orcid", "missing/author", Uuid::new_v4())).unwrap();
//!
//! let workflow = CurationWorkflow::new(store, MemoryDecisionArchive::new());
//! let page = workflow.search_by_topic("orcid:missing!author", 0, 20).unwrap();
//!
//! assert_eq!(page.total, 1);
//! ```

pub mod error;
pub mod event;
pub mod patch;
pub mod store;
pub mod workflow;

pub use error::{DocketError, Result};
pub use event::{QAEvent, TopicKey};
pub use patch::{JsonPatchApplier, PatchApplier, PatchOperation};
pub use store::{DecisionArchive, DecisionRecord, EventStore, MemoryDecisionArchive, MemoryEventStore};
pub use workflow::{Action, Authorizer, CurationWorkflow, RequestContext, TopicPage};
