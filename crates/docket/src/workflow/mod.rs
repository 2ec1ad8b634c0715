//! Curation workflow - the orchestration layer reviewers drive.
//!
//! The workflow resolves event ids and topic keys against the store, applies
//! corrections through the patch collaborator, and turns rejections into
//! archive records. Every operation is gated by the authorization
//! collaborator before anything is mutated.
//!
//! # Usage
//!
//! ```
//! use docket::store::{MemoryDecisionArchive, MemoryEventStore, EventStore};
//! use docket::workflow::{CurationWorkflow, RequestContext};
//! use docket::{PatchOperation, QAEvent};
//! use serde_json::json;
//! use uuid::Uuid;
//!
//! let store = MemoryEventStore::new();
//! store.insert(
//!     QAEvent::new("ev-001", "openaire", "missing/abstract", Uuid::new_v4())
//!         .with_payload(json!({"abstract": ""})),
//! ).unwrap();
//!
//! let workflow = CurationWorkflow::new(store, MemoryDecisionArchive::new());
//! let mut ctx = RequestContext::for_user("reviewer@example.org");
//!
//! // Accept: patch the payload; the result is readable within this request.
//! let ops = vec![PatchOperation::replace("/abstract", json!("Proposed text"))];
//! workflow.correct(&mut ctx, "ev-001", &ops).unwrap();
//! assert!(workflow.get_event(&ctx, "ev-001").unwrap().is_some());
//!
//! // Or reject: the event leaves the store and lands in the archive.
//! workflow.reject("ev-001", "reviewer@example.org").unwrap();
//! ```

mod auth;
mod context;
mod resolver;
mod workflow;

pub use auth::{forbidden, Action, AllowAll, Authorizer};
pub use context::RequestContext;
pub use resolver::{CatalogItem, ItemResolver, MapResolver, PassthroughResolver};
pub use workflow::{CurationWorkflow, TopicPage};
