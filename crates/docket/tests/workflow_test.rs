//! Integration tests for the curation workflow.

use std::sync::Arc;

use serde_json::json;
use uuid::Uuid;

use docket::store::{DecisionArchive, EventStore, MemoryDecisionArchive, MemoryEventStore};
use docket::workflow::{
    Action, Authorizer, CatalogItem, CurationWorkflow, MapResolver, RequestContext,
};
use docket::{DocketError, PatchOperation, QAEvent, Result};

/// Helper to build an event under the default test topic.
fn test_event(event_id: &str, trust: f64) -> QAEvent {
    QAEvent::new(event_id, "openaire", "missing/abstract", Uuid::new_v4())
        .with_title(format!("Suggestion {}", event_id))
        .with_trust(trust)
        .with_payload(json!({"abstract": "", "title": "Original"}))
}

/// Store with `count` events on the default topic, trust descending by index.
fn populated_store(count: usize) -> MemoryEventStore {
    let store = MemoryEventStore::new();
    for i in 0..count {
        store
            .insert(test_event(&format!("ev-{:03}", i), 1.0 - i as f64 * 0.01))
            .unwrap();
    }
    store
}

/// Authorizer that denies a single action for every event.
struct DenyAction(Action);

impl Authorizer for DenyAction {
    fn authorize(&self, event_id: &str, action: Action) -> Result<()> {
        if action == self.0 {
            return Err(docket::workflow::forbidden(event_id, action));
        }
        Ok(())
    }
}

// =============================================================================
// Topic search
// =============================================================================

#[test]
fn test_search_by_topic_pages_and_total() {
    let workflow = CurationWorkflow::new(populated_store(12), MemoryDecisionArchive::new());

    let page = workflow.search_by_topic("openaire:missing!abstract", 10, 5).unwrap();

    assert_eq!(page.events.len(), 2);
    assert_eq!(page.total, 12);
}

#[test]
fn test_search_windows_partition_without_gaps_or_duplicates() {
    let workflow = CurationWorkflow::new(populated_store(12), MemoryDecisionArchive::new());

    let mut seen = Vec::new();
    for offset in (0..12).step_by(5) {
        let page = workflow.search_by_topic("openaire:missing!abstract", offset, 5).unwrap();
        seen.extend(page.events.into_iter().map(|e| e.event_id));
    }

    let full = workflow.search_by_topic("openaire:missing!abstract", 0, 100).unwrap();
    let all: Vec<String> = full.events.into_iter().map(|e| e.event_id).collect();

    assert_eq!(seen, all);
    assert_eq!(seen.len(), 12);
}

#[test]
fn test_search_malformed_key_is_an_error_not_empty() {
    let workflow = CurationWorkflow::new(populated_store(3), MemoryDecisionArchive::new());

    // An unknown topic is an empty page...
    let empty = workflow.search_by_topic("openaire:unknown-topic", 0, 10).unwrap();
    assert_eq!(empty.total, 0);

    // ...but a key that fails to parse is a distinguishable error.
    let err = workflow.search_by_topic("just-one-segment", 0, 10).unwrap_err();
    assert!(matches!(err, DocketError::MalformedKey { .. }));
}

#[test]
fn test_search_target_scoped_key() {
    let store = populated_store(3);
    let target = Uuid::new_v4();
    let mut scoped = test_event("ev-target", 0.5);
    scoped.target = target;
    store.insert(scoped).unwrap();

    let workflow = CurationWorkflow::new(store, MemoryDecisionArchive::new());
    let raw = format!("openaire:missing!abstract:{}", target);

    let page = workflow.search_by_topic(&raw, 0, 10).unwrap();

    assert_eq!(page.total, 1);
    assert_eq!(page.events[0].event_id, "ev-target");
}

// =============================================================================
// Staged events
// =============================================================================

#[test]
fn test_staged_event_visible_only_to_its_own_request() {
    let store = Arc::new(populated_store(1));
    let archive = Arc::new(MemoryDecisionArchive::new());
    let workflow = CurationWorkflow::with_shared(store.clone(), archive);

    let mut request_a = RequestContext::for_user("reviewer-a");
    let ops = vec![PatchOperation::replace("/title", json!("Corrected"))];
    workflow.correct(&mut request_a, "ev-000", &ops).unwrap();

    // Simulate the store commit not yet being visible.
    store.remove("ev-000").unwrap();

    // Request A still reads its own staged result back.
    let seen_by_a = workflow.get_event(&request_a, "ev-000").unwrap().unwrap();
    assert_eq!(seen_by_a.payload["title"], json!("Corrected"));

    // A concurrent request B with the identical id sees nothing.
    let request_b = RequestContext::for_user("reviewer-b");
    assert!(workflow.get_event(&request_b, "ev-000").unwrap().is_none());
}

#[test]
fn test_staged_fallback_requires_exact_id() {
    let workflow = CurationWorkflow::new(populated_store(1), MemoryDecisionArchive::new());

    let mut ctx = RequestContext::new();
    let ops = vec![PatchOperation::replace("/title", json!("Corrected"))];
    workflow.correct(&mut ctx, "ev-000", &ops).unwrap();

    // Prefixes and extensions of the staged id never match.
    assert!(workflow.get_event(&ctx, "ev-00").unwrap().is_none());
    assert!(workflow.get_event(&ctx, "ev-0000").unwrap().is_none());
}

// =============================================================================
// Rejection
// =============================================================================

#[test]
fn test_reject_archives_then_removes() {
    let store = Arc::new(populated_store(2));
    let archive = Arc::new(MemoryDecisionArchive::new());
    let workflow = CurationWorkflow::with_shared(store.clone(), archive.clone());

    let record = workflow.reject("ev-000", "reviewer@example.org").unwrap();

    assert_eq!(record.decided_by, "reviewer@example.org");
    assert!(store.find_by_id("ev-000").unwrap().is_none());
    assert_eq!(archive.records_for("ev-000").unwrap().len(), 1);

    // The other event is untouched.
    assert!(store.find_by_id("ev-001").unwrap().is_some());
}

#[test]
fn test_double_reject_yields_one_record_and_not_found() {
    let archive = Arc::new(MemoryDecisionArchive::new());
    let workflow =
        CurationWorkflow::with_shared(Arc::new(populated_store(1)), archive.clone());

    workflow.reject("ev-000", "reviewer").unwrap();
    let err = workflow.reject("ev-000", "reviewer").unwrap_err();

    assert!(err.is_not_found());
    assert_eq!(archive.records_for("ev-000").unwrap().len(), 1);
}

#[test]
fn test_redetected_event_gets_a_second_record() {
    let store = Arc::new(populated_store(1));
    let archive = Arc::new(MemoryDecisionArchive::new());
    let workflow = CurationWorkflow::with_shared(store.clone(), archive.clone());

    workflow.reject("ev-000", "reviewer").unwrap();

    // The detection source resubmits the same id later.
    store.insert(test_event("ev-000", 0.9)).unwrap();
    workflow.reject("ev-000", "reviewer").unwrap();

    assert_eq!(archive.records_for("ev-000").unwrap().len(), 2);
}

#[test]
fn test_reject_surfaces_resolution_failure() {
    let store = populated_store(1);
    let resolver = MapResolver::new(); // knows no items

    let workflow = CurationWorkflow::new(store, MemoryDecisionArchive::new())
        .with_resolver(resolver);

    let err = workflow.reject("ev-000", "reviewer").unwrap_err();
    assert!(matches!(err, DocketError::TargetResolution { .. }));
}

#[test]
fn test_reject_with_resolvable_target() {
    let store = MemoryEventStore::new();
    let target = Uuid::new_v4();
    store
        .insert(QAEvent::new("ev-000", "openaire", "more-pid", target))
        .unwrap();

    let resolver = MapResolver::new();
    resolver.insert(CatalogItem::new(target).with_title("Dataset A")).unwrap();

    let workflow =
        CurationWorkflow::new(store, MemoryDecisionArchive::new()).with_resolver(resolver);

    let record = workflow.reject("ev-000", "reviewer").unwrap();
    assert_eq!(record.target, target);
}

// =============================================================================
// Authorization
// =============================================================================

#[test]
fn test_denied_actions_abort_before_mutation() {
    let store = Arc::new(populated_store(1));
    let archive = Arc::new(MemoryDecisionArchive::new());
    let workflow = CurationWorkflow::with_shared(store.clone(), archive.clone())
        .with_authorizer(DenyAction(Action::Delete));

    let err = workflow.reject("ev-000", "reviewer").unwrap_err();

    assert!(matches!(err, DocketError::Forbidden { .. }));
    assert!(store.find_by_id("ev-000").unwrap().is_some());
    assert!(archive.records_for("ev-000").unwrap().is_empty());
}

#[test]
fn test_denied_read() {
    let workflow = CurationWorkflow::new(populated_store(1), MemoryDecisionArchive::new())
        .with_authorizer(DenyAction(Action::Read));

    let err = workflow.get_event(&RequestContext::new(), "ev-000").unwrap_err();
    assert!(matches!(err, DocketError::Forbidden { .. }));
}

#[test]
fn test_denied_read_blocks_topic_search() {
    let workflow = CurationWorkflow::new(populated_store(1), MemoryDecisionArchive::new())
        .with_authorizer(DenyAction(Action::Read));

    // An event a caller cannot get_event must not leak through the topic
    // listing either.
    let err = workflow.search_by_topic("openaire:missing!abstract", 0, 10).unwrap_err();
    assert!(matches!(err, DocketError::Forbidden { .. }));
}

#[test]
fn test_denied_write_leaves_payload_untouched() {
    let store = Arc::new(populated_store(1));
    let workflow = CurationWorkflow::with_shared(store.clone(), Arc::new(MemoryDecisionArchive::new()))
        .with_authorizer(DenyAction(Action::Write));

    let mut ctx = RequestContext::new();
    let ops = vec![PatchOperation::replace("/title", json!("Changed"))];
    let err = workflow.correct(&mut ctx, "ev-000", &ops).unwrap_err();

    assert!(matches!(err, DocketError::Forbidden { .. }));
    assert_eq!(
        store.find_by_id("ev-000").unwrap().unwrap().payload["title"],
        json!("Original")
    );
}

// =============================================================================
// Glossary scenario from the key format
// =============================================================================

#[test]
fn test_orcid_scenario_key_decodes_and_searches() {
    let target = Uuid::parse_str("3b1ef4c2-98a0-4d2b-b3f1-0d7e2a9c5f6e").unwrap();
    let store = MemoryEventStore::new();
    store
        .insert(
            QAEvent::new("ev-orcid", "orcid", "missing/author", target)
                .with_trust(0.8)
                .with_payload(json!({"author": "A. Nonymous"})),
        )
        .unwrap();

    let workflow = CurationWorkflow::new(store, MemoryDecisionArchive::new());
    let raw = format!("orcid:missing!author:{}", target);

    let page = workflow.search_by_topic(&raw, 0, 10).unwrap();

    assert_eq!(page.total, 1);
    assert_eq!(page.events[0].source, "orcid");
    assert_eq!(page.events[0].topic, "missing/author");
}
