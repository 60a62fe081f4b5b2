mod helpers;

use helpers::{remember, test_store};
use noesis::introspection::reason_and_record;
use noesis::memory::types::{MemoryType, NewMemory};
use noesis::memory::MemoryStore;
use noesis::reasoning::{Reasoner, ReasoningMethod, ReasoningRequest};

#[test]
fn store_and_search_through_trait() {
    let store = test_store();
    let id = remember(&store, "Rust guarantees memory safety", "programming", 0.9);
    remember(&store, "Sourdough needs a starter", "cooking", 0.8);

    let results = store.search("memory safety", None, 10).unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].id, id);
    assert_eq!(results[0].memory_type, MemoryType::Semantic);
    assert_eq!(results[0].context, "programming");
    assert!((results[0].confidence - 0.9).abs() < 1e-9);
}

#[test]
fn stored_record_carries_all_fields() {
    let store = test_store();
    let record = store
        .store(
            NewMemory::new("Met Ada at the conference", MemoryType::Episodic)
                .with_context("people")
                .with_emotional_weight(0.7)
                .with_tags(["conference", "ada"])
                .with_metadata(serde_json::json!({ "city": "Lisbon" })),
        )
        .unwrap();

    let found = store.search("Ada", Some("people"), 5).unwrap();
    assert_eq!(found.len(), 1);
    let m = &found[0];
    assert_eq!(m.id, record.id);
    assert_eq!(m.memory_type, MemoryType::Episodic);
    assert_eq!(m.emotional_weight, 0.7);
    assert_eq!(m.tags, vec!["conference", "ada"]);
    assert_eq!(m.metadata, Some(serde_json::json!({ "city": "Lisbon" })));
}

#[test]
fn invalid_memory_is_rejected() {
    let store = test_store();
    assert!(store.store(NewMemory::semantic("")).is_err());
    assert!(store
        .store(NewMemory::semantic("x").with_confidence(-0.5))
        .is_err());
}

#[test]
fn reasoning_sessions_are_recorded_and_read_back() {
    let store = test_store();
    let mut reasoner = Reasoner::new();

    for (goal, method) in [
        ("Q", ReasoningMethod::Forward),
        ("It rained", ReasoningMethod::Abductive),
    ] {
        let request = ReasoningRequest {
            premises: vec!["P".into(), "P → Q".into()],
            goal: goal.into(),
            method,
        };
        reason_and_record(&mut reasoner, &store, &request, true).unwrap();
    }

    let history = store.reasoning_history(10).unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].goal, "It rained");
    assert_eq!(history[0].method, ReasoningMethod::Abductive);
    assert!(!history[0].result.found);
    assert_eq!(history[1].goal, "Q");
    assert!(history[1].result.found);
    assert!((history[1].result.confidence - 0.95).abs() < 1e-9);
}

#[test]
fn sessions_are_not_recorded_when_disabled() {
    let store = test_store();
    let mut reasoner = Reasoner::new();
    let request = ReasoningRequest {
        premises: vec!["P".into()],
        goal: "P".into(),
        method: ReasoningMethod::Backward,
    };
    reason_and_record(&mut reasoner, &store, &request, false).unwrap();

    assert!(store.reasoning_history(10).unwrap().is_empty());
    assert_eq!(reasoner.history().len(), 1);
}
