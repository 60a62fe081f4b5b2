mod helpers;

use chrono::{Duration, Utc};
use helpers::{remember, remember_at, test_store, FailingStore};
use noesis::config::IntrospectionConfig;
use noesis::introspection::{
    reason_and_record, reflection, Introspector, ReflectionDepth, REFLECTION_CONTEXT,
};
use noesis::memory::MemoryStore;
use noesis::reasoning::{Reasoner, ReasoningMethod, ReasoningRequest};
use std::sync::Mutex;

#[test]
fn surface_reflection_on_empty_store() {
    let store = test_store();
    let reasoner = Reasoner::new();

    let r = Introspector::new(&store, &reasoner)
        .reflect("rust", ReflectionDepth::Surface)
        .unwrap();

    assert_eq!(r.levels.len(), 1);
    let level = r.final_level().unwrap();
    assert_eq!(level.knowledge_gaps, vec!["insufficient_information"]);
    assert_eq!(level.confidence_in_understanding, 0.0);
    assert!(r.report.contains("Reflection on \"rust\""));
}

#[test]
fn reflection_is_written_back() {
    let store = test_store();
    let reasoner = Reasoner::new();

    let r = Introspector::new(&store, &reasoner)
        .reflect("gardening", ReflectionDepth::Deep)
        .unwrap();

    let stored = store.search("", Some(REFLECTION_CONTEXT), 10).unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].id, r.memory_id);
    assert_eq!(stored[0].content, r.report);
    assert_eq!(stored[0].tags, vec!["reflection", "gardening", "deep"]);
}

#[test]
fn depth_controls_level_count() {
    let store = test_store();
    let reasoner = Reasoner::new();
    let introspector = Introspector::new(&store, &reasoner);

    for (depth, levels) in [
        (ReflectionDepth::Surface, 1),
        (ReflectionDepth::Deep, 3),
        (ReflectionDepth::Philosophical, 5),
    ] {
        let r = introspector.reflect("anything", depth).unwrap();
        assert_eq!(r.levels.len(), levels);
        assert_eq!(r.final_level().unwrap().level, levels);
    }
}

#[test]
fn deep_reflection_sees_memories_and_history() {
    let store = test_store();
    for note in [
        "rust borrow checker rules",
        "rust lifetimes explained",
        "rust traits and generics",
        "rust async runtimes",
    ] {
        remember(&store, note, "programming", 0.9);
    }

    let mut reasoner = Reasoner::new();
    for _ in 0..3 {
        let request = ReasoningRequest {
            premises: vec!["P".into(), "P → Q".into()],
            goal: "Q".into(),
            method: ReasoningMethod::Forward,
        };
        reason_and_record(&mut reasoner, &store, &request, true).unwrap();
    }

    let r = Introspector::new(&store, &reasoner)
        .reflect("rust", ReflectionDepth::Deep)
        .unwrap();

    let base = &r.levels[0];
    assert!(base
        .patterns_identified
        .contains(&"recurring_programming".to_string()));
    assert!(base.knowledge_gaps.contains(&"limited_perspective".to_string()));
    // 0.9 mean + one context
    assert!((base.confidence_in_understanding - 0.95).abs() < 1e-9);

    let last = r.final_level().unwrap();
    assert_eq!(last.meta_questions.len(), 7);
    assert_eq!(last.reasoning_patterns.get("forward"), Some(&3));
    assert!(last.potential_biases.contains(&"recency_bias".to_string()));
    assert!(last
        .potential_biases
        .contains(&"confirmation_bias_tendency".to_string()));
    assert!(r.report.contains("Potential biases:"));
}

#[test]
fn old_memories_are_not_recent() {
    let store = test_store();
    let old = Utc::now() - Duration::days(60);
    for note in ["tea ceremony", "tea harvest", "tea brewing"] {
        remember_at(&store, note, "tea", old);
    }
    let reasoner = Reasoner::new();

    let r = Introspector::new(&store, &reasoner)
        .reflect("tea", ReflectionDepth::Deep)
        .unwrap();

    let last = r.final_level().unwrap();
    assert!(!last.potential_biases.contains(&"recency_bias".to_string()));
    // all three on one day
    assert!(last
        .patterns_identified
        .contains(&"temporal_clustering".to_string()));
}

#[test]
fn memory_limit_is_respected() {
    let store = test_store();
    for i in 0..5 {
        remember(&store, &format!("chess opening {i}"), "games", 1.0);
    }
    let reasoner = Reasoner::new();
    let config = IntrospectionConfig {
        reflection_memory_limit: 2,
        ..IntrospectionConfig::default()
    };

    let r = Introspector::new(&store, &reasoner)
        .with_config(config)
        .reflect("chess", ReflectionDepth::Surface)
        .unwrap();

    // two memories are too few
    assert!(r.levels[0]
        .knowledge_gaps
        .contains(&"insufficient_information".to_string()));
}

#[test]
fn store_failure_propagates() {
    let reasoner = Reasoner::new();
    let result = Introspector::new(&FailingStore, &reasoner).reflect("rust", ReflectionDepth::Surface);
    assert!(result.is_err());
}

#[test]
fn reflection_runs_while_engine_is_locked() {
    let store = test_store();
    remember(&store, "rust macros", "programming", 0.8);
    let engine = Mutex::new(Reasoner::new());
    let _busy = engine.lock().unwrap();

    let r = reflection::reflect(
        &store,
        &IntrospectionConfig::default(),
        "rust",
        ReflectionDepth::Deep,
    )
    .unwrap();

    assert_eq!(r.levels.len(), 3);
    let stored = store.search("", Some(REFLECTION_CONTEXT), 10).unwrap();
    assert_eq!(stored[0].id, r.memory_id);
}
