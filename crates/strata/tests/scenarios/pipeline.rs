//! A grammar pass: rule bodies and the references inside them become a
//! rule graph.
//!
//! Source shape (offsets in brackets):
//!
//! ```text
//! a := b c ;   [0, 12)
//! b := c ;     [13, 20)
//! c := a ;     [21, 28)
//! ```

use pretty_assertions::assert_eq;
use strata::{cross_reference, SemanticRegions, StringGraph};

fn rules() -> SemanticRegions<&'static str> {
    let mut builder = SemanticRegions::builder();
    builder
        .add("a", 0, 12)
        .unwrap()
        .add("b", 13, 20)
        .unwrap()
        .add("c", 21, 28)
        .unwrap();
    builder.build()
}

/// Each reference is keyed by the rule it names.
fn references() -> SemanticRegions<&'static str> {
    let mut builder = SemanticRegions::builder();
    for (target, start, end) in [("b", 5, 6), ("c", 7, 8), ("c", 18, 19), ("a", 26, 27)] {
        builder.add(target, start, end).unwrap();
    }
    builder.build()
}

#[test]
fn references_become_rule_edges() {
    strata::init_tracing();

    let rules = rules();
    let references = references();
    let containment = cross_reference(&rules, &references).unwrap();

    let mut edges = Vec::new();
    for reference in &references {
        for rule in containment.containers_of_right(reference.index()) {
            edges.push((*rule.key(), *reference.key()));
        }
    }
    assert_eq!(edges, vec![("a", "b"), ("a", "c"), ("b", "c"), ("c", "a")]);

    let graph = StringGraph::from_edges(rules.keys().copied(), edges).unwrap();
    assert!(graph.is_recursive("b"));
    assert!(graph.is_indirectly_recursive("a"));
    assert_eq!(graph.closure_of("b"), vec!["a", "b", "c"]);
    assert_eq!(graph.shortest_path_between("b", "a"), Some(vec!["b", "c", "a"]));
    assert!(graph.top_level_or_orphan_rules().is_empty());
}

#[test]
fn rule_lookup_by_name_and_offset() {
    let rules = rules();
    let index = rules.index();
    assert_eq!(index.len(), 3);
    assert_eq!(index.get(&"b").map(|r| r.bounds()), Some(13..20));
    assert!(!index.contains_key(&"d"));
    assert_eq!(rules.key_at(18), Some(&"b"));
    assert_eq!(rules.key_at(12), None);
}

#[test]
fn init_tracing_is_idempotent() {
    strata::init_tracing();
    strata::init_tracing();
}
