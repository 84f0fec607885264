#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use pretty_assertions::assert_eq;
use strata_bits::strict_invariants;

use super::{NameVisitor, StringGraph};
use crate::config::{CentralityConfig, PageRankConfig};
use crate::{BitSetGraph, GraphError};

/// A grammar-shaped graph:
///
/// ```text
/// program -> stmt, stmt -> expr, stmt -> stmt, expr -> term,
/// term -> expr, term -> ident; comment is orphaned
/// ```
fn grammar() -> StringGraph {
    StringGraph::from_edges(
        ["program", "stmt", "expr", "term", "ident", "comment"],
        [
            ("program", "stmt"),
            ("stmt", "expr"),
            ("stmt", "stmt"),
            ("expr", "term"),
            ("term", "expr"),
            ("term", "ident"),
        ],
    )
    .unwrap()
}

#[test]
fn names_are_sorted_and_deduplicated() {
    let graph = StringGraph::from_edges(["b", "a", "b", "c"], [("a", "c")]).unwrap();
    assert_eq!(graph.names(), &["a", "b", "c"]);
    assert_eq!(graph.len(), 3);
    assert_eq!(graph.id_of("c"), Some(2));
    assert_eq!(graph.name_of(1), Some("b"));
    assert_eq!(graph.name_of(3), None);
}

#[test]
fn unknown_edge_endpoint_is_rejected() {
    let err = StringGraph::from_edges(["a"], [("a", "z")]).unwrap_err();
    assert!(matches!(err, GraphError::UnknownName(ref name) if name == "z"));
}

#[test]
fn level_queries_by_name() {
    // Scenario: A -> B, A -> C
    let graph = StringGraph::from_edges(["A", "B", "C"], [("A", "B"), ("A", "C")]).unwrap();
    assert_eq!(graph.top_level_or_orphan_rules(), vec!["A"]);
    assert_eq!(graph.bottom_level_rules(), vec!["B", "C"]);
    assert!(graph.orphans().is_empty());
}

#[test]
fn adjacency_by_name() {
    let graph = grammar();
    assert_eq!(graph.children("stmt"), vec!["expr", "stmt"]);
    assert_eq!(graph.parents("expr"), vec!["stmt", "term"]);
    assert_eq!(graph.neighbors("term"), vec!["expr", "ident"]);
    assert!(graph.contains_edge("term", "ident"));
    assert!(!graph.contains_edge("ident", "term"));
    assert_eq!(graph.inbound_reference_count("stmt"), 2);
    assert_eq!(graph.outbound_reference_count("term"), 2);
    assert!(graph.has_outbound_edge("program"));
    assert!(!graph.has_inbound_edge("program"));
    assert_eq!(graph.orphans(), vec!["comment"]);
    assert_eq!(graph.top_level_or_orphan_rules(), vec!["comment", "program"]);
    assert_eq!(graph.bottom_level_rules(), vec!["ident"]);
    assert_eq!(graph.edge_count(), 6);
}

#[test]
fn closures_by_name() {
    let graph = grammar();
    assert_eq!(graph.closure_of("program"), vec!["expr", "ident", "stmt", "term"]);
    assert_eq!(graph.reverse_closure_of("ident"), vec!["expr", "program", "stmt", "term"]);
    assert_eq!(graph.closure_size("expr"), 3);
    assert_eq!(graph.reverse_closure_size("program"), 0);
    assert!(graph.is_reachable("program", "ident"));
    assert!(!graph.is_reachable("ident", "program"));
}

#[test]
fn recursion_by_name() {
    let graph = grammar();
    assert!(graph.is_recursive("stmt"));
    assert!(!graph.is_indirectly_recursive("stmt"));
    assert!(graph.is_recursive("expr"));
    assert!(graph.is_indirectly_recursive("term"));
    assert!(!graph.is_recursive("program"));
    assert!(graph.is_unreferenced("program"));
    assert!(!graph.is_unreferenced("expr"));
}

#[test]
fn closure_algebra_by_name() {
    let graph = StringGraph::from_edges(
        ["a", "b", "x", "y", "z"],
        [("a", "x"), ("a", "y"), ("b", "y"), ("b", "z")],
    )
    .unwrap();
    assert_eq!(graph.closure_union("a", "b"), vec!["x", "y", "z"]);
    assert_eq!(graph.closure_intersection("a", "b"), vec!["y"]);
    assert_eq!(graph.closure_disjunction("a", "b"), vec!["x", "z"]);
    assert_eq!(graph.closure_disjunction_of(&["a", "b", "missing"]), vec!["x", "z"]);
}

#[test]
fn unknown_names_yield_empty_answers() {
    let graph = grammar();
    assert!(graph.children("missing").is_empty());
    assert!(graph.closure_of("missing").is_empty());
    assert!(graph.closure_union("missing", "stmt").is_empty());
    assert_eq!(graph.closure_size("missing"), 0);
    assert!(!graph.is_recursive("missing"));
    assert!(!graph.contains_edge("missing", "stmt"));
    assert!(graph.shortest_path_between("missing", "stmt").is_none());
    assert!(graph.paths_between("stmt", "missing").is_empty());
    assert_eq!(graph.distance("missing", "stmt"), None);

    let mut visited = Vec::new();
    graph.walk_from("missing", &mut |name: &str, _depth: usize| visited.push(name.to_owned()));
    assert!(visited.is_empty());
}

#[test]
fn paths_by_name() {
    let graph = grammar();
    assert_eq!(
        graph.shortest_path_between("program", "ident"),
        Some(vec!["program", "stmt", "expr", "term", "ident"])
    );
    assert_eq!(
        graph.paths_between("stmt", "term"),
        vec![vec!["stmt", "expr", "term"], vec!["stmt", "stmt", "expr", "term"]]
    );
    assert_eq!(graph.distance("ident", "program"), Some(4));
}

#[test]
fn orderings_by_name() {
    let graph = StringGraph::from_edges(["a", "b", "c"], [("a", "b"), ("b", "c")]).unwrap();
    assert_eq!(graph.by_closure_size(), vec!["c", "b", "a"]);
    assert_eq!(graph.by_reverse_closure_size(), vec!["a", "b", "c"]);
    assert_eq!(graph.all_edges(), vec![("a", "b"), ("b", "c")]);
    assert_eq!(graph.disjoint_items(), vec!["c"]);
}

#[derive(Default)]
struct Outline {
    lines: Vec<String>,
}

impl NameVisitor for Outline {
    fn enter(&mut self, name: &str, depth: usize) {
        self.lines.push(format!("{}{name}", "  ".repeat(depth)));
    }
}

#[test]
fn walks_by_name() {
    let graph = grammar();
    let mut outline = Outline::default();
    graph.walk(&mut outline);
    assert_eq!(
        outline.lines,
        vec!["program", "  stmt", "    expr", "      term", "        ident", "comment"]
    );

    let mut upwards = Vec::new();
    graph.walk_upwards(&mut |name: &str, depth: usize| upwards.push((name.to_owned(), depth)));
    assert_eq!(upwards[0], ("ident".to_owned(), 0));
    assert_eq!(upwards[1], ("term".to_owned(), 1));
    assert_eq!(upwards.len(), graph.len());
}

#[test]
fn scores_are_keyed_by_name() {
    let graph = StringGraph::from_edges(["A", "B"], [("A", "B")]).unwrap();

    let ranks = graph.page_rank(&PageRankConfig::default());
    assert_eq!(ranks.iter().map(|(name, _)| *name).collect::<Vec<_>>(), vec!["A", "B"]);
    assert!(ranks[1].1 > ranks[0].1);

    let centrality = graph.eigenvector_centrality(&CentralityConfig::default());
    assert_eq!(centrality, vec![("A", 0.0), ("B", 1.0)]);
}

#[test]
fn new_checks_table_when_strict() {
    let graph = BitSetGraph::from_edges(2, [(0, 1)]).unwrap();

    let unsorted = StringGraph::new(graph.clone(), vec!["b".to_owned(), "a".to_owned()]);
    let short = StringGraph::new(graph.clone(), vec!["a".to_owned()]);
    if strict_invariants() {
        assert!(matches!(
            unsorted,
            Err(GraphError::UnsortedNames { index: 1, .. })
        ));
        assert!(matches!(
            short,
            Err(GraphError::NameCountMismatch { names: 1, nodes: 2 })
        ));
    } else {
        assert!(unsorted.is_ok());
        assert!(short.is_ok());
    }

    let ok = StringGraph::new(graph, vec!["a".to_owned(), "b".to_owned()]).unwrap();
    assert_eq!(ok.children("a"), vec!["b"]);
}
