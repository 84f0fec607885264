use pretty_assertions::assert_eq;
use strata::{BitSetGraph, Bits, PageRankConfig, ScoreUpdate, StringGraph};

#[test]
fn cycle_closure_contains_start() {
    let graph = BitSetGraph::from_edges(4, [(1, 2), (2, 3), (3, 1)]).unwrap();
    assert!(graph.is_recursive(1));
    assert_eq!(graph.closure_of(1), [1, 2, 3].into_iter().collect::<Bits>());
}

#[test]
fn top_and_bottom_level_rules() {
    let graph = StringGraph::from_edges(["A", "B", "C"], [("A", "B"), ("A", "C")]).unwrap();
    assert_eq!(graph.top_level_or_orphan_rules(), vec!["A"]);
    assert_eq!(graph.bottom_level_rules(), vec!["B", "C"]);
}

#[test]
fn page_rank_of_single_edge() {
    let graph = StringGraph::from_edges(["A", "B"], [("A", "B")]).unwrap();
    for update in [ScoreUpdate::Monotonic, ScoreUpdate::Standard] {
        let ranks = graph.page_rank(&PageRankConfig::default().with_update(update));
        let (a, b) = (ranks[0].1, ranks[1].1);
        assert!(b > a, "{update:?}: {ranks:?}");
        let total: f64 = ranks.iter().map(|(_, score)| score).sum();
        assert!((total - 1.0).abs() < 1e-6, "{update:?}: {total}");
    }
}

#[test]
fn graph_survives_serialization() {
    let graph = StringGraph::from_edges(
        ["expr", "stmt", "term"],
        [("stmt", "expr"), ("expr", "term"), ("term", "expr")],
    )
    .unwrap();
    let bytes = graph.graph().to_bytes().unwrap();
    let decoded = BitSetGraph::from_bytes(&bytes).unwrap();
    let restored = StringGraph::new(decoded, graph.names().to_vec()).unwrap();
    assert_eq!(restored, graph);
    assert!(restored.is_indirectly_recursive("term"));
}
