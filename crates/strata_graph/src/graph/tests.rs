#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use pretty_assertions::assert_eq;
use strata_bits::{strict_invariants, Bits};

use super::*;

fn bits(members: &[usize]) -> Bits {
    members.iter().copied().collect()
}

/// A -> B, A -> C with A=0, B=1, C=2.
fn fan_out() -> BitSetGraph {
    BitSetGraph::from_edges(3, [(0, 1), (0, 2)]).unwrap()
}

#[test]
fn top_and_bottom_level() {
    let graph = fan_out();
    assert_eq!(graph.top_level(), &bits(&[0]));
    assert_eq!(graph.top_level_or_orphan_rules(), bits(&[0]));
    assert_eq!(graph.bottom_level_rules(), &bits(&[1, 2]));
}

#[test]
fn orphans_are_top_level_or_orphan_but_not_top_level() {
    // 0 -> 1, node 2 isolated
    let graph = BitSetGraph::from_edges(3, [(0, 1)]).unwrap();
    assert_eq!(graph.top_level(), &bits(&[0]));
    assert_eq!(graph.top_level_or_orphan_rules(), bits(&[0, 2]));
    assert_eq!(graph.orphans(), bits(&[2]));
}

#[test]
fn adjacency_queries() {
    let graph = BitSetGraph::from_edges(4, [(0, 1), (0, 2), (2, 1), (3, 3)]).unwrap();
    assert_eq!(graph.children(0), &bits(&[1, 2]));
    assert_eq!(graph.parents(1), &bits(&[0, 2]));
    assert_eq!(graph.neighbors(2), bits(&[0, 1]));
    assert!(graph.contains_edge(2, 1));
    assert!(!graph.contains_edge(1, 2));
    assert!(graph.has_outbound_edge(0));
    assert!(!graph.has_outbound_edge(1));
    assert!(graph.has_inbound_edge(1));
    assert!(!graph.has_inbound_edge(0));
    assert_eq!(graph.inbound_reference_count(1), 2);
    assert_eq!(graph.outbound_reference_count(0), 2);
}

#[test]
fn self_reference_does_not_count_as_referenced() {
    let graph = BitSetGraph::from_edges(2, [(1, 1)]).unwrap();
    assert!(graph.is_unreferenced(1));
    assert!(graph.is_unreferenced(0));

    let referenced = BitSetGraph::from_edges(2, [(0, 1)]).unwrap();
    assert!(!referenced.is_unreferenced(1));
}

#[test]
fn edges_are_ordered_by_source_then_target() {
    let graph = BitSetGraph::from_edges(3, [(2, 0), (0, 2), (0, 1), (0, 1)]).unwrap();
    assert_eq!(graph.all_edges(), vec![(0, 1), (0, 2), (2, 0)]);
    assert_eq!(graph.edge_count(), 3);
}

#[test]
fn out_of_range_edge_is_rejected() {
    let err = BitSetGraph::from_edges(2, [(0, 5)]).unwrap_err();
    assert!(matches!(err, GraphError::NodeOutOfRange { node: 5, size: 2 }));

    let err = BitSetGraph::from_adjacency(vec![bits(&[3])]).unwrap_err();
    assert!(matches!(err, GraphError::NodeOutOfRange { node: 3, size: 1 }));
}

#[test]
fn from_adjacency_derives_inbound() {
    let graph = BitSetGraph::from_adjacency(vec![bits(&[1, 2]), bits(&[2]), Bits::new()]).unwrap();
    assert_eq!(graph.parents(2), &bits(&[0, 1]));
    assert_eq!(graph, BitSetGraph::from_edges(3, [(0, 1), (0, 2), (1, 2)]).unwrap());
}

#[test]
fn from_parts_checks_row_counts() {
    let err = BitSetGraph::from_parts(vec![Bits::new()], vec![]).unwrap_err();
    assert!(matches!(
        err,
        GraphError::SizeMismatch {
            outbound: 1,
            inbound: 0
        }
    ));
}

#[test]
fn from_parts_checks_symmetry_when_strict() {
    let outbound = vec![bits(&[1]), Bits::new()];
    let inbound = vec![Bits::new(), Bits::new()];
    let result = BitSetGraph::from_parts(outbound, inbound);
    if strict_invariants() {
        assert!(matches!(
            result,
            Err(GraphError::AsymmetricEdge { from: 0, to: 1 })
        ));
    } else {
        assert!(result.is_ok());
    }
}

#[test]
fn from_parts_accepts_symmetric_rows() {
    let graph = BitSetGraph::from_parts(
        vec![bits(&[1]), Bits::new()],
        vec![Bits::new(), bits(&[0])],
    )
    .unwrap();
    assert_eq!(graph.all_edges(), vec![(0, 1)]);
}

#[test]
fn builder_chains_edges() {
    let mut builder = BitSetGraphBuilder::new(3);
    builder.add_edge(0, 1).unwrap().add_edge(1, 2).unwrap();
    let graph = builder.build();
    assert_eq!(graph.all_edges(), vec![(0, 1), (1, 2)]);
}

#[test]
fn empty_graph() {
    let graph = BitSetGraph::from_edges(0, []).unwrap();
    assert!(graph.is_empty());
    assert_eq!(graph.edge_count(), 0);
    assert!(graph.top_level().is_empty());
}

#[test]
fn debug_lists_non_empty_rows() {
    let graph = fan_out();
    assert_eq!(format!("{graph:?}"), "{0: {1, 2}}");
}

#[allow(
    clippy::disallowed_types,
    reason = "proptest macros internally use Arc"
)]
mod proptest_symmetry {
    use super::super::BitSetGraph;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn outbound_and_inbound_are_inverses(
            edges in proptest::collection::vec((0usize..24, 0usize..24), 0..80)
        ) {
            let graph = BitSetGraph::from_edges(24, edges.iter().copied()).unwrap();
            for a in 0..graph.len() {
                for b in 0..graph.len() {
                    prop_assert_eq!(graph.children(a).contains(b), graph.parents(b).contains(a));
                }
            }
            for &(from, to) in &edges {
                prop_assert!(graph.contains_edge(from, to));
            }
        }
    }
}
