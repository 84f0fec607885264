#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use pretty_assertions::assert_eq;

use super::GraphVisitor;
use crate::BitSetGraph;

#[derive(Debug, PartialEq, Eq)]
enum Event {
    Enter(usize, usize),
    Exit(usize, usize),
}

#[derive(Default)]
struct Recorder {
    events: Vec<Event>,
}

impl GraphVisitor for Recorder {
    fn enter(&mut self, node: usize, depth: usize) {
        self.events.push(Event::Enter(node, depth));
    }

    fn exit(&mut self, node: usize, depth: usize) {
        self.events.push(Event::Exit(node, depth));
    }
}

#[test]
fn walk_enters_and_exits_in_depth_first_order() {
    let graph = BitSetGraph::from_edges(3, [(0, 1), (0, 2)]).unwrap();
    let mut recorder = Recorder::default();
    graph.walk(&mut recorder);
    assert_eq!(
        recorder.events,
        vec![
            Event::Enter(0, 0),
            Event::Enter(1, 1),
            Event::Exit(1, 1),
            Event::Enter(2, 1),
            Event::Exit(2, 1),
            Event::Exit(0, 0),
        ]
    );
}

#[test]
fn shared_children_are_visited_once() {
    // Diamond: 0 -> {1, 2} -> 3
    let graph = BitSetGraph::from_edges(4, [(0, 1), (0, 2), (1, 3), (2, 3)]).unwrap();
    let mut order = Vec::new();
    graph.walk(&mut |node: usize, depth: usize| order.push((node, depth)));
    assert_eq!(order, vec![(0, 0), (1, 1), (3, 2), (2, 1)]);
}

#[test]
fn walk_reaches_cycles_without_entry_point() {
    // Node 0 isolated, 1 <-> 2 has no top-level node leading into it
    let graph = BitSetGraph::from_edges(3, [(1, 2), (2, 1)]).unwrap();
    let mut order = Vec::new();
    graph.walk(&mut |node: usize, depth: usize| order.push((node, depth)));
    assert_eq!(order, vec![(0, 0), (1, 0), (2, 1)]);
}

#[test]
fn walk_upwards_follows_inbound_edges() {
    let graph = BitSetGraph::from_edges(3, [(0, 1), (0, 2)]).unwrap();
    let mut order = Vec::new();
    graph.walk_upwards(&mut |node: usize, depth: usize| order.push((node, depth)));
    assert_eq!(order, vec![(1, 0), (0, 1), (2, 0)]);
}

#[test]
fn walk_from_only_covers_reachable_nodes() {
    let graph = BitSetGraph::from_edges(5, [(0, 1), (1, 2), (3, 4)]).unwrap();
    let mut order = Vec::new();
    graph.walk_from(1, &mut |node: usize, depth: usize| order.push((node, depth)));
    assert_eq!(order, vec![(1, 0), (2, 1)]);
}

#[test]
fn deep_chain_does_not_overflow() {
    let size = 100_000;
    let graph = BitSetGraph::from_edges(size, (0..size - 1).map(|n| (n, n + 1))).unwrap();
    let mut deepest = 0;
    graph.walk(&mut |_node: usize, depth: usize| deepest = deepest.max(depth));
    assert_eq!(deepest, size - 1);
}
