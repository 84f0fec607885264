//! Depth-first traversal with enter/exit callbacks.
//!
//! Every node is entered and exited exactly once per walk, even when several
//! parents reach it; a shared `seen` set suppresses revisits. Walks start at
//! the cached top (or bottom) level and then sweep any node still unseen, so
//! cycles with no entry point are visited too.

use strata_bits::Bits;

use crate::BitSetGraph;

/// Receives traversal callbacks from the graph walks.
///
/// Any `FnMut(node, depth)` closure is a visitor that only cares about
/// `enter`.
pub trait GraphVisitor {
    /// Called when `node` is first reached, `depth` edges below the root.
    fn enter(&mut self, node: usize, depth: usize);

    /// Called after every node reachable from `node` has been handled.
    fn exit(&mut self, node: usize, depth: usize) {
        let _ = (node, depth);
    }
}

impl<F: FnMut(usize, usize)> GraphVisitor for F {
    fn enter(&mut self, node: usize, depth: usize) {
        self(node, depth);
    }
}

impl BitSetGraph {
    /// Walk outbound edges from the top-level nodes, then from any node
    /// not yet visited.
    pub fn walk(&self, visitor: &mut impl GraphVisitor) {
        walk_rows(&self.outbound, self.top_level(), visitor);
    }

    /// Walk inbound edges from the bottom-level nodes, then from any node
    /// not yet visited.
    pub fn walk_upwards(&self, visitor: &mut impl GraphVisitor) {
        walk_rows(&self.inbound, self.bottom_level_rules(), visitor);
    }

    /// Walk outbound edges from `start` only.
    pub fn walk_from(&self, start: usize, visitor: &mut impl GraphVisitor) {
        let mut seen = Bits::with_capacity(self.len());
        walk_one(&self.outbound, start, &mut seen, visitor);
    }
}

fn walk_rows(rows: &[Bits], roots: &Bits, visitor: &mut impl GraphVisitor) {
    let mut seen = Bits::with_capacity(rows.len());
    for root in roots {
        walk_one(rows, root, &mut seen, visitor);
    }
    let mut next = seen.next_clear_bit(0);
    while next < rows.len() {
        walk_one(rows, next, &mut seen, visitor);
        next = seen.next_clear_bit(next + 1);
    }
}

/// Iterative depth-first walk from `root` with an explicit stack, so deep
/// reference chains cannot overflow the call stack.
fn walk_one(rows: &[Bits], root: usize, seen: &mut Bits, visitor: &mut impl GraphVisitor) {
    if !seen.insert(root) {
        return;
    }
    visitor.enter(root, 0);

    // Stack entries: (node, depth, remaining children).
    let mut stack = vec![(root, 0usize, rows[root].iter())];
    while let Some((node, depth, children)) = stack.last_mut() {
        match children.find(|child| !seen.contains(*child)) {
            Some(child) => {
                let child_depth = *depth + 1;
                seen.insert(child);
                visitor.enter(child, child_depth);
                stack.push((child, child_depth, rows[child].iter()));
            }
            None => {
                let (node, depth) = (*node, *depth);
                stack.pop();
                visitor.exit(node, depth);
            }
        }
    }
}

#[cfg(test)]
mod tests;
