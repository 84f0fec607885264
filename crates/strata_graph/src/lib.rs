//! Strata Graph - reference graphs over small integer node ids.
//!
//! Built once per analysis pass from the `(source, target)` reference pairs
//! a parser extracts (which rule refers to which), then queried read-only:
//!
//! - **Structure**: top/bottom level nodes, orphans, edge enumeration
//! - **Reachability**: closures, reverse closures, recursion checks
//! - **Traversal**: depth-first walks with enter/exit callbacks
//! - **Paths**: exhaustive enumeration and breadth-first shortest paths
//! - **Ranking**: eigenvector centrality and PageRank
//! - **Persistence**: a compact versioned binary form
//!
//! [`StringGraph`] layers a sorted name table on top so callers can work
//! with rule names instead of ids.
//!
//! # Design
//!
//! - **Bits everywhere**: every adjacency row, closure and visited marker is
//!   a [`Bits`], so set algebra over closures is word-at-a-time.
//! - **Both directions stored**: outbound and inbound rows are kept as exact
//!   inverses, making reverse queries as cheap as forward ones.
//! - **Immutable**: no mutation after construction; graphs may be shared
//!   across threads for reading.

mod closure;
pub mod config;
mod error;
mod graph;
mod path;
mod rank;
mod serialize;
mod stack;
mod string_graph;
mod walk;

pub use config::{CentralityConfig, Norm, PageRankConfig, ScoreUpdate};
pub use error::GraphError;
pub use graph::{BitSetGraph, BitSetGraphBuilder};
pub use path::NodePath;
pub use serialize::GRAPH_FORMAT_VERSION;
pub use string_graph::{NameVisitor, StringGraph};
pub use walk::GraphVisitor;

pub use strata_bits::Bits;
