//! Strata - region indexing and reference analysis for incremental parsers.
//!
//! One entry point over the workspace crates:
//!
//! - [`strata_bits`]: packed bit sets ([`Bits`])
//! - [`strata_graph`]: reference graphs ([`BitSetGraph`], [`StringGraph`])
//! - [`strata_regions`]: nested region index ([`SemanticRegions`]) and
//!   cross-referencing ([`cross_reference`])
//!
//! A typical analysis pass rebuilds both structures from a fresh parse:
//!
//! ```
//! use strata::{SemanticRegions, StringGraph};
//!
//! let mut builder = SemanticRegions::builder();
//! builder.add("expr", 0, 12).unwrap().add("term", 4, 9).unwrap();
//! let regions = builder.build();
//! assert_eq!(regions.key_at(5), Some(&"term"));
//!
//! let graph = StringGraph::from_edges(["expr", "term"], [("expr", "term"), ("term", "expr")]).unwrap();
//! assert!(graph.is_recursive("expr"));
//! ```

use std::sync::Once;

pub use strata_bits::{strict_invariants, Bits};
pub use strata_graph::{
    config, BitSetGraph, BitSetGraphBuilder, CentralityConfig, GraphError, GraphVisitor,
    NameVisitor, NodePath, Norm, PageRankConfig, ScoreUpdate, StringGraph, GRAPH_FORMAT_VERSION,
};
pub use strata_regions::{
    cross_reference, Children, ContainmentGraph, IndexAddressable, IndexAddressableItem, Outermost,
    PriorRegion, RegionDifferences, RegionError, RegionIndex, Regions, SemanticRegion,
    SemanticRegions, SemanticRegionsBuilder,
};

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Call this once at startup. Safe to call multiple times.
/// Enable with `RUST_LOG=strata_graph=debug` or `RUST_LOG=strata_regions=trace`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        // Only initialize if RUST_LOG is set
        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}
