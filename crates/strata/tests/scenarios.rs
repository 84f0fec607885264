// Test code uses unwrap/expect for clarity - panics provide good test failure messages
#![allow(clippy::unwrap_used, clippy::expect_used)]

//! End-to-end scenarios across the region index and the reference graph.
//!
//! # Organization
//!
//! - `regions` - building and querying region sets
//! - `graph` - closures, levels and ranking on reference graphs
//! - `pipeline` - a parse-shaped pass feeding both structures
//!
//! # Running
//!
//! ```bash
//! cargo test -p strata --test scenarios
//! RUST_LOG=strata_regions=debug cargo test -p strata --test scenarios pipeline
//! ```

#[path = "scenarios/regions.rs"]
mod regions;

#[path = "scenarios/graph.rs"]
mod graph;

#[path = "scenarios/pipeline.rs"]
mod pipeline;
