//! Tuning knobs for the ranking algorithms.
//!
//! Both configs are plain `Copy` structs with sensible defaults; callers
//! override individual fields with the `with_*` builders.

/// Default iteration cap for eigenvector centrality.
pub const CENTRALITY_MAX_ITERATIONS: usize = 200;

/// Default iteration cap for PageRank.
pub const PAGE_RANK_MAX_ITERATIONS: usize = 1000;

/// Default convergence threshold: total absolute score change per iteration.
pub const MIN_DIFFERENCE: f64 = 1e-7;

/// Default PageRank damping factor.
pub const DAMPING_FACTOR: f64 = 0.85;

/// Vector norm used to rescale centrality scores each iteration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Norm {
    /// Divide by the sum of scores.
    L1,
    /// Divide by the Euclidean length of the score vector.
    #[default]
    L2,
}

/// Configuration for [`BitSetGraph::eigenvector_centrality`](crate::BitSetGraph::eigenvector_centrality).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CentralityConfig {
    /// Upper bound on power iterations.
    pub max_iterations: usize,
    /// Stop once the total absolute change across all nodes drops below this.
    pub min_diff: f64,
    /// Score a node by the nodes referencing it (`true`) or by the nodes it
    /// references (`false`).
    pub use_inbound_edges: bool,
    /// Leave a node's own score out of its sum when it references itself.
    pub ignore_self_edges: bool,
    /// Normalization applied after every iteration.
    pub norm: Norm,
}

impl Default for CentralityConfig {
    fn default() -> Self {
        Self {
            max_iterations: CENTRALITY_MAX_ITERATIONS,
            min_diff: MIN_DIFFERENCE,
            use_inbound_edges: true,
            ignore_self_edges: true,
            norm: Norm::L2,
        }
    }
}

impl CentralityConfig {
    #[must_use]
    pub fn with_max_iterations(self, max_iterations: usize) -> Self {
        Self {
            max_iterations,
            ..self
        }
    }

    #[must_use]
    pub fn with_min_diff(self, min_diff: f64) -> Self {
        Self { min_diff, ..self }
    }

    #[must_use]
    pub fn with_inbound_edges(self, use_inbound_edges: bool) -> Self {
        Self {
            use_inbound_edges,
            ..self
        }
    }

    #[must_use]
    pub fn with_self_edges_ignored(self, ignore_self_edges: bool) -> Self {
        Self {
            ignore_self_edges,
            ..self
        }
    }

    #[must_use]
    pub fn with_norm(self, norm: Norm) -> Self {
        Self { norm, ..self }
    }
}

/// How a PageRank iteration applies a freshly computed score.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum ScoreUpdate {
    /// Keep the larger of the old and new score, so scores never fall
    /// during the iteration. Rescaling under `normalize` still applies.
    #[default]
    Monotonic,
    /// Replace the old score outright (textbook power iteration).
    Standard,
}

/// Configuration for [`BitSetGraph::page_rank`](crate::BitSetGraph::page_rank).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PageRankConfig {
    /// Stop once the total absolute change across all nodes drops below this.
    pub min_difference: f64,
    /// Probability of following an edge rather than jumping to a random node.
    pub damping_factor: f64,
    /// Upper bound on power iterations.
    pub max_iterations: usize,
    /// Redistribute the score of nodes without outbound edges over every
    /// node, and rescale scores to sum to one after each iteration.
    pub normalize: bool,
    /// Score update rule.
    pub update: ScoreUpdate,
}

impl Default for PageRankConfig {
    fn default() -> Self {
        Self {
            min_difference: MIN_DIFFERENCE,
            damping_factor: DAMPING_FACTOR,
            max_iterations: PAGE_RANK_MAX_ITERATIONS,
            normalize: true,
            update: ScoreUpdate::Monotonic,
        }
    }
}

impl PageRankConfig {
    #[must_use]
    pub fn with_min_difference(self, min_difference: f64) -> Self {
        Self {
            min_difference,
            ..self
        }
    }

    #[must_use]
    pub fn with_damping_factor(self, damping_factor: f64) -> Self {
        Self {
            damping_factor,
            ..self
        }
    }

    #[must_use]
    pub fn with_max_iterations(self, max_iterations: usize) -> Self {
        Self {
            max_iterations,
            ..self
        }
    }

    #[must_use]
    pub fn with_normalize(self, normalize: bool) -> Self {
        Self { normalize, ..self }
    }

    #[must_use]
    pub fn with_update(self, update: ScoreUpdate) -> Self {
        Self { update, ..self }
    }
}
