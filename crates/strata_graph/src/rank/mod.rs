//! Centrality and ranking by power iteration.
//!
//! Scores are `Vec<f64>` indexed by node id. Both algorithms stop at
//! `max_iterations` or as soon as the total absolute change across all
//! nodes in one iteration drops below the configured threshold.
//!
//! # PageRank
//! ```text
//! PR(v) = (1-d)/N + d * Σ PR(u) / outdegree(u)     (u -> v)
//!                 [+ d * Σ PR(w) / N               (w without outbound edges, when normalizing)]
//! ```
//!
//! Under [`ScoreUpdate::Monotonic`] a node keeps its old score whenever the
//! new one would be lower; the rescaling done by `normalize` is the only
//! thing that pulls scores down. [`ScoreUpdate::Standard`] is the textbook
//! replacement update.

use strata_bits::Bits;
use tracing::trace;

use crate::config::{CentralityConfig, Norm, PageRankConfig, ScoreUpdate};
use crate::BitSetGraph;

#[expect(
    clippy::cast_precision_loss,
    reason = "node counts are far below 2^52"
)]
fn as_f64(count: usize) -> f64 {
    count as f64
}

fn total_change(old: &[f64], new: &[f64]) -> f64 {
    old.iter().zip(new).map(|(a, b)| (a - b).abs()).sum()
}

impl BitSetGraph {
    /// Eigenvector centrality of every node.
    ///
    /// Each iteration sets a node's score to the sum of its neighbors'
    /// current scores (inbound or outbound neighbors per the config), then
    /// rescales the whole vector by its L1 or L2 norm. If the sums vanish
    /// entirely (an acyclic graph drains all score), the last non-zero
    /// vector is returned.
    #[tracing::instrument(level = "debug", skip_all, fields(nodes = self.len()))]
    pub fn eigenvector_centrality(&self, config: &CentralityConfig) -> Vec<f64> {
        let n = self.len();
        if n == 0 {
            return Vec::new();
        }
        let rows = if config.use_inbound_edges {
            &self.inbound
        } else {
            &self.outbound
        };

        let mut scores = vec![1.0 / as_f64(n); n];
        for iteration in 0..config.max_iterations {
            let mut next: Vec<f64> = rows
                .iter()
                .enumerate()
                .map(|(node, row)| {
                    let sum = row.weighted_sum(&scores);
                    if config.ignore_self_edges && row.contains(node) {
                        sum - scores[node]
                    } else {
                        sum
                    }
                })
                .collect();

            let norm = match config.norm {
                Norm::L1 => next.iter().sum::<f64>(),
                Norm::L2 => next.iter().map(|v| v * v).sum::<f64>().sqrt(),
            };
            if norm <= 0.0 {
                trace!(iteration, "centrality scores vanished");
                break;
            }
            next.iter_mut().for_each(|v| *v /= norm);

            let diff = total_change(&scores, &next);
            scores = next;
            trace!(iteration, diff, "centrality iteration");
            if diff < config.min_diff {
                break;
            }
        }
        scores
    }

    /// PageRank of every node.
    #[tracing::instrument(level = "debug", skip_all, fields(nodes = self.len()))]
    pub fn page_rank(&self, config: &PageRankConfig) -> Vec<f64> {
        let n = self.len();
        if n == 0 {
            return Vec::new();
        }
        let count = as_f64(n);
        let damping = config.damping_factor;
        let out_degree: Vec<f64> = self.outbound.iter().map(|row| as_f64(row.len())).collect();
        let dangling: Bits = (0..n).filter(|&node| self.outbound[node].is_empty()).collect();

        let mut scores = vec![1.0 / count; n];
        for iteration in 0..config.max_iterations {
            let dangling_mass = if config.normalize {
                dangling.weighted_sum(&scores)
            } else {
                0.0
            };
            let base = (1.0 - damping) / count + damping * dangling_mass / count;

            let mut next: Vec<f64> = self
                .inbound
                .iter()
                .enumerate()
                .map(|(node, sources)| {
                    let inflow: f64 = sources
                        .iter()
                        .map(|source| scores[source] / out_degree[source])
                        .sum();
                    let rank = base + damping * inflow;
                    match config.update {
                        ScoreUpdate::Monotonic => rank.max(scores[node]),
                        ScoreUpdate::Standard => rank,
                    }
                })
                .collect();

            if config.normalize {
                let total: f64 = next.iter().sum();
                if total > 0.0 {
                    next.iter_mut().for_each(|v| *v /= total);
                }
            }

            let diff = total_change(&scores, &next);
            scores = next;
            trace!(iteration, diff, "page rank iteration");
            if diff < config.min_difference {
                break;
            }
        }
        scores
    }
}
