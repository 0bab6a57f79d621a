// src/aggregate.rs

use crate::sweep::ResultsTable;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Sparsity values below this are grouped as dense, the rest as sparse.
pub const SPARSITY_SPLIT: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SparsityBand {
    Dense,
    Sparse,
}

impl SparsityBand {
    pub fn of(sparsity: f64) -> Self {
        if sparsity < SPARSITY_SPLIT {
            SparsityBand::Dense
        } else {
            SparsityBand::Sparse
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GroupKey {
    pub num_latents: usize,
    pub num_scores: usize,
    pub sparsity_band: SparsityBand,
}

/// Mean and sample standard deviation of one criterion's counts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CriterionSummary {
    pub mean: f64,
    /// `ddof = 1`; zero for a single observation.
    pub std_dev: f64,
}

impl CriterionSummary {
    fn from_counts(counts: &[usize]) -> Self {
        let n = counts.len() as f64;
        let mean = counts.iter().map(|&c| c as f64).sum::<f64>() / n;
        let std_dev = if counts.len() > 1 {
            let sum_sq: f64 = counts.iter().map(|&c| (c as f64 - mean).powi(2)).sum();
            (sum_sq / (n - 1.0)).sqrt()
        } else {
            0.0
        };
        Self { mean, std_dev }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GroupSummary {
    pub key: GroupKey,
    pub num_rows: usize,
    pub joliffe: CriterionSummary,
    pub kaiser: CriterionSummary,
}

/// Flat record form of `GroupSummary`, for tabular output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SummaryRecord {
    pub num_latents: usize,
    pub num_scores: usize,
    pub sparsity_band: SparsityBand,
    pub num_rows: usize,
    pub joliffe_mean: f64,
    pub joliffe_std: f64,
    pub kaiser_mean: f64,
    pub kaiser_std: f64,
}

impl From<&GroupSummary> for SummaryRecord {
    fn from(summary: &GroupSummary) -> Self {
        Self {
            num_latents: summary.key.num_latents,
            num_scores: summary.key.num_scores,
            sparsity_band: summary.key.sparsity_band,
            num_rows: summary.num_rows,
            joliffe_mean: summary.joliffe.mean,
            joliffe_std: summary.joliffe.std_dev,
            kaiser_mean: summary.kaiser.mean,
            kaiser_std: summary.kaiser.std_dev,
        }
    }
}

/// Groups rows by (num_latents, num_scores, sparsity band) and summarizes both
/// criteria per group. Groups are returned in key order.
pub fn summarize(table: &ResultsTable) -> Vec<GroupSummary> {
    let mut groups: BTreeMap<GroupKey, (Vec<usize>, Vec<usize>)> = BTreeMap::new();
    for row in table {
        let key = GroupKey {
            num_latents: row.num_latents,
            num_scores: row.num_scores,
            sparsity_band: SparsityBand::of(row.sparsity),
        };
        let (joliffe, kaiser) = groups.entry(key).or_default();
        joliffe.push(row.dims_joliffe);
        kaiser.push(row.dims_kaiser);
    }

    groups
        .into_iter()
        .map(|(key, (joliffe, kaiser))| GroupSummary {
            key,
            num_rows: joliffe.len(),
            joliffe: CriterionSummary::from_counts(&joliffe),
            kaiser: CriterionSummary::from_counts(&kaiser),
        })
        .collect()
}

/// Looks up the summary for one group.
pub fn find_group(summaries: &[GroupSummary], key: GroupKey) -> Option<&GroupSummary> {
    summaries.iter().find(|s| s.key == key)
}
