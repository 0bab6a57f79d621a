// src/presets.rs

use crate::config::SweepGrid;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

pub const PRESET_SAMPLE_SIZE: usize = 300;
pub const PRESET_MAX_LATENTS: usize = 22;
pub const PRESET_REPLICATIONS: usize = 1000;

/// The two published analyses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
pub enum Preset {
    /// 22 scores, 1..=22 latents, sparsity 0 vs 0.95.
    SparsityComparison,
    /// 1..=22 latents, 40/60/80/100 scores, no sparsity.
    ScoreCountComparison,
}

impl Preset {
    /// The sweep axes of this preset. `num_replications` overrides the default of 1000.
    pub fn grid(self, num_replications: Option<usize>) -> SweepGrid {
        let num_replications = num_replications.unwrap_or(PRESET_REPLICATIONS);
        let num_latents_values: Vec<usize> = (1..=PRESET_MAX_LATENTS).collect();
        match self {
            Preset::SparsityComparison => SweepGrid {
                sample_sizes: vec![PRESET_SAMPLE_SIZE],
                num_latents_values,
                num_scores_values: vec![22],
                sparsity_values: vec![0.0, 0.95],
                num_replications,
            },
            Preset::ScoreCountComparison => SweepGrid {
                sample_sizes: vec![PRESET_SAMPLE_SIZE],
                num_latents_values,
                num_scores_values: vec![40, 60, 80, 100],
                sparsity_values: vec![0.0],
                num_replications,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sparsity_preset_axes() {
        let grid = Preset::SparsityComparison.grid(None);
        assert_eq!(grid.sample_sizes, vec![300]);
        assert_eq!(grid.num_latents_values.first(), Some(&1));
        assert_eq!(grid.num_latents_values.last(), Some(&22));
        assert_eq!(grid.num_scores_values, vec![22]);
        assert_eq!(grid.sparsity_values, vec![0.0, 0.95]);
        assert_eq!(grid.expected_rows(), 22 * 2 * 1000);
    }

    #[test]
    fn score_count_preset_axes_with_override() {
        let grid = Preset::ScoreCountComparison.grid(Some(10));
        assert_eq!(grid.num_scores_values, vec![40, 60, 80, 100]);
        assert_eq!(grid.sparsity_values, vec![0.0]);
        assert_eq!(grid.num_configurations(), 22 * 4);
        assert_eq!(grid.expected_rows(), 22 * 4 * 10);
        assert!(grid.configurations().is_ok());
    }
}
