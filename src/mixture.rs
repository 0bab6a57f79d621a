// src/mixture.rs

use crate::config::Configuration;
use log::trace;
use ndarray::Array2;
use ndarray_rand::RandomExt;
use rand::Rng;
use rand_distr::Uniform;

/// Value written into sparsified weight positions. Kept above zero so no score
/// column is fully disconnected from the latents, which would make it constant.
pub const SPARSE_WEIGHT: f64 = 1e-6;

/// Per-participant values of the latent variables, uniform on `[0, 1)`.
#[derive(Debug, Clone)]
pub struct LatentMatrix {
    /// Shape: `(sample_size, num_latents)`
    pub data: Array2<f64>,
}

impl LatentMatrix {
    pub fn num_samples(&self) -> usize { self.data.nrows() }
    pub fn num_latents(&self) -> usize { self.data.ncols() }
}

/// Mixture weights mapping latents onto observed scores.
#[derive(Debug, Clone)]
pub struct WeightMatrix {
    /// Shape: `(num_latents, num_scores)`
    pub data: Array2<f64>,
}

impl WeightMatrix {
    pub fn num_latents(&self) -> usize { self.data.nrows() }
    pub fn num_scores(&self) -> usize { self.data.ncols() }

    /// Number of entries equal to `SPARSE_WEIGHT`.
    pub fn num_sparse_entries(&self) -> usize {
        self.data.iter().filter(|&&w| w == SPARSE_WEIGHT).count()
    }
}

/// Observed scores: `latents · weights`.
#[derive(Debug, Clone)]
pub struct ScoreMatrix {
    /// Shape: `(sample_size, num_scores)`
    pub data: Array2<f64>,
}

impl ScoreMatrix {
    pub fn num_samples(&self) -> usize { self.data.nrows() }
    pub fn num_scores(&self) -> usize { self.data.ncols() }
}

/// One synthetic dataset. Only `scores` feeds the dimension count; the other
/// matrices are kept for inspection.
#[derive(Debug, Clone)]
pub struct GeneratedDataset {
    pub scores: ScoreMatrix,
    pub latents: LatentMatrix,
    pub weights: WeightMatrix,
}

/// Number of weights forced to `SPARSE_WEIGHT`: `round(sparsity * num_latents * num_scores)`,
/// capped at the number of weights.
pub fn num_sparsified_weights(num_latents: usize, num_scores: usize, sparsity: f64) -> usize {
    let total = num_latents * num_scores;
    if sparsity <= 0.0 {
        return 0;
    }
    ((sparsity * total as f64).round() as usize).min(total)
}

/// Overwrites a uniformly chosen subset of weight positions, drawn without
/// replacement, with `SPARSE_WEIGHT`.
pub fn sparsify_weights<R: Rng + ?Sized>(weights: &mut WeightMatrix, sparsity: f64, rng: &mut R) {
    let num_scores = weights.num_scores();
    let total = weights.data.len();
    let amount = num_sparsified_weights(weights.num_latents(), num_scores, sparsity);
    if amount == 0 {
        return;
    }
    for flat_index in rand::seq::index::sample(rng, total, amount).into_iter() {
        weights.data[[flat_index / num_scores, flat_index % num_scores]] = SPARSE_WEIGHT;
    }
}

/// Latent-to-observed linear mixture generator for one configuration.
///
/// Holds only the model parameters. Every call to [`generate`](Self::generate)
/// draws fresh weights and fresh latents from the supplied random source.
#[derive(Debug, Clone, Copy)]
pub struct LinearMixtureModel {
    sample_size: usize,
    num_latents: usize,
    num_scores: usize,
    sparsity: f64,
}

impl LinearMixtureModel {
    pub fn new(config: &Configuration) -> Self {
        Self {
            sample_size: config.sample_size(),
            num_latents: config.num_latents(),
            num_scores: config.num_scores(),
            sparsity: config.sparsity(),
        }
    }

    /// Draws a weight matrix, sparsifies it, draws latents, and mixes them into scores.
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> GeneratedDataset {
        let unit = Uniform::new(0.0, 1.0);

        let mut weights = WeightMatrix {
            data: Array2::random_using((self.num_latents, self.num_scores), unit, rng),
        };
        if self.sparsity > 0.0 {
            sparsify_weights(&mut weights, self.sparsity, rng);
        }

        let latents = LatentMatrix {
            data: Array2::random_using((self.sample_size, self.num_latents), unit, rng),
        };

        let scores = ScoreMatrix {
            data: latents.data.dot(&weights.data),
        };
        trace!(
            "Generated dataset: {} samples, {} latents, {} scores, sparsity {}.",
            self.sample_size, self.num_latents, self.num_scores, self.sparsity
        );

        GeneratedDataset { scores, latents, weights }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn model(n: usize, l: usize, s: usize, sparsity: f64) -> LinearMixtureModel {
        LinearMixtureModel::new(&Configuration::new(n, l, s, sparsity, 1).unwrap())
    }

    #[test]
    fn shapes_match_configuration() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for &(n, l, s) in &[(2, 1, 1), (30, 4, 9), (12, 15, 3)] {
            let dataset = model(n, l, s, 0.3).generate(&mut rng);
            assert_eq!(dataset.scores.data.dim(), (n, s));
            assert_eq!(dataset.latents.data.dim(), (n, l));
            assert_eq!(dataset.weights.data.dim(), (l, s));
        }
    }

    #[test]
    fn no_sparse_entries_without_sparsity() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let dataset = model(20, 22, 22, 0.0).generate(&mut rng);
        assert_eq!(dataset.weights.num_sparse_entries(), 0);
        assert!(dataset.weights.data.iter().all(|&w| (0.0..1.0).contains(&w)));
    }

    #[test]
    fn exact_number_of_sparse_entries() {
        let mut rng = ChaCha8Rng::seed_from_u64(13);
        for &(l, s, sparsity) in &[(22, 22, 0.95), (1, 22, 0.95), (3, 7, 0.5), (4, 4, 1.0)] {
            let dataset = model(10, l, s, sparsity).generate(&mut rng);
            let expected = (sparsity * (l * s) as f64).round() as usize;
            assert_eq!(dataset.weights.num_sparse_entries(), expected);
            assert!(dataset
                .weights
                .data
                .iter()
                .filter(|&&w| w != SPARSE_WEIGHT)
                .all(|&w| (0.0..1.0).contains(&w)));
        }
    }

    #[test]
    fn scores_are_latents_times_weights() {
        let mut rng = ChaCha8Rng::seed_from_u64(17);
        let dataset = model(8, 3, 5, 0.4).generate(&mut rng);
        let expected = dataset.latents.data.dot(&dataset.weights.data);
        for (a, b) in dataset.scores.data.iter().zip(expected.iter()) {
            assert!((a - b).abs() < 1e-12);
        }
    }

    #[test]
    fn same_seed_gives_same_dataset_and_fresh_draws_differ() {
        let m = model(15, 4, 6, 0.5);
        let a = m.generate(&mut ChaCha8Rng::seed_from_u64(99));
        let b = m.generate(&mut ChaCha8Rng::seed_from_u64(99));
        assert_eq!(a.scores.data, b.scores.data);

        let mut rng = ChaCha8Rng::seed_from_u64(99);
        let first = m.generate(&mut rng);
        let second = m.generate(&mut rng);
        assert_ne!(first.weights.data, second.weights.data);
        assert_ne!(first.latents.data, second.latents.data);
    }

    #[test]
    fn sparsified_count_rounds_and_caps() {
        assert_eq!(num_sparsified_weights(22, 22, 0.0), 0);
        assert_eq!(num_sparsified_weights(22, 22, 0.95), 460);
        assert_eq!(num_sparsified_weights(1, 22, 0.95), 21);
        assert_eq!(num_sparsified_weights(3, 3, 1.0), 9);
    }
}
