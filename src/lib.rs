// Simulation of PCA dimensionality under-estimation for impure measures

#![doc = include_str!("../README.md")]

pub mod aggregate;
pub mod config;
pub mod dimensions;
pub mod error;
pub mod linalg_backends;
pub mod mixture;
pub mod output;
pub mod pca;
pub mod presets;
pub mod sweep;
pub mod trial;

pub use aggregate::{summarize, CriterionSummary, GroupKey, GroupSummary, SparsityBand};
pub use config::{Configuration, SimulationConfig, SweepGrid, ZeroVariancePolicy};
pub use dimensions::{DimensionCounter, DimensionCounts, RetentionCriterion};
pub use error::{ConfigError, SimulationError, ThreadSafeStdError};
pub use mixture::{GeneratedDataset, LatentMatrix, LinearMixtureModel, ScoreMatrix, WeightMatrix};
pub use presets::Preset;
pub use sweep::{ConfigurationFailure, ResultsTable, SweepEngine, SweepOutcome};
pub use trial::{ReplicationResult, TrialRunner};
