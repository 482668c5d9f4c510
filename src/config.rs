//! Allocation configuration.
//!
//! All structs deserialize with defaults for missing fields, so a caller can
//! load a partial JSON or TOML document and get a complete configuration.
//!
//! # Example
//!
//! ```
//! use u_squad::config::{AllocatorConfig, AllocationStrategy};
//!
//! let config = AllocatorConfig::default()
//!     .with_strategy(AllocationStrategy::IntegerLp)
//!     .with_timeout_ms(Some(2_000));
//! assert_eq!(config.strategy, AllocationStrategy::IntegerLp);
//! ```

use serde::{Deserialize, Serialize};

use crate::models::FallbackCeilings;

/// Which allocator the orchestrator builds for each round.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllocationStrategy {
    /// Continuous relaxation; any variable > 0 counts as selected.
    #[default]
    RelaxedLp,
    /// Same formulation with 0/1 integer variables.
    IntegerLp,
    /// Evolutionary search over binary chromosomes.
    Genetic,
}

/// LP solver settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Wall-clock limit per solve (ms). `None` = unbounded.
    pub timeout_ms: Option<u64>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            timeout_ms: Some(10_000),
        }
    }
}

/// Genetic allocator settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GaConfig {
    /// Initial population size (default: 50).
    pub population_size: usize,
    /// Number of generations (default: 50).
    pub generations: usize,
    /// Probability that an offspring is produced by crossover (default: 0.7).
    pub crossover_prob: f64,
    /// Probability that an offspring is produced by mutation (default: 0.2).
    pub mutation_prob: f64,
    /// Per-gene flip probability during mutation (default: 0.05).
    pub flip_bit_prob: f64,
    /// Tournament size for selection (default: 3).
    pub tournament_size: usize,
    /// Random seed (default: 42).
    pub seed: u64,
    /// Penalty per head of difference between selected and required
    /// matching collaborators (default: 10.0). Zero scores the bare objective.
    pub shortfall_penalty: f64,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 50,
            generations: 50,
            crossover_prob: 0.7,
            mutation_prob: 0.2,
            flip_bit_prob: 0.05,
            tournament_size: 3,
            seed: 42,
            shortfall_penalty: 10.0,
        }
    }
}

impl GaConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, size: usize) -> Self {
        self.population_size = size;
        self
    }

    /// Sets the generation count.
    pub fn with_generations(mut self, generations: usize) -> Self {
        self.generations = generations;
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Sets the headcount penalty.
    pub fn with_shortfall_penalty(mut self, penalty: f64) -> Self {
        self.shortfall_penalty = penalty.max(0.0);
        self
    }

    /// Parent count μ kept each generation.
    pub fn mu(&self) -> usize {
        (self.population_size / 2).max(1)
    }

    /// Offspring count λ produced each generation.
    pub fn lambda(&self) -> usize {
        (self.population_size / 2).max(1)
    }
}

/// Top-level configuration of a recommendation run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AllocatorConfig {
    /// Allocator strategy.
    pub strategy: AllocationStrategy,
    /// LP solver settings.
    pub solver: SolverConfig,
    /// GA settings (used by [`AllocationStrategy::Genetic`]).
    pub ga: GaConfig,
    /// Ceilings for the retry after a failed solve.
    pub fallback: FallbackCeilings,
}

impl AllocatorConfig {
    /// Sets the strategy.
    pub fn with_strategy(mut self, strategy: AllocationStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Sets the per-solve timeout.
    pub fn with_timeout_ms(mut self, timeout_ms: Option<u64>) -> Self {
        self.solver.timeout_ms = timeout_ms;
        self
    }

    /// Sets the GA settings.
    pub fn with_ga(mut self, ga: GaConfig) -> Self {
        self.ga = ga;
        self
    }

    /// Sets the fallback ceilings.
    pub fn with_fallback(mut self, fallback: FallbackCeilings) -> Self {
        self.fallback = fallback;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AllocatorConfig::default();
        assert_eq!(config.strategy, AllocationStrategy::RelaxedLp);
        assert_eq!(config.solver.timeout_ms, Some(10_000));
        assert_eq!(config.ga.population_size, 50);
        assert_eq!(config.ga.tournament_size, 3);
        assert_eq!(config.ga.mu(), 25);
        assert!((config.fallback.hours - 120.0).abs() < 1e-10);
    }

    #[test]
    fn test_partial_json() {
        let json = r#"{ "strategy": "genetic", "ga": { "generations": 5 } }"#;
        let config: AllocatorConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.strategy, AllocationStrategy::Genetic);
        assert_eq!(config.ga.generations, 5);
        assert_eq!(config.ga.population_size, 50);
        assert!((config.fallback.cost - 300.0).abs() < 1e-10);
    }

    #[test]
    fn test_tiny_population_keeps_one_parent() {
        let ga = GaConfig::default().with_population_size(1);
        assert_eq!(ga.mu(), 1);
        assert_eq!(ga.lambda(), 1);
    }
}
