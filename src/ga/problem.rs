//! Squad selection GA problem.
//!
//! Implements `u_metaheur::ga::GaProblem` for squad selection. Scores binary
//! chromosomes with the same weighted objective the LP allocator minimizes,
//! plus an optional headcount penalty, and decodes the winner into a roster.

use rand::Rng;
use tracing::debug;
use u_metaheur::ga::GaProblem;

use crate::models::{AllocationResult, CandidatePool, SquadRequirement, WeightVector};

use super::chromosome::BitChromosome;
use super::operators::{flip_bit_mutation, two_point_crossover};

/// Fitness and decoding rules for one pool and requirement set.
#[derive(Debug, Clone)]
pub struct SquadGaProblem {
    pool: CandidatePool,
    requirements: Vec<SquadRequirement>,
    /// Per-gene objective coefficient.
    scores: Vec<f64>,
    /// Matching pool indices per requirement.
    matching: Vec<Vec<usize>>,
    shortfall_penalty: f64,
    flip_bit_prob: f64,
}

impl SquadGaProblem {
    /// Creates a problem. Pool attributes are used as stored.
    pub fn new(
        pool: CandidatePool,
        requirements: Vec<SquadRequirement>,
        weights: &WeightVector,
        shortfall_penalty: f64,
    ) -> Self {
        let scores = pool
            .iter()
            .map(|c| weights.score(c.project_count, c.allocated_hours, c.cost_per_hour))
            .collect();
        let matching = requirements
            .iter()
            .map(|r| pool.matching_indices(&r.role, &r.sector, &r.class))
            .collect();

        Self {
            pool,
            requirements,
            scores,
            matching,
            shortfall_penalty: shortfall_penalty.max(0.0),
            flip_bit_prob: 0.05,
        }
    }

    /// Sets the per-gene flip probability used by [`mutate`](GaProblem::mutate).
    pub fn with_flip_bit_prob(mut self, prob: f64) -> Self {
        self.flip_bit_prob = prob;
        self
    }

    /// Number of genes per chromosome.
    pub fn gene_count(&self) -> usize {
        self.pool.len()
    }

    /// Weighted objective of the selected collaborators.
    pub fn objective(&self, chromosome: &BitChromosome) -> f64 {
        chromosome
            .genes
            .iter()
            .zip(&self.scores)
            .filter(|(&g, _)| g)
            .map(|(_, s)| s)
            .sum()
    }

    /// Greedily turns a chromosome into a roster.
    ///
    /// Walks the pool in order and assigns each selected collaborator to the
    /// first requirement of the same role that still needs headcount. Stops
    /// once every requirement is filled. Also returns the unfilled headcount.
    pub fn roster(&self, chromosome: &BitChromosome) -> (AllocationResult, u32) {
        let mut remaining: Vec<u32> = self.requirements.iter().map(|r| r.headcount).collect();
        let mut result = AllocationResult::new();

        for (i, collaborator) in self.pool.iter().enumerate() {
            if remaining.iter().all(|&n| n == 0) {
                break;
            }
            if !chromosome.genes.get(i).copied().unwrap_or(false) {
                continue;
            }
            let slot = self
                .requirements
                .iter()
                .zip(&remaining)
                .position(|(req, &n)| n > 0 && req.role == collaborator.role);
            if let Some(slot) = slot {
                remaining[slot] -= 1;
                result.push(&collaborator.id, 1.0);
            }
        }

        (result, remaining.iter().sum())
    }
}

impl GaProblem for SquadGaProblem {
    type Individual = BitChromosome;

    fn create_individual<R: Rng>(&self, rng: &mut R) -> BitChromosome {
        BitChromosome::random(self.gene_count(), rng)
    }

    /// Objective plus `penalty × |selected − headcount|` summed over
    /// requirements.
    fn evaluate(&self, individual: &BitChromosome) -> f64 {
        let mismatch: f64 = self
            .requirements
            .iter()
            .zip(&self.matching)
            .map(|(req, indices)| {
                let selected = indices.iter().filter(|&&i| individual.genes[i]).count();
                (selected as f64 - f64::from(req.headcount)).abs()
            })
            .sum();

        self.objective(individual) + self.shortfall_penalty * mismatch
    }

    fn crossover<R: Rng>(
        &self,
        parent1: &BitChromosome,
        parent2: &BitChromosome,
        rng: &mut R,
    ) -> Vec<BitChromosome> {
        let (c1, c2) = two_point_crossover(parent1, parent2, rng);
        vec![c1, c2]
    }

    fn mutate<R: Rng>(&self, individual: &mut BitChromosome, rng: &mut R) {
        flip_bit_mutation(individual, self.flip_bit_prob, rng);
    }

    fn on_generation(&self, generation: usize, best_fitness: f64) {
        if generation % 10 == 0 {
            debug!(generation, best = best_fitness, "GA progress");
        }
    }
}
