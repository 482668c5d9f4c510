//! GA squad allocator.
//!
//! (μ+λ) evolution over binary chromosomes. Each generation produces λ
//! offspring (crossover, mutation or reproduction), then selects μ survivors
//! from parents and offspring by tournament. The best individual ever
//! evaluated is decoded into a roster.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing::debug;
use u_metaheur::ga::{GaProblem, Individual, Selection};

use super::chromosome::BitChromosome;
use super::problem::SquadGaProblem;
use crate::allocator::SquadAllocator;
use crate::config::GaConfig;
use crate::error::AllocationError;
use crate::models::{AllocationResult, CandidatePool, SquadRequirement, WeightVector};

/// Allocates squads by evolutionary search.
///
/// Fitness is minimized. Results are reproducible for a fixed seed.
#[derive(Debug, Clone)]
pub struct GaAllocator {
    pool: CandidatePool,
    requirements: Vec<SquadRequirement>,
    weights: WeightVector,
    config: GaConfig,
    result: AllocationResult,
    best_fitness: f64,
}

impl GaAllocator {
    /// Creates an allocator over `pool`.
    pub fn new(pool: CandidatePool, config: GaConfig) -> Self {
        Self {
            pool,
            requirements: Vec::new(),
            weights: WeightVector::default(),
            config,
            result: AllocationResult::new(),
            best_fitness: f64::INFINITY,
        }
    }

    /// Fitness of the best individual found by the last run.
    pub fn best_fitness(&self) -> f64 {
        self.best_fitness
    }

    /// Runs the evolution and returns the best chromosome.
    ///
    /// `GaRunner` replaces the whole population each generation, so the
    /// (μ+λ) survivor step is driven here.
    fn evolve(&self, problem: &SquadGaProblem) -> BitChromosome {
        let cfg = &self.config;
        let mut rng = SmallRng::seed_from_u64(cfg.seed);
        let selection = Selection::Tournament(cfg.tournament_size);
        let evaluate = |mut ch: BitChromosome| {
            ch.set_fitness(problem.evaluate(&ch));
            ch
        };

        let mut population: Vec<BitChromosome> = (0..cfg.population_size.max(1))
            .map(|_| evaluate(problem.create_individual(&mut rng)))
            .collect();
        let mut best = fittest(&population)
            .cloned()
            .unwrap_or_else(|| evaluate(BitChromosome::from_genes(vec![false; problem.gene_count()])));

        for generation in 0..cfg.generations {
            let offspring: Vec<BitChromosome> = (0..cfg.lambda())
                .map(|_| evaluate(self.vary(problem, &population, &mut rng)))
                .collect();

            if let Some(candidate) = fittest(&offspring) {
                if candidate.fitness < best.fitness {
                    best = candidate.clone();
                }
            }

            population.extend(offspring);
            population = (0..cfg.mu())
                .map(|_| population[selection.select(&population, &mut rng)].clone())
                .collect();

            problem.on_generation(generation, best.fitness);
        }

        best
    }

    /// Produces one offspring: crossover, mutation or plain reproduction.
    fn vary(
        &self,
        problem: &SquadGaProblem,
        population: &[BitChromosome],
        rng: &mut SmallRng,
    ) -> BitChromosome {
        let cfg = &self.config;
        let pick = |rng: &mut SmallRng| rng.random_range(0..population.len());
        let roll: f64 = rng.random();

        if roll < cfg.crossover_prob && population.len() >= 2 {
            let i = pick(rng);
            let mut j = pick(rng);
            while j == i {
                j = pick(rng);
            }
            problem
                .crossover(&population[i], &population[j], rng)
                .into_iter()
                .next()
                .unwrap_or_else(|| population[i].clone())
        } else if roll < cfg.crossover_prob + cfg.mutation_prob {
            let mut child = population[pick(rng)].clone();
            problem.mutate(&mut child, rng);
            child
        } else {
            population[pick(rng)].clone()
        }
    }
}

fn fittest(population: &[BitChromosome]) -> Option<&BitChromosome> {
    population.iter().min_by(|a, b| a.fitness.total_cmp(&b.fitness))
}

impl SquadAllocator for GaAllocator {
    fn add_requirement(&mut self, requirement: SquadRequirement) {
        self.requirements.push(requirement);
    }

    fn set_weights(&mut self, weights: WeightVector) {
        self.weights = weights;
    }

    /// Fails with [`AllocationError::Infeasible`] when the decoded roster
    /// leaves some requirement short.
    fn optimize(&mut self) -> Result<(), AllocationError> {
        let problem = SquadGaProblem::new(
            self.pool.clone(),
            self.requirements.clone(),
            &self.weights,
            self.config.shortfall_penalty,
        )
        .with_flip_bit_prob(self.config.flip_bit_prob);

        let best = self.evolve(&problem);
        let (roster, unfilled) = problem.roster(&best);
        debug!(
            fitness = best.fitness,
            selected = roster.len(),
            unfilled,
            "GA allocation complete"
        );

        self.best_fitness = best.fitness;
        if unfilled > 0 {
            return Err(AllocationError::Infeasible);
        }
        self.result = roster;
        Ok(())
    }

    fn allocation_results(&self) -> &AllocationResult {
        &self.result
    }
}
