//! Binary inclusion chromosome.
//!
//! One gene per pool index; a set gene means the collaborator at that index
//! is part of the candidate squad.

use rand::Rng;
use u_metaheur::ga::Individual;

/// Binary chromosome for squad selection.
///
/// Lower fitness = better squad (minimization convention).
#[derive(Debug, Clone, PartialEq)]
pub struct BitChromosome {
    /// Inclusion flag per pool index.
    pub genes: Vec<bool>,
    /// Fitness value (lower = better). `INFINITY` until evaluated.
    pub fitness: f64,
}

impl Individual for BitChromosome {
    type Fitness = f64;

    fn fitness(&self) -> f64 {
        self.fitness
    }

    fn set_fitness(&mut self, fitness: f64) {
        self.fitness = fitness;
    }
}

impl BitChromosome {
    /// Creates a chromosome with uniformly random genes.
    pub fn random<R: Rng>(len: usize, rng: &mut R) -> Self {
        Self::from_genes((0..len).map(|_| rng.random_bool(0.5)).collect())
    }

    /// Creates an unevaluated chromosome from genes.
    pub fn from_genes(genes: Vec<bool>) -> Self {
        Self {
            genes,
            fitness: f64::INFINITY,
        }
    }

    /// Number of genes.
    pub fn len(&self) -> usize {
        self.genes.len()
    }

    /// Whether the chromosome has no genes.
    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    /// Number of set genes.
    pub fn count_ones(&self) -> usize {
        self.genes.iter().filter(|&&g| g).count()
    }

    /// Pool indices of set genes, ascending.
    pub fn selected_indices(&self) -> Vec<usize> {
        self.genes
            .iter()
            .enumerate()
            .filter(|(_, &g)| g)
            .map(|(i, _)| i)
            .collect()
    }

    /// Marks the chromosome as needing re-evaluation.
    pub fn invalidate(&mut self) {
        self.fitness = f64::INFINITY;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_random_length() {
        let mut rng = SmallRng::seed_from_u64(42);
        let ch = BitChromosome::random(17, &mut rng);
        assert_eq!(ch.len(), 17);
        assert!(ch.fitness.is_infinite());
    }

    #[test]
    fn test_random_is_seeded() {
        let a = BitChromosome::random(32, &mut SmallRng::seed_from_u64(7));
        let b = BitChromosome::random(32, &mut SmallRng::seed_from_u64(7));
        assert_eq!(a.genes, b.genes);
    }

    #[test]
    fn test_individual_fitness() {
        let mut ch = BitChromosome::from_genes(vec![true, false]);
        assert_eq!(Individual::fitness(&ch), f64::INFINITY);
        ch.set_fitness(2.5);
        assert_eq!(Individual::fitness(&ch), 2.5);

        ch.invalidate();
        assert!(ch.fitness.is_infinite());
    }

    #[test]
    fn test_selected_indices() {
        let ch = BitChromosome::from_genes(vec![false, true, true, false, true]);
        assert_eq!(ch.count_ones(), 3);
        assert_eq!(ch.selected_indices(), vec![1, 2, 4]);
        assert!(!ch.is_empty());
    }
}
