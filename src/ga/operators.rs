//! Genetic operators for binary chromosomes.
//!
//! - [`two_point_crossover`]: exchanges the segment between two cut points
//! - [`flip_bit_mutation`]: flips each gene independently
//!
//! Selection comes from `u_metaheur::ga::Selection`.

use rand::Rng;

use super::chromosome::BitChromosome;

/// Two-point crossover.
///
/// Cut points `a < b` are drawn in `1..=len`; genes in `a..b` are swapped
/// between the children. Chromosomes shorter than two genes are copied.
pub fn two_point_crossover<R: Rng>(
    p1: &BitChromosome,
    p2: &BitChromosome,
    rng: &mut R,
) -> (BitChromosome, BitChromosome) {
    let mut c1 = BitChromosome::from_genes(p1.genes.clone());
    let mut c2 = BitChromosome::from_genes(p2.genes.clone());

    let size = p1.len().min(p2.len());
    if size < 2 {
        return (c1, c2);
    }

    let a = rng.random_range(1..=size);
    let mut b = rng.random_range(1..size);
    let (a, b) = if b >= a {
        b += 1;
        (a, b)
    } else {
        (b, a)
    };

    c1.genes[a..b].swap_with_slice(&mut c2.genes[a..b]);
    (c1, c2)
}

/// Flips each gene with probability `prob`.
pub fn flip_bit_mutation<R: Rng>(chromosome: &mut BitChromosome, prob: f64, rng: &mut R) {
    let prob = if prob.is_nan() { 0.0 } else { prob.clamp(0.0, 1.0) };
    for gene in &mut chromosome.genes {
        if rng.random_bool(prob) {
            *gene = !*gene;
        }
    }
    chromosome.invalidate();
}
