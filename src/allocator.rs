//! Allocator abstraction.
//!
//! Both the LP and the GA allocator expose the same capability set so the
//! orchestrator can drive either one, selected by [`AllocationStrategy`].

use crate::config::{AllocationStrategy, AllocatorConfig};
use crate::error::AllocationError;
use crate::ga::GaAllocator;
use crate::lp::{LpAllocator, LpMode};
use crate::models::{AllocationResult, CandidatePool, SquadRequirement, WeightVector};

/// A squad allocator bound to one candidate pool.
///
/// Requirements and weights are held for the lifetime of the instance.
pub trait SquadAllocator {
    /// Appends a demand line. No validation is performed.
    fn add_requirement(&mut self, requirement: SquadRequirement);

    /// Replaces the active weights wholesale.
    fn set_weights(&mut self, weights: WeightVector);

    /// Runs the optimization.
    ///
    /// On failure no result is produced and the previous one is kept.
    fn optimize(&mut self) -> Result<(), AllocationError>;

    /// Result of the last successful [`optimize`](Self::optimize).
    fn allocation_results(&self) -> &AllocationResult;
}

/// Builds the allocator selected by `config` over `pool`.
pub fn build_allocator(pool: CandidatePool, config: &AllocatorConfig) -> Box<dyn SquadAllocator> {
    match config.strategy {
        AllocationStrategy::RelaxedLp => Box::new(
            LpAllocator::new(pool)
                .with_mode(LpMode::Relaxed)
                .with_timeout_ms(config.solver.timeout_ms),
        ),
        AllocationStrategy::IntegerLp => Box::new(
            LpAllocator::new(pool)
                .with_mode(LpMode::Integer)
                .with_timeout_ms(config.solver.timeout_ms),
        ),
        AllocationStrategy::Genetic => Box::new(GaAllocator::new(pool, config.ga.clone())),
    }
}
