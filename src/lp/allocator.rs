//! LP squad allocator.

use std::collections::HashMap;

use tracing::debug;

use super::formulation::LpFormulation;
use super::solver::{solve, LpMode};
use crate::allocator::SquadAllocator;
use crate::error::AllocationError;
use crate::models::{AllocationResult, CandidatePool, SquadRequirement, WeightVector};

/// Allocates squads by solving the allocation LP over one pool.
///
/// # Example
/// ```
/// use u_squad::allocator::SquadAllocator;
/// use u_squad::lp::LpAllocator;
/// use u_squad::models::{CandidatePool, Collaborator, SquadRequirement};
///
/// let pool = CandidatePool::new(vec![
///     Collaborator::new("C1", "Dev", "Data", "Senior").with_cost(1.0),
///     Collaborator::new("C2", "Dev", "Data", "Senior").with_cost(0.5),
/// ]);
/// let mut allocator = LpAllocator::new(pool);
/// allocator.add_requirement(
///     SquadRequirement::new("Dev", "Data", "Senior", 1).with_ceilings(40.0, 3.0, 100.0),
/// );
/// allocator.optimize().unwrap();
/// assert!(allocator.allocation_results().contains("C2"));
/// ```
#[derive(Debug, Clone)]
pub struct LpAllocator {
    pool: CandidatePool,
    requirements: Vec<SquadRequirement>,
    weights: WeightVector,
    mode: LpMode,
    timeout_ms: Option<u64>,
    result: AllocationResult,
    hire_required: HashMap<String, bool>,
}

impl LpAllocator {
    /// Creates an allocator over `pool` with unit weights and no timeout.
    pub fn new(pool: CandidatePool) -> Self {
        Self {
            pool,
            requirements: Vec::new(),
            weights: WeightVector::default(),
            mode: LpMode::Relaxed,
            timeout_ms: None,
            result: AllocationResult::new(),
            hire_required: HashMap::new(),
        }
    }

    /// Sets the variable domain.
    pub fn with_mode(mut self, mode: LpMode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the per-solve timeout.
    pub fn with_timeout_ms(mut self, timeout_ms: Option<u64>) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Registered requirements.
    pub fn requirements(&self) -> &[SquadRequirement] {
        &self.requirements
    }

    /// Active weights.
    pub fn weights(&self) -> &WeightVector {
        &self.weights
    }

    /// Whether the pool lacks enough matching candidates for some
    /// requirement of `role`. Known after [`optimize`](SquadAllocator::optimize).
    pub fn is_hire_required(&self, role: &str) -> bool {
        self.hire_required.get(role).copied().unwrap_or(false)
    }

    fn update_hire_required(&mut self) {
        self.hire_required.clear();
        for req in &self.requirements {
            let available = self
                .pool
                .matching_indices(&req.role, &req.sector, &req.class)
                .len();
            let short = available < req.headcount as usize;
            *self.hire_required.entry(req.role.clone()).or_insert(false) |= short;
        }
    }
}

impl SquadAllocator for LpAllocator {
    fn add_requirement(&mut self, requirement: SquadRequirement) {
        self.requirements.push(requirement);
    }

    fn set_weights(&mut self, weights: WeightVector) {
        self.weights = weights;
    }

    fn optimize(&mut self) -> Result<(), AllocationError> {
        self.update_hire_required();

        let formulation = LpFormulation::build(&self.pool, &self.requirements, &self.weights)?;
        let values = solve(&formulation, self.mode, self.timeout_ms)?;

        let mut result = AllocationResult::new();
        for (collaborator, &x) in self.pool.iter().zip(&values) {
            if x > 0.0 {
                result.push(&collaborator.id, x);
            }
        }
        debug!(
            selected = result.len(),
            pool = self.pool.len(),
            "LP allocation complete"
        );

        self.result = result;
        Ok(())
    }

    fn allocation_results(&self) -> &AllocationResult {
        &self.result
    }
}
