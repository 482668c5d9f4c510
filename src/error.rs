//! Allocation errors.
//!
//! Every variant is scoped to a single optimizer call. None of them aborts a
//! recommendation batch: the orchestrator retries with fallback ceilings and
//! then skips the round.

use thiserror::Error;

/// Failure of one `optimize()` call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AllocationError {
    /// No assignment satisfies the constraints.
    #[error("allocation problem is infeasible")]
    Infeasible,

    /// The objective is unbounded under the constraints.
    #[error("allocation problem is unbounded")]
    Unbounded,

    /// The solver failed for numerical or internal reasons.
    #[error("solver error: {0}")]
    SolverNumerical(String),

    /// No candidate matches a requirement that asks for headcount.
    #[error("no candidate matches role '{role}', sector '{sector}', class '{class}'")]
    EmptyPool {
        role: String,
        sector: String,
        class: String,
    },

    /// The solver did not finish in time.
    #[error("solver timed out after {0} ms")]
    Timeout(u64),
}

impl AllocationError {
    /// Whether the failure means no feasible assignment exists.
    ///
    /// Timeouts and numerical failures are treated the same way by callers,
    /// but are not proofs of infeasibility.
    pub fn is_infeasible(&self) -> bool {
        matches!(self, Self::Infeasible | Self::EmptyPool { .. })
    }
}
