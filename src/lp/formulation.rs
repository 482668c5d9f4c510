//! Linear program formulation of squad allocation.
//!
//! One decision variable per pool index, boxed to [0, 1]. For each
//! requirement r with matching indices I_r:
//!
//! - one equality row: `Σ_{i ∈ I_r} x_i = headcount`
//! - three rows per matching collaborator, for each ceiling b in
//!   (projects, cost, hours): `b · x_i ≤ b`
//!
//! The objective minimizes `Σ x_i · (w_p · projects_i + w_h · hours_i + w_c · cost_i)`
//! over the attributes as stored in the pool (callers normalize beforehand).

use crate::error::AllocationError;
use crate::models::{CandidatePool, SquadRequirement, WeightVector};

/// A sparse linear row: `Σ coef · x_var  (=|≤)  rhs`.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearRow {
    /// (variable index, coefficient) pairs.
    pub terms: Vec<(usize, f64)>,
    /// Right-hand side.
    pub rhs: f64,
}

/// Solver-independent allocation LP.
#[derive(Debug, Clone, PartialEq)]
pub struct LpFormulation {
    /// Objective coefficient per variable (minimized).
    pub objective: Vec<f64>,
    /// Equality rows.
    pub equalities: Vec<LinearRow>,
    /// Upper-bound inequality rows.
    pub inequalities: Vec<LinearRow>,
}

impl LpFormulation {
    /// Builds the formulation for `requirements` over `pool`.
    ///
    /// # Errors
    /// [`AllocationError::EmptyPool`] when a requirement with positive
    /// headcount matches no collaborator.
    pub fn build(
        pool: &CandidatePool,
        requirements: &[SquadRequirement],
        weights: &WeightVector,
    ) -> Result<Self, AllocationError> {
        let objective = pool
            .iter()
            .map(|c| weights.score(c.project_count, c.allocated_hours, c.cost_per_hour))
            .collect();

        let mut equalities = Vec::with_capacity(requirements.len());
        let mut inequalities = Vec::new();

        for req in requirements {
            let indices = pool.matching_indices(&req.role, &req.sector, &req.class);
            if indices.is_empty() {
                if req.headcount > 0 {
                    return Err(AllocationError::EmptyPool {
                        role: req.role.clone(),
                        sector: req.sector.clone(),
                        class: req.class.clone(),
                    });
                }
                continue;
            }

            equalities.push(LinearRow {
                terms: indices.iter().map(|&i| (i, 1.0)).collect(),
                rhs: f64::from(req.headcount),
            });

            for &i in &indices {
                for bound in [req.max_projects, req.max_cost, req.max_hours] {
                    inequalities.push(LinearRow {
                        terms: vec![(i, bound)],
                        rhs: bound,
                    });
                }
            }
        }

        Ok(Self {
            objective,
            equalities,
            inequalities,
        })
    }

    /// Number of decision variables.
    pub fn variable_count(&self) -> usize {
        self.objective.len()
    }

    /// Objective value of an assignment.
    pub fn objective_value(&self, values: &[f64]) -> f64 {
        self.objective.iter().zip(values).map(|(c, x)| c * x).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Collaborator;

    fn pool() -> CandidatePool {
        CandidatePool::new(vec![
            Collaborator::new("A", "Dev", "Data", "Senior")
                .with_cost(0.5)
                .with_hours(1.0)
                .with_projects(0.25),
            Collaborator::new("B", "QA", "Data", "Senior").with_cost(1.0),
            Collaborator::new("C", "Dev", "Data", "Senior").with_hours(0.5),
        ])
    }

    #[test]
    fn test_rows_per_requirement() {
        let req = SquadRequirement::new("Dev", "Data", "Senior", 2).with_ceilings(40.0, 3.0, 90.0);
        let lp = LpFormulation::build(&pool(), &[req], &WeightVector::default()).unwrap();

        assert_eq!(lp.variable_count(), 3);
        assert_eq!(lp.equalities.len(), 1);
        assert_eq!(lp.equalities[0].terms, vec![(0, 1.0), (2, 1.0)]);
        assert!((lp.equalities[0].rhs - 2.0).abs() < 1e-10);

        // Three rows per matching collaborator, coefficient equal to the bound
        assert_eq!(lp.inequalities.len(), 6);
        assert_eq!(lp.inequalities[0].terms, vec![(0, 3.0)]);
        assert!((lp.inequalities[0].rhs - 3.0).abs() < 1e-10);
        assert_eq!(lp.inequalities[1].terms, vec![(0, 90.0)]);
        assert_eq!(lp.inequalities[2].terms, vec![(0, 40.0)]);
        assert_eq!(lp.inequalities[3].terms, vec![(2, 3.0)]);
    }

    #[test]
    fn test_objective_weights() {
        let weights = WeightVector::new(2.0, 1.0, 0.0);
        let lp = LpFormulation::build(&pool(), &[], &weights).unwrap();

        assert!((lp.objective[0] - 1.5).abs() < 1e-10);
        assert!((lp.objective[1] - 0.0).abs() < 1e-10);
        assert!((lp.objective[2] - 0.5).abs() < 1e-10);
        assert!((lp.objective_value(&[1.0, 1.0, 0.0]) - 1.5).abs() < 1e-10);
    }

    #[test]
    fn test_empty_pool_error() {
        let req = SquadRequirement::new("PM", "Data", "Senior", 1);
        let err = LpFormulation::build(&pool(), &[req], &WeightVector::default()).unwrap_err();
        assert!(matches!(err, AllocationError::EmptyPool { ref role, .. } if role == "PM"));
        assert!(err.is_infeasible());
    }

    #[test]
    fn test_zero_headcount_without_match_is_skipped() {
        let req = SquadRequirement::new("PM", "Data", "Senior", 0);
        let lp = LpFormulation::build(&pool(), &[req], &WeightVector::default()).unwrap();
        assert!(lp.equalities.is_empty());
        assert!(lp.inequalities.is_empty());
    }
}
