//! Multi-round recommendation orchestration.
//!
//! For every project, independently:
//!
//! 1. Snapshot the pool and normalize hours, cost and project count by their
//!    pool-wide maxima.
//! 2. Sanitize the weights (negative, absent or non-finite → 1.0).
//! 3. For each round, build a fresh allocator over the working pool, solve
//!    with the caller's ceilings, retry once with the fallback ceilings on
//!    failure, and skip the round if the retry fails too. Collaborators
//!    selected in a round leave the working pool for later rounds.
//!
//! The pool resets for every project. Output rows keep project order, then
//! round order.

use tracing::{debug, info, warn};

use crate::allocator::build_allocator;
use crate::config::AllocatorConfig;
use crate::error::AllocationError;
use crate::models::{
    AllocationResult, CandidatePool, ProjectRequest, Recommendation, SquadRequirement,
    WeightVector,
};

/// How a round ended.
#[derive(Debug, Clone, PartialEq)]
pub enum RoundStatus {
    /// Solved with the caller's ceilings.
    Primary,
    /// Solved only after retrying with the fallback ceilings.
    Fallback {
        /// Why the primary attempt failed.
        primary_error: AllocationError,
    },
    /// Both attempts failed; no recommendation was produced.
    Skipped {
        /// Why the primary attempt failed.
        primary_error: AllocationError,
        /// Why the fallback attempt failed.
        fallback_error: AllocationError,
    },
}

/// Outcome of one round of one project.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundReport {
    /// Project identifier.
    pub project_id: String,
    /// Round number (1-based).
    pub round: usize,
    /// How the round ended.
    pub status: RoundStatus,
    /// Number of collaborators recommended in this round.
    pub selected: usize,
}

/// Full output of a recommendation run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecommendationRun {
    /// Recommendation table.
    pub recommendations: Vec<Recommendation>,
    /// One report per attempted round.
    pub rounds: Vec<RoundReport>,
}

impl RecommendationRun {
    /// Recommendations of one project.
    pub fn for_project<'a>(&'a self, project_id: &'a str) -> impl Iterator<Item = &'a Recommendation> {
        self.recommendations
            .iter()
            .filter(move |r| r.project_id == project_id)
    }
}

/// Number of rounds to run for a requested count (≤ 0 → 1).
pub fn effective_rounds(requested: i32) -> usize {
    usize::try_from(requested).ok().filter(|&n| n > 0).unwrap_or(1)
}

/// Drives allocation rounds for a batch of projects.
#[derive(Debug, Clone, Default)]
pub struct RecommendationOrchestrator {
    config: AllocatorConfig,
}

impl RecommendationOrchestrator {
    /// Creates an orchestrator.
    pub fn new(config: AllocatorConfig) -> Self {
        Self { config }
    }

    /// Active configuration.
    pub fn config(&self) -> &AllocatorConfig {
        &self.config
    }

    /// Produces the recommendation table for `requests`.
    pub fn allocate(
        &self,
        pool: &CandidatePool,
        requests: &[ProjectRequest],
        weights: WeightVector,
        rounds: i32,
    ) -> Vec<Recommendation> {
        self.run(pool, requests, weights, rounds).recommendations
    }

    /// Like [`allocate`](Self::allocate), also reporting how each round ended.
    pub fn run(
        &self,
        pool: &CandidatePool,
        requests: &[ProjectRequest],
        weights: WeightVector,
        rounds: i32,
    ) -> RecommendationRun {
        let weights = weights.normalized();
        let rounds = effective_rounds(rounds);
        let mut run = RecommendationRun::default();

        for request in requests {
            self.run_project(pool, request, &weights, rounds, &mut run);
        }

        info!(
            projects = requests.len(),
            recommendations = run.recommendations.len(),
            "recommendation run complete"
        );
        run
    }

    fn run_project(
        &self,
        pool: &CandidatePool,
        request: &ProjectRequest,
        weights: &WeightVector,
        rounds: usize,
        run: &mut RecommendationRun,
    ) {
        let project = request.project_id.as_str();
        let original = pool.clone();
        let mut working = original.normalized();
        let before = run.recommendations.len();

        for round in 1..=rounds {
            let (status, result) = self.solve_round(&working, &request.requirements, weights);

            let selected = match result {
                Some(result) => {
                    for selection in &result.selections {
                        if let Some(collaborator) = original.find(&selection.collaborator_id) {
                            run.recommendations.push(Recommendation::new(
                                project,
                                collaborator,
                                selection.weight,
                                round,
                            ));
                        }
                    }
                    working = working.without(result.collaborator_ids());
                    result.len()
                }
                None => {
                    warn!(project, round, "no allocation for round; skipping");
                    0
                }
            };

            debug!(project, round, selected, remaining = working.len(), "round finished");
            run.rounds.push(RoundReport {
                project_id: project.to_string(),
                round,
                status,
                selected,
            });
        }

        info!(
            project,
            recommendations = run.recommendations.len() - before,
            "project recommendations ready"
        );
    }

    /// One round: primary attempt, then the fallback ceilings.
    fn solve_round(
        &self,
        pool: &CandidatePool,
        requirements: &[SquadRequirement],
        weights: &WeightVector,
    ) -> (RoundStatus, Option<AllocationResult>) {
        let primary_error = match self.attempt(pool, requirements.iter().cloned(), weights) {
            Ok(result) => return (RoundStatus::Primary, Some(result)),
            Err(err) => err,
        };
        warn!(error = %primary_error, "allocation failed; retrying with fallback ceilings");

        let relaxed = requirements.iter().map(|r| r.relaxed(&self.config.fallback));
        match self.attempt(pool, relaxed, weights) {
            Ok(result) => (RoundStatus::Fallback { primary_error }, Some(result)),
            Err(fallback_error) => (
                RoundStatus::Skipped {
                    primary_error,
                    fallback_error,
                },
                None,
            ),
        }
    }

    fn attempt(
        &self,
        pool: &CandidatePool,
        requirements: impl IntoIterator<Item = SquadRequirement>,
        weights: &WeightVector,
    ) -> Result<AllocationResult, AllocationError> {
        let mut allocator = build_allocator(pool.clone(), &self.config);
        allocator.set_weights(*weights);
        for req in requirements {
            allocator.add_requirement(req);
        }
        allocator.optimize()?;
        Ok(allocator.allocation_results().clone())
    }
}

/// Runs a recommendation batch with the default configuration.
pub fn allocate(
    pool: &CandidatePool,
    requests: &[ProjectRequest],
    weights: WeightVector,
    rounds: i32,
) -> Vec<Recommendation> {
    RecommendationOrchestrator::default().allocate(pool, requests, weights, rounds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AllocationStrategy, GaConfig};
    use crate::models::Collaborator;
    use std::collections::HashSet;

    fn x(id: &str, cost: f64, hours: f64, projects: f64) -> Collaborator {
        Collaborator::new(id, "X", "S", "K")
            .with_cost(cost)
            .with_hours(hours)
            .with_projects(projects)
    }

    fn req_x(headcount: u32) -> SquadRequirement {
        SquadRequirement::new("X", "S", "K", headcount).with_ceilings(40.0, 3.0, 100.0)
    }

    fn large_pool() -> CandidatePool {
        (1..=6)
            .map(|i| x(&format!("C{i}"), 10.0 * i as f64, 2.0 * i as f64, (i % 3) as f64))
            .collect()
    }

    #[test]
    fn test_effective_rounds() {
        assert_eq!(effective_rounds(-2), 1);
        assert_eq!(effective_rounds(0), 1);
        assert_eq!(effective_rounds(3), 3);
    }

    #[test]
    fn test_scenario_single_pick() {
        let pool = CandidatePool::new(vec![x("C1", 50.0, 10.0, 1.0), x("C2", 60.0, 5.0, 0.0)]);
        let requests = vec![ProjectRequest::new("P1").with_requirement(req_x(1))];

        let recs = allocate(&pool, &requests, WeightVector::new(1.0, 1.0, 1.0), 1);
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].collaborator_id, "C2");
        assert_eq!(recs[0].round_label, "ALLOCATION_1");
        // Original, unnormalized values are reported
        assert!((recs[0].cost - 60.0).abs() < 1e-10);
        assert!((recs[0].hours - 5.0).abs() < 1e-10);
    }

    #[test]
    fn test_scenario_headcount_exceeds_pool() {
        let pool = CandidatePool::new(vec![x("C1", 50.0, 10.0, 1.0), x("C2", 60.0, 5.0, 0.0)]);
        let requests = vec![ProjectRequest::new("P1").with_requirement(req_x(3))];

        let run = RecommendationOrchestrator::default().run(&pool, &requests, WeightVector::default(), 1);
        assert!(run.recommendations.is_empty());
        assert_eq!(run.rounds.len(), 1);
        assert!(matches!(run.rounds[0].status, RoundStatus::Skipped { .. }));
    }

    #[test]
    fn test_scenario_rounds_are_disjoint() {
        let requests = vec![ProjectRequest::new("P1").with_requirement(req_x(2))];
        let run = RecommendationOrchestrator::default().run(&large_pool(), &requests, WeightVector::default(), 2);

        let round = |n: usize| -> HashSet<String> {
            run.recommendations
                .iter()
                .filter(|r| r.round == n)
                .map(|r| r.collaborator_id.clone())
                .collect()
        };
        let (first, second) = (round(1), round(2));
        assert_eq!(first.len(), 2);
        assert_eq!(second.len(), 2);
        assert!(first.is_disjoint(&second));
        assert!(run.rounds.iter().all(|r| r.status == RoundStatus::Primary));

        // Round order is preserved in the table
        assert!(run.recommendations[..2].iter().all(|r| r.round == 1));
    }

    #[test]
    fn test_pool_resets_per_project() {
        let requests = vec![
            ProjectRequest::new("P1").with_requirement(req_x(2)),
            ProjectRequest::new("P2").with_requirement(req_x(2)),
        ];
        let run = RecommendationOrchestrator::default().run(&large_pool(), &requests, WeightVector::default(), 1);

        let p1: Vec<&str> = run.for_project("P1").map(|r| r.collaborator_id.as_str()).collect();
        let p2: Vec<&str> = run.for_project("P2").map(|r| r.collaborator_id.as_str()).collect();
        assert_eq!(p1, p2);
        assert_eq!(run.recommendations[0].project_id, "P1");
        assert_eq!(run.recommendations.last().unwrap().project_id, "P2");
    }

    #[test]
    fn test_fallback_only_after_failure() {
        let pool = large_pool();

        let ok = vec![ProjectRequest::new("P1").with_requirement(req_x(1))];
        let run = RecommendationOrchestrator::default().run(&pool, &ok, WeightVector::default(), 1);
        assert_eq!(run.rounds[0].status, RoundStatus::Primary);

        // A negative ceiling row (-x ≤ -1) forces every match in; headcount 1 cannot hold
        let forced = SquadRequirement::new("X", "S", "K", 1).with_ceilings(40.0, 3.0, -1.0);
        let bad = vec![ProjectRequest::new("P1").with_requirement(forced)];
        let run = RecommendationOrchestrator::default().run(&pool, &bad, WeightVector::default(), 1);

        assert!(matches!(run.rounds[0].status, RoundStatus::Fallback { .. }));
        assert_eq!(run.recommendations.len(), 1);
    }

    #[test]
    fn test_timeout_counts_as_failure() {
        let config = AllocatorConfig::default()
            .with_strategy(AllocationStrategy::IntegerLp)
            .with_timeout_ms(Some(0));
        let requests = vec![ProjectRequest::new("P1").with_requirement(req_x(1))];

        let run = RecommendationOrchestrator::new(config).run(&large_pool(), &requests, WeightVector::default(), 2);
        assert!(run.recommendations.is_empty());
        assert_eq!(run.rounds.len(), 2);
        for report in &run.rounds {
            assert!(matches!(
                report.status,
                RoundStatus::Skipped {
                    primary_error: AllocationError::Timeout(0),
                    fallback_error: AllocationError::Timeout(0),
                }
            ));
            assert_eq!(report.selected, 0);
        }
    }

    #[test]
    fn test_integer_strategy_with_budget() {
        let config = AllocatorConfig::default()
            .with_strategy(AllocationStrategy::IntegerLp)
            .with_timeout_ms(Some(5_000));
        let requests = vec![ProjectRequest::new("P1").with_requirement(req_x(2))];

        let recs = RecommendationOrchestrator::new(config).allocate(&large_pool(), &requests, WeightVector::default(), 1);
        let ids: Vec<&str> = recs.iter().map(|r| r.collaborator_id.as_str()).collect();
        assert_eq!(ids, vec!["C1", "C3"]);
        assert!(recs.iter().all(|r| r.selection_weight == 1.0));
    }

    #[test]
    fn test_excluding_recommendations_reproduces_working_pool() {
        let pool = large_pool();
        let requests = vec![ProjectRequest::new("P1").with_requirement(req_x(2))];
        let orchestrator = RecommendationOrchestrator::default();

        let first = orchestrator.allocate(&pool, &requests, WeightVector::default(), 1);
        let rest = pool.without(first.iter().map(|r| r.collaborator_id.as_str()));
        assert_eq!(rest.len(), 4);

        // C6 and C2/C5 keep the column maxima, so normalization is unchanged
        let from_rest: Vec<String> = orchestrator
            .allocate(&rest, &requests, WeightVector::default(), 1)
            .into_iter()
            .map(|r| r.collaborator_id)
            .collect();
        let second_round: Vec<String> = orchestrator
            .allocate(&pool, &requests, WeightVector::default(), 2)
            .into_iter()
            .filter(|r| r.round == 2)
            .map(|r| r.collaborator_id)
            .collect();
        assert_eq!(from_rest, second_round);
        assert_eq!(second_round, vec!["C2".to_string(), "C4".to_string()]);
    }

    #[test]
    fn test_negative_weights_are_sanitized() {
        let pool = CandidatePool::new(vec![x("C1", 50.0, 10.0, 1.0), x("C2", 60.0, 5.0, 0.0)]);
        let requests = vec![ProjectRequest::new("P1").with_requirement(req_x(1))];
        let weights = WeightVector {
            projects: -5.0,
            hours: -1.0,
            cost: f64::NAN,
            hours_sold: 1.0,
        };

        let recs = allocate(&pool, &requests, weights, 1);
        assert_eq!(recs[0].collaborator_id, "C2");
    }

    #[test]
    fn test_genetic_strategy() {
        let config = AllocatorConfig::default()
            .with_strategy(AllocationStrategy::Genetic)
            .with_ga(GaConfig::default().with_population_size(20).with_generations(20));
        let requests = vec![ProjectRequest::new("P1").with_requirement(req_x(1))];

        let run = RecommendationOrchestrator::new(config).run(&large_pool(), &requests, WeightVector::default(), 2);
        assert_eq!(run.recommendations.len(), 2);
        assert_ne!(run.recommendations[0].collaborator_id, run.recommendations[1].collaborator_id);
    }
}
