//! LP solving backend.
//!
//! Translates an [`LpFormulation`] into a `microlp` problem and solves it.
//! Integer solves with a time budget run on a worker thread bounded by a
//! wall-clock timeout; everything else solves on the calling thread.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use microlp::{ComparisonOp, OptimizationDirection, Problem};
use tracing::{debug, warn};

use super::formulation::LpFormulation;
use crate::error::AllocationError;

/// Variable domain used when translating the formulation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LpMode {
    /// Continuous variables in [0, 1].
    #[default]
    Relaxed,
    /// Integer variables in {0, 1}.
    Integer,
}

/// Integer-solve workers that have not finished yet.
static RUNNING_WORKERS: AtomicUsize = AtomicUsize::new(0);

/// Number of integer-solve worker threads still running, including those
/// abandoned after a timeout.
pub fn running_workers() -> usize {
    RUNNING_WORKERS.load(Ordering::SeqCst)
}

/// Decrements the worker count when the worker exits, even by panic.
struct WorkerGuard;

impl WorkerGuard {
    fn enter() -> Self {
        RUNNING_WORKERS.fetch_add(1, Ordering::SeqCst);
        WorkerGuard
    }
}

impl Drop for WorkerGuard {
    fn drop(&mut self) {
        RUNNING_WORKERS.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Solves `formulation` and returns one value per variable.
///
/// In [`LpMode::Integer`] with `timeout_ms` set, branch-and-bound runs on a
/// worker thread and an overrun is reported as [`AllocationError::Timeout`].
/// A zero budget times out without solving. Relaxed solves and unbounded
/// budgets run inline on the calling thread.
///
/// # Known limitation
/// `microlp` cannot be interrupted, so a timed-out worker keeps running in
/// the background until branch-and-bound finishes; its result is discarded.
/// [`running_workers`] reports how many are still alive.
pub fn solve(
    formulation: &LpFormulation,
    mode: LpMode,
    timeout_ms: Option<u64>,
) -> Result<Vec<f64>, AllocationError> {
    match (mode, timeout_ms) {
        (LpMode::Integer, Some(0)) => Err(AllocationError::Timeout(0)),
        (LpMode::Integer, Some(ms)) => run_bounded(translate(formulation, mode)?, ms),
        _ => run(translate(formulation, mode)?),
    }
}

fn run_bounded(translated: Translated, ms: u64) -> Result<Vec<f64>, AllocationError> {
    let (tx, rx) = mpsc::channel();
    let guard = WorkerGuard::enter();
    let handle = thread::Builder::new()
        .name("lp-branch-and-bound".into())
        .spawn(move || {
            let _guard = guard;
            // Receiver is gone after a timeout
            let _ = tx.send(run(translated));
        })
        .map_err(|e| AllocationError::SolverNumerical(format!("cannot spawn solver: {e}")))?;

    match rx.recv_timeout(Duration::from_millis(ms)) {
        Ok(result) => {
            let _ = handle.join();
            result
        }
        Err(mpsc::RecvTimeoutError::Timeout) => {
            warn!(
                timeout_ms = ms,
                running = running_workers(),
                "integer LP solve timed out; worker left running"
            );
            Err(AllocationError::Timeout(ms))
        }
        Err(mpsc::RecvTimeoutError::Disconnected) => {
            let _ = handle.join();
            Err(AllocationError::SolverNumerical(
                "solver thread terminated without a result".into(),
            ))
        }
    }
}

/// Translated problem together with its variable handles.
struct Translated {
    problem: Problem,
    vars: Vec<microlp::Variable>,
    mode: LpMode,
}

fn translate(formulation: &LpFormulation, mode: LpMode) -> Result<Translated, AllocationError> {
    let mut problem = Problem::new(OptimizationDirection::Minimize);
    let vars: Vec<_> = formulation
        .objective
        .iter()
        .map(|&c| match mode {
            LpMode::Relaxed => problem.add_var(c, (0.0, 1.0)),
            LpMode::Integer => problem.add_integer_var(c, (0, 1)),
        })
        .collect();

    for row in &formulation.equalities {
        let terms: Vec<_> = row.terms.iter().map(|&(i, coef)| (vars[i], coef)).collect();
        problem.add_constraint(&terms[..], ComparisonOp::Eq, row.rhs);
    }

    for row in &formulation.inequalities {
        let terms: Vec<_> = row
            .terms
            .iter()
            .filter(|&&(_, coef)| coef != 0.0)
            .map(|&(i, coef)| (vars[i], coef))
            .collect();
        if terms.is_empty() {
            // 0 ≤ rhs
            if row.rhs < 0.0 {
                return Err(AllocationError::Infeasible);
            }
            continue;
        }
        problem.add_constraint(&terms[..], ComparisonOp::Le, row.rhs);
    }

    debug!(
        variables = vars.len(),
        equalities = formulation.equalities.len(),
        inequalities = formulation.inequalities.len(),
        ?mode,
        "translated allocation LP"
    );

    Ok(Translated {
        problem,
        vars,
        mode,
    })
}

fn run(translated: Translated) -> Result<Vec<f64>, AllocationError> {
    let Translated {
        problem,
        vars,
        mode,
    } = translated;
    match problem.solve() {
        Ok(solution) => {
            debug!(objective = solution.objective(), "allocation LP solved");
            let values = match mode {
                LpMode::Relaxed => vars.iter().map(|&v| solution[v]).collect(),
                LpMode::Integer => vars.iter().map(|&v| solution.var_value_rounded(v)).collect(),
            };
            Ok(values)
        }
        Err(microlp::Error::Infeasible) => Err(AllocationError::Infeasible),
        Err(microlp::Error::Unbounded) => Err(AllocationError::Unbounded),
        Err(microlp::Error::InternalError(msg)) => Err(AllocationError::SolverNumerical(msg)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lp::formulation::LinearRow;

    fn pick_one_of_two(costs: [f64; 2]) -> LpFormulation {
        LpFormulation {
            objective: costs.to_vec(),
            equalities: vec![LinearRow {
                terms: vec![(0, 1.0), (1, 1.0)],
                rhs: 1.0,
            }],
            inequalities: vec![],
        }
    }

    #[test]
    fn test_relaxed_picks_cheaper() {
        let x = solve(&pick_one_of_two([2.0, 1.0]), LpMode::Relaxed, None).unwrap();
        assert!(x[0].abs() < 1e-9);
        assert!((x[1] - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_integer_mode() {
        let x = solve(&pick_one_of_two([1.0, 3.0]), LpMode::Integer, Some(5_000)).unwrap();
        assert!((x[0] - 1.0).abs() < 1e-9);
        assert!(x[1].abs() < 1e-9);
    }

    #[test]
    fn test_integer_values_are_exact() {
        let x = solve(&pick_one_of_two([1.0, 3.0]), LpMode::Integer, None).unwrap();
        assert_eq!(x, vec![1.0, 0.0]);
    }

    #[test]
    fn test_integer_zero_budget_times_out() {
        let err = solve(&pick_one_of_two([1.0, 3.0]), LpMode::Integer, Some(0)).unwrap_err();
        assert_eq!(err, AllocationError::Timeout(0));
    }

    #[test]
    fn test_relaxed_solves_inline_regardless_of_budget() {
        let x = solve(&pick_one_of_two([2.0, 1.0]), LpMode::Relaxed, Some(0)).unwrap();
        assert!((x[1] - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_infeasible_headcount() {
        let mut lp = pick_one_of_two([1.0, 1.0]);
        lp.equalities[0].rhs = 3.0;
        let err = solve(&lp, LpMode::Relaxed, Some(5_000)).unwrap_err();
        assert_eq!(err, AllocationError::Infeasible);
    }

    #[test]
    fn test_zero_coefficient_rows_are_dropped() {
        let mut lp = pick_one_of_two([1.0, 2.0]);
        lp.inequalities.push(LinearRow {
            terms: vec![(0, 0.0)],
            rhs: 0.0,
        });
        let x = solve(&lp, LpMode::Relaxed, None).unwrap();
        assert!((x[0] - 1.0).abs() < 1e-9);

        lp.inequalities.push(LinearRow {
            terms: vec![(1, 0.0)],
            rhs: -1.0,
        });
        assert_eq!(solve(&lp, LpMode::Relaxed, None).unwrap_err(), AllocationError::Infeasible);
    }
}
