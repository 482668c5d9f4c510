//! Recommendation quality metrics (KPIs).
//!
//! Summarizes a recommendation table per proposed squad and per project.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Headcount | Collaborators in the squad |
//! | Hourly cost | Sum of hourly costs |
//! | Allocated hours | Sum of hours already allocated |
//! | Avg project load | Mean current project count |
//! | Coverage | Fraction of requested rounds that produced a squad |

use std::collections::HashMap;

use crate::models::Recommendation;

/// Metrics of one proposed squad (one project, one round).
#[derive(Debug, Clone, PartialEq)]
pub struct SquadKpi {
    /// Project identifier.
    pub project_id: String,
    /// Round number (1-based).
    pub round: usize,
    /// Number of collaborators.
    pub headcount: usize,
    /// Sum of hourly costs.
    pub total_hourly_cost: f64,
    /// Sum of already allocated hours.
    pub total_allocated_hours: f64,
    /// Mean current project count.
    pub avg_project_load: f64,
}

impl SquadKpi {
    /// Computes one entry per (project, round), in table order.
    pub fn calculate(recommendations: &[Recommendation]) -> Vec<Self> {
        let mut squads: Vec<SquadKpi> = Vec::new();
        let mut index: HashMap<(&str, usize), usize> = HashMap::new();

        for rec in recommendations {
            let key = (rec.project_id.as_str(), rec.round);
            let slot = *index.entry(key).or_insert_with(|| {
                squads.push(SquadKpi {
                    project_id: rec.project_id.clone(),
                    round: rec.round,
                    headcount: 0,
                    total_hourly_cost: 0.0,
                    total_allocated_hours: 0.0,
                    avg_project_load: 0.0,
                });
                squads.len() - 1
            });

            let squad = &mut squads[slot];
            squad.headcount += 1;
            squad.total_hourly_cost += rec.cost;
            squad.total_allocated_hours += rec.hours;
            // Running sum; divided below
            squad.avg_project_load += rec.project_count;
        }

        for squad in &mut squads {
            if squad.headcount > 0 {
                squad.avg_project_load /= squad.headcount as f64;
            }
        }
        squads
    }

    /// Whether the squad stays within the given cost and load limits.
    pub fn within_limits(&self, max_hourly_cost: f64, max_avg_load: f64) -> bool {
        self.total_hourly_cost <= max_hourly_cost && self.avg_project_load <= max_avg_load
    }
}

/// Fraction of `requested_rounds` for which `project_id` got a squad.
pub fn coverage(recommendations: &[Recommendation], project_id: &str, requested_rounds: usize) -> f64 {
    if requested_rounds == 0 {
        return 0.0;
    }
    let mut rounds: Vec<usize> = recommendations
        .iter()
        .filter(|r| r.project_id == project_id)
        .map(|r| r.round)
        .collect();
    rounds.sort_unstable();
    rounds.dedup();
    rounds.len() as f64 / requested_rounds as f64
}
