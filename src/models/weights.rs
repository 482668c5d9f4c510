//! Objective weights.

use serde::{Deserialize, Serialize};

/// Weights of the allocation objective terms.
///
/// The LP allocator uses the first three; `hours_sold` is carried for the GA
/// allocator but does not enter any score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeightVector {
    /// Weight of the current project count.
    pub projects: f64,
    /// Weight of the allocated hours.
    pub hours: f64,
    /// Weight of the hourly cost.
    pub cost: f64,
    /// Weight of the hours-sold term (unused in scoring).
    pub hours_sold: f64,
}

impl Default for WeightVector {
    fn default() -> Self {
        Self {
            projects: 1.0,
            hours: 1.0,
            cost: 1.0,
            hours_sold: 1.0,
        }
    }
}

/// Sanitizes one raw weight.
///
/// Absent, negative or non-finite values become 1.0.
pub fn normalize_weight(raw: Option<f64>) -> f64 {
    match raw {
        Some(w) if w.is_finite() && w >= 0.0 => w,
        _ => 1.0,
    }
}

impl WeightVector {
    /// Creates a weight vector, sanitizing each value.
    pub fn new(projects: f64, hours: f64, cost: f64) -> Self {
        Self::from_inputs(Some(projects), Some(hours), Some(cost))
    }

    /// Builds weights from raw caller input.
    pub fn from_inputs(projects: Option<f64>, hours: Option<f64>, cost: Option<f64>) -> Self {
        Self {
            projects: normalize_weight(projects),
            hours: normalize_weight(hours),
            cost: normalize_weight(cost),
            hours_sold: 1.0,
        }
    }

    /// Sets the hours-sold weight.
    pub fn with_hours_sold(mut self, hours_sold: f64) -> Self {
        self.hours_sold = normalize_weight(Some(hours_sold));
        self
    }

    /// Returns a copy with every component sanitized.
    pub fn normalized(&self) -> Self {
        Self {
            projects: normalize_weight(Some(self.projects)),
            hours: normalize_weight(Some(self.hours)),
            cost: normalize_weight(Some(self.cost)),
            hours_sold: normalize_weight(Some(self.hours_sold)),
        }
    }

    /// Weighted score of one collaborator's attributes.
    #[inline]
    pub fn score(&self, project_count: f64, allocated_hours: f64, cost_per_hour: f64) -> f64 {
        self.projects * project_count + self.hours * allocated_hours + self.cost * cost_per_hour
    }
}
