//! Allocation result and recommendation models.

use serde::{Deserialize, Serialize};

use super::Collaborator;

/// A collaborator chosen by an allocator, with its solved selection weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    /// Collaborator identifier.
    pub collaborator_id: String,
    /// Selection weight in [0, 1]. Strictly positive for every entry.
    pub weight: f64,
}

/// Output of one optimizer call: selected collaborators in pool order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AllocationResult {
    /// Selected collaborators.
    pub selections: Vec<Selection>,
}

impl AllocationResult {
    /// Creates an empty result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a selection.
    pub fn push(&mut self, collaborator_id: impl Into<String>, weight: f64) {
        self.selections.push(Selection {
            collaborator_id: collaborator_id.into(),
            weight,
        });
    }

    /// Number of selected collaborators.
    pub fn len(&self) -> usize {
        self.selections.len()
    }

    /// Whether nothing was selected.
    pub fn is_empty(&self) -> bool {
        self.selections.is_empty()
    }

    /// Selected collaborator identifiers, in pool order.
    pub fn collaborator_ids(&self) -> impl Iterator<Item = &str> {
        self.selections.iter().map(|s| s.collaborator_id.as_str())
    }

    /// Whether a collaborator was selected.
    pub fn contains(&self, collaborator_id: &str) -> bool {
        self.selections.iter().any(|s| s.collaborator_id == collaborator_id)
    }

    /// Sum of selection weights.
    pub fn total_weight(&self) -> f64 {
        self.selections.iter().map(|s| s.weight).sum()
    }
}

/// Label of a recommendation round (1-based).
pub fn round_label(round: usize) -> String {
    format!("ALLOCATION_{round}")
}

/// One row of the recommendation table.
///
/// Hours and cost are the collaborator's original (unnormalized) values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    /// Project identifier.
    pub project_id: String,
    /// Collaborator identifier.
    pub collaborator_id: String,
    /// Collaborator role.
    pub role: String,
    /// Collaborator sector.
    pub sector: String,
    /// Collaborator class.
    pub class: String,
    /// Hours already allocated to the collaborator.
    pub hours: f64,
    /// Hourly cost.
    pub cost: f64,
    /// Current project count.
    pub project_count: f64,
    /// Solved selection weight.
    pub selection_weight: f64,
    /// Round number (1-based).
    pub round: usize,
    /// Round label, `ALLOCATION_{round}`.
    pub round_label: String,
}

impl Recommendation {
    /// Builds a row from a collaborator's original record.
    pub fn new(
        project_id: impl Into<String>,
        collaborator: &Collaborator,
        selection_weight: f64,
        round: usize,
    ) -> Self {
        Self {
            project_id: project_id.into(),
            collaborator_id: collaborator.id.clone(),
            role: collaborator.role.clone(),
            sector: collaborator.sector.clone(),
            class: collaborator.class.clone(),
            hours: collaborator.allocated_hours,
            cost: collaborator.cost_per_hour,
            project_count: collaborator.project_count,
            selection_weight,
            round,
            round_label: round_label(round),
        }
    }
}
