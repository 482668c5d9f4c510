//! Squad requirement models.
//!
//! A requirement is one demand line of a project's squad: how many
//! collaborators of a given role, sector and class are needed, and the
//! ceilings that apply to each of them.

use serde::{Deserialize, Serialize};

/// One role/sector/class demand line of a squad.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SquadRequirement {
    /// Required role.
    pub role: String,
    /// Required sector.
    pub sector: String,
    /// Required class.
    pub class: String,
    /// Number of collaborators to select.
    pub headcount: u32,
    /// Maximum hours per collaborator.
    pub max_hours: f64,
    /// Maximum concurrent projects per collaborator.
    pub max_projects: f64,
    /// Maximum hourly cost per collaborator.
    pub max_cost: f64,
}

impl SquadRequirement {
    /// Creates a requirement with zero ceilings.
    pub fn new(
        role: impl Into<String>,
        sector: impl Into<String>,
        class: impl Into<String>,
        headcount: u32,
    ) -> Self {
        Self {
            role: role.into(),
            sector: sector.into(),
            class: class.into(),
            headcount,
            max_hours: 0.0,
            max_projects: 0.0,
            max_cost: 0.0,
        }
    }

    /// Sets hour, project and cost ceilings at once.
    pub fn with_ceilings(mut self, max_hours: f64, max_projects: f64, max_cost: f64) -> Self {
        self.max_hours = max_hours;
        self.max_projects = max_projects;
        self.max_cost = max_cost;
        self
    }

    /// Same demand line with the ceilings replaced by `fallback`.
    pub fn relaxed(&self, fallback: &FallbackCeilings) -> Self {
        self.clone()
            .with_ceilings(fallback.hours, fallback.projects, fallback.cost)
    }
}

/// Ceilings used when the caller-supplied ones make the problem infeasible.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FallbackCeilings {
    /// Hours ceiling (default: 120).
    pub hours: f64,
    /// Project-count ceiling (default: 40).
    pub projects: f64,
    /// Cost ceiling (default: 300).
    pub cost: f64,
}

impl Default for FallbackCeilings {
    fn default() -> Self {
        Self {
            hours: 120.0,
            projects: 40.0,
            cost: 300.0,
        }
    }
}

/// One allocation-request row as submitted by the caller.
///
/// Rows are checked by [`crate::validation::validate_requests`] and grouped
/// per project by [`group_requests`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestRow {
    /// Project identifier.
    pub project_id: String,
    /// Required role.
    pub role: String,
    /// Required sector.
    pub sector: String,
    /// Required class.
    pub class: String,
    /// Number of collaborators.
    pub headcount: i64,
    /// Hours ceiling.
    pub hours: f64,
    /// Project-count ceiling.
    pub projects: f64,
    /// Cost ceiling.
    pub cost: f64,
}

impl RequestRow {
    /// Converts the row into a requirement.
    ///
    /// Negative headcounts clamp to zero; validation rejects them beforehand.
    pub fn to_requirement(&self) -> SquadRequirement {
        SquadRequirement::new(
            &self.role,
            &self.sector,
            &self.class,
            u32::try_from(self.headcount.max(0)).unwrap_or(u32::MAX),
        )
        .with_ceilings(self.hours, self.projects, self.cost)
    }
}

/// All demand lines of one project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectRequest {
    /// Project identifier.
    pub project_id: String,
    /// Squad demand lines.
    pub requirements: Vec<SquadRequirement>,
}

impl ProjectRequest {
    /// Creates an empty project request.
    pub fn new(project_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            requirements: Vec::new(),
        }
    }

    /// Adds a demand line.
    pub fn with_requirement(mut self, requirement: SquadRequirement) -> Self {
        self.requirements.push(requirement);
        self
    }

    /// Total headcount across all demand lines.
    pub fn total_headcount(&self) -> u32 {
        self.requirements.iter().map(|r| r.headcount).sum()
    }
}

/// Groups request rows per project.
///
/// Projects with more request rows come first; ties keep the order of first
/// appearance. Rows keep their order within a project.
pub fn group_requests(rows: &[RequestRow]) -> Vec<ProjectRequest> {
    let mut projects: Vec<ProjectRequest> = Vec::new();
    for row in rows {
        match projects.iter_mut().find(|p| p.project_id == row.project_id) {
            Some(project) => project.requirements.push(row.to_requirement()),
            None => projects
                .push(ProjectRequest::new(&row.project_id).with_requirement(row.to_requirement())),
        }
    }
    // Stable: equal counts stay in appearance order
    projects.sort_by(|a, b| b.requirements.len().cmp(&a.requirements.len()));
    projects
}
