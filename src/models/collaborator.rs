//! Collaborator and candidate pool models.
//!
//! A collaborator is one member of the staffing pool. The candidate pool is
//! the ordered table the allocators work on: the position of a collaborator
//! in the pool is its decision-variable index.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// A member of the staffing pool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collaborator {
    /// Unique collaborator identifier (registration number).
    pub id: String,
    /// Job role.
    pub role: String,
    /// Organizational sector.
    pub sector: String,
    /// Seniority class / level.
    pub class: String,
    /// Hourly cost.
    pub cost_per_hour: f64,
    /// Number of projects the collaborator is currently assigned to.
    pub project_count: f64,
    /// Total hours already allocated.
    pub allocated_hours: f64,
}

impl Collaborator {
    /// Creates a collaborator with zero cost, hours and projects.
    pub fn new(
        id: impl Into<String>,
        role: impl Into<String>,
        sector: impl Into<String>,
        class: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            role: role.into(),
            sector: sector.into(),
            class: class.into(),
            cost_per_hour: 0.0,
            project_count: 0.0,
            allocated_hours: 0.0,
        }
    }

    /// Sets the hourly cost.
    pub fn with_cost(mut self, cost_per_hour: f64) -> Self {
        self.cost_per_hour = cost_per_hour;
        self
    }

    /// Sets the allocated hours.
    pub fn with_hours(mut self, allocated_hours: f64) -> Self {
        self.allocated_hours = allocated_hours;
        self
    }

    /// Sets the current project count.
    pub fn with_projects(mut self, project_count: f64) -> Self {
        self.project_count = project_count;
        self
    }

    /// Whether this collaborator has the given role, sector and class.
    pub fn matches(&self, role: &str, sector: &str, class: &str) -> bool {
        self.role == role && self.sector == sector && self.class == class
    }
}

/// One row of assignment history: a collaborator working on a project.
///
/// The pool is derived from these rows by [`CandidatePool::from_assignments`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignmentRecord {
    /// Collaborator identifier.
    pub collaborator_id: String,
    /// Collaborator role.
    pub role: String,
    /// Collaborator sector.
    pub sector: String,
    /// Collaborator class.
    pub class: String,
    /// Project the hours were booked on.
    pub project_id: String,
    /// Hours booked on the project.
    pub hours: f64,
    /// Hourly cost of the collaborator.
    pub cost_per_hour: f64,
}

/// Ordered table of collaborators available to an allocation run.
///
/// Never grows during optimization; entries are only removed between
/// recommendation rounds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CandidatePool {
    collaborators: Vec<Collaborator>,
}

impl CandidatePool {
    /// Creates a pool from collaborators, preserving their order.
    pub fn new(collaborators: Vec<Collaborator>) -> Self {
        Self { collaborators }
    }

    /// Aggregates assignment history into one collaborator per identifier.
    ///
    /// Cost, role, sector and class are taken from the first row seen for a
    /// collaborator. The project count is the number of distinct projects and
    /// the hours are summed. Output is ordered by collaborator id.
    pub fn from_assignments(records: &[AssignmentRecord]) -> Self {
        struct Acc<'a> {
            first: &'a AssignmentRecord,
            projects: HashSet<&'a str>,
            hours: f64,
        }

        let mut by_id: BTreeMap<&str, Acc<'_>> = BTreeMap::new();
        for rec in records {
            let acc = by_id.entry(rec.collaborator_id.as_str()).or_insert_with(|| Acc {
                first: rec,
                projects: HashSet::new(),
                hours: 0.0,
            });
            acc.projects.insert(rec.project_id.as_str());
            acc.hours += rec.hours;
        }

        let collaborators = by_id
            .into_values()
            .map(|acc| {
                Collaborator::new(
                    &acc.first.collaborator_id,
                    &acc.first.role,
                    &acc.first.sector,
                    &acc.first.class,
                )
                .with_cost(acc.first.cost_per_hour)
                .with_projects(acc.projects.len() as f64)
                .with_hours(acc.hours)
            })
            .collect();

        Self { collaborators }
    }

    /// Number of collaborators.
    pub fn len(&self) -> usize {
        self.collaborators.len()
    }

    /// Whether the pool is empty.
    pub fn is_empty(&self) -> bool {
        self.collaborators.is_empty()
    }

    /// Collaborator at a variable index.
    pub fn get(&self, index: usize) -> Option<&Collaborator> {
        self.collaborators.get(index)
    }

    /// Collaborator by identifier.
    pub fn find(&self, id: &str) -> Option<&Collaborator> {
        self.collaborators.iter().find(|c| c.id == id)
    }

    /// Iterates collaborators in index order.
    pub fn iter(&self) -> impl Iterator<Item = &Collaborator> {
        self.collaborators.iter()
    }

    /// Collaborators as a slice.
    pub fn collaborators(&self) -> &[Collaborator] {
        &self.collaborators
    }

    /// Indices of collaborators matching a role/sector/class triple.
    pub fn matching_indices(&self, role: &str, sector: &str, class: &str) -> Vec<usize> {
        self.collaborators
            .iter()
            .enumerate()
            .filter(|(_, c)| c.matches(role, sector, class))
            .map(|(i, _)| i)
            .collect()
    }

    /// Returns a copy of the pool without the given collaborators.
    ///
    /// Relative order of the remaining collaborators is kept.
    pub fn without<'a, I>(&self, ids: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let excluded: HashSet<&str> = ids.into_iter().collect();
        Self {
            collaborators: self
                .collaborators
                .iter()
                .filter(|c| !excluded.contains(c.id.as_str()))
                .cloned()
                .collect(),
        }
    }

    /// Returns a copy with hours, cost and project count divided by their
    /// pool-wide maxima.
    ///
    /// A column whose maximum is not positive is left as is.
    pub fn normalized(&self) -> Self {
        let max_of = |f: fn(&Collaborator) -> f64| {
            self.collaborators.iter().map(f).fold(0.0_f64, f64::max)
        };
        let max_hours = max_of(|c| c.allocated_hours);
        let max_cost = max_of(|c| c.cost_per_hour);
        let max_projects = max_of(|c| c.project_count);

        let scale = |value: f64, max: f64| if max > 0.0 { value / max } else { value };

        Self {
            collaborators: self
                .collaborators
                .iter()
                .map(|c| Collaborator {
                    allocated_hours: scale(c.allocated_hours, max_hours),
                    cost_per_hour: scale(c.cost_per_hour, max_cost),
                    project_count: scale(c.project_count, max_projects),
                    ..c.clone()
                })
                .collect(),
        }
    }

    /// Count of collaborators per (role, class).
    pub fn headcount_by_role_class(&self) -> BTreeMap<(String, String), usize> {
        let mut counts = BTreeMap::new();
        for c in &self.collaborators {
            *counts.entry((c.role.clone(), c.class.clone())).or_insert(0) += 1;
        }
        counts
    }

    /// Whether some collaborator has this role.
    pub fn has_role(&self, role: &str) -> bool {
        self.collaborators.iter().any(|c| c.role == role)
    }

    /// Whether some collaborator belongs to this sector.
    pub fn has_sector(&self, sector: &str) -> bool {
        self.collaborators.iter().any(|c| c.sector == sector)
    }

    /// Whether some collaborator has this class.
    pub fn has_class(&self, class: &str) -> bool {
        self.collaborators.iter().any(|c| c.class == class)
    }
}

impl FromIterator<Collaborator> for CandidatePool {
    fn from_iter<T: IntoIterator<Item = Collaborator>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, project: &str, hours: f64, cost: f64) -> AssignmentRecord {
        AssignmentRecord {
            collaborator_id: id.into(),
            role: "Dev".into(),
            sector: "Data".into(),
            class: "Senior".into(),
            project_id: project.into(),
            hours,
            cost_per_hour: cost,
        }
    }

    #[test]
    fn test_collaborator_builder() {
        let c = Collaborator::new("MA1001", "Dev", "Data", "Senior")
            .with_cost(80.0)
            .with_hours(32.0)
            .with_projects(2.0);

        assert_eq!(c.id, "MA1001");
        assert!(c.matches("Dev", "Data", "Senior"));
        assert!(!c.matches("Dev", "Data", "Junior"));
        assert!((c.cost_per_hour - 80.0).abs() < 1e-10);
        assert!((c.allocated_hours - 32.0).abs() < 1e-10);
        assert!((c.project_count - 2.0).abs() < 1e-10);
    }

    #[test]
    fn test_from_assignments_aggregates() {
        let records = vec![
            record("MA2", "PR1", 10.0, 55.0),
            record("MA1", "PR1", 20.0, 40.0),
            record("MA1", "PR2", 15.0, 99.0),
            record("MA1", "PR2", 5.0, 99.0),
        ];
        let pool = CandidatePool::from_assignments(&records);

        assert_eq!(pool.len(), 2);
        let first = pool.get(0).unwrap();
        assert_eq!(first.id, "MA1");
        assert!((first.allocated_hours - 40.0).abs() < 1e-10);
        assert!((first.project_count - 2.0).abs() < 1e-10);
        // First-seen cost wins
        assert!((first.cost_per_hour - 40.0).abs() < 1e-10);
        assert_eq!(pool.get(1).unwrap().id, "MA2");
    }

    #[test]
    fn test_normalized_divides_by_max() {
        let pool = CandidatePool::new(vec![
            Collaborator::new("C1", "X", "S", "K").with_cost(50.0).with_hours(10.0).with_projects(1.0),
            Collaborator::new("C2", "X", "S", "K").with_cost(60.0).with_hours(5.0),
        ]);
        let norm = pool.normalized();

        let c1 = norm.find("C1").unwrap();
        let c2 = norm.find("C2").unwrap();
        assert!((c1.cost_per_hour - 50.0 / 60.0).abs() < 1e-10);
        assert!((c1.allocated_hours - 1.0).abs() < 1e-10);
        assert!((c2.allocated_hours - 0.5).abs() < 1e-10);
        assert!((c2.project_count - 0.0).abs() < 1e-10);
    }

    #[test]
    fn test_normalized_zero_column_untouched() {
        let pool = CandidatePool::new(vec![
            Collaborator::new("C1", "X", "S", "K").with_cost(10.0),
            Collaborator::new("C2", "X", "S", "K").with_cost(20.0),
        ]);
        let norm = pool.normalized();
        assert!(norm.iter().all(|c| c.allocated_hours == 0.0 && c.project_count == 0.0));
        assert!(norm.iter().all(|c| c.cost_per_hour.is_finite()));
    }

    #[test]
    fn test_without_keeps_order() {
        let pool: CandidatePool = ["A", "B", "C", "D"]
            .iter()
            .map(|id| Collaborator::new(*id, "X", "S", "K"))
            .collect();
        let rest = pool.without(["B", "D"]);

        let ids: Vec<&str> = rest.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["A", "C"]);
        assert_eq!(pool.len(), 4);
    }

    #[test]
    fn test_matching_indices_and_taxonomy() {
        let pool = CandidatePool::new(vec![
            Collaborator::new("A", "Dev", "Data", "Senior"),
            Collaborator::new("B", "Dev", "Data", "Junior"),
            Collaborator::new("C", "Dev", "Data", "Senior"),
        ]);
        assert_eq!(pool.matching_indices("Dev", "Data", "Senior"), vec![0, 2]);
        assert!(pool.matching_indices("QA", "Data", "Senior").is_empty());
        assert!(pool.has_role("Dev"));
        assert!(pool.has_sector("Data"));
        assert!(!pool.has_class("Principal"));

        let counts = pool.headcount_by_role_class();
        assert_eq!(counts[&("Dev".to_string(), "Senior".to_string())], 2);
        assert_eq!(counts[&("Dev".to_string(), "Junior".to_string())], 1);
    }
}
