//! Input validation for allocation requests.
//!
//! Checks request rows and the candidate pool before allocation. Detects:
//! - Duplicate collaborator IDs
//! - Negative or non-numeric quantities
//! - Roles, sectors and classes absent from the pool taxonomy
//! - Rows without a project identifier
//!
//! The allocators assume these checks passed.

use crate::models::{CandidatePool, RequestRow};
use std::collections::HashSet;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two collaborators share the same ID.
    DuplicateId,
    /// A quantity is negative or not a finite number.
    NegativeValue,
    /// A role, sector or class does not occur in the pool.
    UnknownTaxonomy,
    /// A request row has an empty project identifier.
    MissingProject,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

fn is_valid_quantity(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

/// Validates allocation-request rows against the pool taxonomy.
///
/// Checks, per row:
/// 1. Project identifier is not empty
/// 2. Headcount, hours, project ceiling and cost ceiling are non-negative
/// 3. Role, sector and class each occur in the pool
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_requests(rows: &[RequestRow], pool: &CandidatePool) -> ValidationResult {
    let mut errors = Vec::new();

    for (line, row) in rows.iter().enumerate() {
        if row.project_id.trim().is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::MissingProject,
                format!("Row {line} has no project ID"),
            ));
        }

        if row.headcount < 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NegativeValue,
                format!("Row {line} ('{}'): negative headcount {}", row.project_id, row.headcount),
            ));
        }
        for (field, value) in [("hours", row.hours), ("projects", row.projects), ("cost", row.cost)] {
            if !is_valid_quantity(value) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::NegativeValue,
                    format!("Row {line} ('{}'): invalid {field} {value}", row.project_id),
                ));
            }
        }

        if !pool.has_role(&row.role) {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownTaxonomy,
                format!("Row {line} ('{}'): unknown role '{}'", row.project_id, row.role),
            ));
        }
        if !pool.has_sector(&row.sector) {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownTaxonomy,
                format!("Row {line} ('{}'): unknown sector '{}'", row.project_id, row.sector),
            ));
        }
        if !pool.has_class(&row.class) {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownTaxonomy,
                format!("Row {line} ('{}'): unknown class '{}'", row.project_id, row.class),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validates the candidate pool.
///
/// Checks:
/// 1. No duplicate collaborator IDs
/// 2. Cost, hours and project count are non-negative
pub fn validate_pool(pool: &CandidatePool) -> ValidationResult {
    let mut errors = Vec::new();
    let mut ids = HashSet::new();

    for c in pool.iter() {
        if !ids.insert(c.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate collaborator ID: {}", c.id),
            ));
        }

        let quantities = [
            ("cost", c.cost_per_hour),
            ("hours", c.allocated_hours),
            ("projects", c.project_count),
        ];
        for (field, value) in quantities {
            if !is_valid_quantity(value) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::NegativeValue,
                    format!("Collaborator '{}': invalid {field} {value}", c.id),
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
