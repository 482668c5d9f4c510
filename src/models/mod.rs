//! Squad allocation domain models.
//!
//! Provides the plain tabular records the allocators consume and produce.
//!
//! # Domain Mappings
//!
//! | u-squad | Staffing | Consulting | Operations |
//! |---------|----------|------------|------------|
//! | Collaborator | Employee | Consultant | Operator |
//! | CandidatePool | Roster | Bench | Crew list |
//! | SquadRequirement | Opening | Engagement slot | Shift slot |
//! | Recommendation | Proposed hire | Proposed staffing | Proposed crew |

mod collaborator;
mod recommendation;
mod requirement;
mod weights;

pub use collaborator::{AssignmentRecord, CandidatePool, Collaborator};
pub use recommendation::{round_label, AllocationResult, Recommendation, Selection};
pub use requirement::{group_requests, FallbackCeilings, ProjectRequest, RequestRow, SquadRequirement};
pub use weights::{normalize_weight, WeightVector};
