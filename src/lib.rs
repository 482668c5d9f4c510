//! Squad allocation engine for the U-Engine ecosystem.
//!
//! Recommends project squads from a pool of collaborators. Each project
//! requests headcount per (role, sector, class) together with workload, load
//! and cost ceilings; an allocator picks the collaborators that minimize a
//! weighted score of their current load, and the orchestrator repeats this
//! for several alternative rounds per project.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `Collaborator`, `CandidatePool`,
//!   `SquadRequirement`, `WeightVector`, `AllocationResult`, `Recommendation`
//! - **`allocator`**: The `SquadAllocator` contract and strategy selection
//! - **`lp`**: Linear-programming allocator (relaxed or 0/1)
//! - **`ga`**: Genetic-algorithm allocator over binary chromosomes
//! - **`recommend`**: Multi-round orchestration and squad KPIs
//! - **`validation`**: Input integrity checks (negative values, unknown taxonomy)
//! - **`config`**, **`error`**: Allocator configuration and failure modes
//!
//! # Example
//!
//! ```
//! use u_squad::models::{CandidatePool, Collaborator, ProjectRequest, SquadRequirement, WeightVector};
//! use u_squad::recommend::allocate;
//!
//! let pool = CandidatePool::new(vec![
//!     Collaborator::new("C1", "Dev", "Data", "Senior").with_cost(50.0),
//!     Collaborator::new("C2", "Dev", "Data", "Senior").with_cost(30.0),
//! ]);
//! let project = ProjectRequest::new("P1")
//!     .with_requirement(SquadRequirement::new("Dev", "Data", "Senior", 1).with_ceilings(100.0, 10.0, 100.0));
//!
//! let recs = allocate(&pool, &[project], WeightVector::default(), 1);
//! assert_eq!(recs.len(), 1);
//! assert_eq!(recs[0].collaborator_id, "C2");
//! ```
//!
//! # References
//!
//! - Wolsey (1998), "Integer Programming"
//! - Eiben & Smith (2015), "Introduction to Evolutionary Computing"

pub mod allocator;
pub mod config;
pub mod error;
pub mod ga;
pub mod lp;
pub mod models;
pub mod recommend;
pub mod validation;
