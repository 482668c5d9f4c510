//! LP-based squad allocation.
//!
//! Builds a linear program per requirement set and solves it with
//! `microlp`. The default mode is the continuous relaxation, where any
//! strictly positive variable marks a selected collaborator; an integer mode
//! restricts variables to {0, 1}.
//!
//! # Submodules
//!
//! - [`formulation`]: solver-independent constraint system
//! - `solver`: `microlp` translation and timeout handling

mod allocator;
pub mod formulation;
mod solver;

pub use allocator::LpAllocator;
pub use formulation::{LinearRow, LpFormulation};
pub use solver::{running_workers, solve, LpMode};
