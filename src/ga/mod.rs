//! GA-based squad allocation.
//!
//! An alternative to the LP allocator: searches binary inclusion vectors
//! with a seeded (μ+λ) evolutionary strategy. The chromosome and problem
//! implement `u_metaheur::ga::{Individual, GaProblem}`; survivor selection is
//! `u_metaheur::ga::Selection::Tournament`.
//!
//! # Encoding
//!
//! One gene per pool index; a set gene includes the collaborator. Fitness is
//! the weighted objective of the included collaborators plus a penalty per
//! head of mismatch against each requirement. Lower is better.
//!
//! # Submodules
//!
//! - [`operators`]: two-point crossover and bit-flip mutation
//!
//! # Reference
//! Beyer & Schwefel (2002), "Evolution strategies – A comprehensive introduction"

mod allocator;
mod chromosome;
pub mod operators;
mod problem;

pub use allocator::GaAllocator;
pub use chromosome::BitChromosome;
pub use problem::SquadGaProblem;
