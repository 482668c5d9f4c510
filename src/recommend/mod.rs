//! Recommendation generation.
//!
//! Runs successive allocation rounds per project and summarizes the
//! resulting squads.
//!
//! # Submodules
//!
//! - [`kpi`]: per-squad and per-project metrics

pub mod kpi;
mod orchestrator;

pub use kpi::{coverage, SquadKpi};
pub use orchestrator::{
    allocate, effective_rounds, RecommendationOrchestrator, RecommendationRun, RoundReport,
    RoundStatus,
};
