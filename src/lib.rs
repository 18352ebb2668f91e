//! Care Match - compatibility engine between caregivers and family job openings
//!
//! The engine decides whether a caregiver is eligible for a job and computes
//! an explainable 0-100 compatibility score with a ten-entry breakdown.
//! It is a pure, synchronous library; the `routes` and `services` modules
//! expose it over HTTP for callers that need a network boundary.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use core::{compute_match, Matcher};
pub use models::{
    CaregiverProfile, ChildContext, FamilyContext, JobOpportunity, MatchBreakdown, MatchResult,
    ScoreComponent, ScoringWeights,
};
