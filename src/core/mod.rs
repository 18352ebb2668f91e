// Core engine exports
pub mod aggregate;
pub mod availability;
pub mod children;
pub mod distance;
pub mod filters;
pub mod matcher;
pub mod scoring;

pub use aggregate::{aggregate, AggregateScore};
pub use availability::overlap;
pub use distance::{distance_between, haversine_distance};
pub use filters::{evaluate_eligibility, Eligibility, EliminationReason};
pub use matcher::{compute_match, Matcher};
pub use scoring::calculate_breakdown;
