// Model exports
pub mod domain;
pub mod requests;
pub mod responses;
pub mod vocabulary;

pub use domain::{
    BreakdownKey, CaregiverProfile, ChildContext, FamilyContext, GeoPoint, JobOpportunity,
    MatchBreakdown, MatchResult, ScoreComponent, ScoringError, ScoringWeights,
};
pub use requests::{ComputeMatchRequest, RankCandidatesRequest};
pub use responses::{ErrorResponse, HealthResponse, RankCandidatesResponse, RankedCandidate};
pub use vocabulary::{
    Activity, AgeRange, Certification, Day, DaySlot, DistanceBucket, Gender, Modality, PetComfort,
    RateBucket, Regime, Requirement, Shift,
};
