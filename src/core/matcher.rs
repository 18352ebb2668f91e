use chrono::{DateTime, Utc};

use crate::models::{
    CaregiverProfile, ChildContext, FamilyContext, JobOpportunity, MatchResult, ScoringError,
    ScoringWeights,
};
use crate::core::{
    aggregate::{aggregate, round2},
    filters::evaluate_eligibility,
    scoring::calculate_breakdown,
};

/// Compatibility engine for one caregiver against one job opening
///
/// # Pipeline
/// 1. Eligibility filter (hard constraints, every reason collected)
/// 2. Component scorers (ten independent dimensions)
/// 3. Aggregation into fit, trust and bonus sub-totals
/// 4. Result assembly, always with the full breakdown
///
/// The matcher holds only its validated weight table. It performs no I/O and
/// keeps no state between calls, so one instance can be shared across threads.
#[derive(Debug, Clone)]
pub struct Matcher {
    weights: ScoringWeights,
}

impl Matcher {
    /// Create a matcher with a custom weight table.
    ///
    /// Fails when a weight is negative or not finite, or when the table does
    /// not sum to 100.
    pub fn new(weights: ScoringWeights) -> Result<Self, ScoringError> {
        weights.validate()?;
        Ok(Self { weights })
    }

    pub fn with_default_weights() -> Self {
        Self {
            weights: ScoringWeights::default(),
        }
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// Evaluate a caregiver for a job opening
    ///
    /// # Arguments
    /// * `job` - The job opening and its mandatory requirements
    /// * `family` - The household behind the job
    /// * `children` - Child snapshots the caller could resolve for `job.child_ids`
    /// * `caregiver` - The candidate profile
    /// * `evaluated_at` - Reference time for ages and document expiry
    ///
    /// # Returns
    /// A fully populated MatchResult. An ineligible caregiver is a normal
    /// result with elimination reasons, never an error.
    pub fn compute_match(
        &self,
        job: &JobOpportunity,
        family: &FamilyContext,
        children: &[ChildContext],
        caregiver: &CaregiverProfile,
        evaluated_at: DateTime<Utc>,
    ) -> MatchResult {
        let today = evaluated_at.date_naive();

        // Stage 1: Hard constraints, independent of scoring
        let eligibility = evaluate_eligibility(job, family, children, caregiver, today);

        // Stage 2: Component scores
        let mut breakdown =
            calculate_breakdown(job, family, children, caregiver, today, &self.weights);
        breakdown.map_scores(round2);

        // Stage 3: Sub-totals
        let totals = aggregate(&breakdown);

        tracing::debug!(
            job_id = %job.id,
            caregiver_id = %caregiver.id,
            score = totals.score,
            eligible = eligibility.is_eligible(),
            reasons = eligibility.reasons.len(),
            "Computed match"
        );

        // Stage 4: Assemble
        MatchResult {
            score: totals.score,
            fit_score: totals.fit_score,
            trust_score: totals.trust_score,
            bonus_score: totals.bonus_score,
            is_eligible: eligibility.is_eligible(),
            elimination_reasons: eligibility.reason_messages(),
            breakdown,
        }
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::with_default_weights()
    }
}

/// Evaluate a caregiver for a job opening with the default weight table
pub fn compute_match(
    job: &JobOpportunity,
    family: &FamilyContext,
    children: &[ChildContext],
    caregiver: &CaregiverProfile,
    evaluated_at: DateTime<Utc>,
) -> MatchResult {
    Matcher::with_default_weights().compute_match(job, family, children, caregiver, evaluated_at)
}
