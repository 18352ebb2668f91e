use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thiserror::Error;

use super::vocabulary::{
    Activity, AgeRange, Certification, DaySlot, DistanceBucket, Gender, Modality, PetComfort,
    RateBucket, Regime, Requirement,
};

/// Geographic coordinate in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub long: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, long: f64) -> Self {
        Self { lat, long }
    }
}

/// Caregiver profile snapshot
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CaregiverProfile {
    pub id: String,
    pub gender: Gender,
    pub birth_date: Option<NaiveDate>,
    pub is_smoker: bool,
    pub has_drivers_license: bool,
    pub experience_years: u32,
    pub has_special_needs_experience: bool,
    pub special_needs_experience_description: Option<String>,
    pub certifications: BTreeSet<Certification>,
    pub age_ranges_experience: BTreeSet<AgeRange>,
    pub max_travel_distance: DistanceBucket,
    pub max_children_care: u32,
    pub pet_comfort: PetComfort,
    pub accepted_activities: BTreeSet<Activity>,
    pub refused_activities: BTreeSet<Activity>,
    pub employment_modalities: BTreeSet<Modality>,
    pub contract_regimes: BTreeSet<Regime>,
    pub hourly_rate_range: RateBucket,
    pub document_validated: bool,
    pub document_expiration_date: Option<NaiveDate>,
    pub personal_data_validated: bool,
    pub criminal_background_validated: bool,
    pub average_rating: Option<f64>,
    pub review_count: u32,
    pub last_active_at: Option<DateTime<Utc>>,
    pub location: Option<GeoPoint>,
    pub availability_slots: BTreeSet<DaySlot>,
}

impl CaregiverProfile {
    /// Whether the identity document counts as validated on `today`.
    ///
    /// A stored `documentValidated = true` is ignored once the document has expired.
    pub fn document_currently_valid(&self, today: NaiveDate) -> bool {
        self.document_validated
            && self
                .document_expiration_date
                .map_or(true, |expires| expires >= today)
    }
}

/// Job opening published by a family
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JobOpportunity {
    pub id: String,
    pub mandatory_requirements: BTreeSet<Requirement>,
    pub child_ids: Vec<String>,
}

/// Household context of the family behind a job
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FamilyContext {
    pub id: String,
    pub has_pets: bool,
    pub number_of_children: u32,
    pub preferred_modality: Modality,
    pub preferred_regime: Regime,
    pub hourly_rate_range: RateBucket,
    pub domestic_help_expected: BTreeSet<Activity>,
    pub availability_slots: BTreeSet<DaySlot>,
    pub location: Option<GeoPoint>,
}

/// A child referenced by a job opening
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChildContext {
    pub id: String,
    pub birth_date: Option<NaiveDate>,
    pub expected_birth_date: Option<NaiveDate>,
    pub unborn: bool,
    pub has_special_needs: bool,
    pub special_needs_description: Option<String>,
}

/// One explained dimension of the compatibility score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreComponent {
    pub score: f64,
    #[serde(rename = "maxScore")]
    pub max_score: f64,
    pub details: Option<String>,
}

impl ScoreComponent {
    /// Build a component, clamping `score` into `[0, max_score]`.
    ///
    /// A negative or non-finite `max_score` is treated as 0.
    pub fn new(score: f64, max_score: f64, details: impl Into<String>) -> Self {
        let max_score = non_negative(max_score);
        let score = if score.is_finite() { score } else { 0.0 };
        Self {
            score: score.clamp(0.0, max_score),
            max_score,
            details: Some(details.into()),
        }
    }

    /// `fraction` of the maximum, clamped to `[0, 1]`.
    pub fn scaled(fraction: f64, max_score: f64, details: impl Into<String>) -> Self {
        Self::new(fraction * max_score, max_score, details)
    }

    pub fn full(max_score: f64, details: impl Into<String>) -> Self {
        Self::new(max_score, max_score, details)
    }

    pub fn zero(max_score: f64, details: impl Into<String>) -> Self {
        Self::new(0.0, max_score, details)
    }
}

fn non_negative(value: f64) -> f64 {
    if value.is_finite() {
        value.max(0.0)
    } else {
        0.0
    }
}

/// Names of the ten breakdown entries, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BreakdownKey {
    AgeRange,
    Modality,
    Activities,
    Regime,
    Availability,
    ChildrenCount,
    Seal,
    Reviews,
    DistanceBonus,
    BudgetBonus,
}

impl BreakdownKey {
    pub const ALL: [BreakdownKey; 10] = [
        BreakdownKey::AgeRange,
        BreakdownKey::Modality,
        BreakdownKey::Activities,
        BreakdownKey::Regime,
        BreakdownKey::Availability,
        BreakdownKey::ChildrenCount,
        BreakdownKey::Seal,
        BreakdownKey::Reviews,
        BreakdownKey::DistanceBonus,
        BreakdownKey::BudgetBonus,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            BreakdownKey::AgeRange => "Experience with the children's ages",
            BreakdownKey::Modality => "Work modality",
            BreakdownKey::Activities => "Household activities",
            BreakdownKey::Regime => "Contract regime",
            BreakdownKey::Availability => "Schedule availability",
            BreakdownKey::ChildrenCount => "Number of children",
            BreakdownKey::Seal => "Verification seal",
            BreakdownKey::Reviews => "Reviews",
            BreakdownKey::DistanceBonus => "Proximity bonus",
            BreakdownKey::BudgetBonus => "Budget bonus",
        }
    }
}

/// Per-dimension explanation of a match. Always carries all ten entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchBreakdown {
    pub age_range: ScoreComponent,
    pub modality: ScoreComponent,
    pub activities: ScoreComponent,
    pub regime: ScoreComponent,
    pub availability: ScoreComponent,
    pub children_count: ScoreComponent,
    pub seal: ScoreComponent,
    pub reviews: ScoreComponent,
    pub distance_bonus: ScoreComponent,
    pub budget_bonus: ScoreComponent,
}

impl MatchBreakdown {
    pub fn get(&self, key: BreakdownKey) -> &ScoreComponent {
        match key {
            BreakdownKey::AgeRange => &self.age_range,
            BreakdownKey::Modality => &self.modality,
            BreakdownKey::Activities => &self.activities,
            BreakdownKey::Regime => &self.regime,
            BreakdownKey::Availability => &self.availability,
            BreakdownKey::ChildrenCount => &self.children_count,
            BreakdownKey::Seal => &self.seal,
            BreakdownKey::Reviews => &self.reviews,
            BreakdownKey::DistanceBonus => &self.distance_bonus,
            BreakdownKey::BudgetBonus => &self.budget_bonus,
        }
    }

    fn get_mut(&mut self, key: BreakdownKey) -> &mut ScoreComponent {
        match key {
            BreakdownKey::AgeRange => &mut self.age_range,
            BreakdownKey::Modality => &mut self.modality,
            BreakdownKey::Activities => &mut self.activities,
            BreakdownKey::Regime => &mut self.regime,
            BreakdownKey::Availability => &mut self.availability,
            BreakdownKey::ChildrenCount => &mut self.children_count,
            BreakdownKey::Seal => &mut self.seal,
            BreakdownKey::Reviews => &mut self.reviews,
            BreakdownKey::DistanceBonus => &mut self.distance_bonus,
            BreakdownKey::BudgetBonus => &mut self.budget_bonus,
        }
    }

    /// Entries in display order
    pub fn entries(&self) -> impl Iterator<Item = (BreakdownKey, &ScoreComponent)> + '_ {
        BreakdownKey::ALL.into_iter().map(move |key| (key, self.get(key)))
    }

    /// Apply `f` to the score of every entry, keeping it within `[0, maxScore]`
    pub fn map_scores(&mut self, f: impl Fn(f64) -> f64) {
        for key in BreakdownKey::ALL {
            let component = self.get_mut(key);
            let score = f(component.score);
            let score = if score.is_finite() { score } else { 0.0 };
            component.score = score.clamp(0.0, non_negative(component.max_score));
        }
    }

    pub fn total_max_score(&self) -> f64 {
        self.entries().map(|(_, c)| c.max_score).sum()
    }
}

/// Fully explained outcome of one caregiver/job evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    pub score: u8,
    pub fit_score: f64,
    pub trust_score: f64,
    pub bonus_score: f64,
    pub is_eligible: bool,
    pub elimination_reasons: Vec<String>,
    pub breakdown: MatchBreakdown,
}

/// Errors raised while configuring the scoring engine
#[derive(Debug, Error, PartialEq)]
pub enum ScoringError {
    #[error("weight for {key:?} must be finite and non-negative, got {value}")]
    InvalidWeight { key: BreakdownKey, value: f64 },

    #[error("scoring weights must sum to 100, got {0}")]
    InvalidTotal(f64),
}

/// Maximum points per breakdown entry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub age_range: f64,
    pub modality: f64,
    pub activities: f64,
    pub regime: f64,
    pub availability: f64,
    pub children_count: f64,
    pub seal: f64,
    pub reviews: f64,
    pub distance_bonus: f64,
    pub budget_bonus: f64,
}

impl ScoringWeights {
    pub fn get(&self, key: BreakdownKey) -> f64 {
        match key {
            BreakdownKey::AgeRange => self.age_range,
            BreakdownKey::Modality => self.modality,
            BreakdownKey::Activities => self.activities,
            BreakdownKey::Regime => self.regime,
            BreakdownKey::Availability => self.availability,
            BreakdownKey::ChildrenCount => self.children_count,
            BreakdownKey::Seal => self.seal,
            BreakdownKey::Reviews => self.reviews,
            BreakdownKey::DistanceBonus => self.distance_bonus,
            BreakdownKey::BudgetBonus => self.budget_bonus,
        }
    }

    pub fn total(&self) -> f64 {
        BreakdownKey::ALL.iter().map(|key| self.get(*key)).sum()
    }

    /// Check that every weight is usable and that the table sums to 100.
    pub fn validate(&self) -> Result<(), ScoringError> {
        for key in BreakdownKey::ALL {
            let value = self.get(key);
            if !value.is_finite() || value < 0.0 {
                return Err(ScoringError::InvalidWeight { key, value });
            }
        }

        let total = self.total();
        if (total - 100.0).abs() > 1e-6 {
            return Err(ScoringError::InvalidTotal(total));
        }

        Ok(())
    }
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            age_range: 15.0,
            modality: 10.0,
            activities: 15.0,
            regime: 10.0,
            availability: 15.0,
            children_count: 10.0,
            seal: 10.0,
            reviews: 10.0,
            distance_bonus: 3.0,
            budget_bonus: 2.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights_sum_to_100() {
        let weights = ScoringWeights::default();
        assert_eq!(weights.total(), 100.0);
        assert!(weights.validate().is_ok());
    }

    #[test]
    fn test_weights_reject_bad_total() {
        let weights = ScoringWeights {
            budget_bonus: 5.0,
            ..ScoringWeights::default()
        };
        assert_eq!(weights.validate(), Err(ScoringError::InvalidTotal(103.0)));
    }

    #[test]
    fn test_weights_reject_negative_entry() {
        let weights = ScoringWeights {
            reviews: -1.0,
            seal: 21.0,
            ..ScoringWeights::default()
        };
        assert!(matches!(
            weights.validate(),
            Err(ScoringError::InvalidWeight { key: BreakdownKey::Reviews, .. })
        ));
    }

    #[test]
    fn test_score_component_clamps() {
        let over = ScoreComponent::new(12.0, 10.0, "over");
        assert_eq!(over.score, 10.0);

        let under = ScoreComponent::new(-3.0, 10.0, "under");
        assert_eq!(under.score, 0.0);

        let nan = ScoreComponent::new(f64::NAN, 10.0, "nan");
        assert_eq!(nan.score, 0.0);
    }

    #[test]
    fn test_score_component_tolerates_bad_max() {
        let negative = ScoreComponent::new(3.0, -1.0, "negative max");
        assert_eq!(negative.max_score, 0.0);
        assert_eq!(negative.score, 0.0);

        let nan = ScoreComponent::scaled(0.5, f64::NAN, "nan max");
        assert_eq!(nan.max_score, 0.0);
        assert_eq!(nan.score, 0.0);
    }

    #[test]
    fn test_map_scores_tolerates_bad_max() {
        let component = ScoreComponent {
            score: 4.0,
            max_score: -2.0,
            details: None,
        };
        let mut breakdown = MatchBreakdown {
            age_range: component.clone(),
            modality: component.clone(),
            activities: component.clone(),
            regime: component.clone(),
            availability: component.clone(),
            children_count: component.clone(),
            seal: component.clone(),
            reviews: component.clone(),
            distance_bonus: component.clone(),
            budget_bonus: component,
        };

        breakdown.map_scores(|score| score * 2.0);
        assert!(breakdown.entries().all(|(_, c)| c.score == 0.0));
    }

    #[test]
    fn test_expired_document_is_not_valid() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let mut caregiver = CaregiverProfile {
            document_validated: true,
            document_expiration_date: NaiveDate::from_ymd_opt(2024, 5, 31),
            ..Default::default()
        };
        assert!(!caregiver.document_currently_valid(today));

        caregiver.document_expiration_date = Some(today);
        assert!(caregiver.document_currently_valid(today));

        caregiver.document_expiration_date = None;
        assert!(caregiver.document_currently_valid(today));
    }

    #[test]
    fn test_profile_deserializes_with_defaults() {
        let json = r#"{"id": "cg-1", "isSmoker": true, "ageRangesExperience": ["TODDLER"]}"#;
        let profile: CaregiverProfile = serde_json::from_str(json).unwrap();

        assert_eq!(profile.id, "cg-1");
        assert!(profile.is_smoker);
        assert!(profile.age_ranges_experience.contains(&AgeRange::Toddler));
        assert_eq!(profile.review_count, 0);
        assert!(profile.location.is_none());
    }
}
