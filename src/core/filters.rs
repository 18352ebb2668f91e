use chrono::NaiveDate;
use std::fmt;

use crate::models::{
    CaregiverProfile, ChildContext, FamilyContext, JobOpportunity, Requirement,
};
use super::children::{effective_age, relevant_children};
use super::distance::distance_between;

/// Why a caregiver cannot be shown for a job
#[derive(Debug, Clone, PartialEq)]
pub enum EliminationReason {
    /// A mandatory requirement of the job is not met
    UnmetRequirement(Requirement),
    /// None of the children falls in an age range the caregiver works with
    NoAgeRangeOverlap,
    /// The family lives beyond the caregiver's travel ceiling
    OutOfTravelRange { distance_km: f64, max_km: f64 },
}

impl fmt::Display for EliminationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EliminationReason::UnmetRequirement(requirement) => {
                write!(f, "{}", unmet_requirement_message(*requirement))
            }
            EliminationReason::NoAgeRangeOverlap => write!(
                f,
                "No age-range overlap: the caregiver has no declared experience with the children's ages"
            ),
            EliminationReason::OutOfTravelRange { distance_km, max_km } => write!(
                f,
                "Family is {:.1} km away, beyond the caregiver's {:.0} km travel limit",
                distance_km, max_km
            ),
        }
    }
}

fn unmet_requirement_message(requirement: Requirement) -> &'static str {
    match requirement {
        Requirement::NonSmoker => "Job requires a non-smoker and the caregiver smokes",
        Requirement::HasVehicle => "Job requires a driver's license and the caregiver has none",
        Requirement::SpecialNeedsExperience => {
            "Job requires special needs experience and the caregiver declares none"
        }
        Requirement::PetFriendly => {
            "Job requires comfort with pets and the caregiver is not comfortable with pets"
        }
        Requirement::ValidatedDocuments => {
            "Job requires a valid identity document and the caregiver's is missing or expired"
        }
        Requirement::CriminalBackgroundCheck => {
            "Job requires a criminal background check and the caregiver has not passed one"
        }
    }
}

/// Outcome of the hard-constraint checks
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Eligibility {
    pub reasons: Vec<EliminationReason>,
}

impl Eligibility {
    pub fn is_eligible(&self) -> bool {
        self.reasons.is_empty()
    }

    pub fn reason_messages(&self) -> Vec<String> {
        self.reasons.iter().map(ToString::to_string).collect()
    }
}

/// Check whether the caregiver satisfies a single mandatory requirement
#[inline]
pub fn meets_requirement(
    caregiver: &CaregiverProfile,
    requirement: Requirement,
    today: NaiveDate,
) -> bool {
    match requirement {
        Requirement::NonSmoker => !caregiver.is_smoker,
        Requirement::HasVehicle => caregiver.has_drivers_license,
        Requirement::SpecialNeedsExperience => caregiver.has_special_needs_experience,
        Requirement::PetFriendly => caregiver.pet_comfort.accepts_pets(),
        Requirement::ValidatedDocuments => caregiver.document_currently_valid(today),
        Requirement::CriminalBackgroundCheck => caregiver.criminal_background_validated,
    }
}

/// Check whether at least one relevant child falls in a declared age range.
///
/// Children whose age cannot be determined do not count; a job with no
/// determinable child therefore has no overlap.
#[inline]
pub fn has_age_range_overlap(
    job: &JobOpportunity,
    children: &[ChildContext],
    caregiver: &CaregiverProfile,
    today: NaiveDate,
) -> bool {
    relevant_children(job, children)
        .into_iter()
        .filter_map(|child| effective_age(child, today))
        .any(|age| caregiver.age_ranges_experience.contains(&age.bucket()))
}

/// Evaluate every hard constraint for a caregiver/job pair.
///
/// All rules run so that every applicable reason is reported, not only the
/// first failure. Ratings, reviews, price and soft preferences never affect
/// eligibility.
pub fn evaluate_eligibility(
    job: &JobOpportunity,
    family: &FamilyContext,
    children: &[ChildContext],
    caregiver: &CaregiverProfile,
    today: NaiveDate,
) -> Eligibility {
    let mut reasons = Vec::new();

    // Mandatory requirements, one reason per unmet requirement
    for requirement in &job.mandatory_requirements {
        if !meets_requirement(caregiver, *requirement, today) {
            reasons.push(EliminationReason::UnmetRequirement(*requirement));
        }
    }

    // Age-range coverage
    if !has_age_range_overlap(job, children, caregiver, today) {
        reasons.push(EliminationReason::NoAgeRangeOverlap);
    }

    // Travel ceiling, only when both locations are known
    if let (Some(distance_km), Some(max_km)) = (
        distance_between(caregiver.location, family.location),
        caregiver.max_travel_distance.ceiling_km(),
    ) {
        if distance_km > max_km {
            reasons.push(EliminationReason::OutOfTravelRange { distance_km, max_km });
        }
    }

    Eligibility { reasons }
}
