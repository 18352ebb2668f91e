use chrono::NaiveDate;

use crate::models::{
    Activity, CaregiverProfile, ChildContext, FamilyContext, JobOpportunity, MatchBreakdown,
    ScoreComponent, ScoringWeights,
};
use super::availability::overlap;
use super::children::{effective_age, relevant_children, special_needs_covered};
use super::distance::distance_between;

/// Share of `maxScore` a caregiver with no reviews receives
pub const NEUTRAL_REVIEW_FRACTION: f64 = 0.5;

/// Review count at which the reviews score stops gaining confidence
pub const REVIEW_SATURATION_COUNT: f64 = 10.0;

/// Children above the caregiver's ceiling before the score reaches zero
pub const CHILDREN_EXCESS_TOLERANCE: u32 = 2;

/// Credit for a covered child whose special needs the caregiver doesn't cover
const UNCOVERED_SPECIAL_NEEDS_CREDIT: f64 = 0.5;

/// Credit for an adjacent contract regime or a one-band-over budget
const PARTIAL_CREDIT: f64 = 0.5;

/// Calculate the full ten-entry breakdown for a caregiver/job pair
///
/// Scorers are independent of each other and of eligibility; each one has
/// an explicit fallback for missing data so the breakdown is always complete.
pub fn calculate_breakdown(
    job: &JobOpportunity,
    family: &FamilyContext,
    children: &[ChildContext],
    caregiver: &CaregiverProfile,
    today: NaiveDate,
    weights: &ScoringWeights,
) -> MatchBreakdown {
    MatchBreakdown {
        age_range: score_age_range(job, children, caregiver, today, weights.age_range),
        modality: score_modality(family, caregiver, weights.modality),
        activities: score_activities(family, caregiver, weights.activities),
        regime: score_regime(family, caregiver, weights.regime),
        availability: score_availability(family, caregiver, weights.availability),
        children_count: score_children_count(family, caregiver, weights.children_count),
        seal: score_seal(caregiver, today, weights.seal),
        reviews: score_reviews(caregiver, weights.reviews),
        distance_bonus: score_distance_bonus(family, caregiver, weights.distance_bonus),
        budget_bonus: score_budget_bonus(family, caregiver, weights.budget_bonus),
    }
}

/// Fraction of the relevant children whose age the caregiver has experience with
pub fn score_age_range(
    job: &JobOpportunity,
    children: &[ChildContext],
    caregiver: &CaregiverProfile,
    today: NaiveDate,
    max_score: f64,
) -> ScoreComponent {
    let aged: Vec<_> = relevant_children(job, children)
        .into_iter()
        .filter_map(|child| effective_age(child, today).map(|age| (child, age)))
        .collect();

    // Fallback: nothing to compare against, conservative zero
    if aged.is_empty() {
        return ScoreComponent::zero(max_score, "No child age information available");
    }

    let mut credit = 0.0;
    let mut covered = 0;
    let mut uncovered_needs = 0;

    for (child, age) in &aged {
        if !caregiver.age_ranges_experience.contains(&age.bucket()) {
            continue;
        }
        covered += 1;
        if special_needs_covered(caregiver, child) {
            credit += 1.0;
        } else {
            uncovered_needs += 1;
            credit += UNCOVERED_SPECIAL_NEEDS_CREDIT;
        }
    }

    let mut details = format!(
        "{} of {} children within declared age ranges",
        covered,
        aged.len()
    );
    if uncovered_needs > 0 {
        details.push_str(&format!(
            "; special needs not covered for {}",
            uncovered_needs
        ));
    }

    ScoreComponent::scaled(credit / aged.len() as f64, max_score, details)
}

pub fn score_modality(
    family: &FamilyContext,
    caregiver: &CaregiverProfile,
    max_score: f64,
) -> ScoreComponent {
    let preferred = family.preferred_modality;
    if caregiver.employment_modalities.contains(&preferred) {
        ScoreComponent::full(max_score, format!("Works {}", preferred.label()))
    } else {
        ScoreComponent::zero(max_score, format!("Does not work {}", preferred.label()))
    }
}

/// Jaccard overlap of requested and accepted household activities.
///
/// Refusing any requested activity zeroes the component regardless of the
/// overlap. Pets are a hard constraint (`PetFriendly`), not scored here.
pub fn score_activities(
    family: &FamilyContext,
    caregiver: &CaregiverProfile,
    max_score: f64,
) -> ScoreComponent {
    let expected = &family.domestic_help_expected;

    let refused: Vec<&str> = expected
        .intersection(&caregiver.refused_activities)
        .map(Activity::label)
        .collect();
    if !refused.is_empty() {
        return ScoreComponent::zero(max_score, format!("Refuses: {}", refused.join(", ")));
    }

    // Fallback: no household help requested, trivially satisfied
    if expected.is_empty() {
        return ScoreComponent::full(max_score, "No household activities requested");
    }

    let shared = expected.intersection(&caregiver.accepted_activities).count();
    let union = expected.union(&caregiver.accepted_activities).count();
    let fraction = shared as f64 / union as f64;

    ScoreComponent::scaled(
        fraction,
        max_score,
        format!("{} of {} requested activities accepted", shared, expected.len()),
    )
}

pub fn score_regime(
    family: &FamilyContext,
    caregiver: &CaregiverProfile,
    max_score: f64,
) -> ScoreComponent {
    let preferred = family.preferred_regime;

    if caregiver.contract_regimes.contains(&preferred) {
        return ScoreComponent::full(max_score, format!("Accepts {}", preferred.label()));
    }

    match caregiver
        .contract_regimes
        .iter()
        .find(|regime| regime.is_adjacent_to(&preferred))
    {
        Some(adjacent) => ScoreComponent::scaled(
            PARTIAL_CREDIT,
            max_score,
            format!("Accepts {} instead of {}", adjacent.label(), preferred.label()),
        ),
        None => ScoreComponent::zero(
            max_score,
            format!("No compatible regime for {}", preferred.label()),
        ),
    }
}

pub fn score_availability(
    family: &FamilyContext,
    caregiver: &CaregiverProfile,
    max_score: f64,
) -> ScoreComponent {
    let fraction = overlap(&caregiver.availability_slots, &family.availability_slots);

    let details = if family.availability_slots.is_empty() {
        "No schedule requested".to_string()
    } else {
        format!("Covers {:.0}% of the requested schedule", fraction * 100.0)
    };

    ScoreComponent::scaled(fraction, max_score, details)
}

/// Full score within the caregiver's ceiling, degrading linearly for up to
/// `CHILDREN_EXCESS_TOLERANCE` extra children and zero beyond.
pub fn score_children_count(
    family: &FamilyContext,
    caregiver: &CaregiverProfile,
    max_score: f64,
) -> ScoreComponent {
    let wanted = family.number_of_children;
    let ceiling = caregiver.max_children_care;
    let excess = wanted.saturating_sub(ceiling);

    if excess == 0 {
        return ScoreComponent::full(
            max_score,
            format!("Cares for up to {} children; family has {}", ceiling, wanted),
        );
    }

    let fraction = if excess > CHILDREN_EXCESS_TOLERANCE {
        0.0
    } else {
        1.0 - excess as f64 / (CHILDREN_EXCESS_TOLERANCE + 1) as f64
    };

    ScoreComponent::scaled(
        fraction,
        max_score,
        format!("Family has {} children, {} above the caregiver's limit", wanted, excess),
    )
}

/// Equal shares for each verified trust flag. An expired document earns nothing.
pub fn score_seal(caregiver: &CaregiverProfile, today: NaiveDate, max_score: f64) -> ScoreComponent {
    let checks = [
        ("document", caregiver.document_currently_valid(today)),
        ("personal data", caregiver.personal_data_validated),
        ("background check", caregiver.criminal_background_validated),
    ];

    let passed: Vec<&str> = checks
        .iter()
        .filter(|(_, ok)| *ok)
        .map(|(name, _)| *name)
        .collect();

    let mut details = if passed.is_empty() {
        "No verification completed".to_string()
    } else {
        format!("Verified: {}", passed.join(", "))
    };
    if caregiver.document_validated && !caregiver.document_currently_valid(today) {
        details.push_str("; document expired");
    }

    ScoreComponent::scaled(
        passed.len() as f64 / checks.len() as f64,
        max_score,
        details,
    )
}

/// Rating-driven score damped by review volume.
///
/// New caregivers sit at a neutral floor. Reviews only add to it:
/// `floor + (max - floor) × rating/5 × min(1, count/10)`, so the first review
/// never lowers the score and the result is monotonic in rating and count.
pub fn score_reviews(caregiver: &CaregiverProfile, max_score: f64) -> ScoreComponent {
    let neutral = max_score * NEUTRAL_REVIEW_FRACTION;

    // Fallback: no reviews yet, or a count without a usable rating
    let rating = match caregiver.average_rating {
        Some(rating) if caregiver.review_count > 0 && rating.is_finite() => rating.clamp(0.0, 5.0),
        _ => return ScoreComponent::new(neutral, max_score, "No reviews yet"),
    };

    let count = caregiver.review_count as f64;
    let confidence = (count / REVIEW_SATURATION_COUNT).min(1.0);

    ScoreComponent::new(
        neutral + (max_score - neutral) * (rating / 5.0) * confidence,
        max_score,
        format!("{:.1} average from {} reviews", rating, caregiver.review_count),
    )
}

/// Linear proximity bonus, from `max` at zero distance to 0 at the
/// caregiver's travel horizon.
pub fn score_distance_bonus(
    family: &FamilyContext,
    caregiver: &CaregiverProfile,
    max_score: f64,
) -> ScoreComponent {
    // Fallback: distance is unknown, no bonus
    let Some(distance_km) = distance_between(caregiver.location, family.location) else {
        return ScoreComponent::zero(max_score, "Location unavailable");
    };

    let horizon = caregiver.max_travel_distance.decay_horizon_km();
    let fraction = (1.0 - distance_km / horizon).max(0.0);

    ScoreComponent::scaled(fraction, max_score, format!("{:.1} km away", distance_km))
}

pub fn score_budget_bonus(
    family: &FamilyContext,
    caregiver: &CaregiverProfile,
    max_score: f64,
) -> ScoreComponent {
    let asked = caregiver.hourly_rate_range;
    let budget = family.hourly_rate_range;

    if asked.rank() <= budget.rank() {
        ScoreComponent::full(max_score, format!("{} fits the {} budget", asked.label(), budget.label()))
    } else if asked.rank() == budget.rank() + 1 {
        ScoreComponent::scaled(
            PARTIAL_CREDIT,
            max_score,
            format!("{} is one band above the {} budget", asked.label(), budget.label()),
        )
    } else {
        ScoreComponent::zero(max_score, format!("{} exceeds the {} budget", asked.label(), budget.label()))
    }
}
