use chrono::{Datelike, NaiveDate};
use std::collections::BTreeSet;

use crate::models::{AgeRange, CaregiverProfile, ChildContext, JobOpportunity};

/// Age of a child on the evaluation date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildAge {
    /// Not born yet; cared for as a newborn
    Prenatal,
    /// Whole months since birth
    Months(u32),
}

impl ChildAge {
    pub fn bucket(&self) -> AgeRange {
        match self {
            ChildAge::Prenatal => AgeRange::Newborn,
            ChildAge::Months(months) => AgeRange::from_months(*months),
        }
    }
}

/// Children of `children` that the job opening refers to.
///
/// An opening with no child ids applies to every supplied child. Ids with no
/// matching entry are skipped.
pub fn relevant_children<'a>(
    job: &JobOpportunity,
    children: &'a [ChildContext],
) -> Vec<&'a ChildContext> {
    if job.child_ids.is_empty() {
        return children.iter().collect();
    }

    let wanted: BTreeSet<&str> = job.child_ids.iter().map(String::as_str).collect();
    children
        .iter()
        .filter(|child| wanted.contains(child.id.as_str()))
        .collect()
}

/// Effective age of `child` on `today`.
///
/// Returns `None` when the dates are missing or contradict each other (an
/// unborn child whose expected date has passed, or a birth date in the
/// future). Such children are left out of age-based calculations.
pub fn effective_age(child: &ChildContext, today: NaiveDate) -> Option<ChildAge> {
    if child.unborn {
        return match child.expected_birth_date {
            Some(expected) if expected < today => None,
            _ => Some(ChildAge::Prenatal),
        };
    }

    match (child.birth_date, child.expected_birth_date) {
        (Some(born), _) => months_between(born, today).map(ChildAge::Months),
        (None, Some(expected)) if expected >= today => Some(ChildAge::Prenatal),
        _ => None,
    }
}

fn months_between(from: NaiveDate, to: NaiveDate) -> Option<u32> {
    if from > to {
        return None;
    }

    let mut months = (to.year() - from.year()) * 12 + to.month() as i32 - from.month() as i32;
    if to.day() < from.day() {
        months -= 1;
    }

    u32::try_from(months).ok()
}

/// Whether the caregiver's declared special-needs experience covers this child.
///
/// Children without special needs are always covered. Otherwise the caregiver
/// must declare the experience; when both sides describe the condition the
/// descriptions must share at least one meaningful word.
pub fn special_needs_covered(caregiver: &CaregiverProfile, child: &ChildContext) -> bool {
    if !child.has_special_needs {
        return true;
    }
    if !caregiver.has_special_needs_experience {
        return false;
    }

    match (
        child.special_needs_description.as_deref(),
        caregiver.special_needs_experience_description.as_deref(),
    ) {
        (Some(needed), Some(declared)) => {
            let needed = keywords(needed);
            // a blank description on either side says nothing about the type
            if needed.is_empty() {
                return true;
            }
            let declared = keywords(declared);
            declared.is_empty() || !needed.is_disjoint(&declared)
        }
        _ => true,
    }
}

fn keywords(text: &str) -> BTreeSet<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|word| word.chars().count() >= 3)
        .map(str::to_lowercase)
        .collect()
}
