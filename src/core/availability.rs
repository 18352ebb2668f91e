use std::collections::BTreeSet;

use crate::models::DaySlot;

/// Share of the family's requested slots the caregiver can cover.
///
/// The denominator is the family's need, not the caregiver's supply: a
/// caregiver available all week covers a two-slot family completely.
/// A family that states no slots has nothing to cover, so the result is `1.0`.
pub fn overlap(caregiver_slots: &BTreeSet<DaySlot>, family_slots: &BTreeSet<DaySlot>) -> f64 {
    if family_slots.is_empty() {
        return 1.0;
    }

    let covered = covered_slots(caregiver_slots, family_slots).count();
    covered as f64 / family_slots.len() as f64
}

/// Family slots the caregiver is available for, in week order
pub fn covered_slots<'a>(
    caregiver_slots: &'a BTreeSet<DaySlot>,
    family_slots: &'a BTreeSet<DaySlot>,
) -> impl Iterator<Item = &'a DaySlot> + 'a {
    family_slots.intersection(caregiver_slots)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Day, Shift};

    fn slots(items: &[(Day, Shift)]) -> BTreeSet<DaySlot> {
        items.iter().map(|(d, s)| DaySlot::new(*d, *s)).collect()
    }

    #[test]
    fn test_empty_family_need_is_fully_covered() {
        let caregiver = slots(&[(Day::Monday, Shift::Morning)]);
        assert_eq!(overlap(&caregiver, &BTreeSet::new()), 1.0);
        assert_eq!(overlap(&BTreeSet::new(), &BTreeSet::new()), 1.0);
    }

    #[test]
    fn test_partial_overlap() {
        let family = slots(&[
            (Day::Monday, Shift::Morning),
            (Day::Tuesday, Shift::Morning),
            (Day::Wednesday, Shift::Morning),
            (Day::Thursday, Shift::Morning),
        ]);
        let caregiver = slots(&[
            (Day::Monday, Shift::Morning),
            (Day::Wednesday, Shift::Morning),
            (Day::Saturday, Shift::Night),
        ]);

        assert_eq!(overlap(&caregiver, &family), 0.5);
    }

    #[test]
    fn test_denominator_is_family_need() {
        let family = slots(&[(Day::Friday, Shift::Afternoon)]);
        let caregiver: BTreeSet<DaySlot> = DaySlot::all().collect();

        assert_eq!(overlap(&caregiver, &family), 1.0);
    }

    #[test]
    fn test_no_caregiver_slots() {
        let family = slots(&[(Day::Sunday, Shift::Night)]);
        assert_eq!(overlap(&BTreeSet::new(), &family), 0.0);
    }
}
