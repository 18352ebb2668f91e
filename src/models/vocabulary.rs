//! Closed vocabularies used by caregiver and family snapshots.
//!
//! Every enum exposes `label()`, an exhaustive mapping to the human label the
//! presentation layer shows next to a breakdown entry or elimination reason.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Gender {
    Female,
    Male,
    NonBinary,
    #[default]
    Undisclosed,
}

impl Gender {
    pub fn label(&self) -> &'static str {
        match self {
            Gender::Female => "Female",
            Gender::Male => "Male",
            Gender::NonBinary => "Non-binary",
            Gender::Undisclosed => "Prefer not to say",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Certification {
    FirstAid,
    Cpr,
    EarlyChildhoodEducation,
    Pedagogy,
    Nursing,
    NursingTechnician,
    Psychology,
    SpecialEducation,
}

impl Certification {
    pub fn label(&self) -> &'static str {
        match self {
            Certification::FirstAid => "First aid",
            Certification::Cpr => "CPR",
            Certification::EarlyChildhoodEducation => "Early childhood education",
            Certification::Pedagogy => "Pedagogy",
            Certification::Nursing => "Nursing",
            Certification::NursingTechnician => "Nursing technician",
            Certification::Psychology => "Psychology",
            Certification::SpecialEducation => "Special education",
        }
    }
}

/// Age bands a caregiver declares experience with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AgeRange {
    /// Under 12 months, including babies not yet born
    Newborn,
    /// 12 to 35 months
    Toddler,
    /// 3 to 5 years
    Preschool,
    /// 6 to 11 years
    SchoolAge,
    /// 12 years and up
    Teenager,
}

impl AgeRange {
    pub const ALL: [AgeRange; 5] = [
        AgeRange::Newborn,
        AgeRange::Toddler,
        AgeRange::Preschool,
        AgeRange::SchoolAge,
        AgeRange::Teenager,
    ];

    /// Bucket for a child aged `months` whole months.
    pub fn from_months(months: u32) -> Self {
        match months {
            0..=11 => AgeRange::Newborn,
            12..=35 => AgeRange::Toddler,
            36..=71 => AgeRange::Preschool,
            72..=143 => AgeRange::SchoolAge,
            _ => AgeRange::Teenager,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AgeRange::Newborn => "Newborn (0-11 months)",
            AgeRange::Toddler => "Toddler (1-2 years)",
            AgeRange::Preschool => "Preschool (3-5 years)",
            AgeRange::SchoolAge => "School age (6-11 years)",
            AgeRange::Teenager => "Teenager (12+ years)",
        }
    }
}

/// How far a caregiver is willing to commute.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DistanceBucket {
    #[serde(rename = "KM_5")]
    Km5,
    #[default]
    #[serde(rename = "KM_10")]
    Km10,
    #[serde(rename = "KM_15")]
    Km15,
    #[serde(rename = "KM_20")]
    Km20,
    #[serde(rename = "KM_30")]
    Km30,
    #[serde(rename = "KM_50")]
    Km50,
    Anywhere,
}

/// Horizon used for the distance bonus when the caregiver travels anywhere.
const OPEN_ENDED_HORIZON_KM: f64 = 100.0;

impl DistanceBucket {
    /// Hard ceiling in kilometres, `None` when the caregiver travels anywhere.
    pub fn ceiling_km(&self) -> Option<f64> {
        match self {
            DistanceBucket::Km5 => Some(5.0),
            DistanceBucket::Km10 => Some(10.0),
            DistanceBucket::Km15 => Some(15.0),
            DistanceBucket::Km20 => Some(20.0),
            DistanceBucket::Km30 => Some(30.0),
            DistanceBucket::Km50 => Some(50.0),
            DistanceBucket::Anywhere => None,
        }
    }

    /// Distance at which the proximity bonus reaches zero.
    pub fn decay_horizon_km(&self) -> f64 {
        self.ceiling_km().unwrap_or(OPEN_ENDED_HORIZON_KM)
    }

    pub fn label(&self) -> &'static str {
        match self {
            DistanceBucket::Km5 => "Up to 5 km",
            DistanceBucket::Km10 => "Up to 10 km",
            DistanceBucket::Km15 => "Up to 15 km",
            DistanceBucket::Km20 => "Up to 20 km",
            DistanceBucket::Km30 => "Up to 30 km",
            DistanceBucket::Km50 => "Up to 50 km",
            DistanceBucket::Anywhere => "Any distance",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PetComfort {
    Comfortable,
    #[default]
    Tolerant,
    NotComfortable,
}

impl PetComfort {
    pub fn accepts_pets(&self) -> bool {
        !matches!(self, PetComfort::NotComfortable)
    }

    pub fn label(&self) -> &'static str {
        match self {
            PetComfort::Comfortable => "Comfortable with pets",
            PetComfort::Tolerant => "Tolerates pets",
            PetComfort::NotComfortable => "Not comfortable with pets",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Activity {
    Cooking,
    LightCleaning,
    Laundry,
    HomeworkHelp,
    SchoolRun,
    Bathing,
    Outings,
    PetCare,
    Errands,
}

impl Activity {
    pub fn label(&self) -> &'static str {
        match self {
            Activity::Cooking => "Cooking for the children",
            Activity::LightCleaning => "Light cleaning",
            Activity::Laundry => "Laundry",
            Activity::HomeworkHelp => "Homework help",
            Activity::SchoolRun => "School drop-off and pick-up",
            Activity::Bathing => "Bathing",
            Activity::Outings => "Outings and play dates",
            Activity::PetCare => "Pet care",
            Activity::Errands => "Errands",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Modality {
    Occasional,
    #[default]
    PartTime,
    FullTime,
    LiveIn,
}

impl Modality {
    pub fn label(&self) -> &'static str {
        match self {
            Modality::Occasional => "Occasional",
            Modality::PartTime => "Part-time",
            Modality::FullTime => "Full-time",
            Modality::LiveIn => "Live-in",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Regime {
    #[default]
    Employee,
    Contractor,
    Freelance,
}

impl Regime {
    /// Regimes a family on `self` would usually still accept.
    pub fn is_adjacent_to(&self, other: &Regime) -> bool {
        matches!(
            (self, other),
            (Regime::Employee, Regime::Contractor)
                | (Regime::Contractor, Regime::Employee)
                | (Regime::Contractor, Regime::Freelance)
                | (Regime::Freelance, Regime::Contractor)
        )
    }

    pub fn label(&self) -> &'static str {
        match self {
            Regime::Employee => "Registered employee",
            Regime::Contractor => "Self-employed contractor",
            Regime::Freelance => "Freelance",
        }
    }
}

/// Hourly rate bands, ordered from cheapest to most expensive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RateBucket {
    #[serde(rename = "UP_TO_20")]
    UpTo20,
    #[default]
    #[serde(rename = "FROM_20_TO_30")]
    From20To30,
    #[serde(rename = "FROM_30_TO_40")]
    From30To40,
    #[serde(rename = "FROM_40_TO_60")]
    From40To60,
    #[serde(rename = "ABOVE_60")]
    Above60,
}

impl RateBucket {
    pub fn rank(&self) -> u8 {
        match self {
            RateBucket::UpTo20 => 0,
            RateBucket::From20To30 => 1,
            RateBucket::From30To40 => 2,
            RateBucket::From40To60 => 3,
            RateBucket::Above60 => 4,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RateBucket::UpTo20 => "Up to 20/h",
            RateBucket::From20To30 => "20-30/h",
            RateBucket::From30To40 => "30-40/h",
            RateBucket::From40To60 => "40-60/h",
            RateBucket::Above60 => "Above 60/h",
        }
    }
}

/// Hard requirements a family can attach to a job opening.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Requirement {
    NonSmoker,
    HasVehicle,
    SpecialNeedsExperience,
    PetFriendly,
    ValidatedDocuments,
    CriminalBackgroundCheck,
}

impl Requirement {
    pub fn label(&self) -> &'static str {
        match self {
            Requirement::NonSmoker => "Non-smoker",
            Requirement::HasVehicle => "Has a driver's license",
            Requirement::SpecialNeedsExperience => "Special needs experience",
            Requirement::PetFriendly => "Comfortable with pets",
            Requirement::ValidatedDocuments => "Validated identity document",
            Requirement::CriminalBackgroundCheck => "Criminal background check",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Day {
    pub const ALL: [Day; 7] = [
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
        Day::Saturday,
        Day::Sunday,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Day::Monday => "Monday",
            Day::Tuesday => "Tuesday",
            Day::Wednesday => "Wednesday",
            Day::Thursday => "Thursday",
            Day::Friday => "Friday",
            Day::Saturday => "Saturday",
            Day::Sunday => "Sunday",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Shift {
    Morning,
    Afternoon,
    Night,
}

impl Shift {
    pub const ALL: [Shift; 3] = [Shift::Morning, Shift::Afternoon, Shift::Night];

    pub fn label(&self) -> &'static str {
        match self {
            Shift::Morning => "Morning",
            Shift::Afternoon => "Afternoon",
            Shift::Night => "Night",
        }
    }
}

/// One unit of schedule granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DaySlot {
    pub day: Day,
    pub shift: Shift,
}

impl DaySlot {
    pub fn new(day: Day, shift: Shift) -> Self {
        Self { day, shift }
    }

    /// Every slot of the week, Monday morning first.
    pub fn all() -> impl Iterator<Item = DaySlot> {
        Day::ALL
            .into_iter()
            .flat_map(|day| Shift::ALL.into_iter().map(move |shift| DaySlot { day, shift }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_age_range_boundaries() {
        assert_eq!(AgeRange::from_months(0), AgeRange::Newborn);
        assert_eq!(AgeRange::from_months(11), AgeRange::Newborn);
        assert_eq!(AgeRange::from_months(12), AgeRange::Toddler);
        assert_eq!(AgeRange::from_months(24), AgeRange::Toddler);
        assert_eq!(AgeRange::from_months(60), AgeRange::Preschool);
        assert_eq!(AgeRange::from_months(72), AgeRange::SchoolAge);
        assert_eq!(AgeRange::from_months(200), AgeRange::Teenager);
    }

    #[test]
    fn test_regime_adjacency_is_symmetric() {
        let regimes = [Regime::Employee, Regime::Contractor, Regime::Freelance];
        for a in regimes {
            for b in regimes {
                assert_eq!(a.is_adjacent_to(&b), b.is_adjacent_to(&a));
            }
            assert!(!a.is_adjacent_to(&a));
        }
        assert!(!Regime::Employee.is_adjacent_to(&Regime::Freelance));
    }

    #[test]
    fn test_week_has_21_slots() {
        assert_eq!(DaySlot::all().count(), 21);
    }

    #[test]
    fn test_requirement_serializes_screaming_case() {
        let json = serde_json::to_string(&Requirement::NonSmoker).unwrap();
        assert_eq!(json, "\"NON_SMOKER\"");
    }

    #[test]
    fn test_numeric_buckets_use_separated_names() {
        assert_eq!(serde_json::to_string(&DistanceBucket::Km10).unwrap(), "\"KM_10\"");
        assert_eq!(
            serde_json::from_str::<RateBucket>("\"FROM_20_TO_30\"").unwrap(),
            RateBucket::From20To30
        );
    }

    #[test]
    fn test_open_ended_distance_has_no_ceiling() {
        assert_eq!(DistanceBucket::Anywhere.ceiling_km(), None);
        assert_eq!(DistanceBucket::Anywhere.decay_horizon_km(), 100.0);
        assert_eq!(DistanceBucket::Km20.decay_horizon_km(), 20.0);
    }
}
