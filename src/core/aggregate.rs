use crate::models::MatchBreakdown;

/// Sub-totals and final percentage of a breakdown
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AggregateScore {
    pub fit_score: f64,
    pub trust_score: f64,
    pub bonus_score: f64,
    pub score: u8,
}

/// Round half-up to two decimals. Inputs are never negative.
#[inline]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Combine the ten components into fit, trust and bonus sub-totals.
///
/// `fit = ageRange + modality + activities + regime + availability + childrenCount`,
/// `trust = seal + reviews`, `bonus = distanceBonus + budgetBonus`.
/// The final score is the half-up rounded sum, clamped to `[0, 100]`.
pub fn aggregate(breakdown: &MatchBreakdown) -> AggregateScore {
    let fit_score = round2(
        breakdown.age_range.score
            + breakdown.modality.score
            + breakdown.activities.score
            + breakdown.regime.score
            + breakdown.availability.score
            + breakdown.children_count.score,
    );
    let trust_score = round2(breakdown.seal.score + breakdown.reviews.score);
    let bonus_score = round2(breakdown.distance_bonus.score + breakdown.budget_bonus.score);

    let total = (fit_score + trust_score + bonus_score).round().clamp(0.0, 100.0);

    AggregateScore {
        fit_score,
        trust_score,
        bonus_score,
        score: total as u8,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ScoreComponent;

    fn breakdown_with(scores: [f64; 10]) -> MatchBreakdown {
        let maxes = [15.0, 10.0, 15.0, 10.0, 15.0, 10.0, 10.0, 10.0, 3.0, 2.0];
        let c = |i: usize| ScoreComponent::new(scores[i], maxes[i], "test");
        MatchBreakdown {
            age_range: c(0),
            modality: c(1),
            activities: c(2),
            regime: c(3),
            availability: c(4),
            children_count: c(5),
            seal: c(6),
            reviews: c(7),
            distance_bonus: c(8),
            budget_bonus: c(9),
        }
    }

    #[test]
    fn test_sub_totals() {
        let result = aggregate(&breakdown_with([15.0, 10.0, 5.0, 5.0, 7.5, 10.0, 10.0, 5.0, 1.5, 2.0]));

        assert_eq!(result.fit_score, 52.5);
        assert_eq!(result.trust_score, 15.0);
        assert_eq!(result.bonus_score, 3.5);
        assert_eq!(result.score, 71);
    }

    #[test]
    fn test_rounds_half_up() {
        let result = aggregate(&breakdown_with([0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.5, 0.0]));
        assert_eq!(result.score, 1);

        let result = aggregate(&breakdown_with([0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.49, 0.0]));
        assert_eq!(result.score, 0);
    }

    #[test]
    fn test_full_marks_is_100() {
        let result = aggregate(&breakdown_with([15.0, 10.0, 15.0, 10.0, 15.0, 10.0, 10.0, 10.0, 3.0, 2.0]));
        assert_eq!(result.score, 100);
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(3.14159), 3.14);
        assert_eq!(round2(2.675_1), 2.68);
        assert_eq!(round2(0.0), 0.0);
    }
}
